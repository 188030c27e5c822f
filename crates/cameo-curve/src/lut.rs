//! Dense lookup tables and the bulk gather that applies them.

use cameo_core::Sample;
use tracing::trace;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{Curve, CurveError, CurveResult};

// Curve values that land on an integer up to rounding noise stay on it
// when truncated.
const SNAP_EPSILON: f64 = 1e-7;

/// Curve sampled at every representable input level.
///
/// `entries[i] = clamp(f(i), 0, len - 1)`, truncated toward zero. An
/// undefined (NaN) sample maps to 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTable {
    entries: Vec<u16>,
}

impl LookupTable {
    /// Samples `curve` at `0..len`.
    ///
    /// Returns `None` when there is no curve; an absent table means the
    /// apply step leaves samples untouched.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cameo_curve::{Curve, LookupTable};
    ///
    /// assert!(LookupTable::build(None, 256).is_none());
    ///
    /// let boost = Curve::from_fn(|x| x * 2.0);
    /// let table = LookupTable::build(Some(&boost), 256).unwrap();
    /// assert_eq!(table.get(10), Some(20));
    /// assert_eq!(table.get(200), Some(255));
    /// ```
    pub fn build(curve: Option<&Curve>, len: usize) -> Option<Self> {
        let curve = curve?;
        let table = Self::from_fn(len, |x| curve.evaluate(x));
        trace!(len, kind = ?curve.kind(), "built lookup table");
        Some(table)
    }

    /// Samples an arbitrary function at `0..len`.
    ///
    /// `len` is capped at 65536, the range of a 16-bit level.
    pub fn from_fn<F>(len: usize, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        let len = len.min(u16::MAX as usize + 1);
        let max = len.saturating_sub(1) as f64;
        let entries = (0..len)
            .map(|i| {
                let v = f(i as f64);
                if v.is_nan() {
                    0
                } else {
                    (v + SNAP_EPSILON).clamp(0.0, max) as u16
                }
            })
            .collect();
        Self { entries }
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if the table has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw entries.
    #[inline]
    pub fn entries(&self) -> &[u16] {
        &self.entries
    }

    /// Entry at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<u16> {
        self.entries.get(index).copied()
    }

    fn ensure_covers<T: Sample>(&self) -> CurveResult<()> {
        if self.entries.len() < T::LEVELS {
            return Err(CurveError::TableTooShort {
                len: self.entries.len(),
                levels: T::LEVELS,
            });
        }
        Ok(())
    }
}

/// Maps `src` through `table` into `dst`.
///
/// With no table `dst` is left exactly as it was.
///
/// # Errors
///
/// - [`CurveError::LengthMismatch`] if the buffers differ in length
/// - [`CurveError::TableTooShort`] if the table cannot index every sample
pub fn apply_lookup<T: Sample>(
    table: Option<&LookupTable>,
    src: &[T],
    dst: &mut [T],
) -> CurveResult<()> {
    let Some(table) = table else {
        return Ok(());
    };
    if src.len() != dst.len() {
        return Err(CurveError::LengthMismatch {
            src: src.len(),
            dst: dst.len(),
        });
    }
    table.ensure_covers::<T>()?;

    let entries = table.entries();

    #[cfg(feature = "parallel")]
    dst.par_iter_mut()
        .zip(src.par_iter())
        .for_each(|(d, &s)| *d = T::from_level(entries[s.index()]));

    #[cfg(not(feature = "parallel"))]
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = T::from_level(entries[s.index()]);
    }

    Ok(())
}

/// Maps `buf` through `table` in place. No table, no change.
///
/// # Errors
///
/// [`CurveError::TableTooShort`] if the table cannot index every sample.
pub fn apply_lookup_in_place<T: Sample>(
    table: Option<&LookupTable>,
    buf: &mut [T],
) -> CurveResult<()> {
    let Some(table) = table else {
        return Ok(());
    };
    table.ensure_covers::<T>()?;

    let entries = table.entries();

    #[cfg(feature = "parallel")]
    buf.par_iter_mut()
        .for_each(|v| *v = T::from_level(entries[v.index()]));

    #[cfg(not(feature = "parallel"))]
    for v in buf.iter_mut() {
        *v = T::from_level(entries[v.index()]);
    }

    Ok(())
}
