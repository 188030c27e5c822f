//! Second-derivative edge operator on single-channel planes.
//!
//! `ksize == 1` uses the 4-neighbour stencil
//!
//! ```text
//!  0  1  0
//!  1 -4  1
//!  0  1  0
//! ```
//!
//! Larger odd sizes sum two separable passes, `d2/dx2` and `d2/dy2`, each
//! built from a binomial smoothing row and a second-difference row of the
//! same length. For `ksize == 3` that reduces to
//!
//! ```text
//!  2  0  2
//!  0 -8  0
//!  2  0  2
//! ```
//!
//! The signed response is saturated to `0..=255`, so only the positive side
//! of each edge survives. Borders replicate.
//!
//! Separable passes accumulate in `f64`: the combined weight of a size `k`
//! aperture grows like `2^(2k - 2)` and leaves integer range from size 17.

use cameo_core::Plane;
use tracing::trace;

use crate::parallel::{clamp_index, for_each_row};
use crate::{OpsError, OpsResult};

/// Largest accepted aperture.
pub const LAPLACIAN_MAX_KSIZE: usize = 31;

/// Binomial coefficients of length `n` (`[1]`, `[1, 1]`, `[1, 2, 1]`, ...).
fn binomial(n: usize) -> Vec<i32> {
    let mut row = vec![1i32];
    for _ in 1..n {
        let mut next = vec![1i32; row.len() + 1];
        for i in 1..row.len() {
            next[i] = row[i - 1] + row[i];
        }
        row = next;
    }
    row
}

/// Convolves `v` with `[1, -1]`.
fn difference(v: &[i32]) -> Vec<i32> {
    let mut out = vec![0i32; v.len() + 1];
    for (i, &x) in v.iter().enumerate() {
        out[i] += x;
        out[i + 1] -= x;
    }
    out
}

/// Second-difference and smoothing rows for an odd `ksize >= 3`.
pub fn derivative_kernels(ksize: usize) -> (Vec<i32>, Vec<i32>) {
    let d2 = difference(&difference(&binomial(ksize - 2)));
    (d2, binomial(ksize))
}

pub(crate) fn validate(ksize: usize) -> OpsResult<()> {
    if ksize % 2 == 0 || ksize > LAPLACIAN_MAX_KSIZE {
        return Err(OpsError::InvalidKernelSize {
            op: "laplacian",
            size: ksize,
            reason: "must be odd and at most 31",
        });
    }
    Ok(())
}

/// Edge-strength map of `src`.
///
/// # Errors
///
/// [`OpsError::InvalidKernelSize`] for an even or oversized `ksize`.
///
/// # Example
///
/// ```rust
/// use cameo_core::Plane;
/// use cameo_ops::laplacian::laplacian;
///
/// let flat = Plane::filled(6, 6, 90);
/// let edges = laplacian(&flat, 5).unwrap();
/// assert!(edges.data().iter().all(|&v| v == 0));
/// ```
pub fn laplacian(src: &Plane, ksize: usize) -> OpsResult<Plane> {
    validate(ksize)?;
    let (width, height) = (src.width() as usize, src.height() as usize);
    trace!(width, height, ksize, "laplacian");
    let mut dst = Plane::new(src.width(), src.height());
    if width == 0 || height == 0 {
        return Ok(dst);
    }

    let response: Vec<f64> = if ksize == 1 {
        stencil4(src.data(), width, height)
            .into_iter()
            .map(f64::from)
            .collect()
    } else {
        let (d2, smooth) = derivative_kernels(ksize);
        let dxx = separable(src.data(), width, height, &d2, &smooth);
        let dyy = separable(src.data(), width, height, &smooth, &d2);
        dxx.iter().zip(&dyy).map(|(a, b)| a + b).collect()
    };

    for (o, v) in dst.data_mut().iter_mut().zip(response) {
        *o = v.round().clamp(0.0, 255.0) as u8;
    }
    Ok(dst)
}

fn stencil4(data: &[u8], width: usize, height: usize) -> Vec<i32> {
    let at = |x: isize, y: isize| -> i32 {
        data[clamp_index(y, height) * width + clamp_index(x, width)] as i32
    };
    let mut out = vec![0i32; width * height];
    for_each_row(&mut out, width, |y, row| {
        let y = y as isize;
        for (x, o) in row.iter_mut().enumerate() {
            let x = x as isize;
            *o = at(x - 1, y) + at(x + 1, y) + at(x, y - 1) + at(x, y + 1) - 4 * at(x, y);
        }
    });
    out
}

/// Correlates rows with `kx`, then columns with `ky`.
fn separable(data: &[u8], width: usize, height: usize, kx: &[i32], ky: &[i32]) -> Vec<f64> {
    let rx = (kx.len() / 2) as isize;
    let ry = (ky.len() / 2) as isize;

    let mut horiz = vec![0f64; width * height];
    for_each_row(&mut horiz, width, |y, row| {
        let src_row = &data[y * width..(y + 1) * width];
        for (x, o) in row.iter_mut().enumerate() {
            *o = kx
                .iter()
                .enumerate()
                .map(|(k, &w)| {
                    let sx = clamp_index(x as isize + k as isize - rx, width);
                    f64::from(w) * f64::from(src_row[sx])
                })
                .sum();
        }
    });

    let mut out = vec![0f64; width * height];
    for_each_row(&mut out, width, |y, row| {
        for (x, o) in row.iter_mut().enumerate() {
            *o = ky
                .iter()
                .enumerate()
                .map(|(k, &w)| {
                    let sy = clamp_index(y as isize + k as isize - ry, height);
                    f64::from(w) * horiz[sy * width + x]
                })
                .sum();
        }
    });
    out
}
