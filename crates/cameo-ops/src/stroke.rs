//! Edge stroke: darkens edges of a frame like an ink outline.
//!
//! 1. median blur (skipped when `blur_ksize < 3`)
//! 2. Rec.601 grayscale
//! 3. Laplacian edge map with `edge_ksize`
//! 4. every channel of the *unblurred* source is scaled by `(255 - edge) / 255`
//!
//! The scale step truncates, so a zero edge leaves the sample untouched and
//! a saturated edge drives it to black.

use cameo_core::{CHANNELS, Frame};
use tracing::trace;

use crate::error::ensure_same_size;
use crate::gray::to_gray;
use crate::laplacian::{self, laplacian};
use crate::median::{self, median_blurred};
use crate::OpsResult;

/// Default median aperture.
pub const DEFAULT_BLUR_KSIZE: usize = 7;

/// Default Laplacian aperture.
pub const DEFAULT_EDGE_KSIZE: usize = 5;

/// Writes the edge-stroked `src` into `dst`.
///
/// # Errors
///
/// - [`OpsError::InvalidKernelSize`](crate::OpsError::InvalidKernelSize) for
///   an even blur size of 3 or more, or a bad edge size
/// - [`OpsError::SizeMismatch`](crate::OpsError::SizeMismatch) if the frames differ in size
///
/// # Example
///
/// ```rust
/// use cameo_core::Frame;
/// use cameo_ops::stroke::stroke_edges;
///
/// let src = Frame::filled(16, 16, [30, 60, 90]);
/// let mut dst = Frame::new(16, 16);
/// stroke_edges(&src, &mut dst, 7, 5).unwrap();
/// assert_eq!(dst, src);
/// ```
pub fn stroke_edges(
    src: &Frame,
    dst: &mut Frame,
    blur_ksize: usize,
    edge_ksize: usize,
) -> OpsResult<()> {
    ensure_same_size(src, dst)?;
    trace!(
        width = src.width(),
        height = src.height(),
        blur_ksize,
        edge_ksize,
        "stroke edges"
    );

    let gray = if blur_ksize >= 3 {
        to_gray(&median_blurred(src, blur_ksize)?)
    } else {
        to_gray(src)
    };
    let edges = laplacian(&gray, edge_ksize)?;

    let out = dst.data_mut();
    for ((o, px), &e) in out
        .chunks_exact_mut(CHANNELS)
        .zip(src.data().chunks_exact(CHANNELS))
        .zip(edges.data())
    {
        let alpha = 255 - e as u32;
        for (o, &v) in o.iter_mut().zip(px) {
            *o = (v as u32 * alpha / 255) as u8;
        }
    }
    Ok(())
}

/// Edge stroke with validated apertures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeStroke {
    blur_ksize: usize,
    edge_ksize: usize,
}

impl Default for EdgeStroke {
    fn default() -> Self {
        Self {
            blur_ksize: DEFAULT_BLUR_KSIZE,
            edge_ksize: DEFAULT_EDGE_KSIZE,
        }
    }
}

impl EdgeStroke {
    /// Stroke with explicit apertures. A `blur_ksize` below 3 disables the
    /// median pass.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidKernelSize`](crate::OpsError::InvalidKernelSize)
    /// for an even blur size of 3 or more, or an even or oversized edge size.
    pub fn new(blur_ksize: usize, edge_ksize: usize) -> OpsResult<Self> {
        if blur_ksize >= 3 {
            median::validate(blur_ksize)?;
        }
        laplacian::validate(edge_ksize)?;
        Ok(Self {
            blur_ksize,
            edge_ksize,
        })
    }

    /// Median blur aperture.
    pub fn blur_ksize(&self) -> usize {
        self.blur_ksize
    }

    /// Laplacian aperture.
    pub fn edge_ksize(&self) -> usize {
        self.edge_ksize
    }

    /// Strokes `src` into `dst`.
    pub fn apply(&self, src: &Frame, dst: &mut Frame) -> OpsResult<()> {
        stroke_edges(src, dst, self.blur_ksize, self.edge_ksize)
    }

    /// Strokes `frame` in place.
    pub fn apply_in_place(&self, frame: &mut Frame) -> OpsResult<()> {
        let src = frame.clone();
        stroke_edges(&src, frame, self.blur_ksize, self.edge_ksize)
    }
}
