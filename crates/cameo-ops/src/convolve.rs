//! Kernel convolution over BGR frames.
//!
//! The kernel is applied as a correlation (no flip) independently to each
//! channel. Samples outside the frame replicate the nearest edge sample.
//! Results are rounded half-to-even and saturated to `0..=255`.
//!
//! # Presets
//!
//! | preset                     | size | center | net gain |
//! |----------------------------|------|--------|----------|
//! | [`Kernel::sharpen`]        | 3x3  | 9      | 1        |
//! | [`Kernel::find_edges`]     | 3x3  | 8      | 0        |
//! | [`Kernel::emboss`]         | 3x3  | 1      | 1        |
//! | [`Kernel::blur`]           | 5x5  | 1/25   | 1        |
//!
//! # Example
//!
//! ```rust
//! use cameo_core::Frame;
//! use cameo_ops::convolve::ConvolutionFilter;
//!
//! let src = Frame::filled(8, 8, [40, 90, 200]);
//! let mut dst = Frame::new(8, 8);
//! ConvolutionFilter::sharpen().apply(&src, &mut dst).unwrap();
//! assert_eq!(dst, src);
//! ```

use cameo_core::{CHANNELS, Frame};
use tracing::trace;

use crate::error::ensure_same_size;
use crate::parallel::{clamp_index, for_each_row};
use crate::{OpsError, OpsResult};

/// Square convolution kernel with an odd side.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    data: Vec<f32>,
    size: usize,
}

impl Kernel {
    /// Creates a kernel from row-major weights.
    ///
    /// # Errors
    ///
    /// - [`OpsError::InvalidKernelSize`] if `size` is even or zero
    /// - [`OpsError::InvalidParameter`] if `data` is not `size * size` long
    pub fn new(data: Vec<f32>, size: usize) -> OpsResult<Self> {
        if size == 0 || size % 2 == 0 {
            return Err(OpsError::InvalidKernelSize {
                op: "convolution",
                size,
                reason: "must be odd",
            });
        }
        if data.len() != size * size {
            return Err(OpsError::InvalidParameter(format!(
                "kernel data size {} doesn't match {size}x{size}",
                data.len()
            )));
        }
        Ok(Self { data, size })
    }

    fn from_rows<const N: usize>(rows: [[f32; N]; N]) -> Self {
        Self {
            data: rows.iter().flatten().copied().collect(),
            size: N,
        }
    }

    /// Center 9, neighbors -1.
    pub fn sharpen() -> Self {
        Self::from_rows([
            [-1.0, -1.0, -1.0],
            [-1.0, 9.0, -1.0],
            [-1.0, -1.0, -1.0],
        ])
    }

    /// Center 8, neighbors -1. Flat regions go to zero.
    pub fn find_edges() -> Self {
        Self::from_rows([
            [-1.0, -1.0, -1.0],
            [-1.0, 8.0, -1.0],
            [-1.0, -1.0, -1.0],
        ])
    }

    /// Diagonal relief.
    pub fn emboss() -> Self {
        Self::from_rows([
            [-2.0, -1.0, 0.0],
            [-1.0, 1.0, 1.0],
            [0.0, 1.0, 2.0],
        ])
    }

    /// 5x5 box average.
    pub fn blur() -> Self {
        Self {
            data: vec![1.0 / 25.0; 25],
            size: 5,
        }
    }

    /// Side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance from the center to an edge.
    #[inline]
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    /// Row-major weights.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Weight at (`kx`, `ky`).
    #[inline]
    pub fn weight(&self, kx: usize, ky: usize) -> f32 {
        self.data[ky * self.size + kx]
    }

    /// Sum of all weights.
    pub fn gain(&self) -> f32 {
        self.data.iter().sum()
    }
}

/// Applies `kernel` to `src`, writing into `dst`.
///
/// # Errors
///
/// [`OpsError::SizeMismatch`] if the frames differ in size.
pub fn convolve(src: &Frame, dst: &mut Frame, kernel: &Kernel) -> OpsResult<()> {
    ensure_same_size(src, dst)?;
    let (width, height) = (src.width() as usize, src.height() as usize);
    trace!(width, height, size = kernel.size(), "convolve");
    if src.is_empty() {
        return Ok(());
    }

    let r = kernel.radius() as isize;
    let data = src.data();
    let row_len = width * CHANNELS;

    for_each_row(dst.data_mut(), row_len, |y, row| {
        for x in 0..width {
            let mut sums = [0.0f32; CHANNELS];
            for ky in 0..kernel.size() {
                let sy = clamp_index(y as isize + ky as isize - r, height);
                let src_row = &data[sy * row_len..(sy + 1) * row_len];
                for kx in 0..kernel.size() {
                    let sx = clamp_index(x as isize + kx as isize - r, width);
                    let w = kernel.weight(kx, ky);
                    let px = &src_row[sx * CHANNELS..(sx + 1) * CHANNELS];
                    for (sum, &v) in sums.iter_mut().zip(px) {
                        *sum += w * v as f32;
                    }
                }
            }
            let out = &mut row[x * CHANNELS..(x + 1) * CHANNELS];
            for (o, sum) in out.iter_mut().zip(sums) {
                *o = saturate_u8(sum);
            }
        }
    });
    Ok(())
}

#[inline]
pub(crate) fn saturate_u8(v: f32) -> u8 {
    v.round_ties_even().clamp(0.0, 255.0) as u8
}

/// Filter that owns one [`Kernel`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConvolutionFilter {
    kernel: Kernel,
}

impl ConvolutionFilter {
    /// Wraps an arbitrary kernel.
    pub fn new(kernel: Kernel) -> Self {
        Self { kernel }
    }

    /// [`Kernel::sharpen`] filter.
    pub fn sharpen() -> Self {
        Self::new(Kernel::sharpen())
    }

    /// [`Kernel::find_edges`] filter.
    pub fn find_edges() -> Self {
        Self::new(Kernel::find_edges())
    }

    /// [`Kernel::emboss`] filter.
    pub fn emboss() -> Self {
        Self::new(Kernel::emboss())
    }

    /// [`Kernel::blur`] filter.
    pub fn blur() -> Self {
        Self::new(Kernel::blur())
    }

    /// The owned kernel.
    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// Convolves `src` into `dst`.
    ///
    /// # Errors
    ///
    /// [`OpsError::SizeMismatch`] if the frames differ in size.
    pub fn apply(&self, src: &Frame, dst: &mut Frame) -> OpsResult<()> {
        convolve(src, dst, &self.kernel)
    }

    /// Convolves `frame` in place.
    pub fn apply_in_place(&self, frame: &mut Frame) -> OpsResult<()> {
        let src = frame.clone();
        convolve(&src, frame, &self.kernel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_preset_gains() {
        assert_abs_diff_eq!(Kernel::sharpen().gain(), 1.0);
        assert_abs_diff_eq!(Kernel::find_edges().gain(), 0.0);
        assert_abs_diff_eq!(Kernel::emboss().gain(), 1.0);
        assert_abs_diff_eq!(Kernel::blur().gain(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_kernel_rejects_even() {
        assert!(matches!(
            Kernel::new(vec![0.0; 4], 2),
            Err(OpsError::InvalidKernelSize { size: 2, .. })
        ));
        assert!(Kernel::new(vec![0.0; 8], 3).is_err());
    }

    #[test]
    fn test_flat_frame_unit_gain() {
        let src = Frame::filled(9, 7, [13, 128, 250]);
        for filter in [
            ConvolutionFilter::sharpen(),
            ConvolutionFilter::emboss(),
            ConvolutionFilter::blur(),
        ] {
            let mut dst = Frame::new(9, 7);
            filter.apply(&src, &mut dst).unwrap();
            assert_eq!(dst, src);
        }
    }

    #[test]
    fn test_flat_frame_find_edges_is_zero() {
        let src = Frame::filled(6, 6, [77, 77, 200]);
        let mut dst = Frame::filled(6, 6, [1, 2, 3]);
        ConvolutionFilter::find_edges().apply(&src, &mut dst).unwrap();
        assert!(dst.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_find_edges_marks_a_dot() {
        let mut src = Frame::new(5, 5);
        src.set_pixel(2, 2, [10, 10, 10]);
        let mut dst = Frame::new(5, 5);
        ConvolutionFilter::find_edges().apply(&src, &mut dst).unwrap();
        assert_eq!(dst.pixel(2, 2), [80, 80, 80]);
        // neighbors go negative and saturate
        assert_eq!(dst.pixel(1, 2), [0, 0, 0]);
    }

    #[test]
    fn test_emboss_is_correlation() {
        // single bright pixel at (2,2): output at (1,1) sees it through weight(2,2) = 2
        let mut src = Frame::new(5, 5);
        src.set_pixel(2, 2, [50, 50, 50]);
        let mut dst = Frame::new(5, 5);
        ConvolutionFilter::emboss().apply(&src, &mut dst).unwrap();
        assert_eq!(dst.pixel(1, 1), [100, 100, 100]);
        assert_eq!(dst.pixel(3, 3), [0, 0, 0]);
    }

    #[test]
    fn test_in_place_matches_copy() {
        let mut src = Frame::new(6, 4);
        for y in 0..4 {
            for x in 0..6 {
                src.set_pixel(x, y, [(x * 40) as u8, (y * 60) as u8, 100]);
            }
        }
        let mut dst = Frame::new(6, 4);
        ConvolutionFilter::blur().apply(&src, &mut dst).unwrap();
        let mut inplace = src.clone();
        ConvolutionFilter::blur().apply_in_place(&mut inplace).unwrap();
        assert_eq!(inplace, dst);
    }

    #[test]
    fn test_size_mismatch() {
        let src = Frame::new(4, 4);
        let mut dst = Frame::new(4, 3);
        assert!(matches!(
            ConvolutionFilter::blur().apply(&src, &mut dst),
            Err(OpsError::SizeMismatch(_))
        ));
    }
}
