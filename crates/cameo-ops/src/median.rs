//! Median blur.
//!
//! Each output sample is the median of the `ksize x ksize` window around it
//! in the same channel. Windows that cross the frame edge replicate the
//! nearest edge sample.

use cameo_core::{CHANNELS, Frame};
use tracing::trace;

use crate::error::ensure_same_size;
use crate::parallel::{clamp_index, for_each_row};
use crate::{OpsError, OpsResult};

pub(crate) fn validate(ksize: usize) -> OpsResult<()> {
    if ksize < 3 || ksize % 2 == 0 {
        return Err(OpsError::InvalidKernelSize {
            op: "median blur",
            size: ksize,
            reason: "must be odd and at least 3",
        });
    }
    Ok(())
}

/// Median-filters `src` into `dst` with an odd `ksize` of at least 3.
///
/// # Errors
///
/// - [`OpsError::InvalidKernelSize`] for an even or too small `ksize`
/// - [`OpsError::SizeMismatch`] if the frames differ in size
///
/// # Example
///
/// ```rust
/// use cameo_core::Frame;
/// use cameo_ops::median::median_blur;
///
/// let mut src = Frame::filled(5, 5, [100, 100, 100]);
/// src.set_pixel(2, 2, [255, 0, 255]);
/// let mut dst = Frame::new(5, 5);
/// median_blur(&src, &mut dst, 3).unwrap();
/// assert_eq!(dst.pixel(2, 2), [100, 100, 100]);
/// ```
pub fn median_blur(src: &Frame, dst: &mut Frame, ksize: usize) -> OpsResult<()> {
    validate(ksize)?;
    ensure_same_size(src, dst)?;
    let (width, height) = (src.width() as usize, src.height() as usize);
    trace!(width, height, ksize, "median blur");
    if src.is_empty() {
        return Ok(());
    }

    let r = (ksize / 2) as isize;
    let data = src.data();
    let row_len = width * CHANNELS;
    let mid = ksize * ksize / 2;

    for_each_row(dst.data_mut(), row_len, |y, row| {
        let mut window = Vec::with_capacity(ksize * ksize);
        for x in 0..width {
            for c in 0..CHANNELS {
                window.clear();
                for dy in -r..=r {
                    let sy = clamp_index(y as isize + dy, height);
                    for dx in -r..=r {
                        let sx = clamp_index(x as isize + dx, width);
                        window.push(data[sy * row_len + sx * CHANNELS + c]);
                    }
                }
                let (_, median, _) = window.select_nth_unstable(mid);
                row[x * CHANNELS + c] = *median;
            }
        }
    });
    Ok(())
}

/// Median-filtered copy of `src`.
pub fn median_blurred(src: &Frame, ksize: usize) -> OpsResult<Frame> {
    let mut dst = Frame::new(src.width(), src.height());
    median_blur(src, &mut dst, ksize)?;
    Ok(dst)
}
