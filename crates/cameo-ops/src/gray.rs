//! BGR to single-channel intensity.

use cameo_core::{CHANNELS, Frame, Plane, luma_rec601};

/// Rec.601 luma of every pixel.
///
/// # Example
///
/// ```rust
/// use cameo_core::Frame;
/// use cameo_ops::gray::to_gray;
///
/// let gray = to_gray(&Frame::filled(2, 2, [0, 0, 255]));
/// assert_eq!(gray.get(0, 0), 76);
/// ```
pub fn to_gray(src: &Frame) -> Plane {
    let mut plane = Plane::new(src.width(), src.height());
    for (g, px) in plane.data_mut().iter_mut().zip(src.data().chunks_exact(CHANNELS)) {
        *g = luma_rec601([px[0], px[1], px[2]]);
    }
    plane
}
