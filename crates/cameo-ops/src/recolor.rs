//! Channel recolor algebra.
//!
//! Each op rewrites the blue slot of every pixel from the three channels and
//! leaves the rest alone, except RC which also copies the new blue into
//! green.
//!
//! | op  | blue               | green      | red |
//! |-----|--------------------|------------|-----|
//! | RC  | `avg(b, g)`        | `avg(b, g)`| `r` |
//! | RGV | `min(b, g, r)`     | `g`        | `r` |
//! | CMV | `max(b, g, r)`     | `g`        | `r` |
//!
//! The RC average rounds half to even.

use std::fmt;

use cameo_core::{CHANNELS, Frame};
use tracing::trace;

use crate::OpsResult;
use crate::error::ensure_same_size;

/// Stateless recolor operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecolorOp {
    /// Red/cyan: blue and green collapse into their average.
    Rc,
    /// Red/green/value: blue becomes the darkest channel.
    Rgv,
    /// Cyan/magenta/value: blue becomes the brightest channel.
    Cmv,
}

impl RecolorOp {
    /// All ops.
    pub const ALL: [RecolorOp; 3] = [RecolorOp::Rc, RecolorOp::Rgv, RecolorOp::Cmv];

    /// Recolors a single BGR pixel.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cameo_ops::recolor::RecolorOp;
    ///
    /// assert_eq!(RecolorOp::Rc.pixel([100, 200, 50]), [150, 150, 50]);
    /// assert_eq!(RecolorOp::Rgv.pixel([100, 200, 50]), [50, 200, 50]);
    /// assert_eq!(RecolorOp::Cmv.pixel([100, 200, 50]), [200, 200, 50]);
    /// ```
    #[inline]
    pub fn pixel(self, [b, g, r]: [u8; 3]) -> [u8; 3] {
        match self {
            Self::Rc => {
                let avg = ((b as f32 + g as f32) * 0.5).round_ties_even() as u8;
                [avg, avg, r]
            }
            Self::Rgv => [b.min(g).min(r), g, r],
            Self::Cmv => [b.max(g).max(r), g, r],
        }
    }

    /// Recolors `src` into `dst`.
    ///
    /// # Errors
    ///
    /// [`OpsError::SizeMismatch`](crate::OpsError::SizeMismatch) if the frames differ in size.
    pub fn apply(self, src: &Frame, dst: &mut Frame) -> OpsResult<()> {
        ensure_same_size(src, dst)?;
        trace!(op = %self, width = src.width(), height = src.height(), "recolor");
        for (o, px) in dst
            .data_mut()
            .chunks_exact_mut(CHANNELS)
            .zip(src.data().chunks_exact(CHANNELS))
        {
            o.copy_from_slice(&self.pixel([px[0], px[1], px[2]]));
        }
        Ok(())
    }

    /// Recolors `frame` in place.
    pub fn apply_in_place(self, frame: &mut Frame) {
        for px in frame.data_mut().chunks_exact_mut(CHANNELS) {
            let out = self.pixel([px[0], px[1], px[2]]);
            px.copy_from_slice(&out);
        }
    }
}

impl fmt::Display for RecolorOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rc => "RC",
            Self::Rgv => "RGV",
            Self::Cmv => "CMV",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_apply() {
        let src = Frame::filled(3, 2, [100, 200, 50]);
        let mut dst = Frame::new(3, 2);
        RecolorOp::Rc.apply(&src, &mut dst).unwrap();
        assert_eq!(dst, Frame::filled(3, 2, [150, 150, 50]));
        RecolorOp::Rgv.apply(&src, &mut dst).unwrap();
        assert_eq!(dst, Frame::filled(3, 2, [50, 200, 50]));
        RecolorOp::Cmv.apply(&src, &mut dst).unwrap();
        assert_eq!(dst, Frame::filled(3, 2, [200, 200, 50]));
    }

    #[test]
    fn test_rc_rounds_half_to_even() {
        assert_eq!(RecolorOp::Rc.pixel([1, 2, 0])[0], 2);
        assert_eq!(RecolorOp::Rc.pixel([2, 3, 0])[0], 2);
        assert_eq!(RecolorOp::Rc.pixel([255, 254, 0])[0], 254);
    }

    #[test]
    fn test_in_place_matches() {
        let mut f = Frame::new(4, 1);
        f.set_pixel(0, 0, [9, 3, 7]);
        f.set_pixel(3, 0, [0, 255, 128]);
        for op in RecolorOp::ALL {
            let mut dst = Frame::new(4, 1);
            op.apply(&f, &mut dst).unwrap();
            let mut g = f.clone();
            op.apply_in_place(&mut g);
            assert_eq!(g, dst, "{op}");
        }
    }
}
