//! Control points.

use crate::{CurveError, CurveResult};

/// A single knot of a tone curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    /// X coordinate (input level).
    pub x: f64,
    /// Y coordinate (output level).
    pub y: f64,
}

impl ControlPoint {
    /// Create a new control point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for ControlPoint {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<(u8, u8)> for ControlPoint {
    #[inline]
    fn from((x, y): (u8, u8)) -> Self {
        Self {
            x: x as f64,
            y: y as f64,
        }
    }
}

/// Checks that every point is finite and inputs strictly increase.
///
/// # Example
///
/// ```rust
/// use cameo_curve::{ControlPoint, validate_points};
///
/// let ok = [ControlPoint::new(0.0, 0.0), ControlPoint::new(1.0, 1.0)];
/// assert!(validate_points(&ok).is_ok());
///
/// let bad = [ControlPoint::new(1.0, 0.0), ControlPoint::new(1.0, 1.0)];
/// assert!(validate_points(&bad).is_err());
/// ```
pub fn validate_points(points: &[ControlPoint]) -> CurveResult<()> {
    for (index, p) in points.iter().enumerate() {
        if !p.x.is_finite() || !p.y.is_finite() {
            return Err(CurveError::NonFinite { index, x: p.x, y: p.y });
        }
    }
    for (index, pair) in points.windows(2).enumerate() {
        if pair[1].x <= pair[0].x {
            return Err(CurveError::NonIncreasing {
                index: index + 1,
                previous: pair[0].x,
                current: pair[1].x,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_offending_index() {
        let pts = [
            ControlPoint::new(0.0, 0.0),
            ControlPoint::new(10.0, 5.0),
            ControlPoint::new(8.0, 9.0),
        ];
        match validate_points(&pts) {
            Err(CurveError::NonIncreasing { index, previous, current }) => {
                assert_eq!(index, 2);
                assert_eq!(previous, 10.0);
                assert_eq!(current, 8.0);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_nan() {
        let pts = [ControlPoint::new(0.0, f64::NAN)];
        assert!(matches!(
            validate_points(&pts),
            Err(CurveError::NonFinite { index: 0, .. })
        ));
    }

    #[test]
    fn test_from_tuples() {
        let p: ControlPoint = (23u8, 20u8).into();
        assert_eq!(p, ControlPoint::new(23.0, 20.0));
    }
}
