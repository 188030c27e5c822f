//! Curve functions built from control points.
//!
//! The interpolant is chosen by point count alone:
//!
//! | points | result                     |
//! |--------|----------------------------|
//! | 0, 1   | no curve (`None`)          |
//! | 2, 3   | piecewise linear           |
//! | 4+     | not-a-knot cubic spline    |
//!
//! Every curve is defined only between its first and last input. Outside
//! that range [`Curve::evaluate`] returns NaN; nothing is extrapolated.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::{ControlPoint, CubicSpline, CurveResult, validate_points};

/// Largest point count that still produces a piecewise-linear curve.
pub const LINEAR_MAX_POINTS: usize = 3;

/// Which interpolant a [`Curve`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    /// Straight segments between knots.
    Linear,
    /// Cubic spline through knots.
    Spline,
    /// Two curves chained together.
    Composite,
    /// Arbitrary scalar function.
    Function,
}

/// Arbitrary scalar function wrapped so it can live inside a [`Curve`].
#[derive(Clone)]
pub struct ScalarFn(Arc<dyn Fn(f64) -> f64 + Send + Sync>);

impl fmt::Debug for ScalarFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ScalarFn(..)")
    }
}

/// Immutable scalar function mapping an input level to an output level.
#[derive(Debug, Clone)]
pub enum Curve {
    /// Piecewise-linear interpolation through 2 or 3 knots.
    Linear(Vec<ControlPoint>),
    /// Cubic spline through 4 or more knots.
    Spline(CubicSpline),
    /// `outer(inner(x))`.
    Composite {
        /// Applied second.
        outer: Box<Curve>,
        /// Applied first.
        inner: Box<Curve>,
    },
    /// Caller-supplied function.
    Function(ScalarFn),
}

impl Curve {
    /// Builds a curve through `points`.
    ///
    /// Returns `Ok(None)` for fewer than two points; the caller treats that
    /// as identity.
    ///
    /// # Errors
    ///
    /// Fails if inputs are not strictly increasing or a coordinate is not finite.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cameo_curve::{Curve, CurveKind, ControlPoint};
    ///
    /// assert!(Curve::from_points(&[]).unwrap().is_none());
    ///
    /// let pts = [(0.0, 0.0), (56.0, 39.0), (208.0, 226.0), (255.0, 255.0)]
    ///     .map(ControlPoint::from);
    /// let curve = Curve::from_points(&pts).unwrap().unwrap();
    /// assert_eq!(curve.kind(), CurveKind::Spline);
    /// assert!((curve.evaluate(56.0) - 39.0).abs() < 1e-9);
    /// ```
    pub fn from_points(points: &[ControlPoint]) -> CurveResult<Option<Self>> {
        if points.len() < 2 {
            return Ok(None);
        }
        validate_points(points)?;
        let curve = if points.len() <= LINEAR_MAX_POINTS {
            Self::Linear(points.to_vec())
        } else {
            Self::Spline(CubicSpline::fit(points)?)
        };
        trace!(points = points.len(), kind = ?curve.kind(), "built curve");
        Ok(Some(curve))
    }

    /// Wraps an arbitrary scalar function.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self::Function(ScalarFn(Arc::new(f)))
    }

    /// Chains two optional curves into `outer(inner(x))`.
    ///
    /// A missing side passes the other through unchanged; two missing sides
    /// stay missing.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cameo_curve::Curve;
    ///
    /// let double = Curve::from_fn(|x| 2.0 * x);
    /// let inc = Curve::from_fn(|x| x + 1.0);
    ///
    /// let c = Curve::compose(Some(double), Some(inc)).unwrap();
    /// assert_eq!(c.evaluate(3.0), 8.0);
    /// assert!(Curve::compose(None, None).is_none());
    /// ```
    pub fn compose(outer: Option<Curve>, inner: Option<Curve>) -> Option<Curve> {
        match (outer, inner) {
            (None, None) => None,
            (Some(outer), None) => Some(outer),
            (None, Some(inner)) => Some(inner),
            (Some(outer), Some(inner)) => Some(Self::Composite {
                outer: Box::new(outer),
                inner: Box::new(inner),
            }),
        }
    }

    /// Interpolant kind.
    pub fn kind(&self) -> CurveKind {
        match self {
            Self::Linear(_) => CurveKind::Linear,
            Self::Spline(_) => CurveKind::Spline,
            Self::Composite { .. } => CurveKind::Composite,
            Self::Function(_) => CurveKind::Function,
        }
    }

    /// Evaluates the curve at `x`.
    ///
    /// Returns NaN when `x` lies outside the knot range. NaN propagates
    /// through composites.
    pub fn evaluate(&self, x: f64) -> f64 {
        match self {
            Self::Linear(points) => evaluate_linear(points, x),
            Self::Spline(spline) => spline.evaluate(x),
            Self::Composite { outer, inner } => outer.evaluate(inner.evaluate(x)),
            Self::Function(f) => (f.0)(x),
        }
    }
}

fn evaluate_linear(points: &[ControlPoint], x: f64) -> f64 {
    let n = points.len();
    if x.is_nan() || x < points[0].x || x > points[n - 1].x {
        return f64::NAN;
    }
    let i = points
        .partition_point(|p| p.x <= x)
        .saturating_sub(1)
        .min(n - 2);
    let (p0, p1) = (points[i], points[i + 1]);
    let t = (x - p0.x) / (p1.x - p0.x);
    p0.y + t * (p1.y - p0.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn pts(raw: &[(f64, f64)]) -> Vec<ControlPoint> {
        raw.iter().map(|&p| p.into()).collect()
    }

    #[test]
    fn test_absent_below_two_points() {
        assert!(Curve::from_points(&[]).unwrap().is_none());
        assert!(Curve::from_points(&pts(&[(0.0, 5.0)])).unwrap().is_none());
    }

    #[test]
    fn test_kind_threshold() {
        let three = pts(&[(0.0, 0.0), (100.0, 120.0), (255.0, 255.0)]);
        let four = pts(&[(0.0, 0.0), (23.0, 20.0), (157.0, 173.0), (255.0, 255.0)]);
        assert_eq!(Curve::from_points(&three).unwrap().unwrap().kind(), CurveKind::Linear);
        assert_eq!(Curve::from_points(&four).unwrap().unwrap().kind(), CurveKind::Spline);
    }

    #[test]
    fn test_linear_interpolation() {
        let c = Curve::from_points(&pts(&[(0.0, 20.0), (255.0, 235.0)]))
            .unwrap()
            .unwrap();
        assert_abs_diff_eq!(c.evaluate(0.0), 20.0);
        assert_abs_diff_eq!(c.evaluate(255.0), 235.0);
        assert_abs_diff_eq!(c.evaluate(127.5), 127.5, epsilon = 1e-9);
        assert!(c.evaluate(-1.0).is_nan());
        assert!(c.evaluate(256.0).is_nan());
    }

    #[test]
    fn test_spline_passes_through_every_point() {
        let p = pts(&[(0.0, 0.0), (41.0, 28.0), (183.0, 209.0), (255.0, 255.0)]);
        let c = Curve::from_points(&p).unwrap().unwrap();
        for k in &p {
            assert_abs_diff_eq!(c.evaluate(k.x), k.y, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_rejects_unsorted() {
        let p = pts(&[(0.0, 0.0), (50.0, 10.0), (40.0, 20.0)]);
        assert!(Curve::from_points(&p).is_err());
    }

    #[test]
    fn test_compose_passthrough() {
        let f = Curve::from_fn(|x| x * 0.5);
        let only_outer = Curve::compose(Some(f.clone()), None).unwrap();
        let only_inner = Curve::compose(None, Some(f)).unwrap();
        assert_eq!(only_outer.kind(), CurveKind::Function);
        assert_eq!(only_inner.kind(), CurveKind::Function);
        assert_eq!(only_outer.evaluate(10.0), 5.0);
        assert_eq!(only_inner.evaluate(10.0), 5.0);
    }

    #[test]
    fn test_compose_order() {
        let f = Curve::from_fn(|x| x * x);
        let g = Curve::from_fn(|x| x + 3.0);
        let fg = Curve::compose(Some(f), Some(g)).unwrap();
        for x in [0.0, 1.0, 2.5, 10.0] {
            assert_abs_diff_eq!(fg.evaluate(x), (x + 3.0) * (x + 3.0));
        }
    }

    #[test]
    fn test_compose_propagates_nan() {
        let inner = Curve::from_points(&pts(&[(10.0, 10.0), (20.0, 20.0)]))
            .unwrap()
            .unwrap();
        let outer = Curve::from_fn(|x| x + 1.0);
        let c = Curve::compose(Some(outer), Some(inner)).unwrap();
        assert!(c.evaluate(5.0).is_nan());
        assert_abs_diff_eq!(c.evaluate(15.0), 16.0);
    }
}
