//! Interpolating cubic spline with not-a-knot end conditions.
//!
//! The spline is stored as its knots plus the second derivative
//! ("moment") at every knot. On segment `[x_i, x_i+1]` of width `h`:
//!
//! ```text
//! S(x) = M_i (x_i+1 - x)^3 / 6h + M_i+1 (x - x_i)^3 / 6h
//!      + (y_i / h - M_i h / 6) (x_i+1 - x)
//!      + (y_i+1 / h - M_i+1 h / 6) (x - x_i)
//! ```
//!
//! Not-a-knot means the third derivative is continuous across the second
//! and the second-to-last knot. With exactly four points the whole curve
//! collapses to the single cubic through them.

use crate::{ControlPoint, CurveError, CurveResult, validate_points};

/// Minimum number of control points for a not-a-knot spline.
pub const SPLINE_MIN_POINTS: usize = 4;

/// Precomputed cubic spline.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    moments: Vec<f64>,
}

impl CubicSpline {
    /// Fits a spline through `points`.
    ///
    /// # Errors
    ///
    /// - [`CurveError::TooFewPoints`] for fewer than four points
    /// - [`CurveError::NonIncreasing`] / [`CurveError::NonFinite`] for bad input
    /// - [`CurveError::SingularSystem`] if the moment system cannot be solved
    pub fn fit(points: &[ControlPoint]) -> CurveResult<Self> {
        let n = points.len();
        if n < SPLINE_MIN_POINTS {
            return Err(CurveError::TooFewPoints {
                points: n,
                min: SPLINE_MIN_POINTS,
            });
        }
        validate_points(points)?;

        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
        let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
        let slope: Vec<f64> = (0..n - 1).map(|i| (ys[i + 1] - ys[i]) / h[i]).collect();

        let mut a = vec![vec![0.0f64; n]; n];
        let mut rhs = vec![0.0f64; n];

        // not-a-knot at x_1
        a[0][0] = h[1];
        a[0][1] = -(h[0] + h[1]);
        a[0][2] = h[0];

        for i in 1..n - 1 {
            a[i][i - 1] = h[i - 1];
            a[i][i] = 2.0 * (h[i - 1] + h[i]);
            a[i][i + 1] = h[i];
            rhs[i] = 6.0 * (slope[i] - slope[i - 1]);
        }

        // not-a-knot at x_n-2
        a[n - 1][n - 3] = h[n - 2];
        a[n - 1][n - 2] = -(h[n - 3] + h[n - 2]);
        a[n - 1][n - 1] = h[n - 3];

        let moments = solve_dense(a, rhs).ok_or(CurveError::SingularSystem { points: n })?;

        Ok(Self { xs, ys, moments })
    }

    /// Number of knots.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Always `false`; a fitted spline has at least four knots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Input range covered by the knots.
    #[inline]
    pub fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    /// Second derivatives at each knot.
    #[inline]
    pub fn moments(&self) -> &[f64] {
        &self.moments
    }

    /// Evaluates the spline; NaN outside the knot range.
    pub fn evaluate(&self, x: f64) -> f64 {
        let (lo, hi) = self.domain();
        if !(lo..=hi).contains(&x) {
            return f64::NAN;
        }
        let n = self.xs.len();
        let i = self.xs.partition_point(|&k| k <= x).saturating_sub(1).min(n - 2);

        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);
        let (m0, m1) = (self.moments[i], self.moments[i + 1]);
        let h = x1 - x0;
        let a = x1 - x;
        let b = x - x0;
        // knots map exactly
        if b == 0.0 {
            return y0;
        }
        if a == 0.0 {
            return y1;
        }

        m0 * a * a * a / (6.0 * h)
            + m1 * b * b * b / (6.0 * h)
            + (y0 / h - m0 * h / 6.0) * a
            + (y1 / h - m1 * h / 6.0) * b
    }
}

/// Gaussian elimination with partial pivoting. `None` if singular.
fn solve_dense(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Option<Vec<f64>> {
    let n = b.len();
    for col in 0..n {
        let pivot = (col..n).max_by(|&r, &s| a[r][col].abs().total_cmp(&a[s][col].abs()))?;
        if a[pivot][col].abs() < 1e-12 {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0f64; n];
    for row in (0..n).rev() {
        let mut sum = b[row];
        for k in row + 1..n {
            sum -= a[row][k] * x[k];
        }
        x[row] = sum / a[row][row];
    }
    Some(x)
}
