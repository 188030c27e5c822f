//! # cameo-curve
//!
//! Tone curves and lookup tables: the machinery that turns a handful of
//! control points into a fast per-sample mapping.
//!
//! # Building Blocks
//!
//! - [`ControlPoint`] - one `(input, output)` knot of a tone curve
//! - [`Curve`] - continuous function through the knots
//!   (piecewise linear for 2-3 points, cubic spline for 4 or more)
//! - [`Curve::compose`] - chain two optional curves (`outer(inner(x))`)
//! - [`LookupTable`] - the curve sampled at every representable level,
//!   clamped into range
//! - [`apply_lookup`] - bulk gather of a buffer through an optional table
//!
//! Absence is meaningful throughout: fewer than two control points yield no
//! curve, no curve yields no table, and no table means "leave the samples
//! alone". It never means an all-zero table.
//!
//! # Usage
//!
//! ```rust
//! use cameo_curve::{Curve, ControlPoint, LookupTable, apply_lookup};
//!
//! let curve = Curve::from_points(&[
//!     ControlPoint::new(0.0, 0.0),
//!     ControlPoint::new(128.0, 160.0),
//!     ControlPoint::new(255.0, 255.0),
//! ]).unwrap();
//!
//! let table = LookupTable::build(curve.as_ref(), 256);
//! let src = [0u8, 64, 128, 255];
//! let mut dst = [0u8; 4];
//! apply_lookup(table.as_ref(), &src, &mut dst).unwrap();
//! assert_eq!(dst, [0, 80, 160, 255]);
//! ```
//!
//! # Dependencies
//!
//! - [`cameo-core`] - sample depths
//! - [`rayon`] - parallel table application (`parallel` feature)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod curve;
mod error;
mod lut;
mod point;
mod spline;

pub use curve::{Curve, CurveKind, LINEAR_MAX_POINTS, ScalarFn};
pub use error::{CurveError, CurveResult};
pub use lut::{LookupTable, apply_lookup, apply_lookup_in_place};
pub use point::{ControlPoint, validate_points};
pub use spline::{CubicSpline, SPLINE_MIN_POINTS};
