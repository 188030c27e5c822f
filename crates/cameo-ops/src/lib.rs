//! # cameo-ops
//!
//! Frame filters for the cameo pipeline.
//!
//! # Modules
//!
//! - [`convolve`] - kernel convolution and the sharpen/emboss/blur/edges presets
//! - [`curves`] - lookup-table curve filters (per channel and flat)
//! - [`presets`] - film-emulation curve tables
//! - [`recolor`] - RC / RGV / CMV channel algebra
//! - [`stroke`] - edge stroke overlay
//! - [`median`], [`gray`], [`laplacian`] - the building blocks of the stroke
//! - [`filter`] - the [`Filter`] sum type and [`FilterId`] registry
//! - [`selector`] - active filter state
//!
//! # Example
//!
//! ```rust
//! use cameo_core::{BitDepth, Frame};
//! use cameo_ops::{FilterSelector, FilterId, stroke::EdgeStroke};
//!
//! let mut frame = Frame::filled(32, 24, [90, 120, 200]);
//! let selector = FilterSelector::new(BitDepth::U8, FilterId::Velvia).unwrap();
//!
//! EdgeStroke::default().apply_in_place(&mut frame).unwrap();
//! selector.apply_active(&mut frame).unwrap();
//! ```
//!
//! # Parallelism
//!
//! With the default `parallel` feature, row-wise operators and lookup
//! application run on the rayon pool. Output is identical either way.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod parallel;

pub mod convolve;
pub mod curves;
pub mod filter;
pub mod gray;
pub mod laplacian;
pub mod median;
pub mod presets;
pub mod recolor;
pub mod selector;
pub mod stroke;

pub use error::{OpsError, OpsResult};
pub use filter::{Filter, FilterId};
pub use selector::FilterSelector;
