//! # cameo-core
//!
//! Core types shared by every stage of the cameo filter pipeline.
//!
//! - [`Frame`] - interleaved 3-channel 8-bit buffer in BGR order
//! - [`Plane`] - single-channel 8-bit buffer (split channels, grayscale, edge maps)
//! - [`Sample`], [`BitDepth`] - representable value ranges used to size lookup tables
//! - [`Error`] - shape and dimension errors
//!
//! ## Crate Structure
//!
//! ```text
//! cameo-core (this crate)
//!    ^
//!    |
//!    +-- cameo-curve (curves, lookup tables)
//!    +-- cameo-ops (filters, edge stroke, selector)
//!    +-- cameo-io (frame sources, sinks, encoders)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use cameo_core::{Frame, CHANNEL_RED};
//!
//! let mut frame = Frame::filled(4, 4, [10, 20, 30]);
//! frame.set_pixel(1, 1, [0, 0, 255]);
//! let planes = frame.split();
//! assert_eq!(planes[CHANNEL_RED].get(1, 1), 255);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod frame;
pub mod pixel;
pub mod plane;

pub use error::{Error, Result};
pub use frame::Frame;
pub use pixel::{
    BitDepth, Sample, CHANNELS, CHANNEL_BLUE, CHANNEL_GREEN, CHANNEL_RED, REC601_LUMA_B,
    REC601_LUMA_G, REC601_LUMA_R, luma_rec601,
};
pub use plane::Plane;
