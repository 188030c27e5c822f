//! # cameo-io
//!
//! The collaborators around the filter engine: where frames come from and
//! where they go.
//!
//! # Modules
//!
//! - [`source`] - [`FrameSource`] and the PNG sequence, still and pattern sources
//! - [`sink`] - [`FrameSink`], [`VideoEncoder`] and simple sinks
//! - [`png`] - PNG stills (BGR frames, RGB files)
//! - [`y4m`] - YUV4MPEG2 4:2:0 stream encoder
//! - [`codec`] - FourCC codec identifiers
//!
//! # Example
//!
//! ```rust
//! use cameo_io::{FrameSink, FrameSource, NullSink, PatternSource};
//!
//! let mut source = PatternSource::new(64, 48, 30.0).unwrap().with_limit(3);
//! let mut sink = NullSink::new();
//! while source.grab().unwrap() {
//!     if let Some(frame) = source.retrieve() {
//!         sink.show(&frame).unwrap();
//!     }
//! }
//! assert_eq!(sink.shown(), 3);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;

pub mod codec;
pub mod png;
pub mod sink;
pub mod source;
pub mod y4m;

pub use codec::Codec;
pub use error::{IoError, IoResult};
pub use sink::{FrameSink, MemorySink, NullSink, PngSequenceSink, VideoEncoder, open_video};
pub use source::{FrameSource, PatternSource, SequenceSource, StillSource};
pub use y4m::Y4mEncoder;
