//! # cameo-cli
//!
//! Live filter session around a frame source: capture bracket with
//! preview, screenshots and screencasts, key bindings, and the run loop
//! driving edge stroking and the active filter.
//!
//! The `cameo` binary wraps this library; see `cameo --help`.

#![warn(missing_docs)]

pub mod capture;
pub mod config;
pub mod keys;
pub mod session;
pub mod window;

pub use capture::{CaptureError, CaptureManager, Clock, ManualClock, SystemClock};
pub use config::{ConfigError, SessionConfig};
pub use keys::KeyAction;
pub use session::{Cameo, RunSummary, SessionError};
pub use window::{KeySource, NoKeys, ScriptedKeys, WindowManager};
