//! Capture session.
//!
//! Each cycle grabs a frame, strokes its edges, runs the active filter,
//! shows and records it, then handles at most one key press.

use std::path::PathBuf;

use cameo_core::BitDepth;
use cameo_io::{Codec, FrameSink, FrameSource};
use cameo_ops::stroke::EdgeStroke;
use cameo_ops::{FilterId, FilterSelector, OpsError};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::capture::{CaptureError, CaptureManager};
use crate::config::{ConfigError, SessionConfig};
use crate::keys::KeyAction;
use crate::window::WindowManager;

/// Errors ending a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Grabbing, showing or recording a frame failed.
    #[error(transparent)]
    Capture(#[from] CaptureError),

    /// A filter or the edge stroke rejected its parameters or frame.
    #[error(transparent)]
    Filter(#[from] OpsError),

    /// The session config holds an unknown value.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Counters reported when a session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Loop iterations.
    pub cycles: u64,
    /// Cycles that produced a frame.
    pub frames: u64,
    /// Screenshots written.
    pub screenshots: u64,
    /// Filter active at the end.
    pub active_filter: FilterId,
}

/// Live filter session.
pub struct Cameo<S: FrameSource> {
    window: WindowManager,
    capture: CaptureManager<S>,
    selector: FilterSelector,
    stroke: EdgeStroke,
    screenshot_path: PathBuf,
    screencast_path: PathBuf,
    codec: Codec,
    max_frames: Option<u64>,
}

impl<S: FrameSource> Cameo<S> {
    /// Session over `capture` shown in `window`.
    pub fn new(
        window: WindowManager,
        mut capture: CaptureManager<S>,
        config: &SessionConfig,
    ) -> Result<Self, SessionError> {
        let selector = FilterSelector::new(BitDepth::U8, config.initial_filter()?)?;
        let stroke = EdgeStroke::new(config.blur_ksize, config.edge_ksize)?;
        capture.set_mirror_preview(config.mirror_preview);
        let capture = capture.with_fps_warmup(config.fps_warmup_frames);
        debug!(filter = %selector.active(), "session ready");
        Ok(Self {
            window,
            capture,
            selector,
            stroke,
            screenshot_path: config.screenshot_path.clone(),
            screencast_path: config.screencast_path.clone(),
            codec: config.codec()?,
            max_frames: None,
        })
    }

    /// Stops after `frames` cycles.
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    /// Preview window.
    pub fn window(&self) -> &WindowManager {
        &self.window
    }

    /// Capture bracket.
    pub fn capture(&self) -> &CaptureManager<S> {
        &self.capture
    }

    /// Filter selection.
    pub fn selector(&self) -> &FilterSelector {
        &self.selector
    }

    /// Runs until the window closes, the source runs dry, or the frame
    /// bound is reached. Any screencast in progress is finished and the
    /// window is destroyed, also when a cycle fails.
    pub fn run(&mut self) -> Result<RunSummary, SessionError> {
        self.window.create_window();
        let mut cycles = 0u64;
        let mut frames = 0u64;

        let looped = self.run_cycles(&mut cycles, &mut frames);
        if let Err(e) = &looped {
            warn!(error = %e, cycles, "session cycle failed");
            self.capture.abandon_frame();
        }
        let stopped = self.capture.stop_writing_video();
        if self.window.is_window_created() {
            self.window.destroy_window();
        }
        looped?;
        stopped?;

        let summary = RunSummary {
            cycles,
            frames,
            screenshots: self.capture.screenshots_written(),
            active_filter: self.selector.active(),
        };
        info!(?summary, "session ended");
        Ok(summary)
    }

    fn run_cycles(&mut self, cycles: &mut u64, frames: &mut u64) -> Result<(), SessionError> {
        while self.window.is_window_created() {
            if self.max_frames.is_some_and(|max| *cycles >= max) {
                debug!(cycles = *cycles, "frame bound reached");
                break;
            }
            if self.capture.source().is_exhausted() {
                debug!(cycles = *cycles, "source exhausted");
                break;
            }

            self.capture.enter_frame()?;
            if let Some(frame) = self.capture.frame_mut() {
                self.stroke.apply_in_place(frame)?;
                self.selector.apply_active(frame)?;
                *frames += 1;
            }
            self.capture
                .exit_frame(Some(&mut self.window as &mut dyn FrameSink))?;

            if let Some(key) = self.window.process_events() {
                self.on_keypress(key)?;
            }
            *cycles += 1;
        }
        Ok(())
    }

    /// Handles one key press.
    pub fn on_keypress(&mut self, key: u8) -> Result<(), SessionError> {
        match KeyAction::from_key(key) {
            Some(KeyAction::Screenshot) => {
                self.capture.write_image(&self.screenshot_path);
            }
            Some(KeyAction::ToggleRecording) => {
                if self.capture.is_writing_video() {
                    self.capture.stop_writing_video()?;
                } else {
                    self.capture
                        .start_writing_video(&self.screencast_path, self.codec)?;
                }
            }
            Some(KeyAction::Quit) => {
                self.window.destroy_window();
            }
            Some(KeyAction::Select(id)) => {
                self.selector.select_id(id)?;
            }
            None => {
                debug!(key, "ignored key");
            }
        }
        Ok(())
    }
}
