//! Frame capture bracket.
//!
//! A cycle is `enter_frame` (grab), any number of `frame`/`frame_mut`
//! calls (the first one retrieves), then `exit_frame` which updates the
//! frame-rate estimate, shows the frame, writes a pending screenshot and
//! appends to the screencast.
//!
//! The screencast encoder opens lazily. Sources that report no frame rate
//! are given `fps_warmup_frames` frames before the estimate is used
//! instead; frames captured during that window are not recorded.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use cameo_core::Frame;
use cameo_io::{Codec, FrameSink, FrameSource, IoError, VideoEncoder, open_video, png};
use thiserror::Error;
use tracing::{debug, info, trace, warn};

use crate::config::DEFAULT_FPS_WARMUP_FRAMES;

/// Monotonic time since some fixed origin.
pub trait Clock: Send {
    /// Current reading.
    fn now(&self) -> Duration;
}

/// Wall clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Clock reading zero now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock advanced by hand. Clones share the same reading.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    /// Clock reading zero until advanced.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the reading forward by `step`.
    pub fn advance(&self, step: Duration) {
        self.nanos.fetch_add(step.as_nanos() as u64, Ordering::SeqCst);
    }

    /// Sets the reading.
    pub fn set(&self, at: Duration) {
        self.nanos.store(at.as_nanos() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }
}

/// Capture errors.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// `enter_frame` called again before `exit_frame`.
    #[error("previous enter_frame had no matching exit_frame")]
    FrameAlreadyEntered,

    /// Source, sink, or file failure.
    #[error(transparent)]
    Io(#[from] IoError),
}

enum VideoWriter {
    Unopened,
    Open(Box<dyn VideoEncoder>),
}

struct Recording {
    path: PathBuf,
    codec: Codec,
    writer: VideoWriter,
}

/// Wraps a [`FrameSource`] with preview, screenshot and screencast output.
pub struct CaptureManager<S: FrameSource> {
    source: S,
    clock: Box<dyn Clock>,
    mirror_preview: bool,
    fps_warmup_frames: u64,

    entered: bool,
    frame: Option<Frame>,
    image_path: Option<PathBuf>,
    recording: Option<Recording>,

    start: Option<Duration>,
    frames_elapsed: u64,
    fps_estimate: Option<f64>,
    screenshots_written: u64,
}

impl<S: FrameSource> CaptureManager<S> {
    /// Manager over `source` using the system clock.
    pub fn new(source: S, mirror_preview: bool) -> Self {
        Self::with_clock(source, mirror_preview, Box::new(SystemClock::new()))
    }

    /// Manager with an explicit clock.
    pub fn with_clock(source: S, mirror_preview: bool, clock: Box<dyn Clock>) -> Self {
        Self {
            source,
            clock,
            mirror_preview,
            fps_warmup_frames: DEFAULT_FPS_WARMUP_FRAMES,
            entered: false,
            frame: None,
            image_path: None,
            recording: None,
            start: None,
            frames_elapsed: 0,
            fps_estimate: None,
            screenshots_written: 0,
        }
    }

    /// Frames to wait for an estimate when the source has no frame rate.
    pub fn with_fps_warmup(mut self, frames: u64) -> Self {
        self.fps_warmup_frames = frames;
        self
    }

    /// Wrapped source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Wrapped source, mutably.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Whether previews are mirrored.
    pub fn mirror_preview(&self) -> bool {
        self.mirror_preview
    }

    /// Turns preview mirroring on or off.
    pub fn set_mirror_preview(&mut self, mirror: bool) {
        self.mirror_preview = mirror;
    }

    /// Frames that went through `exit_frame`.
    pub fn frames_elapsed(&self) -> u64 {
        self.frames_elapsed
    }

    /// Frames per second measured since the first frame.
    pub fn fps_estimate(&self) -> Option<f64> {
        self.fps_estimate
    }

    /// Screenshots written so far.
    pub fn screenshots_written(&self) -> u64 {
        self.screenshots_written
    }

    /// `true` between `enter_frame` and `exit_frame`.
    pub fn is_entered(&self) -> bool {
        self.entered
    }

    /// Grabs the next frame without decoding it.
    ///
    /// # Errors
    ///
    /// [`CaptureError::FrameAlreadyEntered`] if the previous cycle was not
    /// closed with [`exit_frame`](Self::exit_frame).
    pub fn enter_frame(&mut self) -> Result<(), CaptureError> {
        if self.entered {
            return Err(CaptureError::FrameAlreadyEntered);
        }
        self.entered = self.source.grab()?;
        trace!(grabbed = self.entered, "enter_frame");
        Ok(())
    }

    fn fetch(&mut self) {
        if self.entered && self.frame.is_none() {
            self.frame = self.source.retrieve();
        }
    }

    /// The current frame, retrieved on first access.
    pub fn frame(&mut self) -> Option<&Frame> {
        self.fetch();
        self.frame.as_ref()
    }

    /// Mutable access to the current frame, retrieved on first access.
    pub fn frame_mut(&mut self) -> Option<&mut Frame> {
        self.fetch();
        self.frame.as_mut()
    }

    /// Closes the cycle.
    ///
    /// Without a frame this only releases the bracket. Otherwise the frame
    /// is counted, shown on `preview`, written to a pending screenshot and
    /// appended to the screencast, then dropped.
    pub fn exit_frame(&mut self, preview: Option<&mut dyn FrameSink>) -> Result<(), CaptureError> {
        self.fetch();
        self.entered = false;
        let Some(frame) = self.frame.take() else {
            return Ok(());
        };

        let now = self.clock.now();
        match self.start {
            None => self.start = Some(now),
            Some(start) => {
                let secs = now.saturating_sub(start).as_secs_f64();
                if secs > 0.0 {
                    self.fps_estimate = Some(self.frames_elapsed as f64 / secs);
                }
            }
        }
        self.frames_elapsed += 1;

        if let Some(sink) = preview {
            if self.mirror_preview {
                sink.show(&frame.mirrored())?;
            } else {
                sink.show(&frame)?;
            }
        }

        if let Some(path) = self.image_path.take() {
            png::write_frame(&path, &frame)?;
            self.screenshots_written += 1;
            info!(path = %path.display(), "screenshot written");
        }

        self.write_video_frame(&frame)?;
        Ok(())
    }

    /// Releases the bracket and drops the current frame without counting,
    /// showing or recording it.
    pub fn abandon_frame(&mut self) {
        if self.entered || self.frame.is_some() {
            debug!("frame abandoned");
        }
        self.entered = false;
        self.frame = None;
    }

    /// Writes the next exited frame to `path`.
    pub fn write_image<P: AsRef<Path>>(&mut self, path: P) {
        self.image_path = Some(path.as_ref().to_path_buf());
    }

    /// `true` if a screenshot is pending.
    pub fn is_writing_image(&self) -> bool {
        self.image_path.is_some()
    }

    /// Starts recording exited frames to `path`.
    ///
    /// A recording already in progress is finished first.
    pub fn start_writing_video<P: AsRef<Path>>(
        &mut self,
        path: P,
        codec: Codec,
    ) -> Result<(), CaptureError> {
        self.stop_writing_video()?;
        let path = path.as_ref().to_path_buf();
        info!(path = %path.display(), %codec, "screencast started");
        self.recording = Some(Recording {
            path,
            codec,
            writer: VideoWriter::Unopened,
        });
        Ok(())
    }

    /// Stops recording and flushes the stream.
    pub fn stop_writing_video(&mut self) -> Result<(), CaptureError> {
        let Some(recording) = self.recording.take() else {
            return Ok(());
        };
        match recording.writer {
            VideoWriter::Open(mut encoder) => {
                encoder.finish()?;
                info!(
                    path = %recording.path.display(),
                    frames = encoder.frames_written(),
                    "screencast stopped"
                );
            }
            VideoWriter::Unopened => {
                info!(path = %recording.path.display(), frames = 0, "screencast stopped before any frame");
            }
        }
        Ok(())
    }

    /// `true` while a recording is requested, opened or not.
    pub fn is_writing_video(&self) -> bool {
        self.recording.is_some()
    }

    /// `true` once the screencast encoder exists.
    pub fn is_video_open(&self) -> bool {
        matches!(
            self.recording,
            Some(Recording {
                writer: VideoWriter::Open(_),
                ..
            })
        )
    }

    /// Frames appended to the current screencast.
    pub fn video_frames_written(&self) -> u64 {
        match &self.recording {
            Some(Recording {
                writer: VideoWriter::Open(encoder),
                ..
            }) => encoder.frames_written(),
            _ => 0,
        }
    }

    fn write_video_frame(&mut self, frame: &Frame) -> Result<(), CaptureError> {
        let Some(recording) = self.recording.as_mut() else {
            return Ok(());
        };

        if let VideoWriter::Unopened = recording.writer {
            let mut fps = self.source.fps();
            if fps <= 0.0 {
                if self.frames_elapsed < self.fps_warmup_frames {
                    debug!(frames = self.frames_elapsed, "screencast deferred, measuring fps");
                    return Ok(());
                }
                match self.fps_estimate {
                    Some(estimate) => fps = estimate,
                    None => {
                        debug!("screencast deferred, no fps estimate yet");
                        return Ok(());
                    }
                }
            }
            let size = (self.source.frame_width(), self.source.frame_height());
            let encoder = open_video(&recording.path, recording.codec, fps, size)?;
            debug!(path = %recording.path.display(), fps, width = size.0, height = size.1, "screencast opened");
            recording.writer = VideoWriter::Open(encoder);
        }

        if let VideoWriter::Open(encoder) = &mut recording.writer {
            encoder.write_frame(frame)?;
        }
        Ok(())
    }
}

impl<S: FrameSource> Drop for CaptureManager<S> {
    fn drop(&mut self) {
        if let Err(e) = self.stop_writing_video() {
            warn!(error = %e, "screencast flush failed on drop");
        }
    }
}
