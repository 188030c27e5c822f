//! Frame sinks and video encoders.

use std::path::{Path, PathBuf};

use cameo_core::Frame;
use tracing::trace;

use crate::{Codec, IoResult, Y4mEncoder, png};

/// Accepts frames for display.
pub trait FrameSink: Send {
    /// Presents one frame.
    fn show(&mut self, frame: &Frame) -> IoResult<()>;
}

impl<S: FrameSink + ?Sized> FrameSink for Box<S> {
    fn show(&mut self, frame: &Frame) -> IoResult<()> {
        (**self).show(frame)
    }
}

/// Append-only video stream of fixed size.
pub trait VideoEncoder: Send {
    /// Appends one frame.
    fn write_frame(&mut self, frame: &Frame) -> IoResult<()>;

    /// Frames appended so far.
    fn frames_written(&self) -> u64;

    /// Flushes buffered output.
    fn finish(&mut self) -> IoResult<()>;
}

/// Opens an encoder for `codec` at `path`.
pub fn open_video(
    path: &Path,
    codec: Codec,
    fps: f64,
    size: (u32, u32),
) -> IoResult<Box<dyn VideoEncoder>> {
    match codec {
        Codec::I420 => Ok(Box::new(Y4mEncoder::create(path, codec, fps, size)?)),
    }
}

/// Discards frames, counting them.
#[derive(Debug, Default)]
pub struct NullSink {
    shown: u64,
}

impl NullSink {
    /// New sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames shown so far.
    pub fn shown(&self) -> u64 {
        self.shown
    }
}

impl FrameSink for NullSink {
    fn show(&mut self, _frame: &Frame) -> IoResult<()> {
        self.shown += 1;
        Ok(())
    }
}

/// Writes every shown frame as a numbered PNG.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    prefix: String,
    next: u64,
}

impl PngSequenceSink {
    /// Writes `<dir>/<prefix>_00000.png`, `<prefix>_00001.png`, ...
    ///
    /// The directory is created if missing.
    pub fn new<P: AsRef<Path>>(dir: P, prefix: impl Into<String>) -> IoResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            prefix: prefix.into(),
            next: 0,
        })
    }

    /// Path the next frame will be written to.
    pub fn next_path(&self) -> PathBuf {
        self.dir.join(format!("{}_{:05}.png", self.prefix, self.next))
    }

    /// Frames written so far.
    pub fn written(&self) -> u64 {
        self.next
    }
}

impl FrameSink for PngSequenceSink {
    fn show(&mut self, frame: &Frame) -> IoResult<()> {
        let path = self.next_path();
        png::write_frame(&path, frame)?;
        trace!(path = %path.display(), "preview frame");
        self.next += 1;
        Ok(())
    }
}

/// Keeps copies of shown frames in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    frames: Vec<Frame>,
}

impl MemorySink {
    /// New empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames shown so far.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }
}

impl FrameSink for MemorySink {
    fn show(&mut self, frame: &Frame) -> IoResult<()> {
        self.frames.push(frame.clone());
        Ok(())
    }
}
