//! Frame sources.
//!
//! A source is polled in two steps, mirroring a capture device: `grab`
//! checks for (and latches) the next frame, `retrieve` hands it out. A
//! source with nothing to offer returns `false` from `grab` and the caller
//! skips that cycle.

use std::path::PathBuf;

use cameo_core::Frame;
use tracing::{debug, trace};

use crate::{IoError, IoResult, png};

/// Producer of fixed-size BGR frames.
pub trait FrameSource: Send {
    /// Latches the next frame. `Ok(false)` means none is available.
    fn grab(&mut self) -> IoResult<bool>;

    /// Takes the latched frame, if any.
    fn retrieve(&mut self) -> Option<Frame>;

    /// Width of every frame.
    fn frame_width(&self) -> u32;

    /// Height of every frame.
    fn frame_height(&self) -> u32;

    /// Nominal frame rate; 0 means unknown.
    fn fps(&self) -> f64;

    /// `true` once the source will never produce another frame.
    fn is_exhausted(&self) -> bool {
        false
    }
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn grab(&mut self) -> IoResult<bool> {
        (**self).grab()
    }

    fn retrieve(&mut self) -> Option<Frame> {
        (**self).retrieve()
    }

    fn frame_width(&self) -> u32 {
        (**self).frame_width()
    }

    fn frame_height(&self) -> u32 {
        (**self).frame_height()
    }

    fn fps(&self) -> f64 {
        (**self).fps()
    }

    fn is_exhausted(&self) -> bool {
        (**self).is_exhausted()
    }
}

/// Ordered list of PNG files played once.
#[derive(Debug)]
pub struct SequenceSource {
    paths: Vec<PathBuf>,
    cursor: usize,
    size: (u32, u32),
    fps: f64,
    latched: Option<Frame>,
    /// First file, decoded by `open` and handed out by the first `grab`.
    first: Option<Frame>,
}

impl SequenceSource {
    /// Opens the sequence; the first file fixes the frame size.
    ///
    /// # Errors
    ///
    /// [`IoError::InvalidParameter`] for an empty list, or any error reading
    /// the first file.
    pub fn open(paths: Vec<PathBuf>, fps: f64) -> IoResult<Self> {
        let first = paths
            .first()
            .ok_or_else(|| IoError::InvalidParameter("empty frame sequence".into()))?;
        let frame = png::read_frame(first)?;
        debug!(count = paths.len(), width = frame.width(), height = frame.height(), fps, "opened sequence");
        Ok(Self {
            size: frame.dimensions(),
            paths,
            cursor: 0,
            fps,
            latched: None,
            first: Some(frame),
        })
    }

    /// Files not yet grabbed.
    pub fn remaining(&self) -> usize {
        self.paths.len() - self.cursor
    }
}

impl FrameSource for SequenceSource {
    fn grab(&mut self) -> IoResult<bool> {
        let Some(path) = self.paths.get(self.cursor) else {
            return Ok(false);
        };
        let frame = match self.first.take() {
            Some(frame) => frame,
            None => png::read_frame(path)?,
        };
        self.cursor += 1;
        if frame.dimensions() != self.size {
            return Err(IoError::dimension_mismatch(self.size, frame.dimensions()));
        }
        trace!(path = %path.display(), "grabbed");
        self.latched = Some(frame);
        Ok(true)
    }

    fn retrieve(&mut self) -> Option<Frame> {
        self.latched.take()
    }

    fn frame_width(&self) -> u32 {
        self.size.0
    }

    fn frame_height(&self) -> u32 {
        self.size.1
    }

    fn fps(&self) -> f64 {
        self.fps
    }

    fn is_exhausted(&self) -> bool {
        self.cursor >= self.paths.len() && self.latched.is_none()
    }
}

/// One frame repeated forever.
#[derive(Debug, Clone)]
pub struct StillSource {
    frame: Frame,
    fps: f64,
    latched: bool,
}

impl StillSource {
    /// Repeats `frame` at `fps` (0 = unknown).
    pub fn new(frame: Frame, fps: f64) -> Self {
        Self {
            frame,
            fps,
            latched: false,
        }
    }
}

impl FrameSource for StillSource {
    fn grab(&mut self) -> IoResult<bool> {
        self.latched = true;
        Ok(true)
    }

    fn retrieve(&mut self) -> Option<Frame> {
        if std::mem::take(&mut self.latched) {
            Some(self.frame.clone())
        } else {
            None
        }
    }

    fn frame_width(&self) -> u32 {
        self.frame.width()
    }

    fn frame_height(&self) -> u32 {
        self.frame.height()
    }

    fn fps(&self) -> f64 {
        self.fps
    }
}

/// Synthetic moving gradient with a bright square, for headless runs.
#[derive(Debug, Clone)]
pub struct PatternSource {
    width: u32,
    height: u32,
    fps: f64,
    index: u64,
    limit: Option<u64>,
    latched: Option<Frame>,
}

impl PatternSource {
    /// Endless pattern.
    ///
    /// # Errors
    ///
    /// [`IoError::InvalidParameter`] for a zero size.
    pub fn new(width: u32, height: u32, fps: f64) -> IoResult<Self> {
        if width == 0 || height == 0 {
            return Err(IoError::InvalidParameter(format!(
                "pattern size {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            fps,
            index: 0,
            limit: None,
            latched: None,
        })
    }

    /// Stops after `limit` frames.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Frame number `t` of the pattern.
    pub fn render(&self, t: u64) -> Frame {
        let (w, h) = (self.width as u64, self.height as u64);
        let mut frame = Frame::new(self.width, self.height);
        let side = (w.min(h) / 4).max(1);
        let sx = (t * 2) % w;
        let sy = h / 2 - (side / 2).min(h / 2);
        for y in 0..h {
            for x in 0..w {
                let inside = x >= sx && x < sx + side && y >= sy && y < sy + side;
                let px = if inside {
                    [240, 240, 240]
                } else {
                    [
                        ((x * 255 / w + t * 3) % 256) as u8,
                        (y * 255 / h) as u8,
                        (((x + y) * 255 / (w + h)) as u8).wrapping_add((t * 5) as u8),
                    ]
                };
                frame.set_pixel(x as u32, y as u32, px);
            }
        }
        frame
    }
}

impl FrameSource for PatternSource {
    fn grab(&mut self) -> IoResult<bool> {
        if self.limit.is_some_and(|limit| self.index >= limit) {
            return Ok(false);
        }
        self.latched = Some(self.render(self.index));
        self.index += 1;
        Ok(true)
    }

    fn retrieve(&mut self) -> Option<Frame> {
        self.latched.take()
    }

    fn frame_width(&self) -> u32 {
        self.width
    }

    fn frame_height(&self) -> u32 {
        self.height
    }

    fn fps(&self) -> f64 {
        self.fps
    }

    fn is_exhausted(&self) -> bool {
        self.latched.is_none() && self.limit.is_some_and(|limit| self.index >= limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sequence_plays_once() {
        let dir = tempdir().unwrap();
        let mut paths = Vec::new();
        for i in 0..3u8 {
            let p = dir.path().join(format!("f{i}.png"));
            png::write_frame(&p, &Frame::filled(4, 3, [i, i, i])).unwrap();
            paths.push(p);
        }
        let mut src = SequenceSource::open(paths, 0.0).unwrap();
        assert_eq!((src.frame_width(), src.frame_height()), (4, 3));
        assert_eq!(src.fps(), 0.0);

        for i in 0..3u8 {
            assert!(src.grab().unwrap());
            assert_eq!(src.retrieve().unwrap().pixel(0, 0), [i, i, i]);
        }
        assert!(src.is_exhausted());
        assert!(!src.grab().unwrap());
        assert!(src.retrieve().is_none());
    }

    #[test]
    fn test_sequence_reuses_first_decode() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("first.png");
        png::write_frame(&first, &Frame::filled(2, 2, [7, 8, 9])).unwrap();
        let mut src = SequenceSource::open(vec![first.clone()], 30.0).unwrap();
        std::fs::remove_file(&first).unwrap();

        assert!(src.grab().unwrap());
        assert_eq!(src.retrieve().unwrap().pixel(1, 1), [7, 8, 9]);
        assert!(src.is_exhausted());
    }

    #[test]
    fn test_sequence_size_change_rejected() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.png");
        let b = dir.path().join("b.png");
        png::write_frame(&a, &Frame::new(4, 4)).unwrap();
        png::write_frame(&b, &Frame::new(2, 2)).unwrap();
        let mut src = SequenceSource::open(vec![a, b], 30.0).unwrap();
        assert!(src.grab().unwrap());
        assert!(matches!(src.grab(), Err(IoError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_empty_sequence() {
        assert!(SequenceSource::open(Vec::new(), 30.0).is_err());
    }

    #[test]
    fn test_still_repeats() {
        let f = Frame::filled(2, 2, [9, 8, 7]);
        let mut src = StillSource::new(f.clone(), 0.0);
        assert!(src.retrieve().is_none());
        for _ in 0..3 {
            assert!(src.grab().unwrap());
            assert_eq!(src.retrieve().unwrap(), f);
        }
        assert!(!src.is_exhausted());
    }

    #[test]
    fn test_pattern_limit_and_motion() {
        let mut src = PatternSource::new(16, 8, 30.0).unwrap().with_limit(2);
        assert!(src.grab().unwrap());
        let a = src.retrieve().unwrap();
        assert!(src.grab().unwrap());
        let b = src.retrieve().unwrap();
        assert_ne!(a, b);
        assert!(src.is_exhausted());
        assert!(!src.grab().unwrap());
    }
}
