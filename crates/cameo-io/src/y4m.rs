//! YUV4MPEG2 stream encoder.
//!
//! ```text
//! YUV4MPEG2 W640 H480 F30:1 Ip A1:1 C420jpeg\n
//! FRAME\n <Y plane> <Cb plane> <Cr plane>
//! FRAME\n ...
//! ```
//!
//! Colour conversion is BT.601 full range. Chroma is the average of each
//! 2x2 block; odd edges average whatever samples the block has.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use cameo_core::{CHANNEL_BLUE, CHANNEL_GREEN, CHANNEL_RED, Frame};
use tracing::debug;

use crate::sink::VideoEncoder;
use crate::{Codec, IoError, IoResult};

/// Stream signature.
pub const Y4M_MAGIC: &str = "YUV4MPEG2";

/// Frame record marker.
pub const Y4M_FRAME: &[u8] = b"FRAME\n";

/// Converts a frame rate to a reduced `num:den` pair with millihertz precision.
pub fn fps_ratio(fps: f64) -> (u32, u32) {
    let num = (fps * 1000.0).round().max(1.0) as u32;
    let den = 1000u32;
    let g = gcd(num, den);
    (num / g, den / g)
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.max(1)
}

#[inline]
fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// BT.601 full-range YCbCr of a BGR pixel.
#[inline]
pub fn bgr_to_ycbcr(px: [u8; 3]) -> [f32; 3] {
    let b = px[CHANNEL_BLUE] as f32;
    let g = px[CHANNEL_GREEN] as f32;
    let r = px[CHANNEL_RED] as f32;
    [
        0.299 * r + 0.587 * g + 0.114 * b,
        128.0 - 0.168_736 * r - 0.331_264 * g + 0.5 * b,
        128.0 + 0.5 * r - 0.418_688 * g - 0.081_312 * b,
    ]
}

/// Writes frames as an uncompressed 4:2:0 YUV4MPEG2 stream.
#[derive(Debug)]
pub struct Y4mEncoder<W: Write> {
    writer: W,
    width: u32,
    height: u32,
    fps: (u32, u32),
    frames_written: u64,
}

impl Y4mEncoder<BufWriter<File>> {
    /// Creates `path` and writes the stream header.
    pub fn create<P: AsRef<Path>>(
        path: P,
        codec: Codec,
        fps: f64,
        size: (u32, u32),
    ) -> IoResult<Self> {
        let path = path.as_ref();
        let file = File::create(path)?;
        debug!(path = %path.display(), %codec, fps, width = size.0, height = size.1, "opened y4m stream");
        Self::new(BufWriter::new(file), codec, fps, size)
    }
}

impl<W: Write> Y4mEncoder<W> {
    /// Wraps `writer` and writes the stream header.
    ///
    /// # Errors
    ///
    /// [`IoError::InvalidParameter`] for a zero size or a non-positive frame rate.
    pub fn new(mut writer: W, codec: Codec, fps: f64, size: (u32, u32)) -> IoResult<Self> {
        let (width, height) = size;
        if width == 0 || height == 0 {
            return Err(IoError::InvalidParameter(format!(
                "stream size {width}x{height}"
            )));
        }
        if !fps.is_finite() || fps <= 0.0 {
            return Err(IoError::InvalidParameter(format!("stream fps {fps}")));
        }
        let fps = fps_ratio(fps);
        writeln!(
            writer,
            "{Y4M_MAGIC} W{width} H{height} F{}:{} Ip A1:1 {}",
            fps.0,
            fps.1,
            codec.y4m_tag()
        )?;
        Ok(Self {
            writer,
            width,
            height,
            fps,
            frames_written: 0,
        })
    }

    /// Stream size.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Frame rate as `num:den`.
    pub fn fps(&self) -> (u32, u32) {
        self.fps
    }

    /// Consumes the encoder, returning the writer.
    pub fn into_inner(mut self) -> IoResult<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn encode(&mut self, frame: &Frame) -> IoResult<()> {
        if frame.dimensions() != (self.width, self.height) {
            return Err(IoError::dimension_mismatch(
                (self.width, self.height),
                frame.dimensions(),
            ));
        }
        let (w, h) = (self.width as usize, self.height as usize);
        let (cw, ch) = (w.div_ceil(2), h.div_ceil(2));

        let mut luma = Vec::with_capacity(w * h);
        let mut cb_sum = vec![0.0f32; cw * ch];
        let mut cr_sum = vec![0.0f32; cw * ch];
        let mut count = vec![0u8; cw * ch];

        for y in 0..h {
            for x in 0..w {
                let [yy, cb, cr] = bgr_to_ycbcr(frame.pixel(x as u32, y as u32));
                luma.push(to_u8(yy));
                let c = (y / 2) * cw + x / 2;
                cb_sum[c] += cb;
                cr_sum[c] += cr;
                count[c] += 1;
            }
        }

        self.writer.write_all(Y4M_FRAME)?;
        self.writer.write_all(&luma)?;
        let cb: Vec<u8> = cb_sum
            .iter()
            .zip(&count)
            .map(|(s, &n)| to_u8(s / n as f32))
            .collect();
        let cr: Vec<u8> = cr_sum
            .iter()
            .zip(&count)
            .map(|(s, &n)| to_u8(s / n as f32))
            .collect();
        self.writer.write_all(&cb)?;
        self.writer.write_all(&cr)?;
        self.frames_written += 1;
        Ok(())
    }
}

impl<W: Write + Send> VideoEncoder for Y4mEncoder<W> {
    fn write_frame(&mut self, frame: &Frame) -> IoResult<()> {
        self.encode(frame)
    }

    fn frames_written(&self) -> u64 {
        self.frames_written
    }

    fn finish(&mut self) -> IoResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_ratio() {
        assert_eq!(fps_ratio(30.0), (30, 1));
        assert_eq!(fps_ratio(29.97), (2997, 100));
        assert_eq!(fps_ratio(12.5), (25, 2));
    }

    #[test]
    fn test_header_and_frame_layout() {
        let mut enc = Y4mEncoder::new(Vec::new(), Codec::I420, 30.0, (4, 2)).unwrap();
        enc.write_frame(&Frame::filled(4, 2, [0, 0, 0])).unwrap();
        enc.write_frame(&Frame::filled(4, 2, [255, 255, 255])).unwrap();
        assert_eq!(enc.frames_written(), 2);
        let bytes = enc.into_inner().unwrap();

        let header = b"YUV4MPEG2 W4 H2 F30:1 Ip A1:1 C420jpeg\n";
        assert!(bytes.starts_with(header));
        // 8 luma + 2 cb + 2 cr per frame
        let frame_len = Y4M_FRAME.len() + 8 + 2 + 2;
        assert_eq!(bytes.len(), header.len() + 2 * frame_len);

        let first = &bytes[header.len()..header.len() + frame_len];
        assert!(first.starts_with(Y4M_FRAME));
        assert_eq!(&first[6..14], &[0; 8]);
        assert_eq!(&first[14..], &[128; 4]);

        let second = &bytes[header.len() + frame_len..];
        assert_eq!(&second[6..14], &[255; 8]);
        assert_eq!(&second[14..], &[128; 4]);
    }

    #[test]
    fn test_odd_size_chroma() {
        let mut enc = Y4mEncoder::new(Vec::new(), Codec::I420, 15.0, (3, 3)).unwrap();
        enc.write_frame(&Frame::filled(3, 3, [0, 0, 255])).unwrap();
        let bytes = enc.into_inner().unwrap();
        let header_len = bytes.iter().position(|&b| b == b'\n').unwrap() + 1;
        // 9 luma + 4 cb + 4 cr
        assert_eq!(bytes.len(), header_len + Y4M_FRAME.len() + 9 + 4 + 4);
        let body = &bytes[header_len + Y4M_FRAME.len()..];
        assert!(body[..9].iter().all(|&y| y == 76));
        assert!(body[13..].iter().all(|&cr| cr == 255));
    }

    #[test]
    fn test_rejects_wrong_size() {
        let mut enc = Y4mEncoder::new(Vec::new(), Codec::I420, 30.0, (4, 4)).unwrap();
        assert!(matches!(
            enc.write_frame(&Frame::new(2, 2)),
            Err(IoError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_params() {
        assert!(Y4mEncoder::new(Vec::new(), Codec::I420, 0.0, (4, 4)).is_err());
        assert!(Y4mEncoder::new(Vec::new(), Codec::I420, 30.0, (0, 4)).is_err());
    }
}
