//! PNG stills.
//!
//! PNG stores RGB; frames are BGR. Channels are swapped on the way in and
//! out. Alpha is dropped, grayscale is expanded to three channels, palette
//! images are expanded and 16-bit images are reduced to 8 bits.
//!
//! # Example
//!
//! ```rust,ignore
//! use cameo_io::png;
//!
//! let frame = png::read_frame("input.png")?;
//! png::write_frame("output.png", &frame)?;
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use cameo_core::{CHANNELS, Frame};
use tracing::debug;

use crate::{IoError, IoResult};

/// Reads a PNG file into a BGR frame.
pub fn read_frame<P: AsRef<Path>>(path: P) -> IoResult<Frame> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
    let samples = &buf[..info.buffer_size()];

    let bgr: Vec<u8> = match info.color_type {
        png::ColorType::Rgb => samples
            .chunks_exact(3)
            .flat_map(|p| [p[2], p[1], p[0]])
            .collect(),
        png::ColorType::Rgba => samples
            .chunks_exact(4)
            .flat_map(|p| [p[2], p[1], p[0]])
            .collect(),
        png::ColorType::Grayscale => samples.iter().flat_map(|&g| [g, g, g]).collect(),
        png::ColorType::GrayscaleAlpha => samples
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0]])
            .collect(),
        other => {
            return Err(IoError::DecodeError(format!(
                "unexpected color type after expansion: {other:?}"
            )));
        }
    };

    debug!(path = %path.display(), width = info.width, height = info.height, "read png");
    Ok(Frame::from_data(info.width, info.height, bgr)?)
}

/// Writes a BGR frame as an 8-bit RGB PNG.
pub fn write_frame<P: AsRef<Path>>(path: P, frame: &Frame) -> IoResult<()> {
    let path = path.as_ref();
    if frame.is_empty() {
        return Err(IoError::EncodeError("cannot encode an empty frame".into()));
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, frame.width(), frame.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());
    encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    let rgb: Vec<u8> = frame
        .data()
        .chunks_exact(CHANNELS)
        .flat_map(|p| [p[2], p[1], p[0]])
        .collect();
    png_writer
        .write_image_data(&rgb)
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    debug!(path = %path.display(), width = frame.width(), height = frame.height(), "wrote png");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_roundtrip_keeps_bgr_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("still.png");

        let mut frame = Frame::new(3, 2);
        frame.set_pixel(0, 0, [255, 0, 0]);
        frame.set_pixel(1, 0, [0, 255, 0]);
        frame.set_pixel(2, 1, [1, 2, 3]);
        write_frame(&path, &frame).unwrap();

        let back = read_frame(&path).unwrap();
        assert_eq!(back, frame);
    }

    #[test]
    fn test_rgb_on_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("red.png");
        write_frame(&path, &Frame::filled(1, 1, [0, 0, 200])).unwrap();

        let decoder = png::Decoder::new(BufReader::new(File::open(&path).unwrap()));
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0u8; reader.output_buffer_size().unwrap()];
        let info = reader.next_frame(&mut buf).unwrap();
        assert_eq!(info.color_type, png::ColorType::Rgb);
        assert_eq!(&buf[..3], &[200, 0, 0]);
    }

    #[test]
    fn test_grayscale_expands() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gray.png");
        {
            let w = BufWriter::new(File::create(&path).unwrap());
            let mut enc = png::Encoder::new(w, 2, 1);
            enc.set_color(png::ColorType::Grayscale);
            enc.set_depth(png::BitDepth::Eight);
            let mut pw = enc.write_header().unwrap();
            pw.write_image_data(&[10, 240]).unwrap();
        }
        let frame = read_frame(&path).unwrap();
        assert_eq!(frame.pixel(0, 0), [10, 10, 10]);
        assert_eq!(frame.pixel(1, 0), [240, 240, 240]);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_frame("/nonexistent/dir/none.png"),
            Err(IoError::Io(_))
        ));
    }
}
