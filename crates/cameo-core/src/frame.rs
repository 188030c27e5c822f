//! Frame buffers handed between the capture source, filters and sinks.
//!
//! # Memory Layout
//!
//! Frames store pixels in **row-major** order, top-to-bottom, three
//! interleaved 8-bit channels per pixel in BGR order:
//!
//! ```text
//! Memory: [B G R B G R B G R ...]  <- Row 0
//!         [B G R B G R B G R ...]  <- Row 1
//!         ...
//! ```
//!
//! # Usage
//!
//! ```rust
//! use cameo_core::Frame;
//!
//! let mut frame = Frame::new(640, 480);
//! frame.set_pixel(10, 10, [255, 128, 0]);
//! assert_eq!(frame.pixel(10, 10), [255, 128, 0]);
//!
//! // Split into planes, modify, merge back
//! let planes = frame.split();
//! let merged = Frame::merge(&planes).unwrap();
//! assert_eq!(merged, frame);
//! ```

use crate::{CHANNELS, Error, Plane, Result};

/// Owned 3-channel BGR frame.
///
/// A frame is allocated by the frame source for each capture cycle,
/// mutated in place by the filters and then handed to the sinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Frame {
    /// Creates a black frame.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0; width as usize * height as usize * CHANNELS],
            width,
            height,
        }
    }

    /// Creates a frame from existing interleaved BGR data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if data length doesn't match.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cameo_core::Frame;
    ///
    /// let frame = Frame::from_data(2, 1, vec![1, 2, 3, 4, 5, 6]).unwrap();
    /// assert_eq!(frame.pixel(1, 0), [4, 5, 6]);
    /// assert!(Frame::from_data(2, 2, vec![0; 5]).is_err());
    /// ```
    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} elements, got {}", expected, data.len()),
            ));
        }
        Ok(Self { data, width, height })
    }

    /// Creates a frame filled with a single BGR value.
    pub fn filled(width: u32, height: u32, bgr: [u8; 3]) -> Self {
        let pixel_count = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixel_count * CHANNELS);
        for _ in 0..pixel_count {
            data.extend_from_slice(&bgr);
        }
        Self { data, width, height }
    }

    /// Frame width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of channels per pixel (always 3).
    #[inline]
    pub const fn channels(&self) -> usize {
        CHANNELS
    }

    /// Total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if the frame has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Interleaved BGR samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable interleaved BGR samples.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the frame and returns its samples.
    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    fn pixel_offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Returns the BGR pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.pixel_offset(x, y);
        [self.data[offset], self.data[offset + 1], self.data[offset + 2]]
    }

    /// Sets the BGR pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, bgr: [u8; 3]) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.pixel_offset(x, y);
        self.data[offset..offset + CHANNELS].copy_from_slice(&bgr);
    }

    /// Fills the entire frame with one BGR value.
    pub fn fill(&mut self, bgr: [u8; 3]) {
        for chunk in self.data.chunks_exact_mut(CHANNELS) {
            chunk.copy_from_slice(&bgr);
        }
    }

    /// Row `y` as interleaved samples.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        debug_assert!(y < self.height, "row out of bounds");
        let start = y as usize * self.width as usize * CHANNELS;
        &self.data[start..start + self.width as usize * CHANNELS]
    }

    /// Returns `true` when `other` has the same dimensions.
    #[inline]
    pub fn same_shape(&self, other: &Frame) -> bool {
        self.dimensions() == other.dimensions()
    }

    /// Fails with [`Error::DimensionMismatch`] unless `other` has the same dimensions.
    pub fn ensure_same_shape(&self, other: &Frame) -> Result<()> {
        if self.same_shape(other) {
            Ok(())
        } else {
            Err(Error::dimension_mismatch(self.dimensions(), other.dimensions()))
        }
    }

    /// Copies `other`'s samples into this frame, reallocating if the size differs.
    pub fn copy_from(&mut self, other: &Frame) {
        self.width = other.width;
        self.height = other.height;
        self.data.clear();
        self.data.extend_from_slice(&other.data);
    }

    /// Splits the frame into one plane per channel, in channel order.
    pub fn split(&self) -> [Plane; CHANNELS] {
        let n = self.pixel_count();
        let mut planes = [Vec::with_capacity(n), Vec::with_capacity(n), Vec::with_capacity(n)];
        for px in self.data.chunks_exact(CHANNELS) {
            for (plane, &v) in planes.iter_mut().zip(px) {
                plane.push(v);
            }
        }
        planes.map(|data| Plane::from_raw(self.width, self.height, data))
    }

    /// Builds a frame from three equally sized planes, in channel order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelMismatch`] if not exactly three planes are given
    /// and [`Error::DimensionMismatch`] if they differ in size.
    pub fn merge(planes: &[Plane]) -> Result<Self> {
        if planes.len() != CHANNELS {
            return Err(Error::channel_mismatch(CHANNELS, planes.len()));
        }
        let (width, height) = planes[0].dimensions();
        for plane in &planes[1..] {
            if plane.dimensions() != (width, height) {
                return Err(Error::dimension_mismatch((width, height), plane.dimensions()));
            }
        }
        let mut frame = Self::new(width, height);
        frame.merge_into(planes)?;
        Ok(frame)
    }

    /// Writes three planes back into this frame, in channel order.
    ///
    /// # Errors
    ///
    /// Returns an error when the plane count or sizes do not match the frame.
    pub fn merge_into(&mut self, planes: &[Plane]) -> Result<()> {
        if planes.len() != CHANNELS {
            return Err(Error::channel_mismatch(CHANNELS, planes.len()));
        }
        for plane in planes {
            if plane.dimensions() != self.dimensions() {
                return Err(Error::dimension_mismatch(self.dimensions(), plane.dimensions()));
            }
        }
        let (b, g, r) = (planes[0].data(), planes[1].data(), planes[2].data());
        for (i, px) in self.data.chunks_exact_mut(CHANNELS).enumerate() {
            px[0] = b[i];
            px[1] = g[i];
            px[2] = r[i];
        }
        Ok(())
    }

    /// Horizontally mirrored copy, as shown in a selfie-style preview.
    pub fn mirrored(&self) -> Self {
        let mut out = Vec::with_capacity(self.data.len());
        let row_len = self.width as usize * CHANNELS;
        if row_len > 0 {
            for row in self.data.chunks_exact(row_len) {
                for px in row.rchunks_exact(CHANNELS) {
                    out.extend_from_slice(px);
                }
            }
        }
        Self {
            data: out,
            width: self.width,
            height: self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_and_pixel() {
        let frame = Frame::filled(3, 2, [1, 2, 3]);
        assert_eq!(frame.data().len(), 18);
        assert_eq!(frame.pixel(2, 1), [1, 2, 3]);
    }

    #[test]
    fn test_split_merge() {
        let mut frame = Frame::new(2, 2);
        frame.set_pixel(0, 0, [10, 20, 30]);
        frame.set_pixel(1, 1, [40, 50, 60]);

        let planes = frame.split();
        assert_eq!(planes[0].data(), &[10, 0, 0, 40]);
        assert_eq!(planes[2].data(), &[30, 0, 0, 60]);

        let merged = Frame::merge(&planes).unwrap();
        assert_eq!(merged, frame);
    }

    #[test]
    fn test_merge_rejects_mismatch() {
        let planes = [Plane::new(2, 2), Plane::new(2, 2), Plane::new(3, 2)];
        assert!(matches!(
            Frame::merge(&planes),
            Err(Error::DimensionMismatch { .. })
        ));
        assert!(matches!(
            Frame::merge(&planes[..2]),
            Err(Error::ChannelMismatch { expected: 3, got: 2 })
        ));
    }

    #[test]
    fn test_mirrored() {
        let frame = Frame::from_data(3, 1, vec![1, 1, 1, 2, 2, 2, 3, 3, 3]).unwrap();
        let m = frame.mirrored();
        assert_eq!(m.data(), &[3, 3, 3, 2, 2, 2, 1, 1, 1]);
        assert_eq!(m.mirrored(), frame);
    }

    #[test]
    fn test_copy_from_resizes() {
        let mut a = Frame::new(1, 1);
        let b = Frame::filled(4, 3, [9, 8, 7]);
        a.copy_from(&b);
        assert_eq!(a, b);
    }
}
