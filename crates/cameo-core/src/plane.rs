//! Single-channel 8-bit buffers.
//!
//! A [`Plane`] holds one channel split out of a [`Frame`](crate::Frame), or a
//! derived single-channel map such as a grayscale image or an edge map.

use crate::{Error, Result};

/// Owned single-channel buffer in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Plane {
    /// Creates a zero-filled plane.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Creates a plane filled with `value`.
    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        Self {
            data: vec![value; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Wraps existing samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len() != width * height`.
    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} elements, got {}", expected, data.len()),
            ));
        }
        Ok(Self { data, width, height })
    }

    /// Wraps samples whose length is already known to match.
    #[inline]
    pub(crate) fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize);
        Self { data, width, height }
    }

    /// Plane width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Plane height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw samples.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the plane and returns its samples.
    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Sample at (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        debug_assert!(x < self.width && y < self.height, "sample out of bounds");
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Sets the sample at (x, y).
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: u8) {
        debug_assert!(x < self.width && y < self.height, "sample out of bounds");
        self.data[y as usize * self.width as usize + x as usize] = value;
    }
}
