//! Pixel layout constants and sample depths.
//!
//! Frames are stored in BGR order, the order camera capture APIs hand
//! them out. The channel index constants below are the only place that
//! order is spelled out.

/// Number of channels in a [`Frame`](crate::Frame).
pub const CHANNELS: usize = 3;

/// Index of the blue channel within a pixel.
pub const CHANNEL_BLUE: usize = 0;

/// Index of the green channel within a pixel.
pub const CHANNEL_GREEN: usize = 1;

/// Index of the red channel within a pixel.
pub const CHANNEL_RED: usize = 2;

/// Rec.601 luma coefficient for red.
pub const REC601_LUMA_R: f32 = 0.299;

/// Rec.601 luma coefficient for green.
pub const REC601_LUMA_G: f32 = 0.587;

/// Rec.601 luma coefficient for blue.
pub const REC601_LUMA_B: f32 = 0.114;

/// Rec.601 luma of a BGR pixel, rounded to the nearest level.
///
/// `Y = 0.299*R + 0.587*G + 0.114*B`
///
/// # Example
/// ```
/// use cameo_core::luma_rec601;
/// assert_eq!(luma_rec601([0, 0, 0]), 0);
/// assert_eq!(luma_rec601([255, 255, 255]), 255);
/// ```
#[inline]
pub fn luma_rec601(bgr: [u8; 3]) -> u8 {
    let y = bgr[2] as f32 * REC601_LUMA_R
        + bgr[1] as f32 * REC601_LUMA_G
        + bgr[0] as f32 * REC601_LUMA_B;
    y.round().clamp(0.0, 255.0) as u8
}

/// Integer sample type that can index a lookup table.
///
/// A lookup table for samples of type `T` needs [`Sample::LEVELS`] entries
/// so that every representable value has a slot.
pub trait Sample: Copy + Send + Sync + 'static {
    /// Number of bits per sample.
    const BITS: u32;

    /// Number of representable levels (`2^BITS`).
    const LEVELS: usize;

    /// Table index for this sample.
    fn index(self) -> usize;

    /// Converts a table entry back to a sample, saturating at the max level.
    fn from_level(level: u16) -> Self;
}

impl Sample for u8 {
    const BITS: u32 = 8;
    const LEVELS: usize = 256;

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    #[inline]
    fn from_level(level: u16) -> Self {
        level.min(u8::MAX as u16) as u8
    }
}

impl Sample for u16 {
    const BITS: u32 = 16;
    const LEVELS: usize = 65536;

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    #[inline]
    fn from_level(level: u16) -> Self {
        level
    }
}

/// Channel bit depth, used to size lookup tables at filter construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitDepth {
    /// 8 bits per channel (256 levels).
    #[default]
    U8,
    /// 16 bits per channel (65536 levels).
    U16,
}

impl BitDepth {
    /// Number of representable levels.
    #[inline]
    pub const fn levels(self) -> usize {
        match self {
            Self::U8 => <u8 as Sample>::LEVELS,
            Self::U16 => <u16 as Sample>::LEVELS,
        }
    }

    /// Highest representable level.
    #[inline]
    pub const fn max_level(self) -> usize {
        self.levels() - 1
    }
}
