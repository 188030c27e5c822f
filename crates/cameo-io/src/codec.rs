//! Video codecs by FourCC.

use std::fmt;
use std::str::FromStr;

use crate::IoError;

/// Supported stream codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Codec {
    /// Planar YUV 4:2:0, 8 bits per sample.
    #[default]
    I420,
}

impl Codec {
    /// Four-character code.
    pub const fn fourcc(self) -> [u8; 4] {
        match self {
            Self::I420 => *b"I420",
        }
    }

    /// YUV4MPEG2 colorspace tag.
    pub const fn y4m_tag(self) -> &'static str {
        match self {
            Self::I420 => "C420jpeg",
        }
    }

    /// Parses a raw FourCC.
    pub fn from_fourcc(code: [u8; 4]) -> Result<Self, IoError> {
        match &code {
            b"I420" | b"IYUV" => Ok(Self::I420),
            other => Err(IoError::UnsupportedCodec(
                String::from_utf8_lossy(other).into_owned(),
            )),
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::I420 => "I420",
        })
    }
}

impl FromStr for Codec {
    type Err = IoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        if upper == "YUV420" {
            return Ok(Self::I420);
        }
        let bytes: [u8; 4] = upper
            .as_bytes()
            .try_into()
            .map_err(|_| IoError::UnsupportedCodec(s.to_string()))?;
        Self::from_fourcc(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("I420".parse::<Codec>().unwrap(), Codec::I420);
        assert_eq!("iyuv".parse::<Codec>().unwrap(), Codec::I420);
        assert_eq!("yuv420".parse::<Codec>().unwrap(), Codec::I420);
        assert!("XVID".parse::<Codec>().is_err());
        assert!("toolong".parse::<Codec>().is_err());
    }

    #[test]
    fn test_fourcc() {
        assert_eq!(&Codec::I420.fourcc(), b"I420");
        assert_eq!(Codec::I420.to_string(), "I420");
    }
}
