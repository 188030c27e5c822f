//! CLI command implementations

pub mod apply;
pub mod list;
pub mod run;

use anyhow::{Context, Result, bail};
use cameo_core::Frame;
use std::path::Path;

/// Load frame from path
pub fn load_frame(path: &Path) -> Result<Frame> {
    cameo_io::png::read_frame(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save frame to path
pub fn save_frame(path: &Path, frame: &Frame) -> Result<()> {
    cameo_io::png::write_frame(path, frame)
        .with_context(|| format!("Failed to save: {}", path.display()))
}

/// Parse a `WIDTHxHEIGHT` size.
pub fn parse_size(s: &str) -> Result<(u32, u32)> {
    let Some((w, h)) = s.split_once(['x', 'X']) else {
        bail!("Invalid size '{}', expected WIDTHxHEIGHT", s);
    };
    let w: u32 = w.trim().parse().with_context(|| format!("Invalid width in '{}'", s))?;
    let h: u32 = h.trim().parse().with_context(|| format!("Invalid height in '{}'", s))?;
    if w == 0 || h == 0 {
        bail!("Size must be non-zero: {}", s);
    }
    Ok((w, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("640x480").unwrap(), (640, 480));
        assert_eq!(parse_size("8X6").unwrap(), (8, 6));
        assert!(parse_size("640").is_err());
        assert!(parse_size("0x10").is_err());
        assert!(parse_size("axb").is_err());
    }
}
