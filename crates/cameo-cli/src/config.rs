//! Session configuration.
//!
//! Every field has a default, so a YAML file only needs the keys it changes:
//!
//! ```yaml
//! initial_filter: velvia
//! mirror_preview: false
//! screencast_path: takes/cast.y4m
//! ```

use std::path::{Path, PathBuf};

use cameo_io::Codec;
use cameo_ops::FilterId;
use cameo_ops::stroke::{DEFAULT_BLUR_KSIZE, DEFAULT_EDGE_KSIZE};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Frames to wait for an fps estimate when the source reports none.
pub const DEFAULT_FPS_WARMUP_FRAMES: u64 = 20;

/// Errors loading or interpreting a [`SessionConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("cannot read config {path}: {source}")]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid YAML for this schema.
    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A field holds a value that does not name anything known.
    #[error("invalid value for {field}: {value}")]
    InvalidValue {
        /// Offending field.
        field: &'static str,
        /// Value as written.
        value: String,
    },
}

/// Tunables of a capture session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Filter active when the session starts.
    pub initial_filter: String,
    /// Median blur size of the edge stroke pass.
    pub blur_ksize: usize,
    /// Laplacian size of the edge stroke pass.
    pub edge_ksize: usize,
    /// Show a horizontally mirrored preview.
    pub mirror_preview: bool,
    /// Target of the screenshot key.
    pub screenshot_path: PathBuf,
    /// Target of the recording toggle.
    pub screencast_path: PathBuf,
    /// Screencast codec FourCC.
    pub codec: String,
    /// Frames to wait before trusting the fps estimate.
    pub fps_warmup_frames: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_filter: FilterId::default().name().to_string(),
            blur_ksize: DEFAULT_BLUR_KSIZE,
            edge_ksize: DEFAULT_EDGE_KSIZE,
            mirror_preview: true,
            screenshot_path: PathBuf::from("screenshot.png"),
            screencast_path: PathBuf::from("screencast.y4m"),
            codec: Codec::default().to_string(),
            fps_warmup_frames: DEFAULT_FPS_WARMUP_FRAMES,
        }
    }
}

impl SessionConfig {
    /// Loads a YAML config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&text)?;
        debug!(path = %path.display(), ?config, "loaded session config");
        Ok(config)
    }

    /// Parses a YAML document.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Serializes to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// The initial filter as an identifier.
    pub fn initial_filter(&self) -> Result<FilterId, ConfigError> {
        self.initial_filter
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                field: "initial_filter",
                value: self.initial_filter.clone(),
            })
    }

    /// The screencast codec.
    pub fn codec(&self) -> Result<Codec, ConfigError> {
        self.codec.parse().map_err(|_| ConfigError::InvalidValue {
            field: "codec",
            value: self.codec.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let c = SessionConfig::default();
        assert_eq!(c.initial_filter().unwrap(), FilterId::Portra);
        assert_eq!((c.blur_ksize, c.edge_ksize), (7, 5));
        assert!(c.mirror_preview);
        assert_eq!(c.codec().unwrap(), Codec::I420);
        assert_eq!(c.fps_warmup_frames, 20);
        assert_eq!(c.screenshot_path, PathBuf::from("screenshot.png"));
    }

    #[test]
    fn test_partial_yaml() {
        let c = SessionConfig::from_yaml("initial_filter: emboss\nmirror_preview: false\n").unwrap();
        assert_eq!(c.initial_filter().unwrap(), FilterId::Emboss);
        assert!(!c.mirror_preview);
        assert_eq!(c.blur_ksize, 7);
    }

    #[test]
    fn test_yaml_roundtrip_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.yaml");
        let mut c = SessionConfig::default();
        c.edge_ksize = 3;
        c.screencast_path = PathBuf::from("out/cast.y4m");
        std::fs::write(&path, c.to_yaml().unwrap()).unwrap();
        assert_eq!(SessionConfig::load(&path).unwrap(), c);
    }

    #[test]
    fn test_bad_values() {
        let c = SessionConfig::from_yaml("initial_filter: sepia\ncodec: MJPG\n").unwrap();
        assert!(matches!(
            c.initial_filter(),
            Err(ConfigError::InvalidValue { field: "initial_filter", .. })
        ));
        assert!(c.codec().is_err());
        assert!(SessionConfig::from_yaml("blur_ksize: [1, 2]").is_err());
        assert!(matches!(
            SessionConfig::load("/nonexistent/session.yaml"),
            Err(ConfigError::Read { .. })
        ));
    }
}
