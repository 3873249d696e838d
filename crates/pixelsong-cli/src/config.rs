//! Run configuration: sonification settings plus the target resolution.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use pixelsong_core::SonifyConfig;
use serde::{Deserialize, Serialize};

/// Resolution images are resized to before sonification.
pub const DEFAULT_SIZE: u32 = 100;

/// Settings for one `render` run.
///
/// Read from a JSON file; sonification fields sit at the top level next to
/// `width` and `height`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    #[serde(flatten)]
    pub audio: SonifyConfig,
    pub width: u32,
    pub height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            audio: SonifyConfig::default(),
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
        }
    }
}

/// Command-line overrides applied on top of the file (or defaults).
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub sample_rate: Option<u32>,
    pub note_duration: Option<f64>,
    pub size: Option<u32>,
}

impl RenderConfig {
    /// Loads a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads `path` if given, otherwise the defaults, then applies overrides.
    pub fn resolve(path: Option<&str>, overrides: &ConfigOverrides) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(Path::new(p))?,
            None => Self::default(),
        };
        if let Some(rate) = overrides.sample_rate {
            config.audio.sample_rate = rate;
        }
        if let Some(duration) = overrides.note_duration {
            config.audio.note_duration_seconds = duration;
        }
        if let Some(size) = overrides.size {
            config.width = size;
            config.height = size;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            anyhow::bail!(
                "Target resolution must be positive, got {}x{}",
                self.width,
                self.height
            );
        }
        self.audio.validate().context("Invalid audio settings")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.width, 100);
        assert_eq!(config.height, 100);
        assert_eq!(config.audio, SonifyConfig::default());
    }

    #[test]
    fn test_file_with_flattened_fields() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, r#"{ "width": 32, "sample_rate": 22050 }"#).unwrap();

        let config = RenderConfig::from_file(&path).unwrap();
        assert_eq!(config.width, 32);
        assert_eq!(config.height, 100);
        assert_eq!(config.audio.sample_rate, 22050);
        assert_eq!(config.audio.pool_size, 100);
    }

    #[test]
    fn test_overrides_win() {
        let overrides = ConfigOverrides {
            sample_rate: Some(8000),
            note_duration: Some(0.05),
            size: Some(16),
        };
        let config = RenderConfig::resolve(None, &overrides).unwrap();
        assert_eq!(config.width, 16);
        assert_eq!(config.height, 16);
        assert_eq!(config.audio.sample_rate, 8000);
        assert_eq!(config.audio.note_duration_seconds, 0.05);
    }

    #[test]
    fn test_invalid_overrides_rejected() {
        let zero_size = ConfigOverrides {
            size: Some(0),
            ..ConfigOverrides::default()
        };
        assert!(RenderConfig::resolve(None, &zero_size).is_err());

        let zero_rate = ConfigOverrides {
            sample_rate: Some(0),
            ..ConfigOverrides::default()
        };
        assert!(RenderConfig::resolve(None, &zero_rate).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = RenderConfig::resolve(Some("/nonexistent/pixelsong.json"), &ConfigOverrides::default())
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
