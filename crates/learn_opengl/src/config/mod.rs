//! Configuration system
//!
//! Serde-backed settings that can live in `.toml` or `.ron` files next to the
//! section binaries.

use std::path::Path;

pub use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        Self::parse(path, &contents)
    }

    /// Parse configuration text, picking the format from the path extension
    fn parse(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Some("ron") => ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Load configuration from file, or the defaults when the file is absent
    fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            log::info!("Loading configuration from {}", path.display());
            Self::load_from_file(path)
        } else {
            log::debug!("No configuration at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?,
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value is out of its allowed range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Window and GL context settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Window width in screen coordinates
    pub width: u32,
    /// Window height in screen coordinates
    pub height: u32,
    /// Window title
    pub title: String,
    /// Requested context version as (major, minor)
    pub gl_version: (u32, u32),
    /// Request a debug context and install the debug-output callback
    pub debug_context: bool,
    /// Sync buffer swaps to the display refresh
    pub vsync: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "LearnOpenGL".to_string(),
            gl_version: (4, 0),
            debug_context: true,
            vsync: true,
        }
    }
}

impl ContextConfig {
    /// Create a configuration with the given window size and title
    pub fn new(width: u32, height: u32, title: impl Into<String>) -> Self {
        Self {
            width,
            height,
            title: title.into(),
            ..Self::default()
        }
    }

    /// Width divided by height
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.gl_version.0 < 3 || (self.gl_version.0 == 3 && self.gl_version.1 < 3) {
            return Err(ConfigError::Invalid(format!(
                "core profile needs GL 3.3 or newer, got {}.{}",
                self.gl_version.0, self.gl_version.1
            )));
        }
        Ok(())
    }
}

impl Config for ContextConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ContextConfig::parse(Path::new("window.toml"), "width = 1280\nheight = 740\n").unwrap();
        assert_eq!(config.width, 1280);
        assert_eq!(config.height, 740);
        assert_eq!(config.title, "LearnOpenGL");
        assert_eq!(config.gl_version, (4, 0));
    }

    #[test]
    fn test_ron_is_accepted() {
        let config = ContextConfig::parse(Path::new("window.ron"), "(title: \"Blur\", vsync: false)").unwrap();
        assert_eq!(config.title, "Blur");
        assert!(!config.vsync);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let err = ContextConfig::parse(Path::new("window.ini"), "").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_validate_rejects_legacy_versions() {
        let mut config = ContextConfig::default();
        assert!(config.validate().is_ok());
        config.gl_version = (3, 2);
        assert!(config.validate().is_err());
        config.gl_version = (3, 3);
        config.height = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = ContextConfig::load_or_default("definitely/not/here.toml").unwrap();
        assert_eq!(config, ContextConfig::default());
    }
}
