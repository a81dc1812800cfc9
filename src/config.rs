//! Engine configuration, loaded from TOML.
//!
//! ```toml
//! max_digits = 16
//! division_scale = 8
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Tunables of the calculator engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Most digits a typed number may have, not counting the point.
    pub max_digits: usize,
    /// Fractional digits kept by division and percent.
    pub division_scale: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_digits: 16,
            division_scale: 8,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`. The file must exist.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Load from the default location, falling back to defaults when there
    /// is no file there.
    pub fn load_default() -> ConfigResult<Self> {
        match default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_digits == 0 {
            return Err(ConfigError::Validation("max_digits must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// `<config dir>/keycalc/config.toml`, if the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("keycalc").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_digits, 16);
        assert_eq!(config.division_scale, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let config = EngineConfig::from_toml("division_scale = 4").unwrap();
        assert_eq!(config.division_scale, 4);
        assert_eq!(config.max_digits, 16);

        let config = EngineConfig::from_toml("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            EngineConfig::from_toml("max_digits = 0"),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_wide_settings_accepted() {
        let config = EngineConfig::from_toml("max_digits = 40\ndivision_scale = 50").unwrap();
        assert_eq!(config.max_digits, 40);
        assert_eq!(config.division_scale, 50);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            EngineConfig::from_toml("max_digits = \"many\""),
            Err(ConfigError::TomlParse(_))
        ));
        assert!(matches!(
            EngineConfig::from_toml("precision = 3"),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::load(Path::new("/nonexistent/keycalc.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/keycalc.toml"));
    }
}
