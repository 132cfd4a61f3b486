//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use std::path::Path;

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    /// Parsed settings
    pub schema: ConfigSchema,
    /// File the settings came from, if any
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    ///
    /// An explicit path must exist; otherwise the standard locations are
    /// searched and defaults are used when none is present.
    pub fn load(path: Option<&str>) -> Result<Self> {
        if let Some(p) = path {
            if !Path::new(p).exists() {
                return Err(Error::config_not_found(p));
            }
        }

        let config_path = path.map(String::from).or_else(find_config_file);

        let schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        schema
            .validate()
            .context(format!("In {}", config_path.as_deref().unwrap_or("built-in defaults")))?;

        Ok(Self {
            schema,
            path: config_path,
        })
    }
}

impl Default for Config {
    /// Defaults only (no file)
    fn default() -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
        }
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<String> {
    let candidates = [".marsgeo.toml", "marsgeo.toml", ".config/marsgeo.toml"];

    for candidate in candidates {
        if Path::new(candidate).exists() {
            return Some(candidate.to_string());
        }
    }

    None
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &str) -> Result<ConfigSchema> {
    let read = || -> Result<ConfigSchema> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    };
    read().context(format!("Loading {}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.path.is_none());
        assert_eq!(config.schema.fence.zoom, 13);
    }

    #[test]
    fn test_config_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[position_view]\nzoom = 17\n\n[display]\nlocale = \"zh-CN\"").unwrap();

        let config = Config::load(file.path().to_str()).unwrap();
        assert_eq!(config.schema.position_view.zoom, 17);
        assert_eq!(config.schema.display.locale, "zh-CN");
        assert_eq!(config.schema.fence.fallback_latitude, 39.9042);
    }

    #[test]
    fn test_config_load_missing_explicit_file() {
        let err = Config::load(Some("/nonexistent/marsgeo.toml")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_config_load_invalid_value() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[fence]\nzoom = 42").unwrap();

        let err = Config::load(file.path().to_str()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidConfigValue);
        assert!(err.context.is_some());
    }

    #[test]
    fn test_config_load_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[fence\nzoom = ").unwrap();

        let err = Config::load(file.path().to_str()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
        assert!(err.context.as_deref().is_some_and(|c| c.starts_with("Loading")));
        assert!(err.source.is_some());
    }

    #[test]
    fn test_config_load_unreadable_path() {
        let dir = tempfile::tempdir().unwrap();

        let err = Config::load(dir.path().to_str()).unwrap_err();
        assert_eq!(err.code, ErrorCode::IoError);
    }
}
