//! Optional TOML settings for feed generation.
//!
//! A missing file yields `FeedConfig::default()`. Unknown keys are accepted
//! by serde and logged as a warning, since they are usually typos.
use chrono_tz::Tz;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::date::system_time_zone;
use crate::language::LanguageCodes;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),

    #[error("Unknown time zone '{0}'")]
    InvalidTimeZone(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Feed generation settings.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Spaces per nesting level when rendering. 0 = compact output.
    pub indent: usize,

    /// IANA zone name used for dates, e.g. "Europe/Berlin".
    /// Unset means the system zone.
    pub time_zone: Option<String>,

    /// Language codes accepted in addition to the RSS defaults.
    pub extra_language_codes: Vec<String>,
}

impl FeedConfig {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 3] = ["indent", "time_zone", "extra_language_codes"];

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(FeedConfig::default())`
    /// - Empty file → `Ok(FeedConfig::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)`
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        Self::parse(&content)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: FeedConfig = toml::from_str(content)?;
        tracing::info!(
            indent = config.indent,
            time_zone = ?config.time_zone,
            "Loaded feed configuration"
        );
        Ok(config)
    }

    /// The configured zone, or the system zone when none is set.
    pub fn time_zone(&self) -> Result<Tz, ConfigError> {
        match &self.time_zone {
            Some(name) => name
                .parse()
                .map_err(|_| ConfigError::InvalidTimeZone(name.clone())),
            None => Ok(system_time_zone()),
        }
    }

    /// The RSS default language table extended with `extra_language_codes`.
    pub fn language_codes(&self) -> LanguageCodes {
        LanguageCodes::rss_default().with_extra(&self.extra_language_codes)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FeedConfig::default();
        assert_eq!(config.indent, 0);
        assert!(config.time_zone.is_none());
        assert!(config.extra_language_codes.is_empty());
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/rssgen_test_nonexistent_config.toml");
        let config = FeedConfig::load(path).unwrap();
        assert_eq!(config, FeedConfig::default());
    }

    #[test]
    fn test_empty_file_returns_default() {
        let dir = std::env::temp_dir().join("rssgen_config_test_empty");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "   \n  ").unwrap();

        let config = FeedConfig::load(&path).unwrap();
        assert_eq!(config, FeedConfig::default());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_full_config() {
        let dir = std::env::temp_dir().join("rssgen_config_test_full");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");

        let content = r#"
indent = 2
time_zone = "Australia/Darwin"
extra_language_codes = ["x-pirate"]
"#;
        std::fs::write(&path, content).unwrap();

        let config = FeedConfig::load(&path).unwrap();
        assert_eq!(config.indent, 2);
        assert_eq!(config.time_zone().unwrap(), chrono_tz::Australia::Darwin);
        assert!(config.language_codes().contains("x-pirate"));
        assert!(config.language_codes().contains("en"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let err = FeedConfig::parse("this is not [valid toml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("Invalid TOML"));
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let config = FeedConfig::parse("indent = 4\ntotally_fake_key = 1\n").unwrap();
        assert_eq!(config.indent, 4);
    }

    #[test]
    fn test_wrong_type_returns_error() {
        assert!(FeedConfig::parse("indent = \"wide\"\n").is_err());
    }

    #[test]
    fn test_unknown_time_zone() {
        let config = FeedConfig::parse("time_zone = \"Mars/Olympus_Mons\"\n").unwrap();
        let err = config.time_zone().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeZone(_)));
        assert!(err.to_string().contains("Mars/Olympus_Mons"));
    }

    #[test]
    fn test_too_large_file_rejected() {
        let dir = std::env::temp_dir().join("rssgen_config_test_too_large");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");

        let content = "a".repeat(1_048_577);
        std::fs::write(&path, content).unwrap();

        let err = FeedConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge(_)));
        assert!(err.to_string().contains("too large"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
