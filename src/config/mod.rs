//! Configuration module for dex-gallery
//!
//! Manages gallery settings: catalog location, paging defaults, cache and
//! debounce tuning. Settings are stored as TOML in the user's config
//! directory; a missing file means defaults.

use crate::error::GalleryError;
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default catalog listing endpoint
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2/pokemon";

/// Gallery settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GallerySettings {
    /// Catalog listing endpoint (`GET {base_url}?limit=&offset=`)
    pub base_url: String,

    /// Items per page when the address bar does not say otherwise
    pub page_size: usize,

    /// Upper bound on the number of pages offered
    pub max_pages: usize,

    /// Number of entries fetched once for local search
    pub listing_cap: usize,

    /// Quiet period after the last keystroke before a search is dispatched
    pub debounce_ms: u64,

    /// Per-request timeout
    pub request_timeout_secs: u64,

    /// Image shown for entries without a sprite
    pub placeholder_image: String,

    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: 5,
            max_pages: 120,
            listing_cap: 1000,
            debounce_ms: 300,
            request_timeout_secs: 10,
            placeholder_image: "placeholder.png".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl GallerySettings {
    /// Get the path to the settings file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("dex-gallery").join("config.toml"))
    }

    /// Load settings from the default location, falling back to defaults
    ///
    /// # Errors
    ///
    /// Returns `GalleryError::Settings` if the file exists but cannot be parsed,
    /// or `GalleryError::Config` if it parses to invalid values.
    pub fn load() -> Result<Self, GalleryError> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load settings from a specific TOML file
    ///
    /// Keys missing from the file take their default values.
    ///
    /// # Errors
    ///
    /// Returns `GalleryError::Settings` if the file cannot be read or parsed,
    /// or `GalleryError::Config` if it parses to invalid values.
    pub fn load_from(path: &Path) -> Result<Self, GalleryError> {
        let settings: Self = Config::builder()
            .add_source(File::from(path.to_path_buf()).format(FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created, the settings
    /// cannot be serialized, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save settings to a specific file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created, the settings
    /// cannot be serialized, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize settings: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write settings file: {e}")))?;

        Ok(())
    }

    /// Check that every numeric setting is usable
    ///
    /// # Errors
    ///
    /// Returns `GalleryError::Config` naming the first invalid setting.
    pub fn validate(&self) -> Result<(), GalleryError> {
        let checks = [
            ("page_size", self.page_size as u64),
            ("max_pages", self.max_pages as u64),
            ("listing_cap", self.listing_cap as u64),
            ("request_timeout_secs", self.request_timeout_secs),
        ];

        match checks.iter().find(|(_, value)| *value == 0) {
            Some((name, _)) => Err(GalleryError::Config(format!("{name} must be greater than zero"))),
            None => Ok(()),
        }
    }

    /// Debounce quiet period
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Per-request timeout
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = GallerySettings::default();
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.page_size, 5);
        assert_eq!(settings.max_pages, 120);
        assert_eq!(settings.listing_cap, 1000);
        assert_eq!(settings.debounce(), Duration::from_millis(300));
        assert_eq!(settings.request_timeout(), Duration::from_secs(10));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let settings = GallerySettings {
            page_size: 10,
            debounce_ms: 250,
            ..GallerySettings::default()
        };
        settings.save_to(&path).unwrap();

        let loaded = GallerySettings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "page_size = 10\nmax_pages = 50\n").unwrap();

        let loaded = GallerySettings::load_from(&path).unwrap();
        assert_eq!(loaded.page_size, 10);
        assert_eq!(loaded.max_pages, 50);
        assert_eq!(loaded.listing_cap, 1000);
        assert_eq!(loaded.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_zero_page_size_rejected_on_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "page_size = 0\n").unwrap();

        let result = GallerySettings::load_from(&path);
        assert!(matches!(result, Err(GalleryError::Config(msg)) if msg.contains("page_size")));
    }

    #[test]
    fn test_malformed_file_is_settings_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "page_size = \"many\"\n").unwrap();

        let result = GallerySettings::load_from(&path);
        assert!(matches!(result, Err(GalleryError::Settings(_))));
    }

    #[test]
    fn test_validate_reports_first_invalid_field() {
        let settings = GallerySettings {
            max_pages: 0,
            request_timeout_secs: 0,
            ..GallerySettings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("max_pages"));
    }
}
