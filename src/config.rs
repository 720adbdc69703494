//! Gallery configuration
//!
//! Read from `config.toml` in the user's config directory:
//! - Linux: ~/.config/picsum-gallery/config.toml
//! - macOS: ~/Library/Application Support/picsum-gallery/config.toml
//! - Windows: %APPDATA%\picsum-gallery\config.toml
//!
//! `PICSUM_GALLERY_CONFIG` points at a different file. Every key is
//! optional; a missing file means defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "PICSUM_GALLERY_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid base_url {url:?}: {reason}")]
    BaseUrl { url: String, reason: String },
}

/// User-tunable settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Root of the Lorem Picsum API
    pub base_url: String,
    /// Size requested for grid thumbnails
    pub thumbnail_width: u32,
    pub thumbnail_height: u32,
    /// Longest edge requested for the detail image
    pub detail_max_edge: u32,
    /// How close (px) the end of the grid must be before loading more
    pub scroll_threshold: f32,
    pub request_timeout_secs: u64,
    /// Route shown at startup, e.g. "/photos/237"
    pub start_path: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://picsum.photos".to_string(),
            thumbnail_width: 400,
            thumbnail_height: 300,
            detail_max_edge: 1600,
            scroll_threshold: 300.0,
            request_timeout_secs: 20,
            start_path: "/".to_string(),
        }
    }
}

impl GalleryConfig {
    /// Where the config file is expected
    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }

        let mut path = dirs::config_dir()?;
        path.push("picsum-gallery");
        path.push("config.toml");
        Some(path)
    }

    /// Load the config, falling back to defaults on any problem
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            warn!("Could not determine config directory, using defaults");
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Load from a specific file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config = Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        // Reject a bad base URL now rather than on the first request
        config.api_base_url()?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse TOML text, clamping out-of-range values
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        let config: Self = toml::from_str(text)?;
        Ok(config.sanitized())
    }

    fn sanitized(mut self) -> Self {
        self.thumbnail_width = self.thumbnail_width.max(1);
        self.thumbnail_height = self.thumbnail_height.max(1);
        self.detail_max_edge = self.detail_max_edge.max(1);
        self.request_timeout_secs = self.request_timeout_secs.max(1);
        if !self.scroll_threshold.is_finite() || self.scroll_threshold < 0.0 {
            self.scroll_threshold = 0.0;
        }
        self
    }

    /// The API root as a URL; only http(s) is accepted
    pub fn api_base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|e| ConfigError::BaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::BaseUrl {
                url: self.base_url.clone(),
                reason: format!("unsupported scheme {:?}", other),
            }),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GalleryConfig::default();
        assert_eq!(config.thumbnail_width, 400);
        assert_eq!(config.thumbnail_height, 300);
        assert_eq!(config.scroll_threshold, 300.0);
        assert_eq!(config.api_base_url().unwrap().as_str(), "https://picsum.photos/");
    }

    #[test]
    fn test_partial_file() {
        let config = GalleryConfig::from_toml(
            r#"
            base_url = "http://localhost:9000"
            scroll_threshold = 120.0
            "#,
        )
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.scroll_threshold, 120.0);
        // Untouched keys keep their defaults
        assert_eq!(config.thumbnail_width, 400);
        assert_eq!(config.start_path, "/");
    }

    #[test]
    fn test_out_of_range_values_clamped() {
        let config = GalleryConfig::from_toml(
            r#"
            thumbnail_width = 0
            scroll_threshold = -5.0
            request_timeout_secs = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.thumbnail_width, 1);
        assert_eq!(config.scroll_threshold, 0.0);
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_bad_base_url() {
        let config = GalleryConfig {
            base_url: "ftp://example.com".to_string(),
            ..GalleryConfig::default()
        };
        assert!(matches!(config.api_base_url(), Err(ConfigError::BaseUrl { .. })));

        let config = GalleryConfig {
            base_url: "not a url".to_string(),
            ..GalleryConfig::default()
        };
        assert!(config.api_base_url().is_err());
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = GalleryConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, GalleryConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "start_path = \"/photos/237\"").unwrap();

        let config = GalleryConfig::load_from(file.path()).unwrap();
        assert_eq!(config.start_path, "/photos/237");
    }

    #[test]
    fn test_load_from_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "thumbnail_width = \"wide\"").unwrap();

        let err = GalleryConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
