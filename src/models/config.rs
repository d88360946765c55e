//! Application configuration structures.
//!
//! Loaded once at startup and passed by reference afterwards.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Category vocabularies
    #[serde(default)]
    pub categories: CategoryConfig,

    /// Bookmark persistence settings
    #[serde(default)]
    pub bookmarks: BookmarkConfig,

    /// CSV export settings
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api.base_url)
            .map_err(|e| AppError::config(format!("api.base_url is invalid: {e}")))?;
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::config("api.user_agent is empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::config("api.timeout_secs must be > 0"));
        }
        if self.categories.dashboard.is_empty() {
            return Err(AppError::config("No dashboard categories defined"));
        }
        if self.categories.dashboard.iter().any(|c| c.trim().is_empty()) {
            return Err(AppError::config("Dashboard category names must not be empty"));
        }
        if self.bookmarks.key.trim().is_empty() {
            return Err(AppError::config("bookmarks.key is empty"));
        }
        Ok(())
    }

    /// Public categories that the dashboard form can never produce.
    ///
    /// The two vocabularies are configured independently; a non-empty
    /// result means the public browser will show categories that stay at
    /// zero unless notices are tagged outside the dashboard.
    pub fn category_mismatch(&self) -> Vec<&str> {
        self.categories
            .public
            .iter()
            .map(|c| c.name.as_str())
            .filter(|name| {
                !self
                    .categories
                    .dashboard
                    .iter()
                    .any(|d| d.eq_ignore_ascii_case(name))
            })
            .collect()
    }
}

/// Backend API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL; notice endpoints live under `{base_url}/notices`
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            timeout_secs: defaults::timeout(),
            user_agent: defaults::user_agent(),
        }
    }
}

/// Category vocabularies for the dashboard form and the public browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Categories the dashboard form accepts
    #[serde(default = "defaults::dashboard_categories")]
    pub dashboard: Vec<String>,

    /// Categories listed by the public notice browser
    #[serde(default = "defaults::public_categories")]
    pub public: Vec<PublicCategory>,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            dashboard: defaults::dashboard_categories(),
            public: defaults::public_categories(),
        }
    }
}

impl CategoryConfig {
    pub fn public_names(&self) -> Vec<String> {
        self.public.iter().map(|c| c.name.clone()).collect()
    }
}

/// A category shown in the public browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicCategory {
    pub name: String,

    /// Display color (CSS hex)
    #[serde(default = "defaults::category_color")]
    pub color: String,
}

/// Bookmark persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarkConfig {
    /// Directory holding the local storage records
    #[serde(default = "defaults::storage_dir")]
    pub storage_dir: PathBuf,

    /// Storage key of the bookmark record
    #[serde(default = "defaults::bookmark_key")]
    pub key: String,
}

impl Default for BookmarkConfig {
    fn default() -> Self {
        Self {
            storage_dir: defaults::storage_dir(),
            key: defaults::bookmark_key(),
        }
    }
}

/// CSV export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory exported files are written to
    #[serde(default = "defaults::output_dir")]
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: defaults::output_dir(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    use super::PublicCategory;

    // API defaults
    pub fn base_url() -> String {
        "http://localhost:5000/api".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; noticeboard/0.1)".into()
    }

    // Category defaults
    pub fn dashboard_categories() -> Vec<String> {
        ["Exam", "Events", "Circulars", "General"]
            .into_iter()
            .map(String::from)
            .collect()
    }
    pub fn category_color() -> String {
        "#dc2626".into()
    }
    pub fn public_categories() -> Vec<PublicCategory> {
        [
            ("General", "#dc2626"),
            ("Events", "#ef4444"),
            ("Academic", "#b91c1c"),
            ("Important", "#991b1b"),
            ("Exam", "#7f1d1d"),
            ("Placements", "#dc2626"),
            ("Sports", "#ef4444"),
            ("Cultural", "#f87171"),
        ]
        .into_iter()
        .map(|(name, color)| PublicCategory {
            name: name.to_string(),
            color: color.to_string(),
        })
        .collect()
    }

    // Storage defaults
    pub fn storage_dir() -> PathBuf {
        PathBuf::from("storage")
    }
    pub fn bookmark_key() -> String {
        "metCollegeBookmarks".into()
    }
    pub fn output_dir() -> PathBuf {
        PathBuf::from(".")
    }
}
