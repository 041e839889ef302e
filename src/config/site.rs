//! Site configuration (_config.yml)

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::helpers::{DateFormatter, DEFAULT_PLACEHOLDER};
use crate::i18n::Locale;

/// Environment variable that supplies the API access token
pub const ACCESS_TOKEN_ENV: &str = "HEADLESS_BLOG_ACCESS_TOKEN";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unknown timezone {0:?}")]
    Timezone(String),

    #[error("api.page_size must be between 1 and 100, got {0}")]
    PageSize(u32),
}

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub language: Locale,
    pub timezone: String,
    pub date_placeholder: String,

    // Directory
    pub public_dir: String,
    pub static_dir: String,

    // Content API
    pub api: ApiConfig,

    // Pagination
    pub max_pages: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            description: String::new(),
            language: Locale::En,
            timezone: "UTC".to_string(),
            date_placeholder: DEFAULT_PLACEHOLDER.to_string(),

            public_dir: "public".to_string(),
            static_dir: "static".to_string(),

            api: ApiConfig::default(),

            max_pages: 100,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SiteConfig =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Fill settings that may come from the environment
    pub fn apply_env(&mut self) {
        if self.api.access_token.is_none() {
            if let Ok(token) = std::env::var(ACCESS_TOKEN_ENV) {
                if !token.is_empty() {
                    tracing::debug!("Using access token from {}", ACCESS_TOKEN_ENV);
                    self.api.access_token = Some(token);
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tz()?;
        if !(1..=100).contains(&self.api.page_size) {
            return Err(ConfigError::PageSize(self.api.page_size));
        }
        Ok(())
    }

    /// Display timezone
    pub fn tz(&self) -> Result<Tz, ConfigError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| ConfigError::Timezone(self.timezone.clone()))
    }

    /// Date formatter for this site's locale and timezone
    pub fn date_formatter(&self) -> Result<DateFormatter, ConfigError> {
        Ok(DateFormatter::new(self.language, self.tz()?)
            .with_placeholder(self.date_placeholder.clone()))
    }
}

/// Content API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub endpoint: String,
    pub access_token: Option<String>,
    pub document_type: String,
    pub page_size: u32,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://your-repository.cdn.prismic.io/api/v2".to_string(),
            access_token: None,
            document_type: "posts".to_string(),
            page_size: 2,
            timeout_secs: 10,
        }
    }
}
