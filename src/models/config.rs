//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Environment variable overriding `api.api_key`.
pub const API_KEY_ENV: &str = "YOUTUBE_API_KEY";

/// Environment variable overriding `api.access_token`.
pub const ACCESS_TOKEN_ENV: &str = "YOUTUBE_ACCESS_TOKEN";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Platform endpoint and credentials
    #[serde(default)]
    pub api: ApiConfig,

    /// Search terms and request budget
    #[serde(default)]
    pub search: SearchConfig,

    /// Marker term and comment templates
    #[serde(default)]
    pub comments: CommentConfig,

    /// Delay between posts
    #[serde(default)]
    pub pacing: PacingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load, apply environment credentials, and validate.
    ///
    /// A missing or unreadable file is an error; built-in defaults are never
    /// used for a run.
    pub fn load_for_run(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = Self::load(path).map_err(|e| {
            AppError::config(format!("cannot load {}: {}", path.display(), e))
        })?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Replace credentials with values from the environment when set.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(API_KEY_ENV).filter(|v| !v.trim().is_empty()) {
            self.api.api_key = key;
        }
        if let Some(token) = lookup(ACCESS_TOKEN_ENV).filter(|v| !v.trim().is_empty()) {
            self.api.access_token = token;
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(AppError::validation("api.base_url is empty"));
        }
        url::Url::parse(&self.api.base_url)?;
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::validation("api.user_agent is empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        if self.search.terms.iter().all(|t| t.trim().is_empty()) {
            return Err(AppError::validation("No search terms defined"));
        }
        if self.search.max_search_count == 0 {
            return Err(AppError::validation("search.max_search_count must be > 0"));
        }
        if self.comments.marker.trim().is_empty() {
            return Err(AppError::validation("comments.marker is empty"));
        }
        if self.comments.templates.is_empty() {
            return Err(AppError::validation("No comment templates defined"));
        }
        if self.pacing.min_delay_ms > self.pacing.max_delay_ms {
            return Err(AppError::validation(
                "pacing.min_delay_ms must be <= pacing.max_delay_ms",
            ));
        }
        Ok(())
    }

    /// Ensure the credentials needed for a run are present.
    ///
    /// Posting needs the bearer token; a dry run only reads.
    pub fn require_credentials(&self, will_post: bool) -> Result<()> {
        if self.api.api_key.trim().is_empty() {
            return Err(AppError::config(format!(
                "api.api_key is not set (or export {API_KEY_ENV})"
            )));
        }
        if will_post && self.api.access_token.trim().is_empty() {
            return Err(AppError::config(format!(
                "api.access_token is not set (or export {ACCESS_TOKEN_ENV})"
            )));
        }
        Ok(())
    }
}

/// Platform endpoint, credentials, and HTTP behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the data API
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// API key used for search and comment listing
    #[serde(default)]
    pub api_key: String,

    /// OAuth bearer token used to create comment threads
    #[serde(default)]
    pub access_token: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            api_key: String::new(),
            access_token: String::new(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Search rotation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Search terms, walked in order
    #[serde(default = "defaults::terms")]
    pub terms: Vec<String>,

    /// Maximum number of search requests per run
    #[serde(default = "defaults::max_search_count")]
    pub max_search_count: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            terms: defaults::terms(),
            max_search_count: defaults::max_search_count(),
        }
    }
}

/// What to do when the marker check itself fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckFailurePolicy {
    /// Treat the video as unmarked and post anyway.
    #[default]
    FailOpen,
    /// Skip the video.
    FailClosed,
}

/// Marker and comment text settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentConfig {
    /// Term that identifies our comments
    #[serde(default = "defaults::marker")]
    pub marker: String,

    /// Comment templates; `{marker}` is substituted
    #[serde(default = "defaults::templates")]
    pub templates: Vec<String>,

    /// Behavior when the marker check request fails
    #[serde(default)]
    pub on_check_failure: CheckFailurePolicy,
}

impl Default for CommentConfig {
    fn default() -> Self {
        Self {
            marker: defaults::marker(),
            templates: defaults::templates(),
            on_check_failure: CheckFailurePolicy::default(),
        }
    }
}

/// Randomized delay applied after every post attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacingConfig {
    #[serde(default = "defaults::min_delay")]
    pub min_delay_ms: u64,

    #[serde(default = "defaults::max_delay")]
    pub max_delay_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: defaults::min_delay(),
            max_delay_ms: defaults::max_delay(),
        }
    }
}

mod defaults {
    // API defaults
    pub fn base_url() -> String {
        "https://www.googleapis.com/youtube/v3".into()
    }
    pub fn user_agent() -> String {
        "ytcommenter/0.1".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Search defaults
    pub fn terms() -> Vec<String> {
        vec!["rust programming".into(), "rust tutorial".into()]
    }
    pub fn max_search_count() -> u32 {
        50
    }

    // Comment defaults
    pub fn marker() -> String {
        "#ytcommenter".into()
    }
    pub fn templates() -> Vec<String> {
        vec![
            "Great video, thanks for sharing! {marker}".into(),
            "Really enjoyed this one. {marker}".into(),
        ]
    }

    // Pacing defaults
    pub fn min_delay() -> u64 {
        3_000
    }
    pub fn max_delay() -> u64 {
        63_000
    }
}
