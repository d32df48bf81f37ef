use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Retry parameters for throttled (HTTP 429) requests (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per request (including the first).
    pub max_retries: u32,
    /// Fixed delay in milliseconds between throttled attempts.
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 10,
            delay_ms: 1000,
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_retries,
            delay: Duration::from_millis(self.delay_ms),
        }
    }
}

/// CSS selectors and attribute names describing the host site's comment markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupConfig {
    /// Container carrying the entry id.
    pub entry_selector: String,
    /// Attribute on the entry container holding the numeric entry id.
    pub entry_id_attr: String,
    /// Every comment item, top-level and replies alike.
    pub comment_selector: String,
    /// Attribute on a comment item holding its numeric id.
    pub comment_id_attr: String,
    /// Marker rendered inside an item's first child when the author is blocklisted.
    pub hidden_marker_selector: String,
    /// Element whose inner content is replaced with the fetched comment.
    pub text_selector: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            entry_selector: ".l-entry".to_string(),
            entry_id_attr: "data-content-id".to_string(),
            comment_selector: ".comments__item".to_string(),
            comment_id_attr: "data-id".to_string(),
            hidden_marker_selector: ".comments__item__self--ignored".to_string(),
            text_selector: ".comments__item__text".to_string(),
        }
    }
}

/// Global configuration loaded from `~/.config/revealer/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealerConfig {
    /// API root without the version segment, e.g. `https://api.tjournal.ru`.
    pub api_base: String,
    /// API version; requests go to `{api_base}/v{api_version}/...`.
    pub api_version: String,
    /// Client name sent in the `User-Agent` header as `{app_name}-app/{app_version}`.
    pub app_name: String,
    pub app_version: String,
    /// Page URL patterns the tool agrees to download (`*` matches anything).
    pub match_urls: Vec<String>,
    /// Connect timeout per request, in seconds.
    pub connect_timeout_secs: u64,
    /// Total timeout per request, in seconds.
    pub request_timeout_secs: u64,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
    /// Optional markup overrides; if missing, the host site's defaults are used.
    #[serde(default)]
    pub markup: Option<MarkupConfig>,
}

impl Default for RevealerConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.tjournal.ru".to_string(),
            api_version: "1.8".to_string(),
            app_name: "CommentRevealer".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            match_urls: vec!["https://tjournal.ru/*".to_string()],
            connect_timeout_secs: 15,
            request_timeout_secs: 30,
            retry: None,
            markup: None,
        }
    }
}

impl RevealerConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry.clone().unwrap_or_default().policy()
    }

    pub fn markup(&self) -> MarkupConfig {
        self.markup.clone().unwrap_or_default()
    }

    /// Value of the identifying `User-Agent` header.
    pub fn user_agent(&self) -> String {
        format!("{}-app/{}", self.app_name, self.app_version)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("revealer")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RevealerConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = RevealerConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit path (no file is created).
pub fn load_from(path: &Path) -> Result<RevealerConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: RevealerConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
