use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::request::{RequestOptions, DEFAULT_PER_PAGE};
use crate::types::SearchKind;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub per_page: u8,
    pub timeout_secs: u64,
    pub order: Option<String>,
    /// Sort key per search kind, e.g. `repositories = "stars"`
    pub sort: HashMap<SearchKind, String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            timeout_secs: 15,
            order: None,
            sort: HashMap::new(),
        }
    }
}

impl SearchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// First-page options for a new search of `kind`
    pub fn request_options(&self, kind: SearchKind) -> RequestOptions {
        RequestOptions {
            page: 1,
            per_page: self.per_page,
            sort: self.sort.get(&kind).cloned(),
            order: self.order.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    pub api_url: Option<String>,
    pub token_env: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            token_env: "GITHUB_TOKEN".to_string(),
        }
    }
}

impl GitHubConfig {
    /// Token from the configured environment variable, if set and non-empty
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .filter(|token| !token.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub github: GitHubConfig,
}

pub fn config_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("ghs").join("config.toml"))
}

impl Config {
    /// Load from `path`, or the default location. Missing or unreadable
    /// files fall back to defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match config_path() {
                Some(path) => path,
                None => return Config::default(),
            },
        };

        let Ok(content) = std::fs::read_to_string(&path) else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Config::default();
        };

        match toml::from_str::<Config>(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                Config::default()
            }
        }
    }
}
