//! Application configuration
//!
//! Configuration is loaded from `linkgate.toml` (optional) with
//! `LINKGATE__SECTION__KEY` environment overrides, then the flat
//! environment names used by existing deployments (`PASSWORD`,
//! `SESSION_SECRET`, `DOMAINS`, ...) are applied on top.
//!
//! The loaded `AppConfig` is handed to the HTTP server as shared
//! application data; handlers receive it explicitly instead of reading
//! process globals, so they can be tested with an ad-hoc config.

use std::env;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::errors::{LinkgateError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub links: LinkConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// `file`, `memory` or `redis`
    pub backend: String,
    pub file_path: String,
    pub redis_url: String,
    pub redis_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: "file".to_string(),
            file_path: "links.json".to_string(),
            redis_url: "redis://127.0.0.1:6379".to_string(),
            redis_prefix: "linkgate:".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared management password. When unset, the whole API is open.
    pub password: Option<String>,
    /// Optional admin username that `verify` must also match.
    pub admin_username: Option<String>,
    /// HMAC secret for session cookies. When unset with a password
    /// configured, the service runs in legacy header-only mode.
    pub session_secret: Option<String>,
    pub session_secs: u64,
    pub session_remember_secs: u64,
    pub cookie_secure: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            password: None,
            admin_username: None,
            session_secret: None,
            session_secs: 24 * 60 * 60,
            session_remember_secs: 30 * 24 * 60 * 60,
            cookie_secure: false,
        }
    }
}

impl AuthConfig {
    pub fn password_protected(&self) -> bool {
        self.password.as_deref().is_some_and(|p| !p.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Domain allow-list for short links. Empty list means any requested
    /// domain is accepted and `/api/domains` falls back to the request host.
    pub domains: Vec<String>,
    pub random_path_length: usize,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            domains: Vec::new(),
            random_path_length: 6,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `text` or `json`
    pub format: String,
    /// Log file path; empty or unset logs to stdout.
    pub file: Option<String>,
    pub enable_rotation: bool,
    pub max_backups: u32,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
            file: None,
            enable_rotation: true,
            max_backups: 7,
        }
    }
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Priority: flat env names > `LINKGATE__*` env > linkgate.toml > defaults.
    pub fn load() -> Result<Self> {
        let builder = Config::builder()
            .add_source(File::with_name("linkgate").required(false))
            .add_source(
                Environment::with_prefix("LINKGATE")
                    .prefix_separator("__")
                    .separator("__"),
            );

        let mut cfg: AppConfig = builder
            .build()
            .map_err(|e| LinkgateError::config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| LinkgateError::config(e.to_string()))?;

        cfg.apply_flat_env();
        Ok(cfg)
    }

    /// Apply the flat environment names the original deployment used.
    fn apply_flat_env(&mut self) {
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(port) = v.parse()
        {
            self.server.port = port;
        }
        if let Ok(v) = env::var("STORAGE_BACKEND") {
            self.storage.backend = v;
        }
        if let Ok(v) = env::var("LINKS_FILE") {
            self.storage.file_path = v;
        }
        if let Ok(v) = env::var("REDIS_URL") {
            self.storage.redis_url = v;
        }
        if let Ok(v) = env::var("PASSWORD")
            && !v.is_empty()
        {
            self.auth.password = Some(v);
        }
        if let Ok(v) = env::var("ADMIN_USERNAME")
            && !v.is_empty()
        {
            self.auth.admin_username = Some(v);
        }
        if let Ok(v) = env::var("SESSION_SECRET")
            && !v.is_empty()
        {
            self.auth.session_secret = Some(v);
        }
        if let Ok(v) = env::var("SESSION_DURATION_SECS")
            && let Ok(secs) = v.parse()
        {
            self.auth.session_secs = secs;
        }
        if let Ok(v) = env::var("SESSION_REMEMBER_DURATION_SECS")
            && let Ok(secs) = v.parse()
        {
            self.auth.session_remember_secs = secs;
        }
        if let Ok(v) = env::var("COOKIE_SECURE") {
            self.auth.cookie_secure = matches!(v.as_str(), "1" | "true" | "yes");
        }
        if let Ok(v) = env::var("DOMAINS") {
            self.links.domains = parse_domain_list(&v);
        }
    }
}

/// Split a comma-separated domain list, trimming blanks.
pub fn parse_domain_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
