use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.venue-console.example";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub retry: RetryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Route the client is sent to when the server rejects the session.
    #[serde(default = "default_login_route")]
    pub login_route: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
            login_route: default_login_route(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TokenStoreKind {
    #[default]
    Memory,
    File,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Retention of a "remember me" session.
    #[serde(default = "default_remember_days")]
    pub remember_days: u32,
    /// Retention of a regular session.
    #[serde(default = "default_session_minutes")]
    pub session_minutes: u32,
    #[serde(default)]
    pub store: TokenStoreKind,
    #[serde(default = "default_store_path")]
    pub store_path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            remember_days: default_remember_days(),
            session_minutes: default_session_minutes(),
            store: TokenStoreKind::default(),
            store_path: default_store_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_backoff_base")]
    pub backoff_base_ms: u64,
    #[serde(default = "default_backoff_max")]
    pub backoff_max_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_attempts: default_max_attempts(),
            backoff_base_ms: default_backoff_base(),
            backoff_max_ms: default_backoff_max(),
        }
    }
}

fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_connect_timeout() -> u64 { 5 }
fn default_request_timeout() -> u64 { 30 }
fn default_login_route() -> String { "/".to_string() }
fn default_remember_days() -> u32 { 30 }
fn default_session_minutes() -> u32 { 30 }
fn default_store_path() -> String { "data/session.json".to_string() }
fn default_max_attempts() -> u32 { 3 }
fn default_backoff_base() -> u64 { 200 }
fn default_backoff_max() -> u64 { 2000 }

/// Load from `CONFIG_PATH` (default `config.toml`); a missing file yields defaults.
pub fn load_default() -> Result<ClientConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    match std::fs::read_to_string(&path) {
        Ok(content) => from_toml_str(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ClientConfig::default()),
        Err(e) => Err(anyhow!("cannot read {path}: {e}")),
    }
}

pub fn load_from_file(path: &str) -> Result<ClientConfig> {
    let content = std::fs::read_to_string(path)?;
    from_toml_str(&content)
}

pub fn from_toml_str(content: &str) -> Result<ClientConfig> {
    let cfg: ClientConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl ClientConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.api.normalize_from_env();
        self.api.validate()?;
        self.session.validate()?;
        self.retry.validate()?;
        Ok(())
    }
}

impl ApiConfig {
    /// `VENUE_API_BASE_URL` wins over the file value.
    pub fn normalize_from_env(&mut self) {
        if let Ok(url) = std::env::var("VENUE_API_BASE_URL") {
            if !url.trim().is_empty() {
                self.base_url = url;
            }
        }
        self.normalize();
    }

    pub fn normalize(&mut self) {
        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();
        if self.login_route.trim().is_empty() {
            self.login_route = default_login_route();
        }
    }

    pub fn validate(&self) -> Result<()> {
        let lower = self.base_url.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("api.base_url must start with http:// or https://"));
        }
        if self.connect_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err(anyhow!("api timeouts must be positive seconds"));
        }
        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration { Duration::from_secs(self.connect_timeout_secs) }

    pub fn request_timeout(&self) -> Duration { Duration::from_secs(self.request_timeout_secs) }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.remember_days == 0 || self.session_minutes == 0 {
            return Err(anyhow!("session retention windows must be positive"));
        }
        if self.store == TokenStoreKind::File && self.store_path.trim().is_empty() {
            return Err(anyhow!("session.store_path is required for the file store"));
        }
        Ok(())
    }

    pub fn remember_for(&self) -> Duration {
        Duration::from_secs(u64::from(self.remember_days) * 24 * 60 * 60)
    }

    pub fn session_for(&self) -> Duration {
        Duration::from_secs(u64::from(self.session_minutes) * 60)
    }
}

impl RetryConfig {
    pub fn validate(&self) -> Result<()> {
        if self.enabled && self.max_attempts == 0 {
            return Err(anyhow!("retry.max_attempts must be >= 1 when retry is enabled"));
        }
        if self.backoff_max_ms < self.backoff_base_ms {
            return Err(anyhow!("retry.backoff_max_ms must be >= backoff_base_ms"));
        }
        Ok(())
    }

    pub fn backoff_base(&self) -> Duration { Duration::from_millis(self.backoff_base_ms) }

    pub fn backoff_max(&self) -> Duration { Duration::from_millis(self.backoff_max_ms) }
}
