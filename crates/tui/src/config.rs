use meow_panel_link::api::DEFAULT_API_BASE;
use meow_panel_link::socket::DEFAULT_WS_URL;
use meow_panel_link::ReconnectPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const WS_URL_ENV: &str = "MEOW_PANEL_WS_URL";
pub const API_URL_ENV: &str = "MEOW_PANEL_API_URL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub reconnect: ReconnectConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ws_url: String,
    pub api_base: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconnectConfig {
    pub base_ms: u64,
    pub max_ms: u64,
    pub jitter_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ws_url: DEFAULT_WS_URL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout_secs: 15,
        }
    }
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        let policy = ReconnectPolicy::default();
        Self {
            base_ms: policy.base.as_millis() as u64,
            max_ms: policy.max.as_millis() as u64,
            jitter_ms: policy.jitter.as_millis() as u64,
        }
    }
}

impl ReconnectConfig {
    pub fn policy(&self) -> ReconnectPolicy {
        ReconnectPolicy {
            base: Duration::from_millis(self.base_ms),
            max: Duration::from_millis(self.max_ms.max(self.base_ms)),
            jitter: Duration::from_millis(self.jitter_ms),
        }
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

impl Config {
    pub fn load(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn load_or_default(path: &PathBuf) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                if path.exists() {
                    tracing::warn!("Ignoring unreadable config {}: {}", path.display(), e);
                }
                Self::default()
            }
        }
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Non-empty values returned by `lookup` replace the configured endpoints.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(WS_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.server.ws_url = url.trim().to_string();
        }
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.server.api_base = url.trim().to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = Config::default();
        assert_eq!(config.server.ws_url, "ws://localhost:8080/ws");
        assert_eq!(config.server.api_base, "http://localhost:8080");
        assert_eq!(config.reconnect.policy(), ReconnectPolicy::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            ws_url = "ws://panel.lan:9000/ws"

            [reconnect]
            jitter_ms = 0
            "#,
        )
        .expect("valid toml");

        assert_eq!(config.server.ws_url, "ws://panel.lan:9000/ws");
        assert_eq!(config.server.api_base, "http://localhost:8080");
        assert_eq!(config.reconnect.base_ms, 1000);
        assert_eq!(config.reconnect.policy().jitter, Duration::ZERO);
    }

    #[test]
    fn env_overrides_replace_endpoints() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            WS_URL_ENV => Some(" ws://10.0.0.2:8080/ws ".to_string()),
            API_URL_ENV => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.server.ws_url, "ws://10.0.0.2:8080/ws");
        assert_eq!(config.server.api_base, "http://localhost:8080");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = PathBuf::from("/nonexistent/meow-panel/config.toml");
        assert_eq!(Config::load_or_default(&path), Config::default());
    }

    #[test]
    fn max_never_drops_below_base() {
        let reconnect = ReconnectConfig {
            base_ms: 5000,
            max_ms: 100,
            jitter_ms: 0,
        };
        assert_eq!(reconnect.policy().max, Duration::from_millis(5000));
    }
}
