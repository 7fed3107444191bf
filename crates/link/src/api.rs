use crate::error::{LinkError, LinkResult};
use crate::types::BackendSnapshot;
use reqwest::Client;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Logout,
}

impl Command {
    pub const ALL: [Command; 3] = [Command::Start, Command::Stop, Command::Logout];

    pub fn path(&self) -> &'static str {
        match self {
            Command::Start => "/api/start",
            Command::Stop => "/api/stop",
            Command::Logout => "/api/logout",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Command::Start => "Start",
            Command::Stop => "Stop",
            Command::Logout => "Logout",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Start => f.write_str("start"),
            Command::Stop => f.write_str("stop"),
            Command::Logout => f.write_str("logout"),
        }
    }
}

/// Client for the backend's session control endpoints.
#[derive(Clone)]
pub struct ControlApi {
    http: Client,
    base_url: String,
}

impl ControlApi {
    pub fn new(base_url: &str, request_timeout: Duration) -> LinkResult<Self> {
        let parsed = Url::parse(base_url).map_err(|e| LinkError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(LinkError::InvalidUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }

        let http = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(Duration::from_secs(5))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Posts `command` with an empty body. Only the status class of the
    /// response matters.
    pub async fn send(&self, command: Command) -> LinkResult<()> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, command.path()))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LinkError::Status { command, status });
        }

        info!("{} command accepted ({})", command.label(), status);
        Ok(())
    }

    pub async fn status(&self) -> LinkResult<BackendSnapshot> {
        let response = self
            .http
            .get(format!("{}/api/status", self.base_url))
            .send()
            .await?
            .error_for_status()?;

        let snapshot: BackendSnapshot = response.json().await?;
        debug!("Backend status: {:?}", snapshot);
        Ok(snapshot)
    }
}
