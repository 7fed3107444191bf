use crate::error::{LinkError, LinkResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub const CONNECTED: &str = "connected";
pub const DISCONNECTED: &str = "disconnected";

/// Events pushed by the backend over the event channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    Qr { code: String },
    Status { status: String },
}

#[derive(Deserialize)]
struct QrFrame {
    code: String,
}

#[derive(Deserialize)]
struct StatusFrame {
    status: String,
}

impl ServerEvent {
    pub fn parse(text: &str) -> LinkResult<Self> {
        let data: Value = serde_json::from_str(text)?;

        match data.get("type").and_then(|v| v.as_str()) {
            Some("qr") => {
                let frame: QrFrame = serde_json::from_value(data)?;
                Ok(ServerEvent::Qr { code: frame.code })
            }
            Some("status") => {
                let frame: StatusFrame = serde_json::from_value(data)?;
                Ok(ServerEvent::Status {
                    status: frame.status,
                })
            }
            Some(other) => Err(LinkError::UnknownEvent(other.to_string())),
            None => Err(LinkError::UnknownEvent("<missing type>".to_string())),
        }
    }
}

/// Last status token received from the backend. Any string is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus(String);

impl ConnectionStatus {
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_connected(&self) -> bool {
        self.0 == CONNECTED
    }
}

impl Default for ConnectionStatus {
    fn default() -> Self {
        Self(DISCONNECTED.to_string())
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// QR payload for pairing a companion device. Empty means nothing to show.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingCode(String);

impl PairingCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Answer of the backend's status route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendSnapshot {
    pub status: String,
    #[serde(default)]
    pub logged_in: bool,
}
