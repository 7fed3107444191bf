use chrono::{DateTime, Local};
use meow_panel_link::{BackendSnapshot, Command};
use std::fmt;
use std::time::Duration;

pub enum AppAsyncEvent {
    CommandFinished {
        command: Command,
        error: Option<String>,
    },
    BackendStatusLoaded {
        snapshot: Option<BackendSnapshot>,
        error: Option<String>,
    },
}

/// Health of the event channel itself, independent of the backend's
/// status token.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelHealth {
    Offline,
    Connecting,
    Live,
    Reconnecting { attempt: u32, delay: Duration },
}

impl fmt::Display for ChannelHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelHealth::Offline => f.write_str("offline"),
            ChannelHealth::Connecting => f.write_str("connecting"),
            ChannelHealth::Live => f.write_str("live"),
            ChannelHealth::Reconnecting { attempt, delay } => write!(
                f,
                "reconnecting in {:.1}s (attempt {})",
                delay.as_secs_f32(),
                attempt
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Debug,
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct ConsoleLine {
    pub at: DateTime<Local>,
    pub level: ConsoleLevel,
    pub message: String,
}
