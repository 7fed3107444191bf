use crate::keybinds::Keybinds;
use crate::ui::layout::LayoutState;
use crate::ui::panel::PanelType;
use crate::ui::qr::QrView;
use crate::Config;
use anyhow::Result;
use chrono::Local;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use meow_panel_link::{
    BackendSnapshot, ChannelEvent, ChannelHandle, Command, ConnectionStatus, ControlApi,
    EventChannelClient, PairingCode, ServerEvent,
};
use ratatui::layout::Rect;
use ratatui::Frame;
use std::collections::VecDeque;
use std::future::Future;
use tokio::sync::mpsc;

mod actions;
mod effects;
mod input;
mod render;
mod state;
mod types;

pub use state::App;
pub use types::{AppAsyncEvent, ChannelHealth, ConsoleLevel, ConsoleLine};

const CONSOLE_CAPACITY: usize = 200;

impl App {
    /// Central log sink: every line goes to `tracing` and to the in-app
    /// developer console. Nothing recorded here reaches the main view.
    pub(super) fn record(&mut self, level: ConsoleLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            ConsoleLevel::Debug => tracing::debug!("{message}"),
            ConsoleLevel::Info => tracing::info!("{message}"),
            ConsoleLevel::Error => tracing::error!("{message}"),
        }

        self.console.push_back(ConsoleLine {
            at: Local::now(),
            level,
            message,
        });
        while self.console.len() > CONSOLE_CAPACITY {
            self.console.pop_front();
        }
    }

    pub(super) fn spawn_app_task<F>(&self, future: F)
    where
        F: Future<Output = AppAsyncEvent> + Send + 'static,
    {
        if let Some(tx) = self.app_async_tx.clone() {
            tokio::spawn(async move {
                let event = future.await;
                let _ = tx.send(event);
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{App, ChannelHealth, ConsoleLevel};
    use crate::Config;
    use meow_panel_link::{ChannelEvent, Command, ServerEvent};
    use std::time::Duration;

    fn status(value: &str) -> ChannelEvent {
        ChannelEvent::Event(ServerEvent::Status {
            status: value.to_string(),
        })
    }

    fn qr(code: &str) -> ChannelEvent {
        ChannelEvent::Event(ServerEvent::Qr {
            code: code.to_string(),
        })
    }

    fn deliver(app: &mut App, events: Vec<ChannelEvent>) {
        let tx = app.event_tx.as_ref().expect("event tx").clone();
        for event in events {
            tx.send(event).expect("send event");
        }
        app.process_channel_events();
    }

    #[test]
    fn connected_status_disables_start() {
        let mut app = App::new(Config::default());
        assert!(app.is_enabled(Command::Start));

        deliver(&mut app, vec![status("connected")]);

        assert_eq!(app.status.as_str(), "connected");
        assert!(!app.is_enabled(Command::Start));
        assert!(app.is_enabled(Command::Stop));
        assert!(app.is_enabled(Command::Logout));
    }

    #[test]
    fn latest_status_wins() {
        let mut app = App::new(Config::default());
        deliver(
            &mut app,
            vec![status("connected"), status("logged_out"), status("disconnected")],
        );
        assert_eq!(app.status.as_str(), "disconnected");
        assert!(app.is_enabled(Command::Start));
    }

    #[test]
    fn qr_code_survives_status_changes() {
        let mut app = App::new(Config::default());
        deliver(&mut app, vec![qr("ABC123"), status("connected")]);

        assert_eq!(app.pairing_code.as_str(), "ABC123");
        assert!(app.qr_view.is_some());

        deliver(&mut app, vec![status("disconnected")]);
        assert_eq!(app.pairing_code.as_str(), "ABC123");

        deliver(&mut app, vec![qr("XYZ789")]);
        assert_eq!(app.pairing_code.as_str(), "XYZ789");
    }

    #[test]
    fn rejected_frames_leave_state_untouched() {
        let mut app = App::new(Config::default());
        deliver(&mut app, vec![qr("ABC123"), status("connected")]);
        let errors_before = app
            .console
            .iter()
            .filter(|l| l.level == ConsoleLevel::Error)
            .count();

        deliver(
            &mut app,
            vec![ChannelEvent::Rejected {
                reason: "Malformed event: expected value at line 1 column 1".to_string(),
            }],
        );

        assert_eq!(app.pairing_code.as_str(), "ABC123");
        assert_eq!(app.status.as_str(), "connected");
        let errors_after = app
            .console
            .iter()
            .filter(|l| l.level == ConsoleLevel::Error)
            .count();
        assert_eq!(errors_after, errors_before + 1);
    }

    #[test]
    fn channel_health_tracks_socket_lifecycle_only() {
        let mut app = App::new(Config::default());
        deliver(&mut app, vec![ChannelEvent::Opened, status("connected")]);
        assert_eq!(app.channel_health, ChannelHealth::Live);

        deliver(
            &mut app,
            vec![
                ChannelEvent::Error("connection reset".to_string()),
                ChannelEvent::Closed,
                ChannelEvent::Reconnecting {
                    attempt: 1,
                    delay: Duration::from_millis(1000),
                },
            ],
        );
        assert_eq!(
            app.channel_health,
            ChannelHealth::Reconnecting {
                attempt: 1,
                delay: Duration::from_millis(1000)
            }
        );
        // The status token only changes through status events.
        assert_eq!(app.status.as_str(), "connected");
    }

    #[test]
    fn console_is_bounded() {
        let mut app = App::new(Config::default());
        for i in 0..250 {
            app.record(ConsoleLevel::Info, format!("line {i}"));
        }
        assert_eq!(app.console.len(), 200);
        assert_eq!(
            app.console.front().map(|l| l.message.as_str()),
            Some("line 50")
        );
    }
}
