use super::*;

impl App {
    /// Fires `command` at the control API without waiting for it. The outcome
    /// is only logged; view state changes solely through channel events.
    /// Returns false when the trigger is disabled or no client exists.
    pub fn dispatch_command(&mut self, command: Command) -> bool {
        if !self.is_enabled(command) {
            self.record(
                ConsoleLevel::Debug,
                format!("{} ignored while connected", command.label()),
            );
            return false;
        }

        let Some(api) = self.control_api.clone() else {
            self.record(
                ConsoleLevel::Error,
                format!("Error sending {} command: control API unavailable", command),
            );
            return false;
        };

        self.spawn_app_task(async move {
            let error = api.send(command).await.err().map(|e| e.to_string());
            AppAsyncEvent::CommandFinished { command, error }
        });
        true
    }

    pub fn refresh_backend_status(&mut self) {
        if let Some(api) = self.control_api.clone() {
            self.spawn_app_task(async move {
                match api.status().await {
                    Ok(snapshot) => AppAsyncEvent::BackendStatusLoaded {
                        snapshot: Some(snapshot),
                        error: None,
                    },
                    Err(e) => AppAsyncEvent::BackendStatusLoaded {
                        snapshot: None,
                        error: Some(e.to_string()),
                    },
                }
            });
        }
    }

    pub(super) fn press_focused(&mut self) {
        let command = self.focused_command();
        self.dispatch_command(command);
    }

    pub(super) fn focus_next(&mut self) {
        self.focused_button = (self.focused_button + 1) % Command::ALL.len();
    }

    pub(super) fn focus_previous(&mut self) {
        self.focused_button = (self.focused_button + Command::ALL.len() - 1) % Command::ALL.len();
    }
}

#[cfg(test)]
mod tests {
    use crate::app::{App, ConsoleLevel};
    use crate::Config;
    use meow_panel_link::{ChannelEvent, Command, ControlApi, ServerEvent};
    use std::time::Duration;
    use tokio::net::TcpListener;
    use tokio::time::{sleep, timeout};

    async fn unreachable_base() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);
        format!("http://{}", addr)
    }

    async fn wait_for_console(app: &mut App, needle: &str) {
        timeout(Duration::from_secs(10), async {
            loop {
                app.process_channel_events();
                if app.console.iter().any(|l| l.message.contains(needle)) {
                    break;
                }
                sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("console line before timeout");
    }

    #[tokio::test]
    async fn failed_stop_is_only_logged() {
        let mut app = App::new(Config::default());
        app.control_api = Some(
            ControlApi::new(&unreachable_base().await, Duration::from_secs(2)).expect("client"),
        );
        app.event_tx
            .as_ref()
            .expect("event tx")
            .send(ChannelEvent::Event(ServerEvent::Qr {
                code: "ABC123".to_string(),
            }))
            .expect("send");
        app.process_channel_events();

        assert!(app.dispatch_command(Command::Stop));
        wait_for_console(&mut app, "Error sending stop command").await;

        assert_eq!(app.status.as_str(), "disconnected");
        assert_eq!(app.pairing_code.as_str(), "ABC123");
        assert!(app
            .console
            .iter()
            .any(|l| l.level == ConsoleLevel::Error && l.message.contains("stop")));
    }

    #[tokio::test]
    async fn start_is_not_sent_while_connected() {
        let mut app = App::new(Config::default());
        app.control_api = Some(
            ControlApi::new(&unreachable_base().await, Duration::from_secs(2)).expect("client"),
        );
        app.event_tx
            .as_ref()
            .expect("event tx")
            .send(ChannelEvent::Event(ServerEvent::Status {
                status: "connected".to_string(),
            }))
            .expect("send");
        app.process_channel_events();

        assert!(!app.dispatch_command(Command::Start));
        assert!(app.dispatch_command(Command::Logout));
    }

    #[test]
    fn missing_client_is_logged() {
        let mut app = App::new(Config::default());
        assert!(!app.dispatch_command(Command::Logout));
        assert!(app
            .console
            .iter()
            .any(|l| l.level == ConsoleLevel::Error && l.message.contains("logout")));
    }

    #[test]
    fn focus_wraps_around() {
        let mut app = App::new(Config::default());
        assert_eq!(app.focused_command(), Command::Start);
        app.focus_previous();
        assert_eq!(app.focused_command(), Command::Logout);
        app.focus_next();
        app.focus_next();
        assert_eq!(app.focused_command(), Command::Stop);
    }
}
