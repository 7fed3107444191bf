use super::*;

impl App {
    /// Builds the control API client, opens the event channel and asks the
    /// backend for its current state. Must run inside a tokio runtime.
    pub fn init(&mut self) {
        match ControlApi::new(
            &self.config.server.api_base,
            self.config.server.request_timeout(),
        ) {
            Ok(api) => self.control_api = Some(api),
            Err(e) => self.record(
                ConsoleLevel::Error,
                format!("Control API unavailable: {}", e),
            ),
        }

        self.connect_channel();
        self.refresh_backend_status();
    }

    /// Opens a fresh supervised channel in the single channel slot. The
    /// previous handle is cancelled, not awaited, so its close handshake may
    /// overlap with the new connect.
    pub fn connect_channel(&mut self) {
        let Some(event_tx) = self.event_tx.clone() else {
            return;
        };

        let client = match EventChannelClient::new(
            &self.config.server.ws_url,
            self.config.reconnect.policy(),
            event_tx,
        ) {
            Ok(client) => client,
            Err(e) => {
                self.record(ConsoleLevel::Error, format!("Event channel disabled: {}", e));
                self.channel_health = ChannelHealth::Offline;
                return;
            }
        };

        self.record(
            ConsoleLevel::Debug,
            format!("Opening event channel {}", client.url()),
        );
        if let Some(previous) = self.channel.replace(ChannelHandle::spawn(client)) {
            previous.cancel();
        }
        self.channel_health = ChannelHealth::Connecting;
    }

    /// Cancels the channel, including a reconnect that has not fired yet, and
    /// waits for its task to finish.
    pub async fn shutdown(&mut self) {
        if let Some(handle) = self.channel.take() {
            handle.shutdown().await;
        }
        self.channel_health = ChannelHealth::Offline;
    }

    pub fn process_channel_events(&mut self) {
        let mut channel_events = Vec::new();
        if let Some(ref mut rx) = self.event_rx {
            while let Ok(event) = rx.try_recv() {
                channel_events.push(event);
            }
        }

        for event in channel_events {
            match event {
                ChannelEvent::Opened => {
                    self.channel_health = ChannelHealth::Live;
                    self.record(ConsoleLevel::Info, "WebSocket connected");
                }
                ChannelEvent::Event(ServerEvent::Qr { code }) => {
                    self.set_pairing_code(code);
                }
                ChannelEvent::Event(ServerEvent::Status { status }) => {
                    self.status = ConnectionStatus::new(status);
                }
                ChannelEvent::Rejected { reason } => {
                    self.record(
                        ConsoleLevel::Error,
                        format!("Error parsing WebSocket message: {}", reason),
                    );
                }
                ChannelEvent::Error(e) => {
                    self.record(ConsoleLevel::Error, format!("WebSocket error: {}", e));
                }
                ChannelEvent::Closed => {
                    self.channel_health = ChannelHealth::Connecting;
                    self.record(
                        ConsoleLevel::Info,
                        "WebSocket disconnected, reconnecting...",
                    );
                }
                ChannelEvent::Reconnecting { attempt, delay } => {
                    self.channel_health = ChannelHealth::Reconnecting { attempt, delay };
                }
            }
        }

        let mut async_events = Vec::new();
        if let Some(ref mut rx) = self.app_async_rx {
            while let Ok(event) = rx.try_recv() {
                async_events.push(event);
            }
        }

        for event in async_events {
            match event {
                AppAsyncEvent::CommandFinished { command, error } => {
                    if let Some(err) = error {
                        self.record(
                            ConsoleLevel::Error,
                            format!("Error sending {} command: {}", command, err),
                        );
                    } else {
                        self.record(
                            ConsoleLevel::Info,
                            format!("{} command sent", command.label()),
                        );
                    }
                }
                AppAsyncEvent::BackendStatusLoaded { snapshot, error } => {
                    if let Some(err) = error {
                        self.record(
                            ConsoleLevel::Error,
                            format!("Failed to load backend status: {}", err),
                        );
                    } else if let Some(snapshot) = snapshot {
                        self.backend = Some(snapshot);
                    }
                }
            }
        }
    }

    /// Replaces the pairing code. Codes are never cleared, only overwritten.
    fn set_pairing_code(&mut self, code: String) {
        self.qr_view = if code.is_empty() {
            None
        } else {
            match QrView::encode(&code) {
                Ok(view) => Some(view),
                Err(e) => {
                    self.record(
                        ConsoleLevel::Error,
                        format!("Pairing code cannot be drawn as QR: {}", e),
                    );
                    None
                }
            }
        };
        self.pairing_code = PairingCode::new(code);
    }
}
