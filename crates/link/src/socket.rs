use crate::backoff::ReconnectPolicy;
use crate::error::{LinkError, LinkResult};
use crate::types::ServerEvent;
use futures::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message as WsMessage};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use url::Url;

pub const DEFAULT_WS_URL: &str = "ws://localhost:8080/ws";

const IDLE_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    Opened,
    Event(ServerEvent),
    Rejected { reason: String },
    Error(String),
    Closed,
    /// `attempt` is 1-based and counts attempts since the last successful open.
    Reconnecting { attempt: u32, delay: Duration },
}

enum SessionEnd {
    Cancelled,
    Closed { opened: bool },
}

/// Keeps one websocket to the backend's event channel open, reopening it
/// after every close.
pub struct EventChannelClient {
    url: String,
    policy: ReconnectPolicy,
    event_tx: mpsc::UnboundedSender<ChannelEvent>,
}

impl EventChannelClient {
    pub fn new(
        url: &str,
        policy: ReconnectPolicy,
        event_tx: mpsc::UnboundedSender<ChannelEvent>,
    ) -> LinkResult<Self> {
        let parsed = Url::parse(url).map_err(|e| LinkError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "ws" | "wss") {
            return Err(LinkError::InvalidUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }

        Ok(Self {
            url: url.to_string(),
            policy,
            event_tx,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn run(self, cancel: CancellationToken) {
        let mut attempt: u32 = 0;

        loop {
            if self.event_tx.is_closed() {
                debug!("Event receiver dropped, stopping channel");
                break;
            }

            match self.connect_and_listen(&cancel).await {
                SessionEnd::Cancelled => break,
                SessionEnd::Closed { opened } => {
                    if opened {
                        attempt = 0;
                    }
                    self.emit(ChannelEvent::Closed);

                    let delay = self.policy.delay(attempt);
                    attempt = attempt.saturating_add(1);
                    info!("Event channel closed. Reconnecting in {:?}", delay);
                    self.emit(ChannelEvent::Reconnecting { attempt, delay });

                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        _ = sleep(delay) => {}
                    }
                }
            }
        }

        info!("Event channel stopped");
    }

    async fn connect_and_listen(&self, cancel: &CancellationToken) -> SessionEnd {
        debug!("Connecting to event channel: {}", self.url);

        let connect = tokio::select! {
            _ = cancel.cancelled() => return SessionEnd::Cancelled,
            result = connect_async(self.url.as_str()) => result,
        };
        let (ws_stream, _) = match connect {
            Ok(pair) => pair,
            Err(e) => {
                let e = LinkError::from(e);
                warn!("Event channel connect failed: {}", e);
                self.emit(ChannelEvent::Error(e.to_string()));
                return SessionEnd::Closed { opened: false };
            }
        };

        info!("Event channel connected");
        self.emit(ChannelEvent::Opened);

        let (mut write, mut read) = ws_stream.split();

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    let _ = write.close().await;
                    return SessionEnd::Cancelled;
                }
                frame = timeout(IDLE_TIMEOUT, read.next()) => match frame {
                    Ok(Some(Ok(WsMessage::Text(text)))) => {
                        debug!("Received: {}", text.as_str());
                        self.handle_message(&text);
                    }
                    Ok(Some(Ok(WsMessage::Close(_)))) => {
                        info!("Event channel closed by server");
                        break;
                    }
                    Ok(Some(Ok(_))) => {}
                    Ok(Some(Err(e))) => {
                        let e = LinkError::from(e);
                        error!("Event channel error: {}", e);
                        self.emit(ChannelEvent::Error(e.to_string()));
                        break;
                    }
                    Ok(None) => {
                        info!("Event channel stream ended");
                        break;
                    }
                    Err(_) => debug!("No frames for {:?}", IDLE_TIMEOUT),
                },
            }
        }

        SessionEnd::Closed { opened: true }
    }

    fn handle_message(&self, text: &str) {
        match ServerEvent::parse(text) {
            Ok(event) => self.emit(ChannelEvent::Event(event)),
            Err(e) => {
                warn!("Error parsing event channel message: {}", e);
                self.emit(ChannelEvent::Rejected {
                    reason: e.to_string(),
                });
            }
        }
    }

    fn emit(&self, event: ChannelEvent) {
        let _ = self.event_tx.send(event);
    }
}

/// Owns the supervised channel task. Dropping the handle cancels the open
/// socket and any pending reconnect.
pub struct ChannelHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl ChannelHandle {
    /// Must be called from within a tokio runtime.
    pub fn spawn(client: EventChannelClient) -> Self {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(client.run(cancel.clone()));
        Self {
            cancel,
            task: Some(task),
        }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("Event channel task ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for ChannelHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
