use super::*;

pub struct App {
    pub config: Config,
    pub status: ConnectionStatus,
    pub pairing_code: PairingCode,
    pub qr_view: Option<QrView>,
    pub backend: Option<BackendSnapshot>,
    pub channel_health: ChannelHealth,
    pub channel: Option<ChannelHandle>,
    pub control_api: Option<ControlApi>,
    pub focused_button: usize,
    pub layout: LayoutState,
    pub keybinds: Keybinds,
    pub show_help: bool,
    pub show_console: bool,
    pub console: VecDeque<ConsoleLine>,
    pub event_tx: Option<mpsc::UnboundedSender<ChannelEvent>>,
    pub event_rx: Option<mpsc::UnboundedReceiver<ChannelEvent>>,
    pub app_async_tx: Option<mpsc::UnboundedSender<AppAsyncEvent>>,
    pub app_async_rx: Option<mpsc::UnboundedReceiver<AppAsyncEvent>>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (app_async_tx, app_async_rx) = mpsc::unbounded_channel();

        Self {
            config,
            status: ConnectionStatus::default(),
            pairing_code: PairingCode::default(),
            qr_view: None,
            backend: None,
            channel_health: ChannelHealth::Offline,
            channel: None,
            control_api: None,
            focused_button: 0,
            layout: LayoutState::default(),
            keybinds: Keybinds,
            show_help: false,
            show_console: false,
            console: VecDeque::new(),
            event_tx: Some(event_tx),
            event_rx: Some(event_rx),
            app_async_tx: Some(app_async_tx),
            app_async_rx: Some(app_async_rx),
        }
    }

    /// Start is the only trigger that can be disabled, and only by an exact
    /// `"connected"` status.
    pub fn is_enabled(&self, command: Command) -> bool {
        match command {
            Command::Start => !self.status.is_connected(),
            Command::Stop | Command::Logout => true,
        }
    }

    pub fn focused_command(&self) -> Command {
        Command::ALL[self.focused_button % Command::ALL.len()]
    }
}
