use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use directories::ProjectDirs;
use meow_panel::app::App;
use meow_panel::{logging, Config};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "meow-panel", "meow-panel")
}

fn get_config_path() -> PathBuf {
    if let Some(proj_dirs) = project_dirs() {
        proj_dirs.config_dir().join("config.toml")
    } else {
        PathBuf::from("config/default.toml")
    }
}

fn get_log_path() -> PathBuf {
    if let Some(proj_dirs) = project_dirs() {
        proj_dirs.data_dir().join("meow-panel.log")
    } else {
        PathBuf::from("meow-panel.log")
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let log_path = get_log_path();
    if let Err(e) = logging::init(&log_path) {
        eprintln!("Logging disabled: {}", e);
    }

    let config_path = get_config_path();
    let mut config = Config::load_or_default(&config_path);
    config.apply_env();
    tracing::info!(
        ws_url = %config.server.ws_url,
        api_base = %config.server.api_base,
        "Starting meow-panel"
    );

    let rt = tokio::runtime::Runtime::new()?;
    let _guard = rt.enter();

    let mut app = App::new(config);
    app.init();

    let mut terminal = ratatui::init();
    crossterm::execute!(io::stdout(), EnableMouseCapture)?;

    let result = run(&mut terminal, &mut app);

    rt.block_on(app.shutdown());

    let _ = crossterm::execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> color_eyre::Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(50))? {
            match app.handle_event(event::read()?) {
                Ok(true) => break,
                Ok(false) => {}
                Err(e) => tracing::warn!("Event handling failed: {}", e),
            }
        }

        app.process_channel_events();
    }

    Ok(())
}
