use anyhow::{anyhow, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// `RUST_LOG` wins, then `LOG_LEVEL`, then `info`. The second value is a
/// warning to emit once the subscriber is installed.
pub fn env_filter() -> (EnvFilter, Option<String>) {
    filter_from(
        std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
        std::env::var(LOG_LEVEL_ENV).ok().as_deref(),
    )
}

fn filter_from(rust_log: Option<&str>, log_level: Option<&str>) -> (EnvFilter, Option<String>) {
    if let Some(directives) = rust_log.map(str::trim).filter(|d| !d.is_empty()) {
        if let Ok(filter) = EnvFilter::try_new(directives) {
            return (filter, None);
        }
    }

    let Some(level) = log_level.map(str::trim).filter(|l| !l.is_empty()) else {
        return (EnvFilter::new("info"), None);
    };

    // Only bare level names; EnvFilter would read a typo as a target.
    match LevelFilter::from_str(level) {
        Ok(filter) => (EnvFilter::new(filter.to_string()), None),
        Err(_) => (
            EnvFilter::new("info"),
            Some(format!(
                "Unknown {} {:?}, expected trace|debug|info|warn|error|off; using info",
                LOG_LEVEL_ENV, level
            )),
        ),
    }
}

/// The terminal is owned by the UI, so log records go to a file.
pub fn init(log_file: &Path) -> Result<()> {
    if let Some(dir) = log_file.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    let (filter, warning) = env_filter();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to install log subscriber: {}", e))?;

    if let Some(warning) = warning {
        tracing::warn!("{}", warning);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_takes_precedence() {
        let (filter, warning) = filter_from(Some("meow_panel=debug"), Some("error"));
        assert_eq!(filter.to_string(), "meow_panel=debug");
        assert!(warning.is_none());
    }

    #[test]
    fn log_level_names_are_case_insensitive() {
        let (filter, warning) = filter_from(None, Some("WARN"));
        assert_eq!(filter.to_string(), "warn");
        assert!(warning.is_none());

        let (filter, _) = filter_from(Some("  "), Some("Debug"));
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        for typo in ["WARNING", "verbose"] {
            let (filter, warning) = filter_from(None, Some(typo));
            assert_eq!(filter.to_string(), "info");
            assert!(warning.expect("warning").contains(typo));
        }
    }

    #[test]
    fn defaults_to_info() {
        let (filter, warning) = filter_from(None, None);
        assert_eq!(filter.to_string(), "info");
        assert!(warning.is_none());
    }
}
