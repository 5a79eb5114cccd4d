//! Console and run-log tracing setup

use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Run log, written to the current directory
pub const LOG_FILE_NAME: &str = "loam_migration.log";

fn default_filter(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("loam_cli={level},loam_core={level},loam_parser={level}")
}

/// Log to stderr and to [`LOG_FILE_NAME`]. `RUST_LOG` overrides the levels.
///
/// If the log file cannot be opened, logging continues on the console only.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let console = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE_NAME);
    let (file_layer, file_error) = match log_file {
        Ok(file) => (
            Some(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false)),
            None,
        ),
        Err(e) => (None, Some(e)),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .init();

    if let Some(e) = file_error {
        tracing::warn!("Could not open {LOG_FILE_NAME}, logging to console only: {e}");
    }
}
