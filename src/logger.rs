use crate::routines::settings::Settings;
use anyhow::{Context, Result};
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::{self};
use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;
use tracing_subscriber::registry::Registry;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Setup logging for the library
///
/// This function sets up logging for the library. It uses the `tracing` crate, and the `tracing-subscriber` crate for formatting.
///
/// The log level is defined in the configuration file, and defaults to `INFO`.
///
/// If a log file is specified in the configuration file, messages are also written there without ANSI escapes.
pub fn setup_log(settings: &Settings) -> Result<()> {
    // Use the log level defined in configuration file, or default to info
    let log_level = settings.log.level.to_lowercase();
    let env_filter = EnvFilter::new(&log_level);

    // Define a registry with that level as an environment filter
    let subscriber = Registry::default().with(env_filter);

    // Define a layer for the log file
    let file_layer = match &settings.log.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path))?;

            let layer = fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_timer(CompactTimestamp);

            Some(layer)
        }
        None => None,
    };

    // Define layer for stdout
    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(false)
        .with_timer(CompactTimestamp);

    // Combine layers with subscriber
    subscriber.with(file_layer).with(stdout_layer).init();

    tracing::debug!("Logging is configured with level: {}", log_level);

    Ok(())
}

#[derive(Clone)]
struct CompactTimestamp;

impl FormatTime for CompactTimestamp {
    fn format_time(
        &self,
        w: &mut tracing_subscriber::fmt::format::Writer<'_>,
    ) -> Result<(), std::fmt::Error> {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S"))
    }
}
