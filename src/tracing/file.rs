use std::path::Path;
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::Layer;
use tracing_subscriber::prelude::*;

use super::filter::DebugOnlyFilter;
use super::filter::ErrorWarnFilter;
use super::filter::InfoAndAboveFilter;
#[cfg(feature = "dev")]
use super::filter::InfoOnlyFilter;
use super::format::HydroscanFormat;
use crate::config::LoggingConfig;

// Writers stop flushing once their guard drops
static GUARDS: OnceLock<Vec<WorkerGuard>> = OnceLock::new();

/// Installs the global subscriber: debug and warn/error files under the
/// configured directory, info and above on the terminal. `dev` builds also
/// keep an info file. Calling it twice leaves the first subscriber in place.
pub fn setup_tracing(
    engine_name: &str,
    logging: &LoggingConfig,
) {
    let base_logs_dir = Path::new(logging.directory.as_deref().unwrap_or(".logs"));
    let debug_dir = base_logs_dir.join("debug");
    let error_dir = base_logs_dir.join("error");

    for dir in [base_logs_dir, debug_dir.as_path(), error_dir.as_path()] {
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!("Failed to create logs directory {}: {}", dir.display(), e);
            return;
        }
    }

    let file_name = format!("{}.log", engine_name);
    let (non_blocking_debug, debug_guard) =
        tracing_appender::non_blocking(RollingFileAppender::new(Rotation::DAILY, &debug_dir, &file_name));
    let (non_blocking_error, error_guard) =
        tracing_appender::non_blocking(RollingFileAppender::new(Rotation::DAILY, &error_dir, &file_name));
    #[cfg(feature = "dev")]
    let (non_blocking_info, info_guard) =
        tracing_appender::non_blocking(RollingFileAppender::new(Rotation::DAILY, base_logs_dir, &file_name));

    let format = HydroscanFormat::new(engine_name);

    let subscriber = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_ansi(false)
                .event_format(format.clone())
                .with_writer(non_blocking_debug)
                .with_filter(DebugOnlyFilter),
        )
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_ansi(false)
                .event_format(format.clone())
                .with_writer(non_blocking_error)
                .with_filter(ErrorWarnFilter),
        )
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_ansi(true)
                .event_format(format.clone())
                .with_filter(InfoAndAboveFilter),
        );

    #[cfg(feature = "dev")]
    let subscriber = subscriber.with(
        tracing_subscriber::fmt::Layer::default()
            .with_ansi(false)
            .event_format(format.clone())
            .with_writer(non_blocking_info)
            .with_filter(InfoOnlyFilter),
    );

    match tracing::subscriber::set_global_default(subscriber) {
        Ok(()) => {
            #[cfg(feature = "dev")]
            let guards = vec![debug_guard, error_guard, info_guard];
            #[cfg(not(feature = "dev"))]
            let guards = vec![debug_guard, error_guard];
            let _ = GUARDS.set(guards);

            tracing::info!("{}_logging_started::debug_logs::{}", engine_name, debug_dir.join(&file_name).display());
            tracing::info!("{}_logging_started::error_logs::{}", engine_name, error_dir.join(&file_name).display());
        },
        Err(e) => {
            eprintln!("Error setting up logging: {}", e);
        },
    }
}
