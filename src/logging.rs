//! Tracing setup
//!
//! Diagnostics go to stderr through a non-blocking writer, filtered by
//! `GVS_LOG` (default `warn`). Command output is printed separately.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LOG_ENV;

const DEFAULT_FILTER: &str = "warn";

/// Installs the global subscriber. Keep the guard alive until exit so
/// buffered events are flushed.
pub fn init() -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer),
        )
        .try_init();

    guard
}
