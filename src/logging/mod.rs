//! Logging setup.
//!
//! Builds an explicitly initialized tracing context: a terse stderr layer
//! plus a non-blocking file layer under the configured log directory. The
//! returned guard flushes the file appender on drop, so it must be held
//! for the lifetime of the process.

use anyhow::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::CalculatorConfig;

/// Keeps the non-blocking file appender alive; dropping it flushes any
/// buffered log lines.
pub struct LoggingGuard {
    _file: tracing_appender::non_blocking::WorkerGuard,
}

/// Initialize the global tracing subscriber. `RUST_LOG` overrides the
/// default level; `verbose` raises the default from info to debug.
pub fn init(config: &CalculatorConfig, verbose: bool) -> anyhow::Result<LoggingGuard> {
    std::fs::create_dir_all(&config.log_dir).with_context(|| {
        format!("failed to create log directory {}", config.log_dir.display())
    })?;

    let appender = tracing_appender::rolling::never(&config.log_dir, &config.log_file);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .context("failed to initialize logging")?;

    Ok(LoggingGuard { _file: guard })
}
