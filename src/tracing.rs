//! Logging setup
//!
//! Console verbosity follows `RUST_LOG` (e.g. `RUST_LOG=spooky_console::grid=trace`)
//! and defaults to warnings. A second layer writes everything at debug level
//! to `logs/spooky.log.<date>` in the config directory, rotated daily.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config_paths::{ensure_logs_dir, LOG_FILE_PREFIX};

/// Install the global subscriber. Call once, before the shell starts.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // stderr, so log lines never interleave with shell output on stdout
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(console_filter);

    let file_layer = ensure_logs_dir()
        .map_err(|e| eprintln!("Warning: file logging disabled: {:#}", e))
        .ok()
        .map(|logs_dir| {
            fmt::layer()
                .with_writer(tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX))
                .with_ansi(false)
                .with_line_number(true)
                .with_filter(EnvFilter::new("debug"))
        });

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
