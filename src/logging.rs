//! File logging for diagnostics.
//!
//! The terminal belongs to the editor while it runs, so log output goes only
//! to `~/.config/hexquill/logs/hexquill.log`, rotated daily.
//!
//! Filtering follows `RUST_LOG` when it is set, for example:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=hexquill::editor=trace` - module-level filtering
//!
//! Otherwise the `log_level` value from the config file applies.

use crate::config::Config;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Returns the directory log files are written to.
pub fn logs_dir() -> Option<PathBuf> {
    Config::config_dir().map(|dir| dir.join("logs"))
}

/// Builds the filter: `RUST_LOG` first, then the configured level.
pub fn filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("warn"))
    })
}

/// Installs the global subscriber.
///
/// Logging is best effort: if the log directory cannot be created the editor
/// runs without it.
pub fn init(config: &Config) {
    let Some(dir) = logs_dir() else {
        return;
    };
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("Warning: Could not initialize file logging: {}", e);
        return;
    }

    let file_appender = tracing_appender::rolling::daily(dir, "hexquill.log");
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_thread_names(true)
        .with_line_number(true)
        .with_filter(filter(config));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry().with(file_layer).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logs_dir_is_under_config_dir() {
        if let (Some(logs), Some(config)) = (logs_dir(), Config::config_dir()) {
            assert!(logs.starts_with(config));
        }
    }
}
