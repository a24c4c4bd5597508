//! Tracing setup for the `hismarketing` binary.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_PREFIX: &str = "hismarketing.log";
const CRATES: [&str; 5] = [
    "hismarketing_core",
    "hismarketing_infrastructure",
    "hismarketing_interaction",
    "hismarketing_application",
    "hismarketing_cli",
];

/// Keeps the file writer flushing until dropped.
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Installs a daily-rolling file layer and a stderr layer.
///
/// `RUST_LOG` wins over `level`. The console only shows warnings unless
/// `verbose` is set, so it does not interleave with the terminal output.
pub fn init(logs_dir: Option<PathBuf>, level: &str, verbose: bool) -> LogGuard {
    let mut file_guard = None;
    let file_layer = logs_dir.and_then(|dir| match std::fs::create_dir_all(&dir) {
        Ok(()) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            file_guard = Some(guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_filter(filter(level)),
            )
        }
        Err(err) => {
            eprintln!("Warning: failed to create logs directory: {err}");
            None
        }
    });

    let console_filter = if verbose {
        filter(level)
    } else {
        EnvFilter::new("warn")
    };
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .init();

    LogGuard { _file: file_guard }
}

fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

fn default_directives(level: &str) -> String {
    let level = match level.trim() {
        "" => "info",
        level => level,
    };
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_cover_workspace() {
        let directives = default_directives("debug");
        assert!(directives.starts_with("hismarketing_core=debug,"));
        assert!(directives.ends_with("hismarketing_cli=debug"));
        assert_eq!(default_directives(" "), default_directives("info"));
    }
}
