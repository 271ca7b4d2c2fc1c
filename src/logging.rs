use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;

/// Initializes logging: human-readable console output on stderr, plus a
/// daily-rolling JSON file when `config.directory` is set.
///
/// Keep the returned guard alive until exit so buffered file logs are flushed.
pub fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("dex_catalog=info"));

    let (file_layer, guard) = match &config.directory {
        Some(directory) => {
            prepare_log_directory(directory);
            let file_appender = tracing_appender::rolling::daily(directory, &config.file_prefix);
            let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer().json().with_writer(non_blocking_writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    // stdout carries command output
    let console_layer = fmt::layer().with_writer(std::io::stderr);

    // A second init (e.g. from tests) keeps the existing subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init();

    guard
}

/// Creates the log directory. No subscriber exists yet, so failures go to stderr.
fn prepare_log_directory(directory: &Path) -> bool {
    match fs::create_dir_all(directory) {
        Ok(()) => true,
        Err(e) => {
            eprintln!(
                "warning: cannot create log directory {}: {}; file logs will not be written",
                directory.display(),
                e
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn creates_missing_log_directory() {
        let root = tempdir().unwrap();
        let nested = root.path().join("logs").join("dex");

        assert!(prepare_log_directory(&nested));
        assert!(nested.is_dir());
    }

    #[test]
    fn reports_unusable_log_directory() {
        let file = NamedTempFile::new().unwrap();
        let under_a_file = file.path().join("logs");

        assert!(!prepare_log_directory(&under_a_file));
    }
}
