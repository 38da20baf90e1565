//! Tracing setup: colored stderr plus a daily-rolling JSON log file.

use std::ffi::OsStr;
use std::path::Path;

use tracing::level_filters::LevelFilter;
use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Opens the daily-rolling appender for `log_file_path`. The file name is
/// used as the prefix of each day's file.
pub fn file_appender(log_file_path: &str) -> Result<RollingFileAppender, InitError> {
    let log_path = Path::new(log_file_path);
    let log_dir = log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = log_path
        .file_name()
        .unwrap_or(OsStr::new("quality_rater.log"));

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(log_file_name.to_string_lossy().into_owned())
        .build(log_dir)
}

/// Installs the global subscriber. Keep the returned guard alive for the
/// whole run or buffered file output is lost.
///
/// Stderr defaults to `warn` so it does not drown the console report;
/// `RUST_LOG` and `RUST_LOG_JSON` add directives to each layer. If the log
/// file cannot be opened only the stderr layer is installed and `None` is
/// returned.
pub fn init(log_file_path: &str) -> Option<WorkerGuard> {
    let (file_writer, open_error) = match file_appender(log_file_path) {
        Ok(appender) => (Some(tracing_appender::non_blocking(appender)), None),
        Err(e) => (None, Some(e)),
    };
    let (non_blocking_file, guard) = file_writer.unzip();

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive(LevelFilter::WARN.into()));

    let json_layer = non_blocking_file.map(|writer| {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(writer)
            .with_filter(
                EnvFilter::from_env("RUST_LOG_JSON").add_directive(LevelFilter::DEBUG.into()),
            )
    });

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    if let Some(e) = open_error {
        warn!(error = %e, path = log_file_path, "File logging disabled");
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_appender_creates_log_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("run.log");

        assert!(file_appender(path.to_str().unwrap()).is_ok());
        assert!(dir.path().join("nested").is_dir());
    }

    #[test]
    fn test_file_appender_fails_when_directory_is_a_file() {
        let blocker = tempfile::NamedTempFile::new().unwrap();
        let path = blocker.path().join("run.log");

        assert!(file_appender(path.to_str().unwrap()).is_err());
    }
}
