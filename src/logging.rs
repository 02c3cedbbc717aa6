use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::{LogConfig, LogRotation};

/// HTTP stack crates held at warn regardless of the configured level
const TRANSPORT_DIRECTIVES: &[&str] = &["hyper=warn", "hyper_util=warn", "reqwest=warn"];

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter: {0}")]
    Filter(#[from] ParseError),

    #[error("Failed to open log file: {0}")]
    Appender(#[from] InitError),

    #[error("Failed to install subscriber: {0}")]
    Install(#[from] TryInitError),
}

impl From<LogRotation> for Rotation {
    fn from(rotation: LogRotation) -> Self {
        match rotation {
            LogRotation::Never => Rotation::NEVER,
            LogRotation::Hourly => Rotation::HOURLY,
            LogRotation::Daily => Rotation::DAILY,
        }
    }
}

/// Filter used when `RUST_LOG` is unset
pub fn default_directives(config: &LogConfig) -> String {
    std::iter::once(config.log_level.as_str())
        .chain(TRANSPORT_DIRECTIVES.iter().copied())
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber
///
/// The returned guard flushes the file writer on drop, so hold it for the
/// process lifetime. JSON mode writes to the file only; text mode mirrors
/// every event to stdout.
pub fn init_logging(config: &LogConfig) -> Result<WorkerGuard, LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directives(config))?,
    };

    let appender = RollingFileAppender::builder()
        .rotation(config.rotation.into())
        .filename_prefix(config.log_file.as_str())
        .build(&config.log_dir)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let json_file = config.use_json.then(|| {
        fmt::layer()
            .json()
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer.clone())
    });
    let text_file = (!config.use_json).then(|| {
        fmt::layer()
            .with_target(false)
            .with_ansi(false)
            .with_writer(writer)
    });
    let stdout = (!config.use_json).then(|| fmt::layer().with_target(false).with_ansi(true));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_file)
        .with(text_file)
        .with(stdout)
        .try_init()?;

    Ok(guard)
}
