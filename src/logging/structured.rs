//! Subscriber installation
//!
//! SemAn writes anonymized documents to stdout, so human-readable logs go to
//! stderr. With `local_enabled` set, a second copy of every event is written
//! as one JSON object per line to `<local_path>/seman.log`, rotated according
//! to `local_rotation`.
//!
//! Events are filtered once, for both outputs: `RUST_LOG` when it is set,
//! otherwise `seman=<level>`.
//!
//! ```no_run
//! use seman::logging::init_logging;
//! use seman::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//! ```

use crate::config::LoggingConfig;
use crate::domain::{Result, SemanError};
use std::path::Path;
use tracing::{Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// File name prefix of rotated log files
const LOG_FILE_NAME: &str = "seman.log";

/// Keeps the background file writer alive; dropping it flushes pending lines
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Install the global subscriber
///
/// Keep the returned guard until the program exits.
///
/// # Errors
///
/// Fails on an unknown level, an unwritable log directory, or when a global
/// subscriber is already installed.
pub fn init_logging(log_level_str: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let log_level = parse_log_level(log_level_str)?;

    let (file_layer, file_guard) = if config.local_enabled {
        let (layer, guard) = json_file_layer(Path::new(&config.local_path), &config.local_rotation)?;
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(level_filter(log_level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .try_init()
        .map_err(|e| SemanError::Configuration(format!("Failed to initialize logging: {e}")))?;

    tracing::debug!(
        level = %log_level,
        local_enabled = config.local_enabled,
        local_path = %config.local_path,
        rotation = %config.local_rotation,
        "Logging initialized"
    );

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Filter from `RUST_LOG`, or SemAn's own events at `level` and above
fn level_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(level)))
}

fn default_directive(level: Level) -> String {
    format!("seman={}", level.as_str().to_lowercase())
}

/// JSON lines layer writing to a rolling file in `dir`
fn json_file_layer<S>(
    dir: &Path,
    rotation: &str,
) -> Result<(Box<dyn Layer<S> + Send + Sync>, WorkerGuard)>
where
    S: Subscriber + for<'span> LookupSpan<'span> + 'static,
{
    std::fs::create_dir_all(dir).map_err(|e| {
        SemanError::Configuration(format!(
            "Failed to create log directory {}: {}",
            dir.display(),
            e
        ))
    })?;

    let appender = RollingFileAppender::new(parse_rotation(rotation), dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_writer(writer)
        .boxed();

    Ok((layer, guard))
}

/// Parse a level name, ignoring case
pub fn parse_log_level(level_str: &str) -> Result<Level> {
    level_str.trim().parse::<Level>().map_err(|_| {
        SemanError::Configuration(format!(
            "Invalid log level: '{level_str}'. Must be one of: trace, debug, info, warn, error"
        ))
    })
}

/// Rotation for a configured name; unknown names rotate daily
pub fn parse_rotation(rotation: &str) -> Rotation {
    match rotation {
        "hourly" => Rotation::HOURLY,
        "never" => Rotation::NEVER,
        _ => Rotation::DAILY,
    }
}
