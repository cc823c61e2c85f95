//! Structured logging setup using tracing
//!
//! Console output goes to stderr so command output on stdout (for example
//! `export --stdout`) stays machine-readable. An optional JSON file layer
//! writes through a rolling appender.
//!
//! # Example
//!
//! ```no_run
//! use pricebatch::logging::init_logging;
//! use pricebatch::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//! ```

use crate::config::LoggingConfig;
use crate::domain::errors::PriceBatchError;
use crate::domain::Result;
use std::io::IsTerminal;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// File name prefix of the rolling log
pub const LOG_FILE_NAME: &str = "pricebatch.log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps the file writer alive; drop it last so buffered lines reach disk
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize the logging system based on configuration
///
/// `RUST_LOG` takes precedence over `log_level_str` when set. Without it,
/// only events from this crate are shown.
///
/// # Errors
///
/// Returns [`PriceBatchError::Configuration`] for an unknown level, a log
/// directory that cannot be created, or a second initialization.
pub fn init_logging(log_level_str: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let log_level = parse_log_level(log_level_str)?;
    let filter = || {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(log_level)))
    };

    let mut layers = vec![console_layer(
        std::io::stderr,
        std::io::stderr().is_terminal(),
        filter(),
    )];

    let file_guard = if config.local_enabled {
        let (non_blocking, guard) = tracing_appender::non_blocking(open_log_appender(config)?);
        let file_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(non_blocking)
            .with_filter(filter());
        layers.push(file_layer.boxed());
        Some(guard)
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| PriceBatchError::Configuration(format!("Logging already initialized: {e}")))?;

    tracing::debug!(
        level = %log_level,
        local_enabled = config.local_enabled,
        local_path = %config.local_path,
        "Logging initialized"
    );

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Filter directive used when `RUST_LOG` is unset
fn default_directive(level: Level) -> String {
    format!("pricebatch={}", level.as_str().to_lowercase())
}

/// Human-readable layer; ANSI colours only when writing to a terminal
fn console_layer<W>(writer: W, ansi: bool, filter: EnvFilter) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(true)
        .with_filter(filter)
        .boxed()
}

fn open_log_appender(config: &LoggingConfig) -> Result<RollingFileAppender> {
    std::fs::create_dir_all(&config.local_path).map_err(|e| {
        PriceBatchError::Configuration(format!(
            "Failed to create log directory {}: {}",
            config.local_path, e
        ))
    })?;

    RollingFileAppender::builder()
        .rotation(parse_rotation(&config.local_rotation))
        .filename_prefix(LOG_FILE_NAME)
        .build(&config.local_path)
        .map_err(|e| {
            PriceBatchError::Configuration(format!(
                "Failed to open log file in {}: {}",
                config.local_path, e
            ))
        })
}

fn parse_log_level(level_str: &str) -> Result<Level> {
    level_str.trim().parse::<Level>().map_err(|_| {
        PriceBatchError::Configuration(format!(
            "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
            level_str
        ))
    })
}

// Config validation only lets "daily" and "hourly" through
fn parse_rotation(value: &str) -> Rotation {
    match value {
        "hourly" => Rotation::HOURLY,
        _ => Rotation::DAILY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn file_config(path: &std::path::Path) -> LoggingConfig {
        LoggingConfig {
            local_enabled: true,
            local_path: path.display().to_string(),
            local_rotation: "hourly".to_string(),
        }
    }

    #[test]
    fn test_parse_log_level_accepts_config_spellings() {
        assert_eq!(parse_log_level("warn").unwrap(), Level::WARN);
        assert_eq!(parse_log_level("DEBUG").unwrap(), Level::DEBUG);
        assert_eq!(parse_log_level(" info ").unwrap(), Level::INFO);
    }

    #[test]
    fn test_parse_log_level_error_names_value() {
        let err = parse_log_level("verbose").unwrap_err();
        assert!(matches!(err, PriceBatchError::Configuration(ref msg) if msg.contains("verbose")));
    }

    #[test]
    fn test_parse_rotation_falls_back_to_daily() {
        assert_eq!(parse_rotation("hourly"), Rotation::HOURLY);
        assert_eq!(parse_rotation("daily"), Rotation::DAILY);
        assert_eq!(parse_rotation("weekly"), Rotation::DAILY);
    }

    #[test]
    fn test_default_directive_scopes_to_crate() {
        assert_eq!(default_directive(Level::WARN), "pricebatch=warn");
        assert_eq!(default_directive(Level::TRACE), "pricebatch=trace");
    }

    #[test]
    fn test_console_layer_writes_only_crate_events_at_level() {
        let captured = Captured::default();
        let sink = captured.clone();
        let layer = console_layer(
            move || sink.clone(),
            false,
            EnvFilter::new(default_directive(Level::WARN)),
        );

        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(target: "pricebatch::cli", "Catalog unavailable");
            tracing::info!(target: "pricebatch::cli", "Batch loaded");
            tracing::warn!(target: "hyper", "connection reset");
        });

        let text = captured.text();
        assert!(text.contains("Catalog unavailable"));
        assert!(text.contains("pricebatch::cli"));
        assert!(!text.contains("Batch loaded"));
        assert!(!text.contains("connection reset"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_open_log_appender_creates_nested_directory() {
        let dir = TempDir::new().unwrap();
        let log_dir = dir.path().join("logs").join("pricebatch");

        open_log_appender(&file_config(&log_dir)).unwrap();
        assert!(log_dir.is_dir());
    }

    #[test]
    fn test_open_log_appender_under_file_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, "x").unwrap();

        let err = open_log_appender(&file_config(&blocker.join("logs"))).unwrap_err();
        assert!(matches!(
            err,
            PriceBatchError::Configuration(ref msg) if msg.contains("Failed to create log directory")
        ));
    }
}
