//! Rolling Logger
//!
//! Installs a global `tracing` subscriber with two outputs:
//! - stderr, for interactive use
//! - a daily rolling file `<app>.<YYYY-MM-DD>.log`, keeping the newest files
//!
//! Records emitted through the `log` crate are forwarded as well.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::Subscriber;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to open rolling log file: {0}")]
    Appender(#[from] tracing_appender::rolling::InitError),
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    #[error("logger already initialized")]
    AlreadyInitialized,
}

/// Logger settings
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub log_dir: PathBuf,
    /// File name prefix
    pub app_name: String,
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// Rolled files to keep
    pub max_files: usize,
    pub stderr: bool,
}

impl LoggerConfig {
    pub fn new(log_dir: impl AsRef<Path>, app_name: &str) -> Self {
        Self {
            log_dir: log_dir.as_ref().to_path_buf(),
            app_name: app_name.to_string(),
            level: "info".to_string(),
            max_files: 7,
            stderr: true,
        }
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Path of the file written today
    pub fn current_log_file(&self) -> PathBuf {
        // The appender dates files in UTC
        let date = chrono::Utc::now().format("%Y-%m-%d");
        self.log_dir.join(format!("{}.{}.log", self.app_name, date))
    }
}

/// Initialize logging; fails if a global subscriber is already set
pub fn init_with(config: LoggerConfig) -> Result<(), LoggerError> {
    build_subscriber(&config)?
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)?;
    log::debug!("Logging to {}", config.current_log_file().display());
    Ok(())
}

fn build_subscriber(
    config: &LoggerConfig,
) -> Result<impl Subscriber + Send + Sync + 'static, LoggerError> {
    std::fs::create_dir_all(&config.log_dir).map_err(|source| LoggerError::CreateDir {
        path: config.log_dir.clone(),
        source,
    })?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)?,
    };

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(&config.app_name)
        .filename_suffix("log")
        .max_log_files(config.max_files.max(1))
        .build(&config.log_dir)?;

    let stderr_layer = config.stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });
    let file_layer = fmt::layer().with_ansi(false).with_writer(appender);

    Ok(tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_config(dir: &Path) -> LoggerConfig {
        let mut config = LoggerConfig::new(dir, "channel-test").with_level("debug");
        config.stderr = false;
        config
    }

    #[test]
    fn test_writes_dated_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = quiet_config(dir.path());
        let subscriber = build_subscriber(&config).unwrap();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("first entry");
            tracing::debug!(count = 2, "second entry");
        });

        let written = std::fs::read_to_string(config.current_log_file()).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("first entry"));
        assert!(lines[1].contains("count=2"));
    }

    #[test]
    fn test_level_filters_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = quiet_config(dir.path()).with_level("warn");
        let subscriber = build_subscriber(&config).unwrap();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("hidden");
            tracing::warn!("shown");
        });

        let written = std::fs::read_to_string(config.current_log_file()).unwrap();
        assert!(written.contains("shown"));
        assert!(!written.contains("hidden"));
    }

    #[test]
    fn test_bad_filter_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = quiet_config(dir.path()).with_level("channel=notalevel");
        assert!(matches!(
            build_subscriber(&config),
            Err(LoggerError::Filter(_))
        ));
    }

    #[test]
    fn test_log_file_name() {
        let config = LoggerConfig::new("/var/log/channel", "channel");
        let name = config.current_log_file();
        let name = name.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("channel."));
        assert!(name.ends_with(".log"));
        assert_eq!(name.len(), "channel.2024-01-01.log".len());
    }
}
