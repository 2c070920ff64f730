//! Subscriber setup.
//!
//! # Responsibilities
//! - Build the global subscriber from `LogConfig`
//! - Route every record to stderr, a color log file and a plain log file
//! - Apply the configured styles and the exec-audit switch
//!
//! # Design Decisions
//! - `RUST_LOG` wins over the configured filter directives
//! - Files receive everything the global filter passes; stderr has its own level
//! - The color file keeps escapes so `less -R` shows the same view as stderr

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;

use thiserror::Error;
use tracing::Subscriber;
use tracing_subscriber::filter::{LevelFilter, ParseError};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, EnvFilter, Layer};

use super::formatter::LineFormatter;
use crate::config::LogConfig;
use crate::process::set_exec_audit;
use crate::style::install_styles;

/// Error type for logging initialization.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("failed to create log directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to open log file {path}: {source}")]
    OpenFile { path: PathBuf, source: io::Error },

    #[error("invalid stderr level '{0}'")]
    Level(String),

    #[error("invalid filter directives: {0}")]
    Filter(#[from] ParseError),

    #[error("global subscriber already installed: {0}")]
    AlreadyInstalled(#[from] TryInitError),
}

/// Build the subscriber described by `config` without installing it.
pub fn build_subscriber(config: &LogConfig) -> Result<impl Subscriber + Send + Sync, InitError> {
    let stderr_level = LevelFilter::from_str(&config.stderr_level)
        .map_err(|_| InitError::Level(config.stderr_level.clone()))?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter)?,
    };

    let stderr_layer = fmt::layer()
        .event_format(LineFormatter::from_config(config, config.colors))
        .with_writer(io::stderr)
        .with_filter(stderr_level);

    let (color_file_layer, plain_file_layer) = if config.files.enabled {
        let directory = Path::new(&config.files.directory);
        fs::create_dir_all(directory).map_err(|source| InitError::CreateDir {
            path: directory.to_path_buf(),
            source,
        })?;

        let color_file = open_log_file(&directory.join(&config.files.color_file))?;
        let plain_file = open_log_file(&directory.join(&config.files.plain_file))?;

        (
            Some(
                fmt::layer()
                    .event_format(LineFormatter::from_config(config, config.colors))
                    .with_writer(Mutex::new(color_file)),
            ),
            Some(
                fmt::layer()
                    .event_format(LineFormatter::from_config(config, false))
                    .with_writer(Mutex::new(plain_file)),
            ),
        )
    } else {
        (None, None)
    };

    Ok(tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(color_file_layer)
        .with(plain_file_layer))
}

/// Install the global subscriber and apply the process-wide switches.
pub fn init(config: &LogConfig) -> Result<(), InitError> {
    install_styles(&config.styles);
    set_exec_audit(config.subprocesses);

    build_subscriber(config)?.try_init()?;

    tracing::debug!(
        stderr_level = %config.stderr_level,
        colors = config.colors,
        prefixes = config.prefixes,
        replace_newlines = config.replace_newlines,
        subprocesses = config.subprocesses,
        "Logging initialised"
    );
    Ok(())
}

fn open_log_file(path: &Path) -> Result<File, InitError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| InitError::OpenFile {
            path: path.to_path_buf(),
            source,
        })
}
