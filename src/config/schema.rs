//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every section carries `#[serde(default)]` so an empty file is a valid config.

use serde::{Deserialize, Serialize};

use crate::style::{Color, Format};

/// Root configuration for the logging pipeline.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    /// Minimum level written to stderr (trace, debug, info, warn, error).
    pub stderr_level: String,

    /// Global filter directives (`EnvFilter` syntax). `RUST_LOG` takes precedence.
    pub filter: String,

    /// Emit ANSI escapes for styled arguments (stderr and the color log file).
    pub colors: bool,

    /// Inject the ambient task prefix into every line.
    pub prefixes: bool,

    /// Replace line feeds in rendered lines with a visible placeholder.
    pub replace_newlines: bool,

    /// Log every audited subprocess launch.
    pub subprocesses: bool,

    /// `strftime` format for the leading timestamp.
    pub timestamp_format: String,

    /// Log file outputs.
    pub files: FileOutputConfig,

    /// Built-in style overrides.
    pub styles: StyleConfig,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            stderr_level: "debug".to_string(),
            filter: "debug".to_string(),
            colors: true,
            prefixes: true,
            replace_newlines: true,
            subprocesses: true,
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
            files: FileOutputConfig::default(),
            styles: StyleConfig::default(),
        }
    }
}

/// Log file configuration.
///
/// Two files receive every record: one with color escapes (for `less -R`),
/// one without.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Write log files at all.
    pub enabled: bool,

    /// Directory holding the log files (created on startup).
    pub directory: String,

    /// File name for the escaped log.
    pub color_file: String,

    /// File name for the plain log.
    pub plain_file: String,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: "logs".to_string(),
            color_file: "logweave.log".to_string(),
            plain_file: "logweave-plain.log".to_string(),
        }
    }
}

/// Styles for the value types registered at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StyleConfig {
    /// `chrono` date-times.
    pub timestamp: Format,

    /// `Path` and `PathBuf`.
    pub path: Format,

    /// Audited command lines.
    pub command: Format,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            timestamp: Format::color(Color::Yellow),
            path: Format::color(Color::Cyan),
            command: Format::default().dimmed(),
        }
    }
}
