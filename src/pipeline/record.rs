//! The log record passed through the annotation pipeline.

use std::fmt::Write;

use chrono::{DateTime, Local};
use tracing::Level;

/// One emitted logging event.
///
/// Built by the line formatter from a `tracing::Event`, annotated by the
/// filters, rendered once, then dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    /// Name of the originating logger (the event target).
    pub target: String,
    /// Message text, already interpolated.
    pub message: String,
    /// Structured fields other than the message, in emission order.
    pub fields: Vec<(String, String)>,
    /// Annotation written by the prefix filter.
    pub prefix: String,
}

impl LogRecord {
    pub fn new(level: Level, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            level,
            target: target.into(),
            message: message.into(),
            fields: Vec::new(),
            prefix: String::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Render as `<timestamp> <LEVEL>: <prefix><message>[ name=value...]`.
    ///
    /// The level is right-aligned to ten columns.
    pub fn render(&self, timestamp_format: &str) -> String {
        let mut line = String::with_capacity(32 + self.prefix.len() + self.message.len());

        if write!(line, "{}", self.timestamp.format(timestamp_format)).is_err() {
            line.clear();
            line.push_str(&self.timestamp.to_rfc3339());
        }

        let _ = write!(line, " {:>10}: {}{}", self.level.as_str(), self.prefix, self.message);
        for (name, value) in &self.fields {
            let _ = write!(line, " {name}={value}");
        }
        line
    }
}
