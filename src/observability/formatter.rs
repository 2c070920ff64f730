//! Line formatter for `tracing-subscriber`'s fmt layer.
//!
//! # Responsibilities
//! - Turn a `tracing::Event` into a `LogRecord`
//! - Render the message with argument styles on or off
//! - Run the record filters, render the line, replace newlines

use std::fmt::{self, Write};

use chrono::Local;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::config::LogConfig;
use crate::pipeline::{sanitize_newlines, LogRecord, Pipeline, PrefixFilter, RecordFilter};
use crate::style::with_color_escapes;

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats events as `<timestamp> <LEVEL>: <prefix><message>`.
#[derive(Debug)]
pub struct LineFormatter {
    colors: bool,
    replace_newlines: bool,
    timestamp_format: String,
    pipeline: Pipeline,
}

impl Default for LineFormatter {
    fn default() -> Self {
        Self {
            colors: false,
            replace_newlines: false,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            pipeline: Pipeline::new(),
        }
    }
}

impl LineFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A formatter honouring `config`; `colors` picks escapes for this output.
    pub fn from_config(config: &LogConfig, colors: bool) -> Self {
        let mut formatter = Self::new()
            .with_colors(colors)
            .with_newline_replacement(config.replace_newlines)
            .with_timestamp_format(&config.timestamp_format);
        if config.prefixes {
            formatter = formatter.with_filter(PrefixFilter);
        }
        formatter
    }

    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_newline_replacement(mut self, replace: bool) -> Self {
        self.replace_newlines = replace;
        self
    }

    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    /// Append a filter to this formatter's pipeline.
    pub fn with_filter(mut self, filter: impl RecordFilter + 'static) -> Self {
        self.pipeline.push(filter);
        self
    }

    /// Shorthand for `with_filter(PrefixFilter)`.
    pub fn with_prefixes(self) -> Self {
        self.with_filter(PrefixFilter)
    }

    /// Capture an event. The message is interpolated here, so styled
    /// arguments see this formatter's escape setting.
    pub fn record_for(&self, event: &Event<'_>) -> LogRecord {
        let metadata = event.metadata();
        let mut visitor = RecordVisitor::default();
        with_color_escapes(self.colors, || event.record(&mut visitor));

        LogRecord {
            timestamp: Local::now(),
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message: visitor.message,
            fields: visitor.fields,
            prefix: String::new(),
        }
    }

    /// Filter and render a record. `None` when a filter dropped it.
    pub fn format_record(&self, mut record: LogRecord) -> Option<String> {
        if !self.pipeline.apply(&mut record) {
            return None;
        }

        let line = record.render(&self.timestamp_format);
        if self.replace_newlines {
            Some(sanitize_newlines(&line).into_owned())
        } else {
            Some(line)
        }
    }
}

impl<S, N> FormatEvent<S, N> for LineFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        match self.format_record(self.record_for(event)) {
            Some(line) => writeln!(writer, "{line}"),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
struct RecordVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl Visit for RecordVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            self.fields.push((field.name().to_string(), value.to_string()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            self.fields.push((field.name().to_string(), format!("{value:?}")));
        }
    }
}
