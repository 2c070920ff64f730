//! Logging techniques for `tracing` applications.
//!
//! - newline escaping in the line formatter
//! - task-scoped prefixes for interleaved concurrent logs
//! - type-directed argument coloring
//! - subprocess exec auditing and streamed child output

pub mod config;
pub mod observability;
pub mod pipeline;
pub mod process;
pub mod style;

pub use config::LogConfig;
pub use observability::LineFormatter;
pub use pipeline::{log_prefix, with_log_prefix, LogRecord};
pub use style::{lg, lg_path, Color, Format};
