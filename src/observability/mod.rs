//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! tracing macros (all modules, any task)
//!     → EnvFilter (global directives)
//!     → fmt layers, one per output, each with its own LineFormatter:
//!         stderr      (colors per config, stderr_level)
//!         color file  (colors per config)
//!         plain file  (never colored)
//! ```
//!
//! # Design Decisions
//! - One formatter type for every output; outputs differ only in options
//! - Records are annotated per output, so a filter on one output never
//!   affects another

pub mod formatter;
pub mod logging;

pub use formatter::LineFormatter;
pub use logging::{build_subscriber, init, InitError};
