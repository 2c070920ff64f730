//! Log-record annotation pipeline.
//!
//! # Data Flow
//! ```text
//! tracing::Event
//!     → LogRecord (record.rs)
//!     → filters in order, e.g. PrefixFilter (prefix.rs)
//!     → render: message interpolated with argument styles (crate::style)
//!     → sanitize_newlines on the rendered line (sanitize.rs)
//!     → writer
//! ```
//!
//! # Design Decisions
//! - Stages share no state; composing them is sequential application
//! - A filter may veto a record, which drops it from that output only
//! - Sanitizing runs last so newlines coming from arguments are caught too

pub mod prefix;
pub mod record;
pub mod sanitize;

pub use prefix::{current_prefix, inherit_prefix, log_prefix, spawn_with_prefix, with_log_prefix, PrefixFilter};
pub use record::LogRecord;
pub use sanitize::{sanitize_newlines, NEWLINE_PLACEHOLDER};

/// A stage that annotates a record before it is rendered.
pub trait RecordFilter: Send + Sync {
    /// Annotate `record`. Returning `false` drops it.
    fn filter(&self, record: &mut LogRecord) -> bool;
}

impl<F> RecordFilter for F
where
    F: Fn(&mut LogRecord) -> bool + Send + Sync,
{
    fn filter(&self, record: &mut LogRecord) -> bool {
        self(record)
    }
}

/// An ordered chain of filters.
#[derive(Default)]
pub struct Pipeline {
    filters: Vec<Box<dyn RecordFilter>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, filter: impl RecordFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn push(&mut self, filter: impl RecordFilter + 'static) {
        self.filters.push(Box::new(filter));
    }

    /// Run every filter in order. Stops at the first veto.
    pub fn apply(&self, record: &mut LogRecord) -> bool {
        self.filters.iter().all(|filter| filter.filter(record))
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline").field("filters", &self.filters.len()).finish()
    }
}
