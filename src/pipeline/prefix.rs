//! Prefix injector.
//!
//! # Responsibilities
//! - Hold the ambient prefix for the current task (or thread)
//! - Nest scopes: an inner scope sees `outer + inner`
//! - Stamp the ambient prefix onto each record at emission time
//!
//! # Design Decisions
//! - Backed by a tokio task-local, so the prefix follows a task across
//!   `.await` points and never leaks to sibling tasks polled on the same thread
//! - Scope exit restores the previous value on every path: return, error,
//!   panic, and dropping the future before completion
//! - Spawned tasks start with no prefix; `inherit_prefix` opts them in

use std::future::Future;

use tokio::task::futures::TaskLocalFuture;
use tokio::task::JoinHandle;

use super::record::LogRecord;
use super::RecordFilter;

tokio::task_local! {
    static PREFIX: String;
}

/// The prefix in effect for the current task. Empty outside any scope.
pub fn current_prefix() -> String {
    PREFIX.try_with(Clone::clone).unwrap_or_default()
}

fn extend_current(prefix: &str) -> String {
    let mut scoped = current_prefix();
    scoped.push_str(prefix);
    scoped
}

/// Run `future` with `prefix` appended to the current prefix.
///
/// The current prefix is captured when this function is called.
///
/// Tasks started with a plain `tokio::spawn` inside the scope log with an
/// empty prefix; use [`spawn_with_prefix`] or [`inherit_prefix`] to keep it.
///
/// ```
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// use logweave::pipeline::prefix::{current_prefix, log_prefix};
///
/// let seen = log_prefix("[numbers] ", async { current_prefix() }).await;
/// assert_eq!(seen, "[numbers] ");
/// assert_eq!(current_prefix(), "");
/// # }
/// ```
pub fn log_prefix<F: Future>(prefix: impl AsRef<str>, future: F) -> TaskLocalFuture<String, F> {
    PREFIX.scope(extend_current(prefix.as_ref()), future)
}

/// Run `f` with `prefix` appended to the current prefix.
pub fn with_log_prefix<R>(prefix: impl AsRef<str>, f: impl FnOnce() -> R) -> R {
    PREFIX.sync_scope(extend_current(prefix.as_ref()), f)
}

/// Carry the caller's prefix into a future that will run as its own task.
pub fn inherit_prefix<F: Future>(future: F) -> TaskLocalFuture<String, F> {
    PREFIX.scope(current_prefix(), future)
}

/// `tokio::spawn` a future that keeps the caller's prefix.
pub fn spawn_with_prefix<F>(future: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    tokio::spawn(inherit_prefix(future))
}

/// Writes the ambient prefix into `LogRecord::prefix`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixFilter;

impl RecordFilter for PrefixFilter {
    fn filter(&self, record: &mut LogRecord) -> bool {
        record.prefix = current_prefix();
        true
    }
}
