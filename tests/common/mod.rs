//! Shared utilities for integration tests.

use std::io;
use std::sync::{Arc, Mutex};

use logweave::LineFormatter;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;

/// In-memory log output.
#[derive(Clone, Default)]
pub struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Lines with the leading default-format timestamp removed.
    pub fn bodies(&self) -> Vec<String> {
        self.text()
            .lines()
            .map(|line| line.get(20..).unwrap_or(line).to_string())
            .collect()
    }
}

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Capture {
    type Writer = Capture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Route this thread's events through `formatter` into a fresh capture.
#[allow(dead_code)]
pub fn capture_with(formatter: LineFormatter) -> (Capture, DefaultGuard) {
    let out = Capture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .event_format(formatter)
        .with_writer(out.clone())
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (out, guard)
}

/// Plain and colored outputs fed by the same events.
#[allow(dead_code)]
pub fn capture_plain_and_colored(base: impl Fn() -> LineFormatter) -> (Capture, Capture, DefaultGuard) {
    let plain = Capture::default();
    let colored = Capture::default();
    let subscriber = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(base().with_colors(false))
                .with_writer(plain.clone()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(base().with_colors(true))
                .with_writer(colored.clone()),
        );
    let guard = tracing::subscriber::set_default(subscriber);
    (plain, colored, guard)
}
