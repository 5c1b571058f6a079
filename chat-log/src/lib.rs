//! Append-only chat-turn logging with interchangeable sinks.
//!
//! One [`ChatLogEntry`] per user turn is appended as one row to every
//! configured destination. The two destination kinds (local CSV file, remote
//! Google Sheets worksheet) are polymorphic implementations of the single
//! [`ChatLogSink`] capability and share the exact row shape, sanitization and
//! idempotent-header contract from [`sanitize`].

mod error;

pub mod csv_file;
pub mod sanitize;
pub mod spreadsheet;

pub use csv_file::CsvFileSink;
pub use error::ChatLogError;
pub use spreadsheet::SheetsSink;

use std::{future::Future, pin::Pin};

use chrono::{DateTime, Local};
use tracing::{debug, warn};

/// One chat turn, created once per user question and never mutated.
#[derive(Clone, Debug)]
pub struct ChatLogEntry {
    pub timestamp: DateTime<Local>,
    /// Substance filters active for the turn, in selection order.
    pub selected_substances: Vec<String>,
    pub question: String,
    pub answer: String,
    /// Origin files of the retrieved passages, in retrieval order.
    pub retrieved_files: Vec<String>,
}

impl ChatLogEntry {
    /// Stamps a new entry with the current local time.
    pub fn new(
        selected_substances: Vec<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
        retrieved_files: Vec<String>,
    ) -> Self {
        Self {
            timestamp: Local::now(),
            selected_substances,
            question: question.into(),
            answer: answer.into(),
            retrieved_files,
        }
    }
}

/// Append-one-record capability shared by every destination.
///
/// Implementations must honor the idempotent-header contract: the header row
/// is written only when the destination does not exist yet or is confirmed
/// empty; every other call appends exactly one data row.
pub trait ChatLogSink: Send + Sync {
    /// Short destination name used in logs.
    fn name(&self) -> &str;

    /// Appends one entry as one row.
    fn append<'a>(
        &'a self,
        entry: &'a ChatLogEntry,
    ) -> Pin<Box<dyn Future<Output = Result<(), ChatLogError>> + Send + 'a>>;
}

/// Fan-out over every configured sink.
///
/// Each sink is invoked unconditionally for every turn; a failing sink is
/// logged and isolated so it can never block the user-facing answer or the
/// other destinations.
#[derive(Default)]
pub struct ChatLogger {
    sinks: Vec<Box<dyn ChatLogSink>>,
}

impl ChatLogger {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    /// Registers one destination.
    pub fn push(&mut self, sink: Box<dyn ChatLogSink>) {
        self.sinks.push(sink);
    }

    /// Number of registered destinations.
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Appends the entry to every sink, isolating per-sink failures.
    pub async fn append_all(&self, entry: &ChatLogEntry) {
        for sink in &self.sinks {
            match sink.append(entry).await {
                Ok(()) => debug!("chat-log sink '{}' appended one row", sink.name()),
                Err(e) => warn!("chat-log sink '{}' failed: {e}", sink.name()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSink {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl ChatLogSink for CountingSink {
        fn name(&self) -> &str {
            "counting"
        }
        fn append<'a>(
            &'a self,
            _entry: &'a ChatLogEntry,
        ) -> Pin<Box<dyn Future<Output = Result<(), ChatLogError>> + Send + 'a>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let fail = self.fail;
            Box::pin(async move {
                if fail {
                    Err(ChatLogError::Io(std::io::Error::other("sink outage")))
                } else {
                    Ok(())
                }
            })
        }
    }

    #[tokio::test]
    async fn failing_sink_never_skips_the_others() {
        let broken = Arc::new(AtomicUsize::new(0));
        let healthy = Arc::new(AtomicUsize::new(0));

        let mut logger = ChatLogger::new();
        logger.push(Box::new(CountingSink {
            calls: broken.clone(),
            fail: true,
        }));
        logger.push(Box::new(CountingSink {
            calls: healthy.clone(),
            fail: false,
        }));

        let entry = ChatLogEntry::new(vec![], "q", "a", vec![]);
        logger.append_all(&entry).await;
        logger.append_all(&entry).await;

        // Both sinks saw both turns; the outage was isolated.
        assert_eq!(broken.load(Ordering::SeqCst), 2);
        assert_eq!(healthy.load(Ordering::SeqCst), 2);
    }
}
