//! Local CSV destination.
//!
//! The file is opened, appended and released on every single write; no handle
//! is kept between turns. The header is written only when the file does not
//! exist yet or is empty, so any number of process restarts still yields
//! exactly one header row.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::{future::Future, pin::Pin};

use tracing::debug;

use crate::error::ChatLogError;
use crate::sanitize::{HEADER, entry_row};
use crate::{ChatLogEntry, ChatLogSink};

/// Append-only CSV log file.
pub struct CsvFileSink {
    path: PathBuf,
}

impl CsvFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append_sync(&self, entry: &ChatLogEntry) -> Result<(), ChatLogError> {
        let needs_header = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            debug!("writing header row to fresh csv log {:?}", self.path);
            writer.write_record(HEADER)?;
        }
        writer.write_record(entry_row(entry))?;
        writer.flush()?;

        Ok(())
    }
}

impl ChatLogSink for CsvFileSink {
    fn name(&self) -> &str {
        "csv-file"
    }

    fn append<'a>(
        &'a self,
        entry: &'a ChatLogEntry,
    ) -> Pin<Box<dyn Future<Output = Result<(), ChatLogError>> + Send + 'a>> {
        Box::pin(async move { self.append_sync(entry) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: usize) -> ChatLogEntry {
        ChatLogEntry::new(
            vec!["ACETONE".into()],
            format!("question {n}"),
            format!("answer {n}"),
            vec![format!("X{n}.HTM")],
        )
    }

    #[tokio::test]
    async fn header_written_once_across_restarts() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("chat_log.csv");

        // Each turn uses a fresh sink instance, simulating process restarts.
        for n in 0..3 {
            let sink = CsvFileSink::new(&path);
            sink.append(&entry(n)).await.unwrap();
        }

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "timestamp,selected_substances,question,answer,retrieved_files"
        );
        for (n, line) in lines[1..].iter().enumerate() {
            assert!(line.contains(&format!("question {n}")));
            assert!(line.contains(&format!("X{n}.HTM")));
        }
    }

    #[tokio::test]
    async fn sanitized_fields_never_break_rows() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("chat_log.csv");
        let sink = CsvFileSink::new(&path);

        let mut e = entry(0);
        e.question = "multi\nline, with commas".into();
        sink.append(&e).await.unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("multi line with commas"));
    }
}
