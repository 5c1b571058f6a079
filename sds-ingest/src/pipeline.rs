//! Directory-batch ingestion: scan → parse → gather valid records → upsert.
//!
//! The batch is tolerant: unreadable files and empty documents are skipped
//! with a warning and processing continues. The upsert itself is a single
//! idempotent run handled by `sds-store`.

use std::fs;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use sds_store::{EmbeddingsProvider, SdsStore, SheetRecord};
use tracing::{info, warn};

use crate::errors::IngestError;
use crate::parser;

/// Outcome of one ingestion run.
#[derive(Clone, Copy, Debug, Default)]
pub struct IngestReport {
    /// Files found with the sheet extension.
    pub found: usize,
    /// Records skipped because the extracted body was empty.
    pub skipped_empty: usize,
    /// Records acknowledged by the store upsert.
    pub indexed: u64,
}

/// Ingests every `.HTM` sheet under `dir` into the store.
///
/// # Errors
/// Returns [`IngestError::Io`] when the directory itself cannot be read and
/// [`IngestError::Store`] on upsert failures. Per-file problems are
/// warnings, not errors.
pub async fn ingest_dir(
    dir: impl AsRef<Path>,
    store: &SdsStore,
    provider: &dyn EmbeddingsProvider,
) -> Result<IngestReport, IngestError> {
    let files = sheet_files(dir.as_ref())?;
    info!("{} safety-sheet files found in {:?}", files.len(), dir.as_ref());

    let (records, skipped_empty) = gather_records(&files);

    let indexed = store.index_records(records, provider).await?;

    let report = IngestReport {
        found: files.len(),
        skipped_empty,
        indexed,
    };
    info!(
        "Ingestion run complete: found={} skipped_empty={} indexed={}",
        report.found, report.skipped_empty, report.indexed
    );
    Ok(report)
}

/// Lists sheet files (`.HTM`, case-insensitive) in `dir`, sorted by name for
/// a deterministic batch order.
fn sheet_files(dir: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut out = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type()?.is_file() {
            continue;
        }
        let is_sheet = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("htm"));
        if is_sheet {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

/// Parses each file and gathers the valid records; returns the records and
/// the number of empty documents that were skipped.
fn gather_records(files: &[PathBuf]) -> (Vec<SheetRecord>, usize) {
    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})",
        )
        .expect("static progress template")
        .progress_chars("##-"),
    );

    let mut records = Vec::with_capacity(files.len());
    let mut skipped_empty = 0usize;

    for path in files {
        pb.inc(1);

        let raw = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Skipping unreadable file {:?}: {e}", path);
                continue;
            }
        };

        let origin_file = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => {
                warn!("Skipping file with non-UTF-8 name: {:?}", path);
                continue;
            }
        };
        let id = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(origin_file.as_str())
            .to_string();

        let parsed = parser::parse_sheet_bytes(&raw);
        if parsed.body.is_empty() {
            warn!("Empty document for {origin_file}");
            skipped_empty += 1;
            continue;
        }

        records.push(SheetRecord {
            id,
            substance: parsed.substance,
            origin_file,
            body: parsed.body,
        });
    }

    pb.finish_and_clear();
    (records, skipped_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, contents: &[u8]) {
        let mut f = fs::File::create(dir.join(name)).unwrap();
        f.write_all(contents).unwrap();
    }

    #[test]
    fn only_htm_files_are_listed_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        write_file(tmp.path(), "B200.HTM", b"<b>B</b>");
        write_file(tmp.path(), "A100.htm", b"<b>A</b>");
        write_file(tmp.path(), "notes.txt", b"ignore me");

        let files = sheet_files(tmp.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["A100.htm", "B200.HTM"]);
    }

    #[test]
    fn empty_documents_are_skipped_not_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        write_file(
            tmp.path(),
            "X123.HTM",
            b"<html><body><font size=\"3\">ACETONE</font><p>Flammable.</p></body></html>",
        );
        // Title only: the extracted body is empty after removal.
        write_file(
            tmp.path(),
            "X999.HTM",
            b"<html><body><font size=\"3\">ETHANOL</font></body></html>",
        );

        let files = sheet_files(tmp.path()).unwrap();
        let (records, skipped) = gather_records(&files);

        assert_eq!(skipped, 1);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "X123");
        assert_eq!(records[0].origin_file, "X123.HTM");
        assert_eq!(records[0].substance.as_deref(), Some("ACETONE"));
        assert_eq!(records[0].body, "Flammable.");
    }
}
