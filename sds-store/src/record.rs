//! Core data models used by the library.

use serde::{Deserialize, Serialize};

/// Fixed source tag stored with every record.
pub const SOURCE_TAG: &str = "ICSC";

/// Canonical record stored in Qdrant, produced by the ingestion parser.
///
/// `id` is the source filename stem; records with an empty `body` must be
/// filtered out before indexing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SheetRecord {
    pub id: String,
    /// Substance title; `None` when the parser found no title.
    pub substance: Option<String>,
    /// Source file name, e.g. `X123.HTM`.
    pub origin_file: String,
    /// Full visible text of the sheet with the title removed.
    pub body: String,
}

/// A single retrieval hit with score, text and sheet metadata.
#[derive(Clone, Debug)]
pub struct SheetHit {
    pub score: f32,
    pub text: String,
    pub substance: Option<String>,
    pub origin_file: Option<String>,
}

/// Exact-match scope on the `substance` payload field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubstanceFilter {
    pub substance: String,
}

/// Derives the session substance snapshot from raw point payloads: every
/// distinct `substance` value, sorted, de-duplicated.
pub fn substance_snapshot(payloads: &[serde_json::Value]) -> Vec<String> {
    let mut out: Vec<String> = payloads
        .iter()
        .filter_map(|p| p.get("substance").and_then(|v| v.as_str()))
        .map(|s| s.to_string())
        .collect();
    out.sort();
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn snapshot_sorts_and_dedups() {
        let payloads = vec![
            json!({"substance": "ETHANOL", "file": "E1.HTM"}),
            json!({"substance": "ACETONE", "file": "A1.HTM"}),
            json!({"file": "NO_TITLE.HTM"}),
            json!({"substance": "ACETONE", "file": "A2.HTM"}),
        ];
        assert_eq!(substance_snapshot(&payloads), vec!["ACETONE", "ETHANOL"]);
    }

    #[test]
    fn snapshot_of_nothing_is_empty() {
        assert!(substance_snapshot(&[]).is_empty());
    }
}
