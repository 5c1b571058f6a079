//! Remote Google Sheets destination.
//!
//! Targets the first worksheet of a pre-existing spreadsheet through the
//! Sheets v4 values API. The bearer credential is handed in already resolved
//! and validated; this module never refreshes or inspects it. Before each
//! append the worksheet is probed and the header row is inserted only when it
//! has no rows at all.

use std::{future::Future, pin::Pin};

use serde_json::json;
use tracing::debug;

use crate::error::ChatLogError;
use crate::sanitize::{HEADER, entry_row};
use crate::{ChatLogEntry, ChatLogSink};

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Append-only Google Sheets log.
pub struct SheetsSink {
    http: reqwest::Client,
    base: String,
    spreadsheet_id: String,
    token: String,
}

impl SheetsSink {
    /// Builds a sink for one spreadsheet with an opaque, pre-validated
    /// bearer credential.
    pub fn new(spreadsheet_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: SHEETS_API_BASE.to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            token: token.into(),
        }
    }

    /// Overrides the API base URL (tests).
    #[doc(hidden)]
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    /// Probes the first worksheet; `true` when it holds no rows at all.
    async fn worksheet_is_empty(&self) -> Result<bool, ChatLogError> {
        let url = format!("{}/{}/values/A1:E1", self.base, self.spreadsheet_id);
        let resp = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ChatLogError::Sheets { status, body });
        }

        let value: serde_json::Value = resp.json().await?;
        Ok(values_are_empty(&value))
    }

    /// Appends one raw row after the current data region of the first
    /// worksheet.
    async fn append_values(&self, row: &[String]) -> Result<(), ChatLogError> {
        let url = format!(
            "{}/{}/values/A1:append?valueInputOption=RAW",
            self.base, self.spreadsheet_id
        );
        let body = json!({ "values": [row] });

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ChatLogError::Sheets { status, body });
        }

        Ok(())
    }

    async fn append_entry(&self, entry: &ChatLogEntry) -> Result<(), ChatLogError> {
        if self.worksheet_is_empty().await? {
            debug!(
                "inserting header row into empty worksheet of spreadsheet {}",
                self.spreadsheet_id
            );
            let header: Vec<String> = HEADER.iter().map(|c| c.to_string()).collect();
            self.append_values(&header).await?;
        }
        self.append_values(&entry_row(entry)).await
    }
}

impl ChatLogSink for SheetsSink {
    fn name(&self) -> &str {
        "google-sheets"
    }

    fn append<'a>(
        &'a self,
        entry: &'a ChatLogEntry,
    ) -> Pin<Box<dyn Future<Output = Result<(), ChatLogError>> + Send + 'a>> {
        Box::pin(self.append_entry(entry))
    }
}

/// A values response with no `values` key, or an empty list, means the
/// worksheet holds no rows.
fn values_are_empty(resp: &serde_json::Value) -> bool {
    resp.get("values")
        .and_then(|v| v.as_array())
        .map(|rows| rows.is_empty())
        .unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_values_key_means_empty_worksheet() {
        assert!(values_are_empty(&json!({"range": "Sheet1!A1:E1"})));
        assert!(values_are_empty(&json!({"values": []})));
        assert!(!values_are_empty(&json!({"values": [["timestamp"]]})));
    }
}
