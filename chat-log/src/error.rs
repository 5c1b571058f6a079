//! Typed error for the chat-log crate.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatLogError {
    /// Filesystem errors while opening or appending the log file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization errors.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// HTTP/transport errors when calling the Sheets API.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the Sheets API.
    #[error("sheets API returned {status}: {body}")]
    Sheets { status: StatusCode, body: String },
}
