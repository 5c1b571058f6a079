//! Typed error for the ingestion crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    /// I/O or filesystem errors while scanning the input directory.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors from the underlying sds-store crate.
    #[error("store error: {0}")]
    Store(#[from] sds_store::SdsStoreError),
}
