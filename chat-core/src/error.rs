//! Typed error for the chat-core crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    /// Errors from the underlying sds-store crate; query-embedding failures
    /// arrive here too, wrapped by the embedding provider.
    #[error("store error: {0}")]
    Store(#[from] sds_store::SdsStoreError),
}
