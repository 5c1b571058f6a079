//! Unified error types for the crate.

use thiserror::Error;

/// Top-level error for sds-store operations.
#[derive(Debug, Error)]
pub enum SdsStoreError {
    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Mismatch in vector dimensionality across records.
    #[error("vector size mismatch: got {got}, want {want}")]
    VectorSizeMismatch { got: usize, want: usize },

    /// The configured provider cannot produce embeddings.
    #[error("missing embedding and no provider supplied")]
    MissingEmbedding,

    /// Embedding-provider failures (wrapped LLM service errors).
    #[error("embedding error: {0}")]
    Llm(#[from] ai_llm_service::AiLlmError),

    /// Qdrant client errors (wrapped).
    #[error("qdrant error: {0}")]
    Qdrant(String),
}
