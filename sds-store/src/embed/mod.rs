//! Embedding-provider seam used by ingestion and retrieval.
//!
//! Async is required because real providers (Ollama, OpenRouter) perform
//! HTTP requests.

use crate::errors::SdsStoreError;
use std::{future::Future, pin::Pin};

/// Provider interface for embedding generation.
///
/// Implement this trait to plug in your own embedding backend (e.g., Ollama,
/// OpenAI-compatible APIs, local models).
pub trait EmbeddingsProvider: Send + Sync {
    /// Async embedding function.
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, SdsStoreError>> + Send + 'a>>;
}

pub mod llm_embedder;
pub mod noop_embedder;

pub use llm_embedder::LlmEmbedder;
pub use noop_embedder::NoopEmbedder;
