//! Embedding provider backed by the shared LLM service profiles.

use std::sync::Arc;

use crate::{EmbeddingsProvider, SdsStoreError};
use ai_llm_service::service_profiles::LlmServiceProfiles;

/// Embedding provider that delegates to the `embedding` profile of
/// [`LlmServiceProfiles`].
#[derive(Clone)]
pub struct LlmEmbedder {
    svc: Arc<LlmServiceProfiles>,
    /// Expected embedding dimension; checked per call when set.
    dim: Option<usize>,
}

impl LlmEmbedder {
    /// Constructs a new embedder over the shared service.
    pub fn new(svc: Arc<LlmServiceProfiles>, dim: Option<usize>) -> Self {
        Self { svc, dim }
    }
}

impl EmbeddingsProvider for LlmEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Vec<f32>, SdsStoreError>> + Send + 'a>,
    > {
        Box::pin(async move {
            let vector = self.svc.embed(text).await?;

            if let Some(want) = self.dim {
                if vector.len() != want {
                    return Err(SdsStoreError::VectorSizeMismatch {
                        got: vector.len(),
                        want,
                    });
                }
            }

            Ok(vector)
        })
    }
}
