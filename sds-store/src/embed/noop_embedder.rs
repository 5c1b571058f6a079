use crate::{EmbeddingsProvider, SdsStoreError};
use std::{future::Future, pin::Pin};

/// Provider stub that always fails; useful where an embedding call would be
/// a logic error (and in tests exercising error paths).
#[derive(Clone)]
pub struct NoopEmbedder;

impl EmbeddingsProvider for NoopEmbedder {
    fn embed<'a>(
        &'a self,
        _text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, SdsStoreError>> + Send + 'a>> {
        Box::pin(async { Err(SdsStoreError::MissingEmbedding) })
    }
}
