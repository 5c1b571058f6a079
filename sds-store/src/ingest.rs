//! Ingestion upsert: parsed records → embedded points → Qdrant.
//!
//! The caller hands over the full set of valid records for one ingestion run
//! (empty bodies already filtered out). Embeddings are computed per record,
//! the collection is created on first use, and the whole set is upserted in
//! batches. Point ids are deterministic, so re-ingesting a file replaces its
//! point instead of appending a duplicate.

use crate::config::{SdsStoreConfig, VectorSpace};
use crate::embed::EmbeddingsProvider;
use crate::errors::SdsStoreError;
use crate::qdrant_facade::QdrantFacade;
use crate::record::{SOURCE_TAG, SheetRecord};

use qdrant_client::qdrant::{PointId, PointStruct, Value as QValue, Vector, Vectors, value, vectors};
use services::uuid::stable_uuid;
use std::collections::HashMap;
use tracing::{info, warn};

/// Indexes one batch of records into the configured collection.
///
/// An empty batch is skipped with a warning; this is not an error.
///
/// # Errors
/// Returns errors on embedding failures, vector size mismatch, or Qdrant
/// failures.
pub async fn index_records(
    cfg: &SdsStoreConfig,
    client: &QdrantFacade,
    records: Vec<SheetRecord>,
    provider: &dyn EmbeddingsProvider,
) -> Result<u64, SdsStoreError> {
    if records.is_empty() {
        warn!("No records to index; skipping upsert");
        return Ok(0);
    }

    let (points, vector_size) = build_points(&records, cfg.embedding_dim, provider).await?;

    client
        .ensure_collection(&VectorSpace {
            size: vector_size,
            distance: cfg.distance,
        })
        .await?;

    let mut total: u64 = 0;
    let batch_size = cfg.upsert_batch.max(1);
    for chunk in points.chunks(batch_size) {
        total += client.upsert_points(chunk.to_vec()).await?;
    }

    info!("Indexed {} records", total);
    Ok(total)
}

/// Builds Qdrant points for the batch, resolving embeddings via the
/// provider. Returns the points together with the established vector size.
///
/// The first embedded vector fixes the dimensionality when the config does
/// not; every later mismatch is an error.
async fn build_points(
    records: &[SheetRecord],
    expected_dim: Option<usize>,
    provider: &dyn EmbeddingsProvider,
) -> Result<(Vec<PointStruct>, usize), SdsStoreError> {
    let mut pts = Vec::with_capacity(records.len());
    let mut vector_size = expected_dim.unwrap_or(0);

    for r in records {
        let vector = provider.embed(&r.body).await?;
        if vector_size == 0 {
            vector_size = vector.len();
        }
        if vector.len() != vector_size {
            return Err(SdsStoreError::VectorSizeMismatch {
                got: vector.len(),
                want: vector_size,
            });
        }

        let mut payload: HashMap<String, QValue> = HashMap::new();
        payload.insert("text".into(), qstring(&r.body));
        payload.insert("file".into(), qstring(&r.origin_file));
        payload.insert("source".into(), qstring(SOURCE_TAG));
        payload.insert("eid".into(), qstring(&r.id));
        if let Some(substance) = &r.substance {
            payload.insert("substance".into(), qstring(substance));
        }

        let pid: PointId = stable_uuid(&r.id).to_string().into();

        let vectors = Vectors {
            vectors_options: Some(vectors::VectorsOptions::Vector(Vector {
                data: vector,
                indices: None,
                vectors_count: None,
                vector: None,
            })),
        };

        pts.push(PointStruct {
            id: Some(pid),
            payload,
            vectors: Some(vectors),
            ..Default::default()
        });
    }

    Ok((pts, vector_size))
}

/// Wraps a string into a Qdrant `Value`.
fn qstring(s: &str) -> QValue {
    QValue {
        kind: Some(value::Kind::StringValue(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::NoopEmbedder;
    use std::{future::Future, pin::Pin};

    /// Deterministic tiny embedder for offline tests.
    struct HashEmbedder;

    impl EmbeddingsProvider for HashEmbedder {
        fn embed<'a>(
            &'a self,
            text: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, SdsStoreError>> + Send + 'a>> {
            let seed = text.len() as f32;
            Box::pin(async move { Ok(vec![seed, 1.0, 0.0, -seed]) })
        }
    }

    fn record(id: &str, substance: Option<&str>) -> SheetRecord {
        SheetRecord {
            id: id.to_string(),
            substance: substance.map(|s| s.to_string()),
            origin_file: format!("{id}.HTM"),
            body: format!("safety sheet body for {id}"),
        }
    }

    fn payload_str(p: &HashMap<String, QValue>, key: &str) -> Option<String> {
        match &p.get(key)?.kind {
            Some(value::Kind::StringValue(s)) => Some(s.clone()),
            _ => None,
        }
    }

    #[tokio::test]
    async fn points_carry_canonical_payload() {
        let records = vec![record("X123", Some("ACETONE")), record("NT01", None)];
        let (pts, size) = build_points(&records, None, &HashEmbedder).await.unwrap();

        assert_eq!(pts.len(), 2);
        assert_eq!(size, 4);

        let p = &pts[0].payload;
        assert_eq!(payload_str(p, "file").as_deref(), Some("X123.HTM"));
        assert_eq!(payload_str(p, "source").as_deref(), Some(SOURCE_TAG));
        assert_eq!(payload_str(p, "eid").as_deref(), Some("X123"));
        assert_eq!(payload_str(p, "substance").as_deref(), Some("ACETONE"));

        // No title found → no substance key at all.
        assert!(pts[1].payload.get("substance").is_none());
    }

    #[tokio::test]
    async fn point_ids_are_stable_across_runs() {
        let records = vec![record("X123", Some("ACETONE"))];
        let (a, _) = build_points(&records, None, &HashEmbedder).await.unwrap();
        let (b, _) = build_points(&records, None, &HashEmbedder).await.unwrap();
        assert_eq!(a[0].id, b[0].id);
    }

    #[tokio::test]
    async fn dimension_mismatch_is_rejected() {
        let records = vec![record("X123", None)];
        let err = build_points(&records, Some(8), &HashEmbedder)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SdsStoreError::VectorSizeMismatch { got: 4, want: 8 }
        ));
    }

    #[tokio::test]
    async fn provider_failure_propagates() {
        let records = vec![record("X123", None)];
        let err = build_points(&records, None, &NoopEmbedder).await.unwrap_err();
        assert!(matches!(err, SdsStoreError::MissingEmbedding));
    }
}
