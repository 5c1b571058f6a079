//! Retrieval helpers: one scoped (or unscoped) similarity search.

use crate::errors::SdsStoreError;
use crate::filters::to_qdrant_filter;
use crate::qdrant_facade::QdrantFacade;
use crate::record::{SheetHit, SubstanceFilter};

use tracing::trace;

/// Runs one top-K search for a ready query vector and maps payloads into
/// [`SheetHit`]s, preserving the store's score order.
///
/// # Errors
/// Returns `SdsStoreError::Qdrant` on client failures.
pub async fn search_scoped(
    client: &QdrantFacade,
    query_vector: Vec<f32>,
    top_k: u64,
    filter: Option<&SubstanceFilter>,
) -> Result<Vec<SheetHit>, SdsStoreError> {
    trace!(
        "retrieve::search_scoped top_k={top_k} scoped={}",
        filter.is_some()
    );

    let qfilter = filter.map(to_qdrant_filter);
    let raw = client.search(query_vector, top_k, qfilter).await?;

    let out = raw
        .into_iter()
        .map(|(score, payload)| hit_from_payload(score, &payload))
        .collect::<Vec<_>>();

    trace!("retrieve::search_scoped hits={}", out.len());
    Ok(out)
}

/// Maps one `(score, payload)` pair into a [`SheetHit`].
fn hit_from_payload(score: f32, payload: &serde_json::Value) -> SheetHit {
    let text = payload
        .get("text")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    let substance = payload
        .get("substance")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());
    let origin_file = payload
        .get("file")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    SheetHit {
        score,
        text,
        substance,
        origin_file,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_maps_to_hit() {
        let payload = json!({
            "text": "Highly flammable liquid and vapour.",
            "substance": "ACETONE",
            "source": "ICSC",
            "file": "X123.HTM",
            "eid": "X123",
        });
        let hit = hit_from_payload(0.87, &payload);
        assert_eq!(hit.text, "Highly flammable liquid and vapour.");
        assert_eq!(hit.substance.as_deref(), Some("ACETONE"));
        assert_eq!(hit.origin_file.as_deref(), Some("X123.HTM"));
    }

    #[test]
    fn missing_metadata_maps_to_none() {
        let payload = json!({ "text": "orphan chunk" });
        let hit = hit_from_payload(0.1, &payload);
        assert!(hit.substance.is_none());
        assert!(hit.origin_file.is_none());
    }
}
