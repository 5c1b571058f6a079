//! Retrieval engine: one or more scoped top-K searches, merged in order.

use sds_store::{EmbeddingsProvider, SdsStore, SheetHit, SubstanceFilter};
use tracing::{debug, trace};

use crate::error::ChatError;

/// Hits requested per similarity search. Fixed: one unscoped search, or one
/// search per selected substance.
pub const TOP_K: u64 = 3;

/// Embeds the question once and runs the search plan.
///
/// - No filters: a single unscoped top-K search over the whole collection.
/// - Filters: one scoped top-K search per filter value, issued in
///   filter-input order; the per-filter results are concatenated in that
///   same order with no cross-filter de-duplication.
///
/// # Errors
/// Propagates embedding and store failures.
pub async fn retrieve_scoped(
    store: &SdsStore,
    embedder: &dyn EmbeddingsProvider,
    question: &str,
    filters: &[String],
    rerank: bool,
) -> Result<Vec<SheetHit>, ChatError> {
    trace!("retrieve_scoped filters={}", filters.len());
    let query_vector = embedder.embed(question).await?;

    let mut groups = Vec::with_capacity(filters.len().max(1));
    if filters.is_empty() {
        groups.push(store.search(query_vector, TOP_K, None).await?);
    } else {
        for substance in filters {
            let filter = SubstanceFilter {
                substance: substance.clone(),
            };
            groups.push(
                store
                    .search(query_vector.clone(), TOP_K, Some(&filter))
                    .await?,
            );
        }
    }

    let merged = merge_groups(groups, rerank);
    debug!("retrieve_scoped merged hits={}", merged.len());
    Ok(merged)
}

/// Concatenates per-search hit groups, preserving group order and in-group
/// score order. With `rerank` the concatenation is instead sorted globally
/// by descending score.
pub fn merge_groups(groups: Vec<Vec<SheetHit>>, rerank: bool) -> Vec<SheetHit> {
    let mut out: Vec<SheetHit> = groups.into_iter().flatten().collect();
    if rerank {
        out.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(substance: &str, score: f32) -> SheetHit {
        SheetHit {
            score,
            text: format!("{substance} passage"),
            substance: Some(substance.to_string()),
            origin_file: Some(format!("{substance}.HTM")),
        }
    }

    #[test]
    fn merged_sequence_keeps_filter_input_order() {
        let acetone = vec![hit("ACETONE", 0.4), hit("ACETONE", 0.3), hit("ACETONE", 0.2)];
        let ethanol = vec![hit("ETHANOL", 0.9), hit("ETHANOL", 0.8)];

        let merged = merge_groups(vec![acetone, ethanol], false);

        assert!(merged.len() <= 6);
        assert_eq!(merged.len(), 5);
        // Every ACETONE hit precedes the first ETHANOL hit, even though the
        // ETHANOL scores are higher.
        let first_ethanol = merged
            .iter()
            .position(|h| h.substance.as_deref() == Some("ETHANOL"))
            .unwrap();
        assert_eq!(first_ethanol, 3);
        assert!(
            merged[..first_ethanol]
                .iter()
                .all(|h| h.substance.as_deref() == Some("ACETONE"))
        );
    }

    #[test]
    fn rerank_flag_sorts_globally_by_score() {
        let acetone = vec![hit("ACETONE", 0.4)];
        let ethanol = vec![hit("ETHANOL", 0.9)];

        let merged = merge_groups(vec![acetone, ethanol], true);
        assert_eq!(merged[0].substance.as_deref(), Some("ETHANOL"));
        assert_eq!(merged[1].substance.as_deref(), Some("ACETONE"));
    }

    #[test]
    fn empty_groups_merge_to_empty() {
        assert!(merge_groups(vec![vec![], vec![]], false).is_empty());
    }
}
