//! High-level safety-sheet store facade: ingestion + retrieval over Qdrant.
//!
//! This crate provides a clean API to:
//! - Index parsed safety-sheet records (embedding resolved on the fly)
//! - Run top-K similarity searches, optionally scoped to one substance
//! - Materialize the substance-list snapshot for a session
//!
//! The design is flat (no deep nesting) and splits responsibilities into
//! focused modules.

mod config;
mod errors;
mod filters;
mod ingest;
mod qdrant_facade;
mod record;
mod retrieve;

pub mod embed;

pub use config::{DistanceKind, SdsStoreConfig, VectorSpace};
pub use embed::EmbeddingsProvider;
pub use errors::SdsStoreError;
pub use record::{SOURCE_TAG, SheetHit, SheetRecord, SubstanceFilter, substance_snapshot};

use tracing::{debug, trace};

/// High-level facade that wires configuration and the Qdrant client.
///
/// This is the single entry point recommended for application code.
pub struct SdsStore {
    cfg: SdsStoreConfig,
    client: qdrant_facade::QdrantFacade,
}

impl SdsStore {
    /// Constructs a new store from the given configuration.
    ///
    /// # Errors
    /// Returns `SdsStoreError::Config` if the client initialization fails.
    pub fn new(cfg: SdsStoreConfig) -> Result<Self, SdsStoreError> {
        trace!("SdsStore::new collection={}", cfg.collection);
        let client = qdrant_facade::QdrantFacade::new(&cfg)?;
        Ok(Self { cfg, client })
    }

    /// Indexes a batch of parsed records in one idempotent upsert run.
    ///
    /// The collection is created on first use; records sharing an id with an
    /// existing point wholesale-replace it (vector + payload). An empty batch
    /// is skipped with a warning and reports `0`.
    ///
    /// # Errors
    /// Returns errors on embedding failures, vector size mismatch, or Qdrant
    /// failures.
    pub async fn index_records(
        &self,
        records: Vec<SheetRecord>,
        provider: &dyn EmbeddingsProvider,
    ) -> Result<u64, SdsStoreError> {
        debug!("SdsStore::index_records count={}", records.len());
        ingest::index_records(&self.cfg, &self.client, records, provider).await
    }

    /// Runs one top-K similarity search for a ready query vector, optionally
    /// scoped by an exact-match substance filter.
    ///
    /// # Errors
    /// Returns `SdsStoreError::Qdrant` if the search fails.
    pub async fn search(
        &self,
        query_vector: Vec<f32>,
        top_k: u64,
        filter: Option<&SubstanceFilter>,
    ) -> Result<Vec<SheetHit>, SdsStoreError> {
        trace!("SdsStore::search top_k={top_k} scoped={}", filter.is_some());
        retrieve::search_scoped(&self.client, query_vector, top_k, filter).await
    }

    /// Materializes the substance-list snapshot: every distinct `substance`
    /// payload value in the collection, sorted, de-duplicated.
    ///
    /// Rebuilt once per session (or after an ingestion run); never refreshed
    /// mid-turn.
    ///
    /// # Errors
    /// Returns `SdsStoreError::Qdrant` if the scroll fails.
    pub async fn substances(&self) -> Result<Vec<String>, SdsStoreError> {
        let payloads = self.client.scroll_all_payloads().await?;
        Ok(substance_snapshot(&payloads))
    }
}
