//! Runtime and collection configuration.

use crate::errors::SdsStoreError;

/// Distance function used for the vector space.
#[derive(Clone, Copy, Debug)]
pub enum DistanceKind {
    /// Cosine distance (recommended for most embeddings).
    Cosine,
    /// Dot product (useful for normalized vectors).
    Dot,
    /// Euclidean distance (L2).
    Euclid,
}

/// Describes the vector space of the collection.
#[derive(Clone, Debug)]
pub struct VectorSpace {
    /// Dimensionality of vectors.
    pub size: usize,
    /// Distance function.
    pub distance: DistanceKind,
}

/// Configuration for safety-sheet ingestion and retrieval.
#[derive(Clone, Debug)]
pub struct SdsStoreConfig {
    /// Qdrant HTTP endpoint, e.g. `http://localhost:6334`.
    pub qdrant_url: String,
    /// Optional API key for Qdrant Cloud.
    pub qdrant_api_key: Option<String>,
    /// Target collection name.
    pub collection: String,
    /// Distance function (Cosine by default).
    pub distance: DistanceKind,
    /// Upsert batch size (typical range: 128..512).
    pub upsert_batch: usize,
    /// Expected embedding dimensionality; inferred from the first embedded
    /// record when unset.
    pub embedding_dim: Option<usize>,
    /// Exact search flag (false = HNSW ANN).
    pub exact_search: bool,
}

impl SdsStoreConfig {
    /// Creates a sane default config for a given collection name and Qdrant
    /// endpoint.
    pub fn new_default(url: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            qdrant_url: url.into(),
            qdrant_api_key: None,
            collection: collection.into(),
            distance: DistanceKind::Cosine,
            upsert_batch: 256,
            embedding_dim: None,
            exact_search: false,
        }
    }

    /// Builds the config from environment variables.
    ///
    /// - `QDRANT_URL` (default `http://127.0.0.1:6334`)
    /// - `QDRANT_API_KEY` (optional)
    /// - `SDS_COLLECTION` (default `safety_sheets`)
    /// - `QDRANT_BATCH_SIZE` (default 256)
    /// - `EMBEDDING_DIM` (optional)
    /// - `SDS_EXACT_SEARCH` (default false)
    pub fn from_env() -> Self {
        let env = |k: &str, dflt: &str| std::env::var(k).unwrap_or_else(|_| dflt.to_string());

        Self {
            qdrant_url: env("QDRANT_URL", "http://127.0.0.1:6334"),
            qdrant_api_key: std::env::var("QDRANT_API_KEY").ok(),
            collection: env("SDS_COLLECTION", "safety_sheets"),
            distance: DistanceKind::Cosine,
            upsert_batch: std::env::var("QDRANT_BATCH_SIZE")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(256),
            embedding_dim: std::env::var("EMBEDDING_DIM")
                .ok()
                .and_then(|s| s.parse::<usize>().ok()),
            exact_search: env("SDS_EXACT_SEARCH", "false") == "true",
        }
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), SdsStoreError> {
        if self.qdrant_url.trim().is_empty() {
            return Err(SdsStoreError::Config("qdrant_url is empty".into()));
        }
        if self.collection.trim().is_empty() {
            return Err(SdsStoreError::Config("collection is empty".into()));
        }
        if self.upsert_batch == 0 {
            return Err(SdsStoreError::Config("upsert_batch must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_blank_fields() {
        let mut cfg = SdsStoreConfig::new_default("http://127.0.0.1:6334", "safety_sheets");
        assert!(cfg.validate().is_ok());

        cfg.collection = " ".into();
        assert!(cfg.validate().is_err());
    }
}
