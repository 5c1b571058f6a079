//! Runtime configuration loaded from environment variables.

use sds_store::SdsStoreConfig;

/// Config bag for the gateway. All fields have defaults via `from_env`.
#[derive(Clone, Debug)]
pub struct ChatConfig {
    /// Store config (Qdrant host, collection, batch size, …).
    pub store: SdsStoreConfig,

    /// When `true`, the concatenated multi-filter result is re-ranked
    /// globally by similarity score. Off by default: the merged sequence
    /// keeps filter-input order, one block of up to three hits per filter.
    pub rerank_across_filters: bool,
}

impl ChatConfig {
    /// Build from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self {
            store: SdsStoreConfig::from_env(),
            rerank_across_filters: env("CHAT_RERANK_ACROSS_FILTERS", "false") == "true",
        }
    }
}

fn env(k: &str, dflt: &str) -> String {
    std::env::var(k).unwrap_or_else(|_| dflt.to_string())
}
