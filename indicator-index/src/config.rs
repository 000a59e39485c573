//! Environment-driven configuration for the index.

/// Config bag for embedding and vector-store access. All fields have
/// defaults via [`IndexConfig::from_env`].
#[derive(Clone, Debug)]
pub struct IndexConfig {
    /// Ollama base URL serving the embedding model.
    pub ollama_url: String,
    /// Embedding model name.
    pub embed_model: String,
    /// Expected embedding dimensionality.
    pub embedding_dim: usize,
    /// Embedding request timeout.
    pub embed_timeout_secs: u64,

    /// Qdrant HTTP endpoint.
    pub qdrant_url: String,
    /// Optional API key for Qdrant Cloud.
    pub qdrant_api_key: Option<String>,
    /// Target collection name.
    pub collection: String,

    /// Candidate count fetched per search.
    pub top_k: u64,
}

impl IndexConfig {
    /// Build from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self {
            ollama_url: env("OLLAMA_URL", "http://127.0.0.1:11434"),
            embed_model: env("EMBED_MODEL", "nomic-embed-text"),
            embedding_dim: parse("EMBEDDING_DIM", 768usize),
            embed_timeout_secs: parse("EMBED_TIMEOUT_SECS", 30u64),

            qdrant_url: env("QDRANT_URL", "http://127.0.0.1:6334"),
            qdrant_api_key: std::env::var("QDRANT_API_KEY").ok(),
            collection: env("QDRANT_COLLECTION", "indicator_docs"),

            top_k: parse("SEARCH_TOP_K", 50u64),
        }
    }
}

fn env(k: &str, dflt: &str) -> String {
    std::env::var(k).unwrap_or_else(|_| dflt.to_string())
}

fn parse<T: std::str::FromStr>(k: &str, dflt: T) -> T {
    std::env::var(k)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(dflt)
}
