//! Embedding retrieval over the indicator catalog.
//!
//! The catalog is rendered into one document per indicator (name + unit +
//! code-derived dimension words + source prose), embedded via Ollama, and
//! stored in a Qdrant collection. Query side: synonym-expand the query
//! terms, embed, and return the top-K `(indicator_id, similarity)` pairs.
//!
//! This crate performs no resolution logic — the resolver treats its output
//! as an opaque ranked candidate list.

mod config;
mod corpus;
mod embed;
mod errors;
mod qdrant;

pub use config::IndexConfig;
pub use corpus::{expand_query, indicator_document};
pub use embed::OllamaEmbedder;
pub use errors::IndexError;
pub use qdrant::IndexStore;

use catalogs::IndicatorCatalog;
use tracing::{info, instrument};

/// Embedding index facade: one embedder + one vector collection.
pub struct IndicatorIndex {
    store: IndexStore,
    embedder: OllamaEmbedder,
    top_k: u64,
}

impl IndicatorIndex {
    /// Wires the embedder and vector store from config.
    pub fn new(cfg: &IndexConfig) -> Result<Self, IndexError> {
        Ok(Self {
            store: IndexStore::new(cfg)?,
            embedder: OllamaEmbedder::new(cfg)?,
            top_k: cfg.top_k,
        })
    }

    /// Configured candidate count per search.
    pub fn top_k(&self) -> u64 {
        self.top_k
    }

    /// Re-embeds the whole catalog and upserts it into the collection.
    ///
    /// Returns the number of indexed indicators. Deterministic point ids
    /// make this idempotent: running it twice converges to the same
    /// collection state.
    #[instrument(skip_all)]
    pub async fn reindex(&self, catalog: &IndicatorCatalog) -> Result<usize, IndexError> {
        self.store.ensure_collection(self.embedder.dim()).await?;

        let mut points = Vec::with_capacity(catalog.len());
        for meta in catalog.rows() {
            let doc = indicator_document(meta);
            let vector = self.embedder.embed(&doc).await?;
            points.push(IndexStore::indicator_point(&meta.id, vector));
        }

        let count = points.len();
        self.store.upsert_points(points).await?;
        info!("Indexed {} indicator documents", count);
        Ok(count)
    }

    /// Searches the collection for the query terms.
    ///
    /// The query is synonym-expanded before embedding; results come back as
    /// `(indicator_id, similarity)` in descending similarity order,
    /// deduplicated by id.
    #[instrument(skip_all, fields(top_k = top_k))]
    pub async fn search(
        &self,
        query: &str,
        top_k: u64,
    ) -> Result<Vec<(String, f32)>, IndexError> {
        let expanded = expand_query(query);
        let vector = self.embedder.embed(&expanded).await?;
        self.store.search(vector, top_k).await
    }
}
