//! Thin adapter around `qdrant-client` to isolate API usage.
//!
//! Concentrates all Qdrant interactions behind a minimal API so the rest of
//! the service stays decoupled from the client's builder patterns. One point
//! per indicator, keyed by a deterministic UUIDv5 of the indicator code, so
//! re-indexing upserts in place and search results are deduplicated by
//! construction.

use std::collections::HashMap;

use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointId, PointStruct, SearchPointsBuilder,
    UpsertPointsBuilder, Value as QValue, Vector, VectorParamsBuilder, Vectors, value, vectors,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::IndexConfig;
use crate::errors::IndexError;

/// Deterministic UUIDv5 from an indicator code.
fn stable_uuid(id: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, id.as_bytes())
}

/// Facade over the Qdrant client for the indicator collection.
pub struct IndexStore {
    client: Qdrant,
    collection: String,
}

impl IndexStore {
    /// Creates a new facade from the given configuration.
    pub fn new(cfg: &IndexConfig) -> Result<Self, IndexError> {
        let mut builder = Qdrant::from_url(&cfg.qdrant_url);
        if let Some(key) = &cfg.qdrant_api_key {
            builder = builder.api_key(key.clone());
        }
        let client = builder
            .build()
            .map_err(|e| IndexError::Qdrant(e.to_string()))?;

        Ok(Self {
            client,
            collection: cfg.collection.clone(),
        })
    }

    /// Ensures the collection exists, creating it with cosine distance when
    /// missing.
    pub async fn ensure_collection(&self, dim: usize) -> Result<(), IndexError> {
        match self.client.collection_info(&self.collection).await {
            Ok(_) => {
                debug!("Collection '{}' already exists", self.collection);
                return Ok(());
            }
            Err(err) => {
                warn!(
                    "Collection '{}' not found, will be created (error={})",
                    self.collection, err
                );
            }
        }

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection)
                    .vectors_config(VectorParamsBuilder::new(dim as u64, Distance::Cosine)),
            )
            .await
            .map_err(|e| IndexError::Qdrant(e.to_string()))?;

        info!("Collection '{}' created", self.collection);
        Ok(())
    }

    /// Builds the point for one indicator document.
    pub fn indicator_point(id: &str, vector: Vec<f32>) -> PointStruct {
        let pid: PointId = stable_uuid(id).to_string().into();

        let mut payload: HashMap<String, QValue> = HashMap::new();
        payload.insert(
            "id".to_string(),
            QValue {
                kind: Some(value::Kind::StringValue(id.to_string())),
            },
        );

        let vectors = Vectors {
            vectors_options: Some(vectors::VectorsOptions::Vector(Vector {
                data: vector,
                indices: None,
                vectors_count: None,
                vector: None,
            })),
        };

        PointStruct {
            id: Some(pid),
            payload,
            vectors: Some(vectors),
            ..Default::default()
        }
    }

    /// Upserts a batch of points. Returns the acknowledged operation id.
    pub async fn upsert_points(&self, points: Vec<PointStruct>) -> Result<u64, IndexError> {
        if points.is_empty() {
            debug!("No points provided for upsert");
            return Ok(0);
        }

        info!(
            "Upserting {} points into collection '{}'",
            points.len(),
            self.collection
        );

        let res = self
            .client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, points))
            .await
            .map_err(|e| IndexError::Qdrant(e.to_string()))?;

        Ok(res.result.and_then(|r| r.operation_id).unwrap_or(0))
    }

    /// Similarity search returning `(indicator_id, score)` pairs in
    /// descending score order. Points without an `id` payload are skipped.
    pub async fn search(
        &self,
        vector: Vec<f32>,
        top_k: u64,
    ) -> Result<Vec<(String, f32)>, IndexError> {
        debug!(
            "Searching in '{}' with top_k={}",
            self.collection, top_k
        );

        let res = self
            .client
            .search_points(
                SearchPointsBuilder::new(&self.collection, vector, top_k).with_payload(true),
            )
            .await
            .map_err(|e| IndexError::Qdrant(e.to_string()))?;

        let mut out = Vec::with_capacity(res.result.len());
        for point in res.result {
            let id = point.payload.get("id").and_then(|v| match &v.kind {
                Some(value::Kind::StringValue(s)) => Some(s.clone()),
                _ => None,
            });
            match id {
                Some(id) => out.push((id, point.score)),
                None => warn!("search hit without id payload; skipping"),
            }
        }

        debug!("Search completed: {} hits returned", out.len());
        Ok(out)
    }
}
