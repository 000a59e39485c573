//! Ollama embedding provider.
//!
//! Thin async client for `POST {endpoint}/api/embeddings` with a strict
//! dimensionality check: a model/config mismatch surfaces immediately as
//! [`IndexError::VectorSizeMismatch`] instead of corrupting the collection.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::IndexConfig;
use crate::errors::IndexError;

/// Async embedding client for a local Ollama server.
pub struct OllamaEmbedder {
    http: Client,
    url_embeddings: String,
    model: String,
    dim: usize,
}

impl OllamaEmbedder {
    /// Builds an embedder from the index config.
    ///
    /// # Errors
    /// - [`IndexError::InvalidEndpoint`] for empty or non-http endpoints.
    /// - [`IndexError::Transport`] if the HTTP client cannot be built.
    pub fn new(cfg: &IndexConfig) -> Result<Self, IndexError> {
        let endpoint = cfg.ollama_url.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(IndexError::InvalidEndpoint(cfg.ollama_url.clone()));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(cfg.embed_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url_embeddings: format!("{}/api/embeddings", endpoint.trim_end_matches('/')),
            model: cfg.embed_model.clone(),
            dim: cfg.embedding_dim,
        })
    }

    /// Configured dimensionality of the vector space.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Embeds one text.
    ///
    /// # Errors
    /// - [`IndexError::HttpStatus`] for non-2xx upstream responses.
    /// - [`IndexError::Decode`] for unparseable bodies.
    /// - [`IndexError::VectorSizeMismatch`] when the returned vector does not
    ///   match the configured dimension.
    #[instrument(skip_all, fields(model = %self.model))]
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, IndexError> {
        #[derive(Serialize)]
        struct Req<'a> {
            model: &'a str,
            prompt: &'a str,
        }
        #[derive(Deserialize)]
        struct Resp {
            embedding: Vec<f32>,
        }

        let body = Req {
            model: &self.model,
            prompt: text,
        };

        debug!("POST {}", self.url_embeddings);
        let resp = self
            .http
            .post(&self.url_embeddings)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let snippet = resp.text().await.unwrap_or_default();
            return Err(IndexError::HttpStatus {
                status,
                url: self.url_embeddings.clone(),
                snippet: snippet.chars().take(240).collect(),
            });
        }

        let out: Resp = resp
            .json()
            .await
            .map_err(|e| IndexError::Decode(format!("expected {{ embedding: number[] }}: {e}")))?;

        if out.embedding.len() != self.dim {
            return Err(IndexError::VectorSizeMismatch {
                got: out.embedding.len(),
                want: self.dim,
            });
        }

        Ok(out.embedding)
    }
}
