//! Ollama chat client that extracts the five raw question fields.
//!
//! Thin non-streaming wrapper over `POST {endpoint}/api/chat`. The model is
//! instructed to answer with a single JSON object; anything around it (code
//! fences, preamble) is tolerated by slicing the outermost object before
//! deserializing.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::errors::ExtractError;
use crate::slots::RawExtraction;

const EXTRACT_SYSTEM: &str = "\
You extract query parameters from a question about World Bank statistics.\n\
Answer with exactly one JSON object with string fields:\n\
  country       - country name only\n\
  concept       - main concept ONLY: GDP, population, unemployment, inflation, etc. NO age/gender\n\
  year          - year as a number, e.g. 2022, or \"none\"\n\
  unit          - unit qualifiers: \"current USD\", \"constant USD\", \"PPP\", \"per capita\", \"percentage\", or \"none\"\n\
  demographics  - ONLY age and gender: \"female ages 65+\", \"male ages 15-24\", or \"none\"\n\
Use \"none\" for any field the question does not mention. No prose, no markdown.";

/// Extractor backed by a local Ollama chat model.
pub struct OllamaExtractor {
    http: Client,
    url_chat: String,
    model: String,
}

impl OllamaExtractor {
    /// Builds an extractor for the given Ollama endpoint and model.
    ///
    /// # Errors
    /// - [`ExtractError::InvalidEndpoint`] for empty or non-http endpoints.
    /// - [`ExtractError::Transport`] if the HTTP client cannot be built.
    pub fn new(endpoint: &str, model: &str, timeout_secs: u64) -> Result<Self, ExtractError> {
        let endpoint = endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ExtractError::InvalidEndpoint(endpoint.to_string()));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url_chat: format!("{}/api/chat", endpoint.trim_end_matches('/')),
            model: model.to_string(),
        })
    }

    /// The configured model name (exposed for the health endpoint).
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Extracts the five raw fields from a question.
    ///
    /// # Errors
    /// - [`ExtractError::HttpStatus`] for non-2xx upstream responses.
    /// - [`ExtractError::Transport`] for client errors.
    /// - [`ExtractError::Decode`] when no JSON object can be recovered.
    #[instrument(skip_all, fields(model = %self.model))]
    pub async fn extract(&self, question: &str) -> Result<RawExtraction, ExtractError> {
        #[derive(Serialize)]
        struct Req<'a> {
            model: &'a str,
            messages: Vec<Msg<'a>>,
            stream: bool,
            format: &'a str,
        }
        #[derive(Serialize)]
        struct Msg<'a> {
            role: &'a str,
            content: &'a str,
        }
        #[derive(Deserialize)]
        struct Resp {
            message: Option<OutMsg>,
        }
        #[derive(Deserialize)]
        struct OutMsg {
            content: String,
        }

        let body = Req {
            model: &self.model,
            messages: vec![
                Msg {
                    role: "system",
                    content: EXTRACT_SYSTEM,
                },
                Msg {
                    role: "user",
                    content: question,
                },
            ],
            stream: false,
            format: "json",
        };

        debug!("POST {}", self.url_chat);
        let resp = self.http.post(&self.url_chat).json(&body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let snippet = resp.text().await.unwrap_or_default();
            return Err(ExtractError::HttpStatus {
                status,
                url: self.url_chat.clone(),
                snippet: snippet.chars().take(200).collect(),
            });
        }

        let data: Resp = resp
            .json()
            .await
            .map_err(|e| ExtractError::Decode(e.to_string()))?;
        let content = data.message.map(|m| m.content).unwrap_or_default();

        let raw = parse_extraction(&content)?;
        debug!(
            country = %raw.country,
            concept = %raw.concept,
            year = %raw.year,
            unit = %raw.unit,
            demographics = %raw.demographics,
            "extracted fields"
        );
        Ok(raw)
    }
}

/// Recovers a [`RawExtraction`] from model output that may wrap the JSON
/// object in fences or prose.
pub(crate) fn parse_extraction(content: &str) -> Result<RawExtraction, ExtractError> {
    let start = content.find('{');
    let end = content.rfind('}');
    let slice = match (start, end) {
        (Some(s), Some(e)) if s < e => &content[s..=e],
        _ => {
            return Err(ExtractError::Decode(format!(
                "no JSON object in model output: {}",
                content.chars().take(120).collect::<String>()
            )));
        }
    };

    serde_json::from_str::<RawExtraction>(slice)
        .map_err(|e| ExtractError::Decode(format!("bad extraction JSON: {e}")))
}
