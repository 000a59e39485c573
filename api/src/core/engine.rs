//! End-to-end question answering: extract → normalize → retrieve → resolve
//! → fetch → format.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument};

use catalogs::{CountryCatalog, IndicatorCatalog};
use indicator_index::{IndexConfig, IndicatorIndex};
use indicator_resolver::{Resolver, build_query_terms};
use question_parser::{OllamaExtractor, normalize};
use wb_client::{WbConfig, WorldBankClient, build_time_param, format_value};

use crate::error_handler::{AppError, AppResult};

/// Env-driven engine configuration.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub ollama_url: String,
    pub extract_model: String,
    pub extract_timeout_secs: u64,
    pub indicators_path: String,
    pub countries_path: String,
    pub aliases_path: Option<String>,
    pub index: IndexConfig,
    pub wb: WbConfig,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self {
            ollama_url: std::env::var("OLLAMA_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:11434".to_string()),
            extract_model: std::env::var("EXTRACT_MODEL")
                .unwrap_or_else(|_| "llama3.2".to_string()),
            extract_timeout_secs: std::env::var("EXTRACT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            indicators_path: std::env::var("INDICATORS_PATH")
                .unwrap_or_else(|_| "data/indicators.jsonl".to_string()),
            countries_path: std::env::var("COUNTRIES_PATH")
                .unwrap_or_else(|_| "data/countries.jsonl".to_string()),
            aliases_path: std::env::var("ALIASES_PATH").ok(),
            index: IndexConfig::from_env(),
            wb: WbConfig::from_env(),
        }
    }
}

/// Full answer payload for one question.
#[derive(Clone, Debug, Serialize)]
pub struct QueryAnswer {
    pub question: String,
    pub country: String,
    pub indicator_code: String,
    pub indicator_name: String,
    pub unit: String,
    pub value: String,
    pub year_used: Option<i32>,
    pub api_url: String,
    pub confidence_margin: f32,
    pub resolver_note: String,
    /// Present when the served year differs from the requested one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Wires the collaborators together; built once at startup, shared by all
/// requests. Everything it holds is either stateless or read-only.
pub struct QueryEngine {
    extractor: OllamaExtractor,
    catalog: Arc<IndicatorCatalog>,
    countries: CountryCatalog,
    index: IndicatorIndex,
    resolver: Resolver,
    wb: WorldBankClient,
}

impl QueryEngine {
    /// Loads catalogs and constructs all clients.
    pub fn new(cfg: &EngineConfig) -> AppResult<Self> {
        let catalog = Arc::new(IndicatorCatalog::load(&cfg.indicators_path)?);
        let countries = CountryCatalog::load(
            &cfg.countries_path,
            cfg.aliases_path.as_deref().map(std::path::Path::new),
        )?;

        let extractor = OllamaExtractor::new(
            &cfg.ollama_url,
            &cfg.extract_model,
            cfg.extract_timeout_secs,
        )?;
        let index = IndicatorIndex::new(&cfg.index)?;
        let resolver = Resolver::new(catalog.clone());
        let wb = WorldBankClient::new(&cfg.wb)?;

        info!(
            indicators = catalog.len(),
            countries = countries.rows().len(),
            "query engine ready"
        );

        Ok(Self {
            extractor,
            catalog,
            countries,
            index,
            resolver,
            wb,
        })
    }

    /// The extraction model name (exposed for the health endpoint).
    pub fn extract_model(&self) -> &str {
        self.extractor.model()
    }

    /// Answers one natural-language question.
    #[instrument(skip(self))]
    pub async fn answer(&self, question: &str) -> AppResult<QueryAnswer> {
        let raw = self.extractor.extract(question).await?;
        let slots = normalize(&raw, question);

        let country_code = self.countries.normalize_country(&slots.country_text)?;
        let (time_param, requested_year) = build_time_param(&slots);

        let query_text = build_query_terms(&slots);
        let search_results = self.index.search(&query_text, self.index.top_k()).await?;

        let resolution = self.resolver.resolve(&slots, &search_results)?;

        let fetched = self
            .wb
            .fetch_indicator(&country_code, &resolution.id, &time_param, requested_year)
            .await?;

        let value = format_value(fetched.value, &resolution.unit, &resolution.id);

        let note = match (requested_year, fetched.actual_year) {
            (Some(wanted), actual) if actual != Some(wanted) => Some(format!(
                "No data for {}; showing {} (nearest/latest available).",
                wanted,
                actual.map_or_else(|| "n/a".to_string(), |y| y.to_string())
            )),
            _ => None,
        };

        Ok(QueryAnswer {
            question: question.to_string(),
            country: country_code,
            indicator_code: resolution.id,
            indicator_name: resolution.name,
            unit: resolution.unit,
            value,
            year_used: fetched.actual_year,
            api_url: fetched.url,
            confidence_margin: (resolution.confidence_margin * 10_000.0).round() / 10_000.0,
            resolver_note: resolution.notes,
            note,
        })
    }

    /// Re-embeds the indicator catalog into the vector collection.
    pub async fn reindex(&self) -> AppResult<usize> {
        Ok(self.index.reindex(&self.catalog).await?)
    }
}
