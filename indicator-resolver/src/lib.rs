//! Indicator resolution: pick one catalog series for a normalized query.
//!
//! Pipeline per request, all pure and synchronous:
//! 1. attach catalog metadata and precomputed [`IndicatorTags`] to each
//!    retrieved `(id, semantic)` pair, silently dropping unknown ids;
//! 2. apply hard constraints ([`filter`]);
//! 3. score and rank ([`score`]);
//! 4. select the top candidate and derive a confidence margin.
//!
//! The resolver holds only the read-only catalog plus tags computed once at
//! construction; concurrent resolutions share it without coordination.

mod errors;
mod filter;
mod query_terms;
mod score;
mod tags;

use std::collections::HashMap;
use std::sync::Arc;

use catalogs::{IndicatorCatalog, IndicatorMeta};
use question_parser::Slots;
use tracing::debug;

pub use errors::ResolveError;
pub use query_terms::build_query_terms;
pub use score::{DEFAULT_WEIGHTS, ScoreWeights};
pub use tags::IndicatorTags;

/// One indicator under consideration. Transient, request-local.
pub(crate) struct Candidate<'a> {
    pub(crate) meta: &'a IndicatorMeta,
    pub(crate) tags: &'a IndicatorTags,
    pub(crate) semantic: f32,
    pub(crate) score: f32,
}

/// Outcome of a successful resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolutionResult {
    pub id: String,
    pub name: String,
    pub unit: String,
    /// Score gap between the winner and the runner-up; 0 when there was no
    /// runner-up to be confident relative to.
    pub confidence_margin: f32,
    /// Synthesized query string plus the winner's raw semantic score.
    pub notes: String,
}

/// Disambiguates retrieved candidates into exactly one indicator.
pub struct Resolver {
    catalog: Arc<IndicatorCatalog>,
    tags: HashMap<String, IndicatorTags>,
    weights: ScoreWeights,
}

impl Resolver {
    /// Builds a resolver over the catalog, classifying every row up front.
    pub fn new(catalog: Arc<IndicatorCatalog>) -> Self {
        let tags = catalog
            .rows()
            .iter()
            .map(|row| (row.id.clone(), IndicatorTags::classify(row)))
            .collect();
        Self {
            catalog,
            tags,
            weights: DEFAULT_WEIGHTS,
        }
    }

    /// Resolves ranked retrieval results into one indicator.
    ///
    /// `search_results` is the retrieval service's output, ordered by
    /// descending similarity; ids absent from the catalog are dropped.
    ///
    /// # Errors
    /// [`ResolveError::NoResolvableIndicator`] when the hard constraints
    /// eliminate every candidate.
    pub fn resolve(
        &self,
        slots: &Slots,
        search_results: &[(String, f32)],
    ) -> Result<ResolutionResult, ResolveError> {
        let mut candidates: Vec<Candidate<'_>> = Vec::with_capacity(search_results.len());
        for (id, semantic) in search_results {
            let (Some(meta), Some(tags)) = (self.catalog.get(id), self.tags.get(id)) else {
                continue;
            };
            candidates.push(Candidate {
                meta,
                tags,
                semantic: *semantic,
                score: 0.0,
            });
        }

        candidates.retain(|c| filter::passes_constraints(slots, c.tags, &c.meta.name));

        if candidates.is_empty() {
            let query = build_query_terms(slots);
            return Err(ResolveError::NoResolvableIndicator { query });
        }

        score::score_candidates(&mut candidates, slots, &self.weights);

        let best = &candidates[0];
        let confidence_margin = match candidates.get(1) {
            Some(second) => (best.score - second.score).max(0.0),
            None => 0.0,
        };

        let query = build_query_terms(slots);
        let notes = format!("query='{}', semantic={:.3}", query, best.semantic);

        debug!(
            winner = %best.meta.id,
            score = best.score,
            confidence_margin,
            survivors = candidates.len(),
            "resolved indicator"
        );

        Ok(ResolutionResult {
            id: best.meta.id.clone(),
            name: best.meta.name.clone(),
            unit: best.meta.unit.clone(),
            confidence_margin,
            notes,
        })
    }
}
