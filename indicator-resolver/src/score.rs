//! Weighted multi-factor scoring of filtered candidates.

use question_parser::{Sex, Slots};

use crate::Candidate;

/// Versioned weight table for candidate scoring.
///
/// Kept separate from predicate logic so re-tuning is a constant swap. The
/// semantic score arrives retrieval-normalized; no further normalization is
/// applied.
#[derive(Clone, Copy, Debug)]
pub struct ScoreWeights {
    pub semantic: f32,
    pub unit: f32,
    pub demo: f32,
    pub prior: f32,
}

/// Production weights, carried over from the tuned heuristic.
pub const DEFAULT_WEIGHTS: ScoreWeights = ScoreWeights {
    semantic: 0.45,
    unit: 0.25,
    demo: 0.15,
    prior: 0.10,
};

/// +1 per requested qualifier whose tag holds on this candidate.
fn unit_match(slots: &Slots, cand: &Candidate) -> f32 {
    slots
        .unit_qualifiers
        .iter()
        .filter(|q| cand.tags.matches(**q))
        .count() as f32
}

/// +1 for a matching sex dimension, +1 for a matching age band.
///
/// Always 2.0 after the hard filter; kept explicit for transparency and for
/// relaxed-filter variants.
fn demo_match(slots: &Slots, cand: &Candidate) -> f32 {
    let mut m = 0.0;
    if cand.tags.has_sex(slots.sex) {
        m += 1.0;
    }
    if cand.tags.has_age(slots.age_band) {
        m += 1.0;
    }
    m
}

/// Concept-specific boosts toward the canonical series for headline concepts.
fn prior_boost(slots: &Slots, cand: &Candidate) -> f32 {
    let id = cand.meta.id.as_str();
    let name = cand.meta.name.to_lowercase();
    let concept = slots.concept.as_str();

    let mut prior = 0.0;
    if (concept == "inflation" || concept == "inflation_cpi")
        && (name.contains("consumer prices (annual %)") || id == "FP.CPI.TOTL.ZG")
    {
        prior += 1.0;
    }
    if concept == "gdp" && id.starts_with("NY.GDP.MKTP") {
        prior += 1.0;
    }
    if concept == "population" {
        if id == "SP.POP.TOTL" && slots.sex == Sex::Total {
            prior += 2.0;
        } else if id.starts_with("SP.POP") {
            prior += 0.8;
        }
    }
    prior
}

/// Computes scores in place and sorts descending.
///
/// The sort is stable, so equal scores keep the incoming (retrieval
/// relevance) order.
pub fn score_candidates(candidates: &mut [Candidate<'_>], slots: &Slots, weights: &ScoreWeights) {
    for cand in candidates.iter_mut() {
        cand.score = weights.semantic * cand.semantic
            + weights.unit * unit_match(slots, cand)
            + weights.demo * demo_match(slots, cand)
            + weights.prior * prior_boost(slots, cand);
    }
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
}
