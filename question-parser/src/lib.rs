//! Question understanding: LLM field extraction plus slot normalization.
//!
//! Two stages with a sharp boundary:
//! - [`OllamaExtractor::extract`] asks a local model for five free-text
//!   fields (country, concept, year, unit, demographics) — noisy, untrusted.
//! - [`normalize`] turns those fields and the original question into typed
//!   [`Slots`] with fixed, documented rule precedence. Pure and total.

mod errors;
mod llm;
mod normalize;
mod slots;

pub use errors::ExtractError;
pub use llm::OllamaExtractor;
pub use normalize::normalize;
pub use slots::{AgeBand, RawExtraction, Sex, Slots, TimeMode, UnitQualifier};
