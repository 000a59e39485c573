//! Read-only reference catalogs for the query service.
//!
//! Two flat tables loaded once at startup from JSONL dumps:
//! - the indicator catalog (code → name/unit/topics/source metadata),
//! - the country catalog plus a lowercase alias map resolving free country
//!   text to World Bank 3-letter codes.
//!
//! Both are immutable after load and safe for unsynchronized concurrent reads.

mod countries;
mod errors;
mod indicators;

pub use countries::{CountryCatalog, CountryMeta};
pub use errors::CatalogError;
pub use indicators::{IndicatorCatalog, IndicatorMeta};
