//! Canonical slot model produced by normalization.

use std::collections::BTreeSet;

use serde::Deserialize;

/// Raw fields as returned by the LLM extractor.
///
/// Every field is free text; the literal `"none"` (any case) or an empty
/// string denotes absence. Values may be miscased, noisy, or contradictory;
/// normalization tolerates all of that.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawExtraction {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub concept: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub demographics: String,
}

impl RawExtraction {
    /// Lowercased field content with the `"none"` sentinel mapped to empty.
    pub(crate) fn field(value: &str) -> String {
        let v = value.trim();
        if v.eq_ignore_ascii_case("none") {
            String::new()
        } else {
            v.to_lowercase()
        }
    }
}

/// How the question scopes time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeMode {
    /// One year (or an unspecified one, left to the fetch stage).
    Single,
    /// An inclusive year range.
    Range,
    /// The N most recent observations.
    LatestN,
}

/// Closed set of unit/measure qualifiers a question can request.
///
/// `Ord` is derived so the qualifier set iterates deterministically; only
/// membership is semantically meaningful.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UnitQualifier {
    PerCapita,
    Ppp,
    ConstantUsd,
    CurrentUsd,
    GrowthRate,
    PercentShare,
    CountNumber,
}

/// Requested sex dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sex {
    Total,
    Female,
    Male,
}

impl Sex {
    /// Query token for non-total values.
    pub fn token(self) -> Option<&'static str> {
        match self {
            Sex::Total => None,
            Sex::Female => Some("female"),
            Sex::Male => Some("male"),
        }
    }
}

/// Requested age band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgeBand {
    None,
    Age65Up,
    Age1524,
}

impl AgeBand {
    /// Query token for concrete bands.
    pub fn token(self) -> Option<&'static str> {
        match self {
            AgeBand::None => None,
            AgeBand::Age65Up => Some("65+"),
            AgeBand::Age1524 => Some("15-24"),
        }
    }
}

/// Normalized, typed query built from one question.
///
/// Immutable once built; owned by the caller for the lifetime of the request
/// and passed by reference through retrieval and resolution.
#[derive(Clone, Debug)]
pub struct Slots {
    pub country_text: String,
    pub time_mode: TimeMode,
    pub year: Option<i32>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub latest_n: Option<u32>,
    /// Lowercased concept with underscores for spaces, demographics stripped
    /// from it during query-term building.
    pub concept: String,
    pub unit_qualifiers: BTreeSet<UnitQualifier>,
    pub sex: Sex,
    pub age_band: AgeBand,
}

impl Default for Slots {
    fn default() -> Self {
        Self {
            country_text: String::new(),
            time_mode: TimeMode::Single,
            year: None,
            start_year: None,
            end_year: None,
            latest_n: None,
            concept: String::new(),
            unit_qualifiers: BTreeSet::new(),
            sex: Sex::Total,
            age_band: AgeBand::None,
        }
    }
}

impl Slots {
    /// Membership test on the qualifier set.
    pub fn wants(&self, q: UnitQualifier) -> bool {
        self.unit_qualifiers.contains(&q)
    }
}
