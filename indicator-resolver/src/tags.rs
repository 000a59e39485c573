//! Per-indicator classification flags derived from code/name/unit conventions.
//!
//! World Bank indicator codes embed their measure and demographic dimensions
//! as dotted segments (`.ZS` percentage share, `.ZG` annual growth, `.CD`
//! current US$, `.KD` constant US$, `.IN` count, `.PP` PPP, `.PC` per capita,
//! `.FE`/`.MA` sex, `65UP`/`1524` age bands). The catalog's name/unit strings
//! back the codes up inconsistently, so every flag also checks the text.
//!
//! Tags are computed once per catalog row at resolver construction and
//! reused across requests.

use catalogs::IndicatorMeta;
use question_parser::{AgeBand, Sex, UnitQualifier};

/// Boolean classification of one indicator.
#[derive(Clone, Copy, Debug, Default)]
pub struct IndicatorTags {
    pub percent: bool,
    pub growth: bool,
    pub count: bool,
    pub ppp: bool,
    pub constant: bool,
    pub current_usd: bool,
    pub per_capita: bool,
    pub female: bool,
    pub male: bool,
    pub age65up: bool,
    pub age1524: bool,
}

impl IndicatorTags {
    /// Classifies one catalog row.
    pub fn classify(meta: &IndicatorMeta) -> Self {
        let id = meta.id.as_str();
        let name = meta.name.to_lowercase();
        let unit = meta.unit.to_lowercase();

        let percent = id.ends_with(".ZS")
            || meta.name.contains("%)")
            || meta.unit.contains('%')
            || unit.contains("percent");
        let growth = id.ends_with(".ZG") || name.contains("growth (annual %)");

        // Share/growth suffixes are never head counts, whatever the unit says.
        let count = !id.ends_with(".ZS")
            && !id.ends_with(".ZG")
            && (id.ends_with(".IN") || unit.contains("number") || meta.unit.trim().is_empty());

        Self {
            percent,
            growth,
            count,
            ppp: id.contains(".PP") || name.contains("ppp"),
            constant: id.ends_with(".KD") || name.contains("constant"),
            current_usd: id.ends_with(".CD")
                || name.contains("current us$")
                || unit.contains("current"),
            per_capita: id.contains(".PC") || name.contains("per capita"),
            female: id.contains(".FE.") || id.ends_with(".FE"),
            male: id.contains(".MA.") || id.ends_with(".MA"),
            age65up: id.contains("65UP"),
            age1524: id.contains("1524"),
        }
    }

    /// Whether this indicator serves the requested sex dimension.
    ///
    /// `Total` demands the absence of any sex marker: a sex-specific series
    /// can never answer a total request.
    pub fn has_sex(&self, sex: Sex) -> bool {
        match sex {
            Sex::Female => self.female,
            Sex::Male => self.male,
            Sex::Total => !(self.female || self.male),
        }
    }

    /// Whether this indicator serves the requested age band.
    pub fn has_age(&self, band: AgeBand) -> bool {
        match band {
            AgeBand::None => true,
            AgeBand::Age65Up => self.age65up,
            AgeBand::Age1524 => self.age1524,
        }
    }

    /// Whether the tag backing a given unit qualifier holds.
    pub fn matches(&self, qualifier: UnitQualifier) -> bool {
        match qualifier {
            UnitQualifier::PerCapita => self.per_capita,
            UnitQualifier::Ppp => self.ppp,
            UnitQualifier::ConstantUsd => self.constant,
            UnitQualifier::CurrentUsd => self.current_usd,
            UnitQualifier::GrowthRate => self.growth,
            UnitQualifier::PercentShare => self.percent,
            UnitQualifier::CountNumber => self.count,
        }
    }
}
