//! Hard constraint filter over retrieved candidates.

use question_parser::{Slots, UnitQualifier};

use crate::tags::IndicatorTags;

/// Whether a candidate survives the hard constraints for this query.
///
/// Hard: PPP, growth, percent-share (with a rate-name escape hatch), sex,
/// age band. Soft (scoring only): per-capita, constant/current basis, count —
/// the catalog's unit metadata is too inconsistent to reject on those
/// without over-pruning.
pub fn passes_constraints(slots: &Slots, tags: &IndicatorTags, name: &str) -> bool {
    if slots.wants(UnitQualifier::Ppp) && !tags.ppp {
        return false;
    }
    if slots.wants(UnitQualifier::GrowthRate) && !tags.growth {
        return false;
    }
    // Rate-named series without a percent flag are let through; scoring
    // decides. Known to admit non-percentage rates (e.g. exchange rates).
    if slots.wants(UnitQualifier::PercentShare)
        && !tags.percent
        && !name.to_lowercase().contains("rate")
    {
        return false;
    }
    if !tags.has_sex(slots.sex) {
        return false;
    }
    if !tags.has_age(slots.age_band) {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalogs::IndicatorMeta;
    use question_parser::{AgeBand, Sex};

    fn tags(id: &str, name: &str, unit: &str) -> IndicatorTags {
        IndicatorTags::classify(&IndicatorMeta {
            id: id.into(),
            name: name.into(),
            unit: unit.into(),
            topics: String::new(),
            source_note: String::new(),
            source: String::new(),
        })
    }

    #[test]
    fn ppp_request_rejects_non_ppp() {
        let mut slots = Slots::default();
        slots.unit_qualifiers.insert(UnitQualifier::Ppp);

        let gdp_cd = tags("NY.GDP.MKTP.CD", "GDP (current US$)", "");
        let gdp_pp = tags("NY.GDP.MKTP.PP.CD", "GDP, PPP (current international $)", "");
        assert!(!passes_constraints(&slots, &gdp_cd, "GDP (current US$)"));
        assert!(passes_constraints(&slots, &gdp_pp, "GDP, PPP (current international $)"));
    }

    #[test]
    fn growth_request_rejects_levels() {
        let mut slots = Slots::default();
        slots.unit_qualifiers.insert(UnitQualifier::GrowthRate);

        let level = tags("SP.POP.TOTL", "Population, total", "");
        let growth = tags("SP.POP.GROW", "Population growth (annual %)", "annual %");
        assert!(!passes_constraints(&slots, &level, "Population, total"));
        assert!(passes_constraints(&slots, &growth, "Population growth (annual %)"));
    }

    #[test]
    fn percent_request_keeps_rate_named_series() {
        let mut slots = Slots::default();
        slots.unit_qualifiers.insert(UnitQualifier::PercentShare);

        // No percent flag anywhere, but "rate" in the name slips through.
        let fx = tags("PA.NUS.FCRF", "Official exchange rate (LCU per US$)", "LCU per US$");
        assert!(passes_constraints(&slots, &fx, "Official exchange rate (LCU per US$)"));

        let count = tags("SP.POP.TOTL.IN", "Population, total", "Number");
        assert!(!passes_constraints(&slots, &count, "Population, total"));
    }

    #[test]
    fn total_request_rejects_sex_specific_series() {
        let slots = Slots::default();
        let female = tags("SP.POP.TOTL.FE.IN", "Population, female", "");
        assert!(!passes_constraints(&slots, &female, "Population, female"));
    }

    #[test]
    fn age_band_must_match_exactly() {
        let mut slots = Slots::default();
        slots.age_band = AgeBand::Age65Up;

        let old = tags("SP.POP.65UP.TO", "Population ages 65 and above", "");
        let all = tags("SP.POP.TOTL", "Population, total", "");
        assert!(passes_constraints(&slots, &old, "Population ages 65 and above"));
        assert!(!passes_constraints(&slots, &all, "Population, total"));
    }

    #[test]
    fn female_request_needs_female_marker() {
        let mut slots = Slots::default();
        slots.sex = Sex::Female;

        let female = tags("SL.TLF.CACT.FE.ZS", "Labor force participation rate, female", "%");
        let male = tags("SL.TLF.CACT.MA.ZS", "Labor force participation rate, male", "%");
        assert!(passes_constraints(&slots, &female, "x"));
        assert!(!passes_constraints(&slots, &male, "x"));
    }
}
