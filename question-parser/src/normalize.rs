//! Slot normalization: noisy extracted fields → canonical [`Slots`].
//!
//! Total function; unrecognized or missing signals degrade to conservative
//! defaults (`Total` sex, no age band, `Single` time mode without a year).
//! Rule order matters and is fixed: concept override, time mode, growth
//! detection, unit qualifiers, demographic gating, sex, age band.

use tracing::debug;

use crate::slots::{AgeBand, RawExtraction, Sex, Slots, TimeMode, UnitQualifier};

const FEMALE_WORDS: [&str; 5] = ["female", "females", "women", "woman", "girls"];
const MALE_WORDS: [&str; 5] = ["male", "males", "men", "man", "boys"];

/// Wording that marks a population question as asking for a rate or share
/// rather than an absolute head count.
const RATIO_WORDS: [&str; 5] = ["growth", "%", "percent", "share", "ratio"];

/// Concepts where sex/age dimensions are meaningful. Anything else keeps
/// `Total` even if gender text is present.
const DEMOGRAPHIC_CONCEPTS: [&str; 3] = ["population", "unemployment", "life_expectancy"];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Converts extractor output plus the original question into [`Slots`].
///
/// Never fails. The question string participates directly: several rules
/// (CPI override, growth/rate wording, gender words) read the question, not
/// the extracted fields, because the extractor drops such signals often
/// enough that relying on it alone loses them.
pub fn normalize(raw: &RawExtraction, question: &str) -> Slots {
    let q = question.to_lowercase();

    let country_text = {
        let c = raw.country.trim();
        if c.eq_ignore_ascii_case("none") {
            String::new()
        } else {
            c.to_string()
        }
    };

    let mut concept = RawExtraction::field(&raw.concept).replace(' ', "_");
    if q.contains("cpi") || q.contains("consumer price index") {
        concept = "inflation_cpi".to_string();
    }

    let mut slots = Slots {
        country_text,
        concept,
        ..Slots::default()
    };

    // Time mode. A purely numeric year field wins; otherwise "latest"
    // phrasing switches to most-recent-value mode.
    let year_str = raw.year.trim();
    if !year_str.is_empty() && year_str.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(y) = year_str.parse::<i32>() {
            slots.year = Some(y);
        }
    } else if q.contains("latest") || q.contains("most recent") {
        slots.time_mode = TimeMode::LatestN;
        slots.latest_n = Some(1);
    }

    let unit = RawExtraction::field(&raw.unit);

    // Growth wording gates the currency-basis qualifiers below: a growth
    // question never also asks for a constant/current dollar basis.
    let has_growth = q.contains("growth rate") || q.contains("growth") || q.contains("yoy");

    if unit.contains("per capita") || q.contains("per capita") {
        slots.unit_qualifiers.insert(UnitQualifier::PerCapita);
    }
    if unit.contains("ppp") || q.contains("ppp") {
        slots.unit_qualifiers.insert(UnitQualifier::Ppp);
    }

    if !has_growth {
        if unit.contains("constant") || unit.contains("real") {
            slots.unit_qualifiers.insert(UnitQualifier::ConstantUsd);
        }
        if unit.contains("current") || unit.contains("nominal") || unit.contains("usd") {
            slots.unit_qualifiers.insert(UnitQualifier::CurrentUsd);
        }
    }

    if has_growth {
        slots.unit_qualifiers.insert(UnitQualifier::GrowthRate);
    } else if unit.contains('%') || unit.contains("percent") {
        slots.unit_qualifiers.insert(UnitQualifier::PercentShare);
    } else if q.contains(" rate")
        && !q.contains("unemployment")
        && !q.contains("inflation")
        && !q.contains("cpi")
    {
        // Rate-named concepts like unemployment are already rates; tagging
        // them percent again would double-filter.
        slots.unit_qualifiers.insert(UnitQualifier::PercentShare);
    }

    let demographics = RawExtraction::field(&raw.demographics);

    let is_demographic_concept = DEMOGRAPHIC_CONCEPTS
        .iter()
        .any(|key| slots.concept.contains(key));

    if is_demographic_concept {
        if q.contains("total population")
            || q.contains("total pop")
            || (q.contains("population") && q.contains("total"))
        {
            slots.sex = Sex::Total;
            if !contains_any(&q, &RATIO_WORDS) {
                slots.unit_qualifiers.insert(UnitQualifier::CountNumber);
            }
        } else if contains_any(&q, &FEMALE_WORDS) {
            slots.sex = Sex::Female;
        } else if contains_any(&q, &MALE_WORDS) && !q.contains("female") && !q.contains("females") {
            slots.sex = Sex::Male;
        } else if demographics.contains("female") || demographics.contains("women") {
            slots.sex = Sex::Female;
        } else if (demographics.contains("male") || demographics.contains("men"))
            && !demographics.contains("female")
        {
            slots.sex = Sex::Male;
        }
    }

    // Catch-all: a plain population head-count question gets the count
    // qualifier even when the total-population wording above did not match.
    if slots.concept.contains("population")
        && slots.sex == Sex::Total
        && !contains_any(&q, &RATIO_WORDS)
    {
        slots.unit_qualifiers.insert(UnitQualifier::CountNumber);
    }

    if demographics.contains("65")
        && contains_any(&demographics, &["+", "plus", "over", "above"])
    {
        slots.age_band = AgeBand::Age65Up;
    }
    // Checked second; overwrites 65+ when a string carries both markers.
    if demographics.contains("15-24") || demographics.contains("15â€“24") {
        slots.age_band = AgeBand::Age1524;
    }

    debug!(
        concept = %slots.concept,
        sex = ?slots.sex,
        age_band = ?slots.age_band,
        qualifiers = ?slots.unit_qualifiers,
        "normalized slots"
    );

    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(country: &str, concept: &str, year: &str, unit: &str, demo: &str) -> RawExtraction {
        RawExtraction {
            country: country.into(),
            concept: concept.into(),
            year: year.into(),
            unit: unit.into(),
            demographics: demo.into(),
        }
    }

    #[test]
    fn plain_gdp_question() {
        let slots = normalize(
            &raw("Saudi Arabia", "GDP", "2022", "none", "none"),
            "What is the GDP of Saudi Arabia in 2022?",
        );
        assert_eq!(slots.concept, "gdp");
        assert_eq!(slots.time_mode, TimeMode::Single);
        assert_eq!(slots.year, Some(2022));
        assert!(slots.unit_qualifiers.is_empty());
        assert_eq!(slots.sex, Sex::Total);
        assert_eq!(slots.age_band, AgeBand::None);
    }

    #[test]
    fn non_numeric_year_without_latest_wording_stays_single_no_year() {
        let slots = normalize(
            &raw("India", "GDP", "recently", "none", "none"),
            "What is the GDP of India?",
        );
        assert_eq!(slots.time_mode, TimeMode::Single);
        assert_eq!(slots.year, None);
        assert_eq!(slots.latest_n, None);
    }

    #[test]
    fn latest_wording_switches_to_latest_n() {
        let slots = normalize(
            &raw("India", "population", "none", "none", "none"),
            "What is the latest population of India?",
        );
        assert_eq!(slots.time_mode, TimeMode::LatestN);
        assert_eq!(slots.latest_n, Some(1));
    }

    #[test]
    fn cpi_wording_overrides_concept() {
        let slots = normalize(
            &raw("Egypt", "prices", "2021", "none", "none"),
            "What was the consumer price index inflation in Egypt in 2021?",
        );
        assert_eq!(slots.concept, "inflation_cpi");
    }

    #[test]
    fn growth_excludes_currency_basis() {
        let slots = normalize(
            &raw("India", "population", "2022", "current USD", "none"),
            "What is the population growth rate in India in 2022?",
        );
        assert!(slots.wants(UnitQualifier::GrowthRate));
        assert!(!slots.wants(UnitQualifier::ConstantUsd));
        assert!(!slots.wants(UnitQualifier::CurrentUsd));
        // Growth wording suppresses the head-count qualifier.
        assert!(!slots.wants(UnitQualifier::CountNumber));
    }

    #[test]
    fn currency_basis_from_unit_text() {
        let slots = normalize(
            &raw("Saudi Arabia", "GDP", "2022", "constant USD", "none"),
            "What is the GDP of Saudi Arabia in 2022 in constant dollars?",
        );
        assert!(slots.wants(UnitQualifier::ConstantUsd));
        // "usd" in unit text also tags the current basis; both are soft.
        assert!(slots.wants(UnitQualifier::CurrentUsd));
        assert!(!slots.wants(UnitQualifier::GrowthRate));
    }

    #[test]
    fn rate_wording_adds_percent_share_for_non_rate_concepts() {
        let slots = normalize(
            &raw(
                "Saudi Arabia",
                "labor force participation",
                "2022",
                "none",
                "female",
            ),
            "What is the labor force participation rate for females in Saudi Arabia in 2022?",
        );
        assert!(slots.wants(UnitQualifier::PercentShare));
        assert_eq!(slots.sex, Sex::Total, "not a demographic-gated concept");
    }

    #[test]
    fn rate_wording_skipped_for_inherent_rate_concepts() {
        let slots = normalize(
            &raw("Spain", "unemployment", "2022", "none", "none"),
            "What is the unemployment rate in Spain in 2022?",
        );
        assert!(!slots.wants(UnitQualifier::PercentShare));
    }

    #[test]
    fn gender_ignored_for_non_demographic_concepts() {
        let slots = normalize(
            &raw("France", "co2 emissions", "2020", "none", "female"),
            "What are the co2 emissions for women in France in 2020?",
        );
        assert_eq!(slots.sex, Sex::Total);
    }

    #[test]
    fn female_question_wording_wins_for_demographic_concepts() {
        let slots = normalize(
            &raw("Saudi Arabia", "unemployment", "2022", "percentage", "none"),
            "What is the unemployment rate among women in Saudi Arabia in 2022?",
        );
        assert_eq!(slots.sex, Sex::Female);
    }

    #[test]
    fn male_wording_yields_male_unless_female_also_present() {
        let both = normalize(
            &raw("India", "population", "2022", "none", "none"),
            "How do male and female population shares compare in India in 2022?",
        );
        assert_eq!(both.sex, Sex::Female, "female terms take precedence");

        let men_only = normalize(
            &raw("India", "unemployment", "2022", "none", "none"),
            "How many men are unemployed in India in 2022?",
        );
        assert_eq!(men_only.sex, Sex::Male);
    }

    #[test]
    fn demographics_field_is_the_fallback_sex_signal() {
        let slots = normalize(
            &raw("Japan", "life expectancy", "2021", "none", "female"),
            "What is the life expectancy in Japan in 2021?",
        );
        assert_eq!(slots.sex, Sex::Female);
    }

    #[test]
    fn total_population_gets_count_number() {
        let slots = normalize(
            &raw("India", "population", "2022", "none", "none"),
            "What is the total population of India in 2022?",
        );
        assert_eq!(slots.sex, Sex::Total);
        assert!(slots.wants(UnitQualifier::CountNumber));
    }

    #[test]
    fn population_share_question_gets_no_count_number() {
        let slots = normalize(
            &raw("India", "population", "2022", "none", "none"),
            "What share of the total population of India is urban in 2022?",
        );
        assert!(!slots.wants(UnitQualifier::CountNumber));
    }

    #[test]
    fn count_number_catch_all_is_idempotent() {
        // Plain population question without the explicit "total" wording.
        let slots = normalize(
            &raw("Brazil", "population", "2022", "none", "none"),
            "What is the population of Brazil in 2022?",
        );
        assert!(slots.wants(UnitQualifier::CountNumber));
        assert_eq!(
            slots
                .unit_qualifiers
                .iter()
                .filter(|q| **q == UnitQualifier::CountNumber)
                .count(),
            1
        );
    }

    #[test]
    fn how_many_wording_reads_as_a_male_request() {
        // Sex-word matching is substring-based and "many" contains "man",
        // so this phrasing flips sex to Male and the head-count catch-all
        // (gated on Total) stays off.
        let slots = normalize(
            &raw("Brazil", "population", "2022", "none", "none"),
            "How many people live in Brazil in 2022?",
        );
        assert_eq!(slots.sex, Sex::Male);
        assert!(!slots.wants(UnitQualifier::CountNumber));
    }

    #[test]
    fn age_bands_from_demographics_text() {
        let older = normalize(
            &raw("Japan", "population", "2021", "none", "ages 65 and above"),
            "What is the population aged 65 and above in Japan in 2021?",
        );
        assert_eq!(older.age_band, AgeBand::Age65Up);

        let youth = normalize(
            &raw("Japan", "unemployment", "2021", "none", "ages 15-24"),
            "What is the youth unemployment in Japan in 2021?",
        );
        assert_eq!(youth.age_band, AgeBand::Age1524);
    }

    #[test]
    fn youth_band_overwrites_when_both_markers_appear() {
        let slots = normalize(
            &raw("Japan", "population", "2021", "none", "ages 15-24 vs 65+"),
            "Compare youth population in Japan in 2021",
        );
        assert_eq!(slots.age_band, AgeBand::Age1524);
    }

    #[test]
    fn growth_and_currency_basis_never_co_occur() {
        for question in [
            "What is the GDP growth of India in 2022 in constant USD?",
            "GDP yoy for India, current prices",
        ] {
            let slots = normalize(&raw("India", "GDP", "2022", "constant current usd", "none"), question);
            assert!(slots.wants(UnitQualifier::GrowthRate));
            assert!(!slots.wants(UnitQualifier::ConstantUsd));
            assert!(!slots.wants(UnitQualifier::CurrentUsd));
        }
    }

    #[test]
    fn none_sentinels_are_absent() {
        let slots = normalize(&raw("NONE", "None", "none", "None", "NONE"), "anything");
        assert_eq!(slots.country_text, "");
        assert_eq!(slots.concept, "");
        assert_eq!(slots.year, None);
    }
}
