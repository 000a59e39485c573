//! Renders [`Slots`] into the search string sent to the embedding index.

use std::sync::OnceLock;

use regex::Regex;

use question_parser::{Slots, UnitQualifier};

struct ConceptCleaners {
    sex_with_ages: Regex,
    sex_word: Regex,
    ages_phrase: Regex,
    ages_parens: Regex,
    sex_parens: Regex,
    whitespace: Regex,
}

fn cleaners() -> &'static ConceptCleaners {
    static CELL: OnceLock<ConceptCleaners> = OnceLock::new();
    CELL.get_or_init(|| ConceptCleaners {
        // "female ages 65+", "male age 15-24", "female ages 65 and above"
        sex_with_ages: Regex::new(r"(?i)\b(fe)?male\s+(ages?|age)\s+[\d\-\+\sandabove]+").unwrap(),
        sex_word: Regex::new(r"(?i)\b(fe)?male").unwrap(),
        ages_phrase: Regex::new(r"(?i)\bages?\s+[\d\-\+\sandabove]+").unwrap(),
        ages_parens: Regex::new(r"(?i)\s*\(ages?\s+[\d\-\+\sandabove]+\)").unwrap(),
        sex_parens: Regex::new(r"(?i)\s*\(.*?(male|female).*?\)").unwrap(),
        whitespace: Regex::new(r"\s+").unwrap(),
    })
}

/// Strips age/gender fragments out of a concept string.
///
/// Those dimensions are emitted as their own tokens, so leaving them inside
/// the concept would double-weight them in the embedding query.
fn clean_concept(concept: &str) -> String {
    let re = cleaners();

    let mut c = concept.replace('_', " ").replace(['\n', '\r'], " ");
    c = re.sex_with_ages.replace_all(&c, "").into_owned();
    c = re.sex_word.replace_all(&c, "").into_owned();
    c = re.ages_phrase.replace_all(&c, "").into_owned();
    c = re.ages_parens.replace_all(&c, "").into_owned();
    c = re.sex_parens.replace_all(&c, "").into_owned();
    re.whitespace.replace_all(&c, " ").trim().to_string()
}

fn qualifier_token(q: UnitQualifier) -> Option<&'static str> {
    match q {
        UnitQualifier::PercentShare => Some("percent"),
        UnitQualifier::GrowthRate => Some("growth"),
        UnitQualifier::PerCapita => Some("per capita"),
        UnitQualifier::Ppp => Some("ppp"),
        UnitQualifier::CurrentUsd => Some("current"),
        UnitQualifier::ConstantUsd => Some("constant"),
        // Head-count is the default reading of most series; no token helps.
        UnitQualifier::CountNumber => None,
    }
}

/// Builds the normalized search string for one query. Pure and total.
///
/// Token order: cleaned concept, qualifier tokens, sex, age band. An empty
/// result falls back to the raw concept so retrieval always gets some text.
pub fn build_query_terms(slots: &Slots) -> String {
    let mut bits: Vec<String> = Vec::new();

    let concept = clean_concept(&slots.concept);
    if !concept.is_empty() && concept != "unknown" {
        bits.push(concept);
    }

    for q in &slots.unit_qualifiers {
        if let Some(tok) = qualifier_token(*q) {
            bits.push(tok.to_string());
        }
    }

    if let Some(sex) = slots.sex.token() {
        bits.push(sex.to_string());
    }
    if let Some(age) = slots.age_band.token() {
        bits.push(age.to_string());
    }

    let query = bits.join(" ").trim().to_string();
    if query.is_empty() {
        slots.concept.replace('_', " ").trim().to_string()
    } else {
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use question_parser::{AgeBand, Sex};

    fn slots_with(concept: &str) -> Slots {
        Slots {
            concept: concept.into(),
            ..Slots::default()
        }
    }

    #[test]
    fn plain_concept_passes_through() {
        assert_eq!(build_query_terms(&slots_with("gdp")), "gdp");
    }

    #[test]
    fn underscores_become_spaces() {
        assert_eq!(
            build_query_terms(&slots_with("life_expectancy")),
            "life expectancy"
        );
    }

    #[test]
    fn strips_gender_and_age_fragments() {
        assert_eq!(
            build_query_terms(&slots_with("population_female_ages_65+")),
            "population"
        );
        assert_eq!(
            build_query_terms(&slots_with("unemployment_male")),
            "unemployment"
        );
        assert_eq!(
            build_query_terms(&slots_with("population_ages_65_and_above")),
            "population"
        );
    }

    #[test]
    fn emits_qualifier_sex_and_age_tokens() {
        let mut slots = slots_with("gdp");
        slots.unit_qualifiers.insert(UnitQualifier::Ppp);
        slots.unit_qualifiers.insert(UnitQualifier::PerCapita);
        let q = build_query_terms(&slots);
        assert!(q.starts_with("gdp"));
        assert!(q.contains("ppp"));
        assert!(q.contains("per capita"));

        let mut slots = slots_with("population");
        slots.sex = Sex::Female;
        slots.age_band = AgeBand::Age65Up;
        let q = build_query_terms(&slots);
        assert!(q.contains("female"));
        assert!(q.contains("65+"));
    }

    #[test]
    fn count_number_emits_no_token() {
        let mut slots = slots_with("population");
        slots.unit_qualifiers.insert(UnitQualifier::CountNumber);
        assert_eq!(build_query_terms(&slots), "population");
    }

    #[test]
    fn unknown_concept_is_dropped_but_qualifiers_remain() {
        let mut slots = slots_with("unknown");
        slots.unit_qualifiers.insert(UnitQualifier::GrowthRate);
        assert_eq!(build_query_terms(&slots), "growth");
    }

    #[test]
    fn empty_everything_falls_back_to_raw_concept() {
        // Concept reduced to nothing by cleaning, no qualifiers: fall back
        // to the uncleaned concept text.
        let slots = slots_with("female");
        assert_eq!(build_query_terms(&slots), "female");
    }
}
