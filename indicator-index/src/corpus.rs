//! Turns catalog rows into the documents that get embedded.

use catalogs::IndicatorMeta;

/// Expands code-convention segments of an indicator id into plain words so
/// the embedding model can match on dimensions the name often omits.
fn id_metadata_terms(id: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();

    if id.contains(".FE") {
        parts.push("female");
    }
    if id.contains(".MA") {
        parts.push("male");
    }
    if id.contains(".ZG") {
        parts.push("growth rate annual percentage");
    }
    if id.contains(".ZS") {
        parts.push("percentage share");
    }
    if id.contains(".CD") {
        parts.push("current US dollars");
    }
    if id.contains(".KD") {
        parts.push("constant US dollars");
    }
    if id.contains(".PP") {
        parts.push("PPP purchasing power parity");
    }
    if id.contains(".PC") {
        parts.push("per capita");
    }
    if id.contains("1524") {
        parts.push("ages 15-24 youth");
    }
    if id.contains("65UP") {
        parts.push("ages 65 and above elderly");
    }

    parts.join(" ")
}

/// One embedding document per indicator: name and unit up front (highest
/// signal), then the id-derived metadata, then the longer catalog prose.
pub fn indicator_document(meta: &IndicatorMeta) -> String {
    let title = format!("{} {}", meta.name, meta.unit);
    format!(
        "{}. {}. {}. Topics: {}",
        title.trim(),
        id_metadata_terms(&meta.id),
        meta.source_note,
        meta.topics
    )
    .trim()
    .to_string()
}

/// Appends synonym terms so short queries match catalog vocabulary.
pub fn expand_query(query: &str) -> String {
    let lower = query.to_lowercase();
    let mut expanded = query.to_string();

    if lower.contains("female") {
        expanded.push_str(" women girls");
    }
    if lower.contains("male") {
        expanded.push_str(" men boys");
    }
    if lower.contains("population") {
        expanded.push_str(" people inhabitants");
    }
    if lower.contains("gdp") {
        expanded.push_str(" gross domestic product economy");
    }
    if lower.contains("unemployment") {
        expanded.push_str(" jobless without work");
    }
    if lower.contains("inflation") {
        expanded.push_str(" cpi consumer price index");
    }
    if query.contains("65+") {
        expanded.push_str(" ages 65 and above elderly older senior");
    }
    if query.contains("15-24") {
        expanded.push_str(" youth young ages 15 to 24");
    }

    expanded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_carries_id_derived_dimensions() {
        let meta = IndicatorMeta {
            id: "SL.TLF.CACT.FE.ZS".into(),
            name: "Labor force participation rate, female".into(),
            unit: "%".into(),
            topics: "Labor".into(),
            source_note: "Share of the female population ages 15+".into(),
            source: String::new(),
        };
        let doc = indicator_document(&meta);
        assert!(doc.starts_with("Labor force participation rate, female %"));
        assert!(doc.contains("female"));
        assert!(doc.contains("percentage share"));
        assert!(doc.contains("Topics: Labor"));
    }

    #[test]
    fn query_expansion_adds_synonyms() {
        let q = expand_query("population female 65+");
        assert!(q.contains("people inhabitants"));
        assert!(q.contains("women girls"));
        assert!(q.contains("elderly"));
    }

    #[test]
    fn expansion_keeps_plain_queries_untouched() {
        assert_eq!(expand_query("energy use"), "energy use");
    }
}
