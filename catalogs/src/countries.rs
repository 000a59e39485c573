//! Country catalog and alias resolution to World Bank 3-letter codes.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::errors::CatalogError;

/// One row of the country catalog.
#[derive(Clone, Debug, Deserialize)]
pub struct CountryMeta {
    pub name: String,
    #[serde(default)]
    pub iso3: String,
    #[serde(default)]
    pub wb2_code: String,
    pub wb3_code: String,
}

/// Country table plus the lowercase alias map used by [`normalize_country`].
///
/// [`normalize_country`]: CountryCatalog::normalize_country
#[derive(Clone, Debug, Default)]
pub struct CountryCatalog {
    rows: Vec<CountryMeta>,
    aliases: HashMap<String, String>,
}

impl CountryCatalog {
    /// Reads the country catalog from a JSONL file and builds the alias map.
    ///
    /// `aliases_path` may point at an optional JSON object of extra
    /// `alias -> wb3` overrides; a missing file is ignored with a warning.
    ///
    /// # Errors
    /// - [`CatalogError::Io`] if the catalog file cannot be read.
    /// - [`CatalogError::Parse`] if any line fails strict deserialization.
    pub fn load(
        path: impl AsRef<Path>,
        aliases_path: Option<&Path>,
    ) -> Result<Self, CatalogError> {
        info!("Reading country catalog: {:?}", path.as_ref());

        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);

        let mut rows = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let row: CountryMeta = serde_json::from_str(&line)
                .map_err(|e| CatalogError::Parse(format!("line {} parse error: {}", i + 1, e)))?;
            rows.push(row);
        }

        debug!("Loaded {} country rows", rows.len());

        let mut aliases = HashMap::new();

        // Custom overrides load first so catalog-derived keys win on collision.
        if let Some(p) = aliases_path {
            match std::fs::read_to_string(p) {
                Ok(raw) => match serde_json::from_str::<HashMap<String, String>>(&raw) {
                    Ok(extra) => {
                        debug!("Loaded {} custom country aliases", extra.len());
                        for (k, v) in extra {
                            aliases.insert(k.to_lowercase(), v);
                        }
                    }
                    Err(e) => warn!("Ignoring malformed aliases file {:?}: {}", p, e),
                },
                Err(e) => warn!("Ignoring unreadable aliases file {:?}: {}", p, e),
            }
        }

        for row in &rows {
            let wb3 = row.wb3_code.clone();
            for key in [&row.name, &row.iso3, &row.wb2_code, &row.wb3_code] {
                if !key.is_empty() {
                    aliases.insert(key.to_lowercase(), wb3.clone());
                }
            }
        }

        // Common shortcuts the catalog itself does not carry.
        for (k, v) in [
            ("ksa", "SAU"),
            ("saudi", "SAU"),
            ("المملكة العربية السعودية", "SAU"),
            ("السعودية", "SAU"),
            ("usa", "USA"),
            ("united states", "USA"),
            ("us", "USA"),
            ("uk", "GBR"),
            ("united kingdom", "GBR"),
            ("egypt", "EGY"),
        ] {
            aliases.insert(k.to_string(), v.to_string());
        }

        Ok(Self { rows, aliases })
    }

    /// Builds a catalog from rows only (used by tests).
    pub fn from_rows(rows: Vec<CountryMeta>) -> Self {
        let mut cat = Self {
            rows,
            aliases: HashMap::new(),
        };
        for row in &cat.rows {
            let wb3 = row.wb3_code.clone();
            for key in [&row.name, &row.iso3, &row.wb2_code, &row.wb3_code] {
                if !key.is_empty() {
                    cat.aliases.insert(key.to_lowercase(), wb3.clone());
                }
            }
        }
        cat
    }

    /// Maps free country text to a World Bank 3-letter code.
    ///
    /// Lowercases and trims the input, rewrites a couple of long official
    /// names to their common forms, then consults the alias map.
    ///
    /// # Errors
    /// - [`CatalogError::EmptyCountry`] for blank input.
    /// - [`CatalogError::UnknownCountry`] when no alias matches.
    pub fn normalize_country(&self, country_text: &str) -> Result<String, CatalogError> {
        if country_text.trim().is_empty() {
            return Err(CatalogError::EmptyCountry);
        }

        let key = country_text
            .trim()
            .to_lowercase()
            .replace("kingdom of saudi arabia", "saudi arabia")
            .replace("united states of america", "united states");

        self.aliases
            .get(&key)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownCountry(country_text.to_string()))
    }

    pub fn rows(&self) -> &[CountryMeta] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> CountryCatalog {
        let mut cat = CountryCatalog::from_rows(vec![
            CountryMeta {
                name: "Saudi Arabia".into(),
                iso3: "SAU".into(),
                wb2_code: "SA".into(),
                wb3_code: "SAU".into(),
            },
            CountryMeta {
                name: "India".into(),
                iso3: "IND".into(),
                wb2_code: "IN".into(),
                wb3_code: "IND".into(),
            },
        ]);
        cat.aliases.insert("ksa".into(), "SAU".into());
        cat
    }

    #[test]
    fn resolves_name_and_codes() {
        let cat = fixture();
        assert_eq!(cat.normalize_country("Saudi Arabia").unwrap(), "SAU");
        assert_eq!(cat.normalize_country("ind").unwrap(), "IND");
        assert_eq!(cat.normalize_country("  KSA ").unwrap(), "SAU");
    }

    #[test]
    fn rewrites_official_long_names() {
        let cat = fixture();
        assert_eq!(
            cat.normalize_country("Kingdom of Saudi Arabia").unwrap(),
            "SAU"
        );
    }

    #[test]
    fn rejects_blank_and_unknown() {
        let cat = fixture();
        assert!(matches!(
            cat.normalize_country("   "),
            Err(CatalogError::EmptyCountry)
        ));
        assert!(matches!(
            cat.normalize_country("Atlantis"),
            Err(CatalogError::UnknownCountry(_))
        ));
    }
}
