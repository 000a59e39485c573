//! Indicator catalog: strict JSONL reader and id lookup table.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::errors::CatalogError;

/// One row of the indicator catalog.
///
/// Metadata fields other than `id` and `name` are frequently empty in the
/// upstream dump, so they default to empty strings on load.
#[derive(Clone, Debug, Deserialize)]
pub struct IndicatorMeta {
    /// Indicator code, e.g. `NY.GDP.MKTP.CD`.
    pub id: String,
    /// Human-readable series name.
    pub name: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub topics: String,
    #[serde(default)]
    pub source_note: String,
    #[serde(default)]
    pub source: String,
}

/// In-memory indicator table, keyed by indicator code.
///
/// Loaded once at startup and shared read-only across requests.
#[derive(Clone, Debug, Default)]
pub struct IndicatorCatalog {
    rows: Vec<IndicatorMeta>,
    by_id: HashMap<String, usize>,
}

impl IndicatorCatalog {
    /// Reads the indicator catalog from a JSONL file.
    ///
    /// - Expects at least `id` and `name` per row.
    /// - Fails on malformed rows with [`CatalogError::Parse`].
    /// - Ignores empty lines.
    ///
    /// # Errors
    /// - [`CatalogError::Io`] if the file cannot be read.
    /// - [`CatalogError::Parse`] if any line fails strict deserialization.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        info!("Reading indicator catalog: {:?}", path.as_ref());

        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);

        let mut rows = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let row: IndicatorMeta = serde_json::from_str(&line)
                .map_err(|e| CatalogError::Parse(format!("line {} parse error: {}", i + 1, e)))?;
            rows.push(row);
        }

        debug!("Loaded {} indicator rows", rows.len());
        Ok(Self::from_rows(rows))
    }

    /// Builds a catalog from already-materialized rows (used by tests).
    pub fn from_rows(rows: Vec<IndicatorMeta>) -> Self {
        let by_id = rows
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();
        Self { rows, by_id }
    }

    /// Looks up an indicator by its code.
    pub fn get(&self, id: &str) -> Option<&IndicatorMeta> {
        self.by_id.get(id).map(|&i| &self.rows[i])
    }

    /// All rows in file order.
    pub fn rows(&self) -> &[IndicatorMeta] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
