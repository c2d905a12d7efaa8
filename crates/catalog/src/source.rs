use serde::{Deserialize, Serialize};

use crate::poi::Glyph;

/// Declarative description of one catalog source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceSpec {
    /// Ready-made POI records (`{ "data": [...] }` or a bare array).
    Records(RecordSource),
    /// Scraped table rows that need field extraction and filtering.
    Dataset(DatasetSource),
}

impl SourceSpec {
    pub fn url(&self) -> &str {
        match self {
            SourceSpec::Records(s) => &s.url,
            SourceSpec::Dataset(s) => &s.url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSource {
    pub url: String,
    /// Overrides every record's own emoji/icon.
    #[serde(default)]
    pub glyph: Option<Glyph>,
    /// Overrides every record's own `embedUrl`.
    #[serde(default)]
    pub target_url: Option<String>,
    /// When set, records without a `labelKey` get `{prefix}.{id}`.
    #[serde(default)]
    pub label_key_prefix: Option<String>,
}

impl RecordSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            glyph: None,
            target_url: None,
            label_key_prefix: None,
        }
    }
}

/// Column names of a dataset source. Defaults match the scraped
/// Wikipedia tables the dwarf catalogs are built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetFields {
    pub coordinates: String,
    pub label: String,
    pub photos: String,
    pub status: String,
}

impl Default for DatasetFields {
    fn default() -> Self {
        Self {
            coordinates: "Współrzędne".to_string(),
            label: "Imię".to_string(),
            photos: "Zdjęcie".to_string(),
            status: "status".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSource {
    pub url: String,
    #[serde(default)]
    pub fields: DatasetFields,
    /// Rows whose status differs are dropped; `None` keeps every row.
    #[serde(default = "default_accepted_status")]
    pub accepted_status: Option<String>,
    #[serde(default)]
    pub id_prefix: Option<String>,
    #[serde(default = "default_label")]
    pub default_label: String,
    #[serde(default)]
    pub glyph: Glyph,
    /// Used when a row carries no photo.
    #[serde(default)]
    pub fallback_url: Option<String>,
}

impl DatasetSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            fields: DatasetFields::default(),
            accepted_status: default_accepted_status(),
            id_prefix: None,
            default_label: default_label(),
            glyph: Glyph::default(),
            fallback_url: None,
        }
    }
}

fn default_accepted_status() -> Option<String> {
    Some("normal".to_string())
}

fn default_label() -> String {
    "Point".to_string()
}
