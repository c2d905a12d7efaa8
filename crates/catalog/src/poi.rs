use foundation::{LatLon, PoiId};
use serde::{Deserialize, Serialize};

pub const DEFAULT_EMOJI: &str = "\u{1F4CD}";

/// What a marker shows once zoomed in far enough to leave the dot tier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Glyph {
    Emoji(String),
    /// URL of an icon image.
    Icon(String),
}

impl Glyph {
    /// Stable key used for palette lookups.
    pub fn key(&self) -> &str {
        match self {
            Glyph::Emoji(s) | Glyph::Icon(s) => s,
        }
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Glyph::Emoji(DEFAULT_EMOJI.to_string())
    }
}

/// A markable location with detail content. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    id: PoiId,
    coordinates: LatLon,
    label: String,
    label_key: Option<String>,
    glyph: Glyph,
    target_url: String,
}

impl PointOfInterest {
    pub fn new(
        id: impl Into<PoiId>,
        coordinates: LatLon,
        label: impl Into<String>,
        glyph: Glyph,
        target_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            coordinates,
            label: label.into(),
            label_key: None,
            glyph,
            target_url: target_url.into(),
        }
    }

    pub fn with_label_key(mut self, label_key: Option<String>) -> Self {
        self.label_key = label_key;
        self
    }

    /// Re-keys a draft while the catalog is still assembling it.
    pub(crate) fn with_id(mut self, id: PoiId) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> &PoiId {
        &self.id
    }

    pub fn coordinates(&self) -> LatLon {
        self.coordinates
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn label_key(&self) -> Option<&str> {
        self.label_key.as_deref()
    }

    pub fn glyph(&self) -> &Glyph {
        &self.glyph
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }
}
