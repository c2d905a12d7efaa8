use std::collections::BTreeMap;

use catalog::Glyph;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DOT_COLOR: &str = "#16a34a";

/// Dot colours for the low-zoom tier, keyed by glyph (emoji or icon URL).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphPalette {
    pub colors: BTreeMap<String, String>,
    pub default_color: String,
}

impl Default for GlyphPalette {
    fn default() -> Self {
        Self {
            colors: BTreeMap::new(),
            default_color: DEFAULT_DOT_COLOR.to_string(),
        }
    }
}

impl GlyphPalette {
    pub fn with_color(mut self, glyph_key: impl Into<String>, color: impl Into<String>) -> Self {
        self.colors.insert(glyph_key.into(), color.into());
        self
    }

    pub fn color_for(&self, glyph: &Glyph) -> &str {
        self.colors
            .get(glyph.key())
            .map(String::as_str)
            .unwrap_or(&self.default_color)
    }
}
