use catalog::CatalogConfig;
use foundation::LatLon;
use foundation::math::DEFAULT_HEADING_SMOOTHING;
use layers::{GlyphPalette, PresenterConfig};
use overlay::{InfoPages, OverlayConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_NAMESPACE: &str = "discoverTG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub center: LatLon,
    pub radius_meters: f64,
    pub start_zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: LatLon::new(50.4445, 18.8554),
            radius_meters: 8000.0,
            start_zoom: 18.0,
            min_zoom: 14.0,
            max_zoom: 20.0,
        }
    }
}

/// Everything a map front-end needs to wire up the POI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Prefix for persisted keys.
    pub namespace: String,
    pub map: MapConfig,
    pub markers: PresenterConfig,
    pub palette: GlyphPalette,
    pub overlay: OverlayConfig,
    pub catalog: CatalogConfig,
    pub info_pages: InfoPages,
    pub heading_smoothing: f64,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            map: MapConfig::default(),
            markers: PresenterConfig::default(),
            palette: GlyphPalette::default(),
            overlay: OverlayConfig::default(),
            catalog: CatalogConfig::default(),
            info_pages: InfoPages::default(),
            heading_smoothing: DEFAULT_HEADING_SMOOTHING,
        }
    }
}

impl ExplorerConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.namespace.trim().is_empty() {
            return Err(invalid("namespace", "must not be empty"));
        }
        let m = &self.markers;
        if !(m.dot_zoom_threshold <= m.label_zoom_threshold) {
            return Err(invalid(
                "markers",
                format!(
                    "dot_zoom_threshold ({}) exceeds label_zoom_threshold ({})",
                    m.dot_zoom_threshold, m.label_zoom_threshold
                ),
            ));
        }
        if m.label_max_length < 4 {
            return Err(invalid(
                "markers.label_max_length",
                format!("{} is too short to hold an ellipsis", m.label_max_length),
            ));
        }
        if !(self.heading_smoothing > 0.0 && self.heading_smoothing <= 1.0) {
            return Err(invalid(
                "heading_smoothing",
                format!("{} is outside (0, 1]", self.heading_smoothing),
            ));
        }
        let map = &self.map;
        if !(map.min_zoom <= map.start_zoom && map.start_zoom <= map.max_zoom) {
            return Err(invalid(
                "map",
                format!(
                    "start_zoom {} not within [{}, {}]",
                    map.start_zoom, map.min_zoom, map.max_zoom
                ),
            ));
        }
        if LatLon::checked(map.center.lat, map.center.lon).is_none() {
            return Err(invalid("map.center", "coordinates out of range"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::LoadPolicy;

    #[test]
    fn empty_object_yields_defaults() {
        let config = ExplorerConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ExplorerConfig::default());
        assert_eq!(config.namespace, "discoverTG");
        assert_eq!(config.overlay.poi_id_param, "poiId");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = ExplorerConfig::from_json_str(
            r#"{
                "namespace": "discoverWRO",
                "markers": {"label_max_length": 30},
                "catalog": {"policy": "skip_failed_sources"}
            }"#,
        )
        .unwrap();
        assert_eq!(config.markers.label_max_length, 30);
        assert_eq!(config.markers.dot_zoom_threshold, 16.0);
        assert_eq!(config.catalog.policy, LoadPolicy::SkipFailedSources);
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let err = ExplorerConfig::from_json_str(
            r#"{"markers": {"dot_zoom_threshold": 19, "label_zoom_threshold": 17}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "markers", .. }));
    }

    #[test]
    fn rejects_bad_smoothing_and_short_labels() {
        assert!(ExplorerConfig::from_json_str(r#"{"heading_smoothing": 0}"#).is_err());
        assert!(ExplorerConfig::from_json_str(r#"{"heading_smoothing": 1.5}"#).is_err());
        assert!(ExplorerConfig::from_json_str(r#"{"markers": {"label_max_length": 3}}"#).is_err());
        assert!(ExplorerConfig::from_json_str(r#"{"heading_smoothing": 1}"#).is_ok());
    }

    #[test]
    fn reports_malformed_json() {
        assert!(matches!(
            ExplorerConfig::from_json_str("{"),
            Err(ConfigError::Parse(_))
        ));
    }
}
