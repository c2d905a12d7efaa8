use std::collections::HashSet;

use foundation::PoiId;
use runtime::DataHost;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::normalize::{dataset_to_pois, records_to_pois};
use crate::poi::PointOfInterest;
use crate::source::SourceSpec;

/// What to do when one source cannot be loaded.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPolicy {
    /// The first failing source fails the whole load.
    #[default]
    AllOrNothing,
    /// Failing sources are logged and skipped.
    SkipFailedSources,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub policy: LoadPolicy,
    #[serde(default)]
    pub sources: Vec<SourceSpec>,
}

/// Loads and normalizes POIs from an ordered list of sources.
#[derive(Debug, Clone)]
pub struct PoiCatalog {
    config: CatalogConfig,
}

impl PoiCatalog {
    pub fn new(config: CatalogConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Fetches every source in order and returns the combined list.
    ///
    /// Ids in the result are pairwise distinct.
    pub async fn load<D: DataHost>(&self, host: &D) -> Result<Vec<PointOfInterest>, CatalogError> {
        let mut pois = Vec::new();
        let mut skipped = 0usize;

        for source in &self.config.sources {
            match load_source(host, source).await {
                Ok(mut loaded) => {
                    tracing::debug!(url = source.url(), count = loaded.len(), "catalog source loaded");
                    pois.append(&mut loaded);
                }
                Err(e) => match self.config.policy {
                    LoadPolicy::AllOrNothing => return Err(e),
                    LoadPolicy::SkipFailedSources => {
                        tracing::warn!(url = source.url(), error = %e, "skipping catalog source");
                        skipped += 1;
                    }
                },
            }
        }

        let pois = ensure_unique_ids(pois);
        tracing::info!(count = pois.len(), skipped, "catalog loaded");
        Ok(pois)
    }
}

async fn load_source<D: DataHost>(
    host: &D,
    source: &SourceSpec,
) -> Result<Vec<PointOfInterest>, CatalogError> {
    let url = source.url();
    let doc = host
        .fetch_json(url)
        .await
        .map_err(|source| CatalogError::Fetch {
            url: url.to_string(),
            source,
        })?;
    let normalized = match source {
        SourceSpec::Records(spec) => records_to_pois(spec, &doc),
        SourceSpec::Dataset(spec) => dataset_to_pois(spec, &doc),
    };
    normalized.map_err(|reason| CatalogError::Shape {
        url: url.to_string(),
        reason,
    })
}

/// Suffixes `-2`, `-3`, ... onto repeated ids, keeping the first occurrence.
fn ensure_unique_ids(pois: Vec<PointOfInterest>) -> Vec<PointOfInterest> {
    let mut seen: HashSet<PoiId> = HashSet::with_capacity(pois.len());
    pois.into_iter()
        .map(|poi| {
            if seen.insert(poi.id().clone()) {
                return poi;
            }
            let base = poi.id().as_str().to_string();
            let mut n = 2usize;
            let unique = loop {
                let candidate = PoiId::new(format!("{base}-{n}"));
                if !seen.contains(&candidate) {
                    break candidate;
                }
                n += 1;
            };
            tracing::warn!(id = %base, renamed = %unique, "duplicate POI id in catalog");
            seen.insert(unique.clone());
            poi.with_id(unique)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poi::Glyph;
    use crate::source::{DatasetSource, RecordSource};
    use pretty_assertions::assert_eq;
    use runtime::{FetchError, StaticDataHost};
    use serde_json::json;

    fn config(policy: LoadPolicy) -> CatalogConfig {
        let mut gwarek = RecordSource::new("./data/gwarek.json");
        gwarek.glyph = Some(Glyph::Emoji("🗿".into()));
        gwarek.target_url = Some("./embeds/pomnik-gwarka.html".into());
        CatalogConfig {
            policy,
            sources: vec![
                SourceSpec::Records(RecordSource::new("./data/poi.json")),
                SourceSpec::Records(gwarek),
            ],
        }
    }

    fn poi_doc() -> serde_json::Value {
        json!({"data": [
            {"id": "rynek", "lat": 50.44, "lon": 18.85, "label": "Rynek", "emoji": "⛲", "embedUrl": "./embeds/rynek.html"}
        ]})
    }

    fn gwarek_doc() -> serde_json::Value {
        json!({"data": [{"id": "g", "lat": "50,45", "lon": "18,86", "label": "Gwarek"}]})
    }

    #[test]
    fn loads_sources_in_order() {
        let host = StaticDataHost::new()
            .with_document("./data/poi.json", poi_doc())
            .with_document("./data/gwarek.json", gwarek_doc());
        let pois = pollster::block_on(PoiCatalog::new(config(LoadPolicy::AllOrNothing)).load(&host))
            .unwrap();
        let ids: Vec<&str> = pois.iter().map(|p| p.id().as_str()).collect();
        assert_eq!(ids, vec!["rynek", "g"]);
        assert_eq!(pois[1].target_url(), "./embeds/pomnik-gwarka.html");
    }

    #[test]
    fn all_or_nothing_fails_on_first_missing_source() {
        let host = StaticDataHost::new()
            .with_document("./data/poi.json", poi_doc())
            .with_failure("./data/gwarek.json", 503);
        let err = pollster::block_on(PoiCatalog::new(config(LoadPolicy::AllOrNothing)).load(&host))
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::Fetch {
                url: "./data/gwarek.json".into(),
                source: FetchError::Status {
                    url: "./data/gwarek.json".into(),
                    status: 503
                },
            }
        );
    }

    #[test]
    fn skip_policy_keeps_healthy_sources() {
        let host = StaticDataHost::new().with_document("./data/gwarek.json", gwarek_doc());
        let pois =
            pollster::block_on(PoiCatalog::new(config(LoadPolicy::SkipFailedSources)).load(&host))
                .unwrap();
        assert_eq!(pois.len(), 1);
        assert_eq!(pois[0].id().as_str(), "g");
    }

    #[test]
    fn shape_errors_carry_the_source_url() {
        let host = StaticDataHost::new()
            .with_document("./data/poi.json", json!("nope"))
            .with_document("./data/gwarek.json", gwarek_doc());
        let err = pollster::block_on(PoiCatalog::new(config(LoadPolicy::AllOrNothing)).load(&host))
            .unwrap_err();
        assert!(matches!(err, CatalogError::Shape { .. }));
        assert_eq!(err.url(), "./data/poi.json");
    }

    #[test]
    fn ids_are_pairwise_distinct() {
        let dup = json!({"data": [
            {"id": "a", "lat": 1, "lon": 1, "label": "A", "embedUrl": "./a.html"},
            {"id": "a", "lat": 1, "lon": 1, "label": "A", "embedUrl": "./a.html"},
            {"id": "a-2", "lat": 1, "lon": 1, "label": "A", "embedUrl": "./a.html"}
        ]});
        let dataset = json!([
            {"status": "normal", "Współrzędne": "x / 1,0 1,0", "Imię": "Same", "Zdjęcie": ["s.jpg"]},
            {"status": "normal", "Współrzędne": "x / 1,0 1,0", "Imię": "Same", "Zdjęcie": ["s.jpg"]}
        ]);
        let host = StaticDataHost::new()
            .with_document("./a.json", dup)
            .with_document("./d.json", dataset);
        let catalog = PoiCatalog::new(CatalogConfig {
            policy: LoadPolicy::AllOrNothing,
            sources: vec![
                SourceSpec::Records(RecordSource::new("./a.json")),
                SourceSpec::Dataset(DatasetSource::new("./d.json")),
            ],
        });
        let pois = pollster::block_on(catalog.load(&host)).unwrap();
        let ids: Vec<&str> = pois.iter().map(|p| p.id().as_str()).collect();
        assert_eq!(ids, vec!["a", "a-2", "a-2-2", "same-1", "same-2"]);

        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn empty_config_loads_nothing() {
        let pois = pollster::block_on(PoiCatalog::new(CatalogConfig::default()).load(&StaticDataHost::new()))
            .unwrap();
        assert!(pois.is_empty());
    }
}
