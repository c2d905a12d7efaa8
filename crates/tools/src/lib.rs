use std::fs;
use std::path::Path;

use anyhow::Context;
use catalog::{LoadPolicy, PoiCatalog, PointOfInterest, slugify};
use explorer::ExplorerConfig;
use i18n::language_storage_key;
use runtime::FsDataHost;
use serde::Serialize;
use storage::completion_storage_key;

pub fn read_config(path: &Path) -> anyhow::Result<ExplorerConfig> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    ExplorerConfig::from_json_str(&raw).with_context(|| format!("loading {}", path.display()))
}

/// Loads the configured catalog with source URLs resolved under `root`.
pub fn normalize_catalog(
    config: &ExplorerConfig,
    root: &Path,
    policy: Option<LoadPolicy>,
) -> anyhow::Result<Vec<PointOfInterest>> {
    let mut catalog = config.catalog.clone();
    if let Some(policy) = policy {
        catalog.policy = policy;
    }
    if catalog.sources.is_empty() {
        tracing::warn!("config lists no catalog sources");
    }
    let host = FsDataHost::new(root);
    let pois = pollster::block_on(PoiCatalog::new(catalog).load(&host))
        .context("catalog load failed")?;
    Ok(pois)
}

pub fn slugs<'a>(inputs: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    inputs.into_iter().map(slugify).collect()
}

#[derive(Debug, Serialize)]
pub struct ConfigSummary<'a> {
    pub namespace: &'a str,
    pub completion_key: String,
    pub language_key: String,
    pub sources: usize,
    pub config: &'a ExplorerConfig,
}

pub fn summarize(config: &ExplorerConfig) -> ConfigSummary<'_> {
    ConfigSummary {
        namespace: &config.namespace,
        completion_key: completion_storage_key(&config.namespace),
        language_key: language_storage_key(&config.namespace),
        sources: config.catalog.sources.len(),
        config,
    }
}
