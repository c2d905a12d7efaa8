use runtime::FetchError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog source {url} unavailable: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },
    #[error("catalog source {url} has unexpected shape: {reason}")]
    Shape { url: String, reason: String },
}

impl CatalogError {
    pub fn url(&self) -> &str {
        match self {
            CatalogError::Fetch { url, .. } | CatalogError::Shape { url, .. } => url,
        }
    }
}
