use std::collections::BTreeMap;

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request for {url} failed: {reason}")]
    Transport { url: String, reason: String },
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
    #[error("invalid JSON from {url}: {reason}")]
    Decode { url: String, reason: String },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::Transport { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Decode { url, .. } => url,
        }
    }
}

/// Source of JSON documents (catalog sources, locale files).
///
/// Implementations are single-threaded; futures need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait DataHost {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError>;
}

/// Serves pre-registered documents. Unknown URLs answer with HTTP 404.
#[derive(Debug, Default, Clone)]
pub struct StaticDataHost {
    documents: BTreeMap<String, Result<Value, FetchError>>,
}

impl StaticDataHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, url: impl Into<String>, body: Value) -> Self {
        self.insert(url, body);
        self
    }

    pub fn with_failure(mut self, url: impl Into<String>, status: u16) -> Self {
        let url = url.into();
        self.documents.insert(
            url.clone(),
            Err(FetchError::Status { url, status }),
        );
        self
    }

    pub fn insert(&mut self, url: impl Into<String>, body: Value) {
        self.documents.insert(url.into(), Ok(body));
    }
}

impl DataHost for StaticDataHost {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        match self.documents.get(url) {
            Some(result) => result.clone(),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod fs_host {
    use std::path::{Component, Path, PathBuf};

    use serde_json::Value;

    use super::{DataHost, FetchError};

    /// Resolves relative URLs (`./data/poi.json`) against a directory.
    #[derive(Debug, Clone)]
    pub struct FsDataHost {
        root: PathBuf,
    }

    impl FsDataHost {
        pub fn new(root: impl Into<PathBuf>) -> Self {
            Self { root: root.into() }
        }

        pub fn root(&self) -> &Path {
            &self.root
        }

        fn resolve(&self, url: &str) -> Result<PathBuf, FetchError> {
            let relative = Path::new(url.trim_start_matches("./"));
            // Stay inside the root; absolute paths and `..` are refused.
            let escapes = relative
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
            if escapes {
                return Err(FetchError::Transport {
                    url: url.to_string(),
                    reason: "path escapes data root".to_string(),
                });
            }
            Ok(self.root.join(relative))
        }
    }

    impl DataHost for FsDataHost {
        async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
            let path = self.resolve(url)?;
            let raw = std::fs::read_to_string(&path).map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    FetchError::Status {
                        url: url.to_string(),
                        status: 404,
                    }
                } else {
                    FetchError::Transport {
                        url: url.to_string(),
                        reason: e.to_string(),
                    }
                }
            })?;
            tracing::debug!(url, path = %path.display(), bytes = raw.len(), "read data file");
            serde_json::from_str(&raw).map_err(|e| FetchError::Decode {
                url: url.to_string(),
                reason: e.to_string(),
            })
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use fs_host::FsDataHost;

#[cfg(target_arch = "wasm32")]
mod browser_host {
    use gloo_net::http::Request;
    use serde_json::Value;

    use super::{DataHost, FetchError};

    /// Fetches documents with the browser `fetch` API.
    #[derive(Debug, Default, Clone)]
    pub struct BrowserDataHost;

    impl DataHost for BrowserDataHost {
        async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
            let response = Request::get(url)
                .send()
                .await
                .map_err(|e| FetchError::Transport {
                    url: url.to_string(),
                    reason: e.to_string(),
                })?;
            if !response.ok() {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status: response.status(),
                });
            }
            response
                .json::<Value>()
                .await
                .map_err(|e| FetchError::Decode {
                    url: url.to_string(),
                    reason: e.to_string(),
                })
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser_host::BrowserDataHost;
