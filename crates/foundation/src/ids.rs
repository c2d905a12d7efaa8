use serde::{Deserialize, Serialize};

/// Stable identifier of a point of interest, scoped to one catalog.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoiId(String);

impl PoiId {
    pub fn new(id: impl Into<String>) -> Self {
        PoiId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for PoiId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PoiId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PoiId {
    fn from(s: &str) -> Self {
        PoiId(s.to_string())
    }
}

impl From<String> for PoiId {
    fn from(s: String) -> Self {
        PoiId(s)
    }
}
