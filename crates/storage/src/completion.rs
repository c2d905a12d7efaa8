use std::collections::BTreeSet;

use foundation::PoiId;

use crate::kv::KeyValueStore;

const COMPLETED_KEY_SUFFIX: &str = "completedPois.v1";

/// Storage key of the completion set for an app namespace.
///
/// Scoping by namespace keeps unrelated catalogs that happen to share POI ids
/// from sharing completion state.
pub fn completion_storage_key(namespace: &str) -> String {
    format!("{namespace}.{COMPLETED_KEY_SUFFIX}")
}

/// Read access to completion state, as needed by marker rendering.
pub trait CompletionLookup {
    fn is_completed(&self, id: &PoiId) -> bool;
}

/// The set of POIs the user marked as done, persisted as a JSON array of ids.
///
/// Storage failures never reach the caller: an unreadable or corrupt entry
/// loads as an empty set and failed writes are logged and dropped.
#[derive(Debug)]
pub struct CompletionStore<S> {
    store: S,
    key: String,
    completed: BTreeSet<PoiId>,
}

impl<S: KeyValueStore> CompletionStore<S> {
    pub fn load(store: S, namespace: &str) -> Self {
        let key = completion_storage_key(namespace);
        let completed = read_completed(&store, &key);
        tracing::debug!(key, count = completed.len(), "loaded completion set");
        Self {
            store,
            key,
            completed,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PoiId> + '_ {
        self.completed.iter()
    }

    /// Flips membership of `id`, persists, and returns the new state.
    pub fn toggle(&mut self, id: &PoiId) -> bool {
        let completed = if self.completed.remove(id) {
            false
        } else {
            self.completed.insert(id.clone());
            true
        };
        self.persist();
        completed
    }

    fn persist(&mut self) {
        let ids: Vec<&str> = self.completed.iter().map(PoiId::as_str).collect();
        let raw = match serde_json::to_string(&ids) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "could not encode completion set");
                return;
            }
        };
        if let Err(e) = self.store.set_item(&self.key, &raw) {
            tracing::warn!(key = %self.key, error = %e, "completion set not persisted");
        }
    }
}

impl<S> CompletionLookup for CompletionStore<S> {
    fn is_completed(&self, id: &PoiId) -> bool {
        self.completed.contains(id)
    }
}

fn read_completed<S: KeyValueStore>(store: &S, key: &str) -> BTreeSet<PoiId> {
    let raw = match store.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return BTreeSet::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "completion set unreadable, starting empty");
            return BTreeSet::new();
        }
    };
    if raw.trim().is_empty() {
        return BTreeSet::new();
    }
    match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| match v {
                serde_json::Value::String(s) => Some(PoiId::new(s)),
                _ => None,
            })
            .collect(),
        Ok(_) => BTreeSet::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "completion set corrupt, starting empty");
            BTreeSet::new()
        }
    }
}
