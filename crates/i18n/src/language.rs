use storage::KeyValueStore;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub flag: &'static str,
    pub name: &'static str,
}

pub const DEFAULT_LANGUAGE: &str = "en";

pub const SUPPORTED_LANGUAGES: &[Language] = &[
    Language { code: "pl", flag: "\u{1F1F5}\u{1F1F1}", name: "Polski" },
    Language { code: "en", flag: "\u{1F1EC}\u{1F1E7}", name: "English" },
    Language { code: "de", flag: "\u{1F1E9}\u{1F1EA}", name: "Deutsch" },
    Language { code: "es", flag: "\u{1F1EA}\u{1F1F8}", name: "Espa\u{00F1}ol" },
    Language { code: "fr", flag: "\u{1F1EB}\u{1F1F7}", name: "Fran\u{00E7}ais" },
    Language {
        code: "uk",
        flag: "\u{1F1FA}\u{1F1E6}",
        name: "\u{0423}\u{043A}\u{0440}\u{0430}\u{0457}\u{043D}\u{0441}\u{044C}\u{043A}\u{0430}",
    },
];

fn supported(code: &str) -> Option<&'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|l| l.code == code)
        .map(|l| l.code)
}

/// Maps browser-style tags (`de-AT`, `pl_PL`, `ua`) onto a supported code.
pub fn normalize_language_code(input: &str) -> Option<&'static str> {
    let normalized = input.trim().to_lowercase().replace('_', "-");
    if normalized.is_empty() {
        return None;
    }
    if let Some(code) = supported(&normalized) {
        return Some(code);
    }
    let short = normalized.split('-').next().unwrap_or_default();
    if short == "ua" {
        return Some("uk");
    }
    supported(short)
}

/// Picks the UI language: explicit request, then the stored preference,
/// then the browser's preferred languages, then [`DEFAULT_LANGUAGE`].
pub fn resolve_language<'a>(
    explicit: Option<&str>,
    stored: Option<&str>,
    browser_candidates: impl IntoIterator<Item = &'a str>,
) -> &'static str {
    if let Some(code) = explicit.and_then(normalize_language_code) {
        return code;
    }
    if let Some(code) = stored.and_then(normalize_language_code) {
        return code;
    }
    browser_candidates
        .into_iter()
        .find_map(normalize_language_code)
        .unwrap_or(DEFAULT_LANGUAGE)
}

pub fn language_storage_key(namespace: &str) -> String {
    format!("{namespace}.language")
}

/// Persisted language choice. Storage failures are ignored.
#[derive(Debug)]
pub struct LanguagePreference<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> LanguagePreference<S> {
    pub fn new(store: S, namespace: &str) -> Self {
        Self {
            store,
            key: language_storage_key(namespace),
        }
    }

    pub fn stored(&self) -> Option<&'static str> {
        match self.store.get_item(&self.key) {
            Ok(raw) => raw.as_deref().and_then(normalize_language_code),
            Err(e) => {
                tracing::debug!(key = %self.key, error = %e, "stored language unreadable");
                None
            }
        }
    }

    pub fn remember(&mut self, language: &str) {
        if let Err(e) = self.store.set_item(&self.key, language) {
            tracing::debug!(key = %self.key, error = %e, "language preference not saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::{DisabledStore, InMemoryStore};

    #[test]
    fn normalizes_browser_tags() {
        assert_eq!(normalize_language_code("de-AT"), Some("de"));
        assert_eq!(normalize_language_code(" PL_pl "), Some("pl"));
        assert_eq!(normalize_language_code("ua"), Some("uk"));
        assert_eq!(normalize_language_code("uk-UA"), Some("uk"));
        assert_eq!(normalize_language_code("ja"), None);
        assert_eq!(normalize_language_code(""), None);
    }

    #[test]
    fn resolution_order() {
        assert_eq!(resolve_language(Some("fr"), Some("de"), ["pl"]), "fr");
        assert_eq!(resolve_language(Some("xx"), Some("de"), ["pl"]), "de");
        assert_eq!(resolve_language(None, None, ["ja", "es-MX"]), "es");
        assert_eq!(resolve_language(None, None, ["ja"]), "en");
    }

    #[test]
    fn preference_round_trip_and_failures() {
        let mut pref = LanguagePreference::new(InMemoryStore::new(), "discoverTG");
        assert_eq!(pref.stored(), None);
        pref.remember("pl");
        assert_eq!(pref.stored(), Some("pl"));

        let mut disabled = LanguagePreference::new(DisabledStore, "discoverTG");
        disabled.remember("pl");
        assert_eq!(disabled.stored(), None);
    }
}
