use foundation::{path_has_extension, set_query_param};
use runtime::{DataHost, FetchError};
use serde_json::Value;
use url::Url;

use crate::language::{DEFAULT_LANGUAGE, normalize_language_code};
use crate::localizer::{Localizer, interpolate, lookup_path};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum I18nError {
    #[error("failed to load locale {language}: {source}")]
    Locale {
        language: String,
        #[source]
        source: FetchError,
    },
}

/// Dictionary-backed [`Localizer`].
///
/// Lookups try the active language first, then the default-language
/// dictionary, then the caller's fallback text.
#[derive(Debug, Clone)]
pub struct Translations {
    language: &'static str,
    active: Value,
    fallback: Value,
    document_base: Url,
    locales_base: String,
}

impl Translations {
    /// `document_base` is the page URL content links are resolved against;
    /// `locales_base` is where `{code}.json` files live.
    pub fn new(document_base: Url, locales_base: impl Into<String>) -> Self {
        Self {
            language: DEFAULT_LANGUAGE,
            active: Value::Null,
            fallback: Value::Null,
            document_base,
            locales_base: locales_base.into(),
        }
    }

    /// Installs dictionaries that were loaded elsewhere.
    pub fn with_dictionaries(mut self, language: &str, active: Value, fallback: Value) -> Self {
        self.language = normalize_language_code(language).unwrap_or(DEFAULT_LANGUAGE);
        self.active = active;
        self.fallback = fallback;
        self
    }

    pub fn language(&self) -> &'static str {
        self.language
    }

    fn locale_url(&self, language: &str) -> String {
        format!("{}/{language}.json", self.locales_base.trim_end_matches('/'))
    }

    async fn load_locale<D: DataHost>(&self, host: &D, language: &str) -> Result<Value, I18nError> {
        host.fetch_json(&self.locale_url(language))
            .await
            .map_err(|source| I18nError::Locale {
                language: language.to_string(),
                source,
            })
    }

    /// Switches language, loading dictionaries as needed.
    ///
    /// Unsupported codes fall back to the default language. On failure the
    /// previous language and dictionaries stay in place.
    pub async fn set_language<D: DataHost>(
        &mut self,
        host: &D,
        requested: &str,
    ) -> Result<&'static str, I18nError> {
        let resolved = normalize_language_code(requested).unwrap_or(DEFAULT_LANGUAGE);
        if resolved == self.language && !self.active.is_null() {
            return Ok(resolved);
        }

        let fallback = if self.fallback.is_null() {
            self.load_locale(host, DEFAULT_LANGUAGE).await?
        } else {
            self.fallback.clone()
        };
        let active = if resolved == DEFAULT_LANGUAGE {
            fallback.clone()
        } else {
            self.load_locale(host, resolved).await?
        };

        self.fallback = fallback;
        self.active = active;
        self.language = resolved;
        tracing::info!(language = resolved, "language changed");
        Ok(resolved)
    }
}

impl Localizer for Translations {
    fn translate(&self, key: &str, fallback: &str, vars: &[(&str, &str)]) -> String {
        let template = lookup_path(&self.active, key)
            .and_then(Value::as_str)
            .or_else(|| lookup_path(&self.fallback, key).and_then(Value::as_str))
            .unwrap_or(fallback);
        interpolate(template, vars)
    }

    /// Adds `lang=<code>` to same-origin HTML pages; other URLs pass through
    /// (resolved to absolute form when possible).
    fn localize_url(&self, url: &str) -> String {
        let Ok(mut parsed) = self.document_base.join(url) else {
            return url.to_string();
        };
        let same_origin = parsed.origin() == self.document_base.origin();
        if same_origin && path_has_extension(&parsed, &["html", "htm"]) {
            set_query_param(&mut parsed, "lang", self.language);
        }
        parsed.to_string()
    }
}
