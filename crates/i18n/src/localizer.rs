use serde_json::Value;

/// Localization host consumed by markers and overlays.
pub trait Localizer {
    /// Looks up `key`; returns `fallback` (interpolated) when missing.
    fn translate(&self, key: &str, fallback: &str, vars: &[(&str, &str)]) -> String;

    /// Rewrites a content URL for the current language.
    fn localize_url(&self, url: &str) -> String;
}

/// Localizer used when no dictionaries are configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityLocalizer;

impl Localizer for IdentityLocalizer {
    fn translate(&self, _key: &str, fallback: &str, vars: &[(&str, &str)]) -> String {
        interpolate(fallback, vars)
    }

    fn localize_url(&self, url: &str) -> String {
        url.to_string()
    }
}

/// Resolves a dotted path (`app.poi.complete`) inside a JSON dictionary.
pub fn lookup_path<'a>(dictionary: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }
    path.split('.')
        .try_fold(dictionary, |node, key| node.as_object()?.get(key))
}

/// Replaces `{{name}}` placeholders. Unknown names become empty strings;
/// anything that is not a well-formed placeholder is copied verbatim.
pub fn interpolate(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = &after[..end];
        if !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            if let Some((_, value)) = vars.iter().find(|(k, _)| *k == name) {
                out.push_str(value);
            }
        } else {
            out.push_str(&rest[start..start + 2 + end + 2]);
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}
