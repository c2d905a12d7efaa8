use catalog::PointOfInterest;
use i18n::Localizer;

const ELLIPSIS: &str = "...";

/// Localized label when the POI has a key, the raw label otherwise.
pub fn display_label(poi: &PointOfInterest, localizer: &dyn Localizer) -> String {
    match poi.label_key() {
        Some(key) => localizer.translate(key, poi.label(), &[]),
        None => poi.label().to_string(),
    }
}

/// Trims `label` and cuts it to `max_chars`, ending in `...` when shortened.
///
/// Limits too small to fit the ellipsis get a bare cut instead.
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    let trimmed = label.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    if max_chars <= ELLIPSIS.len() {
        return trimmed.chars().take(max_chars).collect();
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let head: String = trimmed.chars().take(keep).collect();
    format!("{}{ELLIPSIS}", head.trim_end())
}
