//! Turns raw source documents into POIs.
//!
//! Individual malformed records are dropped (debug log), never surfaced;
//! only a document whose overall shape is wrong is an error.

use foundation::{LatLon, PoiId, parse_coordinate_pair, parse_decimal};
use serde_json::{Map, Value};

use crate::poi::{Glyph, PointOfInterest};
use crate::slug::slugify;
use crate::source::{DatasetSource, RecordSource};

/// Accepts `{ "data": [...] }` or a bare array.
fn record_array(doc: &Value) -> Result<&Vec<Value>, String> {
    match doc {
        Value::Array(items) => Ok(items),
        Value::Object(obj) => match obj.get("data") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err("expected an array or an object with a `data` array".to_string()),
        },
        _ => Err("expected an array or an object with a `data` array".to_string()),
    }
}

/// Numbers pass through; strings may use a comma decimal separator.
pub fn coordinate_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_decimal(s),
        _ => None,
    }
}

fn non_empty_str<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn natural_id(obj: &Map<String, Value>) -> Option<String> {
    match obj.get("id")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn derived_id(prefix: Option<&str>, label: &str, index: usize) -> String {
    let slug = slugify(label);
    let base = if slug.is_empty() { "poi" } else { slug.as_str() };
    match prefix {
        Some(p) if !p.is_empty() => format!("{p}-{base}-{}", index + 1),
        _ => format!("{base}-{}", index + 1),
    }
}

pub fn records_to_pois(spec: &RecordSource, doc: &Value) -> Result<Vec<PointOfInterest>, String> {
    let items = record_array(doc)?;
    let mut out = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let Some(obj) = item.as_object() else {
            tracing::debug!(url = %spec.url, index, "dropping non-object record");
            continue;
        };

        let lat = obj.get("lat").and_then(coordinate_value);
        let lon = obj.get("lon").and_then(coordinate_value);
        let Some(coordinates) = lat.zip(lon).and_then(|(lat, lon)| LatLon::checked(lat, lon))
        else {
            tracing::debug!(url = %spec.url, index, "dropping record with unparsable coordinates");
            continue;
        };

        let id = natural_id(obj);
        let label = non_empty_str(obj, "label")
            .map(str::to_string)
            .or_else(|| id.clone())
            .unwrap_or_default();
        let id = id.unwrap_or_else(|| derived_id(None, &label, index));

        let target_url = spec
            .target_url
            .clone()
            .or_else(|| non_empty_str(obj, "embedUrl").map(str::to_string))
            .unwrap_or_default();

        let glyph = spec.glyph.clone().unwrap_or_else(|| {
            if let Some(icon) = non_empty_str(obj, "iconUrl") {
                Glyph::Icon(icon.to_string())
            } else if let Some(emoji) = non_empty_str(obj, "emoji") {
                Glyph::Emoji(emoji.to_string())
            } else {
                Glyph::default()
            }
        });

        let label_key = non_empty_str(obj, "labelKey")
            .map(str::to_string)
            .or_else(|| spec.label_key_prefix.as_ref().map(|p| format!("{p}.{id}")));

        out.push(
            PointOfInterest::new(PoiId::new(id), coordinates, label, glyph, target_url)
                .with_label_key(label_key),
        );
    }

    Ok(out)
}

pub fn dataset_to_pois(spec: &DatasetSource, doc: &Value) -> Result<Vec<PointOfInterest>, String> {
    let rows = record_array(doc)?;
    let fields = &spec.fields;
    let mut out = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        let Some(obj) = row.as_object() else {
            continue;
        };

        if let Some(accepted) = &spec.accepted_status
            && obj.get(&fields.status).and_then(Value::as_str) != Some(accepted.as_str())
        {
            continue;
        }

        let Some(coordinates) = obj
            .get(&fields.coordinates)
            .and_then(Value::as_str)
            .and_then(parse_coordinate_pair)
        else {
            tracing::debug!(url = %spec.url, index, "dropping row with unparsable coordinates");
            continue;
        };

        let label = non_empty_str(obj, &fields.label)
            .unwrap_or(spec.default_label.as_str())
            .to_string();
        let id = derived_id(spec.id_prefix.as_deref(), &label, index);

        let photo = obj
            .get(&fields.photos)
            .and_then(Value::as_array)
            .and_then(|photos| photos.first())
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty());
        let Some(target_url) = photo.map(str::to_string).or_else(|| spec.fallback_url.clone())
        else {
            tracing::debug!(url = %spec.url, index, id = %id, "dropping row without photo or fallback");
            continue;
        };

        out.push(PointOfInterest::new(
            PoiId::new(id),
            coordinates,
            label,
            spec.glyph.clone(),
            target_url,
        ));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn comma_decimal_records_parse() {
        let doc = json!([{"id": "a", "lat": "50,44", "lon": "18,85", "label": "A", "embedUrl": "./a.html"}]);
        let pois = records_to_pois(&RecordSource::new("./p.json"), &doc).unwrap();
        assert_eq!(pois.len(), 1);
        assert_eq!(pois[0].id().as_str(), "a");
        assert!((pois[0].coordinates().lat - 50.44).abs() < 1e-9);
        assert!((pois[0].coordinates().lon - 18.85).abs() < 1e-9);
    }

    #[test]
    fn records_use_overrides_and_prefixes() {
        let doc = json!({"data": [
            {"id": "g1", "lat": 50.1, "lon": 18.9, "label": "Gwarek", "emoji": "x", "embedUrl": "./own.html"}
        ]});
        let mut spec = RecordSource::new("./data/gwarek.json");
        spec.glyph = Some(Glyph::Emoji("🗿".into()));
        spec.target_url = Some("./embeds/pomnik-gwarka.html".into());
        spec.label_key_prefix = Some("poi".into());

        let pois = records_to_pois(&spec, &doc).unwrap();
        assert_eq!(pois[0].glyph(), &Glyph::Emoji("🗿".into()));
        assert_eq!(pois[0].target_url(), "./embeds/pomnik-gwarka.html");
        assert_eq!(pois[0].label_key(), Some("poi.g1"));
    }

    #[test]
    fn records_prefer_icon_then_emoji() {
        let doc = json!([
            {"id": "i", "lat": 1, "lon": 2, "label": "I", "iconUrl": "./i.png", "emoji": "e", "embedUrl": "./i.html"},
            {"id": "e", "lat": 1, "lon": 2, "label": "E", "emoji": "e", "embedUrl": "./e.html"},
            {"id": "d", "lat": 1, "lon": 2, "label": "D", "embedUrl": "./d.html"}
        ]);
        let pois = records_to_pois(&RecordSource::new("u"), &doc).unwrap();
        let glyphs: Vec<&Glyph> = pois.iter().map(|p| p.glyph()).collect();
        assert_eq!(
            glyphs,
            vec![&Glyph::Icon("./i.png".into()), &Glyph::Emoji("e".into()), &Glyph::default()]
        );
    }

    #[test]
    fn malformed_records_are_dropped_silently() {
        let doc = json!([
            "not an object",
            {"id": "bad-lat", "lat": "north", "lon": 1, "embedUrl": "./x.html"},
            {"id": "no-url", "lat": 1, "lon": 1},
            {"lat": 1, "lon": 1, "label": "Plac Solny", "embedUrl": "./r.html"}
        ]);
        let pois = records_to_pois(&RecordSource::new("u"), &doc).unwrap();
        let ids: Vec<&str> = pois.iter().map(|p| p.id().as_str()).collect();
        assert_eq!(ids, vec!["no-url", "plac-solny-4"]);
    }

    #[test]
    fn bare_record_keeps_id_as_label_and_empty_target() {
        let doc = json!([{"id": "a", "lat": "50,44", "lon": "18,85"}]);
        let pois = records_to_pois(&RecordSource::new("./p.json"), &doc).unwrap();
        assert_eq!(pois.len(), 1);
        assert_eq!(pois[0].id().as_str(), "a");
        assert_eq!(pois[0].label(), "a");
        assert!((pois[0].coordinates().lat - 50.44).abs() < 1e-9);
        assert!((pois[0].coordinates().lon - 18.85).abs() < 1e-9);
        assert_eq!(pois[0].target_url(), "");
    }

    #[test]
    fn wrong_document_shape_is_an_error() {
        assert!(records_to_pois(&RecordSource::new("u"), &json!({"items": []})).is_err());
        assert!(dataset_to_pois(&DatasetSource::new("u"), &json!(42)).is_err());
    }

    #[test]
    fn dataset_rows_are_filtered_and_normalized() {
        let doc = json!([
            {"status": "normal", "Współrzędne": "51°06′N 17°02′E / 51,1097 17,0319",
             "Imię": " Papa Krasnal ", "Zdjęcie": ["https://upload.wikimedia.org/papa.jpg"]},
            {"status": "removed", "Współrzędne": "x / 51,1 17,0", "Imię": "Gone", "Zdjęcie": []},
            {"status": "normal", "Współrzędne": "brak", "Imię": "Lost"},
            {"status": "normal", "Współrzędne": "x / 51,2 17,1", "Imię": "", "Zdjęcie": []}
        ]);
        let mut spec = DatasetSource::new("./DataParser/krasnale.json");
        spec.id_prefix = Some("krasnal".into());
        spec.default_label = "Krasnal".into();
        spec.fallback_url = Some("https://pl.wikipedia.org/wiki/Wroc%C5%82awskie_krasnale".into());

        let pois = dataset_to_pois(&spec, &doc).unwrap();
        let ids: Vec<&str> = pois.iter().map(|p| p.id().as_str()).collect();
        assert_eq!(ids, vec!["krasnal-papa-krasnal-1", "krasnal-krasnal-4"]);
        assert_eq!(pois[0].label(), "Papa Krasnal");
        assert_eq!(pois[0].target_url(), "https://upload.wikimedia.org/papa.jpg");
        assert_eq!(pois[1].label(), "Krasnal");
        assert_eq!(
            pois[1].target_url(),
            "https://pl.wikipedia.org/wiki/Wroc%C5%82awskie_krasnale"
        );
    }

    #[test]
    fn dataset_without_status_filter_keeps_all_rows() {
        let doc = json!([{"Współrzędne": "x / 1,5 2,5", "Imię": "A", "Zdjęcie": ["a.jpg"]}]);
        let mut spec = DatasetSource::new("u");
        spec.accepted_status = None;
        assert_eq!(dataset_to_pois(&spec, &doc).unwrap().len(), 1);
    }
}
