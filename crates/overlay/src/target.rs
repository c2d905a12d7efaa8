use foundation::{PoiId, escape_html, path_has_extension, set_query_param};
use i18n::Localizer;
use url::Url;

use crate::error::OverlayError;

/// Targets with these extensions are wrapped in a viewer document.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "avif", "svg"];

/// Localizes `target`, resolves it against `base` and tags it with the POI id.
pub fn build_target_url(
    base: &Url,
    target: &str,
    poi_id: &PoiId,
    poi_id_param: &str,
    localizer: &dyn Localizer,
) -> Result<Url, OverlayError> {
    let localized = localizer.localize_url(target);
    let mut url = base.join(&localized).map_err(|e| OverlayError::Target {
        url: localized.clone(),
        reason: e.to_string(),
    })?;
    set_query_param(&mut url, poi_id_param, poi_id.as_str());
    Ok(url)
}

pub fn is_image_url(url: &Url) -> bool {
    path_has_extension(url, IMAGE_EXTENSIONS)
}

/// Minimal full-bleed page showing a single image on a dark background.
pub fn image_viewer_document(image_url: &str) -> String {
    let src = escape_html(image_url);
    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <style>
      html, body {{ margin: 0; width: 100%; height: 100%; background: #101114; }}
      .frame {{ width: 100%; height: 100%; display: grid; place-items: center; }}
      img {{ max-width: 100vw; max-height: 100vh; object-fit: contain; display: block; }}
    </style>
  </head>
  <body>
    <div class="frame"><img src="{src}" alt=""></div>
  </body>
</html>"#
    )
}
