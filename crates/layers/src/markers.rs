use catalog::{Glyph, PointOfInterest};
use foundation::{PoiId, escape_html};
use i18n::Localizer;
use serde::{Deserialize, Serialize};
use storage::CompletionLookup;

use crate::host::{MapHost, MarkerHandle};
use crate::labels::{display_label, truncate_label};
use crate::symbology::GlyphPalette;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenterConfig {
    /// Below this zoom markers are plain dots.
    pub dot_zoom_threshold: f64,
    /// At or above this zoom markers carry a text label.
    pub label_zoom_threshold: f64,
    pub label_max_length: usize,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            dot_zoom_threshold: 16.0,
            label_zoom_threshold: 18.0,
            label_max_length: 24,
        }
    }
}

/// Level of detail, ordered from least to most.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MarkerTier {
    Dot,
    Icon,
    Labeled,
}

impl MarkerTier {
    pub fn for_zoom(zoom: f64, config: &PresenterConfig) -> Self {
        if zoom < config.dot_zoom_threshold {
            MarkerTier::Dot
        } else if zoom < config.label_zoom_threshold {
            MarkerTier::Icon
        } else {
            MarkerTier::Labeled
        }
    }
}

/// Rendered marker, ready to hand to the map host.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerIcon {
    pub tier: MarkerTier,
    pub completed: bool,
    /// Class of the icon container element.
    pub class_name: &'static str,
    /// Escaped markup of the marker body.
    pub html: String,
    /// Untruncated, unescaped label for accessibility APIs.
    pub aria_label: String,
}

/// Read-only state a marker render depends on besides zoom.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub completion: &'a dyn CompletionLookup,
    pub localizer: &'a dyn Localizer,
}

/// Pure mapping from (POI, zoom, completion) to a marker.
pub fn describe_marker(
    poi: &PointOfInterest,
    zoom: f64,
    ctx: RenderContext<'_>,
    config: &PresenterConfig,
    palette: &GlyphPalette,
) -> MarkerIcon {
    let tier = MarkerTier::for_zoom(zoom, config);
    let completed = ctx.completion.is_completed(poi.id());
    let full_label = display_label(poi, ctx.localizer);

    let mut classes = vec!["poi-marker"];
    if tier == MarkerTier::Labeled {
        classes.push("show-label");
    }
    if completed {
        classes.push("is-completed");
    }

    let visual = match (tier, poi.glyph()) {
        (MarkerTier::Dot, glyph) => format!(
            r#"<span class="poi-dot" style="--poi-dot-color: {}" aria-hidden="true"></span>"#,
            escape_html(palette.color_for(glyph))
        ),
        (_, Glyph::Icon(url)) => format!(
            r#"<img class="poi-image" src="{}" alt="" aria-hidden="true">"#,
            escape_html(url)
        ),
        (_, Glyph::Emoji(emoji)) => format!(r#"<span class="poi-emoji">{}</span>"#, escape_html(emoji)),
    };

    let label = if tier == MarkerTier::Labeled {
        format!(
            r#"<span class="poi-label">{}</span>"#,
            escape_html(&truncate_label(&full_label, config.label_max_length))
        )
    } else {
        String::new()
    };

    let html = format!(
        r#"<div class="{}" role="button" aria-label="{}">{visual}{label}</div>"#,
        classes.join(" "),
        escape_html(&full_label)
    );

    MarkerIcon {
        tier,
        completed,
        class_name: "poi-icon",
        html,
        aria_label: full_label,
    }
}

/// How a marker was activated.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MarkerTrigger<'a> {
    Click,
    /// A key press while the marker has focus (`KeyboardEvent.key`).
    Key(&'a str),
}

impl MarkerTrigger<'_> {
    fn activates(self) -> bool {
        match self {
            MarkerTrigger::Click => true,
            MarkerTrigger::Key(key) => key == "Enter" || key == " ",
        }
    }
}

#[derive(Debug, Clone)]
struct AttachedMarker {
    poi: PointOfInterest,
    handle: MarkerHandle,
}

/// Keeps one map marker per POI in sync with zoom and completion state.
#[derive(Debug, Default)]
pub struct PoiMarkerPresenter {
    config: PresenterConfig,
    palette: GlyphPalette,
    markers: Vec<AttachedMarker>,
}

impl PoiMarkerPresenter {
    pub fn new(config: PresenterConfig, palette: GlyphPalette) -> Self {
        Self {
            config,
            palette,
            markers: Vec::new(),
        }
    }

    pub fn config(&self) -> &PresenterConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn pois(&self) -> impl Iterator<Item = &PointOfInterest> + '_ {
        self.markers.iter().map(|m| &m.poi)
    }

    pub fn handle_of(&self, id: &PoiId) -> Option<MarkerHandle> {
        self.markers
            .iter()
            .find(|m| m.poi.id() == id)
            .map(|m| m.handle)
    }

    /// Replaces every attached marker with markers for `pois`.
    pub fn set_pois<M: MapHost + ?Sized>(
        &mut self,
        map: &mut M,
        pois: Vec<PointOfInterest>,
        ctx: RenderContext<'_>,
    ) {
        let zoom = map.zoom();
        self.set_pois_at(map, pois, zoom, ctx);
    }

    /// Like [`Self::set_pois`], rendering for `zoom` instead of the map's own.
    pub fn set_pois_at<M: MapHost + ?Sized>(
        &mut self,
        map: &mut M,
        pois: Vec<PointOfInterest>,
        zoom: f64,
        ctx: RenderContext<'_>,
    ) {
        self.clear(map);
        self.markers = pois
            .into_iter()
            .map(|poi| {
                let icon = describe_marker(&poi, zoom, ctx, &self.config, &self.palette);
                let handle = map.add_marker(poi.coordinates(), &icon);
                AttachedMarker { poi, handle }
            })
            .collect();
        tracing::debug!(count = self.markers.len(), zoom, "markers attached");
    }

    pub fn clear<M: MapHost + ?Sized>(&mut self, map: &mut M) {
        for marker in self.markers.drain(..) {
            map.remove_marker(marker.handle);
        }
    }

    /// Re-derives every icon from the current zoom and completion state.
    pub fn update_icons<M: MapHost + ?Sized>(&self, map: &mut M, ctx: RenderContext<'_>) {
        let zoom = map.zoom();
        self.update_icons_at(map, zoom, ctx);
    }

    /// Re-derives every icon for `zoom`, typically the value a zoom event carried.
    pub fn update_icons_at<M: MapHost + ?Sized>(
        &self,
        map: &mut M,
        zoom: f64,
        ctx: RenderContext<'_>,
    ) {
        if self.markers.is_empty() {
            return;
        }
        for marker in &self.markers {
            let icon = describe_marker(&marker.poi, zoom, ctx, &self.config, &self.palette);
            map.set_icon(marker.handle, &icon);
        }
    }

    /// Re-renders the marker of a single POI. Returns `false` if it is not attached.
    pub fn refresh_marker<M: MapHost + ?Sized>(
        &self,
        map: &mut M,
        id: &PoiId,
        ctx: RenderContext<'_>,
    ) -> bool {
        let Some(marker) = self.markers.iter().find(|m| m.poi.id() == id) else {
            return false;
        };
        let icon = describe_marker(&marker.poi, map.zoom(), ctx, &self.config, &self.palette);
        map.set_icon(marker.handle, &icon);
        true
    }

    /// Resolves a marker interaction to the POI it should open.
    pub fn activation(&self, handle: MarkerHandle, trigger: MarkerTrigger<'_>) -> Option<&PointOfInterest> {
        if !trigger.activates() {
            return None;
        }
        self.markers
            .iter()
            .find(|m| m.handle == handle)
            .map(|m| &m.poi)
    }
}
