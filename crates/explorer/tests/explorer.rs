use std::collections::BTreeMap;

use catalog::{CatalogConfig, LoadPolicy, RecordSource, SourceSpec};
use explorer::{ExplorerConfig, HostEvent, PoiExplorer};
use foundation::{LatLon, PoiId};
use i18n::{IdentityLocalizer, Localizer, Translations};
use layers::{MapHost, MarkerHandle, MarkerIcon, MarkerTier};
use overlay::{GestureControl, MemoryViewport, ModalKind, OverlayPhase, ViewportOp};
use pretty_assertions::assert_eq;
use runtime::{PoiEvent, StaticDataHost};
use serde_json::json;
use storage::InMemoryStore;
use url::Url;

#[derive(Default)]
struct FakeMap {
    zoom: f64,
    next: u64,
    markers: BTreeMap<u64, MarkerIcon>,
    gestures_enabled: Option<bool>,
    gesture_switches: u32,
}

impl MapHost for FakeMap {
    fn add_marker(&mut self, _position: LatLon, icon: &MarkerIcon) -> MarkerHandle {
        self.next += 1;
        self.markers.insert(self.next, icon.clone());
        MarkerHandle(self.next)
    }

    fn remove_marker(&mut self, marker: MarkerHandle) {
        self.markers.remove(&marker.0);
    }

    fn set_icon(&mut self, marker: MarkerHandle, icon: &MarkerIcon) {
        self.markers.insert(marker.0, icon.clone());
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }
}

impl GestureControl for FakeMap {
    fn disable_gestures(&mut self) {
        self.gestures_enabled = Some(false);
        self.gesture_switches += 1;
    }

    fn enable_gestures(&mut self) {
        self.gestures_enabled = Some(true);
        self.gesture_switches += 1;
    }
}

const POIS_URL: &str = "./data/pois.json";

fn data_host() -> StaticDataHost {
    StaticDataHost::new().with_document(
        POIS_URL,
        json!({"data": [
            {"id": "szyb", "lat": "50,44", "lon": "18,85", "label": "Szyb Prezydent",
             "emoji": "⛏", "embedUrl": "./embeds/szyb.html"},
            {"id": "photo", "lat": 50.45, "lon": 18.86, "label": "Old photo",
             "emoji": "📷", "embedUrl": "./images/photo.jpg"}
        ]}),
    )
}

fn config() -> ExplorerConfig {
    let mut config = ExplorerConfig::default();
    config.overlay.document_base = "https://discover.test/tg/index.html".into();
    config.catalog = CatalogConfig {
        policy: LoadPolicy::AllOrNothing,
        sources: vec![SourceSpec::Records(RecordSource::new(POIS_URL))],
    };
    config
}

type Explorer<L> = PoiExplorer<FakeMap, MemoryViewport, InMemoryStore, L>;

fn explorer_with<L: Localizer>(localizer: L) -> Explorer<L> {
    let map = FakeMap {
        zoom: 17.0,
        ..FakeMap::default()
    };
    PoiExplorer::new(
        &config(),
        map,
        MemoryViewport::new(),
        MemoryViewport::new(),
        InMemoryStore::new(),
        localizer,
    )
    .unwrap()
}

fn loaded() -> Explorer<IdentityLocalizer> {
    let mut explorer = explorer_with(IdentityLocalizer);
    let count = pollster::block_on(explorer.reload(&data_host())).unwrap();
    assert_eq!(count, 2);
    explorer
}

fn handle_of(explorer: &Explorer<IdentityLocalizer>, id: &str) -> MarkerHandle {
    explorer.presenter().handle_of(&PoiId::new(id)).unwrap()
}

#[test]
fn reload_attaches_one_marker_per_poi() {
    let explorer = loaded();
    assert_eq!(explorer.map().markers.len(), 2);
    assert!(explorer.map().markers.values().all(|m| m.tier == MarkerTier::Icon));
}

#[test]
fn failed_reload_leaves_map_empty() {
    let mut explorer = loaded();
    let failing = StaticDataHost::new().with_failure(POIS_URL, 503);
    let err = pollster::block_on(explorer.reload(&failing)).unwrap_err();
    assert_eq!(err.url(), POIS_URL);
    assert!(explorer.map().markers.is_empty());
    assert!(explorer.presenter().is_empty());
}

#[test]
fn marker_click_opens_overlay_and_locks_map() {
    let mut explorer = loaded();
    let szyb = handle_of(&explorer, "szyb");
    explorer.handle(HostEvent::MarkerClicked { handle: szyb });

    assert_eq!(explorer.overlay().active_poi_id(), Some(&PoiId::new("szyb")));
    assert_eq!(explorer.overlay().phase(), OverlayPhase::Opening);
    assert_eq!(explorer.map().gestures_enabled, Some(false));
    assert_eq!(
        explorer.overlay().viewport().ops(),
        &[ViewportOp::Navigate(
            "https://discover.test/tg/embeds/szyb.html?poiId=szyb".into()
        )]
    );

    explorer.handle(HostEvent::PoiViewportLoaded {
        url: "https://discover.test/tg/embeds/szyb.html?poiId=szyb".into(),
    });
    assert_eq!(explorer.overlay().phase(), OverlayPhase::Open);

    let kinds: Vec<&str> = explorer.take_routed().iter().map(PoiEvent::kind).collect();
    assert_eq!(kinds, vec!["marker_activated", "overlay_opened"]);
}

#[test]
fn keyboard_activation_needs_enter_or_space() {
    let mut explorer = loaded();
    let szyb = handle_of(&explorer, "szyb");
    explorer.handle(HostEvent::MarkerKey { handle: szyb, key: "Tab".into() });
    assert!(!explorer.overlay().is_open());
    explorer.handle(HostEvent::MarkerKey { handle: szyb, key: " ".into() });
    assert!(explorer.overlay().is_open());
}

#[test]
fn switching_pois_defers_navigation_until_tick() {
    let mut explorer = loaded();
    let szyb = handle_of(&explorer, "szyb");
    let photo = handle_of(&explorer, "photo");
    explorer.handle(HostEvent::MarkerClicked { handle: szyb });
    explorer.handle(HostEvent::MarkerClicked { handle: szyb });
    explorer.handle(HostEvent::MarkerClicked { handle: photo });

    // The image opens as a generated document; the blanked page load never happens.
    assert_eq!(explorer.tick(), 0);
    let last = explorer.overlay().viewport().ops().last().cloned();
    assert!(matches!(last, Some(ViewportOp::ShowDocument(doc)) if doc.contains("photo.jpg?poiId=photo")));
    assert_eq!(explorer.overlay().active_poi_id(), Some(&PoiId::new("photo")));
}

#[test]
fn completion_repaints_markers() {
    let mut explorer = loaded();
    let szyb = handle_of(&explorer, "szyb");
    explorer.handle(HostEvent::ToggleComplete);
    assert!(!explorer.map().markers[&szyb.0].completed);

    explorer.handle(HostEvent::MarkerClicked { handle: szyb });
    explorer.handle(HostEvent::ToggleComplete);

    assert!(explorer.overlay().is_completed(&PoiId::new("szyb")));
    assert!(explorer.map().markers[&szyb.0].html.contains("is-completed"));
    let photo = handle_of(&explorer, "photo");
    assert!(!explorer.map().markers[&photo.0].completed);
}

#[test]
fn zoom_changes_switch_marker_tier() {
    let mut explorer = loaded();
    explorer.handle(HostEvent::ZoomChanged { zoom: 19.0 });
    assert!(explorer.map().markers.values().all(|m| m.tier == MarkerTier::Labeled));
    explorer.handle(HostEvent::ZoomChanged { zoom: 12.0 });
    assert!(explorer.map().markers.values().all(|m| m.tier == MarkerTier::Dot));
}

#[test]
fn reported_zoom_survives_later_repaints() {
    let mut explorer = loaded();
    explorer.handle(HostEvent::ZoomChanged { zoom: 19.0 });

    let szyb = handle_of(&explorer, "szyb");
    explorer.handle(HostEvent::MarkerClicked { handle: szyb });
    explorer.handle(HostEvent::ToggleComplete);
    assert!(explorer.map().markers[&szyb.0].completed);
    assert!(explorer.map().markers.values().all(|m| m.tier == MarkerTier::Labeled));

    pollster::block_on(explorer.reload(&data_host())).unwrap();
    assert!(explorer.map().markers.values().all(|m| m.tier == MarkerTier::Labeled));
}

#[test]
fn bare_records_still_get_markers() {
    let host = StaticDataHost::new()
        .with_document(POIS_URL, json!([{"id": "a", "lat": "50,44", "lon": "18,85"}]));
    let mut explorer = explorer_with(IdentityLocalizer);
    assert_eq!(pollster::block_on(explorer.reload(&host)).unwrap(), 1);
    assert_eq!(explorer.map().markers.len(), 1);
    assert_eq!(explorer.presenter().pois().next().map(|p| p.label()), Some("a"));
}

#[test]
fn escape_closes_top_most_modal_first() {
    let mut explorer = loaded();
    let szyb = handle_of(&explorer, "szyb");
    explorer.handle(HostEvent::MarkerClicked { handle: szyb });
    explorer.handle(HostEvent::InfoButton);

    assert!(!explorer.overlay().is_open());
    assert!(explorer.info().is_open());
    assert_eq!(explorer.gate().modals().top(), Some(ModalKind::Info));
    // Swapping overlays kept gestures off the whole time.
    assert_eq!(explorer.map().gesture_switches, 1);

    explorer.handle(HostEvent::MarkerClicked { handle: szyb });
    assert_eq!(explorer.gate().modals().len(), 2);

    explorer.handle(HostEvent::KeyDown { key: "Escape".into() });
    assert!(!explorer.info().is_open());
    assert!(explorer.overlay().is_open());
    assert_eq!(explorer.map().gestures_enabled, Some(false));

    explorer.handle(HostEvent::KeyDown { key: "Escape".into() });
    assert!(!explorer.overlay().is_open());
    assert_eq!(explorer.map().gestures_enabled, Some(true));

    explorer.handle(HostEvent::KeyDown { key: "Escape".into() });
    assert_eq!(explorer.map().gesture_switches, 2);
}

#[test]
fn heading_prefers_gps_and_falls_back_to_orientation() {
    let mut explorer = loaded();
    explorer.handle(HostEvent::Position { heading: None });
    assert_eq!(explorer.heading(), None);

    explorer.handle(HostEvent::DeviceOrientation { compass: None, alpha: Some(270.0) });
    explorer.handle(HostEvent::Position { heading: None });
    assert_eq!(explorer.heading(), Some(90.0));

    explorer.handle(HostEvent::Position { heading: Some(130.0) });
    assert_eq!(explorer.heading(), Some(100.0));
}

#[test]
fn language_change_relocalizes_open_overlay() {
    let locales = data_host()
        .with_document(
            "./locales/en.json",
            json!({"app": {"poi": {"complete": "Complete", "completed": "Completed"}}}),
        )
        .with_document(
            "./locales/de.json",
            json!({"app": {"poi": {"complete": "Erledigen", "completed": "Erledigt"}}}),
        );
    let base = Url::parse("https://discover.test/tg/index.html").unwrap();
    let mut explorer = explorer_with(Translations::new(base, "./locales"));
    pollster::block_on(explorer.reload(&locales)).unwrap();

    let szyb = explorer.presenter().handle_of(&PoiId::new("szyb")).unwrap();
    explorer.handle(HostEvent::MarkerClicked { handle: szyb });

    let language = pollster::block_on(explorer.set_language(&locales, "de-DE")).unwrap();
    assert_eq!(language, "de");
    assert_eq!(explorer.tick(), 1);

    let viewport = explorer.overlay().viewport();
    assert_eq!(
        viewport.ops().last(),
        Some(&ViewportOp::Navigate(
            "https://discover.test/tg/embeds/szyb.html?lang=de&poiId=szyb".into()
        ))
    );
    assert_eq!(viewport.complete_button().map(|b| b.label.as_str()), Some("Erledigen"));
}
