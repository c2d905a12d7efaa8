//! Composition root for a POI map front-end.
//!
//! [`PoiExplorer`] owns the marker presenter, the POI and info overlays and
//! the interaction gate, and routes host input between them through a typed
//! event queue. Hosts implement the narrow traits ([`MapHost`],
//! [`GestureControl`], [`DetailViewport`], [`KeyValueStore`], [`Localizer`])
//! and forward DOM input as [`HostEvent`]s.

pub mod config;

pub use config::*;

use catalog::{CatalogError, PoiCatalog};
use foundation::math::{HeadingSmoother, heading_from_orientation, normalize_heading};
use i18n::{I18nError, Localizer, Translations};
use layers::{MapHost, MarkerHandle, MarkerTrigger, PoiMarkerPresenter, RenderContext};
use overlay::{
    DetailViewport, GestureControl, InfoOverlay, MapInteractionGate, ModalKind, OverlayError,
    PoiOverlayController,
};
use runtime::{DataHost, EventBus, PoiEvent};
use storage::{CompletionStore, KeyValueStore};

/// Input forwarded by the host page.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    ZoomChanged { zoom: f64 },
    MarkerClicked { handle: MarkerHandle },
    /// Key press on a focused marker (`KeyboardEvent.key`).
    MarkerKey { handle: MarkerHandle, key: String },
    CloseOverlay,
    ToggleComplete,
    InfoButton,
    CloseInfo,
    /// Document-level key press.
    KeyDown { key: String },
    PoiViewportLoaded { url: String },
    /// The localizer was switched to `language`.
    LanguageChanged { language: String },
    /// Geolocation fix; `heading` is the GPS course when available.
    Position { heading: Option<f64> },
    DeviceOrientation { compass: Option<f64>, alpha: Option<f64> },
}

pub struct PoiExplorer<M, V, S, L> {
    map: M,
    presenter: PoiMarkerPresenter,
    overlay: PoiOverlayController<V, S>,
    info: InfoOverlay<V>,
    gate: MapInteractionGate,
    localizer: L,
    catalog: PoiCatalog,
    queue: EventBus,
    routed: Vec<PoiEvent>,
    /// Last zoom reported by the host; the map's own zoom until then.
    zoom: Option<f64>,
    device_heading: Option<f64>,
    heading: HeadingSmoother,
}

impl<M, V, S, L> PoiExplorer<M, V, S, L>
where
    M: MapHost + GestureControl,
    V: DetailViewport,
    S: KeyValueStore,
    L: Localizer,
{
    pub fn new(
        config: &ExplorerConfig,
        map: M,
        poi_viewport: V,
        info_viewport: V,
        store: S,
        localizer: L,
    ) -> Result<Self, OverlayError> {
        let completion = CompletionStore::load(store, &config.namespace);
        let overlay = PoiOverlayController::new(poi_viewport, completion, &config.overlay)?;
        Ok(Self {
            map,
            presenter: PoiMarkerPresenter::new(config.markers, config.palette.clone()),
            overlay,
            info: InfoOverlay::new(info_viewport, config.info_pages.clone()),
            gate: MapInteractionGate::new(),
            localizer,
            catalog: PoiCatalog::new(config.catalog.clone()),
            queue: EventBus::new(),
            routed: Vec::new(),
            zoom: None,
            device_heading: None,
            heading: HeadingSmoother::new(config.heading_smoothing),
        })
    }

    /// Loads the catalog and replaces every marker. On failure the map is
    /// left without markers.
    pub async fn reload<D: DataHost>(&mut self, data: &D) -> Result<usize, CatalogError> {
        match self.catalog.load(data).await {
            Ok(pois) => {
                let count = pois.len();
                let zoom = self.render_zoom();
                let ctx = RenderContext {
                    completion: &self.overlay,
                    localizer: &self.localizer,
                };
                self.presenter.set_pois_at(&mut self.map, pois, zoom, ctx);
                Ok(count)
            }
            Err(e) => {
                tracing::error!(url = e.url(), error = %e, "catalog load failed");
                self.presenter.clear(&mut self.map);
                Err(e)
            }
        }
    }

    pub fn handle(&mut self, event: HostEvent) {
        match event {
            HostEvent::ZoomChanged { zoom } => self.queue.emit(PoiEvent::ZoomChanged { zoom }),
            HostEvent::MarkerClicked { handle } => self.activate(handle, MarkerTrigger::Click),
            HostEvent::MarkerKey { handle, key } => self.activate(handle, MarkerTrigger::Key(&key)),
            HostEvent::CloseOverlay => self.overlay.close(),
            HostEvent::ToggleComplete => {
                self.overlay.toggle_complete(&self.localizer);
            }
            HostEvent::InfoButton => {
                self.overlay.close();
                self.info.open_active(&self.localizer);
            }
            HostEvent::CloseInfo => self.info.close(),
            HostEvent::KeyDown { key } => {
                if key == "Escape" {
                    self.close_top_modal();
                }
            }
            HostEvent::PoiViewportLoaded { url } => {
                self.overlay.on_viewport_loaded(&url);
            }
            HostEvent::LanguageChanged { language } => self.apply_language(language),
            HostEvent::Position { heading } => {
                let raw = heading.and_then(normalize_heading).or(self.device_heading);
                if let Some(raw) = raw {
                    self.heading.update(raw);
                }
            }
            HostEvent::DeviceOrientation { compass, alpha } => {
                self.device_heading = heading_from_orientation(compass, alpha);
            }
        }
        self.pump();
    }

    /// Runs navigations deferred by the POI overlay. Call after yielding to
    /// the host event loop.
    pub fn tick(&mut self) -> usize {
        self.overlay.run_deferred()
    }

    fn activate(&mut self, handle: MarkerHandle, trigger: MarkerTrigger<'_>) {
        if let Some(poi) = self.presenter.activation(handle, trigger) {
            self.queue.emit(PoiEvent::MarkerActivated {
                id: poi.id().clone(),
                target_url: poi.target_url().to_string(),
            });
        }
    }

    fn close_top_modal(&mut self) {
        match self.gate.modals().top() {
            Some(ModalKind::Info) => self.info.close(),
            Some(ModalKind::Poi) => self.overlay.close(),
            None => {}
        }
    }

    fn apply_language(&mut self, language: String) {
        if let Err(e) = self.overlay.refresh_language(&self.localizer) {
            tracing::warn!(error = %e, "overlay not reopened after language change");
        }
        if self.info.is_open() {
            self.info.open_active(&self.localizer);
        }
        self.queue.emit(PoiEvent::LanguageChanged { language });
    }

    /// Routes queued events until every component is quiet.
    fn pump(&mut self) {
        loop {
            // Info first, so swapping the POI overlay for the info page
            // never leaves the stack momentarily empty.
            for event in self.info.drain_events() {
                self.queue.emit(event.event);
            }
            for event in self.overlay.drain_events() {
                self.queue.emit(event.event);
            }
            let batch = self.queue.drain();
            if batch.is_empty() {
                break;
            }
            for event in batch {
                self.route(&event.event);
                self.routed.push(event.event);
            }
        }
    }

    fn route(&mut self, event: &PoiEvent) {
        match event {
            PoiEvent::MarkerActivated { id, target_url } => {
                if let Err(e) = self.overlay.open(id.clone(), target_url, &self.localizer) {
                    tracing::warn!(id = %id, error = %e, "overlay not opened");
                }
            }
            PoiEvent::ZoomChanged { zoom } => {
                self.zoom = Some(*zoom);
                self.update_icons();
            }
            PoiEvent::CompletionChanged { .. }
            | PoiEvent::LanguageChanged { .. } => self.update_icons(),
            PoiEvent::OverlayOpened { .. } => self.gate.acquire(ModalKind::Poi, &mut self.map),
            PoiEvent::OverlayClosed => self.gate.release(ModalKind::Poi, &mut self.map),
            PoiEvent::InfoOpened { .. } => self.gate.acquire(ModalKind::Info, &mut self.map),
            PoiEvent::InfoClosed => self.gate.release(ModalKind::Info, &mut self.map),
        }
    }

    fn render_zoom(&self) -> f64 {
        self.zoom.unwrap_or_else(|| self.map.zoom())
    }

    fn update_icons(&mut self) {
        let zoom = self.render_zoom();
        let ctx = RenderContext {
            completion: &self.overlay,
            localizer: &self.localizer,
        };
        self.presenter.update_icons_at(&mut self.map, zoom, ctx);
    }

    /// Smoothed user heading in degrees, if any reading arrived yet.
    pub fn heading(&self) -> Option<f64> {
        self.heading.current()
    }

    /// Events routed since the last call, in routing order.
    pub fn take_routed(&mut self) -> Vec<PoiEvent> {
        std::mem::take(&mut self.routed)
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn presenter(&self) -> &PoiMarkerPresenter {
        &self.presenter
    }

    pub fn overlay(&self) -> &PoiOverlayController<V, S> {
        &self.overlay
    }

    pub fn info(&self) -> &InfoOverlay<V> {
        &self.info
    }

    pub fn gate(&self) -> &MapInteractionGate {
        &self.gate
    }

    pub fn localizer(&self) -> &L {
        &self.localizer
    }
}

impl<M, V, S> PoiExplorer<M, V, S, Translations>
where
    M: MapHost + GestureControl,
    V: DetailViewport,
    S: KeyValueStore,
{
    /// Loads dictionaries for `requested` and re-renders translated content.
    pub async fn set_language<D: DataHost>(
        &mut self,
        data: &D,
        requested: &str,
    ) -> Result<&'static str, I18nError> {
        let language = self.localizer.set_language(data, requested).await?;
        self.handle(HostEvent::LanguageChanged {
            language: language.to_string(),
        });
        Ok(language)
    }
}
