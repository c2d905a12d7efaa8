use foundation::{Generation, GenerationCounter, PoiId};
use i18n::Localizer;
use runtime::{DeferredQueue, Event, EventBus, PoiEvent};
use serde::{Deserialize, Serialize};
use storage::{CompletionLookup, CompletionStore, KeyValueStore};
use url::Url;

use crate::error::OverlayError;
use crate::target::{build_target_url, image_viewer_document, is_image_url};
use crate::viewport::{BLANK_URL, CompleteButton, DetailViewport, SRCDOC_URL};

pub const COMPLETED_LABEL_KEY: &str = "app.poi.completed";
pub const COMPLETE_LABEL_KEY: &str = "app.poi.complete";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum OverlayPhase {
    #[default]
    Closed,
    /// Navigation issued, content not loaded yet.
    Opening,
    Open,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Relative targets resolve against this URL.
    pub document_base: String,
    /// Query parameter carrying the POI id to the loaded page.
    pub poi_id_param: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            document_base: "http://localhost/".to_string(),
            poi_id_param: "poiId".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct ActivePoi {
    id: PoiId,
    /// Target as given to `open`, before localization.
    target_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingLoad {
    Navigation(String),
    Document,
}

#[derive(Debug)]
struct DeferredNavigation {
    generation: Generation,
    url: String,
}

/// Owns the POI detail overlay: which POI is showing, what the viewport
/// loads, and the user's completion set.
///
/// Navigation away from a non-blank viewport is two-phase: the viewport is
/// blanked immediately and the target is loaded from [`Self::run_deferred`]
/// once the host has yielded. Only the newest `open` may complete; older
/// deferred navigations are dropped.
///
/// Generated documents all report [`SRCDOC_URL`] when they load, so a
/// document superseded by another document leaves one load event behind
/// that must not complete the newer open.
#[derive(Debug)]
pub struct PoiOverlayController<V, S> {
    viewport: V,
    completion: CompletionStore<S>,
    document_base: Url,
    poi_id_param: String,
    phase: OverlayPhase,
    active: Option<ActivePoi>,
    pending: Option<PendingLoad>,
    stale_document_loads: u32,
    generations: GenerationCounter,
    deferred: DeferredQueue<DeferredNavigation>,
    outbox: EventBus,
}

impl<V: DetailViewport, S: KeyValueStore> PoiOverlayController<V, S> {
    pub fn new(
        viewport: V,
        completion: CompletionStore<S>,
        config: &OverlayConfig,
    ) -> Result<Self, OverlayError> {
        let document_base =
            Url::parse(&config.document_base).map_err(|e| OverlayError::DocumentBase {
                url: config.document_base.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            viewport,
            completion,
            document_base,
            poi_id_param: config.poi_id_param.clone(),
            phase: OverlayPhase::Closed,
            active: None,
            pending: None,
            stale_document_loads: 0,
            generations: GenerationCounter::new(),
            deferred: DeferredQueue::new(),
            outbox: EventBus::new(),
        })
    }

    pub fn open(
        &mut self,
        poi_id: PoiId,
        target_url: &str,
        localizer: &dyn Localizer,
    ) -> Result<(), OverlayError> {
        let target = build_target_url(
            &self.document_base,
            target_url,
            &poi_id,
            &self.poi_id_param,
            localizer,
        )?;
        let generation = self.generations.advance();
        let superseded_document = self.pending == Some(PendingLoad::Document);
        tracing::debug!(id = %poi_id, url = %target, generation = generation.value(), "opening overlay");

        self.active = Some(ActivePoi {
            id: poi_id.clone(),
            target_url: target_url.to_string(),
        });
        self.phase = OverlayPhase::Opening;
        self.viewport.set_loading(true);
        self.set_visible(true, &poi_id);
        self.sync_complete_button(localizer);

        if is_image_url(&target) {
            if superseded_document {
                self.stale_document_loads += 1;
            }
            self.viewport.show_document(&image_viewer_document(target.as_str()));
            self.pending = Some(PendingLoad::Document);
            return Ok(());
        }

        self.stale_document_loads = 0;
        self.viewport.clear_document();
        let url = String::from(target);
        self.pending = Some(PendingLoad::Navigation(url.clone()));
        if self.viewport.current_url() == BLANK_URL {
            self.viewport.navigate(&url);
        } else {
            self.viewport.navigate(BLANK_URL);
            self.deferred.defer(DeferredNavigation { generation, url });
        }
        Ok(())
    }

    /// Issues navigations deferred by `open`. Returns how many were issued.
    pub fn run_deferred(&mut self) -> usize {
        let mut issued = 0;
        for nav in self.deferred.drain() {
            if !self.generations.is_current(nav.generation) {
                tracing::debug!(url = %nav.url, generation = nav.generation.value(), "stale navigation dropped");
                continue;
            }
            self.viewport.navigate(&nav.url);
            issued += 1;
        }
        issued
    }

    pub fn has_deferred(&self) -> bool {
        !self.deferred.is_empty()
    }

    /// Viewport load notification. Returns `true` if it completed the pending open.
    pub fn on_viewport_loaded(&mut self, loaded_url: &str) -> bool {
        if loaded_url == SRCDOC_URL && self.stale_document_loads > 0 {
            self.stale_document_loads -= 1;
            tracing::debug!(remaining = self.stale_document_loads, "superseded document load ignored");
            return false;
        }
        let done = match &self.pending {
            Some(PendingLoad::Navigation(url)) => url == loaded_url,
            Some(PendingLoad::Document) => loaded_url == SRCDOC_URL,
            None => false,
        };
        if done {
            self.pending = None;
            self.phase = OverlayPhase::Open;
            self.viewport.set_loading(false);
        }
        done
    }

    pub fn close(&mut self) {
        self.generations.advance();
        self.deferred.clear();
        self.pending = None;
        self.stale_document_loads = 0;
        self.active = None;
        self.phase = OverlayPhase::Closed;
        self.viewport.set_loading(false);
        self.viewport.clear_document();
        self.viewport.navigate(BLANK_URL);
        if self.viewport.is_visible() {
            self.viewport.set_visible(false);
            self.outbox.emit(PoiEvent::OverlayClosed);
        }
    }

    /// Flips completion of the active POI. Returns the new state, or `None`
    /// when nothing is open.
    pub fn toggle_complete(&mut self, localizer: &dyn Localizer) -> Option<bool> {
        let id = self.active.as_ref()?.id.clone();
        let completed = self.completion.toggle(&id);
        self.sync_complete_button(localizer);
        self.outbox.emit(PoiEvent::CompletionChanged { id, completed });
        Some(completed)
    }

    /// Re-renders translated chrome and reloads the open POI in the new language.
    pub fn refresh_language(&mut self, localizer: &dyn Localizer) -> Result<(), OverlayError> {
        self.sync_complete_button(localizer);
        if !self.is_open() {
            return Ok(());
        }
        match self.active.clone() {
            Some(active) => self.open(active.id, &active.target_url, localizer),
            None => Ok(()),
        }
    }

    pub fn is_completed(&self, id: &PoiId) -> bool {
        self.completion.is_completed(id)
    }

    pub fn active_poi_id(&self) -> Option<&PoiId> {
        self.active.as_ref().map(|a| &a.id)
    }

    pub fn is_open(&self) -> bool {
        self.viewport.is_visible()
    }

    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn completion(&self) -> &CompletionStore<S> {
        &self.completion
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        self.outbox.drain()
    }

    fn set_visible(&mut self, visible: bool, id: &PoiId) {
        let was_visible = self.viewport.is_visible();
        self.viewport.set_visible(visible);
        if visible && !was_visible {
            self.outbox.emit(PoiEvent::OverlayOpened { id: id.clone() });
        }
    }

    fn sync_complete_button(&mut self, localizer: &dyn Localizer) {
        let Some(active) = &self.active else {
            return;
        };
        let completed = self.completion.is_completed(&active.id);
        let label = if completed {
            localizer.translate(COMPLETED_LABEL_KEY, "Completed", &[])
        } else {
            localizer.translate(COMPLETE_LABEL_KEY, "Complete", &[])
        };
        self.viewport
            .render_complete_button(&CompleteButton { completed, label });
    }
}

impl<V, S> CompletionLookup for PoiOverlayController<V, S> {
    fn is_completed(&self, id: &PoiId) -> bool {
        self.completion.is_completed(id)
    }
}
