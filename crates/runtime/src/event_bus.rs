use foundation::PoiId;

/// Events exchanged between the POI components.
///
/// Producers push into an [`EventBus`]; the composition root drains it and
/// routes each event to the interested component.
#[derive(Debug, Clone, PartialEq)]
pub enum PoiEvent {
    /// A marker was clicked or activated from the keyboard.
    MarkerActivated { id: PoiId, target_url: String },
    ZoomChanged { zoom: f64 },
    CompletionChanged { id: PoiId, completed: bool },
    /// The POI overlay became visible.
    OverlayOpened { id: PoiId },
    /// The POI overlay became hidden.
    OverlayClosed,
    InfoOpened { page: String },
    InfoClosed,
    LanguageChanged { language: String },
}

impl PoiEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            PoiEvent::MarkerActivated { .. } => "marker_activated",
            PoiEvent::ZoomChanged { .. } => "zoom_changed",
            PoiEvent::CompletionChanged { .. } => "completion_changed",
            PoiEvent::OverlayOpened { .. } => "overlay_opened",
            PoiEvent::OverlayClosed => "overlay_closed",
            PoiEvent::InfoOpened { .. } => "info_opened",
            PoiEvent::InfoClosed => "info_closed",
            PoiEvent::LanguageChanged { .. } => "language_changed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Emission order, 0-based and monotonic per bus.
    pub seq: u64,
    pub event: PoiEvent,
}

#[derive(Debug, Default)]
pub struct EventBus {
    next_seq: u64,
    events: Vec<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: PoiEvent) {
        tracing::trace!(kind = event.kind(), seq = self.next_seq, "event");
        self.events.push(Event {
            seq: self.next_seq,
            event,
        });
        self.next_seq += 1;
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}
