use crate::modal::{ModalKind, ModalStack};

/// Background map gesture switches (drag, scroll zoom, box zoom, keyboard).
pub trait GestureControl {
    fn disable_gestures(&mut self);
    fn enable_gestures(&mut self);
}

/// Suppresses map gestures while any modal overlay is open.
#[derive(Debug, Default)]
pub struct MapInteractionGate {
    disabled: bool,
    modals: ModalStack,
}

impl MapInteractionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn disable<H: GestureControl + ?Sized>(&mut self, host: &mut H) {
        if !self.disabled {
            host.disable_gestures();
            self.disabled = true;
        }
    }

    /// No-op while any modal is still held.
    pub fn enable<H: GestureControl + ?Sized>(&mut self, host: &mut H) {
        if !self.modals.is_empty() {
            tracing::debug!(modals = self.modals.len(), "gestures stay off while a modal is open");
            return;
        }
        if self.disabled {
            host.enable_gestures();
            self.disabled = false;
        }
    }

    pub fn acquire<H: GestureControl + ?Sized>(&mut self, kind: ModalKind, host: &mut H) {
        self.modals.push(kind);
        self.disable(host);
    }

    /// Gestures come back only once the last modal is released.
    pub fn release<H: GestureControl + ?Sized>(&mut self, kind: ModalKind, host: &mut H) {
        self.modals.remove(kind);
        if self.modals.is_empty() {
            self.enable(host);
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn modals(&self) -> &ModalStack {
        &self.modals
    }
}
