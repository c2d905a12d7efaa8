use std::collections::BTreeMap;

use i18n::Localizer;
use runtime::{Event, EventBus, PoiEvent};
use serde::{Deserialize, Serialize};

use crate::viewport::{BLANK_URL, DetailViewport};

pub const DEFAULT_INFO_PAGE: &str = "credits";

/// Static pages reachable from the info button, keyed by page name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfoPages {
    pub pages: BTreeMap<String, String>,
    /// Shown for unknown page keys.
    pub default_page: String,
}

impl Default for InfoPages {
    fn default() -> Self {
        Self {
            pages: BTreeMap::from([(
                DEFAULT_INFO_PAGE.to_string(),
                "./embeds/info-credits.html".to_string(),
            )]),
            default_page: DEFAULT_INFO_PAGE.to_string(),
        }
    }
}

impl InfoPages {
    /// Page key and URL for `key`, falling back to the default page.
    pub fn resolve<'a>(&'a self, key: &'a str) -> Option<(&'a str, &'a str)> {
        self.pages
            .get_key_value(key)
            .or_else(|| self.pages.get_key_value(self.default_page.as_str()))
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Debug)]
pub struct InfoOverlay<V> {
    viewport: V,
    pages: InfoPages,
    active_page: String,
    outbox: EventBus,
}

impl<V: DetailViewport> InfoOverlay<V> {
    pub fn new(viewport: V, pages: InfoPages) -> Self {
        let active_page = pages.default_page.clone();
        Self {
            viewport,
            pages,
            active_page,
            outbox: EventBus::new(),
        }
    }

    /// Opens `key` (or the default page). Returns the page actually shown.
    pub fn open_page(&mut self, key: &str, localizer: &dyn Localizer) -> Option<&str> {
        let Some((page, url)) = self.pages.resolve(key) else {
            tracing::warn!(page = key, "no info page configured");
            return None;
        };
        let page = page.to_string();
        let url = localizer.localize_url(url);
        self.viewport.navigate(&url);
        if !self.viewport.is_visible() {
            self.viewport.set_visible(true);
            self.outbox.emit(PoiEvent::InfoOpened { page: page.clone() });
        }
        self.active_page = page;
        Some(&self.active_page)
    }

    /// Opens the page shown last (the default page initially).
    pub fn open_active(&mut self, localizer: &dyn Localizer) -> Option<&str> {
        let key = self.active_page.clone();
        self.open_page(&key, localizer)
    }

    pub fn close(&mut self) {
        self.viewport.navigate(BLANK_URL);
        if self.viewport.is_visible() {
            self.viewport.set_visible(false);
            self.outbox.emit(PoiEvent::InfoClosed);
        }
    }

    pub fn is_open(&self) -> bool {
        self.viewport.is_visible()
    }

    pub fn active_page(&self) -> &str {
        &self.active_page
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        self.outbox.drain()
    }
}
