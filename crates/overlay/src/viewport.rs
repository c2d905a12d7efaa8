/// Location of an empty viewport.
pub const BLANK_URL: &str = "about:blank";
/// Location reported while a generated document is shown.
pub const SRCDOC_URL: &str = "about:srcdoc";

/// State of the complete toggle shown next to an open POI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteButton {
    pub completed: bool,
    pub label: String,
}

/// The embedded document view an overlay drives (an iframe in the browser).
pub trait DetailViewport {
    fn navigate(&mut self, url: &str);
    /// Shows an inline generated document in place of the current location.
    fn show_document(&mut self, html: &str);
    fn clear_document(&mut self);
    fn current_url(&self) -> String;
    fn set_visible(&mut self, visible: bool);
    fn is_visible(&self) -> bool;
    fn set_loading(&mut self, loading: bool);
    fn render_complete_button(&mut self, button: &CompleteButton);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewportOp {
    Navigate(String),
    ShowDocument(String),
    ClearDocument,
}

/// Viewport without a renderer. Records navigations for inspection.
#[derive(Debug, Clone)]
pub struct MemoryViewport {
    location: String,
    document: Option<String>,
    visible: bool,
    loading: bool,
    button: Option<CompleteButton>,
    ops: Vec<ViewportOp>,
}

impl Default for MemoryViewport {
    fn default() -> Self {
        Self {
            location: BLANK_URL.to_string(),
            document: None,
            visible: false,
            loading: false,
            button: None,
            ops: Vec::new(),
        }
    }
}

impl MemoryViewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn complete_button(&self) -> Option<&CompleteButton> {
        self.button.as_ref()
    }

    pub fn ops(&self) -> &[ViewportOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<ViewportOp> {
        std::mem::take(&mut self.ops)
    }
}

impl DetailViewport for MemoryViewport {
    fn navigate(&mut self, url: &str) {
        self.location = url.to_string();
        self.ops.push(ViewportOp::Navigate(url.to_string()));
    }

    fn show_document(&mut self, html: &str) {
        self.document = Some(html.to_string());
        self.ops.push(ViewportOp::ShowDocument(html.to_string()));
    }

    fn clear_document(&mut self) {
        if self.document.take().is_some() {
            self.ops.push(ViewportOp::ClearDocument);
        }
    }

    fn current_url(&self) -> String {
        if self.document.is_some() {
            SRCDOC_URL.to_string()
        } else {
            self.location.clone()
        }
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn render_complete_button(&mut self, button: &CompleteButton) {
        self.button = Some(button.clone());
    }
}
