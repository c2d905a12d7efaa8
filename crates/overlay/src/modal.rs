/// Kinds of modal overlay, ordered by priority (last is top-most).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModalKind {
    Poi,
    Info,
}

/// Set of currently open modals, kept in priority order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalStack {
    open: Vec<ModalKind>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if `kind` was already open.
    pub fn push(&mut self, kind: ModalKind) -> bool {
        match self.open.binary_search(&kind) {
            Ok(_) => false,
            Err(at) => {
                self.open.insert(at, kind);
                true
            }
        }
    }

    /// Returns `false` if `kind` was not open.
    pub fn remove(&mut self, kind: ModalKind) -> bool {
        match self.open.binary_search(&kind) {
            Ok(at) => {
                self.open.remove(at);
                true
            }
            Err(_) => false,
        }
    }

    pub fn top(&self) -> Option<ModalKind> {
        self.open.last().copied()
    }

    pub fn contains(&self, kind: ModalKind) -> bool {
        self.open.binary_search(&kind).is_ok()
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ModalKind> + '_ {
        self.open.iter().copied()
    }
}
