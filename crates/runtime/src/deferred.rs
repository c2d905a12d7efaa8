//! FIFO of work deferred until the host yields back from its event loop.
//!
//! This is the "continue on the next task" half of a two-phase operation:
//! the caller performs the immediate half, defers the rest, and the host
//! calls [`DeferredQueue::drain`] on its next turn. Tasks come back in
//! insertion order; superseded work is filtered by the caller.

#[derive(Debug)]
pub struct DeferredQueue<T> {
    tasks: Vec<T>,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self { tasks: Vec::new() }
    }
}

impl<T> DeferredQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn defer(&mut self, payload: T) {
        self.tasks.push(payload);
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Removes and returns every task in insertion order.
    pub fn drain(&mut self) -> Vec<T> {
        std::mem::take(&mut self.tasks)
    }
}
