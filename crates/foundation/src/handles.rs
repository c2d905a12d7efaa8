/// Monotonic generation token.
///
/// Work tagged with a `Generation` may only commit its side effects while the
/// issuing [`GenerationCounter`] still reports it as current.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default, Clone)]
pub struct GenerationCounter {
    current: u64,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new generation; every previously issued token becomes stale.
    pub fn advance(&mut self) -> Generation {
        self.current = self.current.wrapping_add(1);
        Generation(self.current)
    }

    pub fn current(&self) -> Generation {
        Generation(self.current)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.current == generation.0
    }
}
