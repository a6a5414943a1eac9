//! In-memory state store.

use parking_lot::Mutex;

use super::{StateStore, TraderState};
use crate::error::Result;

/// Volatile [`StateStore`] for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<TraderState>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an initial state.
    #[must_use]
    pub fn with_state(state: TraderState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<TraderState> {
        Ok(self.state.lock().clone())
    }

    fn update(&self, mutate: &mut dyn FnMut(&mut TraderState)) -> Result<TraderState> {
        let mut state = self.state.lock();
        mutate(&mut state);
        Ok(state.clone())
    }
}
