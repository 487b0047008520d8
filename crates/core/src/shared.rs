use crate::{Action, ActionOutcome, Event, EventBus, GameState, RunError, RunState};
use parking_lot::RwLock;
use std::sync::Arc;

/// Thread-safe handle to one run. Actions take the write lock for their whole
/// duration, so readers only ever see fully applied states.
pub struct SharedRun {
    inner: Arc<RwLock<RunState>>,
}

impl SharedRun {
    pub fn new(run: RunState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(run)),
        }
    }

    pub fn dispatch(&self, action: Action) -> (Result<ActionOutcome, RunError>, Vec<Event>) {
        let mut events = EventBus::default();
        let result = self.inner.write().dispatch(action, &mut events);
        (result, events.drain().collect())
    }

    pub fn snapshot(&self) -> GameState {
        self.inner.read().state.clone()
    }

    pub fn read<R>(&self, f: impl FnOnce(&RunState) -> R) -> R {
        f(&self.inner.read())
    }

    pub fn write<R>(&self, f: impl FnOnce(&mut RunState) -> R) -> R {
        f(&mut self.inner.write())
    }
}

impl Clone for SharedRun {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
