// ABOUTME: In-memory wizard slot for tests and ephemeral runs
// Keeps the serialized record so reads go through the same parsing path as files

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::warn;

use super::{PersistedWizard, StateStore};
use crate::wizard::WizardState;

/// Shared in-memory slot; clones observe the same contents
#[derive(Debug, Clone, Default)]
pub struct MemoryStateStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<String>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Raw serialized record currently held, if any
    pub fn raw(&self) -> Option<String> {
        self.slot().clone()
    }

    /// Replace the raw slot contents
    pub fn set_raw(&self, raw: impl Into<String>) {
        *self.slot() = Some(raw.into());
    }

    pub fn is_empty(&self) -> bool {
        self.slot().is_none()
    }
}

impl StateStore for MemoryStateStore {
    fn save(&self, state: &WizardState) {
        match PersistedWizard::new(state.clone()).to_json() {
            Ok(raw) => *self.slot() = Some(raw),
            Err(e) => warn!("Failed to serialize wizard state: {}", e),
        }
    }

    fn load(&self) -> Option<WizardState> {
        let raw = self.raw()?;
        match PersistedWizard::from_json(&raw) {
            Ok(record) => Some(record.state),
            Err(e) => {
                warn!("Discarding stored wizard state: {}", e);
                self.clear();
                None
            }
        }
    }

    fn clear(&self) {
        *self.slot() = None;
    }
}
