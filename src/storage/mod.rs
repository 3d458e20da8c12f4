// ABOUTME: Local persistence for the wizard: one named slot holding the serialized state
// All adapter operations are best-effort; failures are logged and never reach callers

pub mod file_store;
pub mod memory_store;

pub use file_store::FileStateStore;
pub use memory_store::MemoryStateStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::wizard::WizardState;

/// Default slot name, shared by every store implementation
pub const DEFAULT_SLOT: &str = "multi-step-form-data";

/// Version written into every persisted record
///
/// Records carrying any other version are discarded on load.
pub const STORAGE_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Stored record has version {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },
}

/// On-disk envelope around the wizard state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedWizard {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub state: WizardState,
}

impl PersistedWizard {
    pub fn new(state: WizardState) -> Self {
        Self {
            version: STORAGE_VERSION,
            saved_at: Utc::now(),
            state,
        }
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a stored record, rejecting other versions
    pub fn from_json(raw: &str) -> Result<Self, StorageError> {
        #[derive(Deserialize)]
        struct VersionProbe {
            version: u32,
        }

        let probe: VersionProbe = serde_json::from_str(raw)?;
        if probe.version != STORAGE_VERSION {
            return Err(StorageError::VersionMismatch {
                found: probe.version,
                expected: STORAGE_VERSION,
            });
        }

        Ok(serde_json::from_str(raw)?)
    }
}

/// Persistence adapter for the wizard state
pub trait StateStore: Send + Sync {
    /// Write the full state into the slot
    fn save(&self, state: &WizardState);

    /// Read the slot; `None` when empty, unreadable or from another version
    fn load(&self) -> Option<WizardState>;

    /// Empty the slot
    fn clear(&self);
}

/// Store that never keeps anything, used when persistence is disabled
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStateStore;

impl StateStore for NullStateStore {
    fn save(&self, _state: &WizardState) {}

    fn load(&self) -> Option<WizardState> {
        None
    }

    fn clear(&self) {}
}
