// ABOUTME: File-backed wizard slot stored as JSON under the per-user state directory

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::{PersistedWizard, StateStore, StorageError};
use crate::wizard::WizardState;

/// Single named slot persisted as `<directory>/<slot>.json`
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    /// Store the slot inside `directory`
    pub fn new(directory: impl AsRef<Path>, slot: &str) -> Self {
        Self {
            path: directory.as_ref().join(format!("{slot}.json")),
        }
    }

    /// Store the slot in the default state directory
    pub fn in_default_dir(slot: &str) -> Result<Self> {
        Ok(Self::new(Self::default_dir()?, slot))
    }

    /// Get the default state directory (`~/.signup-wizard/state`)
    pub fn default_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".signup-wizard").join("state"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn try_save(&self, state: &WizardState) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = PersistedWizard::new(state.clone()).to_json()?;

        // Write to a sibling file first so a crash never leaves a torn record
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    pub fn try_load(&self) -> Result<Option<WizardState>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        let record = PersistedWizard::from_json(&content)?;
        Ok(Some(record.state))
    }

    pub fn try_clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl StateStore for FileStateStore {
    fn save(&self, state: &WizardState) {
        match self.try_save(state) {
            Ok(()) => debug!(path = %self.path.display(), "Saved wizard state"),
            Err(e) => warn!(path = %self.path.display(), "Failed to save wizard state: {}", e),
        }
    }

    fn load(&self) -> Option<WizardState> {
        match self.try_load() {
            Ok(state) => state,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    "Discarding stored wizard state: {}", e
                );
                self.clear();
                None
            }
        }
    }

    fn clear(&self) {
        match self.try_clear() {
            Ok(()) => info!(path = %self.path.display(), "Cleared stored wizard state"),
            Err(e) => warn!(path = %self.path.display(), "Failed to clear wizard state: {}", e),
        }
    }
}
