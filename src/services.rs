// ABOUTME: Service container wiring the wizard state machine and dialog manager
// Built once at startup and handed explicitly to the TUI and CLI commands

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::config::AppConfig;
use crate::dialog::DialogManager;
use crate::storage::{FileStateStore, MemoryStateStore, NullStateStore, StateStore};
use crate::validation::{RegistrationSchema, Validator};
use crate::wizard::{SimulatedSubmitter, Submitter, WizardMachine};

/// Where the wizard slot lives for this run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// File slot per configuration
    #[default]
    Configured,
    /// In-memory slot, dropped at exit
    Ephemeral,
}

pub struct AppServices {
    pub wizard: WizardMachine,
    pub dialogs: DialogManager,
}

impl AppServices {
    /// Build the services described by `config` and rehydrate saved progress
    pub fn init(config: &AppConfig, mode: StorageMode) -> Result<Self> {
        let store = build_store(config, mode)?;
        let validator: Arc<dyn Validator> = Arc::new(RegistrationSchema::new());
        let submitter: Arc<dyn Submitter> = Arc::new(
            SimulatedSubmitter::new(
                config.submission.delay(),
                config.submission.success_rate(),
            )
            .with_validator(Arc::clone(&validator)),
        );

        Ok(Self::from_parts(store, validator, submitter))
    }

    /// Assemble services from explicit parts
    pub fn from_parts(
        store: Arc<dyn StateStore>,
        validator: Arc<dyn Validator>,
        submitter: Arc<dyn Submitter>,
    ) -> Self {
        Self {
            wizard: WizardMachine::mount(store, validator, submitter),
            dialogs: DialogManager::new(),
        }
    }

    /// Close every dialog and start the wizard over
    pub fn reset(&mut self) {
        self.dialogs.reset();
        self.wizard.reset_form();
    }
}

fn build_store(config: &AppConfig, mode: StorageMode) -> Result<Arc<dyn StateStore>> {
    if mode == StorageMode::Ephemeral {
        info!("Using in-memory wizard storage");
        return Ok(Arc::new(MemoryStateStore::new()));
    }

    if !config.storage.enabled {
        info!("Wizard persistence disabled by configuration");
        return Ok(Arc::new(NullStateStore));
    }

    let store = FileStateStore::new(config.storage.state_dir()?, &config.storage.slot);
    info!(path = %store.path().display(), "Using file wizard storage");
    Ok(Arc::new(store))
}
