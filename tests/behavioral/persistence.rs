// ABOUTME: Behavioral tests for saving, restoring and discarding wizard progress

use pretty_assertions::assert_eq;
use std::sync::Arc;
use tempfile::TempDir;

use super::fixtures::{machine_with, valid_form, RecordingSubmitter};
use signup_wizard::models::{FieldValue, FormData, FormField, FormStep};
use signup_wizard::storage::{
    FileStateStore, MemoryStateStore, PersistedWizard, StateStore, DEFAULT_SLOT, STORAGE_VERSION,
};
use signup_wizard::wizard::WizardState;

#[test]
fn test_progress_survives_a_restart() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(FileStateStore::new(dir.path(), DEFAULT_SLOT));

    let mut first = machine_with(store.clone(), RecordingSubmitter::accepting());
    first.update_data(valid_form());
    first.try_advance();
    first.update_data(FormData::single(FormField::City, FieldValue::Text("Boston".into())));
    assert!(store.path().exists());

    let second = machine_with(store, RecordingSubmitter::accepting());
    assert_eq!(second.current_step(), FormStep::Address);
    assert!(second.is_step_completed(FormStep::Personal));
    assert_eq!(second.form_data().text(FormField::City), "Boston");
    assert_eq!(second.form_data().text(FormField::FirstName), "Grace");
}

#[test]
fn test_record_is_versioned_json_in_named_slot() {
    let dir = TempDir::new().unwrap();
    let store = FileStateStore::new(dir.path(), "custom-slot");
    store.save(&WizardState::default());

    assert_eq!(store.path(), dir.path().join("custom-slot.json"));
    let raw = std::fs::read_to_string(store.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["version"], serde_json::json!(STORAGE_VERSION));
    assert_eq!(value["state"]["currentStep"], serde_json::json!(1));
}

#[test]
fn test_corrupt_record_is_discarded() {
    let dir = TempDir::new().unwrap();
    let store = FileStateStore::new(dir.path(), DEFAULT_SLOT);
    std::fs::write(store.path(), "{ not json").unwrap();

    let wizard = machine_with(Arc::new(store.clone()), RecordingSubmitter::accepting());
    assert_eq!(wizard.current_step(), FormStep::Personal);
    assert!(wizard.form_data().is_empty());
    assert!(!store.path().exists());
}

#[test]
fn test_other_version_is_discarded() {
    let store = MemoryStateStore::new();
    let mut record = PersistedWizard::new(WizardState {
        current_step: FormStep::Address,
        completed_steps: [FormStep::Personal].into_iter().collect(),
        ..WizardState::default()
    });
    record.version = STORAGE_VERSION + 1;
    store.set_raw(record.to_json().unwrap());

    assert_eq!(store.load(), None);
    assert!(store.is_empty());
}

#[test]
fn test_restored_state_is_normalized() {
    let store = MemoryStateStore::new();
    store.save(&WizardState {
        current_step: FormStep::Preferences,
        completed_steps: [FormStep::Personal].into_iter().collect(),
        is_submitting: true,
        ..WizardState::default()
    });

    let wizard = machine_with(Arc::new(store), RecordingSubmitter::accepting());
    assert!(!wizard.is_submitting());
    assert_eq!(wizard.current_step(), FormStep::Address);
}

#[tokio::test]
async fn test_successful_submission_empties_the_slot() {
    let store = MemoryStateStore::new();
    let mut wizard = machine_with(Arc::new(store.clone()), RecordingSubmitter::accepting());
    wizard.update_data(valid_form());
    assert!(!store.is_empty());

    wizard.go_next().await;
    wizard.go_next().await;
    wizard.go_next().await;

    assert!(wizard.is_submitted());
    assert!(store.is_empty());
}

#[test]
fn test_unwritable_directory_is_not_fatal() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "file, not a directory").unwrap();

    let store = FileStateStore::new(blocker.join("state"), DEFAULT_SLOT);
    let mut wizard = machine_with(Arc::new(store.clone()), RecordingSubmitter::accepting());
    wizard.update_data(valid_form());

    assert!(store.try_save(wizard.state()).is_err());
    assert_eq!(wizard.form_data().text(FormField::FirstName), "Grace");
}
