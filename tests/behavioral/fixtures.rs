// ABOUTME: Shared test fixtures for behavioral tests
//
// Provides:
// - valid_form(): a record that passes every step
// - machine_with(): a wizard over a given store and submitter
// - RecordingSubmitter: counts calls and answers with a fixed result

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use signup_wizard::models::{CompleteFormData, FormData};
use signup_wizard::storage::StateStore;
use signup_wizard::validation::RegistrationSchema;
use signup_wizard::wizard::{SubmissionResult, SubmitError, Submitter, WizardMachine};

/// Every field filled in with values the schema accepts
pub fn valid_form() -> FormData {
    FormData {
        first_name: Some("Grace".into()),
        last_name: Some("Hopper".into()),
        email: Some("grace@example.com".into()),
        phone: Some("2025550143".into()),
        street: Some("1 Navy Yard Road".into()),
        city: Some("Arlington".into()),
        state: Some("VA".into()),
        zip_code: Some("22202".into()),
        country: Some("USA".into()),
        newsletter: Some(true),
        notifications: Some(false),
        marketing_emails: Some(false),
        terms: Some(true),
    }
}

pub fn machine_with(store: Arc<dyn StateStore>, submitter: Arc<dyn Submitter>) -> WizardMachine {
    WizardMachine::mount(store, Arc::new(RegistrationSchema::new()), submitter)
}

/// Submitter that records how often it was called
pub struct RecordingSubmitter {
    calls: AtomicUsize,
    answer: fn(CompleteFormData) -> Result<SubmissionResult, SubmitError>,
}

impl RecordingSubmitter {
    pub fn accepting() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            answer: |record| Ok(SubmissionResult::accepted(record)),
        })
    }

    pub fn refusing() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            answer: |_| Ok(SubmissionResult::failed("Server busy", "try later")),
        })
    }

    pub fn erroring() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            answer: |_| Err(SubmitError::Unavailable("connection reset".into())),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Submitter for RecordingSubmitter {
    async fn submit(&self, record: CompleteFormData) -> Result<SubmissionResult, SubmitError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.answer)(record)
    }
}
