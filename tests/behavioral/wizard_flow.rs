// ABOUTME: Behavioral tests for step navigation, validation gating and submission

use pretty_assertions::assert_eq;
use std::sync::Arc;

use super::fixtures::{machine_with, valid_form, RecordingSubmitter};
use signup_wizard::models::{FieldValue, FormData, FormField, FormStep, GENERAL_ERROR_KEY, SUCCESS_PATH};
use signup_wizard::storage::{MemoryStateStore, NullStateStore};
use signup_wizard::wizard::{
    AdvanceOutcome, NextOutcome, SubmitOutcome, WizardPhase,
};

#[tokio::test]
async fn test_full_registration_reaches_success() {
    let submitter = RecordingSubmitter::accepting();
    let mut wizard = machine_with(Arc::new(NullStateStore), submitter.clone());

    wizard.update_data(valid_form());
    assert_eq!(wizard.go_next().await, NextOutcome::Advanced(FormStep::Address));
    assert_eq!(wizard.go_next().await, NextOutcome::Advanced(FormStep::Preferences));
    assert!(wizard.is_last_step());
    assert_eq!(
        wizard.go_next().await,
        NextOutcome::Submission(SubmitOutcome::Submitted)
    );

    assert_eq!(submitter.calls(), 1);
    assert!(wizard.is_submitted());
    assert_eq!(wizard.current_path(), SUCCESS_PATH);
    assert!((wizard.progress() - 100.0).abs() < f64::EPSILON);

    let WizardPhase::Submitted(summary) = wizard.phase() else {
        panic!("expected the submitted phase");
    };
    let data = summary.data.as_ref().expect("accepted data");
    assert_eq!(data.email, "grace@example.com");
    assert!(summary.receipt.is_some());
}

#[tokio::test]
async fn test_invalid_step_stays_put_with_field_errors() {
    let mut wizard = machine_with(Arc::new(NullStateStore), RecordingSubmitter::accepting());

    wizard.update_data(FormData {
        first_name: Some("G".into()),
        email: Some("not-an-email".into()),
        ..FormData::default()
    });

    assert_eq!(wizard.go_next().await, NextOutcome::Rejected);
    assert_eq!(wizard.current_step(), FormStep::Personal);
    assert_eq!(
        wizard.errors().get("firstName").map(String::as_str),
        Some("First name must be at least 2 characters")
    );
    assert_eq!(
        wizard.errors().get("email").map(String::as_str),
        Some("Please enter a valid email address")
    );
    assert!(wizard.errors().contains_key("lastName"));
    assert!(wizard.errors().contains_key("phone"));
    assert!(!wizard.is_step_completed(FormStep::Personal));
}

#[test]
fn test_editing_clears_errors() {
    let mut wizard = machine_with(Arc::new(NullStateStore), RecordingSubmitter::accepting());
    assert_eq!(wizard.try_advance(), AdvanceOutcome::Rejected);
    assert!(!wizard.errors().is_empty());

    wizard.update_data(FormData::single(FormField::FirstName, FieldValue::Text("Gr".into())));
    assert!(wizard.errors().is_empty());
}

#[test]
fn test_step_jumps_redirect_to_reachable_step() {
    let mut wizard = machine_with(Arc::new(NullStateStore), RecordingSubmitter::accepting());

    // Nothing completed: step 3 redirects to step 1
    assert_eq!(wizard.go_to_step(3), Some(FormStep::Personal));
    assert_eq!(wizard.navigate_to_path("/register/address"), Some(FormStep::Personal));

    wizard.update_data(valid_form());
    assert_eq!(wizard.try_advance(), AdvanceOutcome::Advanced(FormStep::Address));

    // Step 1 done: step 3 still needs step 2
    assert_eq!(wizard.go_to_step(3), Some(FormStep::Address));
    assert_eq!(wizard.go_to_step(1), Some(FormStep::Personal));
    assert_eq!(wizard.go_to_step(2), Some(FormStep::Address));

    // Undefined steps and paths are ignored
    assert_eq!(wizard.go_to_step(7), None);
    assert_eq!(wizard.navigate_to_path("/elsewhere"), None);
    assert_eq!(wizard.current_step(), FormStep::Address);
}

#[test]
fn test_previous_never_validates_and_stops_at_first_step() {
    let mut wizard = machine_with(Arc::new(NullStateStore), RecordingSubmitter::accepting());
    wizard.update_data(valid_form());
    wizard.try_advance();

    // Break step 2 data; going back still works
    wizard.update_data(FormData::single(FormField::City, FieldValue::Text(String::new())));
    assert_eq!(wizard.go_previous(), FormStep::Personal);
    assert_eq!(wizard.go_previous(), FormStep::Personal);
    assert!(!wizard.can_go_previous());
}

#[tokio::test]
async fn test_backend_refusal_sets_general_error_and_allows_retry() {
    let submitter = RecordingSubmitter::refusing();
    let mut wizard = machine_with(Arc::new(NullStateStore), submitter.clone());
    wizard.update_data(valid_form());
    wizard.try_advance();
    wizard.try_advance();

    assert_eq!(wizard.submit().await, SubmitOutcome::Failed);
    assert!(!wizard.is_submitting());
    assert!(!wizard.is_submitted());
    assert_eq!(
        wizard.errors().get(GENERAL_ERROR_KEY).map(String::as_str),
        Some("try later")
    );
    assert_eq!(wizard.current_step(), FormStep::Preferences);

    assert_eq!(wizard.submit().await, SubmitOutcome::Failed);
    assert_eq!(submitter.calls(), 2);
}

#[tokio::test]
async fn test_submitter_error_becomes_unexpected_error() {
    let mut wizard = machine_with(Arc::new(NullStateStore), RecordingSubmitter::erroring());
    wizard.update_data(valid_form());

    assert_eq!(wizard.submit().await, SubmitOutcome::Failed);
    assert_eq!(
        wizard.errors().get(GENERAL_ERROR_KEY).map(String::as_str),
        Some("An unexpected error occurred. Please try again.")
    );
}

#[tokio::test]
async fn test_unaccepted_terms_block_submission() {
    let submitter = RecordingSubmitter::accepting();
    let mut wizard = machine_with(Arc::new(NullStateStore), submitter.clone());
    wizard.update_data(FormData {
        terms: Some(false),
        ..valid_form()
    });
    wizard.try_advance();
    wizard.try_advance();

    assert_eq!(wizard.go_next().await, NextOutcome::Rejected);
    assert_eq!(
        wizard.errors().get("terms").map(String::as_str),
        Some("You must accept the terms and conditions")
    );
    assert_eq!(submitter.calls(), 0);
}

#[test]
fn test_wizard_is_locked_while_submitting() {
    let store = MemoryStateStore::new();
    let mut wizard = machine_with(Arc::new(store.clone()), RecordingSubmitter::accepting());
    wizard.update_data(valid_form());
    wizard.try_advance();

    let record = wizard.begin_submit().expect("record validates");
    assert_eq!(record.first_name, "Grace");
    assert!(wizard.is_submitting());

    // Every transition is a no-op until the answer arrives
    assert_eq!(wizard.begin_submit().unwrap_err(), SubmitOutcome::Ignored);
    assert_eq!(wizard.try_advance(), AdvanceOutcome::Ignored);
    assert_eq!(wizard.go_previous(), FormStep::Address);
    wizard.update_data(FormData::single(FormField::City, FieldValue::Text("Paris".into())));
    assert_eq!(wizard.form_data().text(FormField::City), "Arlington");

    let outcome = wizard.finish_submit(Ok(signup_wizard::wizard::SubmissionResult::accepted(record)));
    assert_eq!(outcome, SubmitOutcome::Submitted);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_reset_returns_to_first_step() {
    let store = MemoryStateStore::new();
    let mut wizard = machine_with(Arc::new(store.clone()), RecordingSubmitter::accepting());
    wizard.update_data(valid_form());
    wizard.go_next().await;
    wizard.go_next().await;
    wizard.go_next().await;
    assert!(wizard.is_submitted());

    wizard.reset_form();
    assert!(!wizard.is_submitted());
    assert_eq!(wizard.current_step(), FormStep::Personal);
    assert!(wizard.form_data().is_empty());
    assert!(wizard.state().completed_steps.is_empty());
    assert!(store.is_empty());
}
