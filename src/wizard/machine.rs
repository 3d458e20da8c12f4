// ABOUTME: Wizard state machine: step-gated navigation, validation gating,
// final submission handoff and write-through persistence of every mutation

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::state::WizardState;
use super::submission::{
    SubmissionReceipt, SubmissionResult, SubmitError, Submitter, UNEXPECTED_ERROR_MESSAGE,
};
use crate::models::{CompleteFormData, FieldErrors, FormData, FormStep, GENERAL_ERROR_KEY, SUCCESS_PATH};
use crate::storage::StateStore;
use crate::validation::Validator;

/// Lifecycle phase on top of the per-step state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardPhase {
    /// Steps are being filled in
    InProgress,
    /// Terminal: the backend accepted the registration
    Submitted(SubmissionSummary),
}

/// What the backend reported for an accepted registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionSummary {
    pub message: String,
    pub receipt: Option<SubmissionReceipt>,
    pub data: Option<CompleteFormData>,
}

/// Result of validating and leaving the current step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Moved on to the given step
    Advanced(FormStep),
    /// Validation failed; errors are populated
    Rejected,
    /// The last step validated; the record is ready for submission
    ReadyToSubmit,
    /// Nothing happened because a submission is in flight or finished
    Ignored,
}

/// Result of a submission attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Accepted; the wizard reached its terminal phase
    Submitted,
    /// The complete record failed validation
    Rejected,
    /// The backend refused or errored; a general or field error is set
    Failed,
    /// A submission is already in flight or finished
    Ignored,
}

/// Result of `go_next`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextOutcome {
    Advanced(FormStep),
    Rejected,
    Submission(SubmitOutcome),
    Ignored,
}

/// Owns the wizard state and applies every transition to it
pub struct WizardMachine {
    state: WizardState,
    phase: WizardPhase,
    store: Arc<dyn StateStore>,
    validator: Arc<dyn Validator>,
    submitter: Arc<dyn Submitter>,
}

impl WizardMachine {
    /// Create a machine with default state, without reading storage
    pub fn new(
        store: Arc<dyn StateStore>,
        validator: Arc<dyn Validator>,
        submitter: Arc<dyn Submitter>,
    ) -> Self {
        Self {
            state: WizardState::default(),
            phase: WizardPhase::InProgress,
            store,
            validator,
            submitter,
        }
    }

    /// Create a machine and rehydrate it from storage
    pub fn mount(
        store: Arc<dyn StateStore>,
        validator: Arc<dyn Validator>,
        submitter: Arc<dyn Submitter>,
    ) -> Self {
        let mut machine = Self::new(store, validator, submitter);
        machine.rehydrate();
        machine
    }

    /// Replace the current state with the stored record, if there is one
    ///
    /// Returns whether a record was found.
    pub fn rehydrate(&mut self) -> bool {
        match self.store.load() {
            Some(stored) => {
                self.state = stored.normalize();
                self.phase = WizardPhase::InProgress;
                info!(
                    step = self.state.current_step.number(),
                    completed = self.state.completed_steps.len(),
                    "Restored wizard progress from storage"
                );
                true
            }
            None => false,
        }
    }

    // === Read-only views ===

    pub const fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn snapshot(&self) -> WizardState {
        self.state.clone()
    }

    pub const fn phase(&self) -> &WizardPhase {
        &self.phase
    }

    pub const fn is_submitted(&self) -> bool {
        matches!(self.phase, WizardPhase::Submitted(_))
    }

    pub const fn is_submitting(&self) -> bool {
        self.state.is_submitting
    }

    pub const fn current_step(&self) -> FormStep {
        self.state.current_step
    }

    pub const fn form_data(&self) -> &FormData {
        &self.state.form_data
    }

    pub const fn errors(&self) -> &FieldErrors {
        &self.state.errors
    }

    /// Route for what is currently presented
    pub const fn current_path(&self) -> &'static str {
        if self.is_submitted() {
            SUCCESS_PATH
        } else {
            self.state.current_step.path()
        }
    }

    pub fn progress(&self) -> f64 {
        self.state.progress()
    }

    pub fn can_access_step(&self, step: FormStep) -> bool {
        self.state.can_access_step(step)
    }

    pub fn is_step_completed(&self, step: FormStep) -> bool {
        self.state.is_step_completed(step)
    }

    pub fn is_last_step(&self) -> bool {
        self.state.is_last_step()
    }

    pub fn can_go_previous(&self) -> bool {
        !self.is_locked() && self.state.can_go_previous()
    }

    /// Handle to the backend, for running a submission off the event loop
    pub fn submitter(&self) -> Arc<dyn Submitter> {
        Arc::clone(&self.submitter)
    }

    pub fn validator(&self) -> Arc<dyn Validator> {
        Arc::clone(&self.validator)
    }

    // === Transitions ===

    /// Merge field values into the record
    pub fn update_data(&mut self, patch: FormData) {
        if self.is_locked() {
            debug!("Ignoring data update while submission is in flight or finished");
            return;
        }

        self.state.form_data.merge(patch);
        self.state.errors.clear();
        self.persist();
    }

    /// Validate the current step and move forward
    ///
    /// On the last step nothing moves; the caller is told the record is ready
    /// to submit.
    pub fn try_advance(&mut self) -> AdvanceOutcome {
        if self.is_locked() {
            return AdvanceOutcome::Ignored;
        }

        let step = self.state.current_step;
        if let Err(issues) = self.validator.validate_step(step, &self.state.form_data) {
            info!(step = step.number(), issues = issues.issues.len(), "Step validation failed");
            self.state.errors = issues.field_errors();
            self.persist();
            return AdvanceOutcome::Rejected;
        }

        self.state.completed_steps.insert(step);
        self.state.errors.clear();

        let outcome = match step.next() {
            Some(next) => {
                info!(from = step.number(), to = next.number(), "Advanced to next step");
                self.state.current_step = next;
                AdvanceOutcome::Advanced(next)
            }
            None => AdvanceOutcome::ReadyToSubmit,
        };
        self.persist();
        outcome
    }

    /// Validate the current step, then advance or submit from the last step
    pub async fn go_next(&mut self) -> NextOutcome {
        match self.try_advance() {
            AdvanceOutcome::Advanced(step) => NextOutcome::Advanced(step),
            AdvanceOutcome::Rejected => NextOutcome::Rejected,
            AdvanceOutcome::ReadyToSubmit => NextOutcome::Submission(self.submit().await),
            AdvanceOutcome::Ignored => NextOutcome::Ignored,
        }
    }

    /// Step back one step; never validates
    pub fn go_previous(&mut self) -> FormStep {
        if self.is_locked() {
            return self.state.current_step;
        }

        if let Some(previous) = self.state.current_step.previous() {
            self.state.current_step = previous;
        }
        self.state.errors.clear();
        self.persist();
        self.state.current_step
    }

    /// Jump to a step by number
    ///
    /// Unknown numbers are ignored and yield `None`. A step whose predecessor
    /// is not completed redirects to the highest reachable step below it.
    pub fn go_to_step(&mut self, number: u8) -> Option<FormStep> {
        let Some(target) = FormStep::from_number(number) else {
            warn!(step = number, "Ignoring request for undefined step");
            return None;
        };
        Some(self.go_to(target))
    }

    /// Jump to a step, redirecting to the highest reachable one if needed
    pub fn go_to(&mut self, target: FormStep) -> FormStep {
        if self.is_locked() {
            return self.state.current_step;
        }

        let resolved = if self.state.can_access_step(target) {
            target
        } else {
            let fallback = self.state.highest_accessible_up_to(target);
            info!(
                requested = target.number(),
                redirected = fallback.number(),
                "Step not reachable yet, redirecting"
            );
            fallback
        };

        self.state.current_step = resolved;
        self.state.errors.clear();
        self.persist();
        resolved
    }

    /// Route-based navigation; unknown paths are ignored
    pub fn navigate_to_path(&mut self, path: &str) -> Option<FormStep> {
        match FormStep::from_path(path) {
            Some(step) => Some(self.go_to(step)),
            None => {
                debug!(path, "Ignoring navigation to unknown path");
                None
            }
        }
    }

    /// Validate the complete record and submit it
    pub async fn submit(&mut self) -> SubmitOutcome {
        let record = match self.begin_submit() {
            Ok(record) => record,
            Err(outcome) => return outcome,
        };

        let submitter = self.submitter();
        let result = submitter.submit(record).await;
        self.finish_submit(result)
    }

    /// First half of a submission: mark in flight and validate everything
    ///
    /// Returns the record to hand to the backend, or the outcome when the
    /// submission cannot start.
    pub fn begin_submit(&mut self) -> Result<CompleteFormData, SubmitOutcome> {
        if self.is_locked() {
            debug!("Submission already in flight or finished");
            return Err(SubmitOutcome::Ignored);
        }

        self.state.is_submitting = true;
        self.state.errors.clear();
        self.persist();

        match self.validator.validate_complete(&self.state.form_data) {
            Ok(record) => {
                info!("Submitting registration");
                Ok(record)
            }
            Err(issues) => {
                info!(issues = issues.issues.len(), "Registration failed validation");
                self.state.errors = issues.field_errors();
                self.state.is_submitting = false;
                self.persist();
                Err(SubmitOutcome::Rejected)
            }
        }
    }

    /// Second half of a submission: apply the backend's answer
    pub fn finish_submit(
        &mut self,
        result: Result<SubmissionResult, SubmitError>,
    ) -> SubmitOutcome {
        if !self.state.is_submitting {
            warn!("Received a submission result with no submission in flight");
            return SubmitOutcome::Ignored;
        }
        self.state.is_submitting = false;

        match result {
            Ok(result) if result.success => {
                info!("Registration accepted");
                self.state.completed_steps.extend(FormStep::all().iter().copied());
                self.state.errors.clear();
                self.phase = WizardPhase::Submitted(SubmissionSummary {
                    message: result.message,
                    receipt: result.receipt,
                    data: result.data,
                });
                self.store.clear();
                SubmitOutcome::Submitted
            }
            Ok(result) => {
                warn!(message = %result.message, "Registration refused by backend");
                self.state.errors = match result.errors {
                    Some(errors) if !errors.is_empty() => errors,
                    _ => general_error(result.message),
                };
                self.persist();
                SubmitOutcome::Failed
            }
            Err(e) => {
                error!("Submission error: {}", e);
                self.state.errors = general_error(UNEXPECTED_ERROR_MESSAGE);
                self.persist();
                SubmitOutcome::Failed
            }
        }
    }

    /// Back to step 1 with nothing filled in; also empties storage
    pub fn reset_form(&mut self) {
        info!("Resetting wizard");
        self.state = WizardState::default();
        self.phase = WizardPhase::InProgress;
        self.store.clear();
    }

    // === Internals ===

    const fn is_locked(&self) -> bool {
        self.state.is_submitting || self.is_submitted()
    }

    fn persist(&self) {
        if !self.is_submitted() {
            self.store.save(&self.state);
        }
    }
}

fn general_error(message: impl Into<String>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert(GENERAL_ERROR_KEY.to_string(), message.into());
    errors
}
