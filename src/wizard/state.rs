// ABOUTME: Snapshot of the registration wizard: current step, collected data,
// completed steps, submission flag and field errors

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::models::{FieldErrors, FormData, FormStep};

/// Full wizard state, persisted as one record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    /// Step currently presented
    pub current_step: FormStep,
    /// Every field value collected so far
    #[serde(default)]
    pub form_data: FormData,
    /// Steps whose validation has passed at least once
    #[serde(default)]
    pub completed_steps: BTreeSet<FormStep>,
    /// True while the final submission is in flight
    #[serde(default)]
    pub is_submitting: bool,
    /// Field errors keyed by field name, or "general"
    #[serde(default)]
    pub errors: FieldErrors,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_step_completed(&self, step: FormStep) -> bool {
        self.completed_steps.contains(&step)
    }

    /// A step is reachable when it is the first one or its predecessor is completed
    pub fn can_access_step(&self, step: FormStep) -> bool {
        match step.previous() {
            None => true,
            Some(previous) => self.is_step_completed(previous),
        }
    }

    /// Highest reachable step that is not beyond `limit`
    pub fn highest_accessible_up_to(&self, limit: FormStep) -> FormStep {
        FormStep::all()
            .iter()
            .copied()
            .filter(|step| *step <= limit && self.can_access_step(*step))
            .max()
            .unwrap_or_else(FormStep::first)
    }

    /// Highest reachable step overall
    pub fn highest_accessible(&self) -> FormStep {
        self.highest_accessible_up_to(FormStep::last())
    }

    /// Percentage of steps completed (0.0..=100.0)
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        self.completed_steps.len() as f64 / FormStep::total() as f64 * 100.0
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step == FormStep::last()
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_step.previous().is_some()
    }

    /// Bring a rehydrated record back within the wizard invariants
    ///
    /// No submission survives a restart, and a current step that is not
    /// reachable from the completed set is pulled back to the highest
    /// reachable one.
    pub(crate) fn normalize(mut self) -> Self {
        self.is_submitting = false;
        if !self.can_access_step(self.current_step) {
            self.current_step = self.highest_accessible_up_to(self.current_step);
        }
        self
    }
}
