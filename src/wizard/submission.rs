// ABOUTME: Submission contract for the completed registration record
// plus the simulated backend used by the demo (artificial delay, random failures)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{CompleteFormData, FieldErrors, FormData, GENERAL_ERROR_KEY};
use crate::validation::{RegistrationSchema, Validator};

pub const SUCCESS_MESSAGE: &str = "Registration completed successfully! Welcome aboard.";
pub const FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";
pub const FAILURE_DETAIL: &str =
    "There was an error processing your registration. Please try again.";
pub const VALIDATION_FAILURE_MESSAGE: &str = "Please fix the validation errors and try again.";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Submission backend unavailable: {0}")]
    Unavailable(String),

    #[error("Submission task failed: {0}")]
    Task(String),
}

/// Reference issued for an accepted registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub id: String,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionReceipt {
    pub fn issue() -> Self {
        Self {
            id: format!("user-{}", Uuid::new_v4()),
            submitted_at: Utc::now(),
        }
    }
}

/// Outcome reported by the submission backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<CompleteFormData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<SubmissionReceipt>,
}

impl SubmissionResult {
    pub fn accepted(data: CompleteFormData) -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            data: Some(data),
            errors: None,
            receipt: Some(SubmissionReceipt::issue()),
        }
    }

    /// Rejection carrying only a general error
    pub fn failed(message: impl Into<String>, detail: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(GENERAL_ERROR_KEY.to_string(), detail.into());
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors: Some(errors),
            receipt: None,
        }
    }

    pub fn invalid(errors: FieldErrors) -> Self {
        Self {
            success: false,
            message: VALIDATION_FAILURE_MESSAGE.to_string(),
            data: None,
            errors: Some(errors),
            receipt: None,
        }
    }
}

/// Receives validated registrations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, record: CompleteFormData) -> Result<SubmissionResult, SubmitError>;
}

/// Demo backend: re-validates, waits, then succeeds with a fixed probability
pub struct SimulatedSubmitter {
    delay: Duration,
    success_rate: f64,
    validator: Arc<dyn Validator>,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration, success_rate: f64) -> Self {
        Self {
            delay,
            success_rate: success_rate.clamp(0.0, 1.0),
            validator: Arc::new(RegistrationSchema::new()),
        }
    }

    /// Backend that always accepts without delay
    pub fn always_accept() -> Self {
        Self::new(Duration::ZERO, 1.0)
    }

    /// Backend that always reports a processing failure without delay
    pub fn always_fail() -> Self {
        Self::new(Duration::ZERO, 0.0)
    }

    pub fn with_validator(mut self, validator: Arc<dyn Validator>) -> Self {
        self.validator = validator;
        self
    }

    pub const fn delay(&self) -> Duration {
        self.delay
    }

    pub const fn success_rate(&self) -> f64 {
        self.success_rate
    }

    fn roll(&self) -> bool {
        rand::random::<f64>() < self.success_rate
    }
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500), 0.9)
    }
}

#[async_trait]
impl Submitter for SimulatedSubmitter {
    async fn submit(&self, record: CompleteFormData) -> Result<SubmissionResult, SubmitError> {
        // The backend never trusts the client-side checks
        let validated = match self.validator.validate_complete(&FormData::from(record)) {
            Ok(validated) => validated,
            Err(issues) => {
                warn!("Rejected submission with {} validation issue(s)", issues.issues.len());
                return Ok(SubmissionResult::invalid(issues.field_errors()));
            }
        };

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if !self.roll() {
            warn!("Simulated submission failure");
            return Ok(SubmissionResult::failed(FAILURE_MESSAGE, FAILURE_DETAIL));
        }

        let result = SubmissionResult::accepted(validated);
        if let Some(receipt) = &result.receipt {
            info!(
                id = %receipt.id,
                submitted_at = %receipt.submitted_at.to_rfc3339(),
                "Registration submitted successfully"
            );
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> CompleteFormData {
        CompleteFormData {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@navy.mil".to_string(),
            phone: "2025550143".to_string(),
            street: "1 Compiler Rd".to_string(),
            city: "Arlington".to_string(),
            state: "VA".to_string(),
            zip_code: "22201".to_string(),
            country: "USA".to_string(),
            newsletter: true,
            notifications: true,
            marketing_emails: false,
            terms: true,
        }
    }

    #[test]
    fn test_submit_error_messages() {
        let errors = [
            SubmitError::Unavailable("offline".into()),
            SubmitError::Task("panicked".into()),
        ];
        let messages: Vec<String> = errors
            .iter()
            .map(|e| match e {
                SubmitError::Unavailable(_) | SubmitError::Task(_) => e.to_string(),
            })
            .collect();
        assert_eq!(
            messages,
            vec![
                "Submission backend unavailable: offline".to_string(),
                "Submission task failed: panicked".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_always_accept_issues_receipt() {
        let result = SimulatedSubmitter::always_accept().submit(record()).await.unwrap();
        assert!(result.success);
        assert_eq!(result.message, SUCCESS_MESSAGE);
        assert_eq!(result.data, Some(record()));
        assert!(result.receipt.unwrap().id.starts_with("user-"));
    }

    #[tokio::test]
    async fn test_always_fail_reports_general_error() {
        let result = SimulatedSubmitter::always_fail().submit(record()).await.unwrap();
        assert!(!result.success);
        assert_eq!(result.message, FAILURE_MESSAGE);
        assert_eq!(result.errors.unwrap()[GENERAL_ERROR_KEY], FAILURE_DETAIL);
    }

    #[tokio::test]
    async fn test_backend_revalidates() {
        let mut bad = record();
        bad.terms = false;
        let result = SimulatedSubmitter::always_accept().submit(bad).await.unwrap();
        assert!(!result.success);
        assert_eq!(result.message, VALIDATION_FAILURE_MESSAGE);
        assert!(result.errors.unwrap().contains_key("terms"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_is_applied() {
        let submitter = SimulatedSubmitter::new(Duration::from_millis(1500), 1.0);
        let started = tokio::time::Instant::now();
        submitter.submit(record()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1500));
    }

    #[test]
    fn test_success_rate_is_clamped() {
        assert!((SimulatedSubmitter::new(Duration::ZERO, 4.0).success_rate() - 1.0).abs() < f64::EPSILON);
        assert!(SimulatedSubmitter::new(Duration::ZERO, -1.0).success_rate().abs() < f64::EPSILON);
    }
}
