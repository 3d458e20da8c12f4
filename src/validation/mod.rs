// ABOUTME: Validation contract used by the wizard: per-step and whole-record checks
// Issues carry a key path and a message; the wizard turns them into field errors

pub mod schema;

pub use schema::RegistrationSchema;

use std::fmt;
use thiserror::Error;

use crate::models::{CompleteFormData, FieldErrors, FormData, FormStep};

/// A single validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// Key path to the offending value (first element is the record key)
    pub path: Vec<String>,
    pub message: String,
}

impl FieldIssue {
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: vec![key.into()],
            message: message.into(),
        }
    }

    /// First path segment, the key errors are reported under
    pub fn key(&self) -> Option<&str> {
        self.path.first().map(String::as_str)
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.join("."), self.message)
    }
}

/// Ordered list of issues produced by a failed validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} validation issue(s)", .issues.len())]
pub struct ValidationIssues {
    pub issues: Vec<FieldIssue>,
}

impl ValidationIssues {
    pub fn new(issues: Vec<FieldIssue>) -> Self {
        Self { issues }
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Collapse issues into field errors
    ///
    /// Keyed by the first path segment; when several issues share a key the
    /// first message wins. Issues without a path are dropped.
    pub fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for issue in &self.issues {
            if let Some(key) = issue.key() {
                errors
                    .entry(key.to_string())
                    .or_insert_with(|| issue.message.clone());
            }
        }
        errors
    }
}

impl FromIterator<FieldIssue> for ValidationIssues {
    fn from_iter<T: IntoIterator<Item = FieldIssue>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Black-box schema validation for the registration record
pub trait Validator: Send + Sync {
    /// Validate only the fields collected on `step`
    fn validate_step(&self, step: FormStep, data: &FormData) -> Result<(), ValidationIssues>;

    /// Validate the whole record and produce the typed value
    fn validate_complete(&self, data: &FormData) -> Result<CompleteFormData, ValidationIssues>;
}
