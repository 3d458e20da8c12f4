// ABOUTME: Wizard step definitions for the registration flow
// Step ordering, display metadata and the route path each step is addressable by

use serde::{Deserialize, Serialize};
use std::fmt;

/// Route shown once the registration has been submitted
pub const SUCCESS_PATH: &str = "/register/success";

/// Steps in the registration wizard
///
/// Serialized as the 1-based step number so persisted records stay compact
/// and an unknown number is rejected when a record is read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum FormStep {
    Personal,
    Address,
    Preferences,
}

impl FormStep {
    /// Get all steps in order
    pub fn all() -> &'static [FormStep] {
        &[Self::Personal, Self::Address, Self::Preferences]
    }

    /// First step of the wizard
    pub const fn first() -> Self {
        Self::Personal
    }

    /// Last step of the wizard (the one that submits)
    pub const fn last() -> Self {
        Self::Preferences
    }

    /// Get the step number (1-indexed)
    pub const fn number(self) -> u8 {
        match self {
            Self::Personal => 1,
            Self::Address => 2,
            Self::Preferences => 3,
        }
    }

    /// Get the total number of steps
    pub const fn total() -> usize {
        3
    }

    /// Look up a step by its 1-based number
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::Personal),
            2 => Some(Self::Address),
            3 => Some(Self::Preferences),
            _ => None,
        }
    }

    /// Route path for this step
    pub const fn path(self) -> &'static str {
        match self {
            Self::Personal => "/register/personal",
            Self::Address => "/register/address",
            Self::Preferences => "/register/preferences",
        }
    }

    /// Resolve a route path to its step
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim().trim_end_matches('/');
        Self::all().iter().copied().find(|step| step.path() == trimmed)
    }

    /// Get display title for this step
    pub const fn title(self) -> &'static str {
        match self {
            Self::Personal => "Personal Information",
            Self::Address => "Address Details",
            Self::Preferences => "Preferences",
        }
    }

    /// Get description for this step
    pub const fn description(self) -> &'static str {
        match self {
            Self::Personal => "Tell us about yourself",
            Self::Address => "Where can we reach you?",
            Self::Preferences => "Set your preferences",
        }
    }

    /// Get the next step, if any
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Personal => Some(Self::Address),
            Self::Address => Some(Self::Preferences),
            Self::Preferences => None,
        }
    }

    /// Get the previous step, if any
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Personal => None,
            Self::Address => Some(Self::Personal),
            Self::Preferences => Some(Self::Address),
        }
    }
}

impl Default for FormStep {
    fn default() -> Self {
        Self::first()
    }
}

impl fmt::Display for FormStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.title())
    }
}

impl From<FormStep> for u8 {
    fn from(step: FormStep) -> Self {
        step.number()
    }
}

impl TryFrom<u8> for FormStep {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_number(value).ok_or_else(|| format!("unknown wizard step {value}"))
    }
}
