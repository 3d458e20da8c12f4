// ABOUTME: Registration wizard: state, transitions and the submission handoff

pub mod machine;
pub mod state;
pub mod submission;

pub use machine::{
    AdvanceOutcome, NextOutcome, SubmissionSummary, SubmitOutcome, WizardMachine, WizardPhase,
};
pub use state::WizardState;
pub use submission::{
    SimulatedSubmitter, SubmissionReceipt, SubmissionResult, SubmitError, Submitter,
};
