// ABOUTME: CLI validate and submit commands operating on saved wizard progress
//
// validate: Check one step of the saved data and report field errors
// submit: Walk the saved progress through every step, then submit

use anyhow::{anyhow, Context, Result};
use serde::Serialize;

use super::{OutputFormat, ValidateArgs};
use crate::models::{FieldErrors, FormStep};
use crate::services::AppServices;
use crate::wizard::{NextOutcome, SubmitOutcome, WizardMachine, WizardPhase};

/// JSON output structure for validate command
#[derive(Debug, Serialize)]
pub struct ValidateOutput {
    pub step: u8,
    pub valid: bool,
    pub errors: FieldErrors,
}

/// JSON output structure for submit command
#[derive(Debug, Serialize)]
pub struct SubmitOutput {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_id: Option<String>,
    pub errors: FieldErrors,
}

/// Validate the saved data for one step without changing the wizard
pub fn check_step(wizard: &WizardMachine, number: u8) -> Result<ValidateOutput> {
    let step = FormStep::from_number(number).ok_or_else(|| {
        anyhow!(
            "Unknown step {}. Steps are numbered 1 to {}.",
            number,
            FormStep::total()
        )
    })?;

    let errors = match wizard.validator().validate_step(step, wizard.form_data()) {
        Ok(()) => FieldErrors::new(),
        Err(issues) => issues.field_errors(),
    };

    Ok(ValidateOutput {
        step: step.number(),
        valid: errors.is_empty(),
        errors,
    })
}

/// Execute the validate command; fails when the step has errors
#[allow(clippy::unused_async)]
pub async fn validate(args: ValidateArgs, services: &AppServices, format: OutputFormat) -> Result<()> {
    let output = check_step(&services.wizard, args.step)?;

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&output).context("Failed to serialize validation")?
            );
        }
        OutputFormat::Text => {
            let title = FormStep::from_number(output.step).map_or("", FormStep::title);
            if output.valid {
                println!("\x1b[32m✓\x1b[0m Step {} ({}) is valid", output.step, title);
            } else {
                println!("\x1b[31m✗\x1b[0m Step {} ({}) has errors:", output.step, title);
                for (field, message) in &output.errors {
                    println!("  {field}: {message}");
                }
            }
        }
    }

    if output.valid {
        Ok(())
    } else {
        Err(anyhow!("Step {} failed validation", output.step))
    }
}

/// Advance from the saved step as repeated Next presses would, submitting
/// from the last step; stops at the first step that fails validation
pub async fn submit_saved(wizard: &mut WizardMachine) -> SubmitOutput {
    let outcome = loop {
        match wizard.go_next().await {
            NextOutcome::Advanced(_) => {}
            NextOutcome::Submission(outcome) => break outcome,
            NextOutcome::Rejected => break SubmitOutcome::Rejected,
            NextOutcome::Ignored => break SubmitOutcome::Ignored,
        }
    };

    match (outcome, wizard.phase()) {
        (SubmitOutcome::Submitted, WizardPhase::Submitted(summary)) => SubmitOutput {
            success: true,
            message: summary.message.clone(),
            receipt_id: summary.receipt.as_ref().map(|r| r.id.clone()),
            errors: FieldErrors::new(),
        },
        (SubmitOutcome::Rejected, _) => SubmitOutput {
            success: false,
            message: format!(
                "Step {} ({}) is incomplete or invalid.",
                wizard.current_step().number(),
                wizard.current_step().title()
            ),
            receipt_id: None,
            errors: wizard.errors().clone(),
        },
        (SubmitOutcome::Ignored, _) => SubmitOutput {
            success: false,
            message: "A submission is already in progress.".to_string(),
            receipt_id: None,
            errors: FieldErrors::new(),
        },
        _ => SubmitOutput {
            success: false,
            message: "Submission failed.".to_string(),
            receipt_id: None,
            errors: wizard.errors().clone(),
        },
    }
}

/// Execute the submit command; fails when the submission was not accepted
pub async fn execute(services: &mut AppServices, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Text {
        println!("Submitting registration...");
    }

    let output = submit_saved(&mut services.wizard).await;

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&output).context("Failed to serialize result")?
            );
        }
        OutputFormat::Text => {
            if output.success {
                println!("\x1b[32m✓\x1b[0m {}", output.message);
                if let Some(id) = &output.receipt_id {
                    println!("  Reference: {id}");
                }
            } else {
                println!("\x1b[31m✗\x1b[0m {}", output.message);
                for (field, message) in &output.errors {
                    println!("  {field}: {message}");
                }
            }
        }
    }

    if output.success {
        Ok(())
    } else {
        Err(anyhow!("Registration was not submitted"))
    }
}
