// ABOUTME: CLI status and reset commands for saved wizard progress
//
// status: Show current step, completed steps, progress and errors (text/JSON output)
// reset: Discard saved progress, with confirmation prompt

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::io::{self, Write};

use super::{OutputFormat, ResetArgs};
use crate::models::{FieldErrors, FormField, FormStep};
use crate::services::AppServices;
use crate::wizard::WizardMachine;

/// JSON output structure for status command
#[derive(Debug, Serialize)]
pub struct StatusOutput {
    pub current_step: u8,
    pub step_title: String,
    pub path: String,
    pub completed_steps: Vec<u8>,
    pub progress_percent: f64,
    pub filled_fields: usize,
    pub total_fields: usize,
    pub errors: FieldErrors,
}

impl StatusOutput {
    pub fn from_wizard(wizard: &WizardMachine) -> Self {
        let state = wizard.state();
        Self {
            current_step: state.current_step.number(),
            step_title: state.current_step.title().to_string(),
            path: wizard.current_path().to_string(),
            completed_steps: state.completed_steps.iter().map(|s| s.number()).collect(),
            progress_percent: wizard.progress(),
            filled_fields: state.form_data.filled_count(),
            total_fields: FormField::all().len(),
            errors: state.errors.clone(),
        }
    }
}

/// Render the status report
pub fn render(wizard: &WizardMachine, format: OutputFormat) -> Result<String> {
    let output = StatusOutput::from_wizard(wizard);

    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&output).context("Failed to serialize status")
        }
        OutputFormat::Text => {
            let mut text = String::new();
            writeln!(text, "Registration progress")?;
            writeln!(text, "{}", "━".repeat(44))?;
            writeln!(
                text,
                "Step:         {} of {} ({})",
                output.current_step,
                FormStep::total(),
                output.step_title
            )?;
            writeln!(text, "Path:         {}", output.path)?;
            writeln!(text, "Progress:     {:.0}%", output.progress_percent)?;
            writeln!(
                text,
                "Fields:       {}/{} filled",
                output.filled_fields, output.total_fields
            )?;

            write!(text, "Completed:   ")?;
            for step in FormStep::all() {
                let marker = if wizard.is_step_completed(*step) {
                    "\x1b[32m✓\x1b[0m"
                } else {
                    "\x1b[90m○\x1b[0m"
                };
                write!(text, " {marker} {}", step.title())?;
            }
            writeln!(text)?;

            if !output.errors.is_empty() {
                writeln!(text)?;
                writeln!(text, "Errors:")?;
                for (field, message) in &output.errors {
                    writeln!(text, "  {field}: {message}")?;
                }
            }
            Ok(text)
        }
    }
}

/// Execute the status command
#[allow(clippy::unused_async)]
pub async fn execute(services: &AppServices, format: OutputFormat) -> Result<()> {
    println!("{}", render(&services.wizard, format)?);
    Ok(())
}

/// Execute the reset command
///
/// Prompts for confirmation unless `--yes`, then clears the wizard and its
/// saved slot.
#[allow(clippy::unused_async)]
pub async fn reset(args: ResetArgs, services: &mut AppServices) -> Result<()> {
    if services.wizard.form_data().is_empty() && services.wizard.state().completed_steps.is_empty() {
        println!("No saved progress.");
        return Ok(());
    }

    if !args.yes {
        print!("Discard saved registration progress? [y/N] ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    services.reset();
    println!("Saved progress cleared.");
    Ok(())
}
