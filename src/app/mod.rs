// ABOUTME: Main application structure for the TUI: owns the state and runs queued async actions

pub mod events;
pub mod examples;
pub mod state;

pub use events::{AppEvent, EventHandler};
pub use examples::DialogExample;
pub use state::{AppMessage, AppState, AsyncAction, DialogButton, View};

use tracing::{info, warn};

use crate::config::AppConfig;
use crate::dialog::DialogOptions;
use crate::services::AppServices;
use crate::wizard::SubmitError;

pub struct App {
    pub state: AppState,
}

impl App {
    pub fn new(services: AppServices, config: AppConfig) -> Self {
        Self {
            state: AppState::new(services, config),
        }
    }

    /// Greet returning users whose progress was restored
    pub fn init(&mut self) {
        let wizard = &self.state.services.wizard;
        let restored = !wizard.form_data().is_empty() || !wizard.state().completed_steps.is_empty();
        if restored {
            let step = wizard.current_step();
            info!(step = step.number(), "Resuming saved registration");
            self.state.services.dialogs.info(
                DialogOptions::new()
                    .title("Welcome back")
                    .message(format!(
                        "Your progress was restored. You are on step {} ({}).",
                        step.number(),
                        step.title()
                    ))
                    .auto_close(self.state.config.dialogs.notice_auto_close()),
            );
        }
    }

    /// Run the queued async action, then apply background results
    pub fn tick(&mut self) {
        if let Some(action) = self.state.pending_async_action.take() {
            self.run_action(action);
        }
        self.state.drain_messages();
    }

    fn run_action(&mut self, action: AsyncAction) {
        let messages = self.state.message_sender();

        match action {
            AsyncAction::Submit(record) => {
                let submitter = self.state.services.wizard.submitter();
                tokio::spawn(async move {
                    let task = tokio::spawn(async move { submitter.submit(record).await });
                    let result = match task.await {
                        Ok(result) => result,
                        Err(e) => Err(SubmitError::Task(e.to_string())),
                    };
                    let _ = messages.send(AppMessage::SubmissionFinished(result));
                });
            }
            AsyncAction::ActivateConfirm(id) => {
                let dialogs = self.state.services.dialogs.clone();
                tokio::spawn(async move {
                    if !dialogs.activate_confirm(&id).await {
                        warn!(id = %id, "Confirm activation ignored");
                    }
                });
            }
            AsyncAction::ConfirmReset => {
                let answer = self.state.services.dialogs.confirm(
                    DialogOptions::new()
                        .title("Start over?")
                        .message("All answers entered so far will be discarded.")
                        .confirm_text("Start over")
                        .cancel_text("Keep editing"),
                );
                tokio::spawn(async move {
                    let _ = messages.send(AppMessage::ResetConfirmed(answer.await));
                });
            }
            AsyncAction::RunExample(example) => {
                if example.is_loading() {
                    if self.state.example_loading {
                        return;
                    }
                    self.state.example_loading = true;
                }
                info!(example = example.label(), "Running dialog example");
                example.run(&self.state.services.dialogs, messages);
            }
        }
    }
}
