// ABOUTME: Application state for the TUI: current view, field focus, dialog selection
// and the async actions and messages that connect key events to background tasks

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::examples::DialogExample;
use crate::config::AppConfig;
use crate::dialog::{DialogEntry, DialogId, DialogOptions};
use crate::models::{FieldKind, FieldValue, FormData, FormField, FormStep};
use crate::services::AppServices;
use crate::wizard::{
    AdvanceOutcome, SubmissionResult, SubmitError, SubmitOutcome, WizardPhase,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Wizard,
    Success,
    DialogExamples,
}

/// Button highlighted in the focused dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogButton {
    #[default]
    Confirm,
    Cancel,
}

/// Work that needs the async runtime, queued by `process_event` and run on tick
#[derive(Debug)]
pub enum AsyncAction {
    /// Hand a validated record to the submitter
    Submit(crate::models::CompleteFormData),
    /// Run the confirm callback of a dialog and close it
    ActivateConfirm(DialogId),
    /// Ask before discarding progress
    ConfirmReset,
    /// Trigger one of the showcase dialogs
    RunExample(DialogExample),
}

/// Results reported back to the loop by background tasks
#[derive(Debug)]
pub enum AppMessage {
    SubmissionFinished(Result<SubmissionResult, SubmitError>),
    ResetConfirmed(bool),
    ExampleResult(String),
    LoadingFinished,
}

pub struct AppState {
    pub services: AppServices,
    pub config: AppConfig,
    pub current_view: View,
    /// Index into the fields of the current step
    pub focused_field: usize,
    pub dialog_button: DialogButton,
    pub selected_example: usize,
    pub last_example_result: Option<String>,
    pub example_loading: bool,
    pub pending_async_action: Option<AsyncAction>,
    pub should_quit: bool,
    message_tx: mpsc::UnboundedSender<AppMessage>,
    message_rx: mpsc::UnboundedReceiver<AppMessage>,
}

impl AppState {
    pub fn new(services: AppServices, config: AppConfig) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let current_view = if services.wizard.is_submitted() {
            View::Success
        } else {
            View::Wizard
        };

        Self {
            services,
            config,
            current_view,
            focused_field: 0,
            dialog_button: DialogButton::Confirm,
            selected_example: 0,
            last_example_result: None,
            example_loading: false,
            pending_async_action: None,
            should_quit: false,
            message_tx,
            message_rx,
        }
    }

    /// Sender handed to background tasks
    pub fn message_sender(&self) -> mpsc::UnboundedSender<AppMessage> {
        self.message_tx.clone()
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    // === Wizard field focus ===

    pub fn current_fields(&self) -> &'static [FormField] {
        FormField::for_step(self.services.wizard.current_step())
    }

    pub fn focused_field(&self) -> Option<FormField> {
        self.current_fields().get(self.focused_field).copied()
    }

    pub fn next_field(&mut self) {
        let count = self.current_fields().len();
        if count > 0 {
            self.focused_field = (self.focused_field + 1) % count;
        }
    }

    pub fn previous_field(&mut self) {
        let count = self.current_fields().len();
        if count > 0 {
            self.focused_field = (self.focused_field + count - 1) % count;
        }
    }

    /// Focus the first field with an error, or the first field of the step
    fn refocus(&mut self) {
        let errors = self.services.wizard.errors();
        self.focused_field = self
            .current_fields()
            .iter()
            .position(|field| errors.contains_key(field.key()))
            .unwrap_or(0);
    }

    // === Field editing ===

    pub fn input_char(&mut self, c: char) {
        let Some(field) = self.focused_field() else {
            return;
        };

        match field.kind() {
            FieldKind::Text => {
                let mut value = self.services.wizard.form_data().text(field);
                value.push(c);
                self.set_field(field, FieldValue::Text(value));
            }
            FieldKind::Toggle if c == ' ' => self.toggle_field(),
            FieldKind::Toggle => {}
        }
    }

    pub fn backspace(&mut self) {
        let Some(field) = self.focused_field() else {
            return;
        };
        if field.kind() != FieldKind::Text {
            return;
        }

        let mut value = self.services.wizard.form_data().text(field);
        if value.pop().is_some() {
            self.set_field(field, FieldValue::Text(value));
        }
    }

    pub fn toggle_field(&mut self) {
        let Some(field) = self.focused_field() else {
            return;
        };
        if field.kind() == FieldKind::Toggle {
            let current = self.services.wizard.form_data().flag(field);
            self.set_field(field, FieldValue::Flag(!current));
        }
    }

    fn set_field(&mut self, field: FormField, value: FieldValue) {
        self.services.wizard.update_data(FormData::single(field, value));
    }

    // === Navigation ===

    /// Enter on the wizard: validate and advance, or queue the submission
    pub fn next_step(&mut self) {
        match self.services.wizard.try_advance() {
            AdvanceOutcome::Advanced(step) => {
                debug!(step = step.number(), "Moved to next step");
                self.focused_field = 0;
            }
            AdvanceOutcome::Rejected => self.refocus(),
            AdvanceOutcome::ReadyToSubmit => match self.services.wizard.begin_submit() {
                Ok(record) => self.pending_async_action = Some(AsyncAction::Submit(record)),
                Err(_) => self.refocus(),
            },
            AdvanceOutcome::Ignored => {}
        }
    }

    pub fn previous_step(&mut self) {
        let before = self.services.wizard.current_step();
        if self.services.wizard.go_previous() != before {
            self.focused_field = 0;
        }
    }

    pub fn go_to_step(&mut self, number: u8) {
        let before = self.services.wizard.current_step();
        if let Some(step) = self.services.wizard.go_to_step(number) {
            if step != before {
                self.focused_field = 0;
            }
        }
    }

    /// Ctrl+R: ask first when configured to
    pub fn request_reset(&mut self) {
        if self.is_submitting() {
            debug!("Reset ignored while submitting");
            return;
        }
        if self.config.dialogs.confirm_reset {
            self.pending_async_action = Some(AsyncAction::ConfirmReset);
        } else {
            self.reset();
        }
    }

    /// Back to an empty step 1
    pub fn reset(&mut self) {
        if self.is_submitting() {
            warn!("Reset ignored while submitting");
            return;
        }
        self.services.reset();
        self.current_view = View::Wizard;
        self.focused_field = 0;
        self.dialog_button = DialogButton::Confirm;
    }

    pub fn show_dialog_examples(&mut self) {
        self.current_view = View::DialogExamples;
    }

    /// Leave the showcase for whichever wizard view applies
    pub fn back_to_wizard(&mut self) {
        self.current_view = if self.services.wizard.is_submitted() {
            View::Success
        } else {
            View::Wizard
        };
    }

    pub fn next_example(&mut self) {
        self.selected_example = (self.selected_example + 1) % DialogExample::all().len();
    }

    pub fn previous_example(&mut self) {
        let count = DialogExample::all().len();
        self.selected_example = (self.selected_example + count - 1) % count;
    }

    pub fn run_selected_example(&mut self) {
        if let Some(example) = DialogExample::all().get(self.selected_example) {
            self.pending_async_action = Some(AsyncAction::RunExample(*example));
        }
    }

    // === Dialog overlay ===

    pub fn top_dialog(&self) -> Option<DialogEntry> {
        self.services.dialogs.top()
    }

    pub fn toggle_dialog_button(&mut self) {
        let Some(dialog) = self.top_dialog() else {
            return;
        };
        self.dialog_button = match self.dialog_button {
            DialogButton::Confirm if dialog.show_cancel => DialogButton::Cancel,
            _ => DialogButton::Confirm,
        };
    }

    pub fn activate_dialog_button(&mut self) {
        let Some(dialog) = self.top_dialog() else {
            return;
        };

        match self.dialog_button {
            DialogButton::Cancel if dialog.show_cancel => {
                self.services.dialogs.activate_cancel(&dialog.id);
            }
            _ => {
                self.pending_async_action = Some(AsyncAction::ActivateConfirm(dialog.id));
            }
        }
        self.dialog_button = DialogButton::Confirm;
    }

    pub fn dismiss_dialog(&mut self) {
        if let Some(dialog) = self.top_dialog() {
            if self.services.dialogs.dismiss(&dialog.id) {
                self.dialog_button = DialogButton::Confirm;
            }
        }
    }

    // === Background results ===

    /// Apply everything background tasks have reported so far
    pub fn drain_messages(&mut self) {
        while let Ok(message) = self.message_rx.try_recv() {
            self.handle_message(message);
        }
    }

    pub fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::SubmissionFinished(result) => self.finish_submission(result),
            AppMessage::ResetConfirmed(true) => {
                self.reset();
                self.services.dialogs.info(
                    DialogOptions::from("Your progress has been cleared.")
                        .auto_close(self.config.dialogs.notice_auto_close()),
                );
            }
            AppMessage::ResetConfirmed(false) => debug!("Reset cancelled"),
            AppMessage::ExampleResult(result) => self.last_example_result = Some(result),
            AppMessage::LoadingFinished => self.example_loading = false,
        }
    }

    fn finish_submission(&mut self, result: Result<SubmissionResult, SubmitError>) {
        match self.services.wizard.finish_submit(result) {
            SubmitOutcome::Submitted => {
                info!("Showing success view");
                self.current_view = View::Success;
                if let WizardPhase::Submitted(summary) = self.services.wizard.phase() {
                    self.services.dialogs.success(
                        DialogOptions::from(summary.message.clone())
                            .title("Registration complete")
                            .auto_close(self.config.dialogs.notice_auto_close()),
                    );
                }
            }
            SubmitOutcome::Failed | SubmitOutcome::Rejected => {
                let message = self
                    .services
                    .wizard
                    .errors()
                    .get(crate::models::GENERAL_ERROR_KEY)
                    .cloned()
                    .unwrap_or_else(|| "Please fix the highlighted fields.".to_string());
                self.refocus();
                self.services.dialogs.error(
                    DialogOptions::from(message)
                        .title("Submission failed")
                        .confirm_text("Close"),
                );
            }
            SubmitOutcome::Ignored => warn!("Dropped a stale submission result"),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.services.wizard.is_submitting()
    }

    pub fn current_step(&self) -> FormStep {
        self.services.wizard.current_step()
    }
}
