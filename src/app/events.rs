// ABOUTME: Event handling system for keyboard input and app actions

use crate::app::state::{AppState, View};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    // Wizard field editing
    NextField,
    PreviousField,
    InputChar(char),
    Backspace,
    ToggleField,
    // Wizard navigation
    NextStep,
    PreviousStep,
    GoToStep(u8),
    ResetRequested,
    StartOver,
    // Dialog showcase
    ShowDialogExamples,
    BackToWizard,
    NextExample,
    PreviousExample,
    RunExample,
    // Dialog overlay
    DialogToggleButton,
    DialogActivate,
    DialogDismiss,
}

pub struct EventHandler;

impl EventHandler {
    pub fn handle_key_event(key_event: KeyEvent, state: &mut AppState) -> Option<AppEvent> {
        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

        // Quit works everywhere
        if ctrl && matches!(key_event.code, KeyCode::Char('c' | 'q')) {
            return Some(AppEvent::Quit);
        }

        // Dialogs capture input while any is open
        if state.top_dialog().is_some() {
            return match key_event.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                    Some(AppEvent::DialogToggleButton)
                }
                KeyCode::Enter => Some(AppEvent::DialogActivate),
                KeyCode::Esc => Some(AppEvent::DialogDismiss),
                _ => None,
            };
        }

        match state.current_view {
            View::Wizard => Self::handle_wizard_keys(key_event, state),
            View::Success => Self::handle_success_keys(key_event),
            View::DialogExamples => Self::handle_examples_keys(key_event),
        }
    }

    fn handle_wizard_keys(key_event: KeyEvent, state: &AppState) -> Option<AppEvent> {
        // Nothing but quitting while the submission is in flight
        if state.is_submitting() {
            return None;
        }

        if key_event.modifiers.contains(KeyModifiers::CONTROL) {
            return match key_event.code {
                KeyCode::Char('p') => Some(AppEvent::PreviousStep),
                KeyCode::Char('r') => Some(AppEvent::ResetRequested),
                KeyCode::Char('d') => Some(AppEvent::ShowDialogExamples),
                _ => None,
            };
        }

        match key_event.code {
            KeyCode::Tab | KeyCode::Down => Some(AppEvent::NextField),
            KeyCode::BackTab | KeyCode::Up => Some(AppEvent::PreviousField),
            KeyCode::Enter => Some(AppEvent::NextStep),
            KeyCode::PageUp => Some(AppEvent::PreviousStep),
            KeyCode::F(n @ 1..=3) => Some(AppEvent::GoToStep(n)),
            KeyCode::Backspace => Some(AppEvent::Backspace),
            KeyCode::Char(' ') if Self::focused_is_toggle(state) => Some(AppEvent::ToggleField),
            KeyCode::Char(c) => Some(AppEvent::InputChar(c)),
            _ => None,
        }
    }

    fn handle_success_keys(key_event: KeyEvent) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Enter => Some(AppEvent::StartOver),
            KeyCode::Char('d') => Some(AppEvent::ShowDialogExamples),
            KeyCode::Char('q') | KeyCode::Esc => Some(AppEvent::Quit),
            _ => None,
        }
    }

    fn handle_examples_keys(key_event: KeyEvent) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => Some(AppEvent::NextExample),
            KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => Some(AppEvent::PreviousExample),
            KeyCode::Enter => Some(AppEvent::RunExample),
            KeyCode::Esc | KeyCode::Char('b') => Some(AppEvent::BackToWizard),
            KeyCode::Char('q') => Some(AppEvent::Quit),
            _ => None,
        }
    }

    fn focused_is_toggle(state: &AppState) -> bool {
        state
            .focused_field()
            .is_some_and(|field| field.kind() == crate::models::FieldKind::Toggle)
    }

    pub fn process_event(event: AppEvent, state: &mut AppState) {
        debug!(?event, "Processing event");
        match event {
            AppEvent::Quit => state.quit(),
            AppEvent::NextField => state.next_field(),
            AppEvent::PreviousField => state.previous_field(),
            AppEvent::InputChar(c) => state.input_char(c),
            AppEvent::Backspace => state.backspace(),
            AppEvent::ToggleField => state.toggle_field(),
            AppEvent::NextStep => state.next_step(),
            AppEvent::PreviousStep => state.previous_step(),
            AppEvent::GoToStep(number) => state.go_to_step(number),
            AppEvent::ResetRequested => state.request_reset(),
            AppEvent::StartOver => state.reset(),
            AppEvent::ShowDialogExamples => state.show_dialog_examples(),
            AppEvent::BackToWizard => state.back_to_wizard(),
            AppEvent::NextExample => state.next_example(),
            AppEvent::PreviousExample => state.previous_example(),
            AppEvent::RunExample => state.run_selected_example(),
            AppEvent::DialogToggleButton => state.toggle_dialog_button(),
            AppEvent::DialogActivate => state.activate_dialog_button(),
            AppEvent::DialogDismiss => state.dismiss_dialog(),
        }
    }
}
