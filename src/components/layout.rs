// ABOUTME: Top-level layout: renders the active view full screen, then the dialog overlay on top

use ratatui::Frame;

use super::{DialogExamplesComponent, DialogOverlayComponent, SuccessComponent, WizardComponent};
use crate::app::{AppState, View};

pub struct LayoutComponent {
    wizard: WizardComponent,
    success: SuccessComponent,
    dialog_examples: DialogExamplesComponent,
    dialogs: DialogOverlayComponent,
}

impl LayoutComponent {
    pub fn new() -> Self {
        Self {
            wizard: WizardComponent::new(),
            success: SuccessComponent::new(),
            dialog_examples: DialogExamplesComponent::new(),
            dialogs: DialogOverlayComponent::new(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, state: &AppState) {
        let area = frame.size();

        match state.current_view {
            View::Wizard => self.wizard.render(frame, area, state),
            View::Success => self.success.render(frame, area, state),
            View::DialogExamples => self.dialog_examples.render(frame, area, state),
        }

        // Dialogs float above every view
        self.dialogs.render(frame, area, state);
    }
}

impl Default for LayoutComponent {
    fn default() -> Self {
        Self::new()
    }
}
