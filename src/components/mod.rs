// ABOUTME: UI components for the TUI: wizard form, success screen, dialog overlay and dialog showcase

pub mod dialog;
pub mod dialog_examples;
pub mod layout;
pub mod success;
pub mod wizard;

pub use dialog::DialogOverlayComponent;
pub use dialog_examples::DialogExamplesComponent;
pub use layout::LayoutComponent;
pub use success::SuccessComponent;
pub use wizard::WizardComponent;
