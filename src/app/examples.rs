// ABOUTME: Dialog showcase: every kind of dialog the manager supports, triggered from the examples view

use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

use super::state::AppMessage;
use crate::dialog::{DialogManager, DialogOptions};

const LOADING_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogExample {
    Success,
    Error,
    Warning,
    Info,
    Welcome,
    Persistent,
    CustomContent,
    BasicConfirm,
    AdvancedConfirm,
    Loading,
}

impl DialogExample {
    pub fn all() -> &'static [DialogExample] {
        &[
            Self::Success,
            Self::Error,
            Self::Warning,
            Self::Info,
            Self::Welcome,
            Self::Persistent,
            Self::CustomContent,
            Self::BasicConfirm,
            Self::AdvancedConfirm,
            Self::Loading,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Error => "Error",
            Self::Warning => "Warning",
            Self::Info => "Info",
            Self::Welcome => "Custom welcome (auto-close)",
            Self::Persistent => "Persistent",
            Self::CustomContent => "Custom content",
            Self::BasicConfirm => "Basic confirm",
            Self::AdvancedConfirm => "Advanced confirm",
            Self::Loading => "Loading",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Success => "Plain success message with the default title",
            Self::Error => "Custom title and a Retry button",
            Self::Warning => "Warning about an irreversible action",
            Self::Info => "Informational notice",
            Self::Welcome => "Custom title and button, closes itself after 3 seconds",
            Self::Persistent => "Esc does nothing; close it with its button",
            Self::CustomContent => "Free-form body below the title",
            Self::BasicConfirm => "Waits for Delete or Cancel and reports the answer",
            Self::AdvancedConfirm => "Deployment confirmation reporting the answer",
            Self::Loading => "Saves for 2 seconds, then succeeds or fails at random",
        }
    }

    /// Whether running this example keeps a background task busy
    pub const fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Open the example's dialog; confirm and loading examples report back
    /// through `messages`
    pub fn run(self, dialogs: &DialogManager, messages: UnboundedSender<AppMessage>) {
        match self {
            Self::Success => {
                dialogs.success("Operation completed successfully!");
            }
            Self::Error => {
                dialogs.error(
                    DialogOptions::new()
                        .title("Something went wrong")
                        .message("Please try again or contact support.")
                        .confirm_text("Retry"),
                );
            }
            Self::Warning => {
                dialogs.warning("This action cannot be undone.");
            }
            Self::Info => {
                dialogs.info("System maintenance scheduled for tonight.");
            }
            Self::Welcome => {
                dialogs.success(
                    DialogOptions::new()
                        .title("🎉 Welcome!")
                        .message("Your account has been created successfully.")
                        .confirm_text("Get Started")
                        .auto_close_ms(3000),
                );
            }
            Self::Persistent => {
                dialogs.warning(
                    DialogOptions::new()
                        .title("System Maintenance")
                        .message("Service will be unavailable for 30 minutes.")
                        .persistent(true),
                );
            }
            Self::CustomContent => {
                dialogs.info(
                    DialogOptions::new().title("User Profile").content(
                        "Name:   Jane Cooper\nEmail:  jane@example.com\nRole:   Administrator\nStatus: Active",
                    ),
                );
            }
            Self::BasicConfirm => {
                let answer = dialogs.confirm(
                    DialogOptions::new()
                        .title("Delete Item")
                        .message("This action cannot be undone.")
                        .confirm_text("Delete")
                        .cancel_text("Cancel"),
                );
                tokio::spawn(async move {
                    let result = if answer.await { "Item deleted" } else { "Action cancelled" };
                    let _ = messages.send(AppMessage::ExampleResult(result.to_string()));
                });
            }
            Self::AdvancedConfirm => {
                let answer = dialogs.confirm(
                    DialogOptions::new()
                        .title("Deploy to Production")
                        .message("This will affect all users. Continue?")
                        .confirm_text("Deploy")
                        .cancel_text("Cancel"),
                );
                tokio::spawn(async move {
                    let result = if answer.await {
                        "Deployment started"
                    } else {
                        "Deployment cancelled"
                    };
                    let _ = messages.send(AppMessage::ExampleResult(result.to_string()));
                });
            }
            Self::Loading => {
                let dialogs = dialogs.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(LOADING_DELAY).await;
                    if rand::random::<f64>() < 0.5 {
                        dialogs.success(
                            DialogOptions::new()
                                .title("Success")
                                .message("Data saved successfully.")
                                .auto_close_ms(2000),
                        );
                    } else {
                        dialogs.error(
                            DialogOptions::new()
                                .title("Error")
                                .message("Failed to save data.")
                                .confirm_text("Retry"),
                        );
                    }
                    let _ = messages.send(AppMessage::LoadingFinished);
                });
            }
        }
    }
}
