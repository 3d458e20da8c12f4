// ABOUTME: Modal dialog and notification system shared by every view

pub mod manager;
pub mod types;

pub use manager::{ConfirmHandle, DialogManager};
pub use types::{CloseReason, DialogEntry, DialogId, DialogKind, DialogOptions};
