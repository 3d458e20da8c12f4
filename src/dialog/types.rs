// ABOUTME: Dialog vocabulary: kinds with their defaults, caller options with callbacks,
// ids, close reasons and the cloneable entry snapshot handed to the UI

use futures_util::future::{BoxFuture, FutureExt};
use std::fmt;
use std::future::Future;
use std::time::Duration;

/// Kind of dialog, which decides its default title, icon and button text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogKind {
    Success,
    Error,
    Warning,
    Info,
    Confirm,
}

impl DialogKind {
    pub const fn default_title(self) -> &'static str {
        match self {
            DialogKind::Success => "Success",
            DialogKind::Error => "Error",
            DialogKind::Warning => "Warning",
            DialogKind::Info => "Information",
            DialogKind::Confirm => "Confirm",
        }
    }

    pub const fn default_confirm_text(self) -> &'static str {
        match self {
            DialogKind::Success => "Done",
            DialogKind::Error => "Close",
            DialogKind::Warning | DialogKind::Info => "OK",
            DialogKind::Confirm => "Confirm",
        }
    }

    pub const fn default_icon(self) -> &'static str {
        match self {
            DialogKind::Success => "✓",
            DialogKind::Error => "✗",
            DialogKind::Warning => "⚠",
            DialogKind::Info => "ℹ",
            DialogKind::Confirm => "?",
        }
    }
}

impl fmt::Display for DialogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DialogKind::Success => "success",
            DialogKind::Error => "error",
            DialogKind::Warning => "warning",
            DialogKind::Info => "info",
            DialogKind::Confirm => "confirm",
        };
        f.write_str(name)
    }
}

pub const DEFAULT_CANCEL_TEXT: &str = "Cancel";

pub type ConfirmCallback = Box<dyn FnOnce() -> BoxFuture<'static, ()> + Send>;
pub type CancelCallback = Box<dyn FnOnce() + Send>;

/// What the caller wants shown; every field is optional
#[derive(Default)]
pub struct DialogOptions {
    pub title: Option<String>,
    pub message: Option<String>,
    /// Free-form body rendered below the message
    pub content: Option<String>,
    pub confirm_text: Option<String>,
    pub cancel_text: Option<String>,
    pub icon: Option<String>,
    pub auto_close: Option<Duration>,
    pub persistent: bool,
    pub show_cancel: Option<bool>,
    pub on_confirm: Option<ConfirmCallback>,
    pub on_cancel: Option<CancelCallback>,
}

impl DialogOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn confirm_text(mut self, text: impl Into<String>) -> Self {
        self.confirm_text = Some(text.into());
        self
    }

    pub fn cancel_text(mut self, text: impl Into<String>) -> Self {
        self.cancel_text = Some(text.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn auto_close(mut self, after: Duration) -> Self {
        self.auto_close = Some(after);
        self
    }

    pub fn auto_close_ms(self, millis: u64) -> Self {
        self.auto_close(Duration::from_millis(millis))
    }

    pub fn persistent(mut self, persistent: bool) -> Self {
        self.persistent = persistent;
        self
    }

    pub fn show_cancel(mut self, show: bool) -> Self {
        self.show_cancel = Some(show);
        self
    }

    /// Run `callback` when the confirm button is activated; the dialog stays
    /// open and busy until the returned future completes
    pub fn on_confirm<F, Fut>(mut self, callback: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.on_confirm = Some(Box::new(move || callback().boxed()));
        self
    }

    pub fn on_cancel<F>(mut self, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.on_cancel = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for DialogOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogOptions")
            .field("title", &self.title)
            .field("message", &self.message)
            .field("content", &self.content)
            .field("confirm_text", &self.confirm_text)
            .field("cancel_text", &self.cancel_text)
            .field("icon", &self.icon)
            .field("auto_close", &self.auto_close)
            .field("persistent", &self.persistent)
            .field("show_cancel", &self.show_cancel)
            .field("on_confirm", &self.on_confirm.is_some())
            .field("on_cancel", &self.on_cancel.is_some())
            .finish()
    }
}

impl From<&str> for DialogOptions {
    fn from(message: &str) -> Self {
        Self::new().message(message)
    }
}

impl From<String> for DialogOptions {
    fn from(message: String) -> Self {
        Self::new().message(message)
    }
}

/// Unique dialog identifier, `dialog-<seq>-<unix millis>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DialogId(String);

impl DialogId {
    pub(crate) fn generate(seq: u64) -> Self {
        Self(format!("dialog-{}-{}", seq, chrono::Utc::now().timestamp_millis()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DialogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a dialog left the active list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// Confirm button, after its callback finished
    Confirmed,
    /// Cancel button
    Cancelled,
    /// Default dismiss action (Esc)
    Dismissed,
    /// Auto-close timer fired
    TimedOut,
    /// `close` or `close_all`
    Forced,
}

impl CloseReason {
    /// Value a pending confirm resolves to
    pub const fn resolves_to(self) -> bool {
        matches!(self, CloseReason::Confirmed)
    }
}

/// Read-only view of an active dialog with defaults applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogEntry {
    pub id: DialogId,
    pub kind: DialogKind,
    pub title: String,
    pub message: Option<String>,
    pub content: Option<String>,
    pub icon: String,
    pub confirm_text: String,
    pub cancel_text: String,
    pub show_cancel: bool,
    pub auto_close: Option<Duration>,
    pub persistent: bool,
    pub visible: bool,
    /// The confirm callback is still running
    pub busy: bool,
}

impl DialogEntry {
    pub(crate) fn from_options(id: DialogId, kind: DialogKind, options: &DialogOptions) -> Self {
        let show_cancel = options
            .show_cancel
            .unwrap_or(kind == DialogKind::Confirm);

        Self {
            id,
            kind,
            title: options
                .title
                .clone()
                .unwrap_or_else(|| kind.default_title().to_string()),
            message: options.message.clone(),
            content: options.content.clone(),
            icon: options
                .icon
                .clone()
                .unwrap_or_else(|| kind.default_icon().to_string()),
            confirm_text: options
                .confirm_text
                .clone()
                .unwrap_or_else(|| kind.default_confirm_text().to_string()),
            cancel_text: options
                .cancel_text
                .clone()
                .unwrap_or_else(|| DEFAULT_CANCEL_TEXT.to_string()),
            show_cancel,
            auto_close: options.auto_close,
            persistent: options.persistent,
            visible: true,
            busy: false,
        }
    }
}
