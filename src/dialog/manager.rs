// ABOUTME: Dialog manager: ordered list of active dialogs, confirm futures and auto-close timers
// Cheap to clone; every clone drives the same list

//! The `DialogManager` owns every modal dialog currently on screen.
//!
//! ```text
//!  success/error/warning/info ──▶ append entry ──▶ (optional) auto-close timer
//!  confirm ──────────────────────▶ append entry + oneshot ──▶ ConfirmHandle
//!
//!  activate_confirm ─▶ await on_confirm ─▶ close(Confirmed) ─▶ handle = true
//!  activate_cancel ──▶ on_cancel ────────▶ close(Cancelled) ─▶ handle = false
//!  dismiss / timer / close / close_all ──▶ close(...)       ─▶ handle = false
//! ```
//!
//! A confirm's oneshot sender lives with its entry and is consumed by the
//! first close path that runs, so each confirm resolves exactly once. Pressing
//! confirm claims the sender before the callback runs, so later closes cannot
//! turn an accepted confirm into `false`. Dropping
//! the last manager clone drops the senders, which resolves pending confirms
//! to `false`.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::types::{
    CancelCallback, CloseReason, ConfirmCallback, DialogEntry, DialogId, DialogKind,
    DialogOptions,
};

struct ActiveDialog {
    entry: DialogEntry,
    on_confirm: Option<ConfirmCallback>,
    on_cancel: Option<CancelCallback>,
    responder: Option<oneshot::Sender<bool>>,
    timer: Option<JoinHandle<()>>,
}

impl ActiveDialog {
    fn finish(mut self, reason: CloseReason) -> DialogEntry {
        if reason != CloseReason::TimedOut {
            if let Some(timer) = self.timer.take() {
                timer.abort();
            }
        }
        if let Some(responder) = self.responder.take() {
            // Receiver may already be gone; nobody is waiting then
            let _ = responder.send(reason.resolves_to());
        }
        info!(id = %self.entry.id, kind = %self.entry.kind, ?reason, "Closed dialog");
        self.entry
    }
}

#[derive(Default)]
struct Inner {
    dialogs: Vec<ActiveDialog>,
    next_seq: u64,
}

impl Inner {
    fn position(&self, id: &DialogId) -> Option<usize> {
        self.dialogs.iter().position(|d| &d.entry.id == id)
    }

    fn find_mut(&mut self, id: &DialogId) -> Option<&mut ActiveDialog> {
        self.dialogs.iter_mut().find(|d| &d.entry.id == id)
    }

    fn take(&mut self, id: &DialogId) -> Option<ActiveDialog> {
        self.position(id).map(|index| self.dialogs.remove(index))
    }
}

/// Shared handle over the active dialog list
#[derive(Clone, Default)]
pub struct DialogManager {
    inner: Arc<Mutex<Inner>>,
}

impl std::fmt::Debug for DialogManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogManager")
            .field("active", &self.len())
            .finish()
    }
}

impl DialogManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // === Opening ===

    pub fn success(&self, options: impl Into<DialogOptions>) -> DialogId {
        self.open(DialogKind::Success, options.into(), None)
    }

    pub fn error(&self, options: impl Into<DialogOptions>) -> DialogId {
        self.open(DialogKind::Error, options.into(), None)
    }

    pub fn warning(&self, options: impl Into<DialogOptions>) -> DialogId {
        self.open(DialogKind::Warning, options.into(), None)
    }

    pub fn info(&self, options: impl Into<DialogOptions>) -> DialogId {
        self.open(DialogKind::Info, options.into(), None)
    }

    /// Ask a yes/no question; the handle resolves once the dialog closes
    pub fn confirm(&self, options: impl Into<DialogOptions>) -> ConfirmHandle {
        let (sender, receiver) = oneshot::channel();
        let id = self.open(DialogKind::Confirm, options.into(), Some(sender));
        ConfirmHandle { id, receiver }
    }

    fn open(
        &self,
        kind: DialogKind,
        mut options: DialogOptions,
        responder: Option<oneshot::Sender<bool>>,
    ) -> DialogId {
        let auto_close = options.auto_close;
        let id = {
            let mut inner = self.lock();
            inner.next_seq += 1;
            let id = DialogId::generate(inner.next_seq);
            let entry = DialogEntry::from_options(id.clone(), kind, &options);
            inner.dialogs.push(ActiveDialog {
                entry,
                on_confirm: options.on_confirm.take(),
                on_cancel: options.on_cancel.take(),
                responder,
                timer: None,
            });
            id
        };
        info!(id = %id, kind = %kind, "Opened dialog");

        if let Some(after) = auto_close {
            self.schedule_auto_close(&id, after);
        }
        id
    }

    fn schedule_auto_close(&self, id: &DialogId, after: Duration) {
        let Ok(runtime) = Handle::try_current() else {
            warn!(id = %id, "No async runtime, dialog will not auto-close");
            return;
        };

        let weak: Weak<Mutex<Inner>> = Arc::downgrade(&self.inner);
        let timer_id = id.clone();
        let timer = runtime.spawn(async move {
            tokio::time::sleep(after).await;
            if let Some(inner) = weak.upgrade() {
                debug!(id = %timer_id, "Auto-close timer fired");
                DialogManager { inner }.close_with(&timer_id, CloseReason::TimedOut);
            }
        });

        let mut inner = self.lock();
        match inner.find_mut(id) {
            Some(dialog) => dialog.timer = Some(timer),
            // Closed before the timer could be attached
            None => timer.abort(),
        }
    }

    // === Closing ===

    /// Remove a dialog; pending confirms resolve `false`
    pub fn close(&self, id: &DialogId) -> bool {
        self.close_with(id, CloseReason::Forced)
    }

    /// Remove every dialog, persistent ones included
    pub fn close_all(&self) -> usize {
        let drained: Vec<ActiveDialog> = self.lock().dialogs.drain(..).collect();
        let count = drained.len();
        for dialog in drained {
            dialog.finish(CloseReason::Forced);
        }
        count
    }

    /// Default dismiss action; ignored for persistent or busy dialogs
    pub fn dismiss(&self, id: &DialogId) -> bool {
        let blocked = match self.lock().find_mut(id) {
            Some(dialog) => dialog.entry.persistent || dialog.entry.busy,
            None => return false,
        };
        if blocked {
            debug!(id = %id, "Dismiss suppressed");
            return false;
        }
        self.close_with(id, CloseReason::Dismissed)
    }

    /// User pressed the confirm button
    ///
    /// Runs the confirm callback to completion while the dialog shows as
    /// busy, then closes it. The answer is claimed up front: a timer or forced
    /// close racing the callback only removes the entry, and the handle still
    /// resolves `true`. Returns false when the dialog is gone or already
    /// confirming.
    pub async fn activate_confirm(&self, id: &DialogId) -> bool {
        let (callback, responder) = {
            let mut inner = self.lock();
            let Some(dialog) = inner.find_mut(id) else {
                return false;
            };
            if dialog.entry.busy {
                return false;
            }
            dialog.entry.busy = true;
            if let Some(timer) = dialog.timer.take() {
                timer.abort();
            }
            (dialog.on_confirm.take(), dialog.responder.take())
        };

        if let Some(callback) = callback {
            callback().await;
        }

        if !self.close_with(id, CloseReason::Confirmed) {
            debug!(id = %id, "Dialog was closed while confirming");
        }
        if let Some(responder) = responder {
            let _ = responder.send(true);
        }
        true
    }

    /// User pressed the cancel button
    pub fn activate_cancel(&self, id: &DialogId) -> bool {
        let dialog = {
            let mut inner = self.lock();
            match inner.find_mut(id) {
                Some(dialog) if !dialog.entry.busy => {}
                _ => return false,
            }
            inner.take(id)
        };
        let Some(mut dialog) = dialog else {
            return false;
        };

        // Run outside the lock so the callback may open or close dialogs
        if let Some(on_cancel) = dialog.on_cancel.take() {
            on_cancel();
        }
        dialog.finish(CloseReason::Cancelled);
        true
    }

    fn close_with(&self, id: &DialogId, reason: CloseReason) -> bool {
        let dialog = self.lock().take(id);
        match dialog {
            Some(dialog) => {
                dialog.finish(reason);
                true
            }
            None => false,
        }
    }

    /// Alias for `close_all`, used when the app restarts its services
    pub fn reset(&self) {
        self.close_all();
    }

    // === Queries ===

    pub fn dialogs(&self) -> Vec<DialogEntry> {
        self.lock().dialogs.iter().map(|d| d.entry.clone()).collect()
    }

    /// Most recently opened dialog, the one that receives input
    pub fn top(&self) -> Option<DialogEntry> {
        self.lock().dialogs.last().map(|d| d.entry.clone())
    }

    pub fn get(&self, id: &DialogId) -> Option<DialogEntry> {
        self.lock()
            .dialogs
            .iter()
            .find(|d| &d.entry.id == id)
            .map(|d| d.entry.clone())
    }

    pub fn len(&self) -> usize {
        self.lock().dialogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().dialogs.is_empty()
    }
}

/// Pending answer of a confirm dialog
///
/// Resolves `true` only through the confirm button; every other close path,
/// including dropping the manager, resolves `false`.
#[derive(Debug)]
pub struct ConfirmHandle {
    id: DialogId,
    receiver: oneshot::Receiver<bool>,
}

impl ConfirmHandle {
    pub fn id(&self) -> &DialogId {
        &self.id
    }
}

impl Future for ConfirmHandle {
    type Output = bool;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|answer| answer.unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[test]
    fn test_plain_message_gets_default_title() {
        let dialogs = DialogManager::new();
        let id = dialogs.success("Saved");

        let entry = dialogs.get(&id).unwrap();
        assert_eq!(entry.kind, DialogKind::Success);
        assert_eq!(entry.title, "Success");
        assert_eq!(entry.message.as_deref(), Some("Saved"));
        assert_eq!(entry.confirm_text, "Done");
    }

    #[test]
    fn test_insertion_order_and_unique_ids() {
        let dialogs = DialogManager::new();
        let a = dialogs.info("one");
        let b = dialogs.warning("two");
        let c = dialogs.error("three");

        let ids: Vec<DialogId> = dialogs.dialogs().into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![a.clone(), b.clone(), c.clone()]);
        assert_ne!(a, b);
        assert_eq!(dialogs.top().unwrap().id, c);
    }

    #[test]
    fn test_close_all_is_idempotent() {
        let dialogs = DialogManager::new();
        dialogs.success("Saved");
        dialogs.warning(DialogOptions::from("Sticky").persistent(true));

        assert_eq!(dialogs.close_all(), 2);
        assert!(dialogs.is_empty());
        assert_eq!(dialogs.close_all(), 0);
        assert!(dialogs.is_empty());
    }

    #[test]
    fn test_close_unknown_is_noop() {
        let dialogs = DialogManager::new();
        let id = dialogs.info("hello");
        assert!(dialogs.close(&id));
        assert!(!dialogs.close(&id));
    }

    #[test]
    fn test_persistent_dialog_ignores_dismiss() {
        let dialogs = DialogManager::new();
        let sticky = dialogs.warning(DialogOptions::from("Read me").persistent(true));
        let plain = dialogs.info("Skippable");

        assert!(!dialogs.dismiss(&sticky));
        assert!(dialogs.dismiss(&plain));
        assert_eq!(dialogs.len(), 1);
        assert!(dialogs.close(&sticky));
    }

    #[tokio::test]
    async fn test_confirm_runs_callback_then_resolves_true() {
        let dialogs = DialogManager::new();
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);

        let handle = dialogs.confirm(DialogOptions::from("Delete?").on_confirm(move || async move {
            tokio::task::yield_now().await;
            flag.store(true, Ordering::SeqCst);
        }));
        let id = handle.id().clone();

        assert!(dialogs.activate_confirm(&id).await);
        assert!(handle.await);
        assert!(ran.load(Ordering::SeqCst));
        assert!(dialogs.is_empty());
    }

    #[tokio::test]
    async fn test_cancel_runs_callback_then_resolves_false() {
        let dialogs = DialogManager::new();
        let cancelled = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&cancelled);

        let handle = dialogs.confirm(DialogOptions::from("Delete?").on_cancel(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        let id = handle.id().clone();

        assert!(dialogs.activate_cancel(&id));
        assert!(!dialogs.activate_cancel(&id));
        assert!(!handle.await);
        assert_eq!(cancelled.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_forced_close_resolves_false_without_callbacks() {
        let dialogs = DialogManager::new();
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        let handle = dialogs.confirm(DialogOptions::new().on_cancel(move || {
            flag.store(true, Ordering::SeqCst);
        }));
        dialogs.close_all();

        assert!(!handle.await);
        assert!(!cancelled.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_dropping_manager_resolves_false() {
        let dialogs = DialogManager::new();
        let handle = dialogs.confirm("Still there?");
        drop(dialogs);
        assert!(!handle.await);
    }

    #[tokio::test]
    async fn test_double_confirm_is_ignored() {
        let dialogs = DialogManager::new();
        let handle = dialogs.confirm(DialogOptions::new().on_confirm(|| async {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }));
        let id = handle.id().clone();

        let first = dialogs.clone();
        let first_id = id.clone();
        let running = tokio::spawn(async move { first.activate_confirm(&first_id).await });
        tokio::task::yield_now().await;

        assert!(dialogs.get(&id).unwrap().busy);
        assert!(!dialogs.activate_confirm(&id).await);
        assert!(!dialogs.dismiss(&id));
        assert!(running.await.unwrap());
        assert!(handle.await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_during_confirm_callback_keeps_true() {
        let dialogs = DialogManager::new();
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);

        let handle = dialogs.confirm(
            DialogOptions::from("Delete?")
                .auto_close_ms(50)
                .on_confirm(move || async move {
                    tokio::time::sleep(Duration::from_millis(100)).await;
                    flag.store(true, Ordering::SeqCst);
                }),
        );
        let id = handle.id().clone();

        assert!(dialogs.activate_confirm(&id).await);
        assert!(ran.load(Ordering::SeqCst));
        assert!(handle.await);
        assert!(dialogs.is_empty());
    }

    #[tokio::test]
    async fn test_close_all_during_confirm_callback_keeps_true() {
        let dialogs = DialogManager::new();
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);

        let handle = dialogs.confirm(DialogOptions::from("Delete?").on_confirm(move || async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            flag.store(true, Ordering::SeqCst);
        }));
        let id = handle.id().clone();

        let confirming = dialogs.clone();
        let confirm_id = id.clone();
        let running = tokio::spawn(async move { confirming.activate_confirm(&confirm_id).await });
        tokio::task::yield_now().await;
        assert!(dialogs.get(&id).unwrap().busy);

        assert_eq!(dialogs.close_all(), 1);
        assert!(running.await.unwrap());
        assert!(ran.load(Ordering::SeqCst));
        assert!(handle.await);
        assert!(dialogs.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_close_resolves_pending_confirm() {
        let dialogs = DialogManager::new();
        let handle = dialogs.confirm(DialogOptions::from("Proceed?").auto_close_ms(1000));
        assert_eq!(dialogs.len(), 1);

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert_eq!(dialogs.len(), 1);

        assert!(!handle.await);
        assert!(dialogs.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_early_close_cancels_timer() {
        let dialogs = DialogManager::new();
        let first = dialogs.info(DialogOptions::from("Welcome").auto_close_ms(3000));
        assert!(dialogs.close(&first));

        let second = dialogs.info("Next");
        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert_eq!(dialogs.get(&second).map(|d| d.id), Some(second));
    }

    #[test]
    fn test_auto_close_without_runtime_keeps_dialog() {
        let dialogs = DialogManager::new();
        let id = dialogs.success(DialogOptions::from("Saved").auto_close_ms(10));
        assert!(dialogs.get(&id).is_some());
    }
}
