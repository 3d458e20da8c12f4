// ABOUTME: Behavioral tests for the dialog stack: ordering, confirm answers and auto-close

use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use signup_wizard::dialog::{DialogKind, DialogManager, DialogOptions};

#[tokio::test]
async fn test_dialogs_stack_in_open_order() {
    let dialogs = DialogManager::new();
    let first = dialogs.success("Saved");
    let second = dialogs.error(DialogOptions::new().title("Oops").message("Broken"));
    let third = dialogs.warning("Careful");

    let kinds: Vec<DialogKind> = dialogs.dialogs().iter().map(|d| d.kind).collect();
    assert_eq!(kinds, vec![DialogKind::Success, DialogKind::Error, DialogKind::Warning]);
    assert_eq!(dialogs.top().map(|d| d.id), Some(third.clone()));

    assert_ne!(first, second);
    assert_ne!(second, third);

    let error = dialogs.get(&second).unwrap();
    assert_eq!(error.title, "Oops");
    assert_eq!(error.message.as_deref(), Some("Broken"));
}

#[tokio::test]
async fn test_notice_defaults_come_from_kind() {
    let dialogs = DialogManager::new();
    let id = dialogs.info("FYI");
    let entry = dialogs.get(&id).unwrap();

    assert_eq!(entry.title, DialogKind::Info.default_title());
    assert_eq!(entry.confirm_text, DialogKind::Info.default_confirm_text());
    assert_eq!(entry.icon, DialogKind::Info.default_icon());
    assert!(!entry.show_cancel);
}

#[tokio::test]
async fn test_confirm_resolves_true_on_confirm() {
    let dialogs = DialogManager::new();
    let handle = dialogs.confirm(DialogOptions::new().title("Delete?"));
    let id = handle.id().clone();
    assert!(dialogs.get(&id).unwrap().show_cancel);

    assert!(dialogs.activate_confirm(&id).await);
    assert!(handle.await);
    assert!(dialogs.is_empty());
}

#[tokio::test]
async fn test_confirm_resolves_false_on_cancel() {
    let dialogs = DialogManager::new();
    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = cancelled.clone();

    let handle = dialogs.confirm(
        DialogOptions::new()
            .message("Discard changes?")
            .on_cancel(move || flag.store(true, Ordering::SeqCst)),
    );
    let id = handle.id().clone();

    assert!(dialogs.activate_cancel(&id));
    assert!(!handle.await);
    assert!(cancelled.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_forced_close_resolves_false() {
    let dialogs = DialogManager::new();
    let a = dialogs.confirm("First?");
    let b = dialogs.confirm("Second?");

    assert!(dialogs.close(&a.id().clone()));
    assert!(!a.await);

    assert_eq!(dialogs.close_all(), 1);
    assert!(!b.await);
}

#[tokio::test]
async fn test_dropping_the_manager_resolves_false() {
    let dialogs = DialogManager::new();
    let handle = dialogs.confirm("Still there?");
    dialogs.reset();
    drop(dialogs);
    assert!(!handle.await);
}

#[tokio::test]
async fn test_confirm_callback_runs_before_close() {
    let dialogs = DialogManager::new();
    let ran = Arc::new(AtomicBool::new(false));
    let flag = ran.clone();

    let handle = dialogs.confirm(DialogOptions::new().on_confirm(move || async move {
        tokio::time::sleep(Duration::from_millis(5)).await;
        flag.store(true, Ordering::SeqCst);
    }));
    let id = handle.id().clone();

    assert!(dialogs.activate_confirm(&id).await);
    assert!(ran.load(Ordering::SeqCst));
    assert!(handle.await);
}

#[tokio::test]
async fn test_persistent_dialog_ignores_dismiss() {
    let dialogs = DialogManager::new();
    let id = dialogs.warning(DialogOptions::new().message("Read this").persistent(true));

    assert!(!dialogs.dismiss(&id));
    assert_eq!(dialogs.len(), 1);

    assert!(dialogs.close(&id));
    assert!(dialogs.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_auto_close_removes_dialog() {
    let dialogs = DialogManager::new();
    let keep = dialogs.info("Stays");
    dialogs.success(DialogOptions::new().message("Goes away").auto_close_ms(1000));
    assert_eq!(dialogs.len(), 2);

    tokio::time::sleep(Duration::from_millis(999)).await;
    assert_eq!(dialogs.len(), 2);

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(dialogs.len(), 1);
    assert_eq!(dialogs.top().map(|d| d.id), Some(keep));
}

#[tokio::test(start_paused = true)]
async fn test_auto_closed_confirm_resolves_false() {
    let dialogs = DialogManager::new();
    let handle = dialogs.confirm(DialogOptions::new().message("Quick!").auto_close_ms(500));

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert!(dialogs.is_empty());
    assert!(!handle.await);
}
