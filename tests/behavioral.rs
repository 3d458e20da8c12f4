// ABOUTME: Behavioral test suite for the wizard engine, dialog manager, persistence and config
//
// These tests drive the public API the way the TUI and CLI do and check
// observable behavior only.

#[path = "behavioral/fixtures.rs"]
pub mod fixtures;

#[path = "behavioral/wizard_flow.rs"]
mod wizard_flow;

#[path = "behavioral/persistence.rs"]
mod persistence;

#[path = "behavioral/dialog_manager.rs"]
mod dialog_manager;

#[path = "behavioral/config_loading.rs"]
mod config_loading;
