// ABOUTME: Library crate for the signup wizard exposing the wizard engine, dialog manager,
// persistence adapters and TUI for the binary and for tests

#![allow(missing_docs)]

pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod dialog;
pub mod models;
pub mod services;
pub mod storage;
pub mod validation;
pub mod wizard;
