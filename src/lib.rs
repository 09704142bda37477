//! Library crate for user-dashboard.
//!
//! This crate exposes the building blocks of the TUI:
//! - Application state, keymap and update loop (`app`)
//! - Command-line options (`cli`)
//! - Session state and its operations (`dashboard`)
//! - Error and result types (`error`)
//! - Form values and validation (`form`)
//! - Log file setup (`logging`)
//! - In-memory record collection (`store`)
//! - UI rendering and widgets (`ui`)
//! - Sorting and pagination helpers (`view`)
//!
//! It is used by the `user-dashboard` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod app;
pub mod cli;
pub mod dashboard;
pub mod error;
pub mod form;
pub mod logging;
pub mod store;
pub mod ui;
pub mod view;

// Re-export commonly used items at the crate root for convenience
/// Convenient error and result types shared across the crate.
pub use error::{DynError, Result, ValidationError};
