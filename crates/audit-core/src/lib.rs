//! Core domain layer for the TRAI call-drop audit.
//!
//! Holds the data model, severity thresholds, the penalty schedule, report
//! formatting helpers, CLI settings, and the shared error type. Dataset
//! parsing and report rendering live in the data and binary crates.

pub mod error;
pub mod formatting;
pub mod models;
pub mod penalty;
pub mod settings;
pub mod severity;

pub use error::{AuditError, Result};
