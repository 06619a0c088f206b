//! Context and prompt assembly for the TRAI call-drop audit.
//!
//! Text-side companions to the analysis pipeline: document chunking,
//! context-size policy, and the prompt strings handed to the hosted
//! narrative model.

pub mod chunker;
pub mod context;
pub mod prompt;

pub use audit_core as core;
