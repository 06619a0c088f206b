//! Data ingestion layer for the TRAI call-drop audit.
//!
//! Responsible for reading CSV and Excel call datasets, validating rows
//! against the required schema, aggregating drop statistics and running the
//! top-level analysis pipeline.

pub mod aggregator;
pub mod analysis;
pub mod evaluator;
pub mod ingest;
pub mod reader;

pub use audit_core as core;
