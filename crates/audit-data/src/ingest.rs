//! Record ingestion and validation.
//!
//! Checks the dataset schema up front (fatal on a missing column), then
//! walks the rows turning each into a [`CallRecord`] or a [`RowRejection`].
//! Bad rows never abort the run: they are skipped, counted, and carried
//! into the report.

use std::collections::HashMap;

use tracing::{debug, warn};

use audit_core::error::{AuditError, Result};
use audit_core::models::{CallRecord, RowConstraint, RowRejection};

use crate::reader::Dataset;

/// Column carrying the opaque customer identifier.
pub const COLUMN_CUSTOMER_ID: &str = "customer_id";
/// Column carrying the service-area label.
pub const COLUMN_SERVICE_AREA: &str = "service_area";
/// Column carrying the daily total-call count.
pub const COLUMN_TOTAL_CALLS: &str = "tot_call_cnt_d";
/// Column carrying the daily dropped-call count.
pub const COLUMN_DROPPED_CALLS: &str = "call_drop_cnt_d";

/// Every column the dataset must declare, matched case-sensitively.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    COLUMN_CUSTOMER_ID,
    COLUMN_SERVICE_AREA,
    COLUMN_TOTAL_CALLS,
    COLUMN_DROPPED_CALLS,
];

/// What ingestion produced: valid records plus the rows it turned away.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    /// Validated records in input order.
    pub records: Vec<CallRecord>,
    /// Rejected rows in input order, each with its violated constraint.
    pub rejections: Vec<RowRejection>,
}

/// Validate the dataset schema and ingest its rows.
///
/// A required column absent from the header row is fatal and returns
/// [`AuditError::MissingColumn`] before any row is touched. Row-level
/// problems become [`RowRejection`]s instead, so
/// `records.len() + rejections.len()` always equals `dataset.rows.len()`.
pub fn ingest(dataset: &Dataset) -> Result<IngestOutcome> {
    for column in REQUIRED_COLUMNS {
        if !dataset.headers.iter().any(|h| h == column) {
            return Err(AuditError::MissingColumn(column.to_string()));
        }
    }

    let mut records = Vec::with_capacity(dataset.rows.len());
    let mut rejections = Vec::new();

    for (idx, row) in dataset.rows.iter().enumerate() {
        // Data rows are reported 1-based, with the header row not counted.
        let row_number = idx + 1;
        match validate_row(row) {
            Ok(record) => records.push(record),
            Err(constraint) => {
                warn!(row = row_number, %constraint, "skipping row");
                rejections.push(RowRejection {
                    row: row_number,
                    constraint,
                });
            }
        }
    }

    debug!(
        records = records.len(),
        rejected = rejections.len(),
        "ingestion finished"
    );
    Ok(IngestOutcome {
        records,
        rejections,
    })
}

// ── Row validation ─────────────────────────────────────────────────────────────

/// Check one row against every ingestion constraint, first violation wins.
fn validate_row(row: &HashMap<String, String>) -> std::result::Result<CallRecord, RowConstraint> {
    let customer_id = text_field(row, COLUMN_CUSTOMER_ID)?;
    let service_area = text_field(row, COLUMN_SERVICE_AREA)?;
    let total_calls = count_field(row, COLUMN_TOTAL_CALLS)?;
    let dropped_calls = count_field(row, COLUMN_DROPPED_CALLS)?;

    if dropped_calls > total_calls {
        return Err(RowConstraint::DroppedExceedsTotal {
            dropped_calls,
            total_calls,
        });
    }

    Ok(CallRecord {
        customer_id,
        service_area,
        total_calls,
        dropped_calls,
    })
}

/// A required text cell: present and non-empty.
fn text_field(
    row: &HashMap<String, String>,
    column: &str,
) -> std::result::Result<String, RowConstraint> {
    match row.get(column).map(String::as_str) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(RowConstraint::MissingValue {
            column: column.to_string(),
        }),
    }
}

/// A required count cell: present, non-empty, and a base-10 non-negative
/// integer. `u64` parsing rejects negatives and fractions in one go.
fn count_field(
    row: &HashMap<String, String>,
    column: &str,
) -> std::result::Result<u64, RowConstraint> {
    let value = text_field(row, column)?;
    value
        .parse::<u64>()
        .map_err(|_| RowConstraint::InvalidCount {
            column: column.to_string(),
            value,
        })
}

// ── Tests ──────────────────────────────────────────────────────────────────────
