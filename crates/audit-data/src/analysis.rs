//! Main analysis pipeline for the TRAI call-drop audit.
//!
//! Orchestrates dataset loading, row validation, aggregation and benchmark
//! evaluation, returning a [`ComplianceReport`] ready for rendering.

use std::collections::HashSet;
use std::path::Path;

use chrono::Utc;
use tracing::info;

use audit_core::models::{
    CallRecord, ComplianceReport, DatasetProfile, ReportMetadata, ReportSummary, Scope,
    ViolationFinding,
};
use audit_core::penalty::PenaltySchedule;
use audit_core::Result;

use crate::aggregator::CallAggregator;
use crate::evaluator::ComplianceEvaluator;
use crate::ingest::{ingest, IngestOutcome};
use crate::reader::{read_dataset, Dataset};

// ── Public functions ──────────────────────────────────────────────────────────

/// Run the full audit pipeline against a CSV or Excel file.
///
/// 1. Read the file into raw rows.
/// 2. Validate rows into [`CallRecord`]s, collecting rejections.
/// 3. Aggregate per service area and dataset-wide.
/// 4. Evaluate every subject against the drop-rate benchmark.
/// 5. Assemble the ordered [`ComplianceReport`].
pub fn analyze_file(path: &Path, schedule: &PenaltySchedule) -> Result<ComplianceReport> {
    let load_start = std::time::Instant::now();
    let dataset = read_dataset(path)?;
    let outcome = ingest(&dataset)?;
    let load_time = load_start.elapsed().as_secs_f64();

    Ok(assemble_report(dataset.rows.len(), outcome, schedule, load_time))
}

/// Run the audit pipeline against an already-loaded dataset.
pub fn analyze_dataset(dataset: &Dataset, schedule: &PenaltySchedule) -> Result<ComplianceReport> {
    let load_start = std::time::Instant::now();
    let outcome = ingest(dataset)?;
    let load_time = load_start.elapsed().as_secs_f64();

    Ok(assemble_report(dataset.rows.len(), outcome, schedule, load_time))
}

// ── Private helpers ───────────────────────────────────────────────────────────

/// Aggregate, evaluate and order the validated records into a report.
fn assemble_report(
    total_rows: usize,
    outcome: IngestOutcome,
    schedule: &PenaltySchedule,
    load_time: f64,
) -> ComplianceReport {
    let IngestOutcome {
        records,
        rejections,
    } = outcome;

    // ── Aggregate and evaluate ────────────────────────────────────────────────
    let analysis_start = std::time::Instant::now();
    let overall = CallAggregator::aggregate_overall(&records);
    let areas = CallAggregator::aggregate_by_area(&records);
    let mut evaluation = ComplianceEvaluator::evaluate(&overall, &areas, &records, schedule);
    order_findings(&mut evaluation.findings);
    let profile = build_profile(&records);
    let analysis_time = analysis_start.elapsed().as_secs_f64();

    // ── Assemble report ───────────────────────────────────────────────────────
    let summary = ReportSummary {
        total_rows,
        valid_records: records.len(),
        rejected_rows: rejections.len(),
        violations: evaluation.tier_counts,
        compliant_subjects: evaluation.compliant_subjects,
        compliance_score: evaluation.tier_counts.compliance_score(),
        estimated_penalty_inr: schedule.estimated_total(&evaluation.tier_counts),
    };

    let metadata = ReportMetadata {
        generated_at: Utc::now().to_rfc3339(),
        load_time_seconds: load_time,
        analysis_time_seconds: analysis_time,
    };

    info!(
        valid = summary.valid_records,
        rejected = summary.rejected_rows,
        findings = evaluation.findings.len(),
        score = summary.compliance_score,
        "audit complete"
    );

    ComplianceReport {
        findings: evaluation.findings,
        summary,
        profile,
        rejections,
        metadata,
    }
}

/// Sort findings into report order: the overall check first, then service
/// areas by descending drop rate, then customers by descending drop rate.
///
/// The sort is stable, so equal-rate subjects keep their evaluation order
/// (areas alphabetical, customers in input order).
fn order_findings(findings: &mut [ViolationFinding]) {
    findings.sort_by(|a, b| {
        scope_rank(a.scope).cmp(&scope_rank(b.scope)).then_with(|| {
            b.drop_rate
                .partial_cmp(&a.drop_rate)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    });
}

fn scope_rank(scope: Scope) -> u8 {
    match scope {
        Scope::Overall => 0,
        Scope::ServiceArea => 1,
        Scope::Customer => 2,
    }
}

/// Shape statistics over the validated records.
fn build_profile(records: &[CallRecord]) -> DatasetProfile {
    let mut profile = DatasetProfile::default();
    let mut customers = HashSet::new();
    let mut areas = HashSet::new();
    let mut customers_with_drops = HashSet::new();

    for record in records {
        if !customers.insert(record.customer_id.as_str()) {
            profile.duplicate_customer_ids += 1;
        }
        areas.insert(record.service_area.as_str());
        if record.dropped_calls > 0 {
            customers_with_drops.insert(record.customer_id.as_str());
        }
        profile.total_calls += record.total_calls;
        profile.dropped_calls += record.dropped_calls;
    }

    profile.distinct_customers = customers.len();
    profile.distinct_service_areas = areas.len();
    profile.customers_with_drops = customers_with_drops.len();
    profile
}

// ── Tests ─────────────────────────────────────────────────────────────────────
