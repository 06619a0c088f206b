//! Compliance evaluation against the TRAI drop-rate benchmark.
//!
//! Walks three subject levels — the overall aggregate, each service area,
//! and each individual customer record — classifying every drop rate into
//! a severity tier. Subjects above the benchmark become findings with a
//! penalty range attached; compliant subjects are only counted, keeping
//! the report proportional to violations rather than dataset size.

use tracing::debug;

use audit_core::models::{
    CallRecord, DropStats, PenaltyRange, Scope, ServiceAreaAggregate, TierCounts,
    ViolationFinding,
};
use audit_core::penalty::PenaltySchedule;
use audit_core::severity::classify_drop_rate;

/// Subject id used for the dataset-wide check.
pub const OVERALL_SUBJECT_ID: &str = "overall";

/// Everything the evaluator learned about one dataset.
#[derive(Debug, Default)]
pub struct Evaluation {
    /// Findings in evaluation order: overall, then areas, then customers.
    pub findings: Vec<ViolationFinding>,
    /// Finding counts per severity tier.
    pub tier_counts: TierCounts,
    /// Subjects at or under the benchmark, across all three scopes.
    pub compliant_subjects: u32,
}

impl Evaluation {
    /// Classify one subject and either record a finding or count it as
    /// compliant.
    fn check(&mut self, scope: Scope, subject_id: &str, drop_rate: f64, schedule: &PenaltySchedule) {
        let severity = classify_drop_rate(drop_rate);
        if !severity.is_violation() {
            self.compliant_subjects += 1;
            return;
        }

        self.tier_counts.record(severity);
        self.findings.push(ViolationFinding {
            scope,
            subject_id: subject_id.to_string(),
            drop_rate,
            severity,
            penalty_range: schedule.range_for(severity),
        });
    }
}

/// Stateless evaluator over well-formed aggregates.
///
/// Classification and penalty lookup are total functions, so evaluation
/// cannot fail: there is no error path out of this module.
pub struct ComplianceEvaluator;

impl ComplianceEvaluator {
    /// Run the benchmark check at every scope.
    pub fn evaluate(
        overall: &DropStats,
        areas: &[ServiceAreaAggregate],
        records: &[CallRecord],
        schedule: &PenaltySchedule,
    ) -> Evaluation {
        let mut evaluation = Evaluation::default();

        evaluation.check(
            Scope::Overall,
            OVERALL_SUBJECT_ID,
            overall.drop_rate(),
            schedule,
        );

        for area in areas {
            evaluation.check(
                Scope::ServiceArea,
                &area.service_area,
                area.drop_rate(),
                schedule,
            );
        }

        for record in records {
            evaluation.check(
                Scope::Customer,
                &record.customer_id,
                record.drop_rate(),
                schedule,
            );
        }

        debug!(
            findings = evaluation.findings.len(),
            compliant = evaluation.compliant_subjects,
            "evaluation finished"
        );
        evaluation
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
