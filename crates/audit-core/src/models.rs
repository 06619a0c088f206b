use serde::{Deserialize, Serialize};
use std::fmt;

use crate::severity::Severity;

/// The subject level a compliance check applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// A single customer's own call records.
    Customer,
    /// All records within one service area.
    ServiceArea,
    /// The whole dataset.
    Overall,
}

impl Scope {
    /// The canonical snake_case string identifier for this scope.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Customer => "customer",
            Scope::ServiceArea => "service_area",
            Scope::Overall => "overall",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validated call-data row.
///
/// Created once per ingested row and never mutated afterwards. Ingestion
/// guarantees `dropped_calls <= total_calls`; rows breaking that invariant
/// are rejected, never clamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    /// Opaque customer identifier. Uniqueness is best-effort in the source.
    pub customer_id: String,
    /// Geographic / administrative grouping label.
    pub service_area: String,
    /// Total calls placed by the customer in the reporting window.
    pub total_calls: u64,
    /// Calls dropped in the reporting window.
    pub dropped_calls: u64,
}

impl CallRecord {
    /// Ratio of dropped to total calls; 0.0 when the customer placed no calls.
    pub fn drop_rate(&self) -> f64 {
        if self.total_calls == 0 {
            0.0
        } else {
            self.dropped_calls as f64 / self.total_calls as f64
        }
    }
}

/// Accumulated call counts across multiple records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropStats {
    /// Accumulated total calls.
    #[serde(default)]
    pub total_calls: u64,
    /// Accumulated dropped calls.
    #[serde(default)]
    pub dropped_calls: u64,
    /// Number of records folded into this cell.
    #[serde(default)]
    pub record_count: u32,
}

impl DropStats {
    /// Fold one record into the accumulated counts.
    pub fn add_record(&mut self, record: &CallRecord) {
        self.total_calls += record.total_calls;
        self.dropped_calls += record.dropped_calls;
        self.record_count += 1;
    }

    /// Ratio of dropped to total calls; 0.0 when there is no call volume.
    ///
    /// A group with zero volume is non-violating by construction, not an
    /// error case.
    pub fn drop_rate(&self) -> f64 {
        if self.total_calls == 0 {
            0.0
        } else {
            self.dropped_calls as f64 / self.total_calls as f64
        }
    }
}

/// Accumulated call counts for one service area.
///
/// Derived on every analysis run and never persisted; the drop rate is
/// always recomputed from the sums.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceAreaAggregate {
    /// The grouping label shared by the folded records.
    pub service_area: String,
    /// Summed counts for the area.
    pub stats: DropStats,
}

impl ServiceAreaAggregate {
    /// The area's derived drop rate.
    pub fn drop_rate(&self) -> f64 {
        self.stats.drop_rate()
    }
}

/// Lower and upper bound of a regulatory penalty, in INR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyRange {
    /// Smallest penalty the tier can attract.
    pub lower: u64,
    /// Largest penalty the tier can attract.
    pub upper: u64,
}

impl PenaltyRange {
    /// The empty range attached to compliant subjects.
    pub const ZERO: PenaltyRange = PenaltyRange::new(0, 0);

    /// Construct a range from its bounds.
    pub const fn new(lower: u64, upper: u64) -> Self {
        Self { lower, upper }
    }

    /// Midpoint of the range, used for penalty exposure estimates.
    pub fn midpoint(&self) -> u64 {
        (self.lower + self.upper) / 2
    }
}

/// One over-benchmark subject found by the evaluator.
///
/// Produced only for severities above `none` and never mutated after
/// creation; compliant subjects are counted in the summary instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViolationFinding {
    /// Which subject level the check ran at.
    pub scope: Scope,
    /// Customer id, service-area name, or `"overall"`.
    pub subject_id: String,
    /// The drop rate that triggered the finding.
    pub drop_rate: f64,
    /// Severity tier the rate classified into.
    pub severity: Severity,
    /// Penalty bounds for the tier, from the active schedule.
    pub penalty_range: PenaltyRange,
}

/// The constraint an ingested row violated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowConstraint {
    /// A required column holds no value for this row.
    MissingValue {
        /// The empty column.
        column: String,
    },
    /// A count cell does not parse as a non-negative integer.
    InvalidCount {
        /// The offending column.
        column: String,
        /// The raw cell text.
        value: String,
    },
    /// More calls dropped than were placed.
    DroppedExceedsTotal {
        /// Parsed dropped-call count.
        dropped_calls: u64,
        /// Parsed total-call count.
        total_calls: u64,
    },
}

impl fmt::Display for RowConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowConstraint::MissingValue { column } => {
                write!(f, "empty value for required column '{column}'")
            }
            RowConstraint::InvalidCount { column, value } => {
                write!(f, "column '{column}' value '{value}' is not a non-negative integer")
            }
            RowConstraint::DroppedExceedsTotal {
                dropped_calls,
                total_calls,
            } => {
                write!(f, "dropped_calls {dropped_calls} exceeds total_calls {total_calls}")
            }
        }
    }
}

/// A data-quality rejection for one input row.
///
/// Rejections do not abort the run: the row is skipped, counted, and
/// reported alongside the findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRejection {
    /// 1-based index of the data row (the header row is not counted).
    pub row: usize,
    /// The first constraint the row violated.
    pub constraint: RowConstraint,
}

impl fmt::Display for RowRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}", self.row, self.constraint)
    }
}

/// Violation counts broken down by severity tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    /// Findings classified `high`.
    #[serde(default)]
    pub high: u32,
    /// Findings classified `medium`.
    #[serde(default)]
    pub medium: u32,
    /// Findings classified `low`.
    #[serde(default)]
    pub low: u32,
}

impl TierCounts {
    /// Bump the counter for a violation tier. `Severity::None` is a no-op.
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
            Severity::None => {}
        }
    }

    /// Total findings across all tiers.
    pub fn total(&self) -> u32 {
        self.high + self.medium + self.low
    }

    /// TRAI compliance score on the 0–100 scale.
    ///
    /// Starts from 100 and deducts 40 per high, 20 per medium, and 10 per
    /// low finding, flooring at 0.
    pub fn compliance_score(&self) -> u32 {
        100u32.saturating_sub(self.high * 40 + self.medium * 20 + self.low * 10)
    }
}

/// Headline counts for a finished analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Non-empty data rows presented to ingestion.
    pub total_rows: usize,
    /// Rows that became [`CallRecord`]s.
    pub valid_records: usize,
    /// Rows rejected with a data-quality constraint.
    pub rejected_rows: usize,
    /// Violation counts per severity tier.
    pub violations: TierCounts,
    /// Subjects (overall, areas, customers) at or under the benchmark.
    pub compliant_subjects: u32,
    /// TRAI compliance score, 0–100.
    pub compliance_score: u32,
    /// Estimated penalty exposure in INR across all findings.
    pub estimated_penalty_inr: u64,
}

/// Shape-of-the-dataset statistics included for report context.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetProfile {
    /// Distinct customer ids among valid records.
    pub distinct_customers: usize,
    /// Distinct service areas among valid records.
    pub distinct_service_areas: usize,
    /// Valid records whose customer id appeared earlier in the dataset.
    pub duplicate_customer_ids: usize,
    /// Customers with at least one dropped call.
    pub customers_with_drops: usize,
    /// Summed total calls across valid records.
    pub total_calls: u64,
    /// Summed dropped calls across valid records.
    pub dropped_calls: u64,
}

/// When and how fast the report was produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// RFC 3339 UTC timestamp of report assembly.
    pub generated_at: String,
    /// Seconds spent reading and ingesting the dataset.
    pub load_time_seconds: f64,
    /// Seconds spent aggregating and evaluating.
    pub analysis_time_seconds: f64,
}

/// The complete output of one analysis run.
///
/// This is the only structure handed across the core boundary; rendering
/// and prompt assembly consume it without reaching back into the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// Findings ordered: overall first, then service areas by descending
    /// drop rate, then customers by descending drop rate.
    pub findings: Vec<ViolationFinding>,
    /// Headline counts.
    pub summary: ReportSummary,
    /// Dataset shape statistics.
    pub profile: DatasetProfile,
    /// Per-row data-quality rejections, in input order.
    pub rejections: Vec<RowRejection>,
    /// Generation timestamp and stage timings.
    pub metadata: ReportMetadata,
}

impl ComplianceReport {
    /// Returns `true` when no subject exceeded the benchmark.
    pub fn is_compliant(&self) -> bool {
        self.findings.is_empty()
    }

    /// Iterate the findings belonging to one scope, preserving report order.
    pub fn findings_for_scope(&self, scope: Scope) -> impl Iterator<Item = &ViolationFinding> {
        self.findings.iter().filter(move |f| f.scope == scope)
    }
}
