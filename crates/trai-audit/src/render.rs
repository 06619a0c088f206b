//! Plain-text rendering of a [`ComplianceReport`] for terminal output.

use audit_core::formatting::{format_count, format_inr, format_rate, percentage};
use audit_core::models::ComplianceReport;

/// Rejected rows listed individually before the report falls back to a count.
const MAX_LISTED_REJECTIONS: usize = 10;

/// Render the report as the default human-readable text format.
pub fn render_report(report: &ComplianceReport) -> String {
    let mut out = String::new();

    out.push_str("TRAI Call-Drop Compliance Report\n");
    out.push_str(&format!("Generated: {}\n\n", report.metadata.generated_at));

    render_dataset(report, &mut out);
    render_findings(report, &mut out);
    render_rejections(report, &mut out);
    render_summary(report, &mut out);

    out.trim_end().to_string()
}

fn render_dataset(report: &ComplianceReport, out: &mut String) {
    let profile = &report.profile;
    let summary = &report.summary;

    let dropped_pct = percentage(
        profile.dropped_calls as f64,
        profile.total_calls as f64,
        2,
    );

    out.push_str("Dataset\n");
    out.push_str(&format!(
        "  Rows processed:     {} ({} valid, {} rejected)\n",
        format_count(summary.total_rows as u64),
        format_count(summary.valid_records as u64),
        format_count(summary.rejected_rows as u64),
    ));
    out.push_str(&format!(
        "  Customers:          {} distinct, {} with dropped calls, {} duplicate ids\n",
        format_count(profile.distinct_customers as u64),
        format_count(profile.customers_with_drops as u64),
        format_count(profile.duplicate_customer_ids as u64),
    ));
    out.push_str(&format!(
        "  Service areas:      {}\n",
        format_count(profile.distinct_service_areas as u64),
    ));
    out.push_str(&format!(
        "  Call volume:        {} total, {} dropped ({dropped_pct:.2}%)\n\n",
        format_count(profile.total_calls),
        format_count(profile.dropped_calls),
    ));
}

fn render_findings(report: &ComplianceReport, out: &mut String) {
    if report.is_compliant() {
        out.push_str("Findings\n");
        out.push_str("  No subjects above the 2% drop-rate benchmark.\n\n");
        return;
    }

    out.push_str(&format!("Findings ({})\n", report.findings.len()));
    for finding in &report.findings {
        out.push_str(&format!(
            "  {:<7} {:<13} {:<24} {:>8}  {} - {}\n",
            finding.severity.as_str().to_uppercase(),
            finding.scope,
            finding.subject_id,
            format_rate(finding.drop_rate, 2),
            format_inr(finding.penalty_range.lower),
            format_inr(finding.penalty_range.upper),
        ));
    }
    out.push('\n');
}

fn render_rejections(report: &ComplianceReport, out: &mut String) {
    if report.rejections.is_empty() {
        return;
    }

    out.push_str(&format!("Rejected rows ({})\n", report.rejections.len()));
    for rejection in report.rejections.iter().take(MAX_LISTED_REJECTIONS) {
        out.push_str(&format!("  {rejection}\n"));
    }
    let hidden = report.rejections.len().saturating_sub(MAX_LISTED_REJECTIONS);
    if hidden > 0 {
        out.push_str(&format!("  ... and {hidden} more\n"));
    }
    out.push('\n');
}

fn render_summary(report: &ComplianceReport, out: &mut String) {
    let summary = &report.summary;

    out.push_str("Summary\n");
    out.push_str(&format!(
        "  Compliance score:   {}/100\n",
        summary.compliance_score
    ));
    out.push_str(&format!(
        "  Compliant subjects: {}\n",
        format_count(u64::from(summary.compliant_subjects)),
    ));
    out.push_str(&format!(
        "  Violations:         {} high, {} medium, {} low\n",
        summary.violations.high, summary.violations.medium, summary.violations.low,
    ));
    out.push_str(&format!(
        "  Estimated penalty:  {}\n",
        format_inr(summary.estimated_penalty_inr)
    ));
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use audit_core::models::{
        DatasetProfile, PenaltyRange, ReportMetadata, ReportSummary, RowConstraint, RowRejection,
        Scope, TierCounts, ViolationFinding,
    };
    use audit_core::severity::Severity;

    fn make_finding(scope: Scope, subject: &str, rate: f64, severity: Severity) -> ViolationFinding {
        ViolationFinding {
            scope,
            subject_id: subject.to_string(),
            drop_rate: rate,
            severity,
            penalty_range: PenaltyRange::new(100_000, 1_000_000),
        }
    }

    fn make_report(findings: Vec<ViolationFinding>, rejections: Vec<RowRejection>) -> ComplianceReport {
        let mut violations = TierCounts::default();
        for finding in &findings {
            violations.record(finding.severity);
        }
        ComplianceReport {
            summary: ReportSummary {
                total_rows: rejections.len() + 3,
                valid_records: 3,
                rejected_rows: rejections.len(),
                violations,
                compliant_subjects: 3,
                compliance_score: violations.compliance_score(),
                estimated_penalty_inr: u64::from(violations.total()) * 550_000,
            },
            findings,
            profile: DatasetProfile {
                distinct_customers: 2,
                distinct_service_areas: 2,
                duplicate_customer_ids: 0,
                customers_with_drops: 2,
                total_calls: 1_017,
                dropped_calls: 15,
            },
            rejections,
            metadata: ReportMetadata {
                generated_at: "2024-01-15T10:00:00+00:00".to_string(),
                load_time_seconds: 0.01,
                analysis_time_seconds: 0.002,
            },
        }
    }

    fn make_rejection(row: usize) -> RowRejection {
        RowRejection {
            row,
            constraint: RowConstraint::DroppedExceedsTotal {
                dropped_calls: 20,
                total_calls: 17,
            },
        }
    }

    // ── render_report ─────────────────────────────────────────────────────────

    #[test]
    fn test_render_full_report() {
        let report = make_report(
            vec![
                make_finding(Scope::ServiceArea, "North East", 5.0 / 17.0, Severity::High),
                make_finding(Scope::Customer, "CUST-1", 5.0 / 17.0, Severity::High),
            ],
            vec![make_rejection(3)],
        );

        let text = render_report(&report);

        assert!(text.starts_with("TRAI Call-Drop Compliance Report"));
        assert!(text.contains("Generated: 2024-01-15T10:00:00+00:00"));
        assert!(text.contains("(3 valid, 1 rejected)"));
        assert!(text.contains("1,017 total, 15 dropped (1.47%)"));
        assert!(text.contains("Findings (2)"));
        assert!(text.contains("HIGH"));
        assert!(text.contains("North East"));
        assert!(text.contains("29.41%"));
        assert!(text.contains("₹1,00,000 - ₹10,00,000"));
        assert!(text.contains("row 3: dropped_calls 20 exceeds total_calls 17"));
        assert!(text.contains("Compliance score:   20/100"));
        assert!(text.contains("2 high, 0 medium, 0 low"));
        assert!(text.contains("Estimated penalty:  ₹11,00,000"));
    }

    #[test]
    fn test_render_compliant_report() {
        let text = render_report(&make_report(vec![], vec![]));

        assert!(text.contains("No subjects above the 2% drop-rate benchmark."));
        assert!(text.contains("Compliance score:   100/100"));
        assert!(text.contains("Estimated penalty:  ₹0"));
        assert!(!text.contains("Rejected rows"));
    }

    #[test]
    fn test_render_caps_listed_rejections() {
        let rejections: Vec<RowRejection> = (1..=12).map(make_rejection).collect();
        let text = render_report(&make_report(vec![], rejections));

        assert!(text.contains("Rejected rows (12)"));
        assert!(text.contains("row 10:"));
        assert!(!text.contains("row 11:"));
        assert!(text.contains("... and 2 more"));
    }

    #[test]
    fn test_render_zero_volume_dataset() {
        let mut report = make_report(vec![], vec![]);
        report.profile.total_calls = 0;
        report.profile.dropped_calls = 0;

        let text = render_report(&report);
        assert!(text.contains("0 total, 0 dropped (0.00%)"));
    }
}
