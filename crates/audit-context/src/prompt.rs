//! Prompt assembly for the narrative-summary model.
//!
//! The prompts are plain strings: the hosted-model client that consumes
//! them lives outside this crate.

use std::fmt::Write as _;

use audit_core::formatting::{format_inr, format_rate};
use audit_core::models::{ComplianceReport, Scope, ViolationFinding};

/// Findings quoted in the compliance prompt; the rest stay in the report.
const MAX_PROMPT_FINDINGS: usize = 3;

/// Default character budget the summary prompt asks the model to honour.
pub const DEFAULT_MAX_SUMMARY_CHARS: usize = 8_000;

/// Build the analysis prompt for a finished compliance report.
///
/// Holds the model to a strict word budget and a fixed response structure.
/// Only the top findings are quoted; the report already orders them most
/// significant first.
pub fn build_compliance_prompt(report: &ComplianceReport) -> String {
    let mut bullets = String::new();
    if report.is_compliant() {
        bullets.push_str("• No drop-rate violations above the 2% benchmark");
    } else {
        for (i, finding) in report.findings.iter().take(MAX_PROMPT_FINDINGS).enumerate() {
            if i > 0 {
                bullets.push('\n');
            }
            bullets.push_str(&finding_bullet(finding));
        }
    }

    format!(
        "STRICT LIMIT: Respond in EXACTLY 150 words or less. No more.\n\
         \n\
         TRAI Violations Found:\n\
         {bullets}\n\
         \n\
         FORMAT (use exactly this structure):\n\
         **Penalties**: [List max 3 violations with INR amounts]\n\
         **Legal Basis**: [1 sentence - TRAI regulation reference]\n\
         **Actions**: [3 bullet points max 5 words each]\n\
         **Risk**: [1 sentence assessment]\n\
         \n\
         STOP at 150 words. Do not exceed this limit under any circumstances."
    )
}

/// Build the summarisation prompt for a document too long to send whole.
///
/// The quoted document is cut to three times the requested summary budget.
pub fn build_summary_prompt(text: &str, max_summary_chars: usize) -> String {
    let quoted: String = text.chars().take(max_summary_chars * 3).collect();

    format!(
        "Please provide a comprehensive but concise summary of the following document.\n\
         Focus on key legal points, important clauses, obligations, rights, and any \
         compliance-related information.\n\
         Keep the summary under {max_summary_chars} characters while retaining all \
         critical information.\n\
         \n\
         Document:\n\
         {quoted}\n\
         \n\
         Summary:"
    )
}

fn finding_bullet(finding: &ViolationFinding) -> String {
    let mut bullet = String::from("• ");
    match finding.scope {
        Scope::Overall => bullet.push_str("Overall dataset"),
        Scope::ServiceArea => {
            let _ = write!(bullet, "Service area {}", finding.subject_id);
        }
        Scope::Customer => {
            let _ = write!(bullet, "Customer {}", finding.subject_id);
        }
    }
    let _ = write!(
        bullet,
        ": drop rate {} against the 2% benchmark ({} severity, penalty {} - {})",
        format_rate(finding.drop_rate, 2),
        finding.severity,
        format_inr(finding.penalty_range.lower),
        format_inr(finding.penalty_range.upper),
    );
    bullet
}

// ── Tests ─────────────────────────────────────────────────────────────────────
