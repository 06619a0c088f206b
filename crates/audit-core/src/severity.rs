use crate::error::{AuditError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Compliance severity tiers for a call-drop-rate check.
///
/// Ordered from compliant to most severe, so tiers can be compared with the
/// usual operators (`Severity::High > Severity::Low`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Drop rate at or under the regulatory benchmark.
    None,
    /// Marginal exceedance of the benchmark.
    Low,
    /// Warning-level exceedance that needs active monitoring.
    Medium,
    /// Direct, severe violation.
    High,
}

impl FromStr for Severity {
    type Err = AuditError;

    /// Case-insensitive construction from a string slice.
    ///
    /// Accepts `"none"`, `"low"`, `"medium"`, and `"high"`. Returns
    /// [`AuditError::InvalidSeverity`] for unrecognised strings.
    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "none" => Ok(Severity::None),
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            other => Err(AuditError::InvalidSeverity(other.to_string())),
        }
    }
}

impl Severity {
    /// The canonical lowercase string identifier for this tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }

    /// Returns `true` for every tier above the benchmark.
    pub fn is_violation(&self) -> bool {
        *self != Severity::None
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Regulatory thresholds ──────────────────────────────────────────────────────

/// TRAI quality-of-service benchmark: the maximum permissible call drop rate.
///
/// A drop rate at or under this value is compliant.
pub const DROP_RATE_BENCHMARK: f64 = 0.02;

/// Drop rates above this floor are warning-level (`medium`) violations.
pub const MEDIUM_SEVERITY_FLOOR: f64 = 0.05;

/// Drop rates above this floor are severe (`high`) violations.
pub const HIGH_SEVERITY_FLOOR: f64 = 0.10;

/// Classify a drop rate into its severity tier.
///
/// Total and non-overlapping over all finite rates. Every boundary belongs
/// to the lower tier: exactly [`DROP_RATE_BENCHMARK`] is still compliant,
/// exactly [`MEDIUM_SEVERITY_FLOOR`] is `low`, and exactly
/// [`HIGH_SEVERITY_FLOOR`] is `medium`.
///
/// # Examples
///
/// ```
/// use audit_core::severity::{classify_drop_rate, Severity};
///
/// assert_eq!(classify_drop_rate(0.02), Severity::None);
/// assert_eq!(classify_drop_rate(0.03), Severity::Low);
/// assert_eq!(classify_drop_rate(0.294), Severity::High);
/// ```
pub fn classify_drop_rate(rate: f64) -> Severity {
    if rate > HIGH_SEVERITY_FLOOR {
        Severity::High
    } else if rate > MEDIUM_SEVERITY_FLOOR {
        Severity::Medium
    } else if rate > DROP_RATE_BENCHMARK {
        Severity::Low
    } else {
        Severity::None
    }
}
