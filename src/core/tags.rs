//! Display tags and severity classes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::constants::NOT_AVAILABLE;

// ═══════════════════════════════════════════════════════════════════════════════
// METRIC TAG
// ═══════════════════════════════════════════════════════════════════════════════

/// Categorical label derived from a metric via threshold bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricTag {
    /// BMI below the normal band
    Underweight,
    /// BMI in the normal band
    Normal,
    /// BMI in the overweight band
    Overweight,
    /// BMI at or above the high threshold
    High,
    /// Health score in the top band
    Excellent,
    /// Health score in the middle band
    Moderate,
    /// Health score in the bottom band
    #[serde(rename = "Needs Attention")]
    NeedsAttention,
    /// Elevated reading (blood pressure card)
    Elevated,
    /// Metric could not be derived
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl MetricTag {
    /// Get display label
    pub fn label(&self) -> &'static str {
        match self {
            MetricTag::Underweight => "Underweight",
            MetricTag::Normal => "Normal",
            MetricTag::Overweight => "Overweight",
            MetricTag::High => "High",
            MetricTag::Excellent => "Excellent",
            MetricTag::Moderate => "Moderate",
            MetricTag::NeedsAttention => "Needs Attention",
            MetricTag::Elevated => "Elevated",
            MetricTag::NotAvailable => NOT_AVAILABLE,
        }
    }

    /// Severity class used for styling
    pub fn severity(&self) -> SeverityClass {
        SeverityClass::for_label(self.label())
    }
}

impl fmt::Display for MetricTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SEVERITY CLASS
// ═══════════════════════════════════════════════════════════════════════════════

/// UI-facing bucket derived from a tag. Only used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityClass {
    /// Positive reading
    Good,
    /// Worth watching
    Warn,
    /// Needs attention
    Bad,
    /// No styling signal
    Neutral,
}

impl SeverityClass {
    /// Map any tag label to its class. Unknown labels are neutral.
    pub fn for_label(label: &str) -> Self {
        match label {
            "Excellent" | "Normal" => SeverityClass::Good,
            "Moderate" | "Elevated" => SeverityClass::Warn,
            "High" | "Needs Attention" => SeverityClass::Bad,
            _ => SeverityClass::Neutral,
        }
    }

    /// Get lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityClass::Good => "good",
            SeverityClass::Warn => "warn",
            SeverityClass::Bad => "bad",
            SeverityClass::Neutral => "neutral",
        }
    }
}

impl fmt::Display for SeverityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
