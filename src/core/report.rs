//! Engine output types consumed by the view layer.
//!
//! Reports are computed per call and never stored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::engine::MetricsEngine;
use crate::core::profile::{HealthProfile, UserId};
use crate::core::tags::{MetricTag, SeverityClass};
use crate::utils::constants::{BMI_DECIMALS, NOT_AVAILABLE};
use crate::utils::math::format_fixed;

/// Shown when no conditions are recorded
pub const NO_HISTORY_MESSAGE: &str = "No medical history recorded";

/// Shown when no symptoms are recorded
pub const NO_SYMPTOMS_MESSAGE: &str = "No current symptoms recorded";

/// Shown when no non-blank medications are recorded
pub const NO_MEDICATIONS_MESSAGE: &str = "No medications recorded";

// ═══════════════════════════════════════════════════════════════════════════════
// METRIC VALUES
// ═══════════════════════════════════════════════════════════════════════════════

/// How a metric value is rendered for display
pub trait MetricValue {
    /// Display text for a present value
    fn render(&self) -> String;
}

impl MetricValue for f64 {
    fn render(&self) -> String {
        format_fixed(*self, BMI_DECIMALS)
    }
}

impl MetricValue for u8 {
    fn render(&self) -> String {
        self.to_string()
    }
}

impl MetricValue for i32 {
    fn render(&self) -> String {
        self.to_string()
    }
}

/// The `(value, tag, severity)` triple for one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricReading<T> {
    /// Derived value, `None` when it cannot be computed
    pub value: Option<T>,
    /// Band label
    pub tag: MetricTag,
    /// Styling bucket for the tag
    pub severity: SeverityClass,
}

impl<T: MetricValue> MetricReading<T> {
    /// Build a reading; severity follows the tag
    pub fn new(value: Option<T>, tag: MetricTag) -> Self {
        Self {
            value,
            tag,
            severity: tag.severity(),
        }
    }

    /// Value text, or "N/A"
    pub fn display_value(&self) -> String {
        self.value
            .as_ref()
            .map(MetricValue::render)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// METRICS REPORT
// ═══════════════════════════════════════════════════════════════════════════════

/// Dashboard metrics for one profile snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    /// Profile owner, when a profile was supplied
    pub user_id: Option<UserId>,
    /// False when no profile exists for the user
    pub profile_found: bool,
    /// Heuristic health score
    pub health_score: MetricReading<u8>,
    /// Body mass index
    pub bmi: MetricReading<f64>,
    /// Age in whole years
    pub age: Option<i32>,
    /// Reference date used for the age
    pub computed_on: NaiveDate,
}

impl MetricsReport {
    /// True when the user should be sent to profile setup
    pub fn needs_profile_setup(&self) -> bool {
        !self.profile_found
    }

    /// Age text, or "N/A"
    pub fn age_display(&self) -> String {
        self.age
            .map(|a| a.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PROFILE SUMMARY
// ═══════════════════════════════════════════════════════════════════════════════

/// Display-ready view of a stored profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    /// Profile owner
    pub user_id: UserId,
    /// Height, e.g. "180 cm"
    pub height: String,
    /// Weight, e.g. "81 kg"
    pub weight: String,
    /// Age, e.g. "34 years"
    pub age: String,
    /// Date of birth as M/D/YYYY
    pub date_of_birth: String,
    /// Gender
    pub gender: String,
    /// Body mass index with one decimal
    pub bmi: String,
    /// Blood group
    pub blood_group: String,
    /// Genotype
    pub genotype: String,
    /// Recorded conditions
    pub medical_history: Vec<String>,
    /// Current symptoms
    pub symptoms: Vec<String>,
    /// Current medications, blanks removed
    pub medications: Vec<String>,
    /// Whether a profile picture is set
    pub has_profile_picture: bool,
}

impl ProfileSummary {
    /// Build the summary shown on the health profile page
    pub fn from_profile(profile: &HealthProfile, engine: &MetricsEngine, today: NaiveDate) -> Self {
        let bmi = engine.compute_bmi(profile.height, profile.weight);
        let age = engine.compute_age(profile.dob, today);

        Self {
            user_id: profile.user_id.clone(),
            height: with_unit(profile.height, "cm"),
            weight: with_unit(profile.weight, "kg"),
            age: age
                .map(|a| format!("{} years", a))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            date_of_birth: profile
                .dob
                .map(|d| d.format("%-m/%-d/%Y").to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            gender: text_or_na(profile.gender.as_deref()),
            bmi: bmi
                .map(|b| b.render())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            blood_group: text_or_na(profile.blood_group.as_deref()),
            genotype: text_or_na(profile.genotype.as_deref()),
            medical_history: profile.medical_history.clone(),
            symptoms: profile.symptoms.clone(),
            medications: profile
                .display_medications()
                .into_iter()
                .map(str::to_string)
                .collect(),
            has_profile_picture: profile
                .profile_picture
                .as_deref()
                .map_or(false, |p| !p.trim().is_empty()),
        }
    }

    /// Conditions, or the empty-section message
    pub fn history_lines(&self) -> Vec<String> {
        lines_or(&self.medical_history, NO_HISTORY_MESSAGE)
    }

    /// Symptoms, or the empty-section message
    pub fn symptom_lines(&self) -> Vec<String> {
        lines_or(&self.symptoms, NO_SYMPTOMS_MESSAGE)
    }

    /// Medications, or the empty-section message
    pub fn medication_lines(&self) -> Vec<String> {
        lines_or(&self.medications, NO_MEDICATIONS_MESSAGE)
    }
}

fn with_unit(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) if v != 0.0 && !v.is_nan() => format!("{} {}", v, unit),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn text_or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn lines_or(items: &[String], fallback: &str) -> Vec<String> {
    if items.is_empty() {
        vec![fallback.to_string()]
    } else {
        items.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    #[test]
    fn test_reading_display() {
        let bmi = MetricReading::new(Some(25.0), MetricTag::Overweight);
        assert_eq!(bmi.display_value(), "25.0");
        assert_eq!(bmi.severity, SeverityClass::Neutral);

        let score = MetricReading::new(Some(0u8), MetricTag::NeedsAttention);
        assert_eq!(score.display_value(), "0");
        assert_eq!(score.severity, SeverityClass::Bad);

        let missing: MetricReading<u8> = MetricReading::new(None, MetricTag::NotAvailable);
        assert_eq!(missing.display_value(), "N/A");
    }

    #[test]
    fn test_summary_full_profile() {
        let mut profile = HealthProfile::new("u-1")
            .with_measurements(180.0, 81.0)
            .with_dob(NaiveDate::from_ymd_opt(1990, 5, 7).unwrap())
            .with_history(["Asthma", "Hypertension"])
            .with_medications(["Ventolin", "", "   ", "Lisinopril"]);
        profile.gender = Some("Female".into());
        profile.blood_group = Some("O+".into());
        profile.profile_picture = Some("data:image/png;base64,AAAA".into());

        let summary = ProfileSummary::from_profile(&profile, &MetricsEngine::default(), today());

        assert_eq!(summary.height, "180 cm");
        assert_eq!(summary.weight, "81 kg");
        assert_eq!(summary.age, "33 years");
        assert_eq!(summary.date_of_birth, "5/7/1990");
        assert_eq!(summary.gender, "Female");
        assert_eq!(summary.bmi, "25.0");
        assert_eq!(summary.blood_group, "O+");
        assert_eq!(summary.genotype, "N/A");
        assert_eq!(summary.medications, vec!["Ventolin", "Lisinopril"]);
        assert!(summary.has_profile_picture);
        assert_eq!(summary.symptom_lines(), vec![NO_SYMPTOMS_MESSAGE]);
        assert_eq!(summary.history_lines().len(), 2);
    }

    #[test]
    fn test_summary_empty_profile() {
        let mut profile = HealthProfile::new("u-2").with_medications(["", " "]);
        profile.gender = Some(String::new());

        let summary = ProfileSummary::from_profile(&profile, &MetricsEngine::default(), today());

        assert_eq!(summary.height, "N/A");
        assert_eq!(summary.age, "N/A");
        assert_eq!(summary.date_of_birth, "N/A");
        assert_eq!(summary.gender, "N/A");
        assert_eq!(summary.bmi, "N/A");
        assert!(!summary.has_profile_picture);
        assert_eq!(summary.history_lines(), vec![NO_HISTORY_MESSAGE]);
        assert_eq!(summary.medication_lines(), vec![NO_MEDICATIONS_MESSAGE]);
    }
}
