//! Health metrics engine.
//!
//! Turns a health profile snapshot into BMI, age, a bounded health score and
//! the display tags for each. Every operation is a pure, total function of its
//! inputs: missing data resolves to `None` / "N/A", nothing is cached, and the
//! profile is never modified.
//!
//! The health score is a heuristic display metric derived additively from BMI
//! and the number of recorded conditions and symptoms. It is not a clinical
//! measure and must not be presented as medical advice.

use chrono::{Datelike, NaiveDate};

use crate::core::config::ScoringParams;
use crate::core::profile::HealthProfile;
use crate::core::report::{MetricReading, MetricsReport};
use crate::core::tags::{MetricTag, SeverityClass};
use crate::error::Result;
use crate::utils::constants::{BMI_DECIMALS, CM_PER_METER};
use crate::utils::math::{apply_penalties, count_penalty, round_half_away};

// ═══════════════════════════════════════════════════════════════════════════════
// STATELESS METRICS
// ═══════════════════════════════════════════════════════════════════════════════

/// Body mass index from height (cm) and weight (kg), rounded to one decimal.
///
/// Returns `None` when either measurement is missing, zero, negative or not a
/// finite number, and when the result rounds to `0.0`. Plausibility is not
/// checked; see `utils::validation` for the boundary checks.
///
/// ```
/// use novacare::core::engine::compute_bmi;
///
/// assert_eq!(compute_bmi(Some(180.0), Some(81.0)), Some(25.0));
/// assert_eq!(compute_bmi(None, Some(81.0)), None);
/// ```
pub fn compute_bmi(height_cm: Option<f64>, weight_kg: Option<f64>) -> Option<f64> {
    let height = height_cm.filter(|h| h.is_finite() && *h > 0.0)?;
    let weight = weight_kg.filter(|w| w.is_finite() && *w > 0.0)?;

    let height_m = height / CM_PER_METER;
    let bmi = weight / (height_m * height_m);

    Some(round_half_away(bmi, BMI_DECIMALS)).filter(|b| b.is_finite() && *b > 0.0)
}

/// Calendar age in whole years on `today`.
///
/// One year is subtracted when this year's birthday (month and day) has not
/// been reached yet. A Feb 29 birthday is reached on Mar 1 in common years.
/// A date of birth after `today` yields a negative age; the engine does not
/// reject it.
pub fn compute_age(dob: Option<NaiveDate>, today: NaiveDate) -> Option<i32> {
    let dob = dob?;
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    Some(age)
}

/// Severity class for any tag label
pub fn tag_severity_class(label: &str) -> SeverityClass {
    SeverityClass::for_label(label)
}

// ═══════════════════════════════════════════════════════════════════════════════
// METRICS ENGINE
// ═══════════════════════════════════════════════════════════════════════════════

/// Scores and classifies profiles under a fixed set of `ScoringParams`
#[derive(Debug, Clone, Default)]
pub struct MetricsEngine {
    params: ScoringParams,
}

impl MetricsEngine {
    /// Create an engine without checking the parameters
    pub fn new(params: ScoringParams) -> Self {
        Self { params }
    }

    /// Create an engine, rejecting inconsistent parameters
    pub fn with_params(params: ScoringParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Active parameters
    pub fn params(&self) -> &ScoringParams {
        &self.params
    }

    /// See [`compute_bmi`]
    pub fn compute_bmi(&self, height_cm: Option<f64>, weight_kg: Option<f64>) -> Option<f64> {
        compute_bmi(height_cm, weight_kg)
    }

    /// See [`compute_age`]
    pub fn compute_age(&self, dob: Option<NaiveDate>, today: NaiveDate) -> Option<i32> {
        compute_age(dob, today)
    }

    /// Heuristic health score in `[0, max_score]`.
    ///
    /// `None` when there is no profile or its BMI cannot be computed.
    /// Otherwise starts at `max_score` and subtracts, independently:
    /// the BMI band penalty, `condition_penalty` per recorded condition and
    /// `symptom_penalty` per recorded symptom, then clamps.
    pub fn compute_health_score(&self, profile: Option<&HealthProfile>) -> Option<u8> {
        let profile = profile?;
        let bmi = compute_bmi(profile.height, profile.weight)?;

        let penalties = [
            u64::from(self.bmi_penalty(bmi)),
            count_penalty(profile.medical_history.len(), self.params.condition_penalty),
            count_penalty(profile.symptoms.len(), self.params.symptom_penalty),
        ];

        Some(apply_penalties(self.params.max_score, &penalties, self.params.max_score))
    }

    fn bmi_penalty(&self, bmi: f64) -> u32 {
        if bmi > self.params.score_bmi_severe_above {
            self.params.bmi_severe_penalty
        } else if bmi > self.params.score_bmi_moderate_above {
            self.params.bmi_moderate_penalty
        } else {
            0
        }
    }

    /// BMI band. Each threshold belongs to the higher band.
    pub fn classify_bmi(&self, bmi: Option<f64>) -> MetricTag {
        match bmi {
            None => MetricTag::NotAvailable,
            Some(b) if b.is_nan() => MetricTag::NotAvailable,
            Some(b) if b < self.params.bmi_underweight_below => MetricTag::Underweight,
            Some(b) if b < self.params.bmi_overweight_from => MetricTag::Normal,
            Some(b) if b < self.params.bmi_high_from => MetricTag::Overweight,
            Some(_) => MetricTag::High,
        }
    }

    /// Score band. A score of 0 is a real score, not "N/A".
    pub fn classify_health_score(&self, score: Option<u8>) -> MetricTag {
        match score {
            None => MetricTag::NotAvailable,
            Some(s) if s >= self.params.score_excellent_from => MetricTag::Excellent,
            Some(s) if s >= self.params.score_moderate_from => MetricTag::Moderate,
            Some(_) => MetricTag::NeedsAttention,
        }
    }

    /// Compute every dashboard metric for one profile snapshot.
    ///
    /// An absent profile yields a report where every reading is "N/A" and
    /// neutral, with `profile_found` false.
    pub fn evaluate(&self, profile: Option<&HealthProfile>, today: NaiveDate) -> MetricsReport {
        let bmi = profile.and_then(|p| compute_bmi(p.height, p.weight));
        let score = self.compute_health_score(profile);
        let age = profile.and_then(|p| compute_age(p.dob, today));

        let report = MetricsReport {
            user_id: profile.map(|p| p.user_id.clone()),
            profile_found: profile.is_some(),
            health_score: MetricReading::new(score, self.classify_health_score(score)),
            bmi: MetricReading::new(bmi, self.classify_bmi(bmi)),
            age,
            computed_on: today,
        };

        tracing::debug!(
            profile_found = report.profile_found,
            score = ?score,
            bmi = ?bmi,
            age = ?age,
            "Computed metrics report"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn profile_with_bmi(height: f64, weight: f64, history: usize, symptoms: usize) -> HealthProfile {
        HealthProfile::new("u-1")
            .with_measurements(height, weight)
            .with_history((0..history).map(|i| format!("condition-{}", i)))
            .with_symptoms((0..symptoms).map(|i| format!("symptom-{}", i)))
    }

    #[test]
    fn test_compute_bmi() {
        assert_eq!(compute_bmi(Some(180.0), Some(81.0)), Some(25.0));
        assert_eq!(compute_bmi(Some(175.0), Some(70.0)), Some(22.9));
        assert_eq!(compute_bmi(Some(160.0), Some(90.0)), Some(35.2));
    }

    #[test]
    fn test_compute_bmi_missing_or_non_positive() {
        assert_eq!(compute_bmi(None, Some(70.0)), None);
        assert_eq!(compute_bmi(Some(170.0), None), None);
        assert_eq!(compute_bmi(Some(0.0), Some(70.0)), None);
        assert_eq!(compute_bmi(Some(170.0), Some(0.0)), None);
        assert_eq!(compute_bmi(Some(-170.0), Some(70.0)), None);
        assert_eq!(compute_bmi(Some(170.0), Some(-70.0)), None);
        assert_eq!(compute_bmi(Some(f64::NAN), Some(70.0)), None);
    }

    #[test]
    fn test_bmi_rounding_to_zero_is_absent() {
        let engine = MetricsEngine::default();
        let giant = HealthProfile::new("u-1").with_measurements(1000.0, 1.0);

        assert_eq!(compute_bmi(Some(1000.0), Some(1.0)), None);
        assert_eq!(engine.compute_health_score(Some(&giant)), None);

        let report = engine.evaluate(Some(&giant), date(2024, 1, 1));
        assert_eq!(report.bmi.display_value(), "N/A");
        assert_eq!(report.health_score.tag, MetricTag::NotAvailable);
    }

    #[test]
    fn test_compute_age_birthday_boundary() {
        let dob = Some(date(1990, 6, 15));
        assert_eq!(compute_age(dob, date(2024, 6, 14)), Some(33));
        assert_eq!(compute_age(dob, date(2024, 6, 15)), Some(34));
        assert_eq!(compute_age(dob, date(2024, 6, 16)), Some(34));
        assert_eq!(compute_age(dob, date(2024, 5, 30)), Some(33));
        assert_eq!(compute_age(dob, date(2024, 7, 1)), Some(34));
    }

    #[test]
    fn test_compute_age_leap_day() {
        let dob = Some(date(2000, 2, 29));
        assert_eq!(compute_age(dob, date(2023, 2, 28)), Some(22));
        assert_eq!(compute_age(dob, date(2023, 3, 1)), Some(23));
        assert_eq!(compute_age(dob, date(2024, 2, 29)), Some(24));
    }

    #[test]
    fn test_compute_age_absent_and_future() {
        assert_eq!(compute_age(None, date(2024, 1, 1)), None);
        assert_eq!(compute_age(Some(date(2024, 1, 1)), date(2024, 1, 1)), Some(0));
        assert_eq!(compute_age(Some(date(2026, 1, 1)), date(2024, 6, 1)), Some(-2));
    }

    #[test]
    fn test_health_score_penalties() {
        let engine = MetricsEngine::default();

        // BMI 22.9, nothing recorded
        assert_eq!(engine.compute_health_score(Some(&profile_with_bmi(175.0, 70.0, 0, 0))), Some(100));
        // BMI 25.0 is not above 25
        assert_eq!(engine.compute_health_score(Some(&profile_with_bmi(180.0, 81.0, 0, 0))), Some(100));
        // BMI 27.8
        assert_eq!(engine.compute_health_score(Some(&profile_with_bmi(170.0, 80.4, 0, 0))), Some(90));
        // BMI 35.2, 2 conditions, 1 symptom
        assert_eq!(engine.compute_health_score(Some(&profile_with_bmi(160.0, 90.0, 2, 1))), Some(67));
    }

    #[test]
    fn test_health_score_clamps_at_zero() {
        let engine = MetricsEngine::default();
        assert_eq!(engine.compute_health_score(Some(&profile_with_bmi(160.0, 90.0, 10, 5))), Some(15));
        assert_eq!(engine.compute_health_score(Some(&profile_with_bmi(160.0, 90.0, 20, 5))), Some(0));
    }

    #[test]
    fn test_health_score_absent() {
        let engine = MetricsEngine::default();
        assert_eq!(engine.compute_health_score(None), None);

        let no_weight = HealthProfile::new("u-1").with_history(["Asthma"]);
        assert_eq!(engine.compute_health_score(Some(&no_weight)), None);
    }

    #[test]
    fn test_health_score_custom_params() {
        let engine = MetricsEngine::new(ScoringParams::default().with_item_penalties(10, 0));
        let profile = profile_with_bmi(175.0, 70.0, 3, 4);
        assert_eq!(engine.compute_health_score(Some(&profile)), Some(70));
    }

    #[test]
    fn test_classify_bmi_boundaries() {
        let engine = MetricsEngine::default();
        assert_eq!(engine.classify_bmi(None), MetricTag::NotAvailable);
        assert_eq!(engine.classify_bmi(Some(18.4)), MetricTag::Underweight);
        assert_eq!(engine.classify_bmi(Some(18.5)), MetricTag::Normal);
        assert_eq!(engine.classify_bmi(Some(24.999)), MetricTag::Normal);
        assert_eq!(engine.classify_bmi(Some(25.0)), MetricTag::Overweight);
        assert_eq!(engine.classify_bmi(Some(29.9)), MetricTag::Overweight);
        assert_eq!(engine.classify_bmi(Some(30.0)), MetricTag::High);
    }

    #[test]
    fn test_classify_health_score_boundaries() {
        let engine = MetricsEngine::default();
        assert_eq!(engine.classify_health_score(None), MetricTag::NotAvailable);
        assert_eq!(engine.classify_health_score(Some(100)), MetricTag::Excellent);
        assert_eq!(engine.classify_health_score(Some(80)), MetricTag::Excellent);
        assert_eq!(engine.classify_health_score(Some(79)), MetricTag::Moderate);
        assert_eq!(engine.classify_health_score(Some(60)), MetricTag::Moderate);
        assert_eq!(engine.classify_health_score(Some(59)), MetricTag::NeedsAttention);
        assert_eq!(engine.classify_health_score(Some(0)), MetricTag::NeedsAttention);
    }

    #[test]
    fn test_tag_severity_class() {
        assert_eq!(tag_severity_class("Excellent"), SeverityClass::Good);
        assert_eq!(tag_severity_class("Elevated"), SeverityClass::Warn);
        assert_eq!(tag_severity_class("Needs Attention"), SeverityClass::Bad);
        assert_eq!(tag_severity_class("N/A"), SeverityClass::Neutral);
    }

    #[test]
    fn test_evaluate_absent_profile() {
        let report = MetricsEngine::default().evaluate(None, date(2024, 1, 1));
        assert!(!report.profile_found);
        assert_eq!(report.health_score.display_value(), "N/A");
        assert_eq!(report.health_score.tag, MetricTag::NotAvailable);
        assert_eq!(report.health_score.severity, SeverityClass::Neutral);
        assert_eq!(report.bmi.display_value(), "N/A");
        assert_eq!(report.bmi.severity, SeverityClass::Neutral);
        assert_eq!(report.age, None);
    }

    #[test]
    fn test_evaluate_does_not_mutate_profile() {
        let profile = profile_with_bmi(180.0, 81.0, 1, 1).with_dob(date(1990, 1, 1));
        let before = profile.clone();
        let engine = MetricsEngine::default();

        let first = engine.evaluate(Some(&profile), date(2024, 1, 1));
        let second = engine.evaluate(Some(&profile), date(2024, 1, 1));

        assert_eq!(profile, before);
        assert_eq!(first, second);
        assert_eq!(first.health_score.value, Some(92));
        assert_eq!(first.bmi.tag, MetricTag::Overweight);
        assert_eq!(first.age, Some(34));
    }
}
