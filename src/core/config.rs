//! Scoring configuration.
//!
//! Every threshold and penalty the engine applies lives in `ScoringParams`.
//! The defaults are the dashboard's display heuristics, not clinical cut-offs.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::utils::constants::*;

// ═══════════════════════════════════════════════════════════════════════════════
// SCORING PARAMETERS
// ═══════════════════════════════════════════════════════════════════════════════

/// Thresholds and penalty weights for the metrics engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    /// BMI below this is "Underweight"
    pub bmi_underweight_below: f64,

    /// BMI from this value is "Overweight"
    pub bmi_overweight_from: f64,

    /// BMI from this value is "High"
    pub bmi_high_from: f64,

    /// Score before penalties, also the upper clamp
    pub max_score: u8,

    /// BMI strictly above this costs `bmi_moderate_penalty`
    pub score_bmi_moderate_above: f64,

    /// BMI strictly above this costs `bmi_severe_penalty` instead
    pub score_bmi_severe_above: f64,

    /// Penalty for the moderate BMI band
    pub bmi_moderate_penalty: u32,

    /// Penalty for the severe BMI band
    pub bmi_severe_penalty: u32,

    /// Penalty per recorded condition
    pub condition_penalty: u32,

    /// Penalty per recorded symptom
    pub symptom_penalty: u32,

    /// Scores from this value are "Excellent"
    pub score_excellent_from: u8,

    /// Scores from this value (below excellent) are "Moderate"
    pub score_moderate_from: u8,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            bmi_underweight_below: BMI_UNDERWEIGHT_BELOW,
            bmi_overweight_from: BMI_OVERWEIGHT_FROM,
            bmi_high_from: BMI_HIGH_FROM,
            max_score: MAX_HEALTH_SCORE,
            score_bmi_moderate_above: SCORE_BMI_MODERATE_ABOVE,
            score_bmi_severe_above: SCORE_BMI_SEVERE_ABOVE,
            bmi_moderate_penalty: BMI_MODERATE_PENALTY,
            bmi_severe_penalty: BMI_SEVERE_PENALTY,
            condition_penalty: CONDITION_PENALTY,
            symptom_penalty: SYMPTOM_PENALTY,
            score_excellent_from: SCORE_EXCELLENT_FROM,
            score_moderate_from: SCORE_MODERATE_FROM,
        }
    }
}

impl ScoringParams {
    /// Override per-item penalties
    pub fn with_item_penalties(mut self, condition: u32, symptom: u32) -> Self {
        self.condition_penalty = condition;
        self.symptom_penalty = symptom;
        self
    }

    /// Override score bands
    pub fn with_score_bands(mut self, moderate_from: u8, excellent_from: u8) -> Self {
        self.score_moderate_from = moderate_from;
        self.score_excellent_from = excellent_from;
        self
    }

    /// Check the bands are ordered and finite
    pub fn validate(&self) -> Result<()> {
        let bmi_bounds = [
            self.bmi_underweight_below,
            self.bmi_overweight_from,
            self.bmi_high_from,
            self.score_bmi_moderate_above,
            self.score_bmi_severe_above,
        ];
        if bmi_bounds.iter().any(|b| !b.is_finite()) {
            return Err(Error::InvalidScoringParams("BMI thresholds must be finite".into()));
        }

        if !(self.bmi_underweight_below < self.bmi_overweight_from
            && self.bmi_overweight_from < self.bmi_high_from)
        {
            return Err(Error::InvalidScoringParams(format!(
                "BMI bands must increase: {} < {} < {}",
                self.bmi_underweight_below, self.bmi_overweight_from, self.bmi_high_from
            )));
        }

        if self.score_bmi_moderate_above > self.score_bmi_severe_above {
            return Err(Error::InvalidScoringParams(format!(
                "moderate BMI penalty threshold {} above severe threshold {}",
                self.score_bmi_moderate_above, self.score_bmi_severe_above
            )));
        }

        if !(self.score_moderate_from < self.score_excellent_from
            && self.score_excellent_from <= self.max_score)
        {
            return Err(Error::InvalidScoringParams(format!(
                "score bands must satisfy {} < {} <= {}",
                self.score_moderate_from, self.score_excellent_from, self.max_score
            )));
        }

        Ok(())
    }

    /// Load from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Storage(format!("Failed to read {}: {}", path.display(), e)))?;

        let params: Self = serde_json::from_str(&content)?;
        params.validate()?;
        Ok(params)
    }
}
