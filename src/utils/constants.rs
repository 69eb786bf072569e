//! Scoring constants and display sentinels.
//!
//! All thresholds and penalty weights are defined here for easy auditing. They
//! are heuristic display values with no clinical basis; `ScoringParams` lets
//! deployments override them.

// ═══════════════════════════════════════════════════════════════════════════════
// DISPLAY CONSTANTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Sentinel shown when a metric cannot be derived
pub const NOT_AVAILABLE: &str = "N/A";

/// Decimal places used for BMI
pub const BMI_DECIMALS: u32 = 1;

/// Centimeters per meter
pub const CM_PER_METER: f64 = 100.0;

// ═══════════════════════════════════════════════════════════════════════════════
// BMI BANDS
// ═══════════════════════════════════════════════════════════════════════════════

/// BMI below this is "Underweight"
pub const BMI_UNDERWEIGHT_BELOW: f64 = 18.5;

/// BMI from this value up is "Overweight"
pub const BMI_OVERWEIGHT_FROM: f64 = 25.0;

/// BMI from this value up is "High"
pub const BMI_HIGH_FROM: f64 = 30.0;

// ═══════════════════════════════════════════════════════════════════════════════
// HEALTH SCORE
// ═══════════════════════════════════════════════════════════════════════════════

/// Starting (and maximum) health score
pub const MAX_HEALTH_SCORE: u8 = 100;

/// BMI strictly above this costs the moderate penalty
pub const SCORE_BMI_MODERATE_ABOVE: f64 = 25.0;

/// BMI strictly above this costs the severe penalty instead
pub const SCORE_BMI_SEVERE_ABOVE: f64 = 30.0;

/// Penalty for 25 < BMI <= 30
pub const BMI_MODERATE_PENALTY: u32 = 10;

/// Penalty for BMI > 30
pub const BMI_SEVERE_PENALTY: u32 = 20;

/// Penalty per recorded medical-history condition
pub const CONDITION_PENALTY: u32 = 5;

/// Penalty per recorded symptom
pub const SYMPTOM_PENALTY: u32 = 3;

/// Scores from this value up are "Excellent"
pub const SCORE_EXCELLENT_FROM: u8 = 80;

/// Scores from this value up (below excellent) are "Moderate"
pub const SCORE_MODERATE_FROM: u8 = 60;

// ═══════════════════════════════════════════════════════════════════════════════
// VALIDATION BOUNDS
// ═══════════════════════════════════════════════════════════════════════════════

/// Largest plausible height in centimeters
pub const MAX_PLAUSIBLE_HEIGHT_CM: f64 = 300.0;

/// Largest plausible weight in kilograms
pub const MAX_PLAUSIBLE_WEIGHT_KG: f64 = 700.0;

// ═══════════════════════════════════════════════════════════════════════════════
// STORAGE
// ═══════════════════════════════════════════════════════════════════════════════

/// Store key holding the JSON array of all health profiles
pub const PROFILES_STORAGE_KEY: &str = "novacare_health_profiles";

/// File name used by the file-backed store
pub const STORE_FILE_NAME: &str = "store.json";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_bands_ordered() {
        assert!(BMI_UNDERWEIGHT_BELOW < BMI_OVERWEIGHT_FROM);
        assert!(BMI_OVERWEIGHT_FROM < BMI_HIGH_FROM);
    }

    #[test]
    fn test_score_bands_ordered() {
        assert!(SCORE_MODERATE_FROM < SCORE_EXCELLENT_FROM);
        assert!(SCORE_EXCELLENT_FROM <= MAX_HEALTH_SCORE);
        assert!(SCORE_BMI_MODERATE_ABOVE < SCORE_BMI_SEVERE_ABOVE);
        assert!(BMI_MODERATE_PENALTY < BMI_SEVERE_PENALTY);
    }
}
