//! Profile validation at the store boundary.
//!
//! The metrics engine accepts any profile. These checks are the optional
//! layer a caller runs on records coming out of (or going into) the profile
//! store, kept separate from scoring.

use chrono::NaiveDate;

use crate::core::profile::{HealthProfile, UserId};
use crate::error::{Error, Result};
use crate::utils::constants::*;

// ═══════════════════════════════════════════════════════════════════════════════
// FIELD VALIDATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Validate that a user id is not blank
pub fn validate_user_id(user_id: &UserId) -> Result<()> {
    if user_id.is_blank() {
        return Err(Error::InvalidParameter {
            name: "userId".into(),
            reason: "user id cannot be blank".into(),
        });
    }
    Ok(())
}

fn validate_measurement(value: Option<f64>, field: &str, max: f64) -> Result<()> {
    let value = match value {
        Some(v) => v,
        None => return Ok(()),
    };

    if !value.is_finite() {
        return Err(Error::InvalidParameter {
            name: field.into(),
            reason: format!("{} is not a finite number", value),
        });
    }

    if value <= 0.0 || value > max {
        return Err(Error::MeasurementOutOfRange {
            field: field.into(),
            value,
            min: 0.0,
            max,
        });
    }

    Ok(())
}

/// Validate height in centimeters, when present
pub fn validate_height(height_cm: Option<f64>) -> Result<()> {
    validate_measurement(height_cm, "height", MAX_PLAUSIBLE_HEIGHT_CM)
}

/// Validate weight in kilograms, when present
pub fn validate_weight(weight_kg: Option<f64>) -> Result<()> {
    validate_measurement(weight_kg, "weight", MAX_PLAUSIBLE_WEIGHT_KG)
}

/// Validate date of birth is not after `today`, when present
pub fn validate_dob(dob: Option<NaiveDate>, today: NaiveDate) -> Result<()> {
    match dob {
        Some(d) if d > today => Err(Error::DateOfBirthInFuture {
            dob: d.to_string(),
            today: today.to_string(),
        }),
        _ => Ok(()),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PROFILE VALIDATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Every validation failure for a profile, in field order
pub fn profile_issues(profile: &HealthProfile, today: NaiveDate) -> Vec<Error> {
    [
        validate_user_id(&profile.user_id),
        validate_height(profile.height),
        validate_weight(profile.weight),
        validate_dob(profile.dob, today),
    ]
    .into_iter()
    .filter_map(|r| r.err())
    .collect()
}

/// Validate a profile, returning the first failure
pub fn validate_profile(profile: &HealthProfile, today: NaiveDate) -> Result<()> {
    validate_user_id(&profile.user_id)?;
    validate_height(profile.height)?;
    validate_weight(profile.weight)?;
    validate_dob(profile.dob, today)?;
    Ok(())
}

/// Validate that a fetched profile belongs to the requesting user
pub fn validate_owner(profile: &HealthProfile, requested: &UserId) -> Result<()> {
    if !profile.belongs_to(requested) {
        return Err(Error::UserMismatch {
            expected: requested.to_string(),
            got: profile.user_id.to_string(),
        });
    }
    Ok(())
}
