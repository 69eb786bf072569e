//! Health profile record.
//!
//! Profiles are created and updated by the profile-setup flow, outside this
//! crate. The record is read-only to the metrics engine. The serialized form
//! follows the browser store the profiles come from: camelCase keys, form
//! values that may arrive as strings, and list fields that may be missing.
//! A value that cannot be read as its field's type is treated as absent, and
//! keys the record does not model are carried along untouched.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

// ═══════════════════════════════════════════════════════════════════════════════
// USER ID
// ═══════════════════════════════════════════════════════════════════════════════

/// Identifier of the user a profile belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create a user id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow as string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the id is empty or whitespace
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl UserId {
    /// Read an id the way the browser store writes it: a string or a number
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(UserId(s.clone())),
            Value::Number(n) => Some(UserId(n.to_string())),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        UserId::from_json(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("user id must be a string or number, got {}", raw))
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// HEALTH PROFILE
// ═══════════════════════════════════════════════════════════════════════════════

/// A stored health profile snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthProfile {
    /// Owner of the profile
    pub user_id: UserId,

    /// Height in centimeters
    #[serde(default, deserialize_with = "lenient::number")]
    pub height: Option<f64>,

    /// Weight in kilograms
    #[serde(default, deserialize_with = "lenient::number")]
    pub weight: Option<f64>,

    /// Date of birth
    #[serde(default, deserialize_with = "lenient::date")]
    pub dob: Option<NaiveDate>,

    /// Gender, free text
    #[serde(default, deserialize_with = "lenient::text")]
    pub gender: Option<String>,

    /// Blood group, free text
    #[serde(default, deserialize_with = "lenient::text")]
    pub blood_group: Option<String>,

    /// Genotype, free text
    #[serde(default, deserialize_with = "lenient::text")]
    pub genotype: Option<String>,

    /// Recorded conditions, in entry order
    #[serde(default, deserialize_with = "lenient::list")]
    pub medical_history: Vec<String>,

    /// Current symptoms, in entry order
    #[serde(default, deserialize_with = "lenient::list")]
    pub symptoms: Vec<String>,

    /// Current medications; the setup form can leave blank entries
    #[serde(default, deserialize_with = "lenient::list")]
    pub medications: Vec<String>,

    /// Opaque image reference (usually a data URL)
    #[serde(default, deserialize_with = "lenient::text")]
    pub profile_picture: Option<String>,

    /// Keys written by the setup flow that this record does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HealthProfile {
    /// Create an empty profile for a user
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            height: None,
            weight: None,
            dob: None,
            gender: None,
            blood_group: None,
            genotype: None,
            medical_history: Vec::new(),
            symptoms: Vec::new(),
            medications: Vec::new(),
            profile_picture: None,
            extra: Map::new(),
        }
    }

    /// Set height (cm) and weight (kg)
    pub fn with_measurements(mut self, height_cm: f64, weight_kg: f64) -> Self {
        self.height = Some(height_cm);
        self.weight = Some(weight_kg);
        self
    }

    /// Set date of birth
    pub fn with_dob(mut self, dob: NaiveDate) -> Self {
        self.dob = Some(dob);
        self
    }

    /// Set recorded conditions
    pub fn with_history<I, S>(mut self, conditions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.medical_history = conditions.into_iter().map(Into::into).collect();
        self
    }

    /// Set current symptoms
    pub fn with_symptoms<I, S>(mut self, symptoms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symptoms = symptoms.into_iter().map(Into::into).collect();
        self
    }

    /// Set current medications
    pub fn with_medications<I, S>(mut self, medications: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.medications = medications.into_iter().map(Into::into).collect();
        self
    }

    /// Medications with blank entries removed, in entry order
    pub fn display_medications(&self) -> Vec<&str> {
        self.medications
            .iter()
            .map(String::as_str)
            .filter(|m| !m.trim().is_empty())
            .collect()
    }

    /// True if this profile belongs to `user_id`
    pub fn belongs_to(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// LENIENT DESERIALIZERS
// ═══════════════════════════════════════════════════════════════════════════════

mod lenient {
    use chrono::{DateTime, NaiveDate};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Number or numeric string; anything else is absent
    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
    }

    /// `YYYY-MM-DD` or an RFC 3339 timestamp; anything else is absent
    pub fn date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = match Value::deserialize(deserializer)? {
            Value::String(raw) => raw,
            _ => return Ok(None),
        };
        let raw = raw.trim();

        Ok(NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive())))
    }

    /// Array entries as text; a non-array is an empty list
    pub fn list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items.iter().filter_map(scalar_text).collect(),
            _ => Vec::new(),
        })
    }

    /// String, number or boolean as text; anything else is absent
    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(scalar_text(&Value::deserialize(deserializer)?))
    }

    fn scalar_text(value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_store_record() {
        let json = r#"{
            "userId": "u-1",
            "height": 180,
            "weight": "81",
            "dob": "1990-05-17",
            "gender": "Female",
            "bloodGroup": "O+",
            "genotype": "AA",
            "medicalHistory": ["Asthma"],
            "symptoms": [],
            "medications": ["Ventolin", "  ", ""],
            "profilePicture": null
        }"#;

        let profile: HealthProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.user_id, UserId::new("u-1"));
        assert_eq!(profile.height, Some(180.0));
        assert_eq!(profile.weight, Some(81.0));
        assert_eq!(profile.dob, NaiveDate::from_ymd_opt(1990, 5, 17));
        assert_eq!(profile.blood_group.as_deref(), Some("O+"));
        assert_eq!(profile.medical_history, vec!["Asthma"]);
        assert_eq!(profile.display_medications(), vec!["Ventolin"]);
    }

    #[test]
    fn test_deserialize_sparse_record() {
        let json = r#"{"userId": 1712345678901, "height": "", "dob": "", "symptoms": null}"#;

        let profile: HealthProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.user_id.as_str(), "1712345678901");
        assert_eq!(profile.height, None);
        assert_eq!(profile.weight, None);
        assert_eq!(profile.dob, None);
        assert!(profile.symptoms.is_empty());
        assert!(profile.medical_history.is_empty());
    }

    #[test]
    fn test_deserialize_rfc3339_dob() {
        let json = r#"{"userId": "u", "dob": "1990-05-17T00:00:00Z"}"#;
        let profile: HealthProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.dob, NaiveDate::from_ymd_opt(1990, 5, 17));
    }

    #[test]
    fn test_deserialize_garbage_becomes_absent() {
        let json = r#"{
            "userId": "u",
            "height": "tall",
            "weight": true,
            "dob": "yesterday",
            "gender": ["?"],
            "medicalHistory": "Asthma",
            "symptoms": ["Cough", null, 3]
        }"#;

        let profile: HealthProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.height, None);
        assert_eq!(profile.weight, None);
        assert_eq!(profile.dob, None);
        assert_eq!(profile.gender, None);
        assert!(profile.medical_history.is_empty());
        assert_eq!(profile.symptoms, vec!["Cough", "3"]);
    }

    #[test]
    fn test_deserialize_requires_user_id() {
        assert!(serde_json::from_str::<HealthProfile>(r#"{"height": 170}"#).is_err());
        assert!(serde_json::from_str::<HealthProfile>(r#"{"userId": null}"#).is_err());
    }

    #[test]
    fn test_unmodeled_keys_round_trip() {
        let json = r#"{"userId": "u", "height": 170, "allergies": ["peanut"], "emergencyContact": "x"}"#;

        let profile: HealthProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.extra["allergies"], serde_json::json!(["peanut"]));
        assert!(!profile.extra.contains_key("height"));

        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["emergencyContact"], "x");
        assert_eq!(value["allergies"][0], "peanut");
        assert_eq!(value["height"], 170.0);
    }

    #[test]
    fn test_serialize_camel_case() {
        let profile = HealthProfile::new("u-2").with_measurements(170.0, 60.0);
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["userId"], "u-2");
        assert_eq!(value["height"], 170.0);
        assert!(value.get("medicalHistory").is_some());
    }

    #[test]
    fn test_belongs_to() {
        let profile = HealthProfile::new("u-3");
        assert!(profile.belongs_to(&UserId::new("u-3")));
        assert!(!profile.belongs_to(&UserId::new("u-4")));
    }
}
