//! Profile repository.
//!
//! Callers of the metrics engine fetch the current user's profile through
//! `ProfileRepository`, so the storage mechanism can change without touching
//! scoring. `KeyValueProfileStore` keeps every profile as one JSON array under
//! a single key, the layout the profile-setup flow writes.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::core::profile::{HealthProfile, UserId};
use crate::error::{Error, Result};
use crate::storage::backend::StorageBackend;
use crate::utils::constants::PROFILES_STORAGE_KEY;
use crate::utils::validation::{profile_issues, validate_owner, validate_user_id};

// ═══════════════════════════════════════════════════════════════════════════════
// REPOSITORY TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Read access to health profiles by user id
pub trait ProfileRepository: Send + Sync {
    /// Profile for `user_id`, `None` when the user has not set one up
    fn get_profile(&self, user_id: &UserId) -> Result<Option<HealthProfile>>;
}

impl<R: ProfileRepository + ?Sized> ProfileRepository for &R {
    fn get_profile(&self, user_id: &UserId) -> Result<Option<HealthProfile>> {
        (**self).get_profile(user_id)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// KEY-VALUE PROFILE STORE
// ═══════════════════════════════════════════════════════════════════════════════

/// Profiles stored as a JSON array under one backend key.
///
/// The array is shared with the profile-setup flow, so records are matched on
/// their raw `userId` and only the matched record is decoded. Writes replace
/// or append a single element and leave every other element as it was.
#[derive(Debug)]
pub struct KeyValueProfileStore<B: StorageBackend> {
    backend: B,
    key: String,
}

impl<B: StorageBackend> KeyValueProfileStore<B> {
    /// Use the default profiles key
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, PROFILES_STORAGE_KEY)
    }

    /// Use a custom key
    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Raw array elements; a missing key means none
    fn records(&self) -> Result<Vec<Value>> {
        match self.backend.get(&self.key)? {
            None => Ok(Vec::new()),
            Some(raw) if raw.trim().is_empty() => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                Error::Deserialization(format!("Invalid profile array under {}: {}", self.key, e))
            }),
        }
    }

    fn write_records(&self, records: &[Value]) -> Result<()> {
        if records.is_empty() {
            self.backend.delete(&self.key)?;
        } else {
            let raw = serde_json::to_string(records)
                .map_err(|e| Error::Serialization(e.to_string()))?;
            self.backend.set(&self.key, &raw)?;
        }
        self.backend.flush()
    }

    /// Every stored profile that decodes; unreadable records are skipped
    pub fn list_profiles(&self) -> Result<Vec<HealthProfile>> {
        Ok(self
            .records()?
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value::<HealthProfile>(record) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    tracing::warn!(index, error = %e, "Skipping unreadable profile record");
                    None
                }
            })
            .collect())
    }

    /// Insert or replace the profile for its user
    pub fn save_profile(&self, profile: HealthProfile) -> Result<()> {
        validate_user_id(&profile.user_id)?;

        let mut records = self.records()?;
        let user_id = profile.user_id.clone();
        let record = serde_json::to_value(&profile).map_err(|e| Error::Serialization(e.to_string()))?;

        match records.iter_mut().find(|r| record_owner(r).as_ref() == Some(&user_id)) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }

        self.write_records(&records)?;
        tracing::debug!(user = %user_id, total = records.len(), "Saved health profile");
        Ok(())
    }

    /// Save many profiles; returns how many were written
    pub fn import_profiles(&self, incoming: Vec<HealthProfile>) -> Result<usize> {
        let count = incoming.len();
        for profile in incoming {
            self.save_profile(profile)?;
        }
        tracing::info!(count, "Imported health profiles");
        Ok(count)
    }

    /// Remove every profile for a user; the key is dropped once no record is left
    pub fn remove_profile(&self, user_id: &UserId) -> Result<()> {
        let mut records = self.records()?;
        let before = records.len();
        records.retain(|r| record_owner(r).as_ref() != Some(user_id));

        if records.len() == before {
            return Err(Error::ProfileNotFound(user_id.to_string()));
        }

        self.write_records(&records)
    }
}

/// `userId` of a raw record, if it has a usable one
fn record_owner(record: &Value) -> Option<UserId> {
    record.get("userId").and_then(UserId::from_json)
}

impl<B: StorageBackend> ProfileRepository for KeyValueProfileStore<B> {
    fn get_profile(&self, user_id: &UserId) -> Result<Option<HealthProfile>> {
        let record = match self
            .records()?
            .into_iter()
            .find(|r| record_owner(r).as_ref() == Some(user_id))
        {
            Some(record) => record,
            None => return Ok(None),
        };

        serde_json::from_value(record).map(Some).map_err(|e| {
            Error::Deserialization(format!("Invalid profile record for {}: {}", user_id, e))
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// VALIDATING REPOSITORY
// ═══════════════════════════════════════════════════════════════════════════════

/// What to do with a profile that fails boundary validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Log each issue and return the profile unchanged
    #[default]
    Warn,
    /// Return the first issue as an error
    Reject,
}

impl ValidationMode {
    /// Mode name
    pub fn name(&self) -> &'static str {
        match self {
            ValidationMode::Warn => "warn",
            ValidationMode::Reject => "reject",
        }
    }
}

impl FromStr for ValidationMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "warn" | "lenient" => Ok(ValidationMode::Warn),
            "reject" | "strict" => Ok(ValidationMode::Reject),
            other => Err(Error::InvalidParameter {
                name: "validation".into(),
                reason: format!("unknown validation mode: {}", other),
            }),
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Repository wrapper that validates profiles on the way out.
///
/// A record owned by a different user is always an error, whatever the mode.
pub struct ValidatingRepository<R> {
    inner: R,
    mode: ValidationMode,
    clock: Box<dyn Fn() -> NaiveDate + Send + Sync>,
}

impl<R: ProfileRepository> ValidatingRepository<R> {
    /// Wrap a repository; the reference date is today's local date
    pub fn new(inner: R, mode: ValidationMode) -> Self {
        Self {
            inner,
            mode,
            clock: Box::new(|| Local::now().date_naive()),
        }
    }

    /// Replace the reference-date source
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> NaiveDate + Send + Sync + 'static,
    {
        self.clock = Box::new(clock);
        self
    }

    /// Active mode
    pub fn mode(&self) -> ValidationMode {
        self.mode
    }
}

impl<R> fmt::Debug for ValidatingRepository<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatingRepository")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl<R: ProfileRepository> ProfileRepository for ValidatingRepository<R> {
    fn get_profile(&self, user_id: &UserId) -> Result<Option<HealthProfile>> {
        let profile = match self.inner.get_profile(user_id)? {
            Some(profile) => profile,
            None => return Ok(None),
        };
        validate_owner(&profile, user_id)?;

        let issues = profile_issues(&profile, (self.clock)());
        if issues.is_empty() {
            return Ok(Some(profile));
        }

        match self.mode {
            ValidationMode::Warn => {
                for issue in &issues {
                    tracing::warn!(user = %user_id, code = issue.code(), "Profile failed validation: {}", issue);
                }
                Ok(Some(profile))
            }
            ValidationMode::Reject => Err(issues.into_iter().next().unwrap_or_else(|| {
                Error::Internal("validation issues vanished".into())
            })),
        }
    }
}
