//! Error types for the NovaCare metrics crate.
//!
//! The metrics engine itself never fails: missing inputs resolve to sentinel
//! values. Errors only arise at the boundaries (profile store access,
//! serialization, validation and configuration).

use thiserror::Error;

/// Result type alias for NovaCare operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the NovaCare crate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ═══════════════════════════════════════════════════════════════════
    // Profile Errors
    // ═══════════════════════════════════════════════════════════════════

    /// No profile stored for the user
    #[error("Health profile not found for user: {0}")]
    ProfileNotFound(String),

    /// Profile belongs to a different user than the one requested
    #[error("Profile user mismatch: expected {expected}, got {got}")]
    UserMismatch {
        /// Requested user id
        expected: String,
        /// User id on the record
        got: String,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Validation Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Invalid input parameter
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Body measurement outside the plausible range
    #[error("{field} {value} out of range ({min}, {max}]")]
    MeasurementOutOfRange {
        /// Measurement name
        field: String,
        /// Recorded value
        value: f64,
        /// Exclusive lower bound
        min: f64,
        /// Inclusive upper bound
        max: f64,
    },

    /// Date of birth lies after the reference date
    #[error("Date of birth {dob} is after {today}")]
    DateOfBirthInFuture {
        /// Recorded date of birth
        dob: String,
        /// Reference date
        today: String,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Configuration Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Scoring parameters are inconsistent
    #[error("Invalid scoring parameters: {0}")]
    InvalidScoringParams(String),

    // ═══════════════════════════════════════════════════════════════════
    // Serialization Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization failed
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ═══════════════════════════════════════════════════════════════════
    // Internal Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Internal error (should not happen in production)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Lock acquisition failed
    #[error("Failed to acquire lock")]
    Lock,

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(String),
}

impl Error {
    /// Returns true if the caller can fix the input and retry
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::ProfileNotFound(_)
                | Error::InvalidParameter { .. }
                | Error::MeasurementOutOfRange { .. }
                | Error::DateOfBirthInFuture { .. }
        )
    }

    /// Returns true if this is a critical error requiring immediate attention
    pub fn is_critical(&self) -> bool {
        matches!(self, Error::Internal(_) | Error::Lock | Error::Storage(_))
    }

    /// Returns true if this error came from boundary validation
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidParameter { .. }
                | Error::MeasurementOutOfRange { .. }
                | Error::DateOfBirthInFuture { .. }
        )
    }

    /// Returns the error code for external systems
    pub fn code(&self) -> u32 {
        match self {
            // Profile errors: 1xxx
            Error::ProfileNotFound(_) => 1001,
            Error::UserMismatch { .. } => 1002,

            // Validation errors: 5xxx
            Error::InvalidParameter { .. } => 5001,
            Error::MeasurementOutOfRange { .. } => 5002,
            Error::DateOfBirthInFuture { .. } => 5003,

            // Configuration errors: 6xxx
            Error::InvalidScoringParams(_) => 6001,

            // Serialization errors: 7xxx
            Error::Serialization(_) => 7001,
            Error::Deserialization(_) => 7002,

            // Internal errors: 9xxx
            Error::Internal(_) => 9001,
            Error::Lock => 9002,
            Error::Storage(_) => 9003,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Error::Storage(err.to_string())
        } else {
            Error::Deserialization(err.to_string())
        }
    }
}
