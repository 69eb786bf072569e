//! # NovaCare Health Metrics
//!
//! Derives the dashboard metrics of the NovaCare health app from a stored
//! health profile snapshot: body mass index, age, a heuristic health score
//! and the categorical tags (with styling classes) shown next to each value.
//!
//! The health score is a display heuristic, not a clinical assessment or
//! medical advice.
//!
//! ## Architecture
//!
//! - **Core**: Profile record, scoring parameters, metrics engine, report types
//! - **Storage**: Key-value backends and the profile repository
//! - **Utils**: Constants, rounding and score arithmetic, boundary validation
//! - **CLI**: Operator command-line support
//!
//! Every engine operation is a pure function of its inputs. Missing or
//! unusable inputs resolve to "N/A" readings rather than errors.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use novacare::prelude::*;
//!
//! let profile = HealthProfile::new("u-1")
//!     .with_measurements(180.0, 81.0)
//!     .with_dob(NaiveDate::from_ymd_opt(1990, 6, 2).unwrap());
//!
//! let engine = MetricsEngine::default();
//! let report = engine.evaluate(Some(&profile), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
//!
//! assert_eq!(report.bmi.display_value(), "25.0");
//! assert_eq!(report.bmi.tag, MetricTag::Overweight);
//! assert_eq!(report.health_score.value, Some(100));
//! assert_eq!(report.age, Some(33));
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    trivial_casts,
    unused_lifetimes,
    unused_qualifications
)]

pub mod cli;
pub mod core;
pub mod error;
pub mod storage;
pub mod utils;

pub use error::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        config::ScoringParams,
        engine::{compute_age, compute_bmi, tag_severity_class, MetricsEngine},
        profile::{HealthProfile, UserId},
        report::{MetricReading, MetricsReport, ProfileSummary},
        tags::{MetricTag, SeverityClass},
    };
    pub use crate::error::{Error, Result};
    pub use crate::storage::{
        backend::{FileStore, InMemoryStore, StorageBackend},
        profiles::{KeyValueProfileStore, ProfileRepository, ValidatingRepository, ValidationMode},
    };
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "NovaCare";
