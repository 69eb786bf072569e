//! Core modules for the NovaCare metrics crate.
//!
//! This module contains the fundamental building blocks:
//! - Health profile record
//! - Scoring parameters
//! - Metrics engine (BMI, age, health score, tags)
//! - Display tags, severity classes and report types

pub mod config;
pub mod engine;
pub mod profile;
pub mod report;
pub mod tags;

pub use config::*;
pub use engine::*;
pub use profile::*;
pub use report::*;
pub use tags::*;
