//! Utility modules for the NovaCare metrics crate.
//!
//! This module contains shared utilities:
//! - Constants (thresholds, penalties, sentinels)
//! - Rounding and bounded-score arithmetic
//! - Boundary validation helpers

pub mod constants;
pub mod math;
pub mod validation;

pub use constants::*;
pub use math::*;
pub use validation::*;
