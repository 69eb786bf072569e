//! Rounding and bounded-score arithmetic.
//!
//! Rounding goes through `rust_decimal` on the exact binary value of the
//! input, so `24.95` stored as `24.949999...` rounds down exactly like a
//! fixed-point formatter would.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

// ═══════════════════════════════════════════════════════════════════════════════
// ROUNDING
// ═══════════════════════════════════════════════════════════════════════════════

/// Round to `decimals` places, ties away from zero.
///
/// Non-finite inputs are returned unchanged. Values outside the decimal range
/// fall back to float rounding.
pub fn round_half_away(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }

    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or_else(|| {
            let factor = 10f64.powi(decimals as i32);
            (value * factor).round() / factor
        })
}

/// Format with exactly `decimals` places after rounding half away from zero
pub fn format_fixed(value: f64, decimals: u32) -> String {
    format!("{:.*}", decimals as usize, round_half_away(value, decimals))
}

// ═══════════════════════════════════════════════════════════════════════════════
// BOUNDED SCORES
// ═══════════════════════════════════════════════════════════════════════════════

/// Subtract penalties from a starting score, clamping into `[0, max]`.
///
/// Arithmetic is done in `i64` so a large penalty total never wraps.
pub fn apply_penalties(start: u8, penalties: &[u64], max: u8) -> u8 {
    let total: i64 = penalties
        .iter()
        .map(|p| i64::try_from(*p).unwrap_or(i64::MAX))
        .fold(0i64, |acc, p| acc.saturating_add(p));

    let raw = i64::from(start).saturating_sub(total);
    raw.clamp(0, i64::from(max)) as u8
}

/// Per-item penalty for `count` items, saturating
pub fn count_penalty(count: usize, per_item: u32) -> u64 {
    (count as u64).saturating_mul(u64::from(per_item))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_away() {
        assert_eq!(round_half_away(25.04, 1), 25.0);
        assert_eq!(round_half_away(25.06, 1), 25.1);
        assert_eq!(round_half_away(0.25, 1), 0.3);
        assert_eq!(round_half_away(-0.25, 1), -0.3);
        assert_eq!(round_half_away(24.999999999999996, 1), 25.0);
    }

    #[test]
    fn test_round_uses_binary_value() {
        // 1.15 is stored as 1.149999...
        assert_eq!(round_half_away(1.15, 1), 1.1);
    }

    #[test]
    fn test_round_non_finite_passthrough() {
        assert!(round_half_away(f64::NAN, 1).is_nan());
        assert_eq!(round_half_away(f64::INFINITY, 1), f64::INFINITY);
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(25.0, 1), "25.0");
        assert_eq!(format_fixed(22.857142857, 1), "22.9");
        assert_eq!(format_fixed(18.5, 1), "18.5");
    }

    #[test]
    fn test_apply_penalties_clamps() {
        assert_eq!(apply_penalties(100, &[20, 50, 15], 100), 15);
        assert_eq!(apply_penalties(100, &[20, 100, 15], 100), 0);
        assert_eq!(apply_penalties(100, &[], 100), 100);
        assert_eq!(apply_penalties(100, &[u64::MAX, u64::MAX], 100), 0);
    }

    #[test]
    fn test_count_penalty() {
        assert_eq!(count_penalty(0, 5), 0);
        assert_eq!(count_penalty(4, 5), 20);
        assert_eq!(count_penalty(usize::MAX, u32::MAX), u64::MAX);
    }
}
