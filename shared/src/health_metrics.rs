//! Daily health derivations
//!
//! Estimates derived from raw daily counters. These values are always
//! recomputed from the stored counters and never persisted themselves.
//!
//! - Distance assumes a fixed 0.75 m stride.
//! - Step calories assume 0.04 kcal per step, rounded down.

/// Stride length used for distance estimates, in meters
pub const STRIDE_LENGTH_M: f64 = 0.75;

/// Calories burned per step, expressed in hundredths of a kcal
const CENTI_KCAL_PER_STEP: u64 = 4;

/// Estimated distance walked, in kilometers
///
/// Formula: steps × 0.75 / 1000
pub fn distance_km(steps: u32) -> f64 {
    f64::from(steps) * STRIDE_LENGTH_M / 1000.0
}

/// Estimated calories burned by walking
///
/// Formula: ⌊steps × 0.04⌋, computed in integers so the floor is exact
pub fn calories_from_steps(steps: u32) -> u32 {
    let kcal = u64::from(steps) * CENTI_KCAL_PER_STEP / 100;
    u32::try_from(kcal).unwrap_or(u32::MAX)
}

/// Net calories for the day (consumed − burned), may be negative
pub fn calorie_balance(consumed: u32, burned: u32) -> i64 {
    i64::from(consumed) - i64::from(burned)
}

/// Fraction of a daily goal reached, in [0, 1]
///
/// A goal of 0 counts as no progress.
pub fn goal_fraction(value: u32, goal: u32) -> f64 {
    if goal == 0 {
        return 0.0;
    }
    (f64::from(value) / f64::from(goal)).clamp(0.0, 1.0)
}
