//! One-rep-max estimation.
//!
//! Uses the Epley formula to project the maximal single-rep lift from a
//! known weight/reps pair. The result is rounded to the nearest whole
//! kilogram, matching how the estimate is displayed and compared.

/// Estimate the one-rep max for a weight/reps pair.
///
/// - `reps == 1` returns the weight unchanged (it already is a 1RM)
/// - `reps == 0` or `weight_kg == 0` returns 0 (no lift performed)
/// - otherwise Epley: `round(weight * (1 + reps / 30))`
///
/// Total function; negative weights are a caller precondition violation.
pub fn estimate_1rm(weight_kg: f64, reps: u32) -> f64 {
    if weight_kg == 0.0 || reps == 0 {
        return 0.0;
    }
    if reps == 1 {
        return weight_kg;
    }

    (weight_kg * (1.0 + reps as f64 / 30.0)).round()
}
