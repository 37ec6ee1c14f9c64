// ---------------------------------------------------------------------------
// PromotionRiskScore – composite 0–100 risk derived at load time
// ---------------------------------------------------------------------------

pub const GAP_WEIGHT: f64 = 50.0;
pub const STAGNATION_WEIGHT: f64 = 30.0;
pub const TRAINING_WEIGHT: f64 = 20.0;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

/// Combine the three career signals into a score in `[0, 100]` with one
/// decimal place.
///
/// Only `training_intensity` is clipped to `[0, 1]` before weighting; the
/// other two inputs are used as-is and the sum is clipped afterwards.
pub fn promotion_risk_score(
    promotion_gap_ratio: f64,
    role_stagnation_index: f64,
    training_intensity: f64,
) -> f64 {
    let raw = promotion_gap_ratio * GAP_WEIGHT
        + role_stagnation_index * STAGNATION_WEIGHT
        + (1.0 - training_intensity.clamp(0.0, 1.0)) * TRAINING_WEIGHT;
    round1(raw.clamp(MIN_SCORE, MAX_SCORE))
}

/// Round to one decimal place, ties to even (numpy / Python `round`).
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
