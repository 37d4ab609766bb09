//! Workout duration estimate.

use crate::Exercise;

/// Fixed warm-up and stretching block
pub const WARM_UP_SECONDS: u32 = 5 * 60;

/// Rest after each exercise, every round
pub const REST_BETWEEN_EXERCISES_SECONDS: u32 = 30;

/// Rest between two rounds
pub const REST_BETWEEN_ROUNDS_SECONDS: u32 = 90;

/// Estimated total seconds for doing `exercises` in order for `rounds` rounds
///
/// `300 + rounds * Σ(duration + 30) + 90 * (rounds - 1)`
///
/// Saturates at `u32::MAX` for absurd catalog durations.
pub fn estimate_seconds<'a, I>(exercises: I, rounds: u32) -> u32
where
    I: IntoIterator<Item = &'a Exercise>,
{
    let per_round = exercises.into_iter().fold(0u32, |total, e| {
        total
            .saturating_add(e.estimated_duration)
            .saturating_add(REST_BETWEEN_EXERCISES_SECONDS)
    });

    WARM_UP_SECONDS
        .saturating_add(rounds.saturating_mul(per_round))
        .saturating_add(REST_BETWEEN_ROUNDS_SECONDS.saturating_mul(rounds.saturating_sub(1)))
}

/// Seconds to whole minutes, halves going to the even minute
pub fn to_minutes(seconds: u32) -> u32 {
    let (minutes, rest) = (seconds / 60, seconds % 60);
    if rest > 30 || (rest == 30 && minutes % 2 == 1) {
        minutes + 1
    } else {
        minutes
    }
}
