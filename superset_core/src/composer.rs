//! Workout composer.
//!
//! Searches exercise-count × round-count combinations for the workout whose
//! estimated duration lands closest to the target:
//!
//! 1. Deduplicate the catalog by name and run the filter pipeline
//! 2. For every count in `[3, min(10, pool)]` and rounds in `[1, 4]`, draw one
//!    ordered sample that avoids similar neighbours
//! 3. Top up frontal/transverse-plane exercises where the sample is short
//! 4. Keep the candidate with the smallest distance to the target
//!
//! Sampling is random, so two calls with the same request usually produce
//! different workouts. Pass a seeded RNG for reproducible results.

use crate::catalog::dedup_by_name;
use crate::duration::{estimate_seconds, to_minutes};
use crate::filter::filter_catalog;
use crate::similarity::{are_similar, is_plane_exercise};
use crate::{ComposeRequest, Error, Exercise, Result, Workout};
use rand::seq::SliceRandom;
use rand::Rng;

pub const MIN_EXERCISES: usize = 3;
pub const MAX_EXERCISES: usize = 10;
pub const MIN_ROUNDS: u32 = 1;
pub const MAX_ROUNDS: u32 = 4;

/// Workouts up to this length need one plane exercise, longer ones two
pub const SHORT_WORKOUT_MINUTES: u32 = 20;

/// A scored sample kept while searching
#[derive(Debug)]
struct Candidate<'a> {
    exercises: Vec<&'a Exercise>,
    rounds: u32,
    seconds: u32,
    diff: u32,
}

/// Compose a workout from a catalog snapshot
///
/// Fails with [`Error::NoExercises`] for an empty catalog and with
/// [`Error::InfeasibleConstraints`] when no sample meets the plane requirement.
pub fn compose<R>(
    catalog: &[Exercise],
    request: &ComposeRequest,
    rng: &mut R,
) -> Result<Workout>
where
    R: Rng + ?Sized,
{
    let unique = dedup_by_name(catalog);
    if unique.is_empty() {
        return Err(Error::NoExercises);
    }

    let outcome = filter_catalog(&unique, &request.filters);
    let pool = outcome.exercises;

    let available_plane = pool.iter().filter(|e| is_plane_exercise(e)).count();
    let required_plane = required_plane_count(request.target_minutes).min(available_plane);
    let target_seconds = request.target_minutes.saturating_mul(60);

    tracing::info!(
        "Composing {}-minute workout from {} exercises ({:?} filters, {} plane required)",
        request.target_minutes,
        pool.len(),
        outcome.strategy,
        required_plane
    );

    let max_exercises = MAX_EXERCISES.min(pool.len());
    let mut best: Option<Candidate> = None;

    for count in MIN_EXERCISES..=max_exercises {
        for rounds in MIN_ROUNDS..=MAX_ROUNDS {
            let Some(mut sample) = sample_ordered(&pool, count, rng) else {
                tracing::trace!("Could not draw {} exercises", count);
                continue;
            };

            if !enforce_plane_count(&mut sample, &pool, required_plane, rng) {
                tracing::trace!(
                    "Sample of {} lacks plane exercises, discarding",
                    count
                );
                continue;
            }

            let seconds = estimate_seconds(sample.iter().copied(), rounds);
            let diff = seconds.abs_diff(target_seconds);
            tracing::debug!(
                "{} exercises x {} rounds = {}s (off by {}s)",
                count,
                rounds,
                seconds,
                diff
            );

            if best.as_ref().map_or(true, |b| diff < b.diff) {
                best = Some(Candidate {
                    exercises: sample,
                    rounds,
                    seconds,
                    diff,
                });
            }

            if diff == 0 {
                break;
            }
        }
    }

    let best = best.ok_or(Error::InfeasibleConstraints {
        target_minutes: request.target_minutes,
        required_plane,
    })?;

    tracing::info!(
        "Picked {} exercises x {} rounds ({}s, {}s from target)",
        best.exercises.len(),
        best.rounds,
        best.seconds,
        best.diff
    );

    Ok(Workout {
        exercises: best.exercises.into_iter().cloned().collect(),
        rounds: best.rounds,
        estimated_duration_minutes: to_minutes(best.seconds),
    })
}

/// Plane exercises a workout of this length must contain before capping
pub fn required_plane_count(target_minutes: u32) -> usize {
    if target_minutes <= SHORT_WORKOUT_MINUTES {
        1
    } else {
        2
    }
}

/// Draw `count` distinct exercises in order, preferring at each step one
/// that is not similar to the previous pick
///
/// Returns `None` when the pool is smaller than `count`.
fn sample_ordered<'a, R>(
    pool: &[&'a Exercise],
    count: usize,
    rng: &mut R,
) -> Option<Vec<&'a Exercise>>
where
    R: Rng + ?Sized,
{
    if pool.len() < count {
        return None;
    }

    let mut remaining = pool.to_vec();
    let mut picked: Vec<&Exercise> = Vec::with_capacity(count);

    while picked.len() < count {
        let dissimilar: Vec<usize> = match picked.last() {
            Some(previous) => remaining
                .iter()
                .enumerate()
                .filter(|(_, e)| !are_similar(previous, e))
                .map(|(i, _)| i)
                .collect(),
            None => Vec::new(),
        };

        let index = match dissimilar.choose(rng) {
            Some(&i) => i,
            None => rng.gen_range(0..remaining.len()),
        };
        picked.push(remaining.swap_remove(index));
    }

    Some(picked)
}

/// Swap unused plane exercises from `pool` into random non-plane slots until
/// `sample` holds `required` of them
///
/// Returns whether the requirement is met.
fn enforce_plane_count<'a, R>(
    sample: &mut [&'a Exercise],
    pool: &[&'a Exercise],
    required: usize,
    rng: &mut R,
) -> bool
where
    R: Rng + ?Sized,
{
    let mut have = sample.iter().filter(|e| is_plane_exercise(e)).count();
    if have >= required {
        return true;
    }

    let mut spare: Vec<&Exercise> = pool
        .iter()
        .copied()
        .filter(|e| is_plane_exercise(e) && !sample.iter().any(|s| s.name == e.name))
        .collect();
    let mut slots: Vec<usize> = sample
        .iter()
        .enumerate()
        .filter(|(_, e)| !is_plane_exercise(e))
        .map(|(i, _)| i)
        .collect();
    spare.shuffle(rng);
    slots.shuffle(rng);

    while have < required {
        let (Some(slot), Some(exercise)) = (slots.pop(), spare.pop()) else {
            break;
        };
        tracing::trace!("Swapping in plane exercise '{}'", exercise.name);
        sample[slot] = exercise;
        have += 1;
    }

    have >= required
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_default_catalog, ExerciseFilters, Intensity, MovementType, MuscleGroup};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::{BTreeSet, HashSet};

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    fn plain(id: u32, movement: MovementType, muscles: &[MuscleGroup]) -> Exercise {
        Exercise {
            id,
            name: format!("exercise-{}", id),
            description: None,
            movement_types: vec![movement],
            muscle_groups: muscles.iter().copied().collect(),
            equipment: BTreeSet::new(),
            estimated_duration: 40,
            intensity: Intensity::Medium,
        }
    }

    #[test]
    fn test_empty_catalog_fails() {
        let result = compose(&[], &ComposeRequest::new(30), &mut rng(1));
        assert!(matches!(result, Err(Error::NoExercises)));
    }

    #[test]
    fn test_workout_respects_bounds_and_unique_names() {
        crate::logging::init_test();
        let catalog = build_default_catalog();

        for seed in 0..20 {
            for minutes in [10, 20, 30, 45, 60] {
                let workout =
                    compose(&catalog.exercises, &ComposeRequest::new(minutes), &mut rng(seed))
                        .unwrap();

                assert!((MIN_EXERCISES..=MAX_EXERCISES).contains(&workout.exercises.len()));
                assert!((MIN_ROUNDS..=MAX_ROUNDS).contains(&workout.rounds));

                let names: HashSet<_> = workout.exercises.iter().map(|e| &e.name).collect();
                assert_eq!(names.len(), workout.exercises.len());
            }
        }
    }

    #[test]
    fn test_long_workout_has_two_plane_exercises() {
        let catalog = build_default_catalog();

        for seed in 0..20 {
            let workout =
                compose(&catalog.exercises, &ComposeRequest::new(25), &mut rng(seed)).unwrap();
            let plane = workout
                .exercises
                .iter()
                .filter(|e| is_plane_exercise(e))
                .count();
            assert!(plane >= 2, "seed {} gave {} plane exercises", seed, plane);
        }
    }

    #[test]
    fn test_short_workout_has_a_plane_exercise() {
        let catalog = build_default_catalog();

        for seed in 0..20 {
            let workout =
                compose(&catalog.exercises, &ComposeRequest::new(12), &mut rng(seed)).unwrap();
            assert!(workout.exercises.iter().any(is_plane_exercise));
        }
    }

    #[test]
    fn test_duration_matches_estimate() {
        let catalog = build_default_catalog();
        let workout =
            compose(&catalog.exercises, &ComposeRequest::new(30), &mut rng(7)).unwrap();

        assert_eq!(
            workout.estimated_duration_minutes,
            to_minutes(workout.total_seconds())
        );
    }

    #[test]
    fn test_shortest_configuration_wins_for_tiny_target() {
        // 3 exercises of 40s x 1 round is the shortest possible workout
        let catalog: Vec<Exercise> = (1..=6)
            .map(|id| plain(id, MovementType::Twist, &[MuscleGroup::Obliques]))
            .collect();
        let workout = compose(&catalog, &ComposeRequest::new(1), &mut rng(3)).unwrap();

        assert_eq!(workout.exercises.len(), 3);
        assert_eq!(workout.rounds, 1);
        assert_eq!(workout.total_seconds(), 300 + 3 * 70);
    }

    #[test]
    fn test_exact_match_is_found() {
        // With 40s exercises only 4 x 3 rounds lands on 22 minutes:
        // 300 + 3 * 4 * 70 + 2 * 90 = 1320
        let catalog: Vec<Exercise> = (1..=5)
            .map(|id| plain(id, MovementType::Twist, &[MuscleGroup::Obliques]))
            .collect();

        for seed in 0..5 {
            let workout = compose(&catalog, &ComposeRequest::new(22), &mut rng(seed)).unwrap();
            assert_eq!(workout.total_seconds(), 1320);
            assert_eq!(workout.exercises.len(), 4);
            assert_eq!(workout.rounds, 3);
            assert_eq!(workout.estimated_duration_minutes, 22);
        }
    }

    #[test]
    fn test_plane_requirement_capped_at_available() {
        // Only one plane exercise exists, so a 30-minute workout needs just one
        let mut catalog: Vec<Exercise> = (1..=8)
            .map(|id| plain(id, MovementType::Push, &[MuscleGroup::Chest]))
            .collect();
        catalog.push(plain(99, MovementType::Twist, &[MuscleGroup::Obliques]));

        let workout = compose(&catalog, &ComposeRequest::new(30), &mut rng(5)).unwrap();
        assert!(workout.exercises.iter().any(|e| e.id == 99));
    }

    #[test]
    fn test_no_plane_exercises_means_no_requirement() {
        let catalog: Vec<Exercise> = (1..=5)
            .map(|id| plain(id, MovementType::Push, &[MuscleGroup::Chest]))
            .collect();
        assert!(compose(&catalog, &ComposeRequest::new(30), &mut rng(5)).is_ok());
    }

    #[test]
    fn test_catalog_smaller_than_workout_is_infeasible() {
        let catalog = vec![
            plain(1, MovementType::Twist, &[MuscleGroup::Obliques]),
            plain(2, MovementType::Push, &[MuscleGroup::Chest]),
        ];
        let result = compose(&catalog, &ComposeRequest::new(20), &mut rng(5));
        assert!(matches!(
            result,
            Err(Error::InfeasibleConstraints { target_minutes: 20, .. })
        ));
    }

    #[test]
    fn test_huge_durations_do_not_overflow() {
        let catalog: Vec<Exercise> = (1..=4)
            .map(|id| Exercise {
                estimated_duration: 2_000_000_000,
                ..plain(id, MovementType::Twist, &[MuscleGroup::Obliques])
            })
            .collect();

        let workout = compose(&catalog, &ComposeRequest::new(30), &mut rng(2)).unwrap();
        assert_eq!(workout.total_seconds(), u32::MAX);
        assert_eq!(workout.exercises.len(), 3);
        assert_eq!(workout.rounds, 1);
    }

    #[test]
    fn test_duplicate_names_are_collapsed() {
        let mut catalog: Vec<Exercise> = (1..=4)
            .map(|id| plain(id, MovementType::Twist, &[MuscleGroup::Obliques]))
            .collect();
        for id in 10..20 {
            let mut copy = catalog[0].clone();
            copy.id = id;
            catalog.push(copy);
        }

        for seed in 0..10 {
            let workout = compose(&catalog, &ComposeRequest::new(40), &mut rng(seed)).unwrap();
            assert!(workout.exercises.len() <= 4);
            assert!(workout.exercises.iter().all(|e| e.id < 10));
        }
    }

    #[test]
    fn test_filters_are_applied() {
        let catalog = build_default_catalog();
        let filters = ExerciseFilters {
            equipment: ["kettlebell".to_string()].into_iter().collect(),
            intensity_level: 4,
            ..ExerciseFilters::default()
        };
        let request = ComposeRequest::new(30).with_filters(filters);

        for seed in 0..10 {
            let workout = compose(&catalog.exercises, &request, &mut rng(seed)).unwrap();
            for exercise in &workout.exercises {
                assert!(exercise.equipment.contains("kettlebell"), "{}", exercise.name);
                assert_ne!(exercise.intensity, Intensity::Low);
            }
        }
    }

    #[test]
    fn test_sample_avoids_similar_neighbours_when_possible() {
        // Alternating push/pull with disjoint muscles: a dissimilar choice
        // always exists until the last pick.
        let mut catalog = Vec::new();
        for id in 0..5 {
            catalog.push(plain(id, MovementType::Push, &[MuscleGroup::Chest]));
            catalog.push(plain(100 + id, MovementType::Pull, &[MuscleGroup::Lats]));
        }
        let pool: Vec<&Exercise> = catalog.iter().collect();

        for seed in 0..20 {
            let sample = sample_ordered(&pool, 4, &mut rng(seed)).unwrap();
            for pair in sample.windows(2) {
                assert!(!are_similar(pair[0], pair[1]));
            }
        }
    }

    #[test]
    fn test_sample_too_large_is_none() {
        let catalog = build_default_catalog();
        let pool: Vec<&Exercise> = catalog.exercises.iter().take(3).collect();
        assert!(sample_ordered(&pool, 4, &mut rng(0)).is_none());
    }

    #[test]
    fn test_enforce_plane_count_swaps_in_unused() {
        let catalog = vec![
            plain(1, MovementType::Push, &[MuscleGroup::Chest]),
            plain(2, MovementType::Pull, &[MuscleGroup::Lats]),
            plain(3, MovementType::Squat, &[MuscleGroup::Quads]),
            plain(4, MovementType::Twist, &[MuscleGroup::Obliques]),
            plain(5, MovementType::Hinge, &[MuscleGroup::Adductors]),
        ];
        let pool: Vec<&Exercise> = catalog.iter().collect();
        let mut sample: Vec<&Exercise> = pool[..3].to_vec();

        assert!(enforce_plane_count(&mut sample, &pool, 2, &mut rng(9)));
        let ids: HashSet<u32> = sample.iter().map(|e| e.id).collect();
        assert_eq!(sample.len(), 3);
        assert!(ids.contains(&4) && ids.contains(&5));
    }

    #[test]
    fn test_enforce_plane_count_fails_without_spares() {
        let catalog = vec![
            plain(1, MovementType::Push, &[MuscleGroup::Chest]),
            plain(2, MovementType::Pull, &[MuscleGroup::Lats]),
            plain(3, MovementType::Twist, &[MuscleGroup::Obliques]),
        ];
        let pool: Vec<&Exercise> = catalog.iter().collect();
        let mut sample: Vec<&Exercise> = pool.clone();

        assert!(!enforce_plane_count(&mut sample, &pool, 2, &mut rng(9)));
    }

    #[test]
    fn test_required_plane_count() {
        assert_eq!(required_plane_count(10), 1);
        assert_eq!(required_plane_count(20), 1);
        assert_eq!(required_plane_count(21), 2);
    }

    #[test]
    fn test_same_seed_same_workout() {
        let catalog = build_default_catalog();
        let request = ComposeRequest::new(35);
        let a = compose(&catalog.exercises, &request, &mut rng(42)).unwrap();
        let b = compose(&catalog.exercises, &request, &mut rng(42)).unwrap();
        assert_eq!(a.exercise_ids(), b.exercise_ids());
        assert_eq!(a.rounds, b.rounds);
    }
}
