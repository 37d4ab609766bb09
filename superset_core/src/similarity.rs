//! Pairwise similarity and movement-plane classification.
//!
//! Two exercises are "similar" when doing them back to back would hit the
//! same pattern or mostly the same muscles. The composer uses this to keep
//! neighbours in a superset apart, and the swapper to pick a replacement
//! that fits between its neighbours.

use crate::{Exercise, MovementType, MuscleGroup};

/// Jaccard ratio above which two muscle-group sets count as overlapping
pub const MUSCLE_OVERLAP_THRESHOLD: f64 = 0.5;

/// Muscle groups trained by lateral or rotational work
pub const PLANE_MUSCLE_GROUPS: [MuscleGroup; 3] = [
    MuscleGroup::SideDeltoids,
    MuscleGroup::Adductors,
    MuscleGroup::Abductors,
];

/// |a ∩ b| / |a ∪ b| of the two exercises' muscle groups, 0.0 when both are empty
pub fn muscle_overlap_ratio(a: &Exercise, b: &Exercise) -> f64 {
    let union = a.muscle_groups.union(&b.muscle_groups).count();
    if union == 0 {
        return 0.0;
    }
    let shared = a.muscle_groups.intersection(&b.muscle_groups).count();
    shared as f64 / union as f64
}

/// Whether two exercises share a movement type or most of their muscle groups
pub fn are_similar(a: &Exercise, b: &Exercise) -> bool {
    let shares_movement = a
        .movement_types
        .iter()
        .any(|m| b.movement_types.contains(m));

    shares_movement || muscle_overlap_ratio(a, b) > MUSCLE_OVERLAP_THRESHOLD
}

/// Whether an exercise works the frontal or transverse plane
pub fn is_plane_exercise(exercise: &Exercise) -> bool {
    exercise.movement_types.contains(&MovementType::Twist)
        || PLANE_MUSCLE_GROUPS
            .iter()
            .any(|g| exercise.muscle_groups.contains(g))
}
