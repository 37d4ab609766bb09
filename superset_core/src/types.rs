//! Core domain types for the superset workout composer.
//!
//! This module defines the fundamental types used throughout the system:
//! - Movement types, muscle groups and intensity bands
//! - Exercises and the catalog snapshot they come from
//! - Composition and swap requests
//! - The composed workout

use crate::Error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Tags
// ============================================================================

/// Biomechanical pattern of an exercise
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    Push,
    Pull,
    Hinge,
    Squat,
    Twist,
    Core,
}

impl MovementType {
    pub const ALL: [MovementType; 6] = [
        MovementType::Push,
        MovementType::Pull,
        MovementType::Hinge,
        MovementType::Squat,
        MovementType::Twist,
        MovementType::Core,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::Push => "push",
            MovementType::Pull => "pull",
            MovementType::Hinge => "hinge",
            MovementType::Squat => "squat",
            MovementType::Twist => "twist",
            MovementType::Core => "core",
        }
    }
}

/// Targeted muscle region
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    // Upper body
    Chest,
    FrontDeltoids,
    SideDeltoids,
    RearDeltoids,
    Biceps,
    Triceps,
    Forearms,
    UpperBack,
    Lats,

    // Core
    Abs,
    Obliques,
    LowerBack,

    // Lower body
    Quads,
    Hamstrings,
    Glutes,
    Calves,
    Adductors,
    Abductors,
}

impl MuscleGroup {
    pub const ALL: [MuscleGroup; 18] = [
        MuscleGroup::Chest,
        MuscleGroup::FrontDeltoids,
        MuscleGroup::SideDeltoids,
        MuscleGroup::RearDeltoids,
        MuscleGroup::Biceps,
        MuscleGroup::Triceps,
        MuscleGroup::Forearms,
        MuscleGroup::UpperBack,
        MuscleGroup::Lats,
        MuscleGroup::Abs,
        MuscleGroup::Obliques,
        MuscleGroup::LowerBack,
        MuscleGroup::Quads,
        MuscleGroup::Hamstrings,
        MuscleGroup::Glutes,
        MuscleGroup::Calves,
        MuscleGroup::Adductors,
        MuscleGroup::Abductors,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MuscleGroup::Chest => "chest",
            MuscleGroup::FrontDeltoids => "front_deltoids",
            MuscleGroup::SideDeltoids => "side_deltoids",
            MuscleGroup::RearDeltoids => "rear_deltoids",
            MuscleGroup::Biceps => "biceps",
            MuscleGroup::Triceps => "triceps",
            MuscleGroup::Forearms => "forearms",
            MuscleGroup::UpperBack => "upper_back",
            MuscleGroup::Lats => "lats",
            MuscleGroup::Abs => "abs",
            MuscleGroup::Obliques => "obliques",
            MuscleGroup::LowerBack => "lower_back",
            MuscleGroup::Quads => "quads",
            MuscleGroup::Hamstrings => "hamstrings",
            MuscleGroup::Glutes => "glutes",
            MuscleGroup::Calves => "calves",
            MuscleGroup::Adductors => "adductors",
            MuscleGroup::Abductors => "abductors",
        }
    }
}

/// Coarse effort classification of an exercise
#[derive(
    Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Low,
    #[default]
    Medium,
    High,
}

impl Intensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Low => "low",
            Intensity::Medium => "medium",
            Intensity::High => "high",
        }
    }
}

macro_rules! impl_tag_parsing {
    ($ty:ty, $label:literal, $variants:expr) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_lowercase().replace(['-', ' '], "_");
                $variants
                    .into_iter()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| Error::Config(format!("Unknown {}: {}", $label, s)))
            }
        }
    };
}

impl_tag_parsing!(MovementType, "movement type", MovementType::ALL);
impl_tag_parsing!(MuscleGroup, "muscle group", MuscleGroup::ALL);
impl_tag_parsing!(
    Intensity,
    "intensity",
    [Intensity::Low, Intensity::Medium, Intensity::High]
);

// ============================================================================
// Exercise and Catalog
// ============================================================================

/// A single exercise as supplied by the catalog
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub movement_types: Vec<MovementType>,
    pub muscle_groups: BTreeSet<MuscleGroup>,
    #[serde(default)]
    pub equipment: BTreeSet<String>,
    /// Seconds per set
    pub estimated_duration: u32,
    #[serde(default)]
    pub intensity: Intensity,
}

/// A read-only snapshot of every known exercise
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    pub exercises: Vec<Exercise>,
}

// ============================================================================
// Requests
// ============================================================================

/// Categorical filters shared by composition and swapping
///
/// Empty sets mean "no restriction".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExerciseFilters {
    pub muscle_groups: BTreeSet<MuscleGroup>,
    pub equipment: BTreeSet<String>,
    /// 1 (easiest) to 5 (hardest)
    pub intensity_level: u8,
}

impl Default for ExerciseFilters {
    fn default() -> Self {
        Self {
            muscle_groups: BTreeSet::new(),
            equipment: BTreeSet::new(),
            intensity_level: DEFAULT_INTENSITY_LEVEL,
        }
    }
}

pub const DEFAULT_INTENSITY_LEVEL: u8 = 3;

/// Parameters for composing a workout
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposeRequest {
    pub target_minutes: u32,
    pub filters: ExerciseFilters,
}

impl ComposeRequest {
    pub fn new(target_minutes: u32) -> Self {
        Self {
            target_minutes,
            filters: ExerciseFilters::default(),
        }
    }

    pub fn with_filters(mut self, filters: ExerciseFilters) -> Self {
        self.filters = filters;
        self
    }
}

/// Parameters for replacing one exercise of an existing workout
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapRequest {
    /// Exercise ids of the current workout, in order
    pub current_ids: Vec<u32>,
    pub swap_out_id: u32,
    pub filters: ExerciseFilters,
}

impl SwapRequest {
    pub fn new(current_ids: Vec<u32>, swap_out_id: u32) -> Self {
        Self {
            current_ids,
            swap_out_id,
            filters: ExerciseFilters::default(),
        }
    }

    pub fn with_filters(mut self, filters: ExerciseFilters) -> Self {
        self.filters = filters;
        self
    }
}

// ============================================================================
// Workout
// ============================================================================

/// A composed workout: an ordered superset repeated for a number of rounds
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Workout {
    pub exercises: Vec<Exercise>,
    pub rounds: u32,
    pub estimated_duration_minutes: u32,
}

impl Workout {
    /// Total estimated time including warm-up and rests
    pub fn total_seconds(&self) -> u32 {
        crate::duration::estimate_seconds(&self.exercises, self.rounds)
    }

    /// Ids of the exercises in workout order
    pub fn exercise_ids(&self) -> Vec<u32> {
        self.exercises.iter().map(|e| e.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muscle_group_parses_snake_and_dashed_names() {
        assert_eq!(
            "side_deltoids".parse::<MuscleGroup>().unwrap(),
            MuscleGroup::SideDeltoids
        );
        assert_eq!(
            "Lower-Back".parse::<MuscleGroup>().unwrap(),
            MuscleGroup::LowerBack
        );
        assert!("elbows".parse::<MuscleGroup>().is_err());
    }

    #[test]
    fn test_display_matches_serde_name() {
        for group in MuscleGroup::ALL {
            let json = serde_json::to_string(&group).unwrap();
            assert_eq!(json, format!("\"{}\"", group));
        }
        for movement in MovementType::ALL {
            let json = serde_json::to_string(&movement).unwrap();
            assert_eq!(json, format!("\"{}\"", movement));
        }
    }

    #[test]
    fn test_exercise_defaults_when_fields_missing() {
        let json = r#"{
            "id": 7,
            "name": "Pushup",
            "movement_types": ["push"],
            "muscle_groups": ["chest", "triceps"],
            "estimated_duration": 30
        }"#;
        let exercise: Exercise = serde_json::from_str(json).unwrap();

        assert_eq!(exercise.intensity, Intensity::Medium);
        assert!(exercise.equipment.is_empty());
        assert!(exercise.description.is_none());
    }

    #[test]
    fn test_compose_request_defaults_to_medium_level() {
        let request = ComposeRequest::new(30);
        assert_eq!(request.filters.intensity_level, 3);
        assert!(request.filters.muscle_groups.is_empty());
        assert!(request.filters.equipment.is_empty());
    }
}
