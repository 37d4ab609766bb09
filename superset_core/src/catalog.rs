//! Exercise catalog: the collaborator interface and the built-in catalog.
//!
//! The composer never talks to storage. Callers fetch a full snapshot through
//! a [`CatalogSource`] for every call and hand the exercises over.

use crate::types::*;
use crate::{Error, Result};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Supplies the complete list of known exercises
pub trait CatalogSource {
    /// Fetch a fresh snapshot of every exercise
    fn load_exercises(&self) -> Result<Vec<Exercise>>;
}

impl CatalogSource for Catalog {
    fn load_exercises(&self) -> Result<Vec<Exercise>> {
        Ok(self.exercises.clone())
    }
}

/// A catalog stored as a JSON array of exercises, re-read on every fetch
#[derive(Clone, Debug)]
pub struct JsonCatalogFile {
    path: PathBuf,
}

impl JsonCatalogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for JsonCatalogFile {
    fn load_exercises(&self) -> Result<Vec<Exercise>> {
        let contents = std::fs::read_to_string(&self.path)?;
        let exercises: Vec<Exercise> = serde_json::from_str(&contents)?;
        tracing::info!(
            "Loaded {} exercises from {:?}",
            exercises.len(),
            self.path
        );
        Ok(exercises)
    }
}

/// Keep the first exercise of every name, preserving catalog order
pub fn dedup_by_name(exercises: &[Exercise]) -> Vec<&Exercise> {
    let mut seen = HashSet::new();
    exercises
        .iter()
        .filter(|e| seen.insert(e.name.as_str()))
        .collect()
}

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog_internal);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default kettlebell/dumbbell/bodyweight catalog
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns a
/// cached reference. This function is retained for testing and custom catalog creation.
pub fn build_default_catalog() -> Catalog {
    build_default_catalog_internal()
}

#[allow(clippy::too_many_arguments)]
fn exercise(
    id: u32,
    name: &str,
    description: &str,
    movement_types: &[MovementType],
    estimated_duration: u32,
    equipment: &[&str],
    muscle_groups: &[MuscleGroup],
    intensity: Intensity,
) -> Exercise {
    Exercise {
        id,
        name: name.into(),
        description: Some(description.into()),
        movement_types: movement_types.to_vec(),
        muscle_groups: muscle_groups.iter().copied().collect(),
        equipment: equipment.iter().map(|e| e.to_string()).collect(),
        estimated_duration,
        intensity,
    }
}

/// Internal function that actually builds the catalog
fn build_default_catalog_internal() -> Catalog {
    use MovementType as Mt;
    use MuscleGroup as Mg;

    let exercises = vec![
        exercise(
            1,
            "Two-handed Kettlebell Swing",
            "A dynamic hip hinge movement that builds explosive power and posterior chain strength",
            &[Mt::Hinge],
            45,
            &["kettlebell"],
            &[Mg::Hamstrings, Mg::Glutes, Mg::LowerBack, Mg::Abs],
            Intensity::High,
        ),
        exercise(
            2,
            "Pushup",
            "A fundamental bodyweight exercise that builds upper body pushing strength",
            &[Mt::Push],
            30,
            &[],
            &[Mg::Chest, Mg::FrontDeltoids, Mg::Triceps, Mg::Abs],
            Intensity::Medium,
        ),
        exercise(
            3,
            "Single Leg Romanian Deadlift",
            "A unilateral hip hinge movement that improves balance and posterior chain strength",
            &[Mt::Hinge],
            40,
            &["kettlebell", "dumbbell"],
            &[Mg::Hamstrings, Mg::Glutes, Mg::LowerBack, Mg::Abs],
            Intensity::Medium,
        ),
        exercise(
            4,
            "Landmine Twist",
            "A rotational core exercise that builds anti-rotation strength",
            &[Mt::Twist],
            35,
            &["dumbbell"],
            &[Mg::Obliques, Mg::Abs, Mg::SideDeltoids],
            Intensity::Medium,
        ),
        exercise(
            5,
            "Suitcase Deadlift",
            "A unilateral deadlift variation that builds core stability and hip strength",
            &[Mt::Hinge],
            40,
            &["kettlebell"],
            &[Mg::Hamstrings, Mg::Glutes, Mg::LowerBack, Mg::Abs, Mg::Forearms],
            Intensity::Medium,
        ),
        exercise(
            6,
            "Suitcase Lunge",
            "A unilateral lower body exercise that builds leg strength and core stability",
            &[Mt::Squat],
            40,
            &["kettlebell", "dumbbell"],
            &[Mg::Quads, Mg::Glutes, Mg::Abs, Mg::Forearms],
            Intensity::Medium,
        ),
        exercise(
            7,
            "Goblet Squat",
            "A front-loaded squat variation that builds leg strength and core stability",
            &[Mt::Squat],
            45,
            &["kettlebell"],
            &[Mg::Quads, Mg::Glutes, Mg::Abs, Mg::Forearms],
            Intensity::Medium,
        ),
        exercise(
            8,
            "Goblet Lunge",
            "A unilateral squat variation with front loading for added core challenge",
            &[Mt::Squat],
            40,
            &["kettlebell"],
            &[Mg::Quads, Mg::Glutes, Mg::Abs, Mg::Forearms],
            Intensity::Medium,
        ),
        exercise(
            9,
            "Gunslinger",
            "A dynamic kettlebell exercise combining a clean and press with a squat",
            &[Mt::Push, Mt::Squat],
            50,
            &["kettlebell"],
            &[Mg::Quads, Mg::Glutes, Mg::FrontDeltoids, Mg::Triceps, Mg::Abs],
            Intensity::High,
        ),
        exercise(
            10,
            "Renegade Rows",
            "A compound exercise combining a pushup with a row",
            &[Mt::Push, Mt::Pull],
            45,
            &["dumbbell"],
            &[Mg::Chest, Mg::FrontDeltoids, Mg::Triceps, Mg::Lats, Mg::Biceps, Mg::Abs],
            Intensity::High,
        ),
        exercise(
            11,
            "Kettlebell Side Bend",
            "Stand with feet shoulder-width apart, holding a kettlebell in one hand. Bend sideways at the waist, keeping the back straight. Return to starting position. Complete all reps on one side before switching.",
            &[Mt::Twist],
            45,
            &["kettlebell"],
            &[Mg::Abs, Mg::Obliques],
            Intensity::Low,
        ),
        exercise(
            12,
            "Standing Dumbbell Wood Chops",
            "Stand with feet shoulder-width apart, holding a dumbbell with both hands. Start with the weight at one hip, then swing it diagonally across the body to the opposite shoulder, rotating the torso. Return to starting position.",
            &[Mt::Twist],
            45,
            &["dumbbell"],
            &[Mg::Abs, Mg::Obliques, Mg::FrontDeltoids],
            Intensity::Medium,
        ),
        exercise(
            13,
            "Standing Overhead Press",
            "Stand with feet shoulder-width apart, holding weights at shoulder height. Press the weights overhead until arms are fully extended, then lower back to starting position.",
            &[Mt::Push],
            45,
            &["kettlebell", "dumbbell"],
            &[Mg::FrontDeltoids, Mg::Triceps],
            Intensity::Medium,
        ),
        exercise(
            14,
            "Mountain Climbers",
            "Start in a plank position. Alternately bring knees toward chest in a running motion, keeping hips low and core engaged.",
            &[Mt::Core],
            45,
            &[],
            &[Mg::Abs, Mg::FrontDeltoids],
            Intensity::High,
        ),
        exercise(
            15,
            "Bent-Over Kettlebell Row (Two Hand)",
            "Stand with feet shoulder-width apart, holding a kettlebell with both hands. Hinge at hips, keeping back straight. Pull the kettlebell to the chest, then lower with control.",
            &[Mt::Pull, Mt::Hinge],
            45,
            &["kettlebell"],
            &[Mg::UpperBack, Mg::Lats, Mg::Biceps],
            Intensity::Medium,
        ),
        exercise(
            16,
            "Bent-Over Kettlebell Row (One Hand)",
            "Stand with feet staggered, holding a kettlebell in one hand. Hinge at hips, keeping back straight. Pull the kettlebell to the chest, then lower with control.",
            &[Mt::Pull, Mt::Hinge],
            45,
            &["kettlebell"],
            &[Mg::UpperBack, Mg::Lats, Mg::Biceps],
            Intensity::Medium,
        ),
        exercise(
            17,
            "Kettlebell High Pull",
            "Stand with feet shoulder-width apart, holding a kettlebell between legs. Explosively pull the kettlebell up to chest height, keeping elbows high. Lower with control.",
            &[Mt::Pull, Mt::Hinge],
            45,
            &["kettlebell"],
            &[Mg::UpperBack, Mg::Lats, Mg::FrontDeltoids],
            Intensity::High,
        ),
        exercise(
            18,
            "Plank Pull-Through",
            "Start in a plank position with a weight beside you. Reach under with one hand to grab the weight, pull it across to the other side, then repeat in the opposite direction.",
            &[Mt::Core],
            45,
            &["kettlebell", "dumbbell"],
            &[Mg::Abs, Mg::FrontDeltoids],
            Intensity::Medium,
        ),
        exercise(
            19,
            "Side Plank Underarm Twist",
            "Start in a side plank position. Rotate the top arm under the body, then back to starting position. Complete all reps on one side before switching.",
            &[Mt::Core, Mt::Twist],
            45,
            &[],
            &[Mg::Abs, Mg::Obliques, Mg::FrontDeltoids],
            Intensity::Medium,
        ),
        exercise(
            20,
            "Kneeling Dumbbell Straight Arm Chop",
            "Kneel on one knee, holding a dumbbell with both hands. Start with arms extended overhead, then chop diagonally across the body, rotating the torso.",
            &[Mt::Twist],
            45,
            &["dumbbell"],
            &[Mg::Abs, Mg::Obliques, Mg::FrontDeltoids],
            Intensity::Medium,
        ),
        exercise(
            21,
            "Racked Kettlebell Squat",
            "Hold kettlebells in the rack position (at shoulder height). Perform a squat, keeping chest up and core engaged. Return to standing position.",
            &[Mt::Squat],
            45,
            &["kettlebell"],
            &[Mg::Quads, Mg::Glutes, Mg::Abs, Mg::LowerBack],
            Intensity::Medium,
        ),
        exercise(
            22,
            "Deadbugs",
            "A core stability exercise performed lying on your back, optionally holding a dumbbell or kettlebell in each hand.",
            &[Mt::Core],
            40,
            &["dumbbell", "kettlebell"],
            &[Mg::Abs, Mg::Obliques],
            Intensity::Low,
        ),
        exercise(
            23,
            "Curtsy Goblet Lunge",
            "A lunge variation where you step one leg behind and across the other, holding a kettlebell at your chest.",
            &[Mt::Squat],
            40,
            &["kettlebell"],
            &[Mg::Quads, Mg::Glutes, Mg::Abs],
            Intensity::Medium,
        ),
        exercise(
            24,
            "Kickstand Single Arm Deadlift",
            "A unilateral hinge movement with a kettlebell, using a kickstand stance for balance.",
            &[Mt::Hinge],
            40,
            &["kettlebell"],
            &[Mg::Hamstrings, Mg::Glutes, Mg::LowerBack, Mg::Forearms],
            Intensity::Medium,
        ),
        exercise(
            25,
            "Pull-ups",
            "A vertical pulling exercise performed on stall bars.",
            &[Mt::Pull],
            30,
            &["stall bars"],
            &[Mg::Lats, Mg::Biceps, Mg::UpperBack],
            Intensity::Medium,
        ),
        exercise(
            26,
            "Tricep Dips",
            "A bodyweight pushing exercise performed on stall bars to target the triceps.",
            &[Mt::Push],
            30,
            &["stall bars"],
            &[Mg::Triceps, Mg::Chest, Mg::FrontDeltoids],
            Intensity::Medium,
        ),
        exercise(
            27,
            "Bicep Curls",
            "A classic arm exercise performed with dumbbells or kettlebells.",
            &[Mt::Pull],
            30,
            &["dumbbell", "kettlebell"],
            &[Mg::Biceps, Mg::Forearms],
            Intensity::Low,
        ),
        exercise(
            28,
            "Hip Bridges",
            "A glute and hamstring exercise performed on the floor, optionally with a dumbbell for added resistance.",
            &[Mt::Hinge],
            35,
            &["dumbbell"],
            &[Mg::Glutes, Mg::Hamstrings, Mg::LowerBack],
            Intensity::Low,
        ),
        exercise(
            29,
            "Reverse Goblet Lunge",
            "A lunge variation stepping backward, holding a kettlebell at your chest.",
            &[Mt::Squat],
            40,
            &["kettlebell"],
            &[Mg::Quads, Mg::Glutes, Mg::Abs],
            Intensity::Medium,
        ),
        exercise(
            30,
            "Overhead March",
            "March in place while holding a kettlebell or dumbbell overhead, engaging the core and shoulders.",
            &[Mt::Core],
            35,
            &["kettlebell", "dumbbell"],
            &[Mg::Abs, Mg::FrontDeltoids, Mg::Obliques],
            Intensity::Low,
        ),
        exercise(
            31,
            "Squat Thruster with a Twist",
            "A full-body movement: squat holding a dumbbell, then press overhead and rotate the torso at the top.",
            &[Mt::Squat, Mt::Push, Mt::Twist],
            45,
            &["dumbbell"],
            &[Mg::Quads, Mg::Glutes, Mg::Abs, Mg::Obliques, Mg::FrontDeltoids, Mg::Triceps],
            Intensity::High,
        ),
    ];

    Catalog { exercises }
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn find(&self, id: u32) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut ids = HashSet::new();

        for exercise in &self.exercises {
            if !ids.insert(exercise.id) {
                errors.push(format!("Duplicate exercise id {}", exercise.id));
            }
            if exercise.name.trim().is_empty() {
                errors.push(format!("Exercise {} has empty name", exercise.id));
            }
            if exercise.estimated_duration == 0 {
                errors.push(format!(
                    "Exercise '{}' has zero estimated duration",
                    exercise.name
                ));
            }
            if exercise.movement_types.is_empty() {
                errors.push(format!("Exercise '{}' has no movement types", exercise.name));
            }
        }

        errors
    }

    /// Fail with [`Error::CatalogValidation`] listing every problem found
    pub fn ensure_valid(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::CatalogValidation(errors.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::is_plane_exercise;

    #[test]
    fn test_catalog_loads() {
        let catalog = build_default_catalog();
        assert_eq!(catalog.len(), 31);
        assert!(catalog.find(4).is_some_and(|e| e.name == "Landmine Twist"));
    }

    #[test]
    fn test_default_catalog_validates() {
        let catalog = build_default_catalog();
        let errors = catalog.validate();
        assert!(
            errors.is_empty(),
            "Default catalog has validation errors: {:?}",
            errors
        );
    }

    #[test]
    fn test_default_catalog_has_plane_exercises() {
        let plane = get_default_catalog()
            .exercises
            .iter()
            .filter(|e| is_plane_exercise(e))
            .count();
        assert!(plane >= 2, "Should have at least 2 plane exercises");
    }

    #[test]
    fn test_validate_reports_problems() {
        let mut catalog = build_default_catalog();
        let mut copy = catalog.exercises[0].clone();
        copy.estimated_duration = 0;
        copy.movement_types.clear();
        catalog.exercises.push(copy);

        let errors = catalog.validate();
        assert_eq!(errors.len(), 3, "{:?}", errors);
        assert!(catalog.ensure_valid().is_err());
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let mut catalog = build_default_catalog();
        let mut duplicate = catalog.exercises[1].clone();
        duplicate.id = 500;
        catalog.exercises.push(duplicate);

        let unique = dedup_by_name(&catalog.exercises);
        assert_eq!(unique.len(), 31);
        assert!(unique.iter().all(|e| e.id != 500));
    }

    #[test]
    fn test_json_catalog_file_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("catalog.json");
        let catalog = build_default_catalog();
        std::fs::write(&path, serde_json::to_string(&catalog).unwrap()).unwrap();

        let source = JsonCatalogFile::new(&path);
        let loaded = source.load_exercises().unwrap();
        assert_eq!(loaded, catalog.exercises);
    }

    #[test]
    fn test_json_catalog_file_missing_is_io_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = JsonCatalogFile::new(temp_dir.path().join("nope.json"));
        assert!(matches!(source.load_exercises(), Err(Error::Io(_))));
    }
}
