//! Catalog filter pipeline.
//!
//! Filters run in three stages (muscle groups, equipment, intensity). A
//! stage that would remove every exercise is skipped. When the stages
//! together still leave too few exercises for a workout, the pipeline falls
//! back through an ordered list of looser strategies:
//!
//! 1. **Strict**: exercise muscle groups ⊆ allowed, any allowed equipment
//! 2. **Relaxed**: any allowed muscle group, any allowed equipment
//! 3. **Unfiltered**: the whole (deduplicated) catalog

use crate::{Exercise, ExerciseFilters, Intensity};

/// Fewest exercises a workout can be built from
pub const MIN_POOL_SIZE: usize = 3;

/// How strictly the categorical filters are applied
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterStrategy {
    Strict,
    Relaxed,
    Unfiltered,
}

impl FilterStrategy {
    /// Fallback order tried by [`filter_catalog`]
    pub const CHAIN: [FilterStrategy; 3] = [
        FilterStrategy::Strict,
        FilterStrategy::Relaxed,
        FilterStrategy::Unfiltered,
    ];
}

/// Result of running the pipeline
#[derive(Clone, Debug)]
pub struct FilterOutcome<'a> {
    pub exercises: Vec<&'a Exercise>,
    pub strategy: FilterStrategy,
}

/// Intensity bands selected by a 1-5 intensity level
///
/// Unknown levels fall back to medium.
pub fn allowed_intensities(level: u8) -> &'static [Intensity] {
    match level {
        1 => &[Intensity::Low],
        2 => &[Intensity::Low, Intensity::Medium],
        3 => &[Intensity::Medium],
        4 => &[Intensity::Medium, Intensity::High],
        5 => &[Intensity::High],
        other => {
            tracing::debug!("Unknown intensity level {}, using medium", other);
            &[Intensity::Medium]
        }
    }
}

/// Run the pipeline with fallback, returning at least [`MIN_POOL_SIZE`]
/// exercises whenever the input has that many
///
/// `catalog` is expected to be deduplicated by name already.
pub fn filter_catalog<'a>(
    catalog: &[&'a Exercise],
    filters: &ExerciseFilters,
) -> FilterOutcome<'a> {
    let mut last = None;

    for strategy in FilterStrategy::CHAIN {
        let exercises = apply_filters(catalog, filters, strategy);
        if exercises.len() >= MIN_POOL_SIZE {
            if strategy != FilterStrategy::Strict {
                tracing::warn!(
                    "Filters too narrow, fell back to {:?} selection ({} exercises)",
                    strategy,
                    exercises.len()
                );
            }
            return FilterOutcome {
                exercises,
                strategy,
            };
        }
        tracing::debug!(
            "{:?} filtering left {} exercises, trying next strategy",
            strategy,
            exercises.len()
        );
        last = Some(FilterOutcome {
            exercises,
            strategy,
        });
    }

    // Catalog itself is smaller than a workout
    last.unwrap_or(FilterOutcome {
        exercises: catalog.to_vec(),
        strategy: FilterStrategy::Unfiltered,
    })
}

/// Apply the three stages under one strategy, skipping any stage that would
/// empty the pool
pub fn apply_filters<'a>(
    catalog: &[&'a Exercise],
    filters: &ExerciseFilters,
    strategy: FilterStrategy,
) -> Vec<&'a Exercise> {
    let mut pool = catalog.to_vec();
    if strategy == FilterStrategy::Unfiltered {
        return pool;
    }

    if !filters.muscle_groups.is_empty() {
        let allowed = &filters.muscle_groups;
        pool = apply_stage(pool, "muscle group", |e| match strategy {
            FilterStrategy::Strict => e.muscle_groups.is_subset(allowed),
            _ => !e.muscle_groups.is_disjoint(allowed),
        });
    }

    if !filters.equipment.is_empty() {
        let allowed = &filters.equipment;
        pool = apply_stage(pool, "equipment", |e| !e.equipment.is_disjoint(allowed));
    }

    let bands = allowed_intensities(filters.intensity_level);
    apply_stage(pool, "intensity", |e| bands.contains(&e.intensity))
}

fn apply_stage<'a, F>(pool: Vec<&'a Exercise>, stage: &str, keep: F) -> Vec<&'a Exercise>
where
    F: Fn(&Exercise) -> bool,
{
    let kept: Vec<&Exercise> = pool.iter().copied().filter(|e| keep(*e)).collect();
    if kept.is_empty() {
        tracing::debug!("Skipping {} filter: no exercise would remain", stage);
        pool
    } else {
        kept
    }
}
