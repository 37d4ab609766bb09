//! Single-exercise replacement within a composed workout.

use crate::catalog::dedup_by_name;
use crate::filter::{apply_filters, FilterStrategy};
use crate::similarity::are_similar;
use crate::{Error, Exercise, Result, SwapRequest};
use rand::seq::SliceRandom;
use rand::Rng;

/// How the replacement pool is narrowed, in the order they are tried
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PoolStrategy {
    /// Not similar to either neighbour of the swapped-out exercise
    NeighbourDissimilar,
    /// Anything not already in the workout
    Any,
}

const POOL_STRATEGIES: [PoolStrategy; 2] =
    [PoolStrategy::NeighbourDissimilar, PoolStrategy::Any];

/// Pick a replacement for `request.swap_out_id`
///
/// The replacement passes the request filters, is not already part of the
/// workout, and where possible is dissimilar to the exercises on either side
/// of the one being replaced.
pub fn swap<R>(catalog: &[Exercise], request: &SwapRequest, rng: &mut R) -> Result<Exercise>
where
    R: Rng + ?Sized,
{
    let unique = dedup_by_name(catalog);
    let filtered = apply_filters(&unique, &request.filters, FilterStrategy::Strict);
    let candidates: Vec<&Exercise> = filtered
        .into_iter()
        .filter(|e| !request.current_ids.contains(&e.id))
        .collect();

    let position = request
        .current_ids
        .iter()
        .position(|id| *id == request.swap_out_id)
        .ok_or(Error::NotInWorkout(request.swap_out_id))?;

    let lookup = |id: &u32| catalog.iter().find(|e| e.id == *id);
    let previous = position
        .checked_sub(1)
        .and_then(|i| request.current_ids.get(i))
        .and_then(lookup);
    let next = request.current_ids.get(position + 1).and_then(lookup);

    let (strategy, pool) = POOL_STRATEGIES
        .iter()
        .map(|&strategy| (strategy, narrow(&candidates, strategy, previous, next)))
        .find(|(_, pool)| !pool.is_empty())
        .ok_or(Error::NoReplacement(request.swap_out_id))?;

    let choice = pool
        .choose(rng)
        .copied()
        .ok_or(Error::NoReplacement(request.swap_out_id))?;

    tracing::info!(
        "Swapping exercise {} for '{}' ({:?}, {} candidates)",
        request.swap_out_id,
        choice.name,
        strategy,
        pool.len()
    );

    Ok(choice.clone())
}

fn narrow<'a>(
    candidates: &[&'a Exercise],
    strategy: PoolStrategy,
    previous: Option<&Exercise>,
    next: Option<&Exercise>,
) -> Vec<&'a Exercise> {
    match strategy {
        PoolStrategy::NeighbourDissimilar => candidates
            .iter()
            .copied()
            .filter(|e| previous.map_or(true, |p| !are_similar(e, p)))
            .filter(|e| next.map_or(true, |n| !are_similar(e, n)))
            .collect(),
        PoolStrategy::Any => candidates.to_vec(),
    }
}
