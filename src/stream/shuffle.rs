//! Bounded rejection sampling over chunk permutations

use crate::io::error::{ConstraintClass, GenerationError};
use crate::stream::chunks::Chunk;
use crate::stream::rules::{BoundaryContext, ShuffleRules, first_violation};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Find a constraint-satisfying permutation of one chunk
///
/// Draws uniformly random permutations (Fisher-Yates) and tests them against
/// the active rules plus the previous chunk's boundary context, redrawing on
/// any violation. Violations are tallied per constraint class so an
/// exhausted budget can report which rule the chunk persistently failed.
///
/// # Errors
///
/// Returns an error when no valid permutation is found within
/// `max_attempts` draws; infeasible parameter combinations surface here
/// rather than hanging.
pub fn shuffle_chunk(
    chunk: &mut Chunk,
    previous: Option<&BoundaryContext>,
    rules: &ShuffleRules,
    max_attempts: usize,
    chunk_index: usize,
    rng: &mut StdRng,
) -> Result<(), GenerationError> {
    let mut violation_counts = [0usize; ConstraintClass::ALL.len()];

    for _ in 0..max_attempts {
        chunk.shuffle(rng);
        match first_violation(chunk, previous, rules) {
            None => return Ok(()),
            Some(class) => {
                if let Some(count) = violation_counts.get_mut(class.index()) {
                    *count += 1;
                }
            }
        }
    }

    Err(GenerationError::RetryBudgetExhausted {
        chunk_index,
        attempts: max_attempts,
        constraint: dominant_violation(&violation_counts),
    })
}

/// Shuffle every chunk in order, carrying accepted boundaries forward
///
/// Chunks are processed strictly sequentially: chunk `i + 1` is validated
/// against the accepted tail of chunk `i`, so no parallelism across chunks
/// is possible. The first chunk has no boundary context.
///
/// # Errors
///
/// Returns the first chunk's [`GenerationError`] on budget exhaustion; no
/// partial result is kept.
pub fn shuffle_chunks(
    chunks: &mut [Chunk],
    rules: &ShuffleRules,
    max_attempts: usize,
    rng: &mut StdRng,
) -> Result<(), GenerationError> {
    let mut previous: Option<BoundaryContext> = None;
    for (chunk_index, chunk) in chunks.iter_mut().enumerate() {
        shuffle_chunk(chunk, previous.as_ref(), rules, max_attempts, chunk_index, rng)?;
        previous = BoundaryContext::from_chunk(chunk);
    }
    Ok(())
}

fn dominant_violation(counts: &[usize; ConstraintClass::ALL.len()]) -> ConstraintClass {
    ConstraintClass::ALL
        .iter()
        .copied()
        .zip(counts.iter().copied())
        .max_by_key(|&(_, count)| count)
        .map_or(ConstraintClass::AdjacentPattern, |(class, _)| class)
}
