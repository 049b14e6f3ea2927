//! Chunk replication: owned catalog copies grouped for independent shuffling

use crate::catalog::patterns::{Catalog, Pattern};
use crate::io::error::ConfigError;

/// Mutable ordered block of pattern entries, the unit of shuffling
pub type Chunk = Vec<Pattern>;

/// Validate the repetition/chunk sizing and return the chunk count
///
/// # Errors
///
/// Returns an error if either value is zero or `repetitions` is not evenly
/// divisible by `chunk_size` (truncating silently would drop repetitions).
pub fn validate_chunking(repetitions: u32, chunk_size: u32) -> Result<usize, ConfigError> {
    if repetitions == 0 {
        return Err(ConfigError::InvalidParameter {
            parameter: "repetitions",
            value: repetitions.to_string(),
            reason: "at least one repetition is required".to_string(),
        });
    }
    if chunk_size == 0 {
        return Err(ConfigError::InvalidParameter {
            parameter: "chunk_size",
            value: chunk_size.to_string(),
            reason: "chunks must group at least one repetition".to_string(),
        });
    }
    if repetitions % chunk_size != 0 {
        return Err(ConfigError::IndivisibleRepetitions {
            repetitions,
            chunk_size,
        });
    }
    Ok((repetitions / chunk_size) as usize)
}

/// Replicate the catalog into `repetitions / chunk_size` chunks
///
/// Each chunk holds `chunk_size` full owned copies of the catalog; copies
/// are deep so chunks can be shuffled and annotated independently.
///
/// # Errors
///
/// Returns an error if the sizing fails [`validate_chunking`].
pub fn build_chunks(
    catalog: &Catalog,
    repetitions: u32,
    chunk_size: u32,
) -> Result<Vec<Chunk>, ConfigError> {
    let chunk_count = validate_chunking(repetitions, chunk_size)?;

    let patterns_per_chunk = chunk_size as usize * catalog.patterns().len();
    let mut chunks = Vec::with_capacity(chunk_count);
    for _ in 0..chunk_count {
        let mut chunk: Chunk = Vec::with_capacity(patterns_per_chunk);
        for _ in 0..chunk_size {
            chunk.extend(catalog.patterns().iter().cloned());
        }
        chunks.push(chunk);
    }

    Ok(chunks)
}
