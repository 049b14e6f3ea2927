//! Catch-probe allocation across chunks under per-chunk caps

use crate::catalog::patterns::Pattern;
use crate::io::error::ConfigError;
use crate::stream::chunks::Chunk;
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Validate that every probe can be placed under the distribution rules
///
/// # Errors
///
/// Returns an error if:
/// - `probe_count < chunk_count`: the guaranteed one-probe-per-chunk pass
///   cannot be satisfied
/// - `max_catch_per_chunk * chunk_count < probe_count`: no feasible
///   distribution exists under the cap
pub fn check_feasibility(
    probe_count: usize,
    chunk_count: usize,
    max_catch_per_chunk: usize,
) -> Result<(), ConfigError> {
    if probe_count < chunk_count {
        return Err(ConfigError::InsufficientProbes {
            probe_count,
            chunk_count,
        });
    }
    if max_catch_per_chunk * chunk_count < probe_count {
        return Err(ConfigError::InfeasibleProbeCap {
            probe_count,
            chunk_count,
            max_catch_per_chunk,
        });
    }
    Ok(())
}

/// Assign every catch probe to exactly one chunk
///
/// The probe list is shuffled so probe-to-chunk mapping is independent of
/// derivation order. One probe is popped per chunk in chunk order, then each
/// remaining probe goes to a uniformly drawn chunk that is still under the
/// cap (redrawing otherwise; feasibility is checked first, so the redraw
/// loop terminates with probability one). Probes are appended at the chunk
/// tail; final positions are decided by the shuffler.
///
/// # Errors
///
/// Returns an error if the distribution fails [`check_feasibility`].
pub fn distribute_probes(
    chunks: &mut [Chunk],
    mut probes: Vec<Pattern>,
    max_catch_per_chunk: usize,
    rng: &mut StdRng,
) -> Result<(), ConfigError> {
    let chunk_count = chunks.len();
    check_feasibility(probes.len(), chunk_count, max_catch_per_chunk)?;

    probes.shuffle(rng);

    // Guaranteed pass: one probe per chunk, in chunk order
    let mut counts = vec![0usize; chunk_count];
    for (chunk, count) in chunks.iter_mut().zip(counts.iter_mut()) {
        if let Some(probe) = probes.pop() {
            chunk.push(probe);
            *count = 1;
        }
    }

    // Remainder: uniform draws among chunks still under the cap
    'probes: while let Some(probe) = probes.pop() {
        loop {
            let target = rng.random_range(0..chunk_count);
            let under_cap = counts
                .get(target)
                .is_some_and(|&count| count < max_catch_per_chunk);
            if under_cap {
                if let (Some(chunk), Some(count)) = (chunks.get_mut(target), counts.get_mut(target))
                {
                    chunk.push(probe);
                    *count += 1;
                }
                continue 'probes;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::patterns::Catalog;
    use crate::catalog::probes::derive_probes;
    use crate::stream::chunks::build_chunks;
    use rand::SeedableRng;

    fn catalog() -> Catalog {
        let lists: Vec<Vec<String>> = [
            ["Be", "Pa"],
            ["Gi", "Va"],
            ["Je", "Wo"],
            ["Ju", "Mi"],
        ]
        .iter()
        .map(|p| p.iter().map(ToString::to_string).collect())
        .collect();
        Catalog::from_symbol_lists(&lists, "Xu").unwrap()
    }

    fn catch_count(chunk: &Chunk) -> usize {
        chunk.iter().filter(|p| p.is_catch).count()
    }

    #[test]
    fn test_feasibility_errors() {
        assert!(matches!(
            check_feasibility(3, 4, 2),
            Err(ConfigError::InsufficientProbes {
                probe_count: 3,
                chunk_count: 4,
            })
        ));
        assert!(matches!(
            check_feasibility(9, 4, 2),
            Err(ConfigError::InfeasibleProbeCap {
                probe_count: 9,
                chunk_count: 4,
                max_catch_per_chunk: 2,
            })
        ));
        assert!(check_feasibility(8, 4, 2).is_ok());
    }

    #[test]
    fn test_every_chunk_gets_one_to_cap_probes() {
        let catalog = catalog();
        // 8 probes over 4 chunks, cap 2: every chunk lands on exactly 2
        let mut chunks = build_chunks(&catalog, 8, 2).unwrap();
        let probes = derive_probes(&catalog);
        let mut rng = StdRng::seed_from_u64(11);

        distribute_probes(&mut chunks, probes, 2, &mut rng).unwrap();

        let total: usize = chunks.iter().map(catch_count).sum();
        assert_eq!(total, 8);
        for chunk in &chunks {
            let count = catch_count(chunk);
            assert!((1..=2).contains(&count));
        }
    }

    #[test]
    fn test_cap_respected_with_slack() {
        let catalog = catalog();
        // 8 probes over 4 chunks with cap 3: counts may vary but stay capped
        let mut chunks = build_chunks(&catalog, 4, 1).unwrap();
        let probes = derive_probes(&catalog);
        let mut rng = StdRng::seed_from_u64(29);

        distribute_probes(&mut chunks, probes, 3, &mut rng).unwrap();

        let total: usize = chunks.iter().map(catch_count).sum();
        assert_eq!(total, 8);
        for chunk in &chunks {
            let count = catch_count(chunk);
            assert!((1..=3).contains(&count));
        }
    }

    #[test]
    fn test_distribution_is_seed_deterministic() {
        let catalog = catalog();
        let assign = |seed: u64| {
            let mut chunks = build_chunks(&catalog, 8, 2).unwrap();
            let probes = derive_probes(&catalog);
            let mut rng = StdRng::seed_from_u64(seed);
            distribute_probes(&mut chunks, probes, 2, &mut rng).unwrap();
            chunks
        };
        assert_eq!(assign(7), assign(7));
    }
}
