//! Orchestrating generator: configuration, phase machine, and entry points

use crate::catalog::patterns::Catalog;
use crate::catalog::probes::derive_probes;
use crate::io::configuration::{
    DEFAULT_MAX_CATCH_PER_CHUNK, DEFAULT_MAX_SHUFFLE_ATTEMPTS, DEFAULT_SENTINEL,
};
use crate::io::error::{ConfigError, Result};
use crate::stream::assembly::{Sequence, assemble};
use crate::stream::chunks::{Chunk, build_chunks, validate_chunking};
use crate::stream::distribution::{check_feasibility, distribute_probes};
use crate::stream::rules::{BoundaryContext, ShuffleRules};
use crate::stream::shuffle::shuffle_chunk;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

/// Complete generator configuration
///
/// `seed` makes generation fully reproducible: one deterministic random
/// source derived from it drives probe shuffling, distribution draws, and
/// chunk permutation. Unseeded runs draw an effective seed from OS entropy,
/// queryable on the generator afterwards.
#[derive(Clone, Debug, Deserialize)]
pub struct GeneratorConfig {
    /// Ordered fixed-length symbol tuples forming the catalog
    pub patterns: Vec<Vec<String>>,
    /// Number of times the full catalog is repeated in the stream
    pub repetitions: u32,
    /// Catalog copies grouped per independently shuffled chunk
    pub chunk_size: u32,
    /// Cap on catch probes assigned to one chunk
    #[serde(default = "default_max_catch_per_chunk")]
    pub max_catch_per_chunk: usize,
    /// Sentinel symbol text substituted into catch probes
    #[serde(default = "default_sentinel")]
    pub sentinel: String,
    /// Random seed for reproducible generation
    #[serde(default)]
    pub seed: Option<u64>,
    /// Relaxation switches for the repetition constraints
    #[serde(default)]
    pub rules: ShuffleRules,
    /// Permutation attempts per chunk before generation fails
    #[serde(default = "default_max_shuffle_attempts")]
    pub max_shuffle_attempts: usize,
}

const fn default_max_catch_per_chunk() -> usize {
    DEFAULT_MAX_CATCH_PER_CHUNK
}

fn default_sentinel() -> String {
    DEFAULT_SENTINEL.to_string()
}

const fn default_max_shuffle_attempts() -> usize {
    DEFAULT_MAX_SHUFFLE_ATTEMPTS
}

/// Phase of a generation run
///
/// `ShufflingChunk` self-loops internally on rejection; one [`StreamGenerator::step`]
/// accepts one chunk. Terminal phases are `Done` and `Failed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationPhase {
    /// Replicating the catalog into chunks
    BuildingChunks,
    /// Allocating catch probes across chunks
    DistributingProbes,
    /// Searching for a valid permutation of the indexed chunk
    ShufflingChunk(usize),
    /// Flattening accepted chunks into the sequence
    Assembling,
    /// Generation completed; the sequence is available
    Done,
    /// Generation failed; the error was returned by the failing step
    Failed,
}

/// Stimulus-stream generator executing the phase machine
///
/// All configuration errors are raised by [`StreamGenerator::new`], before
/// any randomized work; stepping can only fail with a generation error.
pub struct StreamGenerator {
    config: GeneratorConfig,
    catalog: Catalog,
    chunks: Vec<Chunk>,
    previous: Option<BoundaryContext>,
    phase: GenerationPhase,
    rng: StdRng,
    effective_seed: u64,
    chunk_count: usize,
    sequence: Option<Sequence>,
}

impl StreamGenerator {
    /// Validate a configuration and prepare a generation run
    ///
    /// # Errors
    ///
    /// Returns a configuration error if:
    /// - The catalog is empty, has unequal pattern lengths, or contains the
    ///   sentinel as a symbol
    /// - Repetitions do not divide into whole chunks
    /// - The probe count or per-chunk cap makes distribution infeasible
    /// - The per-chunk cap or attempt budget is zero
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let catalog = Catalog::from_symbol_lists(&config.patterns, &config.sentinel)?;
        let chunk_count = validate_chunking(config.repetitions, config.chunk_size)?;

        if config.max_catch_per_chunk == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "max_catch_per_chunk",
                value: config.max_catch_per_chunk.to_string(),
                reason: "every chunk must admit at least one catch probe".to_string(),
            }
            .into());
        }
        if config.max_shuffle_attempts == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "max_shuffle_attempts",
                value: config.max_shuffle_attempts.to_string(),
                reason: "at least one permutation attempt is required".to_string(),
            }
            .into());
        }

        let probe_count = catalog.patterns().len() * catalog.pattern_size();
        check_feasibility(probe_count, chunk_count, config.max_catch_per_chunk)?;

        let effective_seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let rng = StdRng::seed_from_u64(effective_seed);

        Ok(Self {
            config,
            catalog,
            chunks: Vec::new(),
            previous: None,
            phase: GenerationPhase::BuildingChunks,
            rng,
            effective_seed,
            chunk_count,
            sequence: None,
        })
    }

    /// Seed actually driving this run (drawn from OS entropy when unseeded)
    pub const fn effective_seed(&self) -> u64 {
        self.effective_seed
    }

    /// Current phase of the run
    pub const fn phase(&self) -> GenerationPhase {
        self.phase
    }

    /// Number of chunks this run will produce
    pub const fn chunk_count(&self) -> usize {
        self.chunk_count
    }

    /// The immutable pattern catalog backing this run
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Advance the phase machine by one transition
    ///
    /// One call accepts at most one chunk; stepping a terminal phase is a
    /// no-op returning that phase.
    ///
    /// # Errors
    ///
    /// Returns a generation error when a chunk exhausts its retry budget;
    /// the generator then rests in the `Failed` phase and no partial
    /// sequence is observable.
    pub fn step(&mut self) -> Result<GenerationPhase> {
        match self.advance() {
            Ok(phase) => {
                self.phase = phase;
                Ok(phase)
            }
            Err(err) => {
                self.phase = GenerationPhase::Failed;
                Err(err)
            }
        }
    }

    fn advance(&mut self) -> Result<GenerationPhase> {
        let next = match self.phase {
            GenerationPhase::BuildingChunks => {
                self.chunks =
                    build_chunks(&self.catalog, self.config.repetitions, self.config.chunk_size)?;
                GenerationPhase::DistributingProbes
            }
            GenerationPhase::DistributingProbes => {
                let probes = derive_probes(&self.catalog);
                distribute_probes(
                    &mut self.chunks,
                    probes,
                    self.config.max_catch_per_chunk,
                    &mut self.rng,
                )?;
                GenerationPhase::ShufflingChunk(0)
            }
            GenerationPhase::ShufflingChunk(index) => {
                if let Some(chunk) = self.chunks.get_mut(index) {
                    shuffle_chunk(
                        chunk,
                        self.previous.as_ref(),
                        &self.config.rules,
                        self.config.max_shuffle_attempts,
                        index,
                        &mut self.rng,
                    )?;
                    self.previous = BoundaryContext::from_chunk(chunk);
                }
                if index + 1 < self.chunks.len() {
                    GenerationPhase::ShufflingChunk(index + 1)
                } else {
                    GenerationPhase::Assembling
                }
            }
            GenerationPhase::Assembling => {
                self.sequence = Some(assemble(&self.chunks, &self.catalog));
                GenerationPhase::Done
            }
            GenerationPhase::Done => GenerationPhase::Done,
            GenerationPhase::Failed => GenerationPhase::Failed,
        };
        Ok(next)
    }

    /// Drive the phase machine to completion and return the sequence
    ///
    /// # Errors
    ///
    /// Returns the first configuration or generation error; failure is
    /// atomic and yields no partial sequence.
    pub fn run(mut self) -> Result<Sequence> {
        while self.step()? != GenerationPhase::Done {}
        self.into_sequence()
    }

    /// Extract the assembled sequence from a completed run
    ///
    /// # Errors
    ///
    /// Returns [`crate::StreamError::Incomplete`] if generation has not
    /// reached `Done`.
    pub fn into_sequence(self) -> Result<Sequence> {
        self.sequence.ok_or(crate::io::error::StreamError::Incomplete)
    }
}

/// Generate a complete constraint-satisfying sequence in one call
///
/// # Errors
///
/// Returns any configuration or generation error raised by the run.
pub fn generate(config: GeneratorConfig) -> Result<Sequence> {
    StreamGenerator::new(config)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::error::StreamError;

    fn base_config() -> GeneratorConfig {
        let patterns: Vec<Vec<String>> = [
            ["Be", "Pa"],
            ["Gi", "Va"],
            ["Je", "Wo"],
            ["Ju", "Mi"],
            ["Ke", "Ge"],
            ["Me", "Zu"],
            ["Ve", "Fe"],
            ["We", "To"],
        ]
        .iter()
        .map(|p| p.iter().map(ToString::to_string).collect())
        .collect();

        GeneratorConfig {
            patterns,
            repetitions: 24,
            chunk_size: 4,
            max_catch_per_chunk: 3,
            sentinel: DEFAULT_SENTINEL.to_string(),
            seed: Some(99),
            rules: ShuffleRules::default(),
            max_shuffle_attempts: DEFAULT_MAX_SHUFFLE_ATTEMPTS,
        }
    }

    #[test]
    fn test_phase_progression() {
        let mut generator = StreamGenerator::new(base_config()).unwrap();
        assert_eq!(generator.phase(), GenerationPhase::BuildingChunks);
        assert_eq!(generator.chunk_count(), 6);

        assert_eq!(
            generator.step().unwrap(),
            GenerationPhase::DistributingProbes
        );
        for index in 0..6 {
            assert_eq!(
                generator.step().unwrap(),
                GenerationPhase::ShufflingChunk(index)
            );
        }
        assert_eq!(generator.step().unwrap(), GenerationPhase::Assembling);
        assert_eq!(generator.step().unwrap(), GenerationPhase::Done);
        // Terminal phase is a no-op
        assert_eq!(generator.step().unwrap(), GenerationPhase::Done);

        let sequence = generator.into_sequence().unwrap();
        assert!(!sequence.is_empty());
    }

    #[test]
    fn test_incomplete_extraction_rejected() {
        let generator = StreamGenerator::new(base_config()).unwrap();
        assert!(matches!(
            generator.into_sequence(),
            Err(StreamError::Incomplete)
        ));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let first = generate(base_config()).unwrap();
        let second = generate(base_config()).unwrap();
        assert_eq!(first.entries(), second.entries());
    }

    #[test]
    fn test_effective_seed_reported_for_unseeded_runs() {
        let mut config = base_config();
        config.seed = None;
        let generator = StreamGenerator::new(config.clone()).unwrap();
        let seed = generator.effective_seed();
        let first = generator.run().unwrap();

        config.seed = Some(seed);
        let replay = generate(config).unwrap();
        assert_eq!(first.entries(), replay.entries());
    }

    #[test]
    fn test_zero_cap_rejected() {
        let mut config = base_config();
        config.max_catch_per_chunk = 0;
        assert!(matches!(
            StreamGenerator::new(config),
            Err(StreamError::Config(ConfigError::InvalidParameter {
                parameter: "max_catch_per_chunk",
                ..
            }))
        ));
    }

    #[test]
    fn test_probe_feasibility_checked_up_front() {
        // 16 probes cannot guarantee one each across 24 chunks
        let mut config = base_config();
        config.chunk_size = 1;
        assert!(matches!(
            StreamGenerator::new(config),
            Err(StreamError::Config(ConfigError::InsufficientProbes { .. }))
        ));

        // 16 probes exceed capacity 3 x 2 chunks
        let mut config = base_config();
        config.chunk_size = 12;
        assert!(matches!(
            StreamGenerator::new(config),
            Err(StreamError::Config(ConfigError::InfeasibleProbeCap { .. }))
        ));
    }
}
