//! Error types for configuration validation and constrained generation

use std::fmt;
use std::path::PathBuf;

/// Constraint families checked by the shuffler
///
/// Reported by [`GenerationError::RetryBudgetExhausted`] to identify which
/// rule a chunk persistently failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConstraintClass {
    /// Two sequentially adjacent entries share a pattern identity
    AdjacentPattern,
    /// An entry shares a pattern identity with the entry two positions back
    SecondOrderPattern,
    /// Two sequentially adjacent symbols share an identity
    AdjacentSymbol,
    /// A chunk opening reproduces the tail of the previous chunk
    ChunkBoundary,
    /// Catch probes too close together or too near a chunk edge
    CatchSpacing,
}

impl ConstraintClass {
    /// All constraint classes in check order
    pub const ALL: [Self; 5] = [
        Self::AdjacentPattern,
        Self::SecondOrderPattern,
        Self::AdjacentSymbol,
        Self::ChunkBoundary,
        Self::CatchSpacing,
    ];

    /// Stable position of this class within [`Self::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Self::AdjacentPattern => 0,
            Self::SecondOrderPattern => 1,
            Self::AdjacentSymbol => 2,
            Self::ChunkBoundary => 3,
            Self::CatchSpacing => 4,
        }
    }
}

impl fmt::Display for ConstraintClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AdjacentPattern => "adjacent pattern repetition",
            Self::SecondOrderPattern => "second-order pattern repetition",
            Self::AdjacentSymbol => "adjacent symbol repetition",
            Self::ChunkBoundary => "chunk boundary continuity",
            Self::CatchSpacing => "catch-probe spacing",
        };
        f.write_str(name)
    }
}

/// Structurally invalid generator input
///
/// Always detected before any randomized search begins and never retried.
#[derive(Debug)]
pub enum ConfigError {
    /// The pattern list is empty
    EmptyCatalog,

    /// A pattern's length differs from the catalog's pattern size
    UnequalPatternLength {
        /// Position of the offending pattern in the input list
        index: usize,
        /// Pattern size established by the first pattern
        expected: usize,
        /// Length found at `index`
        found: usize,
    },

    /// The catch sentinel is also a catalog symbol
    SentinelCollision {
        /// The colliding sentinel text
        sentinel: String,
    },

    /// Generator parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Repetitions cannot be split into whole chunks
    IndivisibleRepetitions {
        /// Requested repetition count
        repetitions: u32,
        /// Requested chunk grouping
        chunk_size: u32,
    },

    /// Fewer probes than chunks: the one-probe-per-chunk pass cannot run
    InsufficientProbes {
        /// Derived probe count (`pattern_count * pattern_size`)
        probe_count: usize,
        /// Number of chunks to fill
        chunk_count: usize,
    },

    /// The per-chunk cap leaves no feasible probe distribution
    InfeasibleProbeCap {
        /// Derived probe count
        probe_count: usize,
        /// Number of chunks to fill
        chunk_count: usize,
        /// Requested per-chunk probe cap
        max_catch_per_chunk: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCatalog => f.write_str("pattern catalog is empty"),
            Self::UnequalPatternLength {
                index,
                expected,
                found,
            } => write!(
                f,
                "pattern {index} has {found} symbols, catalog pattern size is {expected}"
            ),
            Self::SentinelCollision { sentinel } => write!(
                f,
                "catch sentinel '{sentinel}' is a member of the catalog symbol set"
            ),
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => write!(f, "invalid parameter '{parameter}' = '{value}': {reason}"),
            Self::IndivisibleRepetitions {
                repetitions,
                chunk_size,
            } => write!(
                f,
                "{repetitions} repetitions cannot be split into chunks of {chunk_size}"
            ),
            Self::InsufficientProbes {
                probe_count,
                chunk_count,
            } => write!(
                f,
                "{probe_count} catch probes cannot guarantee one per chunk across {chunk_count} chunks"
            ),
            Self::InfeasibleProbeCap {
                probe_count,
                chunk_count,
                max_catch_per_chunk,
            } => write!(
                f,
                "{probe_count} catch probes exceed capacity {max_catch_per_chunk} x {chunk_count} chunks"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Rejection sampling exhausted its retry budget
#[derive(Debug)]
pub enum GenerationError {
    /// No valid permutation was found for a chunk within the attempt budget
    RetryBudgetExhausted {
        /// Index of the chunk that could not be shuffled
        chunk_index: usize,
        /// Number of candidate permutations drawn
        attempts: usize,
        /// Constraint class violated most often across the budget
        constraint: ConstraintClass,
    },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RetryBudgetExhausted {
                chunk_index,
                attempts,
                constraint,
            } => write!(
                f,
                "chunk {chunk_index}: no valid permutation in {attempts} attempts (dominant violation: {constraint})"
            ),
        }
    }
}

impl std::error::Error for GenerationError {}

/// Main error type for all generator and CLI operations
#[derive(Debug)]
pub enum StreamError {
    /// Structurally invalid input, rejected before randomized search
    Config(ConfigError),

    /// Constrained search failed within its retry budget
    Generation(GenerationError),

    /// Configuration file could not be parsed
    ConfigFile {
        /// Path to the configuration file
        path: PathBuf,
        /// Parser diagnostic
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Sequence serialization failure
    Serialization {
        /// Serializer diagnostic
        reason: String,
    },

    /// A result was requested from a generator that has not completed
    Incomplete,
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(source) => write!(f, "invalid configuration: {source}"),
            Self::Generation(source) => write!(f, "generation failed: {source}"),
            Self::ConfigFile { path, reason } => {
                write!(f, "failed to parse config '{}': {reason}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => write!(
                f,
                "file system error during {operation} on '{}': {source}",
                path.display()
            ),
            Self::Serialization { reason } => write!(f, "serialization error: {reason}"),
            Self::Incomplete => f.write_str("generation has not completed"),
        }
    }
}

impl std::error::Error for StreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(source) => Some(source),
            Self::Generation(source) => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for StreamError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<GenerationError> for StreamError {
    fn from(err: GenerationError) -> Self {
        Self::Generation(err)
    }
}

impl From<std::io::Error> for StreamError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Convenience type alias for generator results
pub type Result<T> = std::result::Result<T, StreamError>;
