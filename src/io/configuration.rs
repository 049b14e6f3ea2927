//! Generator constants and runtime configuration defaults

// Catch-probe placement rules
/// Minimum positional distance between two catch probes within a chunk
pub const MIN_CATCH_DISTANCE: usize = 5;
/// Number of entry positions at each chunk edge kept free of catch probes
pub const CATCH_EDGE_MARGIN: usize = 3;

// Default values for configurable parameters
/// Default cap on catch probes assigned to a single chunk
pub const DEFAULT_MAX_CATCH_PER_CHUNK: usize = 2;
/// Default catch sentinel syllable
pub const DEFAULT_SENTINEL: &str = "Xu";
/// Default permutation attempts per chunk before failing generation
pub const DEFAULT_MAX_SHUFFLE_ATTEMPTS: usize = 100_000;
