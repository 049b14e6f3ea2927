//! Constrained random stimulus-sequence generation for behavioral experiments
//!
//! The system replicates a catalog of fixed-length symbol patterns into
//! shuffle chunks, embeds sparse catch probes at controlled spacing, and
//! searches for chunk permutations free of immediate, second-order, and
//! cross-boundary repetitions via bounded rejection sampling.

#![forbid(unsafe_code)]

/// Pattern catalog, symbol interning, and catch-probe derivation
pub mod catalog;
/// Input/output operations and error handling
pub mod io;
/// Chunked sequence construction: probe distribution, shuffling, assembly
pub mod stream;

pub use io::error::{Result, StreamError};
pub use stream::generator::{GeneratorConfig, StreamGenerator, generate};
