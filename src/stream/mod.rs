/// Sequence assembly from accepted chunks
pub mod assembly;
/// Chunk replication from the pattern catalog
pub mod chunks;
/// Catch-probe allocation across chunks
pub mod distribution;
/// Orchestrating generator and phase machine
pub mod generator;
/// Ordering constraint predicates and boundary context
pub mod rules;
/// Bounded rejection-sampling chunk shuffler
pub mod shuffle;

pub use assembly::{Sequence, SequenceEntry};
pub use chunks::Chunk;
pub use rules::{BoundaryContext, ShuffleRules};
