/// Pattern catalog construction and symbol identity interning
pub mod patterns;
/// Catch-probe derivation from catalog patterns
pub mod probes;

pub use patterns::{Catalog, Pattern, SlotSymbol};
