//! Ordering constraint predicates checked against candidate permutations

use crate::catalog::patterns::{Pattern, SlotSymbol};
use crate::io::configuration::{CATCH_EDGE_MARGIN, MIN_CATCH_DISTANCE};
use crate::io::error::ConstraintClass;
use serde::Deserialize;

/// Relaxation switches for the repetition constraints
///
/// All forbid flags default to on, reproducing the strict rule set. Boundary
/// continuity and catch spacing are never relaxed; the switches exist for
/// probe-free exposure streams that tolerate local repetition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShuffleRules {
    /// Reject adjacent entries sharing a pattern identity
    pub forbid_pattern_repetition: bool,
    /// Reject entries sharing a pattern identity at distance two (ABA)
    pub forbid_second_order_repetition: bool,
    /// Reject adjacent symbols sharing an identity, across entry boundaries
    pub forbid_symbol_repetition: bool,
}

impl Default for ShuffleRules {
    fn default() -> Self {
        Self {
            forbid_pattern_repetition: true,
            forbid_second_order_repetition: true,
            forbid_symbol_repetition: true,
        }
    }
}

/// Read-only tail of an accepted chunk, carried into the next chunk's checks
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundaryContext {
    /// Pattern identity of the accepted chunk's last entry
    pub last_pattern: u32,
    /// Pattern identity of the accepted chunk's second-to-last entry
    pub second_last_pattern: u32,
    /// Identity of the accepted chunk's final symbol
    pub last_symbol: SlotSymbol,
}

impl BoundaryContext {
    /// Capture the boundary tail of an accepted chunk
    ///
    /// Returns `None` for chunks of fewer than two entries, which cannot
    /// occur for chunks produced by the builder (every chunk holds at least
    /// one catalog copy plus one probe).
    pub fn from_chunk(chunk: &[Pattern]) -> Option<Self> {
        let last = chunk.last()?;
        let second_last = chunk.get(chunk.len().checked_sub(2)?)?;
        Some(Self {
            last_pattern: last.index,
            second_last_pattern: second_last.index,
            last_symbol: *last.slots.last()?,
        })
    }
}

/// Check whether two sequentially adjacent entries share a pattern identity
pub fn has_adjacent_pattern_repetition(chunk: &[Pattern]) -> bool {
    chunk
        .windows(2)
        .any(|w| matches!(w, [a, b] if a.index == b.index))
}

/// Check whether any entry shares a pattern identity with the entry two back
pub fn has_second_order_repetition(chunk: &[Pattern]) -> bool {
    chunk
        .iter()
        .zip(chunk.iter().skip(2))
        .any(|(a, b)| a.index == b.index)
}

/// Check whether two sequentially adjacent symbols share an identity
///
/// Entries are flattened to individual symbols, so the check crosses entry
/// boundaries. The catch sentinel counts as one identity of its own.
pub fn has_adjacent_symbol_repetition(chunk: &[Pattern]) -> bool {
    let mut previous: Option<SlotSymbol> = None;
    for slot in chunk.iter().flat_map(|p| p.slots.iter()) {
        if previous == Some(*slot) {
            return true;
        }
        previous = Some(*slot);
    }
    false
}

/// Check whether a chunk opening reproduces the previous chunk's tail
///
/// Violated when the first entry matches the previous chunk's last or
/// second-to-last pattern identity, the second entry matches the previous
/// last pattern, or the first symbol matches the previous final symbol.
pub fn violates_boundary(chunk: &[Pattern], context: &BoundaryContext) -> bool {
    if let Some(first) = chunk.first() {
        if first.index == context.last_pattern || first.index == context.second_last_pattern {
            return true;
        }
        if first.slots.first() == Some(&context.last_symbol) {
            return true;
        }
    }
    if let Some(second) = chunk.get(1) {
        if second.index == context.last_pattern {
            return true;
        }
    }
    false
}

/// Check whether catch probes sit too close together or too near an edge
///
/// Violated when any two probes are fewer than [`MIN_CATCH_DISTANCE`] entry
/// positions apart, or a probe falls within the first or last
/// [`CATCH_EDGE_MARGIN`] positions of the chunk.
pub fn violates_catch_spacing(chunk: &[Pattern]) -> bool {
    let positions: Vec<usize> = chunk
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_catch)
        .map(|(i, _)| i)
        .collect();

    if positions
        .windows(2)
        .any(|w| matches!(w, [a, b] if b - a < MIN_CATCH_DISTANCE))
    {
        return true;
    }

    match (positions.first(), positions.last()) {
        (Some(&first), Some(&last)) => {
            first < CATCH_EDGE_MARGIN || last + CATCH_EDGE_MARGIN > chunk.len()
        }
        _ => false,
    }
}

/// Evaluate all active constraints against a candidate permutation
///
/// Returns the first violated constraint class in check order, or `None`
/// when the candidate satisfies every active rule. Boundary continuity is
/// checked only when a previously accepted chunk provides context.
pub fn first_violation(
    chunk: &[Pattern],
    previous: Option<&BoundaryContext>,
    rules: &ShuffleRules,
) -> Option<ConstraintClass> {
    if rules.forbid_pattern_repetition && has_adjacent_pattern_repetition(chunk) {
        return Some(ConstraintClass::AdjacentPattern);
    }
    if rules.forbid_second_order_repetition && has_second_order_repetition(chunk) {
        return Some(ConstraintClass::SecondOrderPattern);
    }
    if rules.forbid_symbol_repetition && has_adjacent_symbol_repetition(chunk) {
        return Some(ConstraintClass::AdjacentSymbol);
    }
    if let Some(context) = previous {
        if violates_boundary(chunk, context) {
            return Some(ConstraintClass::ChunkBoundary);
        }
    }
    if violates_catch_spacing(chunk) {
        return Some(ConstraintClass::CatchSpacing);
    }
    None
}
