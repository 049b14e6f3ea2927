//! Pattern catalog with stable symbol identity assignment

use crate::io::error::ConfigError;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Identity occupying one slot of a pattern
///
/// Catalog symbols carry their 1-based intern index; the catch sentinel is
/// its own reserved identity and compares equal only to itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotSymbol {
    /// Interned catalog symbol (1-based identity index)
    Item(u32),
    /// Reserved catch sentinel
    Catch,
}

impl fmt::Display for SlotSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item(id) => write!(f, "{id}"),
            Self::Catch => f.write_str("catch"),
        }
    }
}

impl Serialize for SlotSymbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Item(id) => serializer.serialize_u32(*id),
            Self::Catch => serializer.serialize_str("catch"),
        }
    }
}

/// Ordered fixed-length tuple of slot identities
///
/// Catalog patterns hold only `Item` slots; catch probes replace exactly one
/// slot with `Catch` and keep the source pattern's index for repetition
/// checks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    /// 1-based identity index, assigned in catalog order
    pub index: u32,
    /// Ordered slot identities, one per symbol position
    pub slots: Vec<SlotSymbol>,
    /// Whether this entry is a catch probe
    pub is_catch: bool,
}

/// Immutable pattern catalog with interned symbol identities
///
/// Symbols are indexed by first occurrence across the catalog in catalog
/// order; indices are 1-based and stable for the catalog's lifetime.
#[derive(Clone, Debug)]
pub struct Catalog {
    patterns: Vec<Pattern>,
    symbols: Vec<String>,
    pattern_size: usize,
    sentinel: String,
}

impl Catalog {
    /// Build a catalog from ordered symbol tuples and a sentinel text
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The pattern list is empty or patterns have zero length
    /// - Any pattern's length differs from the first pattern's
    /// - The sentinel text is also a member of the catalog's symbol set
    pub fn from_symbol_lists(
        lists: &[Vec<String>],
        sentinel: &str,
    ) -> std::result::Result<Self, ConfigError> {
        let first = lists.first().ok_or(ConfigError::EmptyCatalog)?;
        let pattern_size = first.len();

        if pattern_size == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "patterns",
                value: "[]".to_string(),
                reason: "patterns must contain at least one symbol".to_string(),
            });
        }

        for (index, list) in lists.iter().enumerate() {
            if list.len() != pattern_size {
                return Err(ConfigError::UnequalPatternLength {
                    index,
                    expected: pattern_size,
                    found: list.len(),
                });
            }
        }

        // First-occurrence scan assigns 1-based identities in catalog order
        let mut symbols: Vec<String> = Vec::new();
        let mut identities: HashMap<&str, u32> = HashMap::new();
        let mut patterns = Vec::with_capacity(lists.len());

        for (position, list) in lists.iter().enumerate() {
            let mut slots = Vec::with_capacity(pattern_size);
            for text in list {
                if text == sentinel {
                    return Err(ConfigError::SentinelCollision {
                        sentinel: sentinel.to_string(),
                    });
                }
                let next_id = symbols.len() as u32 + 1;
                let id = *identities.entry(text.as_str()).or_insert_with(|| {
                    symbols.push(text.clone());
                    next_id
                });
                slots.push(SlotSymbol::Item(id));
            }
            patterns.push(Pattern {
                index: position as u32 + 1,
                slots,
                is_catch: false,
            });
        }

        Ok(Self {
            patterns,
            symbols,
            pattern_size,
            sentinel: sentinel.to_string(),
        })
    }

    /// Catalog patterns in assignment order
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Number of symbol positions per pattern
    pub const fn pattern_size(&self) -> usize {
        self.pattern_size
    }

    /// Number of distinct interned symbols
    pub const fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    /// Sentinel text used for catch probes
    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Resolve a slot identity to its presentable text
    ///
    /// The sentinel text is returned for `Catch`; an out-of-range item id
    /// resolves to the empty string (cannot occur for slots produced by this
    /// catalog).
    pub fn symbol_text(&self, slot: SlotSymbol) -> &str {
        match slot {
            SlotSymbol::Catch => &self.sentinel,
            SlotSymbol::Item(id) => self
                .symbols
                .get(id as usize - 1)
                .map_or("", String::as_str),
        }
    }

    /// Look up the identity index assigned to a symbol text
    pub fn symbol_id(&self, text: &str) -> Option<u32> {
        self.symbols
            .iter()
            .position(|s| s == text)
            .map(|p| p as u32 + 1)
    }
}
