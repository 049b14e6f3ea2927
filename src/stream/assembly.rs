//! Flattening accepted chunks into the presentable symbol sequence

use crate::catalog::patterns::{Catalog, SlotSymbol};
use crate::stream::chunks::Chunk;
use serde::Serialize;
use std::ops::Range;

/// One presentable symbol with its provenance annotations
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SequenceEntry {
    /// Monotonically increasing position within the sequence
    pub position: usize,
    /// Presentable symbol text (sentinel text for catch slots)
    pub symbol: String,
    /// Symbol identity index, or the reserved catch marker
    pub identity: SlotSymbol,
    /// Identity index of the source pattern
    pub pattern_index: u32,
    /// Whether this symbol is the catch sentinel
    pub is_catch: bool,
}

/// Final ordered symbol sequence with per-chunk spans
///
/// Handed to the presentation collaborator verbatim; no reordering happens
/// after assembly. Spans are retained so chunk-local invariants remain
/// checkable on the flattened output.
#[derive(Clone, Debug, Serialize)]
pub struct Sequence {
    entries: Vec<SequenceEntry>,
    chunk_spans: Vec<Range<usize>>,
    pattern_size: usize,
}

impl Sequence {
    /// All entries in presentation order
    pub fn entries(&self) -> &[SequenceEntry] {
        &self.entries
    }

    /// Entry span of each accepted chunk, in chunk order
    pub fn chunk_spans(&self) -> &[Range<usize>] {
        &self.chunk_spans
    }

    /// Entries belonging to one chunk
    pub fn chunk_entries(&self, chunk_index: usize) -> Option<&[SequenceEntry]> {
        self.chunk_spans
            .get(chunk_index)
            .and_then(|span| self.entries.get(span.clone()))
    }

    /// Number of symbol positions per pattern
    pub const fn pattern_size(&self) -> usize {
        self.pattern_size
    }

    /// Total number of symbol entries
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the sequence holds no entries
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of catch-sentinel entries
    pub fn catch_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_catch).count()
    }
}

/// Flatten accepted chunks into a symbol-level sequence
///
/// Each pattern entry contributes `pattern_size` consecutive entries; every
/// emitted entry carries its symbol text, identity, source pattern index,
/// and catch flag.
pub fn assemble(chunks: &[Chunk], catalog: &Catalog) -> Sequence {
    let mut entries = Vec::new();
    let mut chunk_spans = Vec::with_capacity(chunks.len());

    for chunk in chunks {
        let start = entries.len();
        for pattern in chunk {
            for slot in &pattern.slots {
                entries.push(SequenceEntry {
                    position: entries.len(),
                    symbol: catalog.symbol_text(*slot).to_string(),
                    identity: *slot,
                    pattern_index: pattern.index,
                    is_catch: matches!(*slot, SlotSymbol::Catch),
                });
            }
        }
        chunk_spans.push(start..entries.len());
    }

    Sequence {
        entries,
        chunk_spans,
        pattern_size: catalog.pattern_size(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::patterns::Pattern;

    fn catalog() -> Catalog {
        let lists: Vec<Vec<String>> = vec![
            vec!["Be".to_string(), "Pa".to_string()],
            vec!["Gi".to_string(), "Va".to_string()],
        ];
        Catalog::from_symbol_lists(&lists, "Xu").unwrap()
    }

    #[test]
    fn test_flattening_annotations() {
        let catalog = catalog();
        let probe = Pattern {
            index: 2,
            slots: vec![SlotSymbol::Catch, SlotSymbol::Item(4)],
            is_catch: true,
        };
        let chunks = vec![vec![
            catalog.patterns().first().unwrap().clone(),
            probe,
        ]];

        let sequence = assemble(&chunks, &catalog);
        assert_eq!(sequence.len(), 4);
        assert_eq!(sequence.catch_count(), 1);

        let entries = sequence.entries();
        assert_eq!(
            entries.iter().map(|e| e.position).collect::<Vec<_>>(),
            vec![0, 1, 2, 3]
        );
        assert_eq!(
            entries.iter().map(|e| e.symbol.as_str()).collect::<Vec<_>>(),
            vec!["Be", "Pa", "Xu", "Va"]
        );
        assert_eq!(
            entries.iter().map(|e| e.pattern_index).collect::<Vec<_>>(),
            vec![1, 1, 2, 2]
        );

        let sentinel = entries.get(2).unwrap();
        assert!(sentinel.is_catch);
        assert_eq!(sentinel.identity, SlotSymbol::Catch);
    }

    #[test]
    fn test_chunk_spans_cover_entries() {
        let catalog = catalog();
        let chunk: Chunk = catalog.patterns().to_vec();
        let chunks = vec![chunk.clone(), chunk];

        let sequence = assemble(&chunks, &catalog);
        assert_eq!(sequence.chunk_spans(), &[0..4, 4..8]);
        assert_eq!(sequence.chunk_entries(1).map(<[SequenceEntry]>::len), Some(4));
        assert_eq!(sequence.chunk_entries(2), None);
        assert_eq!(sequence.pattern_size(), 2);
    }

    #[test]
    fn test_identity_serialization() {
        let catalog = catalog();
        let chunks = vec![vec![Pattern {
            index: 1,
            slots: vec![SlotSymbol::Item(1), SlotSymbol::Catch],
            is_catch: true,
        }]];
        let sequence = assemble(&chunks, &catalog);
        let json = serde_json::to_string(sequence.entries()).unwrap();
        assert!(json.contains("\"identity\":1"));
        assert!(json.contains("\"identity\":\"catch\""));
    }
}
