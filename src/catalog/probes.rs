//! Catch-probe derivation: one sentinel substitution per pattern position

use crate::catalog::patterns::{Catalog, Pattern, SlotSymbol};

/// Derive the full catch-probe set for a catalog
///
/// Produces one probe per (pattern, position) pair: the source pattern with
/// that position replaced by the catch sentinel and `is_catch` set. The
/// source `index` is kept so probes participate in repetition checks under
/// their pattern identity. Total count is `pattern_count * pattern_size`,
/// independent of repetitions.
pub fn derive_probes(catalog: &Catalog) -> Vec<Pattern> {
    let mut probes = Vec::with_capacity(catalog.patterns().len() * catalog.pattern_size());

    for pattern in catalog.patterns() {
        for position in 0..catalog.pattern_size() {
            let mut probe = pattern.clone();
            if let Some(slot) = probe.slots.get_mut(position) {
                *slot = SlotSymbol::Catch;
            }
            probe.is_catch = true;
            probes.push(probe);
        }
    }

    probes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        let lists: Vec<Vec<String>> = vec![
            vec!["Be".to_string(), "Pa".to_string()],
            vec!["Gi".to_string(), "Va".to_string()],
        ];
        Catalog::from_symbol_lists(&lists, "Xu").unwrap()
    }

    #[test]
    fn test_probe_count() {
        assert_eq!(derive_probes(&catalog()).len(), 4);
    }

    #[test]
    fn test_one_sentinel_per_probe() {
        for probe in derive_probes(&catalog()) {
            let sentinels = probe
                .slots
                .iter()
                .filter(|s| matches!(s, SlotSymbol::Catch))
                .count();
            assert_eq!(sentinels, 1);
            assert!(probe.is_catch);
        }
    }

    #[test]
    fn test_probe_inherits_pattern_index() {
        let probes = derive_probes(&catalog());
        let indices: Vec<u32> = probes.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![1, 1, 2, 2]);
    }

    #[test]
    fn test_sentinel_position_advances() {
        let probes = derive_probes(&catalog());
        let first = probes.first().unwrap();
        let second = probes.get(1).unwrap();
        assert_eq!(first.slots.first(), Some(&SlotSymbol::Catch));
        assert_eq!(second.slots.get(1), Some(&SlotSymbol::Catch));
        // Untouched slots keep the source identity
        assert_eq!(second.slots.first(), Some(&SlotSymbol::Item(1)));
    }
}
