//! Name-to-printing lookup index.

use crate::normalize;
use pointed_archive::Registry;
use std::collections::HashMap;
use tracing::{info, instrument};

/// Mapping from normalized display name to every printing bearing that
/// name.
///
/// Several distinct printings (and occasionally several distinct logical
/// cards) can share one printed name; the index keeps them all and leaves
/// disambiguation to the caller. Built once per run against the frozen
/// registry, read-only afterward.
#[derive(Debug, Default)]
pub struct NameIndex {
    names: HashMap<String, Vec<u64>>,
}

impl NameIndex {
    /// Indexes every printing in the registry by normalized name.
    ///
    /// The registry iterates in ascending multiverse id, so each entry's
    /// id list is already sorted and deterministic.
    #[instrument(skip_all)]
    pub fn build(registry: &Registry) -> Self {
        let mut names: HashMap<String, Vec<u64>> = HashMap::new();
        for printing in registry.iter() {
            names.entry(normalize(&printing.name)).or_default().push(printing.multiverse_id);
        }
        info!(names = names.len(), printings = registry.len(), "built name index");
        Self { names }
    }

    /// Multiverse ids of every printing whose name normalizes to `name`,
    /// ascending. Empty for unknown names.
    pub fn lookup(&self, name: &str) -> &[u64] {
        self.names.get(&normalize(name)).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct normalized names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` when the index holds no names.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pointed_archive::{EnrichmentCache, RawSet};
    use serde_json::json;

    fn registry() -> Registry {
        let sets: Vec<RawSet> = [
            json!({ "set": "LEA", "cards": { "Counterspell": { "multiverse_id": 94, "comments": [] } } }),
            json!({ "set": "7ED", "cards": { "Counterspell": { "multiverse_id": 25871, "comments": [] } } }),
            json!({ "set": "LEA", "cards": { "Lightning Bolt": { "multiverse_id": 209, "comments": [] } } }),
        ]
        .into_iter()
        .map(|unit| serde_json::from_value(unit).unwrap())
        .collect();
        Registry::from_sets(sets, &EnrichmentCache::empty())
    }

    #[test]
    fn shared_names_keep_every_printing() {
        let index = NameIndex::build(&registry());
        assert_eq!(index.len(), 2);
        assert_eq!(index.lookup("Counterspell"), &[94, 25871]);
    }

    #[test]
    fn lookup_normalizes_its_argument() {
        let index = NameIndex::build(&registry());
        assert_eq!(index.lookup("  lightning BOLT "), &[209]);
    }

    #[test]
    fn unknown_names_resolve_to_nothing() {
        let index = NameIndex::build(&registry());
        assert!(index.lookup("Black Lotus").is_empty());
    }
}
