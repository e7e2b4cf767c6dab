//! Identity resolution: partitioning printings into logical cards.

use crate::card::LogicalCard;
use crate::key::ClusterKey;
use crate::normalize;
use pointed_archive::Registry;
use pointed_archive::models::Printing;
use std::collections::{BTreeMap, HashMap};
use tracing::{info, instrument};

/// The full partition of a registry's printings into [`LogicalCard`]s,
/// together with the reverse printing-to-cluster mapping.
///
/// Clusters are recomputed wholesale on every run rather than patched
/// incrementally; a printing that gained enrichment since the last run
/// simply lands under its oracle key on the next build, so stale fallback
/// merges cannot survive.
#[derive(Debug, Default)]
pub struct Clusters {
    by_key: BTreeMap<ClusterKey, LogicalCard>,
    by_printing: HashMap<u64, ClusterKey>,
}

impl Clusters {
    /// Partitions every printing in the registry into exactly one cluster.
    ///
    /// Printings whose enrichment carries an oracle id cluster under that
    /// key; the rest join a fallback cluster keyed by normalized display
    /// name, so incomplete provider coverage never leaves a printing
    /// unclustered.
    #[instrument(skip_all)]
    pub fn build(registry: &Registry) -> Self {
        let mut groups: BTreeMap<ClusterKey, Vec<&Printing>> = BTreeMap::new();
        for printing in registry.iter() {
            let key = match printing.oracle_id() {
                Some(oracle) => ClusterKey::Oracle(oracle.to_string()),
                None => ClusterKey::Name(normalize(&printing.name)),
            };
            groups.entry(key).or_default().push(printing);
        }

        let mut clusters = Self::default();
        for (key, mut members) in groups {
            members.sort_by_key(|p| release_order(p));
            let Some(name) = representative(&members).map(|p| p.name.clone()) else {
                continue;
            };
            for printing in &members {
                clusters.by_printing.insert(printing.multiverse_id, key.clone());
            }
            let members = members.iter().map(|p| p.multiverse_id).collect();
            clusters.by_key.insert(key.clone(), LogicalCard { key, name, members });
        }
        info!(
            printings = registry.len(),
            cards = clusters.by_key.len(),
            "grouped printings into logical cards"
        );
        clusters
    }

    /// Looks up a cluster by its identity key.
    pub fn get(&self, key: &ClusterKey) -> Option<&LogicalCard> {
        self.by_key.get(key)
    }

    /// The cluster key a printing belongs to.
    pub fn key_for(&self, multiverse_id: u64) -> Option<&ClusterKey> {
        self.by_printing.get(&multiverse_id)
    }

    /// The cluster a printing belongs to.
    pub fn card_for(&self, multiverse_id: u64) -> Option<&LogicalCard> {
        self.key_for(multiverse_id).and_then(|key| self.by_key.get(key))
    }

    /// All sibling printings of `printing` within its cluster, excluding
    /// the printing itself.
    pub fn other_printings<'a>(&'a self, registry: &'a Registry, printing: &Printing) -> Vec<&'a Printing> {
        self.card_for(printing.multiverse_id)
            .map(|card| card.printings(registry).filter(|p| p.multiverse_id != printing.multiverse_id).collect())
            .unwrap_or_default()
    }

    /// All clusters in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = &LogicalCard> {
        self.by_key.values()
    }

    /// Number of logical cards.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Returns `true` when no printings were clustered.
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

/// Member ordering key: release date ascending with unknown dates after all
/// known ones, then multiverse id ascending.
fn release_order(printing: &Printing) -> (bool, Option<time::Date>, u64) {
    (printing.released.is_none(), printing.released, printing.multiverse_id)
}

/// The printing whose name represents the cluster: most recent release
/// date (unknown counts as most recent), ties broken by ascending
/// multiverse id. Members must already be in release order.
fn representative<'a>(members: &[&'a Printing]) -> Option<&'a Printing> {
    let newest = members.last()?;
    members
        .iter()
        .filter(|p| p.released == newest.released)
        .min_by_key(|p| p.multiverse_id)
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pointed_archive::{EnrichmentCache, RawSet, Registry};
    use pointed_archive::models::Enrichment;
    use serde_json::json;

    fn registry(cards: &[(&str, &str, u64)], enrichment: &[(u64, &str, Option<&str>)]) -> Registry {
        let sets: Vec<RawSet> = cards
            .iter()
            .map(|(set, name, mid)| {
                serde_json::from_value(json!({
                    "set": set,
                    "cards": { *name: { "multiverse_id": mid, "comments": [] } }
                }))
                .unwrap()
            })
            .collect();
        let cache = EnrichmentCache::from_records(enrichment.iter().map(|(mid, key, released)| {
            let record: Enrichment = serde_json::from_value(json!({
                "oracle_id": key,
                "released_at": released,
            }))
            .unwrap();
            (*mid, record)
        }));
        Registry::from_sets(sets, &cache)
    }

    #[test]
    fn printings_sharing_a_key_cluster_together() {
        // Two Counterspell printings, LEA 1993 and 7ED 2001, same oracle key.
        let registry = registry(
            &[("LEA", "Counterspell", 101), ("7ED", "Counterspell", 205)],
            &[(101, "K1", Some("1993-08-05")), (205, "K1", Some("2001-04-11"))],
        );
        let clusters = Clusters::build(&registry);

        assert_eq!(clusters.len(), 1);
        let card = clusters.get(&ClusterKey::Oracle("K1".to_string())).unwrap();
        assert_eq!(card.name, "Counterspell");
        assert_eq!(card.members, vec![101, 205]);
        assert!(card.is_reprint());
    }

    #[test]
    fn every_printing_is_in_exactly_one_cluster() {
        let registry = registry(
            &[("LEA", "Counterspell", 101), ("7ED", "Counterspell", 205), ("LEA", "Fireball", 300)],
            &[(101, "K1", None), (205, "K1", None)],
        );
        let clusters = Clusters::build(&registry);

        let total_members: usize = clusters.iter().map(|card| card.members.len()).sum();
        assert_eq!(total_members, registry.len());
        for printing in registry.iter() {
            let key = clusters.key_for(printing.multiverse_id).unwrap();
            assert!(clusters.get(key).unwrap().members.contains(&printing.multiverse_id));
        }
    }

    #[test]
    fn unenriched_printings_fall_back_to_name_clusters() {
        let registry = registry(
            &[("LEA", "Fireball", 300), ("4ED", "fireball", 301), ("LEA", "Shivan Dragon", 302)],
            &[],
        );
        let clusters = Clusters::build(&registry);

        assert_eq!(clusters.len(), 2);
        let fireball = clusters.card_for(300).unwrap();
        // Case-insensitive name match joins the same fallback cluster.
        assert_eq!(fireball.key, ClusterKey::Name("fireball".to_string()));
        assert_eq!(fireball.members, vec![300, 301]);
        assert!(clusters.card_for(302).unwrap().key.is_fallback());
    }

    #[test]
    fn enrichment_moves_a_printing_out_of_its_fallback_cluster() {
        let before = registry(&[("LEA", "Fireball", 300), ("4ED", "Fireball", 301)], &[]);
        let clusters = Clusters::build(&before);
        assert_eq!(clusters.len(), 1);
        assert!(clusters.key_for(300).unwrap().is_fallback());

        // Next run the provider knows printing 300; rebuilding re-clusters
        // it under the oracle key instead of patching the old partition.
        let after = registry(&[("LEA", "Fireball", 300), ("4ED", "Fireball", 301)], &[(300, "K9", None)]);
        let clusters = Clusters::build(&after);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters.key_for(300).unwrap(), &ClusterKey::Oracle("K9".to_string()));
        assert!(clusters.key_for(301).unwrap().is_fallback());
    }

    #[test]
    fn unknown_release_dates_sort_after_known_and_win_representative() {
        let registry = registry(
            &[("LEA", "Old Name", 10), ("XXX", "New Name", 20), ("YYY", "Newer Name", 5)],
            &[(10, "K1", Some("1993-08-05")), (20, "K1", None), (5, "K1", None)],
        );
        let clusters = Clusters::build(&registry);

        let card = clusters.get(&ClusterKey::Oracle("K1".to_string())).unwrap();
        // Known date first, then the two unknown-date printings by id.
        assert_eq!(card.members, vec![10, 5, 20]);
        // Both unknowns tie for most recent; the lower multiverse id wins.
        assert_eq!(card.name, "Newer Name");
    }

    #[test]
    fn rebuilding_yields_an_identical_partition() {
        let registry = registry(
            &[("LEA", "Counterspell", 101), ("7ED", "Counterspell", 205), ("LEA", "Fireball", 300)],
            &[(101, "K1", Some("1993-08-05")), (205, "K1", Some("2001-04-11"))],
        );
        let first = Clusters::build(&registry);
        let second = Clusters::build(&registry);

        let snapshot = |c: &Clusters| {
            c.iter().map(|card| (card.key.clone(), card.name.clone(), card.members.clone())).collect::<Vec<_>>()
        };
        assert_eq!(snapshot(&first), snapshot(&second));
    }

    #[test]
    fn other_printings_excludes_self() {
        let registry = registry(
            &[("LEA", "Counterspell", 101), ("7ED", "Counterspell", 205)],
            &[(101, "K1", None), (205, "K1", None)],
        );
        let clusters = Clusters::build(&registry);

        let host = registry.printing(101).unwrap();
        let others = clusters.other_printings(&registry, host);
        assert_eq!(others.len(), 1);
        assert_eq!(others[0].multiverse_id, 205);
    }
}
