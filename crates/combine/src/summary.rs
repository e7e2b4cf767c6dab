//! Per-card roll-ups for the A–Z index page.

use crate::aggregate::combined_rating;
use pointed_archive::Registry;
use pointed_identity::{ClusterKey, Clusters};
use std::collections::BTreeMap;
use tracing::instrument;

/// One row of the card index: a logical card and its combined numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct CardSummary {
    /// Cluster identity, for linking to the combined view.
    pub key: ClusterKey,
    /// Representative display name.
    pub name: String,
    /// Number of printings in the cluster.
    pub printings: usize,
    /// Total comment count across all printings.
    pub comments: usize,
    /// Combined star score across all printings, `None` when nothing in
    /// the cluster has been rated.
    pub rating: Option<f64>,
}

/// One summary row per logical card, sorted by case-folded name with the
/// cluster key as tie-break so equal names order the same on every run.
#[instrument(skip_all)]
pub fn summaries(registry: &Registry, clusters: &Clusters) -> Vec<CardSummary> {
    let mut rows: Vec<CardSummary> = clusters
        .iter()
        .map(|card| CardSummary {
            key: card.key.clone(),
            name: card.name.clone(),
            printings: card.members.len(),
            comments: card.comment_count(registry),
            rating: combined_rating(registry, card),
        })
        .collect();
    rows.sort_by(|a, b| {
        a.name.to_lowercase().cmp(&b.name.to_lowercase()).then_with(|| a.key.cmp(&b.key))
    });
    rows
}

/// Buckets index rows under their leading character for the alphabetical
/// navigation bar. Names starting with a digit or anything else
/// non-alphabetic share the `"0-9"` bucket.
pub fn group_by_letter(rows: Vec<CardSummary>) -> BTreeMap<String, Vec<CardSummary>> {
    let mut buckets: BTreeMap<String, Vec<CardSummary>> = BTreeMap::new();
    for row in rows {
        let bucket = match row.name.chars().next() {
            Some(first) if first.is_ascii_alphabetic() => first.to_ascii_uppercase().to_string(),
            _ => "0-9".to_string(),
        };
        buckets.entry(bucket).or_default().push(row);
    }
    buckets
}
