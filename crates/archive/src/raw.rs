//! Inbound archive record shapes.
//!
//! The scrape step writes one JSON data unit per set; the registry consumes
//! them either pre-parsed (via [`Registry::from_sets`](crate::Registry::from_sets))
//! or straight from a directory of `*.json` files.
//!
//! Comment records are kept as raw [`serde_json::Value`]s here so that one
//! malformed record can be skipped on its own instead of rejecting the
//! whole card.

use serde::Deserialize;
use std::collections::BTreeMap;

/// One set's data unit: every commented card in the set, keyed by its
/// printed name. `BTreeMap` keeps card iteration order deterministic.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSet {
    /// Set code the archive stored this unit under.
    pub set: String,
    /// Cards in the set, printed name to record.
    pub cards: BTreeMap<String, RawCard>,
}

/// One card's record within a set unit.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCard {
    /// Multiverse id of this printing.
    pub multiverse_id: u64,
    /// Raw comment records in archive order. A card with no discussion
    /// still appears in the archive with an empty list.
    #[serde(default)]
    pub comments: Vec<serde_json::Value>,
}
