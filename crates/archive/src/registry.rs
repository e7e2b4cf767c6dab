//! Printing registry construction.

use crate::error::{ErrorKind, Result};
use crate::models::{Comment, Printing};
use crate::provider::EnrichmentCache;
use crate::raw::RawSet;
use derive_more::Display;
use exn::ResultExt;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// A recoverable problem encountered while building the registry.
///
/// Warnings never abort a run; they are collected so the generation step
/// can report what was skipped.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// A comment record was missing required fields and was skipped.
    #[display("malformed comment record on '{card}' in set {set}: {detail}")]
    MalformedRecord {
        /// Set code of the data unit the record came from.
        set: String,
        /// Printed card name the record was attached to.
        card: String,
        /// Deserializer message naming the offending field.
        detail: String,
    },
    /// A whole set unit could not be read or parsed; its printings are
    /// lost for this run but every other set still loads.
    #[display("unreadable set unit {}: {detail}", path.display())]
    SetUnreadable {
        /// Path of the data unit on disk.
        path: PathBuf,
        /// What went wrong reading or parsing it.
        detail: String,
    },
}

/// The complete set of printings known to one generation run.
///
/// Built once from the archive, then frozen: every downstream structure
/// (clusters, name index, aggregated views) borrows from it, and nothing
/// mutates it after construction. Iteration is in ascending multiverse id,
/// so two runs over the same input observe identical order.
#[derive(Debug, Default)]
pub struct Registry {
    printings: BTreeMap<u64, Printing>,
    warnings: Vec<LoadWarning>,
}

impl Registry {
    /// Builds the registry from pre-parsed set units.
    ///
    /// One [`Printing`] per (set, card name, multiverse id); a card with
    /// zero comments is still registered. Malformed comment records are
    /// skipped with a [`LoadWarning::MalformedRecord`]. When the same
    /// multiverse id appears in more than one unit the comment lists are
    /// merged and re-sorted by archive id.
    #[instrument(skip_all)]
    pub fn from_sets(sets: impl IntoIterator<Item = RawSet>, cache: &EnrichmentCache) -> Self {
        let mut registry = Self::default();
        for set in sets {
            registry.absorb(set, cache);
        }
        info!(
            printings = registry.printings.len(),
            skipped = registry.warnings.len(),
            "registry built"
        );
        registry
    }

    /// Builds the registry from a directory of `*.json` set units.
    ///
    /// Files are visited in path order for determinism. A unit that cannot
    /// be read or parsed is recorded as [`LoadWarning::SetUnreadable`] and
    /// the rest of the archive still loads.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ArchiveRoot`] only when the directory itself
    /// cannot be listed; that leaves nothing to generate from.
    #[instrument(skip(cache))]
    pub fn load_dir(path: impl AsRef<Path> + std::fmt::Debug, cache: &EnrichmentCache) -> Result<Self> {
        let root = path.as_ref();
        let entries = std::fs::read_dir(root).or_raise(|| ErrorKind::ArchiveRoot(root.to_path_buf()))?;
        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        let mut registry = Self::default();
        for unit in paths {
            let parsed = std::fs::read(&unit)
                .map_err(|err| err.to_string())
                .and_then(|bytes| serde_json::from_slice::<RawSet>(&bytes).map_err(|err| err.to_string()));
            match parsed {
                Ok(set) => registry.absorb(set, cache),
                Err(detail) => {
                    warn!(unit = %unit.display(), %detail, "skipping unreadable set unit");
                    registry.warnings.push(LoadWarning::SetUnreadable { path: unit, detail });
                },
            }
        }
        info!(
            printings = registry.printings.len(),
            warnings = registry.warnings.len(),
            "registry loaded"
        );
        Ok(registry)
    }

    fn absorb(&mut self, set: RawSet, cache: &EnrichmentCache) {
        let RawSet { set: unit_code, cards } = set;
        for (name, card) in cards {
            let mut comments = Vec::with_capacity(card.comments.len());
            for record in card.comments {
                match serde_json::from_value::<Comment>(record) {
                    Ok(comment) => comments.push(comment),
                    Err(err) => {
                        warn!(set = %unit_code, card = %name, %err, "skipping malformed comment record");
                        self.warnings.push(LoadWarning::MalformedRecord {
                            set: unit_code.clone(),
                            card: name.clone(),
                            detail: err.to_string(),
                        });
                    },
                }
            }
            match self.printings.entry(card.multiverse_id) {
                Entry::Occupied(mut entry) => {
                    // Same printing split across units: merge the threads
                    // back into archive order.
                    let printing = entry.get_mut();
                    printing.comments.extend(comments);
                    printing.comments.sort_by_key(|c| c.id);
                },
                Entry::Vacant(entry) => {
                    let enrichment = cache.get(card.multiverse_id).cloned();
                    let set_code = enrichment
                        .as_ref()
                        .and_then(|e| e.set_code.clone())
                        .unwrap_or_else(|| unit_code.clone());
                    let released = enrichment.as_ref().and_then(|e| e.released);
                    entry.insert(Printing {
                        multiverse_id: card.multiverse_id,
                        name,
                        set_code,
                        released,
                        comments,
                        enrichment,
                    });
                },
            }
        }
    }

    /// Looks up a printing by multiverse id.
    pub fn printing(&self, multiverse_id: u64) -> Option<&Printing> {
        self.printings.get(&multiverse_id)
    }

    /// All printings in ascending multiverse id order.
    pub fn iter(&self) -> impl Iterator<Item = &Printing> {
        self.printings.values()
    }

    /// Number of registered printings.
    pub fn len(&self) -> usize {
        self.printings.len()
    }

    /// Returns `true` if the registry holds no printings.
    pub fn is_empty(&self) -> bool {
        self.printings.is_empty()
    }

    /// Problems skipped over during construction.
    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }
}
