use derive_more::Display;

/// Identity of one logical-card cluster.
///
/// The metadata provider's oracle id is the real identity key; printings
/// the provider has no record of yet fall back to their normalized display
/// name so that every printing lands in exactly one cluster even while
/// provider coverage is partial. Once a later run finds enrichment for a
/// printing, rebuilding the clusters moves it under its oracle key.
///
/// `Ord` makes cluster iteration order deterministic across runs.
#[derive(Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClusterKey {
    /// Stable identity key from the metadata provider.
    #[display("{_0}")]
    Oracle(String),
    /// Fallback cluster keyed by normalized display name.
    #[display("name:{_0}")]
    Name(String),
}

impl ClusterKey {
    /// Returns `true` for clusters still waiting on provider enrichment.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Name(_))
    }
}
