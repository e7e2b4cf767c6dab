use crate::key::ClusterKey;
use pointed_archive::Registry;
use pointed_archive::models::Printing;

/// The cluster of all printings representing the same named card.
///
/// Built once per generation run by [`Clusters::build`](crate::Clusters::build)
/// and immutable afterward. Members are held by multiverse id; the
/// printings themselves stay owned by the [`Registry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalCard {
    /// Cluster identity.
    pub key: ClusterKey,
    /// Representative display name: the most recent printing's name, with
    /// unknown release dates counting as most recent and ties broken by
    /// ascending multiverse id.
    pub name: String,
    /// Member multiverse ids ordered by release date ascending, unknown
    /// dates last, ties by multiverse id ascending.
    pub members: Vec<u64>,
}

impl LogicalCard {
    /// Member printings in release order, resolved against the registry
    /// the cluster was built from. Items borrow from the registry only,
    /// so a view built from them can outlive the cluster borrow.
    pub fn printings<'r>(&self, registry: &'r Registry) -> impl Iterator<Item = &'r Printing> {
        self.members.iter().filter_map(|id| registry.printing(*id))
    }

    /// Total number of comments across all member printings.
    pub fn comment_count(&self, registry: &Registry) -> usize {
        self.printings(registry).map(|p| p.comments.len()).sum()
    }

    /// Returns `true` when the card exists in more than one printing.
    pub fn is_reprint(&self) -> bool {
        self.members.len() > 1
    }
}
