mod card;
mod clusters;
mod index;
mod key;

pub use self::card::LogicalCard;
pub use self::clusters::Clusters;
pub use self::index::NameIndex;
pub use self::key::ClusterKey;

/// Canonical form of a card name for identity and lookup purposes:
/// surrounding whitespace trimmed, case folded. Two printings whose names
/// normalize equally are "the same name" everywhere in this crate.
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
