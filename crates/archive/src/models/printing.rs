use super::{Comment, Enrichment};
use crate::rating;
use time::Date;

/// One specific physical or digital edition of a card, with its own
/// identifier and comment thread. This is the primary entity in the system.
///
/// Printings are owned exclusively by the [`Registry`](crate::Registry);
/// logical-card clusters, aggregated views and link resolution all refer to
/// them by multiverse id or by borrow, never by copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Printing {
    /// Unique identifier of this edition.
    pub multiverse_id: u64,
    /// Display name exactly as printed.
    pub name: String,
    /// Set code, from the provider record when present, otherwise from the
    /// archive's own set unit.
    pub set_code: String,
    /// Release date of the set; unknown for printings the provider has no
    /// record of.
    pub released: Option<Date>,
    /// Comments in insertion order. Insertion order is archive order, not
    /// display order; views re-sort without touching this sequence.
    pub comments: Vec<Comment>,
    /// Provider metadata block, absent when the provider has no record.
    pub enrichment: Option<Enrichment>,
}

impl Printing {
    /// Logical-identity key from the provider, when known.
    pub fn oracle_id(&self) -> Option<&str> {
        self.enrichment.as_ref().and_then(|e| e.oracle_id.as_deref())
    }

    /// Illustration credit from the provider, when known.
    pub fn artist(&self) -> Option<&str> {
        self.enrichment.as_ref().and_then(|e| e.artist.as_deref())
    }

    /// Combined star score across this printing's own comments.
    pub fn rating(&self) -> Option<f64> {
        rating::combined(&self.comments)
    }
}
