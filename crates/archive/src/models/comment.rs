use crate::rating;
use serde::Deserialize;

/// One archived comment on one printing.
///
/// Immutable once loaded; every downstream view (combined pages, link
/// resolution) borrows comments rather than copying or editing them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Comment {
    /// Display name of the comment author.
    pub author: String,
    /// Numeric account id of the author.
    pub author_id: u64,
    /// Human-readable posting time as captured from the source page.
    /// Agrees with [`timestamp`](Self::timestamp) on order; only the
    /// timestamp is used as a sort key.
    pub datetime: String,
    /// Posting time in epoch milliseconds. Authoritative for ordering.
    pub timestamp: i64,
    /// Archive id, unique across the whole corpus and monotonically
    /// assigned. Stable sort tie-break and permalink target.
    pub id: u64,
    /// Raw HTML body.
    pub text: String,
    /// Plain-text variant of the body.
    pub text_plain: String,
    /// Number of votes cast on this comment.
    pub vote_count: u32,
    /// Sum of cast votes. May be negative, and may fall outside the
    /// nominal `vote_count * 10` range in scraped data.
    pub vote_sum: i64,
}

impl Comment {
    /// Star score of this comment, `None` when nobody has voted.
    pub fn rating(&self) -> Option<f64> {
        rating::rating(self.vote_sum, self.vote_count)
    }
}
