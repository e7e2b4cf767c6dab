//! Vote-aggregate to star-score conversion.

use crate::models::Comment;

/// Converts a vote aggregate into a star score in `0.0..=5.0`.
///
/// Gatherer votes are cast out of ten while the site displays stars out of
/// five, hence the halving. Returns `None` when `vote_count` is zero: an
/// unrated comment is not a zero-star comment, and callers must render the
/// two differently.
///
/// The score is clamped because archived vote sums are not guaranteed to
/// stay within `vote_count * 10`; the invariant is advisory only.
pub fn rating(vote_sum: i64, vote_count: u32) -> Option<f64> {
    if vote_count == 0 {
        return None;
    }
    Some((vote_sum as f64 / (2.0 * f64::from(vote_count))).clamp(0.0, 5.0))
}

/// Combined score over any number of comments: total vote sum over total
/// vote count, not a mean of per-comment scores, so a heavily-voted comment
/// weighs more than a drive-by single vote.
pub fn combined<'a>(comments: impl IntoIterator<Item = &'a Comment>) -> Option<f64> {
    let (mut sum, mut count) = (0_i64, 0_u64);
    for comment in comments {
        sum += comment.vote_sum;
        count += u64::from(comment.vote_count);
    }
    if count == 0 {
        return None;
    }
    Some((sum as f64 / (2.0 * count as f64)).clamp(0.0, 5.0))
}
