//! Cross-printing comment aggregation.

use pointed_archive::models::Comment;
use pointed_archive::{Registry, rating};
use pointed_identity::LogicalCard;
use std::cmp::Ordering;
use tracing::instrument;

/// A comment inside a combined view, tagged with where it was posted.
///
/// Wraps the source [`Comment`] by reference; the provenance tag exists
/// only in the view and is never written back onto the comment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregatedComment<'a> {
    /// The source comment, borrowed from the registry.
    pub comment: &'a Comment,
    /// Set code of the printing the comment was posted on.
    pub set_code: &'a str,
    /// Multiverse id of the source printing.
    pub multiverse_id: u64,
}

/// Display orderings for a combined comment view.
///
/// Every ordering is total: ties always fall through to ascending archive
/// id, so two comments only compare equal when they *are* the same comment
/// and repeated aggregation yields bit-identical sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentOrder {
    /// Highest-rated first; unrated comments after every rated one.
    RatingDesc,
    /// Newest first, by epoch-millisecond timestamp.
    DateDesc,
    /// Oldest first, by epoch-millisecond timestamp.
    DateAsc,
    /// Member printings in release order; within a printing, archive order.
    PrintingRelease,
}

/// Merges every member printing's comments into one ordered view.
///
/// Source comments are never mutated; the result borrows from the
/// registry and can be rebuilt any number of times with identical output.
#[instrument(skip_all, fields(card = %card.key, order = ?order))]
pub fn aggregate<'a>(registry: &'a Registry, card: &LogicalCard, order: CommentOrder) -> Vec<AggregatedComment<'a>> {
    let mut view: Vec<AggregatedComment<'a>> = Vec::new();
    for printing in card.printings(registry) {
        for comment in &printing.comments {
            view.push(AggregatedComment {
                comment,
                set_code: &printing.set_code,
                multiverse_id: printing.multiverse_id,
            });
        }
    }
    sort(&mut view, order);
    view
}

/// The combined view filtered to one member printing's comments, in the
/// same ordering. A multiverse id outside the cluster yields an empty view.
pub fn aggregate_printing<'a>(
    registry: &'a Registry,
    card: &LogicalCard,
    multiverse_id: u64,
    order: CommentOrder,
) -> Vec<AggregatedComment<'a>> {
    let mut view = aggregate(registry, card, order);
    view.retain(|c| c.multiverse_id == multiverse_id);
    view
}

/// Combined star score across the whole cluster: total vote sum over total
/// vote count, `None` when no member comment has any votes.
pub fn combined_rating(registry: &Registry, card: &LogicalCard) -> Option<f64> {
    rating::combined(card.printings(registry).flat_map(|p| p.comments.iter()))
}

fn sort(view: &mut [AggregatedComment<'_>], order: CommentOrder) {
    let by_id = |a: &AggregatedComment<'_>, b: &AggregatedComment<'_>| a.comment.id.cmp(&b.comment.id);
    match order {
        CommentOrder::RatingDesc => view.sort_by(|a, b| {
            match (a.comment.rating(), b.comment.rating()) {
                (Some(left), Some(right)) => right.total_cmp(&left),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
            .then_with(|| by_id(a, b))
        }),
        CommentOrder::DateDesc => {
            view.sort_by(|a, b| b.comment.timestamp.cmp(&a.comment.timestamp).then_with(|| by_id(a, b)));
        },
        CommentOrder::DateAsc => {
            view.sort_by(|a, b| a.comment.timestamp.cmp(&b.comment.timestamp).then_with(|| by_id(a, b)));
        },
        // Construction already visits members in release order and keeps
        // archive order within each printing.
        CommentOrder::PrintingRelease => {},
    }
}
