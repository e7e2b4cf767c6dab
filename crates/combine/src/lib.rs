mod aggregate;
pub mod links;
pub mod summary;

pub use crate::aggregate::{AggregatedComment, CommentOrder, aggregate, aggregate_printing, combined_rating};
pub use crate::links::{LinkResolver, Marker, Span};
pub use crate::summary::{CardSummary, group_by_letter, summaries};
