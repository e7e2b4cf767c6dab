//! Embedded card-reference resolution.
//!
//! Comment bodies reference other cards with a delimiter pair wrapping the
//! card name (`[[Lightning Bolt]]` by default). Resolution turns a body
//! into a span list: literal runs carried through untouched, plus link
//! spans pointing at the referenced card's cluster. Rendering the spans as
//! markup is the output layer's business, not this module's.

use pointed_archive::Registry;
use pointed_archive::models::Printing;
use pointed_identity::{ClusterKey, Clusters, NameIndex};
use tracing::debug;

/// The delimiter pair denoting an embedded card reference.
///
/// Markers do not nest; an open delimiter without a matching close is
/// ordinary text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    open: String,
    close: String,
}

impl Marker {
    /// A marker with custom delimiters.
    ///
    /// # Panics
    ///
    /// Panics if either delimiter is empty; an empty delimiter would match
    /// everywhere.
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        let (open, close) = (open.into(), close.into());
        assert!(!open.is_empty() && !close.is_empty(), "marker delimiters must be non-empty");
        Self { open, close }
    }
}

impl Default for Marker {
    /// The archive's own convention: `[[Card Name]]`.
    fn default() -> Self {
        Self::new("[[", "]]")
    }
}

/// One piece of a resolved comment body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    /// A run of text carried through untouched.
    Literal(String),
    /// A resolved card reference.
    Link {
        /// The card name as written in the comment.
        text: String,
        /// Cluster the reference points at.
        target: ClusterKey,
    },
}

impl Span {
    /// The visible text of the span.
    pub fn text(&self) -> &str {
        match self {
            Span::Literal(text) => text,
            Span::Link { text, .. } => text,
        }
    }
}

/// Resolves embedded card references against a frozen snapshot.
///
/// Purely in-memory: given the same registry, clusters and index, the same
/// input always produces the same spans. Unresolvable names degrade to
/// literal text; resolution never fails and never drops content.
#[derive(Debug)]
pub struct LinkResolver<'a> {
    registry: &'a Registry,
    clusters: &'a Clusters,
    index: &'a NameIndex,
    marker: Marker,
}

impl<'a> LinkResolver<'a> {
    /// A resolver over the run's frozen snapshot, using the default marker.
    pub fn new(registry: &'a Registry, clusters: &'a Clusters, index: &'a NameIndex) -> Self {
        Self { registry, clusters, index, marker: Marker::default() }
    }

    /// Replaces the marker pair.
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = marker;
        self
    }

    /// Splits `text` into literal runs and resolved references.
    ///
    /// Single left-to-right scan, no backtracking. Concatenating the spans'
    /// text reconstructs the input with only the delimiters of complete
    /// markers removed.
    ///
    /// `host` is the printing the comment lives on: when a referenced name
    /// matches several printings, a match inside the host's own cluster
    /// wins, so self-references resolve to the host's combined view.
    pub fn resolve(&self, host: &Printing, text: &str) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut rest = text;
        loop {
            let Some(open_at) = rest.find(&self.marker.open) else {
                push_literal(&mut spans, rest);
                break;
            };
            let after_open = &rest[open_at + self.marker.open.len()..];
            let Some(close_at) = after_open.find(&self.marker.close) else {
                // Dangling open delimiter: not a reference, keep as text.
                push_literal(&mut spans, rest);
                break;
            };
            push_literal(&mut spans, &rest[..open_at]);
            let span = self.reference(host, &after_open[..close_at]);
            if !span.text().is_empty() {
                spans.push(span);
            }
            rest = &after_open[close_at + self.marker.close.len()..];
        }
        spans
    }

    /// Resolves one marker's enclosed name to a span.
    fn reference(&self, host: &Printing, name: &str) -> Span {
        let text = name.to_string();
        let candidates = self.index.lookup(name);
        if candidates.is_empty() {
            debug!(name, "unresolved card reference");
            return Span::Literal(text);
        }
        if let Some(host_key) = self.clusters.key_for(host.multiverse_id)
            && candidates.iter().any(|id| self.clusters.key_for(*id) == Some(host_key))
        {
            return Span::Link { text, target: host_key.clone() };
        }
        // Several distinct cards can share a printed name and the archive
        // carries no disambiguation signal; pick the lexicographically
        // first printing so the output is never ambiguous.
        let winner = candidates
            .iter()
            .filter_map(|id| self.registry.printing(*id))
            .min_by(|a, b| a.name.cmp(&b.name).then_with(|| a.multiverse_id.cmp(&b.multiverse_id)));
        match winner.and_then(|p| self.clusters.key_for(p.multiverse_id)) {
            Some(key) => Span::Link { text, target: key.clone() },
            None => Span::Literal(text),
        }
    }
}

fn push_literal(spans: &mut Vec<Span>, text: &str) {
    if !text.is_empty() {
        spans.push(Span::Literal(text.to_string()));
    }
}
