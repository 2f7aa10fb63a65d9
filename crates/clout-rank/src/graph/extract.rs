//! Interaction extraction: records → typed, deduplicated edges.
//!
//! # Edge Rules
//!
//! For each record with author `a`:
//!
//! | Record shape                         | Edges emitted                              |
//! |--------------------------------------|--------------------------------------------|
//! | no mentions                          | `a → a` (`self`)                           |
//! | mentions, reshare of `r`'s post      | `a → r` (`reshare`), `r → r` (`tweet`)     |
//! | mentions, reply to `p` (no reshare)  | `a → p` (`reply`)                          |
//! | each mention `m` ∉ {`r`, `p`}        | `a → m` (`mention`)                        |
//!
//! Self-loops only register accounts as graph nodes. They carry no path
//! information and are ignored by every centrality measure.
//!
//! ## Deduplication
//!
//! Identical `(source, target, kind)` triples collapse to one edge. Weight
//! therefore reflects how many *kinds* of interaction link an ordered pair,
//! not how many times they occurred.

use std::collections::{HashMap, HashSet};
use std::fmt;

use clout_core::InteractionRecord;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Classification of a single edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    /// Author republished another account's post.
    Reshare,
    /// Author replied to another account.
    Reply,
    /// Author mentioned another account.
    Mention,
    /// Author posted without mentioning anyone.
    #[serde(rename = "self")]
    SelfPost,
    /// Original post attributed to a reshared author.
    #[serde(rename = "tweet")]
    Original,
}

impl InteractionKind {
    /// Stable label used in logs and edge dumps.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reshare => "reshare",
            Self::Reply => "reply",
            Self::Mention => "mention",
            Self::SelfPost => "self",
            Self::Original => "tweet",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified interaction between two accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub kind: InteractionKind,
}

impl Edge {
    fn new(source: &str, target: &str, kind: InteractionKind) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
            kind,
        }
    }

    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// An ordered account pair with the number of distinct interaction kinds
/// observed between them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeightedEdge {
    pub source: String,
    pub target: String,
    pub count: u32,
}

/// Extract the deduplicated edge set from `records`.
///
/// Edges are returned in first-seen order.
#[must_use]
#[instrument(skip(records), fields(records = records.len()))]
pub fn extract_edges(records: &[InteractionRecord]) -> Vec<Edge> {
    let mut seen: HashSet<Edge> = HashSet::new();
    let mut edges: Vec<Edge> = Vec::new();
    let mut emitted = 0usize;

    let mut push = |edge: Edge| {
        emitted += 1;
        if seen.insert(edge.clone()) {
            edges.push(edge);
        }
    };

    for record in records {
        let author = record.author();
        let mentions = record.mentions();

        if mentions.is_empty() {
            push(Edge::new(author, author, InteractionKind::SelfPost));
            continue;
        }

        let mut reshare_target: Option<&str> = None;
        let mut reply_target: Option<&str> = None;

        if let Some(reshared) = record.reshare_of() {
            let original = reshared.author.as_str();
            push(Edge::new(author, original, InteractionKind::Reshare));
            push(Edge::new(original, original, InteractionKind::Original));
            reshare_target = Some(original);
        } else if let Some(target) = record.reply_to() {
            push(Edge::new(author, target, InteractionKind::Reply));
            reply_target = Some(target);
        }

        for mentioned in mentions {
            let mentioned = mentioned.as_str();
            if Some(mentioned) == reshare_target || Some(mentioned) == reply_target {
                continue;
            }
            push(Edge::new(author, mentioned, InteractionKind::Mention));
        }
    }

    debug!(emitted, distinct = edges.len(), "edges extracted");
    edges
}

/// Group deduplicated edges on their ordered pair and count distinct kinds.
///
/// Pairs are returned in the order their first edge appears in `edges`.
/// Duplicate triples in the input are ignored, so the result is the same
/// whether or not `edges` was already deduplicated.
#[must_use]
pub fn weigh_edges(edges: &[Edge]) -> Vec<WeightedEdge> {
    let mut kinds_by_pair: HashMap<(&str, &str), HashSet<InteractionKind>> = HashMap::new();
    let mut order: Vec<(&str, &str)> = Vec::new();

    for edge in edges {
        let key = (edge.source.as_str(), edge.target.as_str());
        let kinds = kinds_by_pair.entry(key).or_insert_with(|| {
            order.push(key);
            HashSet::new()
        });
        kinds.insert(edge.kind);
    }

    order
        .into_iter()
        .map(|(source, target)| {
            let count = kinds_by_pair
                .get(&(source, target))
                .map_or(0, HashSet::len);
            WeightedEdge {
                source: source.to_string(),
                target: target.to_string(),
                count: u32::try_from(count).unwrap_or(u32::MAX),
            }
        })
        .collect()
}
