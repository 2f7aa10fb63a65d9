//! Interaction graph construction from weighted edges.
//!
//! ## Edge Direction
//!
//! An edge `A → B` means "A interacted with B" (reshared, replied to, or
//! mentioned B). The edge weight is the number of distinct interaction kinds
//! between the ordered pair. `A → B` and `B → A` are separate edges.
//!
//! ## Node Order
//!
//! Nodes are inserted in first-seen endpoint order (source before target),
//! so node indices, and every per-node table derived from them, are
//! deterministic for a given edge list.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use tracing::{debug, instrument};

use crate::graph::extract::WeightedEdge;

/// A directed, weighted account-interaction graph.
#[derive(Debug, Clone, Default)]
pub struct InteractionGraph {
    /// Nodes = account ids, edge weights = interaction-kind counts.
    pub graph: DiGraph<String, u32>,
    /// Mapping from account id to petgraph `NodeIndex`.
    pub node_map: HashMap<String, NodeIndex>,
}

impl InteractionGraph {
    /// Build the graph, inserting each weighted edge exactly once.
    ///
    /// Self-loops are kept: they are how an author with no outgoing
    /// interactions becomes a node.
    #[must_use]
    #[instrument(skip(edges), fields(edges = edges.len()))]
    pub fn from_weighted_edges(edges: &[WeightedEdge]) -> Self {
        let mut graph = DiGraph::<String, u32>::with_capacity(edges.len(), edges.len());
        let mut node_map: HashMap<String, NodeIndex> = HashMap::with_capacity(edges.len());

        for edge in edges {
            let source = *node_map
                .entry(edge.source.clone())
                .or_insert_with(|| graph.add_node(edge.source.clone()));
            let target = *node_map
                .entry(edge.target.clone())
                .or_insert_with(|| graph.add_node(edge.target.clone()));

            // `weigh_edges` already merged pairs; guard against callers
            // passing the same pair twice.
            match graph.find_edge(source, target) {
                Some(existing) => graph[existing] += edge.count,
                None => {
                    graph.add_edge(source, target, edge.count);
                }
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "interaction graph built"
        );

        Self { graph, node_map }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of directed edges, self-loops included.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub fn self_loop_count(&self) -> usize {
        self.graph
            .edge_references()
            .filter(|e| e.source() == e.target())
            .count()
    }

    #[must_use]
    pub fn contains(&self, account: &str) -> bool {
        self.node_map.contains_key(account)
    }

    /// Look up the `NodeIndex` for an account id.
    #[must_use]
    pub fn node_index(&self, account: &str) -> Option<NodeIndex> {
        self.node_map.get(account).copied()
    }

    /// Return the account id label for a node.
    #[must_use]
    pub fn account(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(String::as_str)
    }

    /// Weight of the edge `source → target`, if present.
    #[must_use]
    pub fn weight(&self, source: &str, target: &str) -> Option<u32> {
        let s = self.node_index(source)?;
        let t = self.node_index(target)?;
        self.graph.find_edge(s, t).map(|e| self.graph[e])
    }

    /// Account ids in node-index order.
    pub fn accounts(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(String::as_str)
    }
}
