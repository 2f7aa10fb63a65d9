//! Degree centrality.
//!
//! `C_D(v) = (in(v) + out(v)) / (N - 1)`, counting each neighbour edge once
//! and ignoring self-loops. A reciprocal pair contributes to both in- and
//! out-degree, so values lie in `[0, 2]`, and in `[0, 1]` for graphs
//! without reciprocal edges. A single-node graph scores `0.0`.

use std::collections::HashMap;

use petgraph::{Direction, visit::EdgeRef};
use tracing::instrument;

use crate::graph::InteractionGraph;

/// Compute normalized degree centrality for every node.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn degree_centrality(g: &InteractionGraph) -> HashMap<String, f64> {
    let n = g.node_count();
    let scale = if n > 1 { 1.0 / (n - 1) as f64 } else { 0.0 };

    g.graph
        .node_indices()
        .map(|idx| {
            let degree = g
                .graph
                .edges_directed(idx, Direction::Outgoing)
                .chain(g.graph.edges_directed(idx, Direction::Incoming))
                .filter(|e| e.source() != e.target())
                .count();
            (g.graph[idx].clone(), degree as f64 * scale)
        })
        .collect()
}
