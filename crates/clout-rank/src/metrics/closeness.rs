//! Closeness centrality with the Wasserman–Faust adjustment.
//!
//! For node `v` with `r` nodes in its BFS reach (itself included) and total
//! hop distance `D` to those nodes:
//!
//! ```text
//! C(v) = (r - 1) / D  ×  (r - 1) / (n - 1)
//! ```
//!
//! The second factor scales down nodes that only reach part of a
//! disconnected graph. Nodes that reach no one score `0.0`. Values lie in
//! `[0, 1]`.
//!
//! [`ClosenessDirection`] selects whether distances run from `v` outward or
//! from other nodes in to `v`.

use std::collections::{HashMap, VecDeque};

use clout_core::config::ClosenessDirection;
use petgraph::{Direction, graph::NodeIndex};
use tracing::instrument;

use crate::graph::InteractionGraph;

/// Compute closeness centrality for every node.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn closeness_centrality(
    g: &InteractionGraph,
    direction: ClosenessDirection,
) -> HashMap<String, f64> {
    let n = g.node_count();
    let walk = match direction {
        ClosenessDirection::Outgoing => Direction::Outgoing,
        ClosenessDirection::Incoming => Direction::Incoming,
    };

    let mut dist: Vec<i64> = vec![-1; n];
    let mut queue: VecDeque<NodeIndex> = VecDeque::new();

    g.graph
        .node_indices()
        .map(|source| {
            let (reached, total) = bfs_reach(g, source, walk, &mut dist, &mut queue);
            let score = if total > 0 && n > 1 {
                let others = (reached - 1) as f64;
                (others / total as f64) * (others / (n - 1) as f64)
            } else {
                0.0
            };
            (g.graph[source].clone(), score)
        })
        .collect()
}

/// BFS from `source`; returns (nodes reached including `source`, sum of
/// hop distances).
fn bfs_reach(
    g: &InteractionGraph,
    source: NodeIndex,
    walk: Direction,
    dist: &mut [i64],
    queue: &mut VecDeque<NodeIndex>,
) -> (usize, u64) {
    dist.fill(-1);
    queue.clear();

    dist[source.index()] = 0;
    queue.push_back(source);

    let mut reached = 0usize;
    let mut total = 0u64;

    while let Some(v) = queue.pop_front() {
        let dv = dist[v.index()];
        reached += 1;
        total += dv.unsigned_abs();

        for w in g.graph.neighbors_directed(v, walk) {
            if dist[w.index()] < 0 {
                dist[w.index()] = dv + 1;
                queue.push_back(w);
            }
        }
    }

    (reached, total)
}
