//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness centrality measures how often an account lies on shortest
//! paths between other pairs of accounts. High-betweenness accounts bridge
//! otherwise separate parts of the conversation.
//!
//! # Algorithm
//!
//! Brandes (2001) for unweighted directed graphs:
//!
//! 1. For each source node `s`, run BFS to compute shortest-path counts
//!    and distances (hop count; edge weights are not path lengths).
//! 2. Accumulate dependency scores in reverse BFS order (farthest nodes first).
//! 3. Sum the dependency scores across all source nodes.
//!
//! Complexity: O(V * E).
//!
//! # Parallelism
//!
//! Each source's dependencies are independent, so sources are split into
//! fixed-size chunks. Chunks run on the rayon pool when requested, and the
//! per-chunk partial sums are always reduced in chunk order. The sequential
//! path uses the same chunking, so both paths produce identical bits.
//!
//! # Output
//!
//! Scores are normalized by `1 / ((n-1)(n-2))`, the directed-graph factor,
//! and lie in `[0, 1]`. Graphs with fewer than three nodes score `0.0`
//! everywhere. Unreachable pairs contribute nothing.

use std::collections::{HashMap, VecDeque};

use petgraph::{Direction, graph::NodeIndex};
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::graph::InteractionGraph;

/// Number of BFS sources accumulated per work unit.
const SOURCE_CHUNK: usize = 64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BetweennessOptions {
    /// Spread source chunks across the rayon thread pool.
    pub parallel: bool,
}

/// Compute normalized betweenness centrality for every node.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn betweenness_centrality(
    g: &InteractionGraph,
    options: BetweennessOptions,
) -> HashMap<String, f64> {
    let n = g.node_count();
    if n == 0 {
        return HashMap::new();
    }

    let raw = raw_betweenness(g, options);
    let scale = if n > 2 {
        1.0 / ((n - 1) as f64 * (n - 2) as f64)
    } else {
        0.0
    };

    g.graph
        .node_indices()
        .map(|idx| (g.graph[idx].clone(), raw[idx.index()] * scale))
        .collect()
}

/// Unnormalized betweenness, indexed by node index.
#[must_use]
pub fn raw_betweenness(g: &InteractionGraph, options: BetweennessOptions) -> Vec<f64> {
    let n = g.node_count();
    let sources: Vec<NodeIndex> = g.graph.node_indices().collect();

    let partials: Vec<Vec<f64>> = if options.parallel {
        debug!(chunks = sources.len().div_ceil(SOURCE_CHUNK), "parallel betweenness");
        sources
            .par_chunks(SOURCE_CHUNK)
            .map(|chunk| accumulate_sources(g, chunk))
            .collect()
    } else {
        sources
            .chunks(SOURCE_CHUNK)
            .map(|chunk| accumulate_sources(g, chunk))
            .collect()
    };

    let mut cb = vec![0.0; n];
    for partial in partials {
        for (total, value) in cb.iter_mut().zip(partial) {
            *total += value;
        }
    }
    cb
}

/// Sum the single-source dependencies of every node in `sources`.
fn accumulate_sources(g: &InteractionGraph, sources: &[NodeIndex]) -> Vec<f64> {
    let graph = &g.graph;
    let n = graph.node_count();
    let mut cb: Vec<f64> = vec![0.0; n];

    // Buffers reused across sources.
    let mut stack: Vec<NodeIndex> = Vec::with_capacity(n);
    let mut predecessors: Vec<Vec<NodeIndex>> = vec![Vec::new(); n];
    let mut sigma: Vec<f64> = vec![0.0; n];
    let mut dist: Vec<i64> = vec![-1; n];
    let mut delta: Vec<f64> = vec![0.0; n];
    let mut queue: VecDeque<NodeIndex> = VecDeque::new();

    for &s in sources {
        let si = s.index();

        stack.clear();
        for list in &mut predecessors {
            list.clear();
        }
        sigma.fill(0.0);
        dist.fill(-1);
        delta.fill(0.0);

        sigma[si] = 1.0;
        dist[si] = 0;
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            let vi = v.index();
            stack.push(v);

            for w in graph.neighbors_directed(v, Direction::Outgoing) {
                let wi = w.index();

                // First visit to w?
                if dist[wi] < 0 {
                    dist[wi] = dist[vi] + 1;
                    queue.push_back(w);
                }

                // Shortest path to w via v? (never true for a self-loop)
                if dist[wi] == dist[vi] + 1 {
                    sigma[wi] += sigma[vi];
                    predecessors[wi].push(v);
                }
            }
        }

        // Accumulate dependencies in reverse BFS order.
        while let Some(w) = stack.pop() {
            let wi = w.index();

            for &v in &predecessors[wi] {
                let vi = v.index();
                if sigma[wi] > 0.0 {
                    delta[vi] += (sigma[vi] / sigma[wi]) * (1.0 + delta[wi]);
                }
            }

            if wi != si {
                cb[wi] += delta[wi];
            }
        }
    }

    cb
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
