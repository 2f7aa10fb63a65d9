//! Interaction graph derivation.
//!
//! # Overview
//!
//! Raw records are classified into typed edges, collapsed to weighted
//! ordered pairs, and loaded into a petgraph directed graph that feeds the
//! centrality engine.
//!
//! ## Pipeline
//!
//! ```text
//! &[InteractionRecord]
//!        ↓  extract::extract_edges()
//! Vec<Edge>          (source, target, kind), deduplicated
//!        ↓  extract::weigh_edges()
//! Vec<WeightedEdge>  (source, target, distinct-kind count)
//!        ↓  build::InteractionGraph::from_weighted_edges()
//! InteractionGraph   (DiGraph<String, u32> + account index)
//! ```

pub mod build;
pub mod extract;

pub use build::InteractionGraph;
pub use extract::{Edge, InteractionKind, WeightedEdge, extract_edges, weigh_edges};

use clout_core::InteractionRecord;

/// Run extraction, weighting, and graph construction in one step.
#[must_use]
pub fn build_interaction_graph(records: &[InteractionRecord]) -> InteractionGraph {
    let edges = extract_edges(records);
    InteractionGraph::from_weighted_edges(&weigh_edges(&edges))
}
