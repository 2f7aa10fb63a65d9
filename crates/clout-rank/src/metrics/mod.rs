//! Centrality metrics over the interaction graph.
//!
//! # Overview
//!
//! Three complementary measures, each computed on the unweighted topology
//! (hop counts). Interaction volume is left to the engagement features.
//!
//! - **Degree** ([`degree`]): how many accounts a node interacts with
//!   directly.
//! - **Betweenness** ([`betweenness`]): how often a node bridges shortest
//!   paths between other accounts.
//! - **Closeness** ([`closeness`]): how few hops separate a node from the
//!   accounts it can reach.
//!
//! Self-loops only register nodes; every measure ignores them.
//!
//! # Usage
//!
//! ```rust,ignore
//! use clout_rank::graph::build_interaction_graph;
//! use clout_rank::metrics::centrality_table;
//!
//! let graph = build_interaction_graph(&records);
//! let table = centrality_table(&graph, &config.centrality);
//! for row in table.rows() {
//!     println!("{} {:.3}", row.account, row.sum());
//! }
//! ```

pub mod betweenness;
pub mod closeness;
pub mod degree;

use std::collections::HashMap;

use clout_core::config::CentralityConfig;
use clout_core::timing;
use serde::Serialize;
use tracing::{debug, instrument};

pub use betweenness::{BetweennessOptions, betweenness_centrality};
pub use closeness::closeness_centrality;
pub use degree::degree_centrality;

use crate::graph::InteractionGraph;

/// The three centrality scores of one account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentralityRecord {
    pub account: String,
    pub degree: f64,
    pub betweenness: f64,
    pub closeness: f64,
}

impl CentralityRecord {
    /// Unweighted sum of the three raw scores.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.degree + self.betweenness + self.closeness
    }
}

/// One [`CentralityRecord`] per graph node, in node-index order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CentralityTable {
    rows: Vec<CentralityRecord>,
    index: HashMap<String, usize>,
}

impl CentralityTable {
    #[must_use]
    pub fn rows(&self) -> &[CentralityRecord] {
        &self.rows
    }

    #[must_use]
    pub fn get(&self, account: &str) -> Option<&CentralityRecord> {
        self.index.get(account).map(|&i| &self.rows[i])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<CentralityRecord> for CentralityTable {
    fn from_iter<I: IntoIterator<Item = CentralityRecord>>(iter: I) -> Self {
        let rows: Vec<CentralityRecord> = iter.into_iter().collect();
        let index = rows
            .iter()
            .enumerate()
            .map(|(i, row)| (row.account.clone(), i))
            .collect();
        Self { rows, index }
    }
}

/// Compute degree, betweenness, and closeness for every node.
#[must_use]
#[instrument(skip(g, config), fields(nodes = g.node_count()))]
pub fn centrality_table(g: &InteractionGraph, config: &CentralityConfig) -> CentralityTable {
    let options = BetweennessOptions {
        parallel: config.parallel_threshold > 0 && g.node_count() >= config.parallel_threshold,
    };

    let degree = timing::timed("centrality.degree", || degree_centrality(g));
    let betweenness = timing::timed("centrality.betweenness", || {
        betweenness_centrality(g, options)
    });
    let closeness = timing::timed("centrality.closeness", || {
        closeness_centrality(g, config.closeness)
    });

    let table: CentralityTable = g
        .accounts()
        .map(|account| CentralityRecord {
            account: account.to_string(),
            degree: degree.get(account).copied().unwrap_or(0.0),
            betweenness: betweenness.get(account).copied().unwrap_or(0.0),
            closeness: closeness.get(account).copied().unwrap_or(0.0),
        })
        .collect();

    debug!(
        rows = table.len(),
        parallel = options.parallel,
        "centrality table computed"
    );
    table
}
