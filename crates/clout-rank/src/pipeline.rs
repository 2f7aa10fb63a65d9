//! End-to-end ranking: records in, ranked table out.
//!
//! ```text
//! records ─┬─▶ extract_edges ─▶ weigh_edges ─▶ InteractionGraph ─▶ centrality_table ─┐
//!          │                                                                         ├─▶ score_accounts ─▶ Ranking
//!          └─▶ EngagementTable::from_records ────────────────────────────────────────┘
//! ```
//!
//! Each stage consumes its input and hands an immutable table to the next.
//! Degenerate inputs (no records, a single account, constant columns,
//! accounts missing from one side of the join) all produce a result, and
//! are described in [`RankDiagnostics`].

use clout_core::InteractionRecord;
use clout_core::config::Config;
use clout_core::timing;
use serde::Serialize;
use tracing::{info, instrument};

use crate::engagement::EngagementTable;
use crate::graph::{InteractionGraph, extract_edges, weigh_edges};
use crate::metrics::centrality_table;
use crate::score::{Feature, ScoredRecord, score_accounts};

/// Counts and dropped accounts observed during one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RankDiagnostics {
    pub records: usize,
    pub distinct_edges: usize,
    pub graph_nodes: usize,
    pub graph_edges: usize,
    pub sampled_accounts: usize,
    pub joined_accounts: usize,
    /// Graph nodes without an engagement snapshot (e.g. accounts that were
    /// only replied to or mentioned).
    pub graph_only: Vec<String>,
    /// Sampled accounts that never became graph nodes.
    pub engagement_only: Vec<String>,
    /// Feature columns normalized to zero for lack of variance.
    pub degenerate_features: Vec<Feature>,
}

/// The ranked table for one subject entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranking {
    /// At most `limit` rows, descending by score.
    pub rows: Vec<ScoredRecord>,
    pub diagnostics: RankDiagnostics,
}

impl Ranking {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Run the full pipeline over one entity's records.
///
/// An empty record list produces an empty ranking.
#[must_use]
#[instrument(skip_all, fields(records = records.len()))]
pub fn rank_influencers(records: &[InteractionRecord], config: &Config) -> Ranking {
    if records.is_empty() {
        info!("no records; ranking is empty");
        return Ranking::default();
    }

    let edges = timing::timed("extract", || extract_edges(records));
    let weighted = timing::timed("weigh", || weigh_edges(&edges));
    let graph = timing::timed("graph", || InteractionGraph::from_weighted_edges(&weighted));
    let centrality = centrality_table(&graph, &config.centrality);
    let engagement = timing::timed("engagement", || EngagementTable::from_records(records));
    let scored = timing::timed("score", || {
        score_accounts(&centrality, &engagement, config.rank.limit)
    });

    let diagnostics = RankDiagnostics {
        records: records.len(),
        distinct_edges: edges.len(),
        graph_nodes: graph.node_count(),
        graph_edges: graph.edge_count(),
        sampled_accounts: engagement.len(),
        joined_accounts: scored.report.joined,
        graph_only: scored.report.graph_only,
        engagement_only: scored.report.engagement_only,
        degenerate_features: scored.report.degenerate,
    };

    info!(
        nodes = diagnostics.graph_nodes,
        edges = diagnostics.graph_edges,
        joined = diagnostics.joined_accounts,
        ranked = scored.rows.len(),
        "ranking complete"
    );

    Ranking {
        rows: scored.rows,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clout_core::EngagementSnapshot;

    fn post(author: &str, followers: u64) -> InteractionRecord {
        InteractionRecord::new(
            author,
            "text",
            EngagementSnapshot {
                listed_count: followers / 10,
                follower_count: followers,
                post_count: followers * 2,
            },
        )
        .expect("valid")
    }

    #[test]
    fn empty_input_is_empty_ranking() {
        let ranking = rank_influencers(&[], &Config::default());
        assert!(ranking.is_empty());
        assert_eq!(ranking.diagnostics, RankDiagnostics::default());
    }

    #[test]
    fn diagnostics_describe_the_run() {
        let records = vec![
            post("ann", 10).with_mentions(["bo"]),
            post("bo", 20).with_reply_to("cy").with_mentions(["cy"]),
        ];
        let ranking = rank_influencers(&records, &Config::default());
        let d = &ranking.diagnostics;

        assert_eq!(d.records, 2);
        assert_eq!(d.graph_nodes, 3);
        assert_eq!(d.graph_edges, 2);
        assert_eq!(d.sampled_accounts, 2);
        assert_eq!(d.joined_accounts, 2);
        assert_eq!(d.graph_only, vec!["cy".to_string()]);
        assert!(d.engagement_only.is_empty());
        assert_eq!(ranking.rows.len(), 2);
    }

    #[test]
    fn limit_from_config_is_applied() {
        let records: Vec<InteractionRecord> =
            (0..10).map(|i| post(&format!("u{i}"), i * 100)).collect();
        let mut config = Config::default();
        config.rank.limit = 3;

        let ranking = rank_influencers(&records, &config);
        assert_eq!(ranking.rows.len(), 3);
        assert_eq!(ranking.rows[0].account, "u9");
        assert_eq!(ranking.diagnostics.joined_accounts, 10);
    }
}
