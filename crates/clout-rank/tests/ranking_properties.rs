//! Property-based invariants of the ranking pipeline.
//!
//! Records are drawn from a small account alphabet so generated graphs are
//! dense enough to exercise reshares, replies, reciprocal edges, and
//! disconnected components.

#![allow(clippy::cast_precision_loss)]

use std::collections::HashSet;

use clout_core::config::{CentralityConfig, Config};
use clout_core::{EngagementSnapshot, InteractionRecord, ResharedPost};
use clout_rank::graph::{build_interaction_graph, extract_edges, weigh_edges};
use clout_rank::metrics::centrality_table;
use clout_rank::rank_influencers;
use clout_rank::score::z_score;
use proptest::prelude::*;

const ACCOUNTS: [&str; 7] = ["ann", "bo", "cy", "dee", "eli", "fay", "gus"];
const TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone)]
struct RecordShape {
    author: usize,
    counters: (u64, u64, u64),
    reshare: Option<(usize, (u64, u64, u64))>,
    reply: Option<usize>,
    mentions: Vec<usize>,
}

fn counters() -> impl Strategy<Value = (u64, u64, u64)> {
    (0u64..1_000, 0u64..100_000, 0u64..50_000)
}

fn record_shape() -> impl Strategy<Value = RecordShape> {
    (
        0..ACCOUNTS.len(),
        counters(),
        proptest::option::of((0..ACCOUNTS.len(), counters())),
        proptest::option::of(0..ACCOUNTS.len()),
        proptest::collection::vec(0..ACCOUNTS.len(), 0..4),
    )
        .prop_map(|(author, counters, reshare, reply, mentions)| RecordShape {
            author,
            counters,
            reshare,
            reply,
            mentions,
        })
}

fn snapshot((listed, followers, posts): (u64, u64, u64)) -> EngagementSnapshot {
    EngagementSnapshot {
        listed_count: listed,
        follower_count: followers,
        post_count: posts,
    }
}

fn materialize(shapes: &[RecordShape]) -> Vec<InteractionRecord> {
    shapes
        .iter()
        .map(|shape| {
            let mut record =
                InteractionRecord::new(ACCOUNTS[shape.author], "text", snapshot(shape.counters))
                    .expect("alphabet accounts are non-blank");
            if let Some((author, counters)) = shape.reshare {
                record = record.with_reshare(ResharedPost {
                    author: ACCOUNTS[author].to_string(),
                    text: "original".to_string(),
                    author_engagement: snapshot(counters),
                });
            }
            if let Some(target) = shape.reply {
                record = record.with_reply_to(ACCOUNTS[target]);
            }
            record.with_mentions(shape.mentions.iter().map(|&m| ACCOUNTS[m]))
        })
        .collect()
}

fn records() -> impl Strategy<Value = Vec<InteractionRecord>> {
    proptest::collection::vec(record_shape(), 0..40).prop_map(|shapes| materialize(&shapes))
}

proptest! {
    #[test]
    fn duplicated_input_yields_same_weighted_edges(records in records()) {
        let once = weigh_edges(&extract_edges(&records));

        let mut doubled = records.clone();
        doubled.extend(records.iter().cloned());
        let twice = weigh_edges(&extract_edges(&doubled));

        prop_assert_eq!(once, twice);
    }

    #[test]
    fn every_author_is_a_graph_node(records in records()) {
        let graph = build_interaction_graph(&records);
        for record in &records {
            prop_assert!(graph.contains(record.author()), "missing {}", record.author());
        }
    }

    #[test]
    fn no_edge_is_weighted_zero(records in records()) {
        let weighted = weigh_edges(&extract_edges(&records));
        let mut pairs = HashSet::new();
        for edge in &weighted {
            prop_assert!(edge.count >= 1);
            prop_assert!(edge.count <= 5);
            prop_assert!(pairs.insert((edge.source.clone(), edge.target.clone())));
        }
    }

    #[test]
    fn centrality_stays_in_bounds(records in records()) {
        let graph = build_interaction_graph(&records);
        let table = centrality_table(&graph, &CentralityConfig::default());

        prop_assert_eq!(table.len(), graph.node_count());
        for row in table.rows() {
            // A reciprocal pair a → b, b → a counts in both directions, so degree reaches 2.
            prop_assert!((-TOLERANCE..=2.0 + TOLERANCE).contains(&row.degree), "{row:?}");
            prop_assert!((-TOLERANCE..=1.0 + TOLERANCE).contains(&row.betweenness), "{row:?}");
            prop_assert!((-TOLERANCE..=1.0 + TOLERANCE).contains(&row.closeness), "{row:?}");
        }
    }

    #[test]
    fn parallel_centrality_matches_sequential(records in records()) {
        let graph = build_interaction_graph(&records);
        let sequential = centrality_table(&graph, &CentralityConfig::default());
        let parallel = centrality_table(
            &graph,
            &CentralityConfig {
                parallel_threshold: 1,
                ..CentralityConfig::default()
            },
        );
        prop_assert_eq!(sequential, parallel);
    }

    #[test]
    fn z_scores_have_zero_mean_unit_std(values in proptest::collection::vec(-1e6f64..1e6, 2..64)) {
        let z = z_score(&values);
        prop_assert_eq!(z.values.len(), values.len());

        let n = values.len() as f64;
        let mean = z.values.iter().sum::<f64>() / n;
        prop_assert!(mean.abs() < 1e-6, "mean {mean}");

        if z.degenerate {
            prop_assert!(z.values.iter().all(|v| *v == 0.0));
        } else {
            let var = z.values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            prop_assert!((var.sqrt() - 1.0).abs() < 1e-6, "std {}", var.sqrt());
        }
    }

    #[test]
    fn ranking_is_deterministic_and_sorted(records in records()) {
        let config = Config::default();
        let first = rank_influencers(&records, &config);
        let second = rank_influencers(&records, &config);
        prop_assert_eq!(&first, &second);

        prop_assert!(first.rows.len() <= config.rank.limit);
        for pair in first.rows.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        for row in &first.rows {
            prop_assert!(row.score.is_finite());
        }
    }

    #[test]
    fn ranked_accounts_are_both_nodes_and_sampled(records in records()) {
        let graph = build_interaction_graph(&records);
        let ranking = rank_influencers(&records, &Config::default());

        let sampled: HashSet<&str> = records
            .iter()
            .flat_map(|r| {
                std::iter::once(r.author()).chain(r.reshare_of().map(|p| p.author.as_str()))
            })
            .collect();
        for row in &ranking.rows {
            prop_assert!(graph.contains(&row.account));
            prop_assert!(sampled.contains(row.account.as_str()));
        }
    }
}
