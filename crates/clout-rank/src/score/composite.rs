use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;
use tracing::{debug, instrument, warn};

use super::normalize::z_score;
use crate::engagement::{EngagementRecord, EngagementTable};
use crate::metrics::CentralityTable;

/// Fixed weights of the composite formula:
///
/// `S(v) = 0.30·z(listed) + 0.25·z(followers) + 0.15·z(posts) + 0.30·z(centrality)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureWeights {
    pub listed: f64,
    pub followers: f64,
    pub posts: f64,
    pub centrality: f64,
}

pub const WEIGHTS: FeatureWeights = FeatureWeights {
    listed: 0.30,
    followers: 0.25,
    posts: 0.15,
    centrality: 0.30,
};

/// A scored feature column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    ListedCount,
    FollowerCount,
    PostCount,
    CentralitySum,
}

impl Feature {
    pub const ALL: [Self; 4] = [
        Self::ListedCount,
        Self::FollowerCount,
        Self::PostCount,
        Self::CentralitySum,
    ];

    /// Column header used in exported tables.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::ListedCount => "listed_count",
            Self::FollowerCount => "followers_count",
            Self::PostCount => "statuses_count",
            Self::CentralitySum => "central",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Z-scored feature values of one account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NormalizedFeatures {
    pub listed_count: f64,
    pub follower_count: f64,
    pub post_count: f64,
    pub centrality_sum: f64,
}

impl NormalizedFeatures {
    /// Weighted composite of the normalized features.
    #[must_use]
    pub fn composite(&self, weights: &FeatureWeights) -> f64 {
        (weights.listed * self.listed_count)
            + (weights.followers * self.follower_count)
            + (weights.posts * self.post_count)
            + (weights.centrality * self.centrality_sum)
    }
}

/// One row of the ranked output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRecord {
    pub account: String,
    pub score: f64,
    pub listed_count: u64,
    pub follower_count: u64,
    pub post_count: u64,
    pub centrality_sum: f64,
    pub normalized: NormalizedFeatures,
}

/// What the join and normalization steps did besides scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreReport {
    /// Accounts present in both tables.
    pub joined: usize,
    /// Graph nodes with no engagement snapshot, in graph order.
    pub graph_only: Vec<String>,
    /// Sampled accounts that never became graph nodes, in first-seen order.
    pub engagement_only: Vec<String>,
    /// Feature columns that had zero variance and were zeroed.
    pub degenerate: Vec<Feature>,
}

/// Scored rows plus the join/normalization report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scored {
    pub rows: Vec<ScoredRecord>,
    pub report: ScoreReport,
}

/// Join, normalize, score, and rank accounts.
///
/// Accounts missing from either table are dropped and listed in the
/// report. Join order is engagement first-seen order; the descending sort
/// is stable, so equal scores keep that order. At most `limit` rows are
/// returned.
#[must_use]
#[instrument(skip(centrality, engagement), fields(graph = centrality.len(), sampled = engagement.len()))]
#[allow(clippy::cast_precision_loss)]
pub fn score_accounts(
    centrality: &CentralityTable,
    engagement: &EngagementTable,
    limit: usize,
) -> Scored {
    let mut report = ScoreReport::default();

    let joined: Vec<(&EngagementRecord, f64)> = engagement
        .rows()
        .iter()
        .filter_map(|e| match centrality.get(&e.account) {
            Some(c) => Some((e, c.sum())),
            None => {
                report.engagement_only.push(e.account.clone());
                None
            }
        })
        .collect();

    report.graph_only = centrality
        .rows()
        .iter()
        .filter(|c| engagement.get(&c.account).is_none())
        .map(|c| c.account.clone())
        .collect();
    report.joined = joined.len();

    if !report.graph_only.is_empty() || !report.engagement_only.is_empty() {
        debug!(
            graph_only = report.graph_only.len(),
            engagement_only = report.engagement_only.len(),
            "accounts dropped by join"
        );
    }

    let listed = z_score(&feature_column(&joined, |e| e.listed_count as f64));
    let followers = z_score(&feature_column(&joined, |e| e.follower_count as f64));
    let posts = z_score(&feature_column(&joined, |e| e.post_count as f64));
    let central = z_score(&joined.iter().map(|(_, sum)| *sum).collect::<Vec<f64>>());

    for (feature, z) in Feature::ALL
        .into_iter()
        .zip([&listed, &followers, &posts, &central])
    {
        if z.degenerate {
            report.degenerate.push(feature);
        }
    }
    if !report.degenerate.is_empty() && report.joined > 1 {
        warn!(columns = ?report.degenerate, "zero-variance features contribute 0 to the score");
    }

    let mut rows: Vec<ScoredRecord> = joined
        .iter()
        .enumerate()
        .map(|(i, (e, sum))| {
            let normalized = NormalizedFeatures {
                listed_count: listed.values[i],
                follower_count: followers.values[i],
                post_count: posts.values[i],
                centrality_sum: central.values[i],
            };
            ScoredRecord {
                account: e.account.clone(),
                score: normalized.composite(&WEIGHTS),
                listed_count: e.listed_count,
                follower_count: e.follower_count,
                post_count: e.post_count,
                centrality_sum: *sum,
                normalized,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    rows.truncate(limit);

    Scored { rows, report }
}

fn feature_column(
    joined: &[(&EngagementRecord, f64)],
    value: impl Fn(&EngagementRecord) -> f64,
) -> Vec<f64> {
    joined.iter().map(|(e, _)| value(e)).collect()
}
