//! Composite influence scoring.
//!
//! Joins the centrality and engagement tables on account id, z-scores the
//! four features, combines them with fixed weights, and ranks.

pub mod composite;
pub mod normalize;

pub use composite::{
    Feature, FeatureWeights, NormalizedFeatures, ScoreReport, Scored, ScoredRecord, WEIGHTS,
    score_accounts,
};
pub use normalize::{ZScores, z_score};
