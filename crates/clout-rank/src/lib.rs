#![forbid(unsafe_code)]
//! clout-rank library.
//!
//! Ranks the accounts in one subject entity's interaction corpus by a
//! composite of interaction-graph centrality and engagement.
//!
//! # Conventions
//!
//! - **Errors**: stages are total functions over validated records; the
//!   only fallible step (record validation) lives in `clout-core`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod engagement;
pub mod graph;
pub mod metrics;
pub mod pipeline;
pub mod score;

pub use engagement::{EngagementRecord, EngagementTable};
pub use graph::{InteractionGraph, build_interaction_graph};
pub use metrics::{CentralityRecord, CentralityTable, centrality_table};
pub use pipeline::{RankDiagnostics, Ranking, rank_influencers};
pub use score::{ScoredRecord, score_accounts};
