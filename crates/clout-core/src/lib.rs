#![forbid(unsafe_code)]
//! clout-core library.
//!
//! Typed interaction records, corpus loading, configuration, and the error
//! codes shared by the ranking engine and the CLI.
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums for record and corpus failures;
//!   `anyhow::Result` for config loading.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod corpus;
pub mod error;
pub mod record;
pub mod timing;

pub use corpus::Corpus;
pub use error::{CorpusError, ErrorCode, RecordError};
pub use record::{EngagementSnapshot, InteractionRecord, RawRecord, ResharedPost};
