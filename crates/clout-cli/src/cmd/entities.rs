//! `clout entities`: list the subject entities in a corpus.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use clout_core::Corpus;
use serde::Serialize;

use super::load_corpus;

#[derive(Args, Debug)]
pub struct EntitiesArgs {
    /// Corpus JSON file: an object mapping entity handles to record arrays.
    #[arg(long, value_name = "FILE")]
    pub tweets: PathBuf,

    /// Emit a JSON array instead of one line per entity.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct EntitySummary<'a> {
    entity: &'a str,
    records: usize,
}

fn summarize(corpus: &Corpus) -> Vec<EntitySummary<'_>> {
    corpus
        .entities()
        .map(|entity| EntitySummary {
            entity,
            records: corpus.record_count(entity).unwrap_or(0),
        })
        .collect()
}

/// Execute `clout entities`.
///
/// # Errors
///
/// Returns an error if the corpus cannot be loaded or stdout is closed.
pub fn run_entities(args: &EntitiesArgs) -> anyhow::Result<()> {
    let corpus = load_corpus(&args.tweets)?;
    let summary = summarize(&corpus);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &summary)?;
        writeln!(out)?;
    } else {
        for row in &summary {
            writeln!(out, "{}\t{}", row.entity, row.records)?;
        }
    }
    Ok(())
}
