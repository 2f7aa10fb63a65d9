//! `clout rank`: rank one subject entity's accounts and export the table.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use clout_core::ErrorCode;
use clout_core::config::Config;
use clout_core::timing;
use clout_rank::{Ranking, rank_influencers};
use tracing::{info, warn};

use super::load_corpus;
use crate::output::{
    CliError, Columns, ExportRow, OutputFormat, export_rows, fail_with, write_table,
};

#[derive(Args, Debug)]
pub struct RankArgs {
    /// Corpus JSON file: an object mapping entity handles to record arrays.
    #[arg(long, value_name = "FILE")]
    pub tweets: PathBuf,

    /// Subject entity handle whose records are ranked (e.g. `@united`).
    #[arg(long, value_name = "HANDLE")]
    pub entity: String,

    /// Directory the ranked table is written to.
    #[arg(long, value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Export z-scored feature values instead of raw counters.
    #[arg(long)]
    pub normalized: bool,

    /// Table encoding.
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Print the table to stdout instead of writing a file.
    #[arg(long)]
    pub stdout: bool,

    /// Maximum number of rows (overrides `rank.limit`).
    #[arg(long)]
    pub limit: Option<usize>,
}

impl RankArgs {
    const fn columns(&self) -> Columns {
        if self.normalized {
            Columns::Normalized
        } else {
            Columns::Raw
        }
    }

    /// Pretty tables are for terminals and always go to stdout.
    fn writes_to_stdout(&self) -> bool {
        self.stdout || self.format == OutputFormat::Pretty
    }

    /// `<DIR>/<HANDLE>.<ext>`
    fn output_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", self.entity, self.format.extension()))
    }
}

/// Execute `clout rank`.
///
/// # Errors
///
/// Returns an error if the corpus cannot be loaded, the entity is missing or
/// holds a malformed record, or the table cannot be written.
pub fn run_rank(args: &RankArgs, config: &Config) -> anyhow::Result<()> {
    let corpus = timing::timed("load", || load_corpus(&args.tweets))?;

    let records = match timing::timed("validate", || corpus.records_for(&args.entity)) {
        Ok(records) => records,
        Err(err) => {
            return Err(fail_with(
                &CliError::from(&err),
                format!("cannot rank entity {}", args.entity),
            ));
        }
    };

    let mut config = config.clone();
    if let Some(limit) = args.limit {
        config.rank.limit = limit;
    }

    let ranking = rank_influencers(&records, &config);
    log_diagnostics(&ranking);

    let rows = export_rows(&ranking.rows, args.columns());

    if args.writes_to_stdout() {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        return write_table(&mut out, &rows, args.format);
    }

    let path = args.output_path();
    if let Err(err) = timing::timed("write", || write_file(&path, &rows, args.format)) {
        return Err(fail_with(
            &CliError::new(
                ErrorCode::OutputWriteFailed,
                format!("failed to write {}: {err:#}", path.display()),
            ),
            format!("could not write {}", path.display()),
        ));
    }

    info!(path = %path.display(), rows = rows.len(), "ranked table written");
    println!("wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

fn write_file(
    path: &Path,
    rows: &[ExportRow<'_>],
    format: OutputFormat,
) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let mut writer = BufWriter::new(fs::File::create(path)?);
    write_table(&mut writer, rows, format)?;
    writer.flush()?;
    Ok(())
}

fn log_diagnostics(ranking: &Ranking) {
    let d = &ranking.diagnostics;
    info!(
        records = d.records,
        nodes = d.graph_nodes,
        edges = d.graph_edges,
        sampled = d.sampled_accounts,
        joined = d.joined_accounts,
        "pipeline summary"
    );
    if !d.graph_only.is_empty() {
        warn!(
            count = d.graph_only.len(),
            "accounts in the graph without an engagement snapshot were not ranked"
        );
    }
    if ranking.is_empty() {
        warn!("no accounts could be ranked");
    }
}
