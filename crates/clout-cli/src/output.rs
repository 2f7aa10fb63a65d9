//! Output layer: ranked tables as CSV, JSON, or a pretty terminal table,
//! and structured error rendering.
//!
//! The CSV layout matches the files the ranking tool has always written:
//!
//! ```text
//! user_name,score,listed_count,followers_count,statuses_count,central
//! ```
//!
//! Feature columns hold raw values by default and z-scores when
//! [`Columns::Normalized`] is selected.

use std::fmt;
use std::io::{self, Write};

use clap::ValueEnum;
use clout_core::{CorpusError, ErrorCode};
use clout_rank::ScoredRecord;
use serde::Serialize;

/// Shared width for human pretty separators.
pub const PRETTY_RULE_WIDTH: usize = 72;

/// Column headers of the exported table.
pub const HEADERS: [&str; 6] = [
    "user_name",
    "score",
    "listed_count",
    "followers_count",
    "statuses_count",
    "central",
];

/// Table encodings supported by `clout rank`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Comma-separated values with a header row.
    #[default]
    Csv,
    /// A JSON array of row objects.
    Json,
    /// Aligned table for terminals.
    Pretty,
}

impl OutputFormat {
    /// File extension used when the table is written to disk.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Pretty => "txt",
        }
    }
}

/// Which feature values fill the exported columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Columns {
    Raw,
    Normalized,
}

/// An engagement column value: the exact counter, or its z-score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Counter {
    Raw(u64),
    Z(f64),
}

impl Counter {
    /// Counters print whole; z-scores keep four places.
    fn pretty(self) -> String {
        match self {
            Self::Raw(n) => n.to_string(),
            Self::Z(z) => format!("{z:.4}"),
        }
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(n) => write!(f, "{n}"),
            Self::Z(z) => write!(f, "{z}"),
        }
    }
}

/// One exported row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow<'a> {
    pub user_name: &'a str,
    pub score: f64,
    pub listed_count: Counter,
    pub followers_count: Counter,
    pub statuses_count: Counter,
    pub central: f64,
}

impl<'a> ExportRow<'a> {
    pub fn new(record: &'a ScoredRecord, columns: Columns) -> Self {
        match columns {
            Columns::Raw => Self {
                user_name: &record.account,
                score: record.score,
                listed_count: Counter::Raw(record.listed_count),
                followers_count: Counter::Raw(record.follower_count),
                statuses_count: Counter::Raw(record.post_count),
                central: record.centrality_sum,
            },
            Columns::Normalized => Self {
                user_name: &record.account,
                score: record.score,
                listed_count: Counter::Z(record.normalized.listed_count),
                followers_count: Counter::Z(record.normalized.follower_count),
                statuses_count: Counter::Z(record.normalized.post_count),
                central: record.normalized.centrality_sum,
            },
        }
    }
}

/// Build export rows for every ranked record.
pub fn export_rows(rows: &[ScoredRecord], columns: Columns) -> Vec<ExportRow<'_>> {
    rows.iter().map(|r| ExportRow::new(r, columns)).collect()
}

/// Write `rows` to `w` in the requested format.
///
/// # Errors
///
/// Returns an error if serialization or the underlying writer fails.
pub fn write_table(
    w: &mut dyn Write,
    rows: &[ExportRow<'_>],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Csv => write_csv(w, rows)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *w, rows)?;
            writeln!(w)?;
        }
        OutputFormat::Pretty => write_pretty(w, rows)?,
    }
    Ok(())
}

fn write_csv(w: &mut dyn Write, rows: &[ExportRow<'_>]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(w);
    // Serialize emits the header from the first row only; write it
    // explicitly so an empty ranking still produces a header line.
    writer.write_record(HEADERS)?;
    for row in rows {
        writer.write_record([
            row.user_name.to_string(),
            row.score.to_string(),
            row.listed_count.to_string(),
            row.followers_count.to_string(),
            row.statuses_count.to_string(),
            row.central.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_pretty(w: &mut dyn Write, rows: &[ExportRow<'_>]) -> io::Result<()> {
    let name_width = rows
        .iter()
        .map(|r| r.user_name.chars().count())
        .max()
        .unwrap_or(0)
        .max("user_name".len());

    writeln!(
        w,
        "{:>4}  {:<name_width$}  {:>9}  {:>12}  {:>15}  {:>14}  {:>8}",
        "#", HEADERS[0], HEADERS[1], HEADERS[2], HEADERS[3], HEADERS[4], HEADERS[5],
    )?;
    pretty_rule(w)?;
    for (rank, row) in rows.iter().enumerate() {
        writeln!(
            w,
            "{:>4}  {:<name_width$}  {:>9.4}  {:>12}  {:>15}  {:>14}  {:>8.4}",
            rank + 1,
            row.user_name,
            row.score,
            row.listed_count.pretty(),
            row.followers_count.pretty(),
            row.statuses_count.pretty(),
            row.central,
        )?;
    }
    Ok(())
}

/// Write a horizontal separator used by pretty human output.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = PRETTY_RULE_WIDTH)
}

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

/// A structured error with a stable code and optional hint.
#[derive(Debug)]
pub struct CliError {
    pub message: String,
    pub hint: Option<String>,
    pub error_code: &'static str,
}

impl CliError {
    /// A blank `message` falls back to the code's summary.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            message: if message.trim().is_empty() {
                code.message().to_string()
            } else {
                message
            },
            hint: code.hint().map(str::to_string),
            error_code: code.code(),
        }
    }

    /// E9001 for an error that reached `main` without a coded rendering.
    pub fn unexpected(err: &anyhow::Error) -> Self {
        let code = ErrorCode::InternalUnexpected;
        Self::new(code, format!("{}: {err:#}", code.message()))
    }
}

/// Marks an error whose coded line is already on stderr.
#[derive(Debug)]
pub struct Rendered(pub String);

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for Rendered {}

/// Render `error` and return the [`Rendered`] marker carrying `summary`.
///
/// If stderr itself cannot be written, that failure is returned instead.
pub fn fail_with(error: &CliError, summary: impl Into<String>) -> anyhow::Error {
    match render_error(error) {
        Ok(()) => Rendered(summary.into()).into(),
        Err(err) => err.into(),
    }
}

/// The coded error `main` should still print for `err`, if any.
pub fn uncoded(err: &anyhow::Error) -> Option<CliError> {
    if err.downcast_ref::<Rendered>().is_some() {
        None
    } else {
        Some(CliError::unexpected(err))
    }
}

impl From<&CorpusError> for CliError {
    fn from(err: &CorpusError) -> Self {
        Self::new(err.code(), error_chain(err))
    }
}

/// Join an error and its sources into one line.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.ends_with(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}

/// Render `error` to stderr as `error[E####]: message` plus an optional hint.
pub fn render_error(error: &CliError) -> io::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    write_error(&mut out, error)
}

fn write_error(w: &mut dyn Write, error: &CliError) -> io::Result<()> {
    writeln!(w, "error[{}]: {}", error.error_code, error.message)?;
    if let Some(ref hint) = error.hint {
        writeln!(w, "  hint: {hint}")?;
    }
    Ok(())
}
