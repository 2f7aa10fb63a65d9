#![forbid(unsafe_code)]

mod cmd;
mod output;

use std::env;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clout_core::ErrorCode;
use clout_core::config::{self, Config};
use clout_core::timing;
use output::{CliError, fail_with, render_error, uncoded};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "clout: rank the accounts driving a conversation",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging (debug level unless CLOUT_LOG is set).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit a stage timing report to stderr.
    #[arg(long, global = true)]
    timing: bool,

    /// Config file (default: ./clout.toml, then the user config directory).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Rank one entity's accounts by influence",
        long_about = "Build the interaction graph for one subject entity, score every \
                      account on centrality and engagement, and export the top rows.",
        after_help = "EXAMPLES:\n    # Write output/@united.csv\n    clout rank --tweets tweets.json --entity @united\n\n    # Print z-scored columns as a terminal table\n    clout rank --tweets tweets.json --entity @united --normalized --format pretty"
    )]
    Rank(cmd::rank::RankArgs),

    #[command(about = "List the subject entities in a corpus")]
    Entities(cmd::entities::EntitiesArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("CLOUT_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "clout=debug,info"
        } else {
            "clout=info,warn"
        })
    });

    let format = env::var("CLOUT_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let working_dir = env::current_dir()?;
    match config::resolve_config(cli.config.as_deref(), &working_dir) {
        Ok(config) => {
            debug!(?config, "effective config");
            Ok(config)
        }
        Err(err) => Err(fail_with(
            &CliError::new(ErrorCode::ConfigParseError, format!("{err:#}")),
            "could not load config",
        )),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let timing_enabled = cli.timing || timing::timing_enabled_from_env();
    timing::set_timing_enabled(timing_enabled);
    timing::clear_timings();

    let config = load_config(&cli)?;

    let command_result = match cli.command {
        Commands::Rank(ref args) => {
            timing::timed("cmd.rank", || cmd::rank::run_rank(args, &config))
        }
        Commands::Entities(ref args) => {
            timing::timed("cmd.entities", || cmd::entities::run_entities(args))
        }
    };

    if timing_enabled {
        let report = timing::collect_report();
        if report.is_empty() {
            eprintln!("timing report: no samples recorded");
        } else {
            eprintln!("timing report:");
            eprintln!("{}", report.display_table());
            eprintln!("timing report (json):");
            eprintln!("{}", serde_json::to_string_pretty(&report.to_json())?);
        }
    }

    if let Err(err) = command_result {
        if let Some(unexpected) = uncoded(&err) {
            render_error(&unexpected)?;
        }
        return Err(err);
    }
    Ok(())
}
