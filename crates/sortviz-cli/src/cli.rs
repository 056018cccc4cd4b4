use std::io::Write;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::generate::{GenerateArgs, run_generate};
use crate::list::run_list;
use crate::play::{PlayArgs, run_play};
use crate::race::{RaceArgs, run_race};
use crate::trace::{TraceArgs, run_trace};

#[derive(Debug, Parser)]
#[command(
    name = "sortviz",
    about = "Generate, replay and race step traces of textbook sorting algorithms",
    version
)]
pub struct Cli {
    /// Machine-readable output (JSON, or JSON lines for step streams).
    #[arg(long, global = true)]
    pub json: bool,

    /// Emit logs as JSON on stderr. Filter with SORTVIZ_LOG.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the available algorithms.
    List,

    /// Print a generated array.
    Generate(GenerateArgs),

    /// Print every step of one algorithm's trace.
    Trace(TraceArgs),

    /// Play a trace in real time.
    Play(PlayArgs),

    /// Race two algorithms on the same input.
    Race(RaceArgs),
}

impl Commands {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Generate(_) => "generate",
            Self::Trace(_) => "trace",
            Self::Play(_) => "play",
            Self::Race(_) => "race",
        }
    }
}

pub fn run_from_env() -> Result<()> {
    run(Cli::parse())
}

pub fn run(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with(cli, &mut out)
}

/// Dispatch `cli`, writing command output to `out`.
pub fn run_with(cli: Cli, out: &mut impl Write) -> Result<()> {
    tracing::debug!(message = "cli.dispatch", command = cli.command.name(), json = cli.json);
    match &cli.command {
        Commands::List => run_list(out, cli.json),
        Commands::Generate(args) => run_generate(args, out, cli.json),
        Commands::Trace(args) => run_trace(args, out, cli.json),
        Commands::Play(args) => run_play(args, out, cli.json),
        Commands::Race(args) => run_race(args, out, cli.json),
    }?;
    out.flush()?;
    Ok(())
}
