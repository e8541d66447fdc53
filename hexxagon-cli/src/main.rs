//! HEXXAGON CLI - Command-line interface
//!
//! Commands:
//! - play: Play an interactive game in the terminal
//! - match: Run computer players against each other
//! - topology: Dump the board topology

mod match_cmd;
mod play_cmd;
mod topology_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use match_cmd::MatchArgs;
use play_cmd::PlayArgs;
use topology_cmd::TopologyArgs;

#[derive(Parser)]
#[command(name = "hexxagon")]
#[command(about = "HEXXAGON board game engine")]
struct Cli {
    /// Seed for random players
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game at the terminal
    Play(PlayArgs),
    /// Play computer players against each other
    Match(MatchArgs),
    /// Print the cell table and adjacency rings
    Topology(TopologyArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Play(args) => play_cmd::run(args),
        Commands::Match(args) => match_cmd::run(args, cli.seed),
        Commands::Topology(args) => topology_cmd::run(args),
    }
}

/// RUST_LOG wins over the verbosity flag
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
