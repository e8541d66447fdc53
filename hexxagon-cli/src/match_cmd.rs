//! Match command - play games between two computer players
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_games(), report_results()
//! - Level 3: play_sequential(), play_parallel()
//! - Level 4: formatting utilities

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use hexxagon_arena::{
    play_match_parallel, AiConfig, GameOutcome, GameRunner, MatchResult, PlayerType,
};
use hexxagon_core::{GameOverReason, GameResult};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Player for White (greedy or random)
    #[arg(long, default_value = "greedy")]
    pub white: PlayerType,

    /// Player for Black (greedy or random)
    #[arg(long, default_value = "random")]
    pub black: PlayerType,

    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Games still running after this many moves are unfinished
    #[arg(long, default_value = "400")]
    pub max_moves: u32,

    /// Play games on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// 1. Build the arena configuration
/// 2. Play the games
/// 3. Report results
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    let config = build_config(&args, seed);

    tracing::info!(
        "Starting match: {} vs {} ({} games, seed={})",
        config.white,
        config.black,
        args.games,
        config.base_seed()
    );

    let results = play_games(&config, &args)?;

    report_results(&results, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_config(args: &MatchArgs, seed: Option<u64>) -> AiConfig {
    let config = AiConfig::new(args.white, args.black).with_max_moves(args.max_moves);
    match seed {
        Some(seed) => config.with_seed(seed),
        None => config,
    }
}

fn play_games(config: &AiConfig, args: &MatchArgs) -> Result<MatchResult> {
    let results = if args.parallel {
        play_parallel(config, args.games)?
    } else {
        play_sequential(config, args.games)?
    };

    tracing::info!(
        white_wins = results.white_wins,
        black_wins = results.black_wins,
        ties = results.ties,
        unfinished = results.unfinished,
        "match finished"
    );
    Ok(results)
}

fn report_results(results: &MatchResult, args: &MatchArgs) -> Result<()> {
    if args.json {
        let json = serde_json::to_string_pretty(&JsonOutput::from(results))
            .context("Failed to serialize match results")?;
        println!("{}", json);
    } else {
        print!("{}", format_text_results(results));
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Same seeding as the arena's sequential match, with a progress bar
fn play_sequential(config: &AiConfig, games: usize) -> Result<MatchResult> {
    let pb = ProgressBar::new(games as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games")
            .context("Invalid progress template")?
            .progress_chars("=>-"),
    );

    let mut runner = GameRunner::new(config.clone());
    let mut outcomes = Vec::with_capacity(games);
    for index in 0..games {
        let outcome = runner.play_game();
        tracing::debug!(game = index + 1, moves = outcome.moves, "game finished");
        outcomes.push(outcome);
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(MatchResult::from_outcomes(outcomes))
}

fn play_parallel(config: &AiConfig, games: usize) -> Result<MatchResult> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .context("Invalid progress template")?,
    );
    pb.set_message(format!("playing {} games in parallel", games));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let results = play_match_parallel(config, games);
    pb.finish_and_clear();
    Ok(results)
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

#[derive(Serialize)]
struct JsonGame {
    game_number: usize,
    result: String,
    reason: Option<String>,
    moves: u32,
    white: usize,
    black: usize,
    margin: i32,
}

#[derive(Serialize)]
struct JsonOutput {
    total_games: u32,
    white_wins: u32,
    black_wins: u32,
    ties: u32,
    unfinished: u32,
    avg_moves: f32,
    white_win_rate: f32,
    black_win_rate: f32,
    tie_rate: f32,
    games: Vec<JsonGame>,
}

impl From<&MatchResult> for JsonOutput {
    fn from(results: &MatchResult) -> Self {
        Self {
            total_games: results.games_played,
            white_wins: results.white_wins,
            black_wins: results.black_wins,
            ties: results.ties,
            unfinished: results.unfinished,
            avg_moves: results.avg_moves,
            white_win_rate: results.white_win_rate(),
            black_win_rate: results.black_win_rate(),
            tie_rate: results.tie_rate(),
            games: results
                .game_outcomes
                .iter()
                .enumerate()
                .map(|(i, g)| JsonGame {
                    game_number: i + 1,
                    result: result_label(g).to_string(),
                    reason: g.verdict.map(|v| reason_label(v.reason)),
                    moves: g.moves,
                    white: g.white,
                    black: g.black,
                    margin: g.margin,
                })
                .collect(),
        }
    }
}

fn result_label(outcome: &GameOutcome) -> &'static str {
    match outcome.result() {
        Some(GameResult::WhiteWins) => "WhiteWins",
        Some(GameResult::BlackWins) => "BlackWins",
        Some(GameResult::Tie) => "Tie",
        None => "Unfinished",
    }
}

fn reason_label(reason: GameOverReason) -> String {
    match reason {
        GameOverReason::BoardFull => "board full".to_string(),
        GameOverReason::NoLegalMoves(player) => format!("{:?} cannot move", player),
    }
}

fn format_text_results(results: &MatchResult) -> String {
    let total = results.games_played;
    let mut text = String::new();

    text.push_str("\n=== Match Results ===\n");
    text.push_str(&format!("Total games: {}\n", total));
    text.push_str(&format!(
        "White wins:  {} ({:.1}%)\n",
        results.white_wins,
        results.white_win_rate() * 100.0
    ));
    text.push_str(&format!(
        "Black wins:  {} ({:.1}%)\n",
        results.black_wins,
        results.black_win_rate() * 100.0
    ));
    text.push_str(&format!(
        "Ties:        {} ({:.1}%)\n",
        results.ties,
        results.tie_rate() * 100.0
    ));
    if results.unfinished > 0 {
        text.push_str(&format!("Unfinished:  {}\n", results.unfinished));
    }
    text.push_str(&format!("Avg moves:   {:.1}\n", results.avg_moves));

    text.push_str("\nGame details:\n");
    for (i, game) in results.game_outcomes.iter().enumerate() {
        text.push_str(&format!(
            "  Game {}: {} {}-{} (margin {:+}) in {} moves\n",
            i + 1,
            result_label(game),
            game.white,
            game.black,
            game.margin,
            game.moves
        ));
    }
    text
}

// ============================================================================
// TESTS
// ============================================================================
