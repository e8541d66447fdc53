//! Match play - multiple games between two computer players
//!
//! Level 2 - Phase-level implementation

use rayon::prelude::*;
use serde::Serialize;

use crate::config::AiConfig;
use crate::game_runner::{play_game_with_seed, GameOutcome, GameRunner};

/// Result of a match (multiple games)
#[derive(Clone, Debug, Serialize)]
pub struct MatchResult {
    pub white_wins: u32,
    pub black_wins: u32,
    pub ties: u32,
    /// Games stopped by the move cap
    pub unfinished: u32,
    /// Average game length in moves
    pub avg_moves: f32,
    pub games_played: u32,
    pub game_outcomes: Vec<GameOutcome>,
}

impl MatchResult {
    pub fn empty() -> Self {
        Self {
            white_wins: 0,
            black_wins: 0,
            ties: 0,
            unfinished: 0,
            avg_moves: 0.0,
            games_played: 0,
            game_outcomes: Vec::new(),
        }
    }

    pub fn white_win_rate(&self) -> f32 {
        self.rate(self.white_wins)
    }

    pub fn black_win_rate(&self) -> f32 {
        self.rate(self.black_wins)
    }

    pub fn tie_rate(&self) -> f32 {
        self.rate(self.ties)
    }

    /// Tally finished (or capped) games into a match result
    pub fn from_outcomes(outcomes: Vec<GameOutcome>) -> MatchResult {
        let mut result = MatchResult::empty();
        let mut total_moves = 0u64;

        for outcome in &outcomes {
            total_moves += u64::from(outcome.moves);
            if outcome.white_wins() {
                result.white_wins += 1;
            } else if outcome.black_wins() {
                result.black_wins += 1;
            } else if outcome.is_tie() {
                result.ties += 1;
            } else {
                result.unfinished += 1;
            }
        }

        result.games_played = outcomes.len() as u32;
        result.avg_moves = if outcomes.is_empty() {
            0.0
        } else {
            total_moves as f32 / outcomes.len() as f32
        };
        result.game_outcomes = outcomes;
        result
    }

    fn rate(&self, count: u32) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            count as f32 / self.games_played as f32
        }
    }
}

/// Play a match sequentially (Level 2 phase)
///
/// Game `i` is seeded with `base_seed + i`.
pub fn play_match(config: &AiConfig, games: usize) -> MatchResult {
    if games == 0 {
        return MatchResult::empty();
    }
    let mut runner = GameRunner::new(config.clone());
    let outcomes = (0..games)
        .map(|i| {
            let outcome = runner.play_game();
            log_outcome(i, &outcome);
            outcome
        })
        .collect();
    MatchResult::from_outcomes(outcomes)
}

/// Play a match with parallel execution (Level 2 phase)
///
/// Produces the same outcomes as [`play_match`], in the same order.
pub fn play_match_parallel(config: &AiConfig, games: usize) -> MatchResult {
    if games == 0 {
        return MatchResult::empty();
    }
    let base_seed = config.base_seed();
    let outcomes = (0..games)
        .into_par_iter()
        .map(|i| play_indexed_game(config, base_seed, i))
        .collect();
    MatchResult::from_outcomes(outcomes)
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

fn play_indexed_game(config: &AiConfig, base_seed: u64, index: usize) -> GameOutcome {
    let seed = base_seed.wrapping_add(index as u64);
    let outcome = play_game_with_seed(config, seed);
    log_outcome(index, &outcome);
    outcome
}

fn log_outcome(index: usize, outcome: &GameOutcome) {
    tracing::debug!(
        game = index + 1,
        moves = outcome.moves,
        white = outcome.white,
        black = outcome.black,
        "game finished"
    );
}
