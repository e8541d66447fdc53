//! Computer players
//!
//! [`choose_move`] is the single-ply greedy heuristic: land where the most
//! enemy pieces would be captured. [`RandomAI`] picks uniformly among legal
//! moves and serves as a baseline opponent.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::eval::landing_score;
use crate::game::GameState;
use crate::rules::{self, Move, MoveKind};
use crate::state::{Board, Player};

// ============================================================================
// GREEDY
// ============================================================================

/// Pick the greedy move for `player`, or None if it has no legal move.
///
/// Candidates are visited by ascending origin, then ascending destination;
/// only a strictly higher landing score replaces the current best, so ties
/// go to the first candidate. If the chosen landing cell touches any own
/// piece the move is played as a Clone from the lowest such piece, since a
/// Clone keeps the origin occupied.
pub fn choose_move(board: &Board, player: Player) -> Option<Move> {
    let mut best: Option<(Move, usize)> = None;

    for mv in rules::legal_moves(board, player) {
        let score = landing_score(board, mv.destination, player);
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((mv, score));
        }
    }

    let (mv, score) = best?;
    let chosen = prefer_clone(board, mv, player);
    tracing::debug!(
        ?player,
        origin = chosen.origin,
        destination = chosen.destination,
        kind = ?chosen.kind,
        score,
        "greedy choice"
    );
    Some(chosen)
}

/// Swap a Jump for a Clone into the same cell when an own piece touches it
fn prefer_clone(board: &Board, mv: Move, player: Player) -> Move {
    if mv.kind == MoveKind::Clone {
        return mv;
    }
    board
        .adjacency()
        .neighbors(mv.destination)
        .iter()
        .copied()
        .find(|&cell| board.is_owned_by(cell, player))
        .map_or(mv, |origin| Move {
            origin,
            destination: mv.destination,
            kind: MoveKind::Clone,
        })
}

/// Stateless greedy player
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyAI;

impl GreedyAI {
    pub fn new() -> Self {
        Self
    }

    /// Move for the player due in `state`
    pub fn best_move(&self, state: &GameState) -> Option<Move> {
        if state.is_game_over().is_some() {
            return None;
        }
        choose_move(state.board(), state.current_player())
    }

    /// Play both colors until the game ends or `max_moves` is reached
    pub fn play_game(&self, initial: GameState, max_moves: u32) -> (GameState, Vec<Move>) {
        let mut state = initial;
        let mut history = Vec::new();

        while state.moves_played() < max_moves {
            let Some(mv) = self.best_move(&state) else {
                break;
            };
            let player = state.current_player();
            if state.attempt_move(mv.origin, mv.destination, player).is_err() {
                break;
            }
            history.push(mv);
        }

        (state, history)
    }
}

// ============================================================================
// RANDOM
// ============================================================================

/// Uniformly random legal mover, reproducible per seed
#[derive(Clone, Debug)]
pub struct RandomAI {
    rng: ChaCha8Rng,
}

impl RandomAI {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn choose_move(&mut self, board: &Board, player: Player) -> Option<Move> {
        rules::legal_moves(board, player).choose(&mut self.rng).copied()
    }

    pub fn best_move(&mut self, state: &GameState) -> Option<Move> {
        if state.is_game_over().is_some() {
            return None;
        }
        self.choose_move(state.board(), state.current_player())
    }
}

// ============================================================================
// TESTS
// ============================================================================
