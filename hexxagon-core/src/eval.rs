//! Position scoring

use crate::rules;
use crate::state::{Board, Player};
use crate::topology::CellIndex;

/// Number of opposing pieces a landing on `destination` would capture.
///
/// Uses the same ring-1 set as capture resolution, so the score equals
/// the capture count of the move that lands there.
pub fn landing_score(board: &Board, destination: CellIndex, player: Player) -> usize {
    rules::capture_targets(board, destination, player).count()
}

/// Piece difference from `player`'s point of view
pub fn material(board: &Board, player: Player) -> i32 {
    let (white, black) = board.scores();
    let diff = white as i32 - black as i32;
    match player {
        Player::White => diff,
        Player::Black => -diff,
    }
}
