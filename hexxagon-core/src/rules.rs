//! Move legality, application and capture resolution
//!
//! A move is a Clone (destination at ring 1, origin keeps its piece) or a
//! Jump (destination at ring 2, origin is vacated). After either, every
//! ring-1 neighbor of the destination holding an opposing piece flips to
//! the mover. Flips are independent of each other, so the order in which
//! the neighbor set is visited has no effect on the result; there is no
//! chaining from flipped pieces.

use serde::{Deserialize, Serialize};

use crate::error::IllegalMove;
use crate::state::{Board, Occupant, Player};
use crate::topology::{AdjacencyIndex, CellIndex};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Clone,
    Jump,
}

/// A candidate move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub origin: CellIndex,
    pub destination: CellIndex,
    pub kind: MoveKind,
}

/// What an applied move did to the board
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub player: Player,
    pub kind: MoveKind,
    pub origin: CellIndex,
    pub destination: CellIndex,
    /// Flipped cells, ascending
    pub captured: Vec<CellIndex>,
}

/// Ring relation between two cells, if it allows a move
pub fn classify(adjacency: &AdjacencyIndex, origin: CellIndex, destination: CellIndex) -> Option<MoveKind> {
    if adjacency.is_neighbor(origin, destination) {
        Some(MoveKind::Clone)
    } else if adjacency.is_jump_target(origin, destination) {
        Some(MoveKind::Jump)
    } else {
        None
    }
}

/// Validate a move without touching the board
pub fn check_move(
    board: &Board,
    origin: CellIndex,
    destination: CellIndex,
    player: Player,
) -> Result<MoveKind, IllegalMove> {
    if !board.is_owned_by(origin, player) {
        return Err(IllegalMove::NotOwner);
    }
    if !board.is_empty(destination) {
        return Err(IllegalMove::DestinationNotEmpty);
    }
    classify(board.adjacency(), origin, destination).ok_or(IllegalMove::OutOfRange)
}

/// Opposing pieces that a landing on `destination` would flip
pub fn capture_targets(
    board: &Board,
    destination: CellIndex,
    player: Player,
) -> impl Iterator<Item = CellIndex> + '_ {
    let enemy = player.opponent().occupant();
    board
        .adjacency()
        .neighbors(destination)
        .iter()
        .copied()
        .filter(move |&cell| board.occupant_of(cell) == enemy)
}

/// Validate and apply a move. On error the board is untouched.
pub fn apply_move(
    board: &mut Board,
    origin: CellIndex,
    destination: CellIndex,
    player: Player,
) -> Result<MoveOutcome, IllegalMove> {
    let kind = check_move(board, origin, destination, player)?;
    let captured: Vec<CellIndex> = capture_targets(board, destination, player).collect();

    let own = player.occupant();
    board.set_occupant(destination, own);
    if kind == MoveKind::Jump {
        board.set_occupant(origin, Occupant::Empty);
    }
    for &cell in &captured {
        board.set_occupant(cell, own);
    }

    Ok(MoveOutcome {
        player,
        kind,
        origin,
        destination,
        captured,
    })
}

/// Legal destinations from an owned cell, ascending by destination
pub fn destinations_from(board: &Board, origin: CellIndex) -> Vec<(CellIndex, MoveKind)> {
    let adjacency = board.adjacency();
    let clones = adjacency
        .neighbors(origin)
        .iter()
        .map(|&cell| (cell, MoveKind::Clone));
    let jumps = adjacency
        .jump_targets(origin)
        .iter()
        .map(|&cell| (cell, MoveKind::Jump));

    let mut out: Vec<(CellIndex, MoveKind)> = clones
        .chain(jumps)
        .filter(|&(cell, _)| board.is_empty(cell))
        .collect();
    out.sort_unstable_by_key(|&(cell, _)| cell);
    out
}

/// All legal moves for a player, by ascending origin then destination
pub fn legal_moves(board: &Board, player: Player) -> Vec<Move> {
    board
        .cells_of(player)
        .flat_map(|origin| {
            destinations_from(board, origin)
                .into_iter()
                .map(move |(destination, kind)| Move {
                    origin,
                    destination,
                    kind,
                })
        })
        .collect()
}

/// Does the player have at least one legal move?
pub fn has_legal_move(board: &Board, player: Player) -> bool {
    let adjacency = board.adjacency();
    board.cells_of(player).any(|origin| {
        adjacency
            .neighbors(origin)
            .iter()
            .chain(adjacency.jump_targets(origin))
            .any(|&cell| board.is_empty(cell))
    })
}
