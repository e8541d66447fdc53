//! Board state: cell occupancy over a fixed topology

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::SetupError;
use crate::topology::{standard_adjacency, AdjacencyIndex, CellIndex, Shape, HEXXAGON};

/// Player color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    White = 0,
    Black = 1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Occupant value for this player's pieces
    pub fn occupant(self) -> Occupant {
        match self {
            Player::White => Occupant::White,
            Player::Black => Occupant::Black,
        }
    }
}

/// What sits on a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupant {
    Empty,
    Blocked,
    White,
    Black,
}

impl Occupant {
    pub fn owner(self) -> Option<Player> {
        match self {
            Occupant::White => Some(Player::White),
            Occupant::Black => Some(Player::Black),
            Occupant::Empty | Occupant::Blocked => None,
        }
    }
}

/// Cell occupancy for one game.
///
/// Blocked cells are fixed by the topology at construction and never
/// change. Only the move rules write to a board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Occupant>,
    adjacency: Arc<AdjacencyIndex>,
}

impl Board {
    /// Standard starting position
    pub fn new() -> Self {
        Self::starting(&HEXXAGON, standard_adjacency())
    }

    /// Standard topology with no pieces on it
    pub fn empty() -> Self {
        let adjacency = standard_adjacency();
        let cells = adjacency
            .cells()
            .iter()
            .map(|info| if info.blocked { Occupant::Blocked } else { Occupant::Empty })
            .collect();
        Self { cells, adjacency }
    }

    /// Standard topology with the given pieces
    pub fn with_pieces(white: &[CellIndex], black: &[CellIndex]) -> Result<Self, SetupError> {
        let mut board = Self::empty();
        for (&cell, player) in white
            .iter()
            .map(|c| (c, Player::White))
            .chain(black.iter().map(|c| (c, Player::Black)))
        {
            match board.occupant_of(cell) {
                Occupant::Blocked => return Err(SetupError::Unplayable(cell)),
                Occupant::Empty => board.cells[cell] = player.occupant(),
                Occupant::White | Occupant::Black => return Err(SetupError::Conflict(cell)),
            }
        }
        Ok(board)
    }

    pub(crate) fn starting(shape: &Shape, adjacency: Arc<AdjacencyIndex>) -> Self {
        let mut cells: Vec<Occupant> = adjacency
            .cells()
            .iter()
            .map(|info| if info.blocked { Occupant::Blocked } else { Occupant::Empty })
            .collect();
        for &cell in shape.white_start {
            cells[cell] = Occupant::White;
        }
        for &cell in shape.black_start {
            cells[cell] = Occupant::Black;
        }
        Self { cells, adjacency }
    }

    pub fn adjacency(&self) -> &AdjacencyIndex {
        &self.adjacency
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Occupant at a cell; off-board indices read as `Blocked`
    pub fn occupant_of(&self, cell: CellIndex) -> Occupant {
        self.cells.get(cell).copied().unwrap_or(Occupant::Blocked)
    }

    /// Write a cell. Blocked cells are never written, nor made blocked.
    pub(crate) fn set_occupant(&mut self, cell: CellIndex, occupant: Occupant) {
        debug_assert_ne!(occupant, Occupant::Blocked);
        if let Some(slot) = self.cells.get_mut(cell) {
            if *slot != Occupant::Blocked && occupant != Occupant::Blocked {
                *slot = occupant;
            }
        }
    }

    pub fn is_empty(&self, cell: CellIndex) -> bool {
        self.occupant_of(cell) == Occupant::Empty
    }

    pub fn is_blocked(&self, cell: CellIndex) -> bool {
        self.occupant_of(cell) == Occupant::Blocked
    }

    pub fn is_owned_by(&self, cell: CellIndex, player: Player) -> bool {
        self.occupant_of(cell) == player.occupant()
    }

    pub fn count(&self, occupant: Occupant) -> usize {
        self.cells.iter().filter(|&&o| o == occupant).count()
    }

    /// (white_count, black_count)
    pub fn scores(&self) -> (usize, usize) {
        (self.count(Occupant::White), self.count(Occupant::Black))
    }

    /// Cells owned by a player, ascending
    pub fn cells_of(&self, player: Player) -> impl Iterator<Item = CellIndex> + '_ {
        let target = player.occupant();
        self.iter()
            .filter(move |&(_, o)| o == target)
            .map(|(cell, _)| cell)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellIndex, Occupant)> + '_ {
        self.cells.iter().copied().enumerate()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
