//! Error types

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::topology::CellIndex;

/// A rejected move. Returned by value and never mutates the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum IllegalMove {
    #[error("origin cell is not occupied by the acting player")]
    NotOwner,
    #[error("destination cell is not empty")]
    DestinationNotEmpty,
    #[error("destination is not within two rings of the origin")]
    OutOfRange,
    #[error("it is not this player's turn")]
    WrongTurn,
    #[error("the game is already over")]
    ActionAfterGameOver,
}

/// Invalid custom position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("cell {0} is blocked or off the board")]
    Unplayable(CellIndex),
    #[error("cell {0} is assigned more than one piece")]
    Conflict(CellIndex),
}
