//! HEXXAGON Core - Game engine and AI
//!
//! This crate provides the board-state and move-resolution engine:
//! - Board topology (odd-q hex layout, precomputed ring-1/ring-2 sets)
//! - Board state (cell occupancy)
//! - Move rules (Clone, Jump, capture)
//! - Turn controller and end-of-game detection
//! - Single-ply greedy AI and a seeded random mover
//!
//! The engine is synchronous and single-threaded. A presentation shell
//! feeds it cell clicks and reads its state back to draw.

pub mod topology;
pub mod state;
pub mod rules;
pub mod game;
pub mod eval;
pub mod ai;
pub mod error;

// Re-exports for convenient access
pub use topology::{build, standard_adjacency, AdjacencyIndex, CellIndex, CellInfo, Coord, Shape, HEXXAGON};
pub use state::{Board, Occupant, Player};
pub use rules::{Move, MoveKind, MoveOutcome};
pub use game::{EngineEvent, GameMode, GameOverReason, GameResult, GameState, Phase, Verdict};
pub use eval::{landing_score, material};
pub use ai::{choose_move, GreedyAI, RandomAI};
pub use error::{IllegalMove, SetupError};
