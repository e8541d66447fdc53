//! HEXXAGON Arena - automated games between computer players
//!
//! This crate measures the engine's players against each other:
//! - Single games between configurable agents
//! - Matches, sequential or parallel, with aggregate statistics
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 2: play_match, play_match_parallel (phases)
//! - Level 3: play_game_with_seed (steps)
//! - Level 4: configuration

mod config;
mod game_runner;
mod match_play;

pub use config::{AiConfig, PlayerType};
pub use game_runner::{play_game_with_seed, GameOutcome, GameRunner};
pub use match_play::{play_match, play_match_parallel, MatchResult};
