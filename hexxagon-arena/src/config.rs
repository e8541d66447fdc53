//! Configuration types for arena play
//!
//! Level 4 - Utilities and configuration

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which computer player drives a color
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerType {
    /// Single-ply greedy capture maximizer
    #[default]
    Greedy,
    /// Uniformly random legal mover
    Random,
}

impl fmt::Display for PlayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerType::Greedy => write!(f, "greedy"),
            PlayerType::Random => write!(f, "random"),
        }
    }
}

impl FromStr for PlayerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "greedy" => Ok(PlayerType::Greedy),
            "random" => Ok(PlayerType::Random),
            other => Err(format!("unknown player type: {}", other)),
        }
    }
}

/// AI configuration for a match
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AiConfig {
    pub white: PlayerType,
    pub black: PlayerType,
    /// Base seed for random players (None = 42)
    pub seed: Option<u64>,
    /// Games still running after this many moves count as unfinished
    pub max_moves: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            white: PlayerType::Greedy,
            black: PlayerType::Random,
            seed: None,
            max_moves: 400,
        }
    }
}

impl AiConfig {
    pub fn new(white: PlayerType, black: PlayerType) -> Self {
        Self {
            white,
            black,
            ..Default::default()
        }
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set move cap
    pub fn with_max_moves(mut self, max_moves: u32) -> Self {
        self.max_moves = max_moves;
        self
    }

    pub fn base_seed(&self) -> u64 {
        self.seed.unwrap_or(42)
    }
}
