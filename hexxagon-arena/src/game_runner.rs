//! Game runner - executes single games
//!
//! Level 3 - Step-level implementation

use hexxagon_core::{material, GameMode, GameResult, GameState, GreedyAI, Move, Player, RandomAI, Verdict};
use serde::Serialize;

use crate::config::{AiConfig, PlayerType};

/// Outcome of a single game
#[derive(Clone, Debug, Serialize)]
pub struct GameOutcome {
    /// Final verdict; None if the move cap was hit first
    pub verdict: Option<Verdict>,
    /// Moves played by both colors
    pub moves: u32,
    pub white: usize,
    pub black: usize,
    /// White's piece lead (negative when Black is ahead)
    pub margin: i32,
}

impl GameOutcome {
    pub fn result(&self) -> Option<GameResult> {
        self.verdict.map(|v| v.result)
    }

    pub fn white_wins(&self) -> bool {
        self.result() == Some(GameResult::WhiteWins)
    }

    pub fn black_wins(&self) -> bool {
        self.result() == Some(GameResult::BlackWins)
    }

    pub fn is_tie(&self) -> bool {
        self.result() == Some(GameResult::Tie)
    }

    pub fn is_unfinished(&self) -> bool {
        self.verdict.is_none()
    }

    /// Winner (None for a tie or unfinished game)
    pub fn winner(&self) -> Option<Player> {
        self.verdict.and_then(|v| v.winner())
    }
}

/// AI wrapper enum for asymmetric play
enum Agent {
    Greedy(GreedyAI),
    Random(RandomAI),
}

impl Agent {
    fn new(player_type: PlayerType, seed: u64) -> Self {
        match player_type {
            PlayerType::Greedy => Agent::Greedy(GreedyAI::new()),
            PlayerType::Random => Agent::Random(RandomAI::with_seed(seed)),
        }
    }

    fn best_move(&mut self, state: &GameState) -> Option<Move> {
        match self {
            Agent::Greedy(ai) => ai.best_move(state),
            Agent::Random(ai) => ai.best_move(state),
        }
    }
}

/// Game runner that plays games between two computer players
pub struct GameRunner {
    config: AiConfig,
    seed_counter: u64,
}

impl GameRunner {
    pub fn new(config: AiConfig) -> Self {
        let seed_counter = config.base_seed();
        Self {
            config,
            seed_counter,
        }
    }

    /// Play a single game with the next seed.
    ///
    /// The n-th call (from zero) uses `base_seed + n`.
    pub fn play_game(&mut self) -> GameOutcome {
        let seed = self.next_seed();
        play_game_with_seed(&self.config, seed)
    }

    /// Get next seed and increment counter
    fn next_seed(&mut self) -> u64 {
        let seed = self.seed_counter;
        self.seed_counter = self.seed_counter.wrapping_add(1);
        seed
    }
}

/// Play one game from the standard opening.
///
/// White's agent is seeded with `seed`, Black's with `seed + 1`.
pub fn play_game_with_seed(config: &AiConfig, seed: u64) -> GameOutcome {
    let mut white = Agent::new(config.white, seed);
    let mut black = Agent::new(config.black, seed.wrapping_add(1));
    let mut state = GameState::new(GameMode::TwoPlayer);

    while state.is_game_over().is_none() && state.moves_played() < config.max_moves {
        let player = state.current_player();
        let agent = match player {
            Player::White => &mut white,
            Player::Black => &mut black,
        };
        let Some(mv) = agent.best_move(&state) else {
            break;
        };
        if let Err(err) = state.attempt_move(mv.origin, mv.destination, player) {
            tracing::warn!(?err, ?mv, "agent produced an illegal move");
            break;
        }
    }

    let (white_count, black_count) = state.scores();
    GameOutcome {
        verdict: state.is_game_over(),
        moves: state.moves_played(),
        white: white_count,
        black: black_count,
        margin: material(state.board(), Player::White),
    }
}
