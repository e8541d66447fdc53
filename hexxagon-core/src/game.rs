//! Turn controller and game state machine
//!
//! The shell feeds cell clicks into [`GameState::select_or_move`]; the
//! first click on an own piece arms it, the next click on an empty cell
//! tries to move there. After every completed move the active player
//! switches and termination is evaluated. When the opponent is the
//! computer, its reply is played inside the same call.

use serde::{Deserialize, Serialize};

use crate::ai;
use crate::error::IllegalMove;
use crate::rules::{self, Move, MoveOutcome};
use crate::state::{Board, Occupant, Player};
use crate::topology::CellIndex;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Who drives each color
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Both colors are driven through `select_or_move`
    #[default]
    TwoPlayer,
    /// One color is played by the greedy AI
    VersusComputer { ai: Player },
}

impl GameMode {
    pub fn ai_player(self) -> Option<Player> {
        match self {
            GameMode::TwoPlayer => None,
            GameMode::VersusComputer { ai } => Some(ai),
        }
    }
}

/// Why the game ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    BoardFull,
    /// The player due to move had no legal Clone or Jump
    NoLegalMoves(Player),
}

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Tie,
}

/// Final tally of a finished game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub reason: GameOverReason,
    pub white: usize,
    pub black: usize,
    pub result: GameResult,
}

impl Verdict {
    fn tally(reason: GameOverReason, board: &Board) -> Self {
        let (white, black) = board.scores();
        let result = match white.cmp(&black) {
            std::cmp::Ordering::Greater => GameResult::WhiteWins,
            std::cmp::Ordering::Less => GameResult::BlackWins,
            std::cmp::Ordering::Equal => GameResult::Tie,
        };
        Self {
            reason,
            white,
            black,
            result,
        }
    }

    /// Winner, or None on a tie
    pub fn winner(&self) -> Option<Player> {
        match self.result {
            GameResult::WhiteWins => Some(Player::White),
            GameResult::BlackWins => Some(Player::Black),
            GameResult::Tie => None,
        }
    }
}

/// Turn phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    ChoosingOrigin(Player),
    ChoosingDestination { player: Player, origin: CellIndex },
    GameOver(Verdict),
}

/// Result of one `select_or_move` call
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    Armed(CellIndex),
    MoveApplied(MoveOutcome),
    IllegalMove(IllegalMove),
    GameOver(Verdict),
}

// ============================================================================
// GAME STATE
// ============================================================================

/// One game: board, turn phase and mode
#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    active: Player,
    phase: Phase,
    mode: GameMode,
    /// Most recent applied move of either color
    last_move: Option<MoveOutcome>,
    /// Computer reply played during the latest call, if any
    ai_reply: Option<MoveOutcome>,
    moves_played: u32,
}

impl GameState {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Fresh game on the standard board, White to move
    pub fn new(mode: GameMode) -> Self {
        Self::from_board(Board::new(), Player::White, mode)
    }

    /// Game from an arbitrary position. Termination is checked at once,
    /// and the computer moves immediately if it is due.
    pub fn from_board(board: Board, to_move: Player, mode: GameMode) -> Self {
        let mut state = Self {
            board,
            active: to_move,
            phase: Phase::ChoosingOrigin(to_move),
            mode,
            last_move: None,
            ai_reply: None,
            moves_played: 0,
        };
        state.evaluate_termination();
        state.play_ai_turn();
        state
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Player due to move (or who was due when the game ended)
    pub fn current_player(&self) -> Player {
        self.active
    }

    pub fn occupant_of(&self, cell: CellIndex) -> Occupant {
        self.board.occupant_of(cell)
    }

    pub fn armed_cell(&self) -> Option<CellIndex> {
        match self.phase {
            Phase::ChoosingDestination { origin, .. } => Some(origin),
            _ => None,
        }
    }

    /// (white_count, black_count)
    pub fn scores(&self) -> (usize, usize) {
        self.board.scores()
    }

    pub fn is_game_over(&self) -> Option<Verdict> {
        match self.phase {
            Phase::GameOver(verdict) => Some(verdict),
            _ => None,
        }
    }

    pub fn last_move(&self) -> Option<&MoveOutcome> {
        self.last_move.as_ref()
    }

    pub fn ai_reply(&self) -> Option<&MoveOutcome> {
        self.ai_reply.as_ref()
    }

    pub fn moves_played(&self) -> u32 {
        self.moves_played
    }

    pub fn is_ai_turn(&self) -> bool {
        self.is_game_over().is_none() && self.mode.ai_player() == Some(self.active)
    }

    /// Legal moves of the player due to move
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_game_over().is_some() {
            return Vec::new();
        }
        rules::legal_moves(&self.board, self.active)
    }

    // ========================================================================
    // INPUT
    // ========================================================================

    /// Handle one click on a cell.
    ///
    /// Clicking an own piece arms it (re-arming replaces the previous
    /// selection). With a piece armed, clicking anything else attempts a
    /// move; a rejected attempt keeps the selection. If the game is over
    /// once the call (including any computer reply) completes, the event
    /// is `GameOver`.
    pub fn select_or_move(&mut self, cell: CellIndex) -> EngineEvent {
        self.ai_reply = None;

        let (player, armed) = match self.phase {
            Phase::GameOver(_) => return EngineEvent::IllegalMove(IllegalMove::ActionAfterGameOver),
            Phase::ChoosingOrigin(player) => (player, None),
            Phase::ChoosingDestination { player, origin } => (player, Some(origin)),
        };

        if self.mode.ai_player() == Some(player) {
            return EngineEvent::IllegalMove(IllegalMove::WrongTurn);
        }

        if self.board.is_owned_by(cell, player) {
            self.phase = Phase::ChoosingDestination { player, origin: cell };
            return EngineEvent::Armed(cell);
        }

        let Some(origin) = armed else {
            return EngineEvent::IllegalMove(IllegalMove::NotOwner);
        };

        match self.attempt_move(origin, cell, player) {
            Ok(outcome) => match self.is_game_over() {
                Some(verdict) => EngineEvent::GameOver(verdict),
                None => EngineEvent::MoveApplied(outcome),
            },
            Err(err) => EngineEvent::IllegalMove(err),
        }
    }

    /// Validate and apply a move for `player`, then pass the turn.
    ///
    /// Rejections leave the game exactly as it was, selection included.
    pub fn attempt_move(
        &mut self,
        origin: CellIndex,
        destination: CellIndex,
        player: Player,
    ) -> Result<MoveOutcome, IllegalMove> {
        if self.is_game_over().is_some() {
            return Err(IllegalMove::ActionAfterGameOver);
        }
        if player != self.active {
            return Err(IllegalMove::WrongTurn);
        }

        let outcome = rules::apply_move(&mut self.board, origin, destination, player)?;
        self.ai_reply = None;
        self.complete_turn(&outcome);
        self.play_ai_turn();
        Ok(outcome)
    }

    // ========================================================================
    // TRANSITIONS
    // ========================================================================

    fn complete_turn(&mut self, outcome: &MoveOutcome) {
        tracing::debug!(
            player = ?outcome.player,
            kind = ?outcome.kind,
            origin = outcome.origin,
            destination = outcome.destination,
            captured = outcome.captured.len(),
            "move applied"
        );
        self.last_move = Some(outcome.clone());
        self.moves_played += 1;
        self.active = self.active.opponent();
        self.phase = Phase::ChoosingOrigin(self.active);
        self.evaluate_termination();
    }

    fn evaluate_termination(&mut self) {
        let reason = if self.board.count(Occupant::Empty) == 0 {
            Some(GameOverReason::BoardFull)
        } else if !rules::has_legal_move(&self.board, self.active) {
            Some(GameOverReason::NoLegalMoves(self.active))
        } else {
            None
        };

        if let Some(reason) = reason {
            self.end(reason);
        }
    }

    fn end(&mut self, reason: GameOverReason) {
        let verdict = Verdict::tally(reason, &self.board);
        tracing::debug!(?reason, white = verdict.white, black = verdict.black, "game over");
        self.phase = Phase::GameOver(verdict);
    }

    /// Let the computer move if it is due
    fn play_ai_turn(&mut self) {
        if !self.is_ai_turn() {
            return;
        }
        let player = self.active;

        let Some(mv) = ai::choose_move(&self.board, player) else {
            self.end(GameOverReason::NoLegalMoves(player));
            return;
        };

        match rules::apply_move(&mut self.board, mv.origin, mv.destination, player) {
            Ok(outcome) => {
                self.complete_turn(&outcome);
                self.ai_reply = Some(outcome);
            }
            Err(err) => {
                // choose_move only yields legal moves
                tracing::warn!(?err, ?mv, "computer produced an illegal move");
                self.end(GameOverReason::NoLegalMoves(player));
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameMode::default())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::MoveKind;

    fn two_player() -> GameState {
        GameState::new(GameMode::TwoPlayer)
    }

    /// Everything White except Black on (0,2) and the given empty cells
    fn nearly_full(empty: &[CellIndex]) -> Board {
        let adjacency = crate::topology::standard_adjacency();
        let white: Vec<CellIndex> = adjacency
            .cells()
            .iter()
            .filter(|c| !c.blocked && c.index != 2 && !empty.contains(&c.index))
            .map(|c| c.index)
            .collect();
        Board::with_pieces(&white, &[2]).unwrap()
    }

    #[test]
    fn test_fresh_game() {
        let game = two_player();
        assert_eq!(game.scores(), (3, 3));
        assert_eq!(game.current_player(), Player::White);
        assert_eq!(game.phase(), Phase::ChoosingOrigin(Player::White));
        assert_eq!(game.is_game_over(), None);
        assert_eq!(game.armed_cell(), None);
    }

    #[test]
    fn test_arm_and_rearm() {
        let mut game = two_player();
        assert_eq!(game.select_or_move(2), EngineEvent::Armed(2));
        assert_eq!(game.armed_cell(), Some(2));
        assert_eq!(game.select_or_move(44), EngineEvent::Armed(44));
        assert_eq!(game.armed_cell(), Some(44));
        assert_eq!(game.phase(), Phase::ChoosingDestination { player: Player::White, origin: 44 });
    }

    #[test]
    fn test_click_enemy_without_selection() {
        let mut game = two_player();
        assert_eq!(game.select_or_move(6), EngineEvent::IllegalMove(IllegalMove::NotOwner));
        assert_eq!(game.select_or_move(3), EngineEvent::IllegalMove(IllegalMove::NotOwner));
        assert_eq!(game.armed_cell(), None);
    }

    #[test]
    fn test_rejected_destination_keeps_selection() {
        let mut game = two_player();
        let before = game.board().clone();
        game.select_or_move(44);
        assert_eq!(game.select_or_move(3), EngineEvent::IllegalMove(IllegalMove::OutOfRange));
        assert_eq!(game.select_or_move(6), EngineEvent::IllegalMove(IllegalMove::DestinationNotEmpty));
        assert_eq!(game.armed_cell(), Some(44));
        assert_eq!(game.board(), &before);
        assert_eq!(game.current_player(), Player::White);
    }

    #[test]
    fn test_move_passes_turn() {
        let mut game = two_player();
        game.select_or_move(2);
        let event = game.select_or_move(3);
        let EngineEvent::MoveApplied(outcome) = event else {
            panic!("expected a move, got {:?}", event);
        };
        assert_eq!(outcome.kind, MoveKind::Clone);
        assert_eq!((outcome.origin, outcome.destination), (2, 3));
        assert_eq!(game.current_player(), Player::Black);
        assert_eq!(game.armed_cell(), None);
        assert_eq!(game.scores(), (4, 3));
        assert_eq!(game.moves_played(), 1);
        assert_eq!(game.last_move(), Some(&outcome));
    }

    #[test]
    fn test_wrong_turn() {
        let mut game = two_player();
        let before = game.board().clone();
        assert_eq!(game.attempt_move(6, 5, Player::Black), Err(IllegalMove::WrongTurn));
        assert_eq!(game.board(), &before);
    }

    #[test]
    fn test_board_full_ends_game() {
        // (7,6) clones into the last empty cell (8,6)
        let board = nearly_full(&[78]);
        let mut game = GameState::from_board(board, Player::White, GameMode::TwoPlayer);
        assert_eq!(game.is_game_over(), None);

        game.attempt_move(69, 78, Player::White).unwrap();
        let verdict = game.is_game_over().unwrap();
        assert_eq!(verdict.reason, GameOverReason::BoardFull);
        assert_eq!((verdict.white, verdict.black), (57, 1));
        assert_eq!(verdict.winner(), Some(Player::White));

        assert_eq!(game.attempt_move(69, 77, Player::Black), Err(IllegalMove::ActionAfterGameOver));
        assert_eq!(game.attempt_move(69, 77, Player::White), Err(IllegalMove::ActionAfterGameOver));
        assert_eq!(game.select_or_move(69), EngineEvent::IllegalMove(IllegalMove::ActionAfterGameOver));
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn test_stuck_player_ends_game() {
        let board = nearly_full(&[77, 78]);
        let mut game = GameState::from_board(board, Player::White, GameMode::TwoPlayer);

        game.select_or_move(69);
        let event = game.select_or_move(78);
        let EngineEvent::GameOver(verdict) = event else {
            panic!("expected game over, got {:?}", event);
        };
        assert_eq!(verdict.reason, GameOverReason::NoLegalMoves(Player::Black));
        assert_eq!((verdict.white, verdict.black), (56, 1));
        assert_eq!(verdict.result, GameResult::WhiteWins);
        assert_eq!(game.board().count(Occupant::Empty), 1);
    }

    #[test]
    fn test_position_without_moves_is_over_at_once() {
        let board = Board::with_pieces(&[21], &[]).unwrap();
        let game = GameState::from_board(board, Player::Black, GameMode::TwoPlayer);
        let verdict = game.is_game_over().unwrap();
        assert_eq!(verdict.reason, GameOverReason::NoLegalMoves(Player::Black));
        assert_eq!(verdict.result, GameResult::WhiteWins);
    }

    #[test]
    fn test_tie_verdict() {
        let board = Board::with_pieces(&[21], &[25]).unwrap();
        let verdict = Verdict::tally(GameOverReason::BoardFull, &board);
        assert_eq!(verdict.result, GameResult::Tie);
        assert_eq!(verdict.winner(), None);
    }

    #[test]
    fn test_computer_replies() {
        let mut game = GameState::new(GameMode::VersusComputer { ai: Player::Black });
        game.select_or_move(2);
        let event = game.select_or_move(3);
        assert!(matches!(event, EngineEvent::MoveApplied(_)));

        let reply = game.ai_reply().cloned().unwrap();
        assert_eq!(reply.player, Player::Black);
        assert_eq!(game.current_player(), Player::White);
        assert_eq!(game.moves_played(), 2);
        assert_eq!(game.last_move(), Some(&reply));
    }

    #[test]
    fn test_computer_opens_as_white() {
        let game = GameState::new(GameMode::VersusComputer { ai: Player::White });
        assert_eq!(game.current_player(), Player::Black);
        assert_eq!(game.moves_played(), 1);
        assert!(game.ai_reply().is_some());
    }

    #[test]
    fn test_stuck_computer_loses_its_turn_at_once() {
        // Black's only piece on (0,2) cannot reach the last empty cell
        let board = nearly_full(&[78]);
        let mut game =
            GameState::from_board(board, Player::Black, GameMode::VersusComputer { ai: Player::Black });
        let verdict = game.is_game_over().unwrap();
        assert_eq!(verdict.reason, GameOverReason::NoLegalMoves(Player::Black));
        assert_eq!((verdict.white, verdict.black), (56, 1));
        assert_eq!(game.ai_reply(), None);
        assert_eq!(game.moves_played(), 0);
        assert_eq!(game.select_or_move(69), EngineEvent::IllegalMove(IllegalMove::ActionAfterGameOver));
    }

    #[test]
    fn test_computer_stuck_after_human_move() {
        let board = nearly_full(&[77, 78]);
        let mut game =
            GameState::from_board(board, Player::White, GameMode::VersusComputer { ai: Player::Black });
        game.select_or_move(69);
        let event = game.select_or_move(78);
        let EngineEvent::GameOver(verdict) = event else {
            panic!("expected game over, got {:?}", event);
        };
        assert_eq!(verdict.reason, GameOverReason::NoLegalMoves(Player::Black));
        assert_eq!(game.ai_reply(), None);
        assert_eq!(game.moves_played(), 1);
        assert_eq!(game.current_player(), Player::Black);
    }

    #[test]
    fn test_human_cannot_move_for_computer() {
        let mut game = GameState::new(GameMode::VersusComputer { ai: Player::Black });
        assert_eq!(game.attempt_move(6, 5, Player::Black), Err(IllegalMove::WrongTurn));
    }
}
