//! Integration tests for the HEXXAGON engine
//!
//! Tests the full stack: topology, move rules, turn controller, the
//! computer players and the arena.

use hexxagon_arena::{play_match, play_match_parallel, AiConfig, PlayerType};
use hexxagon_core::{
    choose_move, standard_adjacency, Board, CellIndex, EngineEvent, GameMode, GameOverReason,
    GameResult, GameState, GreedyAI, IllegalMove, MoveKind, Occupant, Phase, Player, RandomAI,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

const TOTAL_CELLS: usize = 81;
const BLOCKED_CELLS: usize = 23;

fn blocked_set(board: &Board) -> Vec<CellIndex> {
    board
        .iter()
        .filter(|&(_, occupant)| occupant == Occupant::Blocked)
        .map(|(cell, _)| cell)
        .collect()
}

fn assert_cell_accounting(board: &Board) {
    let total = board.count(Occupant::White)
        + board.count(Occupant::Black)
        + board.count(Occupant::Empty)
        + board.count(Occupant::Blocked);
    assert_eq!(total, TOTAL_CELLS);
    assert_eq!(board.count(Occupant::Blocked), BLOCKED_CELLS);
}

/// Click cells at random, favoring the mover's own pieces so moves happen
fn random_click(game: &GameState, rng: &mut ChaCha8Rng) -> CellIndex {
    let own: Vec<CellIndex> = game.board().cells_of(game.current_player()).collect();
    if !own.is_empty() && rng.gen_bool(0.4) {
        own[rng.gen_range(0..own.len())]
    } else {
        // a few off-board indices mixed in
        rng.gen_range(0..TOTAL_CELLS + 5)
    }
}

// ============================================================================
// OPENING POSITION
// ============================================================================

#[test]
fn test_fresh_game() {
    let game = GameState::new(GameMode::TwoPlayer);
    assert_eq!(game.scores(), (3, 3));
    assert_eq!(game.is_game_over(), None);
    assert_eq!(game.current_player(), Player::White);
    assert_eq!(game.phase(), Phase::ChoosingOrigin(Player::White));
    assert_cell_accounting(game.board());

    for cell in [2, 44, 74] {
        assert_eq!(game.occupant_of(cell), Occupant::White);
    }
    for cell in [6, 36, 78] {
        assert_eq!(game.occupant_of(cell), Occupant::Black);
    }
}

#[test]
fn test_topology_is_shared() {
    let a = GameState::new(GameMode::TwoPlayer);
    let b = GameState::new(GameMode::TwoPlayer);
    assert!(std::ptr::eq(a.board().adjacency(), b.board().adjacency()));
    assert!(std::ptr::eq(a.board().adjacency(), &*standard_adjacency()));
}

#[test]
fn test_off_board_reads_blocked() {
    let game = GameState::default();
    assert_eq!(game.occupant_of(TOTAL_CELLS), Occupant::Blocked);
    assert_eq!(game.occupant_of(usize::MAX), Occupant::Blocked);
}

// ============================================================================
// MOVE SCENARIOS
// ============================================================================

#[test]
fn test_clone_capture_law() {
    // White (2,3) clones to (2,4), next to Black on (1,3) and (1,4)
    let board = Board::with_pieces(&[21], &[12, 13, 50]).unwrap();
    let mut game = GameState::from_board(board, Player::White, GameMode::TwoPlayer);
    let (white_before, black_before) = game.scores();

    assert_eq!(game.select_or_move(21), EngineEvent::Armed(21));
    let EngineEvent::MoveApplied(outcome) = game.select_or_move(22) else {
        panic!("expected a move");
    };
    assert_eq!(outcome.kind, MoveKind::Clone);
    assert_eq!(outcome.captured, vec![12, 13]);

    let (white_after, black_after) = game.scores();
    assert_eq!(white_after, white_before + 1 + outcome.captured.len());
    assert_eq!(black_after, black_before - outcome.captured.len());
    assert_eq!((white_after, black_after), (4, 1));
    assert_eq!(game.current_player(), Player::Black);
}

#[test]
fn test_jump_vacates_origin() {
    let board = Board::with_pieces(&[20], &[13, 50]).unwrap();
    let mut game = GameState::from_board(board, Player::White, GameMode::TwoPlayer);
    game.select_or_move(20);
    let EngineEvent::MoveApplied(outcome) = game.select_or_move(22) else {
        panic!("expected a move");
    };
    assert_eq!(outcome.kind, MoveKind::Jump);
    assert_eq!(outcome.captured, vec![13]);
    assert_eq!(game.occupant_of(20), Occupant::Empty);
    assert_eq!(game.occupant_of(22), Occupant::White);
    assert_eq!(game.scores(), (2, 1));
}

#[test]
fn test_capture_wipes_out_opponent() {
    let board = Board::with_pieces(&[21], &[12, 13]).unwrap();
    let mut game = GameState::from_board(board, Player::White, GameMode::TwoPlayer);
    game.select_or_move(21);
    let event = game.select_or_move(22);

    let EngineEvent::GameOver(verdict) = event else {
        panic!("expected game over, got {:?}", event);
    };
    assert_eq!(verdict.reason, GameOverReason::NoLegalMoves(Player::Black));
    assert_eq!(verdict.result, GameResult::WhiteWins);
    assert_eq!((verdict.white, verdict.black), (4, 0));
    assert_eq!(
        game.select_or_move(21),
        EngineEvent::IllegalMove(IllegalMove::ActionAfterGameOver)
    );
}

#[test]
fn test_rejections_leave_state_untouched() {
    let mut game = GameState::new(GameMode::TwoPlayer);
    let before = game.board().clone();

    // nothing armed, enemy piece
    assert_eq!(game.select_or_move(6), EngineEvent::IllegalMove(IllegalMove::NotOwner));
    // blocked cell
    assert_eq!(game.select_or_move(0), EngineEvent::IllegalMove(IllegalMove::NotOwner));

    game.select_or_move(2);
    // too far
    assert_eq!(game.select_or_move(40), EngineEvent::IllegalMove(IllegalMove::OutOfRange));
    // occupied
    assert_eq!(
        game.select_or_move(6),
        EngineEvent::IllegalMove(IllegalMove::DestinationNotEmpty)
    );
    assert_eq!(game.armed_cell(), Some(2));
    assert_eq!(game.board(), &before);

    assert_eq!(game.attempt_move(6, 5, Player::Black), Err(IllegalMove::WrongTurn));
    assert_eq!(game.board(), &before);
}

// ============================================================================
// INVARIANT FUZZING
// ============================================================================

#[test]
fn test_random_clicks_keep_invariants() {
    for seed in 0..8u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut game = GameState::new(GameMode::TwoPlayer);
        let blocked = blocked_set(game.board());

        for _ in 0..4000 {
            if game.is_game_over().is_some() {
                break;
            }
            let before = game.board().clone();
            let (white_before, black_before) = game.scores();
            let mover = game.current_player();

            let event = game.select_or_move(random_click(&game, &mut rng));

            match &event {
                EngineEvent::Armed(_) | EngineEvent::IllegalMove(_) => {
                    assert_eq!(game.board(), &before);
                    assert_eq!(game.current_player(), mover);
                }
                EngineEvent::MoveApplied(outcome) => {
                    let placed = usize::from(outcome.kind == MoveKind::Clone);
                    let gained = placed + outcome.captured.len();
                    let (white, black) = game.scores();
                    match mover {
                        Player::White => {
                            assert_eq!(white, white_before + gained);
                            assert_eq!(black, black_before - outcome.captured.len());
                        }
                        Player::Black => {
                            assert_eq!(black, black_before + gained);
                            assert_eq!(white, white_before - outcome.captured.len());
                        }
                    }
                    assert_eq!(game.current_player(), mover.opponent());
                }
                EngineEvent::GameOver(verdict) => {
                    assert_eq!((verdict.white, verdict.black), game.scores());
                }
            }

            assert_cell_accounting(game.board());
            assert_eq!(blocked_set(game.board()), blocked);
        }
    }
}

#[test]
fn test_verdict_matches_counts() {
    let config = AiConfig::new(PlayerType::Random, PlayerType::Random).with_seed(3);
    let result = play_match(&config, 4);
    for outcome in &result.game_outcomes {
        if let Some(verdict) = outcome.verdict {
            let expected = match verdict.white.cmp(&verdict.black) {
                std::cmp::Ordering::Greater => GameResult::WhiteWins,
                std::cmp::Ordering::Less => GameResult::BlackWins,
                std::cmp::Ordering::Equal => GameResult::Tie,
            };
            assert_eq!(verdict.result, expected);
        }
    }
}

// ============================================================================
// COMPUTER PLAYERS
// ============================================================================

#[test]
fn test_greedy_is_deterministic() {
    let ai = GreedyAI::new();
    let (first, first_moves) = ai.play_game(GameState::default(), 200);
    let (second, second_moves) = ai.play_game(GameState::default(), 200);
    assert_eq!(first_moves, second_moves);
    assert_eq!(first.board(), second.board());
    assert_eq!(first.is_game_over(), second.is_game_over());
}

#[test]
fn test_greedy_never_picks_a_smaller_capture() {
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    let mut random = RandomAI::with_seed(17);
    let mut game = GameState::default();

    for _ in 0..60 {
        if game.is_game_over().is_some() {
            break;
        }
        let player = game.current_player();
        let board = game.board().clone();
        let Some(greedy) = choose_move(&board, player) else {
            break;
        };

        let mut probe = game.clone();
        let chosen = probe
            .attempt_move(greedy.origin, greedy.destination, player)
            .unwrap();
        for mv in game.legal_moves() {
            let mut other = game.clone();
            let outcome = other.attempt_move(mv.origin, mv.destination, player).unwrap();
            assert!(outcome.captured.len() <= chosen.captured.len());
        }

        // advance with a mix of both players
        let mv = if rng.gen_bool(0.5) {
            greedy
        } else {
            random.best_move(&game).unwrap()
        };
        game.attempt_move(mv.origin, mv.destination, player).unwrap();
    }
}

#[test]
fn test_versus_computer_game_completes() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut game = GameState::new(GameMode::VersusComputer { ai: Player::Black });

    for _ in 0..20_000 {
        if game.is_game_over().is_some() {
            break;
        }
        assert_eq!(game.current_player(), Player::White);
        let moves = game.legal_moves();
        let mv = moves[rng.gen_range(0..moves.len())];
        game.select_or_move(mv.origin);
        game.select_or_move(mv.destination);
    }

    let verdict = game.is_game_over().expect("game should finish");
    assert_eq!((verdict.white, verdict.black), game.scores());
    assert_cell_accounting(game.board());
}

// ============================================================================
// ARENA
// ============================================================================

#[test]
fn test_arena_is_reproducible() {
    let config = AiConfig::new(PlayerType::Greedy, PlayerType::Random)
        .with_seed(99)
        .with_max_moves(120);
    let a = play_match(&config, 3);
    let b = play_match_parallel(&config, 3);
    assert_eq!(a.games_played, 3);
    assert_eq!(a.white_wins, b.white_wins);
    assert_eq!(a.black_wins, b.black_wins);
    for (x, y) in a.game_outcomes.iter().zip(&b.game_outcomes) {
        assert_eq!((x.white, x.black, x.moves), (y.white, y.black, y.moves));
    }
}

#[test]
fn test_greedy_beats_random_mostly() {
    let config = AiConfig::new(PlayerType::Greedy, PlayerType::Random).with_seed(1);
    let result = play_match_parallel(&config, 10);
    assert!(result.white_wins > result.black_wins);
}
