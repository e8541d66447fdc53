//! Play command - interactive game at the terminal
//!
//! The terminal is a thin shell over the engine: every input line is one
//! cell click passed to `select_or_move`, and the board is redrawn from
//! the engine's state after each event.
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_session()
//! - Level 3: parse_cell(), describe_event()
//! - Level 4: rendering utilities

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use hexxagon_core::{
    AdjacencyIndex, CellIndex, Coord, EngineEvent, GameMode, GameOverReason, GameResult,
    GameState, MoveKind, MoveOutcome, Occupant, Player, Verdict,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Play against the greedy computer player
    #[arg(long)]
    pub vs_computer: bool,

    /// Color driven by the computer (with --vs-computer)
    #[arg(long, value_enum, default_value = "black")]
    pub ai_color: Color,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Color {
    White,
    Black,
}

impl From<Color> for Player {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Player::White,
            Color::Black => Player::Black,
        }
    }
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs) -> Result<()> {
    let mode = game_mode(&args);
    tracing::info!(?mode, "starting interactive game");

    let mut game = GameState::new(mode);
    let stdin = io::stdin();
    let stdout = io::stdout();
    play_session(&mut game, stdin.lock(), stdout.lock())
}

fn game_mode(args: &PlayArgs) -> GameMode {
    if args.vs_computer {
        GameMode::VersusComputer {
            ai: args.ai_color.into(),
        }
    } else {
        GameMode::TwoPlayer
    }
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Feed input lines to the engine until the game ends or input runs out
fn play_session<R: BufRead, W: Write>(game: &mut GameState, input: R, mut out: W) -> Result<()> {
    writeln!(out, "Enter a cell as col,row (or its index). q quits.")?;
    if let Some(reply) = game.ai_reply() {
        writeln!(out, "{}", describe_outcome(reply))?;
    }
    write!(out, "{}", render_board(game))?;

    if let Some(verdict) = game.is_game_over() {
        writeln!(out, "{}", describe_verdict(&verdict))?;
        return Ok(());
    }

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if text.eq_ignore_ascii_case("q") || text.eq_ignore_ascii_case("quit") {
            break;
        }

        let Some(cell) = parse_cell(text, game.board().adjacency()) else {
            writeln!(out, "Not a cell: {}", text)?;
            continue;
        };

        let event = game.select_or_move(cell);
        writeln!(out, "{}", describe_event(&event, game))?;
        if let Some(reply) = game.ai_reply() {
            writeln!(out, "{}", describe_outcome(reply))?;
        }
        write!(out, "{}", render_board(game))?;

        if game.is_game_over().is_some() {
            break;
        }
    }

    out.flush()?;
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Accepts `col,row` or a raw cell index
fn parse_cell(text: &str, adjacency: &AdjacencyIndex) -> Option<CellIndex> {
    match text.split_once(',') {
        Some((col, row)) => {
            let col = col.trim().parse::<u8>().ok()?;
            let row = row.trim().parse::<u8>().ok()?;
            adjacency.index_of(Coord::new(col, row))
        }
        None => text.parse::<CellIndex>().ok(),
    }
}

fn describe_event(event: &EngineEvent, game: &GameState) -> String {
    match event {
        EngineEvent::Armed(cell) => format!("Selected {}", cell_label(game, *cell)),
        EngineEvent::MoveApplied(outcome) => describe_outcome(outcome),
        EngineEvent::IllegalMove(err) => format!("Illegal move: {}", err),
        EngineEvent::GameOver(verdict) => {
            let last = game.last_move().map(describe_outcome).unwrap_or_default();
            format!("{}\n{}", last, describe_verdict(verdict))
        }
    }
}

fn describe_outcome(outcome: &MoveOutcome) -> String {
    let kind = match outcome.kind {
        MoveKind::Clone => "clones",
        MoveKind::Jump => "jumps",
    };
    format!(
        "{} {} {} -> {}, capturing {}",
        player_name(outcome.player),
        kind,
        outcome.origin,
        outcome.destination,
        outcome.captured.len()
    )
}

fn describe_verdict(verdict: &Verdict) -> String {
    let reason = match verdict.reason {
        GameOverReason::BoardFull => "board full".to_string(),
        GameOverReason::NoLegalMoves(player) => format!("{} cannot move", player_name(player)),
    };
    let result = match verdict.result {
        GameResult::WhiteWins => "White wins",
        GameResult::BlackWins => "Black wins",
        GameResult::Tie => "Tie",
    };
    format!(
        "Game over ({}): {} {}-{}",
        reason, result, verdict.white, verdict.black
    )
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn player_name(player: Player) -> &'static str {
    match player {
        Player::White => "White",
        Player::Black => "Black",
    }
}

fn cell_label(game: &GameState, cell: CellIndex) -> String {
    match game.board().adjacency().coord(cell) {
        Some(coord) => format!("{},{}", coord.col, coord.row),
        None => cell.to_string(),
    }
}

/// Draw the board with odd columns shifted half a row down.
///
/// Each row of the layout takes two text lines; even columns print on the
/// first, odd columns on the second. The armed piece is bracketed.
fn render_board(game: &GameState) -> String {
    let adjacency = game.board().adjacency();
    let (columns, rows) = layout_size(adjacency);
    let armed = game.armed_cell();
    let mut text = String::new();

    text.push_str("  ");
    for col in 0..columns {
        text.push_str(&format!(" {} ", col));
    }
    text.push('\n');

    for line in 0..rows * 2 {
        let row = line / 2;
        let parity = line % 2;
        let mut rendered = format!("{} ", if parity == 0 { row.to_string() } else { " ".into() });
        for col in 0..columns {
            let cell = adjacency.index_of(Coord::new(col, row));
            match cell {
                Some(cell) if col % 2 == parity => {
                    rendered.push_str(&cell_glyph(game.occupant_of(cell), armed == Some(cell)));
                }
                _ => rendered.push_str("   "),
            }
        }
        text.push_str(rendered.trim_end());
        text.push('\n');
    }

    let (white, black) = game.scores();
    let status = match game.is_game_over() {
        Some(_) => "game over".to_string(),
        None => format!("{} to move", player_name(game.current_player())),
    };
    text.push_str(&format!("White {}  Black {}  ({})\n", white, black, status));
    text
}

fn cell_glyph(occupant: Occupant, armed: bool) -> String {
    let symbol = match occupant {
        Occupant::Empty => '.',
        Occupant::Blocked => ' ',
        Occupant::White => 'W',
        Occupant::Black => 'B',
    };
    if armed {
        format!("[{}]", symbol)
    } else {
        format!(" {} ", symbol)
    }
}

fn layout_size(adjacency: &AdjacencyIndex) -> (u8, u8) {
    adjacency.cells().iter().fold((0, 0), |(columns, rows), info| {
        (columns.max(info.coord.col + 1), rows.max(info.coord.row + 1))
    })
}

// ============================================================================
// TESTS
// ============================================================================
