//! Hex board topology with odd-q offset coordinates
//!
//! The board is a 9x9 rectangle of positions in "odd-q" layout: odd
//! columns are drawn half a cell lower than even columns. Positions
//! outside the hexagon (and three holes around the center) are blocked.
//! The adjacency tables are built once and shared by every board.

use std::sync::Arc;

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::state::Board;

/// Stable index of a cell: `column * rows + row`
pub type CellIndex = usize;

/// Neighbor offsets (dcol, drow) for even columns
const EVEN_COLUMN_OFFSETS: [(i8, i8); 6] = [
    (0, -1),  // N
    (1, -1),  // NE
    (1, 0),   // SE
    (0, 1),   // S
    (-1, 0),  // SW
    (-1, -1), // NW
];

/// Neighbor offsets (dcol, drow) for odd columns
const ODD_COLUMN_OFFSETS: [(i8, i8); 6] = [
    (0, -1), // N
    (1, 0),  // NE
    (1, 1),  // SE
    (0, 1),  // S
    (-1, 1), // SW
    (-1, 0), // NW
];

/// Offset coordinates of a board position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub col: u8,
    pub row: u8,
}

impl Coord {
    pub const fn new(col: u8, row: u8) -> Self {
        Self { col, row }
    }

    /// Cube coordinates (x, y, z) with x + y + z == 0
    fn cube(self) -> (i16, i16, i16) {
        let col = i16::from(self.col);
        let row = i16::from(self.row);
        let x = col;
        let z = row - (col - (col & 1)) / 2;
        (x, -x - z, z)
    }

    /// Hex distance between two positions
    pub fn distance_to(self, other: Coord) -> u8 {
        let (ax, ay, az) = self.cube();
        let (bx, by, bz) = other.cube();
        let d = ((ax - bx).abs() + (ay - by).abs() + (az - bz).abs()) / 2;
        d as u8
    }

    /// Geometric neighbors that fall inside a `columns` x `rows` rectangle
    pub fn neighbors(self, columns: u8, rows: u8) -> impl Iterator<Item = Coord> {
        let offsets = if self.col % 2 == 0 {
            &EVEN_COLUMN_OFFSETS
        } else {
            &ODD_COLUMN_OFFSETS
        };
        offsets.iter().filter_map(move |&(dc, dr)| {
            let col = i16::from(self.col) + i16::from(dc);
            let row = i16::from(self.row) + i16::from(dr);
            let inside = (0..i16::from(columns)).contains(&col) && (0..i16::from(rows)).contains(&row);
            inside.then(|| Coord::new(col as u8, row as u8))
        })
    }
}

/// Static description of a board layout
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shape {
    pub columns: u8,
    pub rows: u8,
    /// Permanently unplayable positions (column, row)
    pub blocked: &'static [(u8, u8)],
    pub white_start: &'static [CellIndex],
    pub black_start: &'static [CellIndex],
}

/// The standard Hexxagon board: 58 playable cells, three center holes.
pub const HEXXAGON: Shape = Shape {
    columns: 9,
    rows: 9,
    blocked: &[
        (0, 0), (0, 1), (0, 7), (0, 8),
        (1, 0), (1, 7), (1, 8),
        (2, 0), (2, 8),
        (3, 4), (3, 8),
        (4, 3),
        (5, 4), (5, 8),
        (6, 0), (6, 8),
        (7, 0), (7, 7), (7, 8),
        (8, 0), (8, 1), (8, 7), (8, 8),
    ],
    // Alternating corners of the hexagon
    white_start: &[2, 44, 74],
    black_start: &[6, 36, 78],
};

/// One entry of the enumerable topology: (index, coordinate, blocked)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellInfo {
    pub index: CellIndex,
    pub coord: Coord,
    pub blocked: bool,
}

/// Precomputed ring-1 and ring-2 neighbor sets for every cell.
///
/// Both lists are sorted by ascending cell index. Blocked cells have no
/// neighbors and never appear in anyone's lists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdjacencyIndex {
    rows: u8,
    cells: Vec<CellInfo>,
    ring1: Vec<Vec<CellIndex>>,
    ring2: Vec<Vec<CellIndex>>,
}

impl AdjacencyIndex {
    pub fn new(shape: &Shape) -> Self {
        let blocked: FxHashSet<Coord> = shape
            .blocked
            .iter()
            .map(|&(col, row)| Coord::new(col, row))
            .collect();

        let cells: Vec<CellInfo> = (0..shape.columns)
            .flat_map(|col| (0..shape.rows).map(move |row| Coord::new(col, row)))
            .enumerate()
            .map(|(index, coord)| CellInfo {
                index,
                coord,
                blocked: blocked.contains(&coord),
            })
            .collect();

        let index_of = |c: Coord| usize::from(c.col) * usize::from(shape.rows) + usize::from(c.row);
        let playable = |c: Coord| !blocked.contains(&c);

        let mut ring1 = Vec::with_capacity(cells.len());
        let mut ring2 = Vec::with_capacity(cells.len());

        for info in &cells {
            if info.blocked {
                ring1.push(Vec::new());
                ring2.push(Vec::new());
                continue;
            }

            let origin = info.coord;
            let adjacent: FxHashSet<Coord> = origin.neighbors(shape.columns, shape.rows).collect();

            let mut near: Vec<CellIndex> = adjacent
                .iter()
                .copied()
                .filter(|&c| playable(c))
                .map(index_of)
                .collect();
            near.sort_unstable();

            // One hop through any position (holes included), then one more.
            let mut far: FxHashSet<CellIndex> = FxHashSet::default();
            for &hop in &adjacent {
                for target in hop.neighbors(shape.columns, shape.rows) {
                    if target != origin && !adjacent.contains(&target) && playable(target) {
                        far.insert(index_of(target));
                    }
                }
            }
            let mut far: Vec<CellIndex> = far.into_iter().collect();
            far.sort_unstable();

            ring1.push(near);
            ring2.push(far);
        }

        Self {
            rows: shape.rows,
            cells,
            ring1,
            ring2,
        }
    }

    /// Total number of positions, blocked ones included
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Every position in index order
    pub fn cells(&self) -> &[CellInfo] {
        &self.cells
    }

    /// Off-board indices count as blocked
    pub fn is_blocked(&self, cell: CellIndex) -> bool {
        self.cells.get(cell).map_or(true, |info| info.blocked)
    }

    pub fn coord(&self, cell: CellIndex) -> Option<Coord> {
        self.cells.get(cell).map(|info| info.coord)
    }

    pub fn index_of(&self, coord: Coord) -> Option<CellIndex> {
        if coord.row >= self.rows {
            return None;
        }
        let index = usize::from(coord.col) * usize::from(self.rows) + usize::from(coord.row);
        (index < self.cells.len()).then_some(index)
    }

    /// Playable cells at ring distance 1
    pub fn neighbors(&self, cell: CellIndex) -> &[CellIndex] {
        self.ring1.get(cell).map_or(&[], Vec::as_slice)
    }

    /// Playable cells at ring distance 2
    pub fn jump_targets(&self, cell: CellIndex) -> &[CellIndex] {
        self.ring2.get(cell).map_or(&[], Vec::as_slice)
    }

    pub fn is_neighbor(&self, a: CellIndex, b: CellIndex) -> bool {
        self.neighbors(a).binary_search(&b).is_ok()
    }

    pub fn is_jump_target(&self, a: CellIndex, b: CellIndex) -> bool {
        self.jump_targets(a).binary_search(&b).is_ok()
    }
}

static STANDARD: Lazy<Arc<AdjacencyIndex>> = Lazy::new(|| Arc::new(AdjacencyIndex::new(&HEXXAGON)));

/// Shared adjacency of the standard board
pub fn standard_adjacency() -> Arc<AdjacencyIndex> {
    Arc::clone(&STANDARD)
}

/// Build the starting board and its adjacency for a shape.
///
/// The standard shape reuses the process-wide index instead of
/// rebuilding it.
pub fn build(shape: &Shape) -> (Board, Arc<AdjacencyIndex>) {
    let adjacency = if *shape == HEXXAGON {
        standard_adjacency()
    } else {
        Arc::new(AdjacencyIndex::new(shape))
    };
    let board = Board::starting(shape, Arc::clone(&adjacency));
    (board, adjacency)
}
