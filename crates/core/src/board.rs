//! Board module - manages the game grid
//!
//! The board is a 10x22 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..21
//! (**bottom to top**). Pieces settle toward row 0.

use arrayvec::ArrayVec;

use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Row indices removed by a single compaction pass, bottom to top.
pub type ClearedRows = ArrayVec<u8, HEIGHT>;

/// The game board - 10 columns x 22 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x), row 0 at the bottom
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Check if a row has no filled cells
    pub fn is_row_empty(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_none())
    }

    /// Cells of row `y`, left to right.
    ///
    /// # Panics
    ///
    /// Panics if `y` is not a board row.
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Remove every full row and let the rows above settle.
    ///
    /// Single bottom-to-top pass. `write_y` trails `read_y` by the number of
    /// full rows seen so far; every non-full row is copied down to `write_y`.
    /// Rows are visited in increasing order and each is written at or below
    /// its own index, so a row is never overwritten before it has been read,
    /// and the relative order of surviving rows is preserved. Rows at and
    /// above the final `write_y` are emptied.
    ///
    /// Removing full rows one at a time (lowest first) shifts every row above
    /// the removed one down by one. Summed over all removals, a surviving row
    /// drops by the number of full rows beneath it, which is exactly the
    /// `read_y - write_y` gap used here, so both procedures agree.
    ///
    /// Returns the removed row indices (pre-clear coordinates, bottom to top).
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut write_y = 0usize;

        for read_y in 0..HEIGHT {
            if self.is_row_full(read_y) {
                cleared.push(read_y as u8);
                continue;
            }
            if write_y != read_y {
                let src = read_y * WIDTH;
                self.cells.copy_within(src..src + WIDTH, write_y * WIDTH);
            }
            write_y += 1;
        }

        self.cells[write_y * WIDTH..].fill(None);

        cleared
    }

    /// Write a piece's cells onto the board.
    ///
    /// Returns false (and writes nothing) if any cell is out of bounds or occupied.
    pub fn lock_cells(&mut self, cells: &[(i8, i8)], kind: PieceKind) -> bool {
        if !cells.iter().all(|&(x, y)| self.is_valid(x, y)) {
            return false;
        }

        for &(x, y) in cells {
            self.set(x, y, Some(kind));
        }

        true
    }

    /// Number of filled cells on the board
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Export as color identifiers, indexed `[row][column]` with row 0 at the bottom.
    pub fn write_color_grid(&self, out: &mut [[u8; WIDTH]; HEIGHT]) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, slot) in row.iter_mut().enumerate() {
                *slot = self.cells[y * WIDTH + x].map_or(0, PieceKind::color);
            }
        }
    }

    /// Build a board from rows given top row first, the way they read on screen.
    ///
    /// Each string is one row of up to 10 characters: `.` or space for empty,
    /// a piece letter (`L J S Z T O I`) for a filled cell, and `#` as shorthand
    /// for an `I` cell. Missing rows below the last string are left empty.
    ///
    /// # Panics
    ///
    /// Panics on more than 22 rows, rows wider than 10 cells, or unknown
    /// characters. Intended for tests and fixtures.
    pub fn from_rows(rows: &[&str]) -> Self {
        assert!(rows.len() <= HEIGHT, "too many rows: {}", rows.len());
        let mut board = Self::new();
        let top = rows.len() as i8 - 1;
        for (i, line) in rows.iter().enumerate() {
            let y = top - i as i8;
            assert!(line.chars().count() <= WIDTH, "row too wide: {line:?}");
            for (x, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '.' | ' ' => None,
                    '#' => Some(PieceKind::I),
                    other => Some(
                        PieceKind::from_str(&other.to_string())
                            .unwrap_or_else(|| panic!("unknown cell character: {other:?}")),
                    ),
                };
                board.set(x as i8, y, cell);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
