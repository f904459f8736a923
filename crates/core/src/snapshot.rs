use crate::game_state::Piece;
use crate::pieces::PieceCells;
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

/// Renderer-facing view of the falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub col: i8,
    pub row: i8,
    /// Occupied board cells `(column, row)`, pivot last.
    pub cells: PieceCells,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            col: value.col,
            row: value.row,
            cells: value.cells(),
        }
    }
}

/// Read-only copy of everything a renderer needs for one frame.
///
/// `board` is indexed `[row][column]`, row 0 at the bottom, holding color
/// identifiers (`0` = empty). The active piece is not merged into `board`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.score = 0;
        self.lines = 0;
        self.level = 0;
        self.game_over = true;
    }

    /// Color identifier of the active piece, `0` when there is none.
    pub fn active_color(&self) -> u8 {
        self.active.map_or(0, |a| a.kind.color())
    }

    /// Color at `(col, row)` with the active piece drawn over the board.
    pub fn color_at(&self, col: i8, row: i8) -> u8 {
        if col < 0 || col >= BOARD_WIDTH as i8 || row < 0 || row >= BOARD_HEIGHT as i8 {
            return 0;
        }
        if let Some(active) = self.active {
            if active.cells.contains(&(col, row)) {
                return active.kind.color();
            }
        }
        self.board[row as usize][col as usize]
    }

    /// Kind that spawns after the active one locks.
    pub fn next_kind(&self) -> Option<PieceKind> {
        self.active.map(|a| a.kind.next())
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            score: 0,
            lines: 0,
            level: 0,
            game_over: true,
        }
    }
}
