//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine, terminal rendering, headless replay).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 22 rows (indexed 0-21, **row 0 is the bottom**)
//! - **Spawn pivot**: column 5, row 20
//!
//! Pieces fall toward row 0, so "down" is `dy = -1`.
//!
//! # Gravity Timing
//!
//! Timing values are in nanoseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_DROP_PERIOD_NS` | 1 s | Gravity period below 10 lines |
//! | `MIN_DROP_PERIOD_NS` | 1 ms | Floor once the period has halved enough times |
//! | `DEFAULT_FRAME_MS` | 16 | Default driver frame interval (~60 FPS) |
//!
//! The period halves every 10 cleared lines.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! // Pieces cycle in a fixed order.
//! assert_eq!(PieceKind::L.next(), PieceKind::J);
//! assert_eq!(PieceKind::I.next(), PieceKind::L);
//!
//! // Color identifiers are 1..=7.
//! assert_eq!(PieceKind::from_color(5), Some(PieceKind::T));
//!
//! // Rotation indices wrap per piece.
//! assert_eq!(Rotation::North.rotate_by(-1, 4), Rotation::West);
//!
//! assert_eq!(Command::from_str("hard"), Some(Command::HardDrop));
//! assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), (10, 22));
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (22 rows)
pub const BOARD_HEIGHT: u8 = 22;

/// Pivot column of a freshly spawned piece
pub const SPAWN_COL: i8 = 5;

/// Pivot row of a freshly spawned piece
pub const SPAWN_ROW: i8 = 20;

/// Gravity period with fewer than 10 lines cleared (1 second per row)
pub const BASE_DROP_PERIOD_NS: u64 = 1_000_000_000;

/// Shortest gravity period the scheduler will ever use (1 ms)
pub const MIN_DROP_PERIOD_NS: u64 = 1_000_000;

/// Lines that must be cleared to reach the next level
pub const LINES_PER_LEVEL: u32 = 10;

/// Default frame interval for the terminal driver (16ms ≈ 60 FPS)
pub const DEFAULT_FRAME_MS: u64 = 16;

/// The seven piece kinds, in spawn order.
///
/// Each kind owns a fixed color identifier in `1..=7`:
/// - **L**: 1
/// - **J**: 2
/// - **S**: 3
/// - **Z**: 4
/// - **T**: 5
/// - **O**: 6
/// - **I**: 7
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    L,
    J,
    S,
    Z,
    T,
    O,
    I,
}

impl PieceKind {
    /// All kinds in spawn order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
        PieceKind::O,
        PieceKind::I,
    ];

    /// Color identifier written into the board and exported to renderers.
    pub fn color(self) -> u8 {
        match self {
            PieceKind::L => 1,
            PieceKind::J => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::T => 5,
            PieceKind::O => 6,
            PieceKind::I => 7,
        }
    }

    /// Inverse of [`PieceKind::color`]. `0` and anything above 7 map to `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_color(1), Some(PieceKind::L));
    /// assert_eq!(PieceKind::from_color(7), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_color(0), None);
    /// ```
    pub fn from_color(color: u8) -> Option<Self> {
        match color {
            1 => Some(PieceKind::L),
            2 => Some(PieceKind::J),
            3 => Some(PieceKind::S),
            4 => Some(PieceKind::Z),
            5 => Some(PieceKind::T),
            6 => Some(PieceKind::O),
            7 => Some(PieceKind::I),
            _ => None,
        }
    }

    /// The kind spawned after this one locks: `(color % 7) + 1`.
    pub fn next(self) -> Self {
        match self {
            PieceKind::L => PieceKind::J,
            PieceKind::J => PieceKind::S,
            PieceKind::S => PieceKind::Z,
            PieceKind::Z => PieceKind::T,
            PieceKind::T => PieceKind::O,
            PieceKind::O => PieceKind::I,
            PieceKind::I => PieceKind::L,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "t" => Some(PieceKind::T),
            "o" => Some(PieceKind::O),
            "i" => Some(PieceKind::I),
            _ => None,
        }
    }

    /// Single uppercase letter, used by renderers and replay output.
    pub fn letter(self) -> char {
        match self {
            PieceKind::L => 'L',
            PieceKind::J => 'J',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::T => 'T',
            PieceKind::O => 'O',
            PieceKind::I => 'I',
        }
    }
}

/// Rotation state of a piece, in quarter turns from its spawn orientation.
///
/// A piece only visits the first `rotation_count` states of this cycle:
/// O stays `North`; S, Z and I alternate `North`/`East`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Index in `0..4`.
    pub fn index(self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Build a rotation from its index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 4`. Rotation indices are always produced by modular
    /// arithmetic inside the engine, so an out-of-range value is a logic bug.
    pub fn from_index(index: u8) -> Self {
        match index {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            3 => Rotation::West,
            _ => panic!("rotation index out of range: {index}"),
        }
    }

    /// Step `delta` quarter turns within a cycle of `count` states.
    ///
    /// `delta` may be negative; the result is normalized into `0..count`.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::West.rotate_by(1, 4), Rotation::North);
    /// assert_eq!(Rotation::East.rotate_by(1, 2), Rotation::North);
    /// assert_eq!(Rotation::North.rotate_by(-1, 2), Rotation::East);
    /// assert_eq!(Rotation::North.rotate_by(3, 1), Rotation::North);
    /// ```
    pub fn rotate_by(self, delta: i8, count: u8) -> Self {
        assert!((1..=4).contains(&count), "rotation count out of range: {count}");
        let next = (self.index() as i16 + delta as i16).rem_euclid(count as i16);
        Self::from_index(next as u8)
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Discrete player commands, applied immediately by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate one quarter turn, trying wall kicks in priority order
    Rotate,
    /// Move one row down; lock if blocked
    SoftDrop,
    /// Drop to the lowest reachable row and lock
    HardDrop,
}

impl Command {
    /// Parse a command name (case-insensitive).
    ///
    /// Accepts the long camelCase names and the short script aliases.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("right"), Some(Command::MoveRight));
    /// assert_eq!(Command::from_str("ROTATE"), Some(Command::Rotate));
    /// assert_eq!(Command::from_str("soft"), Some(Command::SoftDrop));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" | "left" => Some(Command::MoveLeft),
            "moveright" | "right" => Some(Command::MoveRight),
            "rotate" | "rot" => Some(Command::Rotate),
            "softdrop" | "soft" | "down" => Some(Command::SoftDrop),
            "harddrop" | "hard" | "drop" => Some(Command::HardDrop),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::Rotate => "rotate",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;

/// Engine-side record of the most recent lock.
///
/// Consumed by drivers (for logging) via `GameState::take_last_event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    /// Kind of the piece that locked
    pub kind: PieceKind,
    pub lines_cleared: u32,
    /// Points added to the score by this lock
    pub score_awarded: u32,
    /// The next piece could not spawn
    pub game_over: bool,
}
