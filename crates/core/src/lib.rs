//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules and state management. It has no
//! dependencies on terminals, clocks or I/O, making it:
//!
//! - **Deterministic**: pieces arrive in a fixed round-robin order, so the same
//!   commands and clock readings always produce the same game
//! - **Testable**: every rule is a plain function or a method on an owned value
//! - **Allocation-free**: the board is a fixed array; locking and snapshots
//!   never touch the heap
//!
//! # Module Structure
//!
//! - [`board`]: 10x22 grid, row 0 at the bottom, with the line-clear compaction
//! - [`pieces`]: pivot + offset footprints, quarter-turn rotation, rotate kicks
//! - [`scoring`]: lock points and gravity period, both keyed off lines / 10
//! - [`game_state`]: the engine (movement, locking, gravity, commands)
//! - [`snapshot`]: read-only per-frame view for renderers
//!
//! # Game Rules
//!
//! - **Spawn**: pivot (5, 20), rotation 0; kinds cycle L, J, S, Z, T, O, I
//! - **Rotation**: one quarter turn; kicks tried in place, left, right, two
//!   right (I piece at the left wall), down, up
//! - **Lock**: when gravity or a drop cannot move the piece down
//! - **Scoring**: `(lines / 10 + 1) << rows_cleared` per lock
//! - **Game over**: the next piece cannot be placed at the spawn pivot
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::Command;
//!
//! // The engine starts in the game-over state.
//! let mut game = GameState::new();
//! assert!(game.is_game_over());
//! game.restart();
//!
//! game.apply_input(Command::MoveRight);
//! game.apply_input(Command::Rotate);
//! game.apply_input(Command::HardDrop);
//!
//! // Every lock scores at least one point.
//! assert_eq!(game.score(), 1);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) once per frame with a
//! monotonic clock reading in nanoseconds, or
//! [`GameState::advance`](game_state::GameState::advance) with the elapsed time.
//! Gravity takes at most one step per call.

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{GameState, Piece};
pub use pieces::{piece_cells, rotation_count, PieceCells};
pub use scoring::{drop_period_ns, lock_score};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
