//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto [`crate::types::Command`]. Each key press
//! becomes at most one command, applied immediately by the driver: no
//! auto-repeat, no buffering across frames.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, is_restart, should_quit, DriverKey};
