//! Terminal renderer for blockfall.
//!
//! Snapshots are drawn into a plain framebuffer ([`fb`]) by [`GameView`], then
//! flushed to the terminal by [`TerminalRenderer`]. Only the renderer does I/O.
//! Board cells are two glyphs wide so the well keeps a square-ish aspect.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{kind_color, GameView, Viewport};
pub use renderer::{encode_frame, TerminalRenderer};
