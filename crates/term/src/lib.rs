//! Terminal rendering for the game.
//!
//! A small game-oriented pipeline rather than a widget toolkit: the view
//! draws a snapshot into a [`FrameBuffer`], and [`TerminalRenderer`] flushes
//! that buffer to the terminal, sending only what changed since the last frame.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tetrish_core as core;
pub use tetrish_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{kind_color, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
