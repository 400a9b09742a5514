//! Terminal input mapping.
//!
//! Translates `crossterm` key events into [`crate::types::GameAction`]s and
//! recognises the quit keys. Only key presses matter; repeats and releases
//! are filtered by the driver before they get here.

pub mod map;

pub use tetrish_types as types;

pub use map::{handle_key_event, should_quit};
