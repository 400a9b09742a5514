//! Tetrish (workspace facade crate).
//!
//! Re-exports the workspace crates as `tetrish::{core,input,term,types}` and
//! holds the runtime configuration used by the binary.

pub mod config;

pub use tetrish_core as core;
pub use tetrish_input as input;
pub use tetrish_term as term;
pub use tetrish_types as types;
