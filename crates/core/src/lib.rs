//! Core game logic - pure, deterministic, and testable
//!
//! Everything that decides what happens on the board lives here. Nothing in
//! this crate touches the terminal or the clock: the driver feeds actions and
//! timer ticks in, and reads snapshots back out.
//!
//! # Module Structure
//!
//! - [`pieces`]: the seven catalog shapes and their rotation geometry
//! - [`board`]: 10x30 grid with collision checks, merging, and line clears
//! - [`game_state`]: the board engine (spawn, move, rotate, drop, lock)
//! - [`rng`]: seeded generator used to pick the next shape
//! - [`snapshot`]: plain copy of the state for rendering
//!
//! # Rules
//!
//! - A new piece always spawns unrotated with its box origin at (0, 0)
//! - Rotation steps through the shape's declared states in place, with no kicks
//! - A piece locks as soon as a descent is blocked
//! - Full rows are removed top to bottom; each one is shown empty first
//! - If the next piece does not fit at spawn, the game is over
//!
//! # Example
//!
//! ```
//! use tetrish_core::{GameState, SpawnOutcome};
//! use tetrish_core::types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! assert_eq!(game.spawn(), SpawnOutcome::Spawned);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.pieces_locked(), 1);
//! assert_eq!(game.board().occupied_count(), 4);
//! ```

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod snapshot;

pub use tetrish_types as types;

pub use board::{Board, ClearedRows};
pub use game_state::{
    ActionOutcome, FallingPiece, GameState, LockReport, Phase, SpawnOutcome, StepOutcome,
};
pub use pieces::{shape, shape_of, Shape, CATALOG, CATALOG_LEN};
pub use rng::SimpleRng;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
