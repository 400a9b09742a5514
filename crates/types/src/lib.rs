//! Shared data types and constants
//!
//! Everything in here is plain data with no dependencies, so the same
//! definitions serve the core engine, the input mapping, and the terminal view.
//!
//! # Board Dimensions
//!
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Rows**: 30 (indexed 0-29, top to bottom)
//! - **Spawn position**: (0, 0), the top-left corner
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_TICK_MS` | 1000 | Interval of the automatic one-row descent |
//! | `LINE_FLASH_MS` | 1000 | How long a completed row stays visibly empty |
//!
//! # Examples
//!
//! ```
//! use tetrish_types::{Rotation, BOARD_COLS, BOARD_ROWS};
//!
//! assert_eq!(Rotation::North.index(), 0);
//! assert_eq!(Rotation::from_index(3), Some(Rotation::West));
//!
//! assert_eq!(BOARD_COLS, 10);
//! assert_eq!(BOARD_ROWS, 30);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_COLS: u8 = 10;

/// Board height in cells (30 rows)
pub const BOARD_ROWS: u8 = 30;

/// Default interval between automatic descents (1000ms = one row per second)
pub const DEFAULT_TICK_MS: u64 = 1000;

/// Pause while a completed row is shown empty before it collapses
pub const LINE_FLASH_MS: u64 = 1000;

/// Cosmetic label carried by every occupied cell.
///
/// One kind per catalog shape. Labels only pick a color and glyph when
/// rendering; gameplay never looks at them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    O,
    Z,
    S,
    I,
    T,
    L,
    J,
}

impl PieceKind {
    /// Single-letter tag used by the board dump and the side panel.
    ///
    /// ```
    /// use tetrish_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.letter(), 'I');
    /// assert_eq!(PieceKind::from_letter('z'), Some(PieceKind::Z));
    /// ```
    pub fn letter(&self) -> char {
        match self {
            PieceKind::O => 'O',
            PieceKind::Z => 'Z',
            PieceKind::S => 'S',
            PieceKind::I => 'I',
            PieceKind::T => 'T',
            PieceKind::L => 'L',
            PieceKind::J => 'J',
        }
    }

    /// Parse from a letter (case-insensitive)
    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'O' => Some(PieceKind::O),
            'Z' => Some(PieceKind::Z),
            'S' => Some(PieceKind::S),
            'I' => Some(PieceKind::I),
            'T' => Some(PieceKind::T),
            'L' => Some(PieceKind::L),
            'J' => Some(PieceKind::J),
            _ => None,
        }
    }
}

/// Rotation index of a falling piece.
///
/// - **North**: 0, unrotated
/// - **East**: 1, one quarter turn
/// - **South**: 2, half turn
/// - **West**: 3, three quarter turns
///
/// Shapes declare how many of these states they use (1, 2 or 4); advancing
/// always wraps back to North after the last declared state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Numeric index in `[0, 4)`
    pub fn index(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotation for a numeric index, `None` past 3
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Rotation::North),
            1 => Some(Rotation::East),
            2 => Some(Rotation::South),
            3 => Some(Rotation::West),
            _ => None,
        }
    }

    /// True for East and West, where width and height trade places
    pub fn is_sideways(&self) -> bool {
        matches!(self, Rotation::East | Rotation::West)
    }
}

/// Discrete commands the driver feeds into the engine.
///
/// The automatic timer descent is not an action; it goes through
/// `GameState::tick` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Advance to the next rotation state
    Rotate,
    /// Move one row down, locking if blocked
    SoftDrop,
    /// Drop to the lowest free position and lock
    HardDrop,
}

/// A cell on the board or in a shape pattern
///
/// - `None`: empty
/// - `Some(PieceKind)`: occupied, labelled with the kind that placed it
pub type Cell = Option<PieceKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(DEFAULT_TICK_MS, 1000);
        assert_eq!(LINE_FLASH_MS, 1000);
    }

    #[test]
    fn rotation_index_roundtrip() {
        for i in 0..4 {
            let rot = Rotation::from_index(i).unwrap();
            assert_eq!(rot.index(), i);
        }
        assert_eq!(Rotation::from_index(4), None);
    }

    #[test]
    fn sideways_rotations() {
        assert!(!Rotation::North.is_sideways());
        assert!(Rotation::East.is_sideways());
        assert!(!Rotation::South.is_sideways());
        assert!(Rotation::West.is_sideways());
    }

    #[test]
    fn piece_letters() {
        assert_eq!(PieceKind::from_letter('o'), Some(PieceKind::O));
        assert_eq!(PieceKind::from_letter('x'), None);
        assert_eq!(PieceKind::T.letter(), 'T');
    }
}
