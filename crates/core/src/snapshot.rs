use crate::board::Board;
use crate::game_state::FallingPiece;
use crate::pieces::Shape;
use crate::types::{Cell, Rotation, BOARD_COLS, BOARD_ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub shape: &'static Shape,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl ActiveSnapshot {
    /// Piece marker at board coordinate (bx, by), empty where the piece has no cell
    pub fn cell_at(&self, bx: i8, by: i8) -> Cell {
        self.shape.cell_at(
            self.rotation,
            bx.saturating_sub(self.x),
            by.saturating_sub(self.y),
        )
    }

    /// Occupied cells in board coordinates (may lie outside the board)
    pub fn board_cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .occupied(self.rotation)
            .map(move |(x, y)| (self.x.saturating_add(x), self.y.saturating_add(y)))
    }
}

impl From<FallingPiece> for ActiveSnapshot {
    fn from(value: FallingPiece) -> Self {
        Self {
            shape: value.shape,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_COLS as usize]; BOARD_ROWS as usize],
    pub active: Option<ActiveSnapshot>,
    pub game_over: bool,
    /// Row currently shown empty before it collapses
    pub flash_row: Option<u8>,
    pub pieces_locked: u32,
    pub rows_cleared: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[None; BOARD_COLS as usize]; BOARD_ROWS as usize];
        self.active = None;
        self.game_over = false;
        self.flash_row = None;
        self.pieces_locked = 0;
        self.rows_cleared = 0;
    }

    /// View of a bare board, with no active piece.
    ///
    /// Used while a completed row flashes: the piece has already been merged.
    pub fn from_board(board: &Board) -> Self {
        let mut s = Self::default();
        board.write_grid(&mut s.board);
        s
    }

    /// What a renderer should draw at (x, y): the active piece wins over the board
    pub fn visible_cell(&self, x: i8, y: i8) -> Cell {
        if x < 0 || y < 0 || x >= BOARD_COLS as i8 || y >= BOARD_ROWS as i8 {
            return None;
        }
        self.active
            .and_then(|a| a.cell_at(x, y))
            .or(self.board[y as usize][x as usize])
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_COLS as usize]; BOARD_ROWS as usize],
            active: None,
            game_over: false,
            flash_row: None,
            pieces_locked: 0,
            rows_cleared: 0,
        }
    }
}
