//! Board module - the grid of locked cells
//!
//! The board is a 10x30 grid where each cell is empty or labelled with the
//! piece kind that filled it. Storage is a fixed-size flat row-major array,
//! so nothing on the board allocates.
//! Coordinates: (x, y) with x in 0..10 (left to right), y in 0..30 (top to bottom).

use arrayvec::ArrayVec;

use crate::pieces::Shape;
use crate::types::{Cell, Rotation, BOARD_COLS, BOARD_ROWS};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_COLS as usize) * (BOARD_ROWS as usize);

/// Row indices removed by one line-clear pass, in processing order (top to bottom)
pub type ClearedRows = ArrayVec<usize, { BOARD_ROWS as usize }>;

/// The game board - 10 columns x 30 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * COLS + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if Self::is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (BOARD_COLS as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_COLS
    }

    pub fn height(&self) -> u8 {
        BOARD_ROWS
    }

    /// Cell at (x, y), `None` when out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at (x, y). Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn is_out_of_bounds(x: i8, y: i8) -> bool {
        x < 0 || x >= BOARD_COLS as i8 || y < 0 || y >= BOARD_ROWS as i8
    }

    /// Would `shape` at rotation `rot` with its box origin at (x0, y0) hit
    /// a wall, the floor, the ceiling, or a locked cell?
    ///
    /// Only occupied shape cells count; the empty part of the bounding box
    /// may hang off the board.
    pub fn collides(&self, shape: &Shape, rot: Rotation, x0: i8, y0: i8) -> bool {
        shape.occupied(rot).any(|(x, y)| {
            let bx = x0.saturating_add(x);
            let by = y0.saturating_add(y);
            Self::is_out_of_bounds(bx, by) || self.is_occupied(bx, by)
        })
    }

    /// Write the shape's label into the board under every occupied shape cell.
    ///
    /// Cells that fall outside the board are dropped. Returns how many cells
    /// were written.
    pub fn stamp(&mut self, shape: &Shape, rot: Rotation, x0: i8, y0: i8) -> usize {
        let mut written = 0;
        for (x, y) in shape.occupied(rot) {
            if self.set(x0.saturating_add(x), y0.saturating_add(y), Some(shape.kind())) {
                written += 1;
            }
        }
        written
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        match self.row(y) {
            Some(row) => row.iter().all(|cell| cell.is_some()),
            None => false,
        }
    }

    /// Cells of row `y`, left to right
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= BOARD_ROWS as usize {
            return None;
        }
        let start = y * BOARD_COLS as usize;
        Some(&self.cells[start..start + BOARD_COLS as usize])
    }

    /// Empty every cell of row `y` without moving anything
    pub fn empty_row(&mut self, y: usize) {
        if y >= BOARD_ROWS as usize {
            return;
        }
        let start = y * BOARD_COLS as usize;
        self.cells[start..start + BOARD_COLS as usize].fill(None);
    }

    /// Remove row `y`: rows above shift down by one and row 0 becomes empty.
    /// Returns the number of rows removed (1 or 0)
    pub fn clear_row(&mut self, y: usize) -> usize {
        if y >= BOARD_ROWS as usize {
            return 0;
        }

        let width = BOARD_COLS as usize;

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            self.cells
                .copy_within(src_start..src_start + width, row * width);
        }
        self.cells[..width].fill(None);

        1
    }

    /// Clear every full row, top to bottom, without a flash pause
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        self.clear_full_rows_with(|_, _| {})
    }

    /// Clear every full row, top to bottom.
    ///
    /// Each full row is first emptied in place and `on_flash` is called with
    /// the board in that state, then the row is collapsed. Rows are scanned
    /// in increasing order and collapsing only moves rows above the current
    /// one, so every remaining full row is still found at its shifted index.
    pub fn clear_full_rows_with(&mut self, mut on_flash: impl FnMut(&Board, usize)) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        for y in 0..BOARD_ROWS as usize {
            if self.is_row_full(y) {
                self.empty_row(y);
                on_flash(&*self, y);
                self.clear_row(y);
                cleared.push(y);
            }
        }
        cleared
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Copy into a 2D grid (for snapshots)
    pub fn write_grid(&self, out: &mut [[Cell; BOARD_COLS as usize]; BOARD_ROWS as usize]) {
        for (y, row) in out.iter_mut().enumerate() {
            let start = y * BOARD_COLS as usize;
            row.copy_from_slice(&self.cells[start..start + BOARD_COLS as usize]);
        }
    }

    /// Build a board from text rows, top row first.
    ///
    /// `.` and space are empty; a piece letter (see `PieceKind::from_letter`)
    /// fills the cell with that kind, any other character fills it with `I`.
    /// Missing rows and columns are empty. Rows are placed from the top.
    pub fn from_rows(rows: &[&str]) -> Self {
        use crate::types::PieceKind;

        let mut board = Self::new();
        for (y, line) in rows.iter().take(BOARD_ROWS as usize).enumerate() {
            for (x, ch) in line.chars().take(BOARD_COLS as usize).enumerate() {
                let cell = match ch {
                    '.' | ' ' => None,
                    c => Some(PieceKind::from_letter(c).unwrap_or(PieceKind::I)),
                };
                board.set(x as i8, y as i8, cell);
            }
        }
        board
    }

    /// Render row `y` as text, the inverse of [`Board::from_rows`]
    pub fn row_string(&self, y: usize) -> String {
        self.row(y)
            .unwrap_or(&[])
            .iter()
            .map(|c| c.map(|k| k.letter()).unwrap_or('.'))
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
