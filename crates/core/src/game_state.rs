//! Game state module - the board engine
//!
//! Owns the board and the single optional falling piece, and implements every
//! rule that touches them: spawning, collision-checked movement and rotation,
//! locking, and line clears. The engine is synchronous and never waits; timing
//! and input belong to the driver, which calls [`GameState::tick`] when its
//! timer expires and [`GameState::apply_action`] for each command.

use crate::board::{Board, ClearedRows};
use crate::pieces::{Shape, CATALOG, CATALOG_LEN};
use crate::rng::SimpleRng;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Cell, GameAction, Rotation};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FallingPiece {
    pub shape: &'static Shape,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl FallingPiece {
    /// Unrotated piece with its box origin at the top-left corner of the board
    pub fn spawn(shape: &'static Shape) -> Self {
        Self {
            shape,
            rotation: Rotation::North,
            x: 0,
            y: 0,
        }
    }

    /// Piece marker at local (x, y) under the current rotation
    pub fn cell_at(&self, x: i8, y: i8) -> Cell {
        self.shape.cell_at(self.rotation, x, y)
    }

    pub fn width(&self) -> u8 {
        self.shape.width(self.rotation)
    }

    pub fn height(&self) -> u8 {
        self.shape.height(self.rotation)
    }
}

/// Where the session stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Between a merge and the next spawn, or before the first spawn
    NoPiece,
    Falling,
    GameOver,
}

/// Result of placing a new piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    Spawned,
    /// The spawn placement collided; the session is over
    GameOver,
}

impl SpawnOutcome {
    pub fn is_game_over(&self) -> bool {
        matches!(self, SpawnOutcome::GameOver)
    }
}

/// What a lock did: which rows went away and whether the next piece fit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockReport {
    pub cleared_rows: ClearedRows,
    pub spawn: SpawnOutcome,
}

impl LockReport {
    pub fn lines_cleared(&self) -> usize {
        self.cleared_rows.len()
    }

    pub fn is_game_over(&self) -> bool {
        self.spawn.is_game_over()
    }
}

/// Result of a one-row descent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    Locked(LockReport),
    /// No falling piece to move (game over, or not spawned yet)
    Idle,
}

impl StepOutcome {
    pub fn is_locked(&self) -> bool {
        matches!(self, StepOutcome::Locked(_))
    }
}

/// Result of applying a [`GameAction`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied,
    /// Blocked move or rotation, or nothing to act on
    Rejected,
    Locked(LockReport),
}

impl ActionOutcome {
    pub fn is_locked(&self) -> bool {
        matches!(self, ActionOutcome::Locked(_))
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, ActionOutcome::Locked(report) if report.is_game_over())
    }
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<FallingPiece>,
    rng: SimpleRng,
    seed: u32,
    game_over: bool,
    pieces_spawned: u32,
    pieces_locked: u32,
    rows_cleared: u32,
}

impl GameState {
    /// Create a new session with the given RNG seed. No piece is spawned yet
    pub fn new(seed: u32) -> Self {
        Self::with_board(Board::new(), seed)
    }

    /// Start from a prepared board (puzzles, tests)
    pub fn with_board(board: Board, seed: u32) -> Self {
        Self {
            board,
            active: None,
            rng: SimpleRng::new(seed),
            seed,
            game_over: false,
            pieces_spawned: 0,
            pieces_locked: 0,
            rows_cleared: 0,
        }
    }

    /// Empty the board and drop the falling piece.
    ///
    /// The RNG keeps running, so the next game draws a fresh sequence.
    pub fn reset(&mut self) {
        self.board.clear();
        self.active = None;
        self.game_over = false;
        self.pieces_spawned = 0;
        self.pieces_locked = 0;
        self.rows_cleared = 0;
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.active.is_some() {
            Phase::Falling
        } else {
            Phase::NoPiece
        }
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn active(&self) -> Option<FallingPiece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn rows_cleared(&self) -> u32 {
        self.rows_cleared
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.game_over = self.game_over;
        out.flash_row = None;
        out.pieces_locked = self.pieces_locked;
        out.rows_cleared = self.rows_cleared;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Spawn a uniformly random catalog shape
    pub fn spawn(&mut self) -> SpawnOutcome {
        if self.game_over {
            return SpawnOutcome::GameOver;
        }
        let idx = self.rng.next_range(CATALOG_LEN as u32) as usize;
        self.spawn_shape(CATALOG[idx])
    }

    /// Spawn `shape` at rotation 0, origin (0, 0).
    ///
    /// The placement is checked before anything is registered; a collision
    /// ends the session and leaves no falling piece.
    pub fn spawn_shape(&mut self, shape: &'static Shape) -> SpawnOutcome {
        if self.game_over {
            return SpawnOutcome::GameOver;
        }

        let piece = FallingPiece::spawn(shape);
        if self
            .board
            .collides(piece.shape, piece.rotation, piece.x, piece.y)
        {
            self.active = None;
            self.game_over = true;
            return SpawnOutcome::GameOver;
        }

        self.active = Some(piece);
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        SpawnOutcome::Spawned
    }

    /// Would the active piece collide with its box origin at (x0, y0) and
    /// rotation `rot`? Always false without an active piece
    pub fn collides(&self, x0: i8, y0: i8, rot: Rotation) -> bool {
        match self.active {
            Some(piece) => self.board.collides(piece.shape, rot, x0, y0),
            None => false,
        }
    }

    /// Try to move the active piece
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(piece) = self.active else {
            return false;
        };

        let x = piece.x.saturating_add(dx);
        let y = piece.y.saturating_add(dy);
        if self.collides(x, y, piece.rotation) {
            return false;
        }

        self.active = Some(FallingPiece { x, y, ..piece });
        true
    }

    /// Try to advance the active piece to its next rotation in place.
    ///
    /// There is no kick search: a blocked rotation is simply rejected.
    pub fn try_rotate(&mut self) -> bool {
        let Some(piece) = self.active else {
            return false;
        };

        let rotation = piece.shape.next_rotation(piece.rotation);
        if self.collides(piece.x, piece.y, rotation) {
            return false;
        }

        self.active = Some(FallingPiece { rotation, ..piece });
        true
    }

    /// Merge the active piece into the board and clear full rows
    pub fn merge(&mut self) -> ClearedRows {
        self.merge_with(|_| {})
    }

    /// [`GameState::merge`], calling `on_flash` while each full row is shown
    /// empty (see [`Board::clear_full_rows_with`]).
    ///
    /// The flash frame has no active piece and `flash_row` set. Its counters
    /// already include this lock and every row emptied so far.
    pub fn merge_with(&mut self, mut on_flash: impl FnMut(&GameSnapshot)) -> ClearedRows {
        let Some(piece) = self.active.take() else {
            return ClearedRows::new();
        };

        self.board
            .stamp(piece.shape, piece.rotation, piece.x, piece.y);
        self.pieces_locked = self.pieces_locked.wrapping_add(1);

        let pieces_locked = self.pieces_locked;
        let mut rows_cleared = self.rows_cleared;
        let cleared = self.board.clear_full_rows_with(|board, y| {
            rows_cleared = rows_cleared.wrapping_add(1);
            let mut frame = GameSnapshot::from_board(board);
            frame.flash_row = Some(y as u8);
            frame.pieces_locked = pieces_locked;
            frame.rows_cleared = rows_cleared;
            on_flash(&frame);
        });
        self.rows_cleared = self.rows_cleared.wrapping_add(cleared.len() as u32);
        cleared
    }

    /// Merge, clear, then spawn the next piece
    fn lock_with(&mut self, on_flash: impl FnMut(&GameSnapshot)) -> LockReport {
        let cleared_rows = self.merge_with(on_flash);
        let spawn = self.spawn();
        LockReport {
            cleared_rows,
            spawn,
        }
    }

    /// Move down one row, or lock if the row below is blocked
    pub fn soft_drop_one_or_lock(&mut self) -> StepOutcome {
        self.soft_drop_one_or_lock_with(|_| {})
    }

    pub fn soft_drop_one_or_lock_with(
        &mut self,
        on_flash: impl FnMut(&GameSnapshot),
    ) -> StepOutcome {
        if self.active.is_none() {
            return StepOutcome::Idle;
        }
        if self.try_move(0, 1) {
            return StepOutcome::Moved;
        }
        StepOutcome::Locked(self.lock_with(on_flash))
    }

    /// Drop to the lowest free position and lock.
    ///
    /// Returns `None` when there is no falling piece.
    pub fn hard_drop(&mut self) -> Option<LockReport> {
        self.hard_drop_with(|_| {})
    }

    pub fn hard_drop_with(&mut self, on_flash: impl FnMut(&GameSnapshot)) -> Option<LockReport> {
        self.active?;
        while self.try_move(0, 1) {}
        Some(self.lock_with(on_flash))
    }

    /// Timer expired: automatic one-row descent
    pub fn tick(&mut self) -> StepOutcome {
        self.tick_with(|_| {})
    }

    pub fn tick_with(&mut self, on_flash: impl FnMut(&GameSnapshot)) -> StepOutcome {
        self.soft_drop_one_or_lock_with(on_flash)
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> ActionOutcome {
        self.apply_action_with(action, |_| {})
    }

    pub fn apply_action_with(
        &mut self,
        action: GameAction,
        on_flash: impl FnMut(&GameSnapshot),
    ) -> ActionOutcome {
        let applied = |ok: bool| {
            if ok {
                ActionOutcome::Applied
            } else {
                ActionOutcome::Rejected
            }
        };

        match action {
            GameAction::MoveLeft => applied(self.try_move(-1, 0)),
            GameAction::MoveRight => applied(self.try_move(1, 0)),
            GameAction::Rotate => applied(self.try_rotate()),
            GameAction::SoftDrop => match self.soft_drop_one_or_lock_with(on_flash) {
                StepOutcome::Moved => ActionOutcome::Applied,
                StepOutcome::Locked(report) => ActionOutcome::Locked(report),
                StepOutcome::Idle => ActionOutcome::Rejected,
            },
            GameAction::HardDrop => match self.hard_drop_with(on_flash) {
                Some(report) => ActionOutcome::Locked(report),
                None => ActionOutcome::Rejected,
            },
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
