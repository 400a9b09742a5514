//! Board tests - collision, merging and line clears

use tetrish::core::pieces::{CATALOG, LINE, SQUARE, TEE};
use tetrish::core::{Board, GameState, SpawnOutcome};
use tetrish::types::{PieceKind, Rotation, BOARD_COLS, BOARD_ROWS};

fn fill_row(board: &mut Board, y: i8, kind: PieceKind) {
    for x in 0..BOARD_COLS as i8 {
        board.set(x, y, Some(kind));
    }
}

fn occupied_cells(board: &Board) -> Vec<(i8, i8, PieceKind)> {
    let mut out = Vec::new();
    for y in 0..BOARD_ROWS as i8 {
        for x in 0..BOARD_COLS as i8 {
            if let Some(Some(kind)) = board.get(x, y) {
                out.push((x, y, kind));
            }
        }
    }
    out
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_COLS);
    assert_eq!(board.height(), BOARD_ROWS);
    assert_eq!(board.cells().len(), 300);

    for y in 0..BOARD_ROWS as i8 {
        for x in 0..BOARD_COLS as i8 {
            assert_eq!(board.get(x, y), Some(None), "({}, {})", x, y);
        }
    }
}

#[test]
fn test_board_get_set_out_of_bounds() {
    let mut board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_COLS as i8, 0), None);
    assert_eq!(board.get(0, BOARD_ROWS as i8), None);

    assert!(!board.set(10, 0, Some(PieceKind::I)));
    assert!(!board.set(0, 30, Some(PieceKind::I)));
    assert_eq!(board.occupied_count(), 0);

    assert!(board.set(9, 29, Some(PieceKind::J)));
    assert_eq!(board.get(9, 29), Some(Some(PieceKind::J)));
}

#[test]
fn test_collides_true_whenever_a_cell_leaves_the_board() {
    let board = Board::new();
    for shape in CATALOG {
        for rot in (0..shape.rotation_count()).filter_map(Rotation::from_index) {
            for y0 in -5..(BOARD_ROWS as i8 + 2) {
                for x0 in -5..(BOARD_COLS as i8 + 2) {
                    let outside = shape.occupied(rot).any(|(x, y)| {
                        Board::is_out_of_bounds(x0 + x, y0 + y)
                    });
                    assert_eq!(
                        board.collides(shape, rot, x0, y0),
                        outside,
                        "{} {:?} at ({}, {})",
                        shape.name(),
                        rot,
                        x0,
                        y0
                    );
                }
            }
        }
    }
}

#[test]
fn test_collides_with_locked_cells() {
    let mut board = Board::new();
    board.set(4, 11, Some(PieceKind::Z));

    // T North occupies (0..3, 1) and (1, 2)
    assert!(board.collides(&TEE, Rotation::North, 3, 10));
    assert!(board.collides(&TEE, Rotation::North, 4, 10));
    assert!(!board.collides(&TEE, Rotation::North, 5, 10));
    // Bar one row below the marker, then the stem landing on it
    assert!(!board.collides(&TEE, Rotation::North, 3, 11));
    assert!(board.collides(&TEE, Rotation::North, 3, 9));
}

#[test]
fn test_line_spawn_scenario() {
    let board = Board::new();
    assert!(!board.collides(&LINE, Rotation::North, 0, 0));
    assert!(!board.collides(&LINE, Rotation::North, 6, 0));
    // 7 + 4 = 11 > 10
    assert!(board.collides(&LINE, Rotation::North, 7, 0));
}

#[test]
fn test_merge_law() {
    let mut board = Board::new();
    board.set(0, 29, Some(PieceKind::O));
    let mut state = GameState::with_board(board, 1);
    assert_eq!(state.spawn_shape(&TEE), SpawnOutcome::Spawned);
    assert!(state.try_move(4, 12));

    let piece = state.active().unwrap();
    let expected: Vec<_> = piece
        .shape
        .occupied(piece.rotation)
        .map(|(x, y)| (piece.x + x, piece.y + y))
        .collect();

    let cleared = state.merge();
    assert!(cleared.is_empty());
    assert!(state.active().is_none());

    for &(x, y) in &expected {
        assert_eq!(state.board().get(x, y), Some(Some(PieceKind::T)));
    }
    assert_eq!(state.board().get(0, 29), Some(Some(PieceKind::O)));
    assert_eq!(state.board().occupied_count(), expected.len() + 1);
}

#[test]
fn test_row_clear_law() {
    let r: i8 = 29;
    let mut board = Board::new();
    // Row r full except where the square will land
    for x in 0..8 {
        board.set(x, r, Some(PieceKind::L));
    }
    board.set(3, r - 1, Some(PieceKind::T));

    let mut state = GameState::with_board(board, 1);
    state.spawn_shape(&SQUARE);
    assert!(state.try_move(8, r - 1));

    let cleared = state.merge();
    assert_eq!(cleared.as_slice(), &[r as usize]);

    // The marker and the square's upper half shifted down into row r
    assert_eq!(state.board().row_string(r as usize), "...T....OO");
    assert_eq!(state.board().row_string(0), "..........");
    assert_eq!(state.board().occupied_count(), 3);
}

#[test]
fn test_multi_row_clear_non_adjacent() {
    let mut board = Board::new();
    fill_row(&mut board, 10, PieceKind::I);
    fill_row(&mut board, 20, PieceKind::I);
    board.set(3, 5, Some(PieceKind::T));
    board.set(4, 15, Some(PieceKind::S));
    board.set(5, 25, Some(PieceKind::Z));

    let mut state = GameState::with_board(board, 1);
    state.spawn_shape(&SQUARE);
    assert!(state.try_move(8, 0));

    let cleared = state.merge();
    assert_eq!(cleared.as_slice(), &[10, 20]);

    // Above both rows: down two. Between: down one. Below: unchanged.
    assert_eq!(
        occupied_cells(state.board()),
        vec![
            (8, 2, PieceKind::O),
            (9, 2, PieceKind::O),
            (8, 3, PieceKind::O),
            (9, 3, PieceKind::O),
            (3, 7, PieceKind::T),
            (4, 16, PieceKind::S),
            (5, 25, PieceKind::Z),
        ]
    );
}

#[test]
fn test_adjacent_rows_clear_together() {
    let mut board = Board::from_rows(&[]);
    for y in 26..30 {
        fill_row(&mut board, y, PieceKind::J);
    }
    board.set(0, 25, Some(PieceKind::T));

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[26, 27, 28, 29]);
    assert_eq!(board.row_string(29), "T.........");
    assert_eq!(board.occupied_count(), 1);
}

#[test]
fn test_flash_observer_sees_each_row_empty_in_turn() {
    let mut board = Board::new();
    fill_row(&mut board, 27, PieceKind::I);
    fill_row(&mut board, 29, PieceKind::I);
    board.set(2, 28, Some(PieceKind::L));

    let mut seen = Vec::new();
    board.clear_full_rows_with(|b, y| {
        seen.push((y, b.row_string(y), b.occupied_count()));
    });

    assert_eq!(
        seen,
        vec![
            (27, "..........".to_string(), 11),
            (29, "..........".to_string(), 1),
        ]
    );
    assert_eq!(board.row_string(29), "..L.......");
}

#[test]
fn test_clear_row_out_of_range_is_noop() {
    let mut board = Board::new();
    board.set(0, 0, Some(PieceKind::O));
    assert_eq!(board.clear_row(30), 0);
    assert_eq!(board.get(0, 0), Some(Some(PieceKind::O)));
}
