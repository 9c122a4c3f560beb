//! Piece catalog and movement tests

use mini_tetris::core::pieces::{occupied_offsets, orientations};
use mini_tetris::core::{block_map, collides, rotate, ActivePiece, Grid, Motion, PieceState};
use mini_tetris::types::{CellStatus, PieceKind, SPAWN_POSITION};

#[test]
fn test_four_rotations_return_original() {
    for kind in PieceKind::ALL {
        let map = block_map(kind);
        let mut rotated = map;
        for _ in 0..4 {
            rotated = rotate(&rotated);
        }
        assert_eq!(rotated, map, "{:?}", kind);
    }
}

#[test]
fn test_rotation_is_a_quarter_turn() {
    // (x, y) -> (y, 3 - x)
    for kind in PieceKind::ALL {
        let map = block_map(kind);
        let turned = rotate(&map);
        for (x, y) in occupied_offsets(&map) {
            assert!(turned[y as usize][3 - x as usize], "{:?} ({}, {})", kind, x, y);
        }
    }
}

#[test]
fn test_spawn_never_collides() {
    let grid = Grid::new();
    for kind in PieceKind::ALL {
        let piece = ActivePiece::spawn(kind);
        assert_eq!((piece.x, piece.y), SPAWN_POSITION);
        assert!(!collides(&piece, &grid), "{:?}", kind);
    }
}

#[test]
fn test_spawned_cells_stay_in_playable_columns() {
    for kind in PieceKind::ALL {
        for blocks in orientations(kind) {
            let piece = ActivePiece {
                blocks,
                ..ActivePiece::spawn(kind)
            };
            for (x, _) in piece.cells() {
                assert!((2..12).contains(&x), "{:?} at x={}", kind, x);
            }
        }
    }
}

#[test]
fn test_rotation_against_left_wall_is_rejected() {
    let grid = Grid::new();
    // Vertical I hugging the left wall.
    let mut state = PieceState::new(ActivePiece::spawn(PieceKind::I));
    state.apply(Motion::Rotate);
    state.apply(Motion::Down);
    while !collides(&state.active().apply(Motion::Left), &grid) {
        state.apply(Motion::Left);
    }
    assert!(state.active().cells().iter().all(|&(x, _)| x == 2));

    state.apply(Motion::Rotate);
    assert!(collides(state.active(), &grid));
    state.rollback();
    assert!(state.active().cells().iter().all(|&(x, _)| x == 2));
}

#[test]
fn test_rotation_against_settled_cells_is_rejected() {
    let mut grid = Grid::new();
    let piece = ActivePiece::spawn(PieceKind::I).apply(Motion::Down);
    let vertical = piece.apply(Motion::Rotate);
    assert!(!collides(&vertical, &grid));

    // Block one of the cells the vertical I would need.
    let (x, y) = vertical.cells()[0];
    grid.set(x, y, CellStatus::Settled);
    assert!(collides(&vertical, &grid));

    let mut state = PieceState::new(piece);
    state.apply(Motion::Rotate);
    if collides(state.active(), &grid) {
        state.rollback();
    }
    assert_eq!(state.active(), &piece);
}

#[test]
fn test_piece_rests_below_floor_origin() {
    let grid = Grid::new();
    // The horizontal I's cells sit one row above its envelope origin.
    let mut piece = ActivePiece::spawn(PieceKind::I);
    while !collides(&piece.apply(Motion::Down), &grid) {
        piece = piece.apply(Motion::Down);
    }
    assert_eq!(piece.y, 0);

    // The T's bottom row is its envelope origin.
    let mut piece = ActivePiece::spawn(PieceKind::T);
    while !collides(&piece.apply(Motion::Down), &grid) {
        piece = piece.apply(Motion::Down);
    }
    assert_eq!(piece.y, 1);
}

#[test]
fn test_rotation_near_floor_reads_below_storage_as_wall() {
    let grid = Grid::new();
    // Rotations whose cells would drop below the grid must collide, not wrap.
    for kind in PieceKind::ALL {
        for blocks in orientations(kind) {
            let piece = ActivePiece {
                blocks,
                x: 5,
                y: -1,
                kind,
            };
            let lowest = piece.cells().iter().map(|&(_, y)| y).min().unwrap();
            assert_eq!(collides(&piece, &grid), lowest < 1, "{:?}", kind);
        }
    }
}
