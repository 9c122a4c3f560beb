//! Pieces module - static shape catalog and the envelope rotation transform
//!
//! Every shape lives in a fixed 4x4 envelope sized to the largest piece, so a rotation
//! is always representable in the same box. Only the canonical orientation is stored;
//! the other three are derived with [`rotate`].

use arrayvec::ArrayVec;

use crate::types::{PieceKind, ENVELOPE};

/// Occupancy of a 4x4 envelope, indexed `[x][y]`
///
/// Column-major: each inner array is one envelope column, bottom cell first.
pub type BlockMap = [[bool; ENVELOPE]; ENVELOPE];

/// Offset of a single occupied cell relative to the envelope origin
pub type BlockOffset = (i8, i8);

const X: bool = true;
const O: bool = false;

/// Canonical orientations, in [`PieceKind::ALL`] order
const BLOCK_MAPS: [BlockMap; 8] = [
    // I
    [[O, X, O, O], [O, X, O, O], [O, X, O, O], [O, X, O, O]],
    // J
    [[O, X, O, O], [O, X, O, O], [X, X, O, O], [O, O, O, O]],
    // L
    [[O, X, O, O], [O, X, O, O], [O, X, X, O], [O, O, O, O]],
    // O
    [[O, O, O, O], [O, X, X, O], [O, X, X, O], [O, O, O, O]],
    // S
    [[O, O, O, O], [O, X, X, O], [X, X, O, O], [O, O, O, O]],
    // T
    [[O, O, O, O], [X, X, X, O], [O, X, O, O], [O, O, O, O]],
    // Z
    [[O, O, O, O], [X, X, O, O], [O, X, X, O], [O, O, O, O]],
    // Short I
    [[O, X, O, O], [O, X, O, O], [O, X, O, O], [O, O, O, O]],
];

/// Canonical occupancy map for a piece kind
pub fn block_map(kind: PieceKind) -> BlockMap {
    BLOCK_MAPS[kind.index()]
}

/// Rotate a map 90° inside the envelope: `rotated[j][i] = map[3 - i][j]`
///
/// No re-centering happens; four rotations give back the original map.
pub fn rotate(map: &BlockMap) -> BlockMap {
    let mut rotated = [[false; ENVELOPE]; ENVELOPE];
    for i in 0..ENVELOPE {
        for j in 0..ENVELOPE {
            rotated[j][i] = map[ENVELOPE - 1 - i][j];
        }
    }
    rotated
}

/// All four orientations of a piece, starting with the canonical one
pub fn orientations(kind: PieceKind) -> [BlockMap; 4] {
    let north = block_map(kind);
    let east = rotate(&north);
    let south = rotate(&east);
    let west = rotate(&south);
    [north, east, south, west]
}

/// Offsets of the occupied cells of a map, bottom-up then left to right
pub fn occupied_offsets(map: &BlockMap) -> ArrayVec<BlockOffset, 4> {
    let mut cells = ArrayVec::new();
    for y in 0..ENVELOPE {
        for (x, column) in map.iter().enumerate() {
            if column[y] {
                // Catalog shapes never exceed four cells.
                let _ = cells.try_push((x as i8, y as i8));
            }
        }
    }
    cells
}

/// Inclusive range of envelope columns that hold at least one cell
pub fn column_span(map: &BlockMap) -> Option<(usize, usize)> {
    let first = map.iter().position(|column| column.iter().any(|&c| c))?;
    let last = map.iter().rposition(|column| column.iter().any(|&c| c))?;
    Some((first, last))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_rotations_are_identity() {
        for kind in PieceKind::ALL {
            let map = block_map(kind);
            let back = rotate(&rotate(&rotate(&rotate(&map))));
            assert_eq!(back, map, "{:?}", kind);
        }
    }

    #[test]
    fn test_cell_counts() {
        for kind in PieceKind::ALL {
            let expected = if kind == PieceKind::ShortI { 3 } else { 4 };
            for map in orientations(kind) {
                assert_eq!(occupied_offsets(&map).len(), expected, "{:?}", kind);
            }
        }
    }

    #[test]
    fn test_rotate_i_turns_vertical() {
        let east = rotate(&block_map(PieceKind::I));
        assert_eq!(east[1], [X, X, X, X]);
        assert_eq!(east[0], [O; 4]);
        assert_eq!(east[2], [O; 4]);
        assert_eq!(east[3], [O; 4]);
    }

    #[test]
    fn test_o_is_rotation_invariant() {
        let map = block_map(PieceKind::O);
        assert_eq!(rotate(&map), map);
    }

    #[test]
    fn test_wall_margin_is_sufficient() {
        // Two border columns are enough as long as every orientation keeps a cell in
        // the left three and in the right three envelope columns.
        for kind in PieceKind::ALL {
            for map in orientations(kind) {
                let (first, last) = column_span(&map).unwrap();
                assert!(first <= 2, "{:?} starts at column {}", kind, first);
                assert!(last >= 1, "{:?} ends at column {}", kind, last);
            }
        }
    }
}
