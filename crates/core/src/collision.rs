//! Collision check between a piece and the settled part of the grid

use crate::grid::Grid;
use crate::piece::ActivePiece;
use crate::types::CellStatus;

/// True iff any occupied cell of `piece` lands on a settled grid cell
///
/// Walls and floor are settled sentinels, so no separate bounds check is needed.
/// Empty envelope cells are never tested.
pub fn collides(piece: &ActivePiece, grid: &Grid) -> bool {
    piece
        .cells()
        .iter()
        .any(|&(x, y)| grid.status(x, y) == CellStatus::Settled)
}
