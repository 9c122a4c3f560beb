//! Row-diff flushing between the grid and a [`Renderer`]
//!
//! Tracks which playable cells are lit on screen, one bitmask per visible row, and
//! forwards a row only when its pattern changed. After a flush the `ToClear`
//! markers are settled into `Empty`: once the renderer has blanked them they carry
//! no further meaning.

use crate::grid::Grid;
use crate::types::{CellStatus, Renderer, PLAYGROUND_HEIGHT, PLAYGROUND_WIDTH};

/// Bitmask of lit cells in one visible row (bit `col` set when lit)
pub fn lit_mask(cells: &[CellStatus; PLAYGROUND_WIDTH]) -> u16 {
    cells
        .iter()
        .enumerate()
        .filter(|(_, cell)| cell.is_filled())
        .fold(0, |mask, (col, _)| mask | (1 << col))
}

/// What the renderer currently shows for each visible row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDiff {
    lit: [u16; PLAYGROUND_HEIGHT],
}

impl RowDiff {
    /// Tracker for a blank screen
    pub fn new() -> Self {
        Self {
            lit: [0; PLAYGROUND_HEIGHT],
        }
    }

    /// Forget the tracked state after the screen was cleared
    pub fn invalidate(&mut self) {
        self.lit = [0; PLAYGROUND_HEIGHT];
    }

    /// Send every changed visible row to `renderer`, then settle clear markers
    ///
    /// Returns the number of rows drawn.
    pub fn flush<R: Renderer + ?Sized>(&mut self, grid: &mut Grid, renderer: &mut R) -> u8 {
        let mut drawn = 0;
        for row in 0..PLAYGROUND_HEIGHT {
            let cells = grid.visible_row(row);
            let mask = lit_mask(&cells);
            if mask != self.lit[row] {
                renderer.draw_playground_row(row as u8, &cells);
                self.lit[row] = mask;
                drawn += 1;
            }
            grid.settle_clear_markers(row);
        }
        drawn
    }
}

impl Default for RowDiff {
    fn default() -> Self {
        Self::new()
    }
}
