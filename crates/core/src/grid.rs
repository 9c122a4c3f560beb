//! Grid module - the sentinel-padded playground buffer
//!
//! The visible 10x20 playground is surrounded by permanently settled cells: two
//! border columns on each side and one floor row. Above it sit four overflow rows
//! that are normally empty; a fresh piece colliding there means the stack has
//! topped out. Pieces never need explicit bounds checks because the padding always
//! contains their 4x4 envelope.
//!
//! Coordinates: (x, y) where x grows to the right and y grows upward. y = 0 is the
//! floor, y = 1..=20 are the visible rows and y = 21..=24 the overflow rows.
//! Collaborators see visible rows as `row = y - 1` and columns as `col = x - 2`.

use crate::piece::ActivePiece;
use crate::types::{
    CellStatus, BORDER_COLUMNS, FLOOR_ROWS, GRID_HEIGHT, GRID_WIDTH, PLAYGROUND_HEIGHT,
    PLAYGROUND_WIDTH,
};

/// First grid column of the playground
const FIRST_COL: usize = BORDER_COLUMNS;

/// One past the last grid column of the playground
const END_COL: usize = BORDER_COLUMNS + PLAYGROUND_WIDTH;

/// First visible grid row
const FIRST_ROW: usize = FLOOR_ROWS;

/// One past the last visible grid row
const END_ROW: usize = FLOOR_ROWS + PLAYGROUND_HEIGHT;

/// Which part of the grid a cell belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Left or right wall, always settled
    Border,
    /// Bottom sentinel row, always settled
    Floor,
    /// Visible playground
    Playable,
    /// Rows above the playground
    Overflow,
}

/// The playground buffer including its sentinels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Row-major storage, `cells[y][x]`
    cells: [[CellStatus; GRID_WIDTH]; GRID_HEIGHT],
}

impl Grid {
    /// Create a freshly reset grid
    pub fn new() -> Self {
        let mut grid = Self {
            cells: [[CellStatus::Empty; GRID_WIDTH]; GRID_HEIGHT],
        };
        grid.reset();
        grid
    }

    /// Classify a grid coordinate; `None` outside grid storage
    pub fn region(x: i8, y: i8) -> Option<Region> {
        let (x, y) = Self::index(x, y)?;
        Some(if !(FIRST_COL..END_COL).contains(&x) {
            Region::Border
        } else if y < FIRST_ROW {
            Region::Floor
        } else if y < END_ROW {
            Region::Playable
        } else {
            Region::Overflow
        })
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<(usize, usize)> {
        if x < 0 || y < 0 || x as usize >= GRID_WIDTH || y as usize >= GRID_HEIGHT {
            return None;
        }
        Some((x as usize, y as usize))
    }

    /// Reinitialize every cell: sentinels settled, everything else empty
    pub fn reset(&mut self) {
        for y in 0..GRID_HEIGHT {
            for x in 0..GRID_WIDTH {
                self.cells[y][x] = match Self::region(x as i8, y as i8) {
                    Some(Region::Border) | Some(Region::Floor) => CellStatus::Settled,
                    _ => CellStatus::Empty,
                };
            }
        }
    }

    /// Status at a grid coordinate
    ///
    /// Anything outside grid storage reads as a wall, so it always collides.
    pub fn status(&self, x: i8, y: i8) -> CellStatus {
        match Self::index(x, y) {
            Some((x, y)) => self.cells[y][x],
            None => CellStatus::Settled,
        }
    }

    /// Set a non-sentinel cell. Returns false (and asserts in debug builds) when the
    /// coordinate is a sentinel or outside the grid.
    pub fn set(&mut self, x: i8, y: i8, status: CellStatus) -> bool {
        match Self::region(x, y) {
            Some(Region::Playable) | Some(Region::Overflow) => {
                self.cells[y as usize][x as usize] = status;
                true
            }
            region => {
                debug_assert!(false, "write to ({}, {}) in {:?}", x, y, region);
                false
            }
        }
    }

    /// Stamp every occupied cell of `piece` with `status`
    pub fn write(&mut self, piece: &ActivePiece, status: CellStatus) {
        for (x, y) in piece.cells() {
            self.set(x, y, status);
        }
    }

    /// Status of a visible cell (`col` 0..10, `row` 0..20 from the bottom)
    pub fn playable(&self, col: usize, row: usize) -> CellStatus {
        debug_assert!(col < PLAYGROUND_WIDTH && row < PLAYGROUND_HEIGHT);
        self.cells[FIRST_ROW + row][FIRST_COL + col]
    }

    /// Set a visible cell (`col` 0..10, `row` 0..20 from the bottom)
    pub fn set_playable(&mut self, col: usize, row: usize, status: CellStatus) {
        debug_assert!(col < PLAYGROUND_WIDTH && row < PLAYGROUND_HEIGHT);
        self.cells[FIRST_ROW + row][FIRST_COL + col] = status;
    }

    /// The ten playable cells of a visible row
    pub fn visible_row(&self, row: usize) -> [CellStatus; PLAYGROUND_WIDTH] {
        let mut out = [CellStatus::Empty; PLAYGROUND_WIDTH];
        out.copy_from_slice(&self.cells[FIRST_ROW + row][FIRST_COL..END_COL]);
        out
    }

    /// Check if every playable cell of a visible row is filled
    pub fn is_row_complete(&self, row: usize) -> bool {
        self.cells[FIRST_ROW + row][FIRST_COL..END_COL]
            .iter()
            .all(|cell| cell.is_filled())
    }

    /// Check if a visible row has no filled cell
    pub fn is_row_vacant(&self, row: usize) -> bool {
        !self.cells[FIRST_ROW + row][FIRST_COL..END_COL]
            .iter()
            .any(|cell| cell.is_filled())
    }

    /// Visible rows covered by grid rows `[bottom, top)`, clamped to the playground
    pub fn visible_span(bottom: i8, top: i8) -> (usize, usize) {
        let clamp = |y: i8| (y.max(FIRST_ROW as i8) as usize).min(END_ROW) - FIRST_ROW;
        let from = clamp(bottom);
        let to = clamp(top).max(from);
        (from, to)
    }

    /// Mark every complete row in visible rows `[from, to)` as `ToClear`
    ///
    /// Returns the number of rows marked.
    pub fn mark_complete_rows(&mut self, from: usize, to: usize) -> u8 {
        let mut marked = 0;
        for row in from..to.min(PLAYGROUND_HEIGHT) {
            if !self.is_row_complete(row) {
                continue;
            }
            for cell in &mut self.cells[FIRST_ROW + row][FIRST_COL..END_COL] {
                *cell = CellStatus::ToClear;
            }
            marked += 1;
        }
        marked
    }

    /// Remove the lowest vacant visible row by moving everything above it down one
    ///
    /// Filled cells arrive as `Settled`; other visible cells become `ToClear` so the
    /// renderer blanks them, overflow cells become `Empty`. The topmost grid row ends
    /// up empty. Returns the visible row that was removed.
    pub fn collapse_lowest_gap(&mut self) -> Option<usize> {
        let gap = (0..PLAYGROUND_HEIGHT).find(|&row| self.is_row_vacant(row))?;

        for y in (FIRST_ROW + gap)..GRID_HEIGHT {
            let marker = if y < END_ROW {
                CellStatus::ToClear
            } else {
                CellStatus::Empty
            };
            for x in FIRST_COL..END_COL {
                let above = if y + 1 < GRID_HEIGHT {
                    self.cells[y + 1][x]
                } else {
                    CellStatus::Empty
                };
                self.cells[y][x] = if above.is_filled() {
                    CellStatus::Settled
                } else {
                    marker
                };
            }
        }

        Some(gap)
    }

    /// Compact the grid after `cleared` rows were marked
    ///
    /// One pass removes exactly one gap, so this must run once per cleared row; a
    /// single pass leaves adjacent gaps behind.
    pub fn compact(&mut self, cleared: u8) {
        for _ in 0..cleared {
            self.collapse_lowest_gap();
        }
    }

    /// Turn `ToClear` markers of a visible row into `Empty` once they are on screen
    pub fn settle_clear_markers(&mut self, row: usize) {
        for cell in &mut self.cells[FIRST_ROW + row][FIRST_COL..END_COL] {
            if *cell == CellStatus::ToClear {
                *cell = CellStatus::Empty;
            }
        }
    }

    /// Number of filled visible cells
    pub fn filled_count(&self) -> usize {
        self.cells[FIRST_ROW..END_ROW]
            .iter()
            .flat_map(|row| row[FIRST_COL..END_COL].iter())
            .filter(|cell| cell.is_filled())
            .count()
    }

    /// Check that every sentinel still holds its fixed status
    pub fn sentinels_intact(&self) -> bool {
        (0..GRID_HEIGHT).all(|y| {
            (0..GRID_WIDTH).all(|x| match Self::region(x as i8, y as i8) {
                Some(Region::Border) | Some(Region::Floor) => {
                    self.cells[y][x] == CellStatus::Settled
                }
                _ => true,
            })
        })
    }

    /// Get width of the grid storage
    pub fn width(&self) -> usize {
        self.cells[0].len()
    }

    /// Get height of the grid storage
    pub fn height(&self) -> usize {
        self.cells.len()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
