//! TermScreen: the game's drawing surface, implemented on a framebuffer.
//!
//! Mirrors the layout of the small vertical OLED the game was designed for: a
//! walled playground with the status column to its right.
//!
//! ```text
//! |....................| SCORE
//! |....................| 000120
//! |....................|
//! |....................| NEXT
//! |....................| ()()()()
//! ...
//! +--------------------+
//! ```
//!
//! Each playground cell is two characters wide so blocks look square. Row 0 from
//! the core is the bottom row of the well.

use crate::fb::{FrameBuffer, Shade};
use crate::types::{
    CellStatus, Difficulty, PieceKind, Renderer, PLAYGROUND_HEIGHT, PLAYGROUND_WIDTH, SCORE_DIGITS,
};

/// Characters per playground cell
pub const CELL_WIDTH: u16 = 2;

/// Left wall column; the well interior starts one column to the right
const WELL_X: u16 = 0;
const WELL_INNER_X: u16 = WELL_X + 1;
const WELL_INNER_WIDTH: u16 = PLAYGROUND_WIDTH as u16 * CELL_WIDTH;
const WELL_FLOOR_Y: u16 = PLAYGROUND_HEIGHT as u16;

/// Status column
const PANEL_X: u16 = WELL_INNER_X + WELL_INNER_WIDTH + 2;
const SCORE_LABEL_Y: u16 = 1;
const SCORE_Y: u16 = 2;
const NEXT_LABEL_Y: u16 = 4;
const NEXT_Y: u16 = 5;

/// Total screen size in characters
pub const SCREEN_WIDTH: u16 = PANEL_X + 8;
pub const SCREEN_HEIGHT: u16 = WELL_FLOOR_Y + 1;

const BLOCK: &str = "[]";
const HINT_BLOCK: &str = "()";

/// Menu and game-over text rows, counted from the top of the well
const MENU_TITLE_Y: [u16; 2] = [4, 6];
const MENU_OPTION_Y: [u16; 3] = [10, 12, 14];
const GAME_OVER_Y: [u16; 2] = [8, 11];

/// Next-piece hints on a 4x2 grid, indexed `[column][row]` with row 0 at the
/// bottom, in [`PieceKind::ALL`] order
const HINT_MAPS: [[[bool; 2]; 4]; 8] = {
    const X: bool = true;
    const O: bool = false;
    [
        // I
        [[X, O], [X, O], [X, O], [X, O]],
        // J
        [[O, O], [X, X], [X, O], [X, O]],
        // L
        [[O, O], [X, X], [O, X], [O, X]],
        // O
        [[O, O], [O, O], [X, X], [X, X]],
        // S
        [[O, O], [X, O], [X, X], [O, X]],
        // T
        [[O, O], [X, O], [X, X], [X, O]],
        // Z
        [[O, O], [O, X], [X, X], [X, O]],
        // Short I
        [[X, O], [X, O], [X, O], [O, O]],
    ]
};

/// Framebuffer-backed [`Renderer`]
#[derive(Debug, Clone)]
pub struct TermScreen {
    fb: FrameBuffer,
    dirty: bool,
}

impl TermScreen {
    pub fn new() -> Self {
        let mut screen = Self {
            fb: FrameBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            dirty: true,
        };
        screen.draw_frame();
        screen
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.fb
    }

    /// Whether anything was drawn since the last call
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Screen row of a playground row (row 0 is the bottom)
    pub fn row_y(row: u8) -> u16 {
        WELL_FLOOR_Y - 1 - row as u16
    }

    /// Screen column of a playground column
    pub fn col_x(col: usize) -> u16 {
        WELL_INNER_X + col as u16 * CELL_WIDTH
    }

    fn draw_frame(&mut self) {
        for y in 0..WELL_FLOOR_Y {
            self.fb.put_char(WELL_X, y, '|', Shade::Dim);
            self.fb.put_char(WELL_INNER_X + WELL_INNER_WIDTH, y, '|', Shade::Dim);
        }
        self.fb.put_char(WELL_X, WELL_FLOOR_Y, '+', Shade::Dim);
        self.fb.fill_rect(WELL_INNER_X, WELL_FLOOR_Y, WELL_INNER_WIDTH, 1, '-', Shade::Dim);
        self.fb.put_char(WELL_INNER_X + WELL_INNER_WIDTH, WELL_FLOOR_Y, '+', Shade::Dim);

        self.fb.put_str(PANEL_X, SCORE_LABEL_Y, "SCORE", Shade::Dim);
        self.fb.put_str(PANEL_X, NEXT_LABEL_Y, "NEXT", Shade::Dim);
    }

    fn put_well_text(&mut self, y: u16, text: &str) {
        self.fb.fill_rect(WELL_INNER_X, y, WELL_INNER_WIDTH, 1, ' ', Shade::Off);
        self.fb.put_str_centered(WELL_INNER_X, WELL_INNER_WIDTH, y, text, Shade::Lit);
    }
}

impl Default for TermScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for TermScreen {
    fn clear_all(&mut self) {
        self.fb.clear();
        self.draw_frame();
        self.dirty = true;
    }

    fn draw_score(&mut self, score: u32) {
        self.fb.put_number(PANEL_X, SCORE_Y, score, SCORE_DIGITS as u16, Shade::Lit);
        self.dirty = true;
    }

    fn draw_next_piece_hint(&mut self, kind: PieceKind) {
        let map = &HINT_MAPS[kind.index()];
        for (col, column) in map.iter().enumerate() {
            for (row, &filled) in column.iter().enumerate() {
                let x = PANEL_X + col as u16 * CELL_WIDTH;
                let y = NEXT_Y + 1 - row as u16;
                if filled {
                    self.fb.put_str(x, y, HINT_BLOCK, Shade::Lit);
                } else {
                    self.fb.put_str(x, y, "  ", Shade::Off);
                }
            }
        }
        self.dirty = true;
    }

    fn draw_playground_row(&mut self, row: u8, cells: &[CellStatus; PLAYGROUND_WIDTH]) {
        if row as usize >= PLAYGROUND_HEIGHT {
            return;
        }
        let y = Self::row_y(row);
        for (col, cell) in cells.iter().enumerate() {
            let x = Self::col_x(col);
            if cell.is_filled() {
                self.fb.put_str(x, y, BLOCK, Shade::Lit);
            } else {
                self.fb.put_str(x, y, "  ", Shade::Off);
            }
        }
        self.dirty = true;
    }

    fn draw_menu(&mut self, selected: Difficulty) {
        self.put_well_text(MENU_TITLE_Y[0], "MINI");
        self.put_well_text(MENU_TITLE_Y[1], "TETRIS");
        for (difficulty, y) in Difficulty::ALL.into_iter().zip(MENU_OPTION_Y) {
            let cursor = if difficulty == selected { '>' } else { ' ' };
            let x = WELL_INNER_X + (WELL_INNER_WIDTH - 5) / 2;
            self.fb.fill_rect(WELL_INNER_X, y, WELL_INNER_WIDTH, 1, ' ', Shade::Off);
            self.fb.put_char(x, y, cursor, Shade::Lit);
            self.fb.put_str(x + 1, y, difficulty.label(), Shade::Lit);
        }
        self.dirty = true;
    }

    fn draw_game_over(&mut self) {
        self.put_well_text(GAME_OVER_Y[0], "GAME");
        self.put_well_text(GAME_OVER_Y[1], "OVER");
        self.dirty = true;
    }
}
