//! Core types module - shared data structures, constants and collaborator contracts
//!
//! Everything here is plain data with no dependencies, usable from the game core,
//! the terminal collaborators, and an embedded port alike.
//!
//! # Grid Dimensions
//!
//! The visible playground is 10 columns by 20 rows. The grid that backs it is padded
//! with sentinels so collision checks never need explicit bounds tests:
//!
//! | Region | Extent | Status |
//! |--------|--------|--------|
//! | Border | 2 columns left, 2 columns right, every row | always `Settled` |
//! | Floor | 1 row at the bottom | always `Settled` |
//! | Overflow | 4 rows above the visible area | normally `Empty` |
//!
//! Grid coordinates grow rightward (`x`) and upward (`y`); `y = 0` is the floor.
//!
//! # Game Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_DROP_INTERVAL_MS` | 500 | Gravity interval on Easy |
//! | `DIFFICULTY_INTERVAL_STEP_MS` | 150 | Interval reduction per difficulty level |
//! | `MILESTONE_INTERVAL_STEP_MS` | 10 | Interval reduction per line milestone |
//! | `DROP_INTERVAL_FLOOR_MS` | 50 | Fastest gravity ever used |
//!
//! # Examples
//!
//! ```
//! use mini_tetris_types::{Difficulty, InputEvent, PieceKind, GRID_HEIGHT, GRID_WIDTH};
//!
//! assert_eq!(PieceKind::ShortI.as_str(), "short_i");
//! assert_eq!(Difficulty::Hard.next(), Difficulty::Easy);
//! assert_eq!(InputEvent::from_code(3), InputEvent::Rotate);
//! assert_eq!(InputEvent::from_code(42), InputEvent::None);
//!
//! assert_eq!(GRID_WIDTH, 14);
//! assert_eq!(GRID_HEIGHT, 25);
//! ```

/// Visible playground width in cells (10 columns)
pub const PLAYGROUND_WIDTH: usize = 10;

/// Visible playground height in cells (20 rows)
pub const PLAYGROUND_HEIGHT: usize = 20;

/// Side length of the square envelope every piece shape lives in
pub const ENVELOPE: usize = 4;

/// Sentinel columns on each side (half the envelope)
pub const BORDER_COLUMNS: usize = ENVELOPE / 2;

/// Sentinel rows below the playground
pub const FLOOR_ROWS: usize = 1;

/// Rows above the playground used to detect overflow
pub const OVERFLOW_ROWS: usize = ENVELOPE;

/// Grid storage width including both borders (14)
pub const GRID_WIDTH: usize = BORDER_COLUMNS + PLAYGROUND_WIDTH + BORDER_COLUMNS;

/// Grid storage height including floor and overflow rows (25)
pub const GRID_HEIGHT: usize = FLOOR_ROWS + PLAYGROUND_HEIGHT + OVERFLOW_ROWS;

/// Grid position where a new piece's envelope origin is placed
pub const SPAWN_POSITION: (i8, i8) = (5, 20);

/// Gravity interval on Easy (500ms per row)
pub const DEFAULT_DROP_INTERVAL_MS: u32 = 500;

/// Gravity interval reduction per difficulty level
pub const DIFFICULTY_INTERVAL_STEP_MS: u32 = 150;

/// Gravity interval reduction every time a line milestone is reached
pub const MILESTONE_INTERVAL_STEP_MS: u32 = 10;

/// Fastest gravity interval the game ever uses
pub const DROP_INTERVAL_FLOOR_MS: u32 = 50;

/// Cumulative lines between two difficulty increases
pub const LINE_MILESTONE: u32 = 10;

/// Base points for clearing 1, 2, 3 and 4+ lines in a single lock
///
/// Points are multiplied by `award_factor + 1`.
pub const LINE_SCORES: [u32; 4] = [40, 100, 300, 1200];

/// Number of score digits the display shows
pub const SCORE_DIGITS: usize = 6;

/// Consecutive samples a key must be seen before it counts as pressed
pub const DEBOUNCE_SAMPLES: u32 = 10;

/// Wait before the first hold-to-repeat event
pub const MAX_REPEAT_WAIT_MS: u32 = 300;

/// How much the repeat wait shrinks after every repeat
pub const REPEAT_WAIT_STEP_MS: u32 = 70;


/// Status of a single grid cell
///
/// Only `Empty` and `Settled` carry game-logic meaning. `ToDraw` marks cells of the
/// falling piece and `ToClear` marks cells that must be redrawn as empty on the next
/// frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellStatus {
    #[default]
    Empty,
    Settled,
    ToDraw,
    ToClear,
}

impl CellStatus {
    /// True for cells that show a block on screen (`Settled` or `ToDraw`)
    pub fn is_filled(self) -> bool {
        matches!(self, CellStatus::Settled | CellStatus::ToDraw)
    }
}

/// The eight piece variants: the seven classic tetrominoes plus a three-cell I
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
    ShortI,
}

impl PieceKind {
    /// Every variant, in catalog order
    pub const ALL: [PieceKind; 8] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
        PieceKind::ShortI,
    ];

    /// Position in [`PieceKind::ALL`]
    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::J => 1,
            PieceKind::L => 2,
            PieceKind::O => 3,
            PieceKind::S => 4,
            PieceKind::T => 5,
            PieceKind::Z => 6,
            PieceKind::ShortI => 7,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
            PieceKind::ShortI => "short_i",
        }
    }
}

/// Difficulty chosen in the menu
///
/// Each level makes gravity faster and raises the starting award factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    /// Numeric level (Easy = 0)
    pub fn level(self) -> u32 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Normal => 1,
            Difficulty::Hard => 2,
        }
    }

    /// Menu cycling order: Easy -> Normal -> Hard -> Easy
    ///
    /// ```
    /// use mini_tetris_types::Difficulty;
    ///
    /// assert_eq!(Difficulty::Easy.next(), Difficulty::Normal);
    /// assert_eq!(Difficulty::Normal.next(), Difficulty::Hard);
    /// assert_eq!(Difficulty::Hard.next(), Difficulty::Easy);
    /// ```
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Normal,
            Difficulty::Normal => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    /// Four-letter menu label
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Normal => "NORM",
            Difficulty::Hard => "HARD",
        }
    }
}

/// Input events the core understands
///
/// Produced by an [`InputSource`] after debouncing. `None` means nothing happened
/// this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputEvent {
    #[default]
    None,
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down; cycles difficulty in the menu
    SoftDrop,
    /// Rotate piece 90°; confirms the menu selection
    Rotate,
}

impl InputEvent {
    /// Decode a raw key code (0 = left, 1 = right, 2 = down, 3 = rotate)
    ///
    /// Anything else is treated as no key rather than an error.
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => InputEvent::MoveLeft,
            1 => InputEvent::MoveRight,
            2 => InputEvent::SoftDrop,
            3 => InputEvent::Rotate,
            _ => InputEvent::None,
        }
    }
}

/// Source of debounced input events.
///
/// `poll` must return immediately, yielding [`InputEvent::None`] when nothing is
/// pending. `reset_repeat` forgets any hold-to-repeat progress; the core calls it
/// after every spawn so a held key does not carry its acceleration into a new piece.
pub trait InputSource {
    fn poll(&mut self) -> InputEvent;
    fn reset_repeat(&mut self);
}

/// Drawing surface driven by the core.
///
/// `draw_playground_row` is only called for visible rows whose content changed since
/// the last frame; `row` 0 is the bottom row.
pub trait Renderer {
    fn clear_all(&mut self);
    fn draw_score(&mut self, score: u32);
    fn draw_next_piece_hint(&mut self, kind: PieceKind);
    fn draw_playground_row(&mut self, row: u8, cells: &[CellStatus; PLAYGROUND_WIDTH]);
    fn draw_menu(&mut self, selected: Difficulty);
    fn draw_game_over(&mut self);
}
