//! Core game logic - pure, deterministic, and testable
//!
//! Everything that decides what happens on the playground lives here: the grid,
//! the piece catalog, collision, line clearing, scoring and the session phase
//! machine. There is no I/O and no heap allocation on the game path; input and
//! drawing go through the [`InputSource`](types::InputSource) and
//! [`Renderer`](types::Renderer) traits.
//!
//! # Module Structure
//!
//! - [`grid`]: 14x25 sentinel-padded playground buffer
//! - [`pieces`]: static 4x4 shape catalog and the rotation transform
//! - [`piece`]: falling piece with its rollback snapshot
//! - [`collision`]: piece vs. settled cells
//! - [`scoring`]: line-clear points, milestones and gravity speed
//! - [`render`]: row diffing towards the renderer
//! - [`rng`]: seeded uniform piece generator
//! - [`game_state`]: session struct and phase machine
//!
//! # Game Rules
//!
//! - **No wall kicks**: a rotation that collides is simply rolled back
//! - **Instant lock**: a piece locks on the first downward move that collides
//! - **Uniform pieces**: each next piece is drawn independently from 8 shapes
//! - **Scoring**: 40/100/300/1200 scaled by the award factor, which grows every
//!   10 lines together with gravity speed
//!
//! # Example
//!
//! ```
//! use mini_tetris_core::types::{
//!     CellStatus, Difficulty, InputEvent, InputSource, PieceKind, Renderer,
//! };
//! use mini_tetris_core::{GameState, Phase};
//!
//! struct Keys(Vec<InputEvent>);
//!
//! impl InputSource for Keys {
//!     fn poll(&mut self) -> InputEvent {
//!         self.0.pop().unwrap_or_default()
//!     }
//!     fn reset_repeat(&mut self) {}
//! }
//!
//! struct Blank;
//!
//! impl Renderer for Blank {
//!     fn clear_all(&mut self) {}
//!     fn draw_score(&mut self, _score: u32) {}
//!     fn draw_next_piece_hint(&mut self, _kind: PieceKind) {}
//!     fn draw_playground_row(&mut self, _row: u8, _cells: &[CellStatus; 10]) {}
//!     fn draw_menu(&mut self, _selected: Difficulty) {}
//!     fn draw_game_over(&mut self) {}
//! }
//!
//! let mut game = GameState::new(12345);
//! let mut keys = Keys(vec![InputEvent::MoveLeft, InputEvent::Rotate]);
//! game.reset(&mut Blank);
//!
//! // Rotate confirms the menu, then the piece moves left.
//! game.step(0, &mut keys, &mut Blank);
//! game.step(1, &mut keys, &mut Blank);
//! assert_eq!(game.phase(), Phase::Falling);
//! assert_eq!(game.score(), 0);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::step`](game_state::GameState::step) every few milliseconds
//! with a monotonic timestamp. Gravity moves the piece down once more than the
//! current drop interval has passed since the previous gravity step.

pub mod collision;
pub mod game_state;
pub mod grid;
pub mod piece;
pub mod pieces;
pub mod render;
pub mod rng;
pub mod scoring;

pub use mini_tetris_types as types;

// Re-export commonly used types for convenience
pub use collision::collides;
pub use game_state::{GameState, Phase};
pub use grid::{Grid, Region};
pub use piece::{ActivePiece, Motion, PieceState};
pub use pieces::{block_map, rotate, BlockMap};
pub use render::RowDiff;
pub use rng::SimpleRng;
pub use scoring::{Progress, ScoreResult};
