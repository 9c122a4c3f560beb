//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. The core draws into
//! a [`TermScreen`] through the [`Renderer`](types::Renderer) trait; the screen
//! is a framebuffer that [`TerminalRenderer`] flushes to the terminal, writing
//! only the cells that changed.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Look like the monochrome panel the game was built for
//! - Keep blocks square (2 chars wide per cell)

pub mod fb;
pub mod renderer;
pub mod screen;

pub use mini_tetris_types as types;

pub use fb::{Cell, FrameBuffer, Palette, Rgb, Shade};
pub use renderer::{centered_origin, encode_diff_into, encode_full_into, TerminalRenderer};
pub use screen::{TermScreen, SCREEN_HEIGHT, SCREEN_WIDTH};
