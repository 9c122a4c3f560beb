//! Mini Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof as
//! `mini_tetris::{core,input,term,types}` and adds the pieces only the terminal
//! runner needs: environment configuration and a file logger.

pub mod config;
pub mod logging;

pub use mini_tetris_core as core;
pub use mini_tetris_input as input;
pub use mini_tetris_term as term;
pub use mini_tetris_types as types;
