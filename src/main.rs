//! Terminal Mini Tetris runner (default binary).
//!
//! Drives the game core at a fixed tick with crossterm input and the framebuffer
//! screen. Keys: arrows / WASD / HJKL to move, up or space to rotate and confirm,
//! down to cycle difficulty in the menu, `r` back to the menu, `q` to quit.

use std::time::{Duration, Instant};

use anyhow::Result;

use mini_tetris::config::RunnerConfig;
use mini_tetris::core::GameState;
use mini_tetris::input::TerminalKeypad;
use mini_tetris::logging;
use mini_tetris::term::{TermScreen, TerminalRenderer};

fn main() -> Result<()> {
    let config = RunnerConfig::from_env();
    logging::init(config.log_path.as_deref(), config.log_level)?;
    log::info!("starting: seed={} tick={}ms", config.seed, config.tick_ms);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        log::error!("runner failed: {:#}", err);
    }
    log::logger().flush();
    result
}

fn run(term: &mut TerminalRenderer, config: &RunnerConfig) -> Result<()> {
    let mut game = GameState::new(config.seed);
    let mut screen = TermScreen::new();
    let mut keys = TerminalKeypad::with_config(config.keypad())
        .with_key_release_timeout_ms(config.key_release_timeout_ms);

    game.reset(&mut screen);

    let started = Instant::now();
    let tick = Duration::from_millis(config.tick_ms);
    let mut term_size = crossterm::terminal::size().unwrap_or((80, 24));

    loop {
        let tick_start = Instant::now();

        keys.pump()?;
        if keys.take_quit() {
            log::info!("quit: score={}", game.score());
            return Ok(());
        }
        if keys.take_restart() {
            game.reset(&mut screen);
        }

        let now_ms = started.elapsed().as_millis() as u64;
        game.step(now_ms, &mut keys, &mut screen);

        let size = crossterm::terminal::size().unwrap_or(term_size);
        if size != term_size {
            term_size = size;
            term.invalidate();
            screen.take_dirty();
            term.present(screen.frame(), term_size)?;
        } else if screen.take_dirty() {
            term.present(screen.frame(), term_size)?;
        }

        if let Some(rest) = tick.checked_sub(tick_start.elapsed()) {
            std::thread::sleep(rest);
        }
    }
}
