//! Runner configuration from environment variables.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `MINI_TETRIS_SEED` | wall clock | RNG seed for the piece sequence |
//! | `MINI_TETRIS_TICK_MS` | 5 | Delay between game steps |
//! | `MINI_TETRIS_DEBOUNCE_SAMPLES` | 10 | Samples before a key counts |
//! | `MINI_TETRIS_RELEASE_TIMEOUT_MS` | 150 | Key auto-release without release events |
//! | `MINI_TETRIS_LOG` | unset | Log file path; logging is off when unset |
//! | `MINI_TETRIS_LOG_LEVEL` | `info` | `error`, `warn`, `info`, `debug` or `trace` |
//!
//! Values that fail to parse fall back to their defaults.

use std::time::{SystemTime, UNIX_EPOCH};

use log::LevelFilter;

use crate::input::terminal::DEFAULT_KEY_RELEASE_TIMEOUT_MS;
use crate::input::KeypadConfig;
use crate::types::DEBOUNCE_SAMPLES;

pub const DEFAULT_TICK_MS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    pub seed: u32,
    pub tick_ms: u64,
    pub debounce_samples: u32,
    pub key_release_timeout_ms: u32,
    pub log_path: Option<String>,
    pub log_level: LevelFilter,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            tick_ms: DEFAULT_TICK_MS,
            debounce_samples: DEBOUNCE_SAMPLES,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            log_path: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl RunnerConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = lookup("MINI_TETRIS_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let tick_ms = lookup("MINI_TETRIS_TICK_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u64| ms > 0)
            .unwrap_or(defaults.tick_ms);

        let debounce_samples = lookup("MINI_TETRIS_DEBOUNCE_SAMPLES")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.debounce_samples);

        let key_release_timeout_ms = lookup("MINI_TETRIS_RELEASE_TIMEOUT_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.key_release_timeout_ms);

        let log_path = lookup("MINI_TETRIS_LOG")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        let log_level = lookup("MINI_TETRIS_LOG_LEVEL")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.log_level);

        Self {
            seed,
            tick_ms,
            debounce_samples,
            key_release_timeout_ms,
            log_path,
            log_level,
        }
    }

    pub fn keypad(&self) -> KeypadConfig {
        KeypadConfig {
            debounce_samples: self.debounce_samples,
            ..KeypadConfig::default()
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
