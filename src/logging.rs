//! File logger for the terminal runner.
//!
//! The game owns stdout, so log records go to an append-only file instead. Each
//! line carries milliseconds since the logger was installed, the level, the
//! module path and the message.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, Result};
use log::{LevelFilter, Log, Metadata, Record};

pub struct FileLogger {
    file: Mutex<File>,
    level: LevelFilter,
    started: Instant,
}

impl FileLogger {
    pub fn open(path: &str, level: LevelFilter) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening log file {}", path))?;
        Ok(Self {
            file: Mutex::new(file),
            level,
            started: Instant::now(),
        })
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let Ok(mut file) = self.file.lock() else {
            return;
        };
        let _ = writeln!(
            file,
            "{:>8} {:<5} {}: {}",
            self.started.elapsed().as_millis(),
            record.level(),
            record.module_path().unwrap_or("?"),
            record.args()
        );
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Install a [`FileLogger`] as the global logger when `path` is set
///
/// Returns whether a logger was installed.
pub fn init(path: Option<&str>, level: LevelFilter) -> Result<bool> {
    let Some(path) = path else {
        return Ok(false);
    };
    let logger = FileLogger::open(path, level)?;
    log::set_boxed_logger(Box::new(logger)).context("installing logger")?;
    log::set_max_level(level);
    Ok(true)
}
