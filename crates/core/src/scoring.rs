//! Scoring module - line-clear points, milestones and gravity speed
//!
//! Points per lock come from a fixed table scaled by `award_factor + 1`. Every time
//! cumulative lines cross a multiple of [`LINE_MILESTONE`], the award factor goes up
//! by one and gravity gets 10ms faster, never dropping below the floor interval.

use crate::types::{
    Difficulty, DEFAULT_DROP_INTERVAL_MS, DIFFICULTY_INTERVAL_STEP_MS, DROP_INTERVAL_FLOOR_MS,
    LINE_MILESTONE, LINE_SCORES, MILESTONE_INTERVAL_STEP_MS,
};

/// Result of scoring one lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Lines cleared by this lock
    pub lines: u8,
    /// Points awarded for this lock
    pub points: u32,
    /// Whether this lock reached a line milestone
    pub milestone: bool,
}

/// Calculate points for clearing `lines` in one lock
///
/// 0 lines score nothing; 4 or more use the top entry of the table.
pub fn line_clear_points(lines: u8, award_factor: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    let index = (lines as usize).min(LINE_SCORES.len()) - 1;
    LINE_SCORES[index].saturating_mul(award_factor + 1)
}

/// Gravity interval a session starts with
pub fn initial_drop_interval_ms(difficulty: Difficulty) -> u32 {
    DEFAULT_DROP_INTERVAL_MS
        .saturating_sub(DIFFICULTY_INTERVAL_STEP_MS * difficulty.level())
        .max(DROP_INTERVAL_FLOOR_MS)
}

/// Next gravity interval after a milestone
pub fn tighten_drop_interval_ms(interval_ms: u32) -> u32 {
    interval_ms
        .saturating_sub(MILESTONE_INTERVAL_STEP_MS)
        .max(DROP_INTERVAL_FLOOR_MS)
}

/// Score, lines and speed of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    score: u32,
    lines: u32,
    award_factor: u32,
    drop_interval_ms: u32,
}

impl Progress {
    /// Fresh progress with difficulty-derived defaults
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            score: 0,
            lines: 0,
            award_factor: difficulty.level(),
            drop_interval_ms: initial_drop_interval_ms(difficulty),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn award_factor(&self) -> u32 {
        self.award_factor
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    /// Account for one lock that cleared `lines` rows
    ///
    /// Points use the award factor in effect before this lock. A milestone raises
    /// the factor at most once per lock.
    pub fn record_lock(&mut self, lines: u8) -> ScoreResult {
        if lines == 0 {
            return ScoreResult::default();
        }

        let points = line_clear_points(lines, self.award_factor);
        self.score = self.score.saturating_add(points);

        let before = self.lines / LINE_MILESTONE;
        self.lines += lines as u32;
        let milestone = self.lines / LINE_MILESTONE > before;
        if milestone {
            self.award_factor += 1;
            self.drop_interval_ms = tighten_drop_interval_ms(self.drop_interval_ms);
        }

        ScoreResult {
            lines,
            points,
            milestone,
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new(Difficulty::Easy)
    }
}
