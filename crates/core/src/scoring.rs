//! Scoring module - line-clear points, level progression and gravity speed
//!
//! Rules:
//! - A clear of N lines (1..=4) is worth `LINE_SCORES[N] * level`, scored as one
//!   event so a four-line clear earns the tetris bonus rather than four singles.
//! - After a clear, the level goes up by one once `lines >= level * lines_per_level`.
//! - Gravity starts at `initial_drop_secs / starting_level`, shortens a little
//!   after every gravity step and by a larger step on each level up, never
//!   going below `MIN_DROP_SECS`. Starting intervals above `MAX_DROP_SECS` (or
//!   not finite at all) are clamped to it.

use std::time::Duration;

use crate::types::{DifficultySettings, LINE_SCORES, MAX_DROP_SECS, MIN_DROP_SECS};

/// Points for clearing `lines` rows at once on `level`.
pub fn line_clear_points(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level)
}

/// Whether the running line total has earned the next level.
pub fn should_level_up(total_lines: u32, level: u32, lines_per_level: u32) -> bool {
    total_lines >= level.saturating_mul(lines_per_level)
}

/// Gravity interval, in seconds per row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Speed {
    interval_secs: f64,
    drop_speedup_secs: f64,
    level_speedup_secs: f64,
}

impl Speed {
    /// Speed for a game starting at `starting_level` with the given base interval.
    pub fn new(initial_drop_secs: f64, starting_level: u32, settings: &DifficultySettings) -> Self {
        let level = starting_level.max(1) as f64;
        let base = if initial_drop_secs.is_finite() {
            initial_drop_secs
        } else {
            MAX_DROP_SECS
        };
        Self {
            interval_secs: (base / level).clamp(MIN_DROP_SECS, MAX_DROP_SECS),
            drop_speedup_secs: settings.drop_speedup_secs,
            level_speedup_secs: settings.level_speedup_secs,
        }
    }

    pub fn interval_secs(&self) -> f64 {
        self.interval_secs
    }

    pub fn interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.interval_secs)
            .unwrap_or(Duration::from_secs(MAX_DROP_SECS as u64))
    }

    /// Gradual speedup applied after each gravity step.
    pub fn after_drop(&mut self) {
        self.interval_secs = (self.interval_secs - self.drop_speedup_secs).max(MIN_DROP_SECS);
    }

    /// Larger speedup applied on level up.
    pub fn after_level_up(&mut self) {
        self.interval_secs = (self.interval_secs - self.level_speedup_secs).max(MIN_DROP_SECS);
    }
}
