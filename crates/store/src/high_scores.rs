//! Persistent high-score table.
//!
//! Stored as a pretty-printed JSON array, best score first, at most
//! [`MAX_SCORES`] entries. Saves go through a `.tmp` file and keep the
//! previous table as `.bak`, which `load` falls back to when the main file
//! does not parse.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{sibling, write_atomic};

pub const MAX_SCORES: usize = 10;

/// Default file name, placed next to the config file.
pub const DEFAULT_SCORES_FILE: &str = "termtris_scores.json";

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    /// Play time in seconds.
    #[serde(rename = "duration", default)]
    pub duration_secs: f64,
    #[serde(default)]
    pub date: String,
}

impl HighScoreEntry {
    /// Entry stamped with the current local time.
    pub fn new(score: u32, level: u32, lines: u32, duration: Duration) -> Self {
        Self {
            score,
            level,
            lines,
            duration_secs: duration.as_secs_f64(),
            date: Local::now().format(DATE_FORMAT).to_string(),
        }
    }

    /// Stored play time; negative or unrepresentable values read as zero.
    pub fn duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.duration_secs).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<HighScoreEntry>) -> Self {
        let mut table = Self { entries };
        table.normalize();
        table
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn best(&self) -> Option<&HighScoreEntry> {
        self.entries.first()
    }

    /// Load the table. A missing file is an empty table; an unreadable one
    /// falls back to the `.bak` copy, then to empty.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no high score file yet");
            return Ok(Self::new());
        }

        match read_table(path) {
            Ok(table) => Ok(table),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "high score file unreadable");
                let backup = backup_path(path);
                match read_table(&backup) {
                    Ok(table) => {
                        info!(path = %backup.display(), "recovered high scores from backup");
                        fs::copy(&backup, path).with_context(|| {
                            format!("Failed to restore {} from backup", path.display())
                        })?;
                        Ok(table)
                    }
                    Err(_) => Ok(Self::new()),
                }
            }
        }
    }

    /// Write the table atomically, keeping the previous file as `.bak`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        write_atomic(path, text.as_bytes())?;
        debug!(path = %path.display(), count = self.entries.len(), "saved high scores");
        Ok(())
    }

    /// Whether `score` would make it onto the table.
    pub fn qualifies(&self, score: u32) -> bool {
        if self.entries.len() < MAX_SCORES {
            return true;
        }
        self.entries.last().map_or(true, |lowest| score > lowest.score)
    }

    /// Insert an entry, keeping order and the size cap.
    ///
    /// Returns the 1-based rank, or `None` when it did not make the table.
    pub fn add(&mut self, entry: HighScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }
        // Ties go below existing entries.
        let pos = self.entries.partition_point(|e| e.score >= entry.score);
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_SCORES);
        Some(pos + 1)
    }

    /// One display line per entry.
    pub fn format_lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| {
                format!(
                    "{}. {} - Level {} - {} lines - {} - {}",
                    i + 1,
                    format_score(e.score),
                    e.level,
                    e.lines,
                    format_duration(e.duration()),
                    if e.date.is_empty() { "Unknown" } else { &e.date },
                )
            })
            .collect()
    }

    /// Clear the table on disk, keeping a timestamped copy of the old one.
    pub fn reset(path: &Path) -> Result<()> {
        if path.exists() {
            let stamp = Local::now().format("%Y%m%d%H%M%S");
            let archived = sibling(path, &format!("{stamp}.bak"));
            fs::copy(path, &archived)
                .with_context(|| format!("Failed to back up {}", path.display()))?;
            info!(path = %archived.display(), "backed up high scores before reset");
        }
        Self::new().save(path)
    }

    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_SCORES);
    }
}

/// Parse a table file. The file must hold a JSON array; entries inside it
/// that do not match [`HighScoreEntry`] are skipped, not fatal.
fn read_table(path: &Path) -> Result<HighScores> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let raw: Vec<serde_json::Value> = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let entries = raw
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match serde_json::from_value::<HighScoreEntry>(value) {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(
                    path = %path.display(),
                    index = i,
                    error = %err,
                    "skipping invalid high score entry"
                );
                None
            }
        })
        .collect();
    Ok(HighScores::from_entries(entries))
}

/// Where `save` keeps the previous table.
pub fn backup_path(path: &Path) -> PathBuf {
    sibling(path, "bak")
}

/// `12300` -> `"12,300"`.
pub fn format_score(score: u32) -> String {
    let digits = score.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `MM:SS`.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
