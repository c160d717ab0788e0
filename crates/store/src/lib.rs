//! On-disk state for termtris: the config file and the high-score table.
//!
//! Both are small JSON documents. Missing files are never errors; callers get
//! defaults (config) or an empty table (high scores).

pub mod config;
pub mod high_scores;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use termtris_types as types;

pub use config::{Config, DEFAULT_CONFIG_FILE};
pub use high_scores::{format_duration, format_score, HighScoreEntry, HighScores, MAX_SCORES};

/// Write `bytes` to `path` via a sibling `.tmp` file, copying any existing
/// file to `.bak` first. Parent directories are created as needed.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let tmp = sibling(path, "tmp");
    fs::write(&tmp, bytes).with_context(|| format!("Failed to write {}", tmp.display()))?;

    if path.exists() {
        let backup = sibling(path, "bak");
        fs::copy(path, &backup).with_context(|| format!("Failed to back up {}", path.display()))?;
    }

    if let Err(err) = fs::rename(&tmp, path) {
        // Some filesystems refuse to rename over an existing file.
        fs::copy(&tmp, path)
            .with_context(|| format!("Failed to replace {} ({err})", path.display()))?;
        let _ = fs::remove_file(&tmp);
    }
    Ok(())
}

/// `path` with `.ext` appended to the full file name.
pub(crate) fn sibling(path: &Path, ext: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}
