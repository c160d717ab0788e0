//! Player configuration file.
//!
//! ```json
//! {
//!   "difficulty": "normal",
//!   "high_scores_file": "termtris_scores.json",
//!   "starting_level": 1,
//!   "controls": { "hard_drop": ["space"], "rotate_cw": ["up", "w", "k"] }
//! }
//! ```
//!
//! Unknown keys are ignored and missing ones take their defaults. A bad
//! difficulty name or an out-of-range level is logged and replaced rather
//! than rejected, so a hand-edited file never stops the game from starting.
//! `controls` entries replace the default keys of the actions they name;
//! actions left out keep theirs.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::high_scores::DEFAULT_SCORES_FILE;
use crate::types::{Difficulty, GameAction, DEFAULT_CONTROLS, MAX_STARTING_LEVEL};
use crate::write_atomic;

pub const DEFAULT_CONFIG_FILE: &str = "termtris_config.json";
const APP_DIR: &str = "termtris";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub difficulty: Difficulty,
    /// Relative paths resolve against the config file's directory.
    pub high_scores_file: PathBuf,
    pub starting_level: u32,
    /// Key names per action, keyed by the canonical action name.
    pub controls: BTreeMap<String, Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            high_scores_file: PathBuf::from(DEFAULT_SCORES_FILE),
            starting_level: 1,
            controls: default_controls(),
        }
    }
}

/// [`DEFAULT_CONTROLS`] as config-file strings.
pub fn default_controls() -> BTreeMap<String, Vec<String>> {
    DEFAULT_CONTROLS
        .iter()
        .map(|(action, keys)| {
            (
                action.as_str().to_string(),
                keys.iter().map(|key| key.to_string()).collect(),
            )
        })
        .collect()
}

/// Overlay file `controls` on the defaults. Aliases such as `rotate` are
/// stored under the canonical name; unknown actions and empty lists are
/// logged and dropped.
fn merge_controls(raw: BTreeMap<String, Vec<String>>) -> BTreeMap<String, Vec<String>> {
    let mut controls = default_controls();
    for (name, keys) in raw {
        let Some(action) = GameAction::from_str(&name) else {
            warn!(action = %name, "unknown action in config controls");
            continue;
        };
        if keys.is_empty() {
            warn!(action = %name, "no keys for action in config, using defaults");
            continue;
        }
        controls.insert(action.as_str().to_string(), keys);
    }
    controls
}

/// On-disk shape; kept loose so partial or hand-edited files still load.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
struct ConfigFile {
    difficulty: String,
    high_scores_file: String,
    starting_level: u32,
    controls: BTreeMap<String, Vec<String>>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        (&Config::default()).into()
    }
}

impl From<&Config> for ConfigFile {
    fn from(config: &Config) -> Self {
        Self {
            difficulty: config.difficulty.as_str().to_string(),
            high_scores_file: config.high_scores_file.display().to_string(),
            starting_level: config.starting_level,
            controls: config.controls.clone(),
        }
    }
}

impl From<ConfigFile> for Config {
    fn from(raw: ConfigFile) -> Self {
        let difficulty = Difficulty::from_str(&raw.difficulty).unwrap_or_else(|| {
            warn!(value = %raw.difficulty, "invalid difficulty in config, using normal");
            Difficulty::Normal
        });

        let starting_level = if (1..=MAX_STARTING_LEVEL).contains(&raw.starting_level) {
            raw.starting_level
        } else {
            warn!(value = raw.starting_level, "starting level out of range in config, using 1");
            1
        };

        let high_scores_file = if raw.high_scores_file.trim().is_empty() {
            PathBuf::from(DEFAULT_SCORES_FILE)
        } else {
            PathBuf::from(raw.high_scores_file)
        };

        Self {
            difficulty,
            high_scores_file,
            starting_level,
            controls: merge_controls(raw.controls),
        }
    }
}

impl Config {
    /// `<config_dir>/termtris/termtris_config.json`, or the working directory
    /// when the platform has no config dir.
    pub fn default_path() -> PathBuf {
        match dirs::config_dir() {
            Some(mut dir) => {
                dir.push(APP_DIR);
                dir.push(DEFAULT_CONFIG_FILE);
                dir
            }
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        }
    }

    /// `explicit` when given, the default location otherwise.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        explicit.map(Path::to_path_buf).unwrap_or_else(Self::default_path)
    }

    /// Load from `path`. Missing or malformed files yield the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        match serde_json::from_str::<ConfigFile>(&text) {
            Ok(raw) => {
                debug!(path = %path.display(), "loaded config");
                Ok(raw.into())
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "malformed config, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(&ConfigFile::from(self))?;
        write_atomic(path, text.as_bytes())?;
        debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Overwrite `path` with the defaults.
    pub fn reset(path: &Path) -> Result<Self> {
        let config = Self::default();
        config.save(path)?;
        info!(path = %path.display(), "config reset to defaults");
        Ok(config)
    }

    /// High-score file location for a config loaded from `config_path`.
    pub fn high_scores_path(&self, config_path: &Path) -> PathBuf {
        if self.high_scores_file.is_absolute() {
            return self.high_scores_file.clone();
        }
        match config_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.join(&self.high_scores_file),
            _ => self.high_scores_file.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Config {
        serde_json::from_str::<ConfigFile>(json).unwrap().into()
    }

    #[test]
    fn missing_keys_take_defaults() {
        assert_eq!(parse("{}"), Config::default());
        let config = parse(r#"{ "difficulty": "hard" }"#);
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.starting_level, 1);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config = parse(r#"{ "difficulty": "Expert", "fullscreen": true, "controls": {} }"#);
        assert_eq!(config.difficulty, Difficulty::Expert);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = parse(r#"{ "difficulty": "nightmare", "starting_level": 42 }"#);
        assert_eq!(config.difficulty, Difficulty::Normal);
        assert_eq!(config.starting_level, 1);
    }

    #[test]
    fn controls_override_per_action() {
        let config = parse(
            r#"{ "controls": { "rotate": ["x"], "hard_drop": ["enter"], "warp": ["t"], "hold": [] } }"#,
        );
        let defaults = default_controls();

        assert_eq!(config.controls["rotate_cw"], vec!["x"]);
        assert_eq!(config.controls["hard_drop"], vec!["enter"]);
        assert_eq!(config.controls["hold"], defaults["hold"]);
        assert_eq!(config.controls["move_left"], defaults["move_left"]);
        assert!(!config.controls.contains_key("rotate"));
        assert!(!config.controls.contains_key("warp"));
        assert_eq!(config.controls.len(), DEFAULT_CONTROLS.len());
    }

    #[test]
    fn high_scores_path_is_relative_to_config() {
        let config = Config::default();
        assert_eq!(
            config.high_scores_path(Path::new("/tmp/termtris/termtris_config.json")),
            PathBuf::from("/tmp/termtris").join(DEFAULT_SCORES_FILE)
        );
        assert_eq!(
            config.high_scores_path(Path::new("termtris_config.json")),
            PathBuf::from(DEFAULT_SCORES_FILE)
        );
    }

    #[test]
    fn default_path_ends_with_file_name() {
        assert!(Config::default_path().ends_with(DEFAULT_CONFIG_FILE));
    }
}
