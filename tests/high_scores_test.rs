//! High score and config persistence against real files

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use termtris::store::high_scores::backup_path;
use crossterm::event::KeyCode;
use termtris::input::KeyMap;
use termtris::store::{Config, HighScoreEntry, HighScores, MAX_SCORES};
use termtris::types::{Difficulty, GameAction};

/// Fresh, empty directory under the system temp dir.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("termtris-{}-{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn entry(score: u32) -> HighScoreEntry {
    HighScoreEntry::new(score, 2, 12, Duration::from_secs(90))
}

#[test]
fn missing_file_loads_empty() {
    let dir = scratch_dir("missing");
    let table = HighScores::load(&dir.join("nope.json")).unwrap();
    assert!(table.is_empty());
}

#[test]
fn save_and_load_keeps_order() {
    let dir = scratch_dir("roundtrip");
    let path = dir.join("scores.json");

    let mut table = HighScores::new();
    table.add(entry(500));
    table.add(entry(1500));
    table.add(entry(900));
    table.save(&path).unwrap();

    let loaded = HighScores::load(&path).unwrap();
    let scores: Vec<u32> = loaded.entries().iter().map(|e| e.score).collect();
    assert_eq!(scores, vec![1500, 900, 500]);
    assert_eq!(loaded.best().unwrap().score, 1500);
    assert!(!loaded.entries()[0].date.is_empty());

    // Second save leaves the previous file as a backup.
    assert!(!backup_path(&path).exists());
    loaded.save(&path).unwrap();
    assert!(backup_path(&path).exists());
    assert!(!dir.join("scores.json.tmp").exists());
}

#[test]
fn unsorted_file_is_sorted_and_capped() {
    let dir = scratch_dir("unsorted");
    let path = dir.join("scores.json");
    let entries: Vec<String> = (1..=15)
        .map(|s| format!(r#"{{"score": {s}, "level": 1, "lines": 0, "duration": 1.0, "date": "x"}}"#))
        .collect();
    fs::write(&path, format!("[{}]", entries.join(","))).unwrap();

    let table = HighScores::load(&path).unwrap();
    assert_eq!(table.len(), MAX_SCORES);
    assert_eq!(table.best().unwrap().score, 15);
    assert_eq!(table.entries().last().unwrap().score, 6);
}

#[test]
fn corrupt_file_recovers_from_backup() {
    let dir = scratch_dir("corrupt");
    let path = dir.join("scores.json");

    let table = HighScores::from_entries(vec![entry(4200)]);
    table.save(&path).unwrap();
    table.save(&path).unwrap();
    fs::write(&path, "{ not json").unwrap();

    let recovered = HighScores::load(&path).unwrap();
    assert_eq!(recovered.best().unwrap().score, 4200);
    // The good copy is restored in place.
    assert_eq!(HighScores::load(&path).unwrap(), recovered);
}

#[test]
fn corrupt_file_without_backup_is_empty() {
    let dir = scratch_dir("corrupt-nobak");
    let path = dir.join("scores.json");
    fs::write(&path, "garbage").unwrap();

    assert!(HighScores::load(&path).unwrap().is_empty());
}

#[test]
fn invalid_entries_are_skipped_not_fatal() {
    let dir = scratch_dir("partial");
    let path = dir.join("scores.json");
    fs::write(
        &path,
        r#"[
            {"score": 300, "level": 2, "lines": 12, "duration": 40.0, "date": "a"},
            {"score": 700, "level": 3},
            {"score": 900, "level": 4, "lines": 30, "duration": 1e300, "date": "b"}
        ]"#,
    )
    .unwrap();

    let table = HighScores::load(&path).unwrap();
    let scores: Vec<u32> = table.entries().iter().map(|e| e.score).collect();
    assert_eq!(scores, vec![900, 300]);

    let lines = table.format_lines();
    assert!(lines[0].contains(" - 00:00 - b"));
    assert!(lines[1].contains(" - 00:40 - a"));
}

#[test]
fn non_array_file_falls_back_to_backup() {
    let dir = scratch_dir("not-array");
    let path = dir.join("scores.json");
    let table = HighScores::from_entries(vec![entry(250)]);
    table.save(&path).unwrap();
    table.save(&path).unwrap();
    fs::write(&path, r#"{"score": 1}"#).unwrap();

    assert_eq!(HighScores::load(&path).unwrap().best().unwrap().score, 250);
}

#[test]
fn reset_empties_table_and_archives_old() {
    let dir = scratch_dir("reset");
    let path = dir.join("scores.json");
    HighScores::from_entries(vec![entry(10), entry(20)]).save(&path).unwrap();

    HighScores::reset(&path).unwrap();
    assert!(HighScores::load(&path).unwrap().is_empty());

    let archived = fs::read_dir(&dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name().to_string_lossy().into_owned();
            name.starts_with("scores.json.") && name.ends_with(".bak") && name != "scores.json.bak"
        })
        .count();
    assert_eq!(archived, 1);
}

#[test]
fn qualifying_needs_to_beat_the_lowest_when_full() {
    let mut table = HighScores::new();
    for s in 1..=MAX_SCORES as u32 {
        table.add(entry(s * 100));
    }
    assert!(!table.qualifies(100));
    assert!(table.qualifies(101));
    assert_eq!(table.add(entry(5000)), Some(1));
    assert_eq!(table.len(), MAX_SCORES);
}

#[test]
fn formatted_lines_are_ranked() {
    let table = HighScores::from_entries(vec![entry(12300), entry(800)]);
    let lines = table.format_lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("1. 12,300 - Level 2 - 12 lines - 01:30 - "));
    assert!(lines[1].starts_with("2. 800 - "));
}

#[test]
fn config_missing_file_is_default() {
    let dir = scratch_dir("config-missing");
    let config = Config::load(&dir.join("termtris_config.json")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn config_save_load_and_reset() {
    let dir = scratch_dir("config");
    let path = dir.join("nested").join("termtris_config.json");

    let config = Config {
        difficulty: Difficulty::Hard,
        starting_level: 4,
        ..Config::default()
    };
    config.save(&path).unwrap();
    assert_eq!(Config::load(&path).unwrap(), config);

    let text = fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["difficulty"], "hard");
    assert_eq!(json["starting_level"], 4);

    assert_eq!(Config::reset(&path).unwrap(), Config::default());
    assert_eq!(Config::load(&path).unwrap(), Config::default());
}

#[test]
fn config_malformed_file_falls_back() {
    let dir = scratch_dir("config-bad");
    let path = dir.join("termtris_config.json");
    fs::write(&path, "[1, 2, 3").unwrap();
    assert_eq!(Config::load(&path).unwrap(), Config::default());

    fs::write(&path, r#"{"difficulty": "insane", "starting_level": 3}"#).unwrap();
    let config = Config::load(&path).unwrap();
    assert_eq!(config.difficulty, Difficulty::Normal);
    assert_eq!(config.starting_level, 3);
}

#[test]
fn config_controls_drive_the_key_map() {
    let dir = scratch_dir("config-controls");
    let path = dir.join("termtris_config.json");
    fs::write(&path, r#"{"controls": {"hard_drop": ["enter"], "pause": ["space"]}}"#).unwrap();

    let config = Config::load(&path).unwrap();
    let keymap = KeyMap::from_controls(&config.controls);
    assert_eq!(keymap.action_for(KeyCode::Enter), Some(GameAction::HardDrop));
    assert_eq!(keymap.action_for(KeyCode::Char(' ')), Some(GameAction::Pause));
    assert_eq!(keymap.action_for(KeyCode::Char('p')), None);
    assert_eq!(keymap.action_for(KeyCode::Left), Some(GameAction::MoveLeft));

    // Saved files carry the full table.
    config.save(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["controls"]["pause"][0], "space");
    assert_eq!(json["controls"]["move_left"][0], "left");
}
