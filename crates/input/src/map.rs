//! Key mapping from terminal events to game actions.
//!
//! Default bindings (overridable per action through the config file's
//! `controls` table):
//!
//! | Action | Keys |
//! |--------|------|
//! | move_left | ← a j |
//! | move_right | → d l |
//! | move_down | ↓ s i |
//! | rotate_cw | ↑ w k |
//! | rotate_ccw | z |
//! | hard_drop | space |
//! | hold | h c |
//! | pause | p |
//! | restart | r |
//! | quit | q Esc |
//!
//! Ctrl-C quits regardless of the table.

use std::collections::{BTreeMap, HashMap};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

use crate::types::{GameAction, DEFAULT_CONTROLS};

/// Lookup table from key code to action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    bindings: HashMap<KeyCode, GameAction>,
}

impl Default for KeyMap {
    fn default() -> Self {
        let mut bindings = HashMap::new();
        for (action, names) in DEFAULT_CONTROLS {
            for code in names.iter().filter_map(|name| parse_key_name(name)) {
                bindings.insert(code, action);
            }
        }
        Self { bindings }
    }
}

impl KeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with the listed actions rebound.
    ///
    /// Each action named in `controls` loses its default keys and gets the
    /// listed ones instead. Unknown action names and key names are logged and
    /// skipped; an action left with no usable key keeps its defaults.
    pub fn from_controls(controls: &BTreeMap<String, Vec<String>>) -> Self {
        let mut overrides: Vec<(GameAction, Vec<KeyCode>)> = Vec::new();

        for (name, keys) in controls {
            let Some(action) = GameAction::from_str(name) else {
                warn!(action = %name, "unknown action in controls");
                continue;
            };
            let codes: Vec<KeyCode> = keys
                .iter()
                .filter_map(|key| {
                    let code = parse_key_name(key);
                    if code.is_none() {
                        warn!(action = %name, key = %key, "unknown key name in controls");
                    }
                    code
                })
                .collect();
            if codes.is_empty() {
                warn!(action = %name, "no usable keys, keeping defaults");
                continue;
            }
            overrides.push((action, codes));
        }

        let mut map = Self::default();
        for (action, _) in &overrides {
            map.bindings.retain(|_, bound| bound != action);
        }
        for (action, codes) in overrides {
            for code in codes {
                map.bindings.insert(code, action);
            }
        }
        map
    }

    /// Action bound to `code`. Letters match either case.
    pub fn action_for(&self, code: KeyCode) -> Option<GameAction> {
        self.bindings.get(&normalize(code)).copied()
    }

    /// Keys bound to `action`, in no particular order.
    pub fn keys_for(&self, action: GameAction) -> impl Iterator<Item = KeyCode> + '_ {
        self.bindings
            .iter()
            .filter(move |(_, bound)| **bound == action)
            .map(|(code, _)| *code)
    }
}

/// Parse a config key name: `left`, `right`, `up`, `down`, `space`,
/// `escape`/`esc`, `enter`/`return`, `tab`, `backspace`, or a single character.
pub fn parse_key_name(name: &str) -> Option<KeyCode> {
    let name = name.trim().to_ascii_lowercase();
    let code = match name.as_str() {
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "space" => KeyCode::Char(' '),
        "escape" | "esc" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };
    Some(code)
}

fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent, keymap: &KeyMap) -> Option<GameAction> {
    if is_interrupt(key) {
        return Some(GameAction::Quit);
    }
    keymap.action_for(key.code)
}

fn is_interrupt(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}
