//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are pure data with no external dependencies, so they can be used
//! by the engine, the key mapping layer, the renderer and the persistence layer alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, y grows downward)
//! - **Spawn position**: (3, 0)
//!
//! # Scoring
//!
//! | Lines | Points (× level) |
//! |-------|------------------|
//! | 1 | 100 |
//! | 2 | 300 |
//! | 3 | 500 |
//! | 4 | 800 |
//!
//! # Difficulty presets
//!
//! | Preset | Initial drop | Per-drop speedup | Per-level speedup | Lines per level |
//! |--------|--------------|------------------|-------------------|-----------------|
//! | easy   | 1.2s | 0.0003s | 0.08s | 12 |
//! | normal | 1.0s | 0.0005s | 0.10s | 10 |
//! | hard   | 0.8s | 0.0008s | 0.12s | 8 |
//! | expert | 0.6s | 0.001s  | 0.15s | 6 |
//!
//! # Examples
//!
//! ```
//! use termtris_types::{Difficulty, GameAction, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
//! assert_eq!(GameAction::from_str("hard_drop"), Some(GameAction::HardDrop));
//! assert_eq!(Difficulty::from_str("HARD").unwrap().settings().lines_per_level, 8);
//! assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), (10, 20));
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Origin at which new pieces appear (x, y).
pub const SPAWN_POSITION: (i8, i8) = (3, 0);

/// Fixed timestep interval of the game loop in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1 on the default difficulty, in seconds.
pub const INITIAL_DROP_SECS: f64 = 1.0;

/// Gravity never gets faster than this, in seconds per row.
pub const MIN_DROP_SECS: f64 = 0.05;

/// Slowest accepted gravity interval, in seconds per row.
pub const MAX_DROP_SECS: f64 = 10.0;

/// Points for clearing N lines at once, before the level multiplier.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Highest starting level accepted from the command line.
pub const MAX_STARTING_LEVEL: u32 = 10;

/// The seven tetromino piece kinds
///
/// Listed in catalog order (I, J, L, O, S, T, Z).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Every kind, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use termtris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("Z"), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "I" => Some(PieceKind::I),
            "J" => Some(PieceKind::J),
            "L" => Some(PieceKind::L),
            "O" => Some(PieceKind::O),
            "S" => Some(PieceKind::S),
            "T" => Some(PieceKind::T),
            "Z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Single-letter uppercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }

    /// Position in [`PieceKind::ALL`].
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::J => 1,
            PieceKind::L => 2,
            PieceKind::O => 3,
            PieceKind::S => 4,
            PieceKind::T => 5,
            PieceKind::Z => 6,
        }
    }
}

/// Rotation state of a piece, one of four.
///
/// - **North** (0): spawn orientation
/// - **East** (1): one clockwise turn
/// - **South** (2): two turns
/// - **West** (3): one counter-clockwise turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (index + 1 mod 4)
    ///
    /// ```
    /// use termtris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotate counter-clockwise (index - 1 mod 4, wrapping 0 to 3)
    ///
    /// ```
    /// use termtris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Numeric rotation state in 0..4.
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotation state for `index` taken modulo 4.
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }
}

/// Discrete player actions consumed by the engine.
///
/// Raw key events are translated into these by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (locks it when blocked)
    MoveDown,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Drop piece to its landing position and lock it
    HardDrop,
    /// Swap the active piece with the held one
    Hold,
    /// Toggle pause
    Pause,
    /// Start a fresh game
    Restart,
    /// Leave the game
    Quit,
}

impl GameAction {
    /// Parse from the snake_case action name.
    ///
    /// ```
    /// use termtris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("move_left"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotate_ccw"), Some(GameAction::RotateCcw));
    /// assert_eq!(GameAction::from_str("jump"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "move_left" => Some(GameAction::MoveLeft),
            "move_right" => Some(GameAction::MoveRight),
            "move_down" => Some(GameAction::MoveDown),
            "rotate_cw" | "rotate" => Some(GameAction::RotateCw),
            "rotate_ccw" => Some(GameAction::RotateCcw),
            "hard_drop" => Some(GameAction::HardDrop),
            "hold" => Some(GameAction::Hold),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            "quit" => Some(GameAction::Quit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "move_left",
            GameAction::MoveRight => "move_right",
            GameAction::MoveDown => "move_down",
            GameAction::RotateCw => "rotate_cw",
            GameAction::RotateCcw => "rotate_ccw",
            GameAction::HardDrop => "hard_drop",
            GameAction::Hold => "hold",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
            GameAction::Quit => "quit",
        }
    }

    /// Whether the action manipulates the active piece (accepted only while falling).
    pub fn is_piece_action(&self) -> bool {
        matches!(
            self,
            GameAction::MoveLeft
                | GameAction::MoveRight
                | GameAction::MoveDown
                | GameAction::RotateCw
                | GameAction::RotateCcw
                | GameAction::HardDrop
                | GameAction::Hold
        )
    }
}

/// Default key bindings per action, as key names accepted in the config file.
///
/// Ctrl-C always quits and is not listed.
pub const DEFAULT_CONTROLS: [(GameAction, &[&str]); 10] = [
    (GameAction::MoveLeft, &["left", "a", "j"]),
    (GameAction::MoveRight, &["right", "d", "l"]),
    (GameAction::MoveDown, &["down", "s", "i"]),
    (GameAction::RotateCw, &["up", "w", "k"]),
    (GameAction::RotateCcw, &["z"]),
    (GameAction::HardDrop, &["space"]),
    (GameAction::Hold, &["h", "c"]),
    (GameAction::Pause, &["p"]),
    (GameAction::Restart, &["r"]),
    (GameAction::Quit, &["q", "escape"]),
];

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: settled block left by a piece of that kind
pub type Cell = Option<PieceKind>;

/// Speed progression preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Expert,
}

/// Tunables that a [`Difficulty`] expands into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultySettings {
    /// Gravity interval at level 1, in seconds.
    pub initial_drop_secs: f64,
    /// Interval reduction applied after every gravity step.
    pub drop_speedup_secs: f64,
    /// Interval reduction applied on each level up.
    pub level_speedup_secs: f64,
    /// Lines needed per level.
    pub lines_per_level: u32,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    /// Parse preset name (case-insensitive)
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            "expert" => Some(Difficulty::Expert),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }

    pub fn settings(&self) -> DifficultySettings {
        match self {
            Difficulty::Easy => DifficultySettings {
                initial_drop_secs: 1.2,
                drop_speedup_secs: 0.0003,
                level_speedup_secs: 0.08,
                lines_per_level: 12,
            },
            Difficulty::Normal => DifficultySettings {
                initial_drop_secs: INITIAL_DROP_SECS,
                drop_speedup_secs: 0.0005,
                level_speedup_secs: 0.1,
                lines_per_level: 10,
            },
            Difficulty::Hard => DifficultySettings {
                initial_drop_secs: 0.8,
                drop_speedup_secs: 0.0008,
                level_speedup_secs: 0.12,
                lines_per_level: 8,
            },
            Difficulty::Expert => DifficultySettings {
                initial_drop_secs: 0.6,
                drop_speedup_secs: 0.001,
                level_speedup_secs: 0.15,
                lines_per_level: 6,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_kind_index_matches_all_order() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(PieceKind::from_str(kind.as_str()), Some(*kind));
        }
    }

    #[test]
    fn rotation_index_wraps() {
        assert_eq!(Rotation::from_index(4), Rotation::North);
        assert_eq!(Rotation::from_index(7), Rotation::West);
        for i in 0..4 {
            assert_eq!(Rotation::from_index(i).index(), i);
        }
    }

    #[test]
    fn action_names_roundtrip() {
        let all = [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::MoveDown,
            GameAction::RotateCw,
            GameAction::RotateCcw,
            GameAction::HardDrop,
            GameAction::Hold,
            GameAction::Pause,
            GameAction::Restart,
            GameAction::Quit,
        ];
        for action in all {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
        assert!(!GameAction::Pause.is_piece_action());
        assert!(GameAction::Hold.is_piece_action());

        for action in all {
            assert!(DEFAULT_CONTROLS.iter().any(|&(a, keys)| a == action && !keys.is_empty()));
        }
    }

    #[test]
    fn difficulty_presets_get_faster() {
        let speeds: Vec<f64> = Difficulty::ALL
            .iter()
            .map(|d| d.settings().initial_drop_secs)
            .collect();
        assert!(speeds.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(Difficulty::default(), Difficulty::Normal);
        assert_eq!(Difficulty::from_str(" Expert "), Some(Difficulty::Expert));
        assert_eq!(Difficulty::from_str("insane"), None);
    }
}
