//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the piece/board simulation and the controller that
//! drives it. It has no dependencies on the terminal, files or the clock:
//! time comes in through [`GameState::tick`](game_state::GameState::tick) and
//! player input through [`GameState::apply_action`](game_state::GameState::apply_action).
//!
//! # Module Structure
//!
//! - [`pieces`]: the static shape catalog (7 kinds x 4 rotation states) and colors
//! - [`tetromino`]: a piece in play; coordinates, rotation, movement, ghost projection
//! - [`board`]: 10x20 grid with placement validation, merging and line clearing
//! - [`rng`]: seedable uniform piece draws
//! - [`scoring`]: line-clear points, leveling and the gravity speed curve
//! - [`game_state`]: the Spawning/Falling/Locking/RowClearing/Paused/GameOver machine
//! - [`snapshot`]: read-only frame data for renderers
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use termtris_core::{GameConfig, GameState};
//! use termtris_types::GameAction;
//!
//! let mut game = GameState::new(GameConfig::default().seed(12345));
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//! game.tick(Duration::from_millis(16));
//!
//! assert_eq!(game.board().count_filled_cells(), 4);
//! ```

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod tetromino;

pub use termtris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{GameConfig, GameState, GameSummary, LockEvent, Phase, KICK_OFFSETS};
pub use pieces::{get_shape, piece_color, PieceColor};
pub use rng::SimpleRng;
pub use scoring::{line_clear_points, Speed};
pub use snapshot::{GameSnapshot, PieceView};
pub use tetromino::{PieceCoords, Tetromino};
