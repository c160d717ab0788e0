use std::time::Duration;

use crate::game_state::Phase;
use crate::pieces::{piece_color, PieceColor};
use crate::tetromino::{PieceCoords, Tetromino};
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// A piece as the renderer sees it: kind plus absolute cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceView {
    pub kind: PieceKind,
    pub coords: PieceCoords,
}

impl PieceView {
    pub fn color(&self) -> PieceColor {
        piece_color(self.kind)
    }
}

impl From<Tetromino> for PieceView {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            coords: value.coords(),
        }
    }
}

/// Everything a frame needs, copied out of the game state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<PieceView>,
    pub ghost: Option<PieceView>,
    pub next: PieceKind,
    pub held: Option<PieceKind>,
    pub can_hold: bool,
    pub phase: Phase,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub elapsed: Duration,
}

impl GameSnapshot {
    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Falling
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost: None,
            next: PieceKind::I,
            held: None,
            can_hold: true,
            phase: Phase::Spawning,
            score: 0,
            level: 1,
            lines: 0,
            elapsed: Duration::ZERO,
        }
    }
}
