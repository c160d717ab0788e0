//! Tetromino module - a single piece in play
//!
//! A tetromino is a kind, an origin and a rotation state. Its four absolute
//! cells are derived on demand from the shape catalog, never stored.
//!
//! Two flavours of transform are provided:
//!
//! - In-place mutators (`rotate_cw`, `move_by`, ...) that return `&mut Self`
//!   so calls can be chained.
//! - Non-mutating builders (`rotated_cw`, `moved`, ...) that return a
//!   transformed copy. The controller uses these to validate a candidate
//!   against the board before committing it, so the authoritative piece is
//!   never left in an invalid position.

use crate::board::Board;
use crate::pieces::{get_shape, piece_color, PieceColor, PieceShape};
use crate::rng::SimpleRng;
use crate::types::{PieceKind, Rotation, SPAWN_POSITION};

/// Absolute board coordinates of the four cells of a piece.
pub type PieceCoords = [(i8, i8); 4];

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub x: i8,
    pub y: i8,
    pub rotation: Rotation,
}

impl Tetromino {
    /// Build a piece from explicit attributes.
    pub fn new(kind: PieceKind, x: i8, y: i8, rotation: Rotation) -> Self {
        Self {
            kind,
            x,
            y,
            rotation,
        }
    }

    /// Create a new tetromino at the spawn position, rotation 0
    pub fn spawn(kind: PieceKind) -> Self {
        let (x, y) = SPAWN_POSITION;
        Self::new(kind, x, y, Rotation::North)
    }

    /// Uniformly random kind at `(x, y)`, rotation 0.
    pub fn random(rng: &mut SimpleRng, x: i8, y: i8) -> Self {
        Self::new(rng.next_kind(), x, y, Rotation::North)
    }

    /// Display color, fixed by the kind.
    pub fn color(&self) -> PieceColor {
        piece_color(self.kind)
    }

    /// Catalog offsets for the current rotation.
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// The four absolute cell coordinates (origin + catalog offsets).
    pub fn coords(&self) -> PieceCoords {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    pub fn rotate_cw(&mut self) -> &mut Self {
        self.rotation = self.rotation.rotate_cw();
        self
    }

    pub fn rotate_ccw(&mut self) -> &mut Self {
        self.rotation = self.rotation.rotate_ccw();
        self
    }

    /// Shift the origin by a delta (positive dy is down).
    pub fn move_by(&mut self, dx: i8, dy: i8) -> &mut Self {
        self.x += dx;
        self.y += dy;
        self
    }

    pub fn move_left(&mut self) -> &mut Self {
        self.move_by(-1, 0)
    }

    pub fn move_right(&mut self) -> &mut Self {
        self.move_by(1, 0)
    }

    pub fn move_down(&mut self) -> &mut Self {
        self.move_by(0, 1)
    }

    /// Copy rotated one step clockwise.
    pub fn rotated_cw(mut self) -> Self {
        self.rotate_cw();
        self
    }

    /// Copy rotated one step counter-clockwise.
    pub fn rotated_ccw(mut self) -> Self {
        self.rotate_ccw();
        self
    }

    /// Copy shifted by a delta.
    pub fn moved(mut self, dx: i8, dy: i8) -> Self {
        self.move_by(dx, dy);
        self
    }

    /// Where this piece would come to rest if dropped straight down.
    ///
    /// Works on a copy: steps down while the copy stays valid, then backs up
    /// one row. Neither the piece nor the board is touched. For a piece that is
    /// itself in a valid position the result is valid too.
    pub fn ghost(&self, board: &Board) -> Tetromino {
        let mut ghost = *self;
        while board.is_valid_position(&ghost) {
            ghost.move_down();
        }
        ghost.move_by(0, -1);
        ghost
    }

    /// Number of rows the piece can fall before landing.
    pub fn drop_distance(&self, board: &Board) -> u32 {
        (self.ghost(board).y - self.y).max(0) as u32
    }

    /// Whether the cell directly below any mino is blocked.
    pub fn is_grounded(&self, board: &Board) -> bool {
        !board.is_valid_position(&self.moved(0, 1))
    }

    /// Bounding-box width of the current rotation.
    pub fn width(&self) -> u8 {
        let coords = self.coords();
        let min = coords.iter().map(|&(x, _)| x).min().unwrap_or(0);
        let max = coords.iter().map(|&(x, _)| x).max().unwrap_or(0);
        (max - min + 1) as u8
    }

    /// Bounding-box height of the current rotation.
    pub fn height(&self) -> u8 {
        let coords = self.coords();
        let min = coords.iter().map(|&(_, y)| y).min().unwrap_or(0);
        let max = coords.iter().map(|&(_, y)| y).max().unwrap_or(0);
        (max - min + 1) as u8
    }
}
