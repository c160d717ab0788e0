//! Pieces module - the static shape catalog
//!
//! Every kind has four precomputed rotation states, each a list of four
//! (dx, dy) offsets from the piece origin. Rotation is a table lookup; there is
//! no geometric transform and no kick logic at this level.
//!
//! Shapes sit inside a 4x4 box (I), a 3x3 box (J, L, S, T, Z) or a fixed 2x2
//! square (O), so turning a piece keeps it roughly in place.

use crate::types::{PieceKind, Rotation};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Catalog indexed by `[PieceKind::index()][Rotation::index()]`.
pub static SHAPES: [[PieceShape; 4]; 7] = [
    // I
    [
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        [(2, 0), (2, 1), (2, 2), (2, 3)],
        [(0, 2), (1, 2), (2, 2), (3, 2)],
        [(1, 0), (1, 1), (1, 2), (1, 3)],
    ],
    // J
    [
        [(0, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (1, 1), (0, 2), (1, 2)],
    ],
    // L
    [
        [(2, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (2, 1), (0, 2)],
        [(0, 0), (1, 0), (1, 1), (1, 2)],
    ],
    // O
    [
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
    ],
    // S
    [
        [(1, 0), (2, 0), (0, 1), (1, 1)],
        [(1, 0), (1, 1), (2, 1), (2, 2)],
        [(1, 1), (2, 1), (0, 2), (1, 2)],
        [(0, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // T
    [
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (1, 2)],
        [(1, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // Z
    [
        [(0, 0), (1, 0), (1, 1), (2, 1)],
        [(2, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (1, 2), (2, 2)],
        [(1, 0), (0, 1), (1, 1), (0, 2)],
    ],
];

/// Display color of a piece kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PieceColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Colors indexed by `PieceKind::index()`.
static COLORS: [PieceColor; 7] = [
    PieceColor::new(0, 255, 255), // I cyan
    PieceColor::new(0, 0, 255),   // J blue
    PieceColor::new(255, 127, 0), // L orange
    PieceColor::new(255, 255, 0), // O yellow
    PieceColor::new(0, 255, 0),   // S green
    PieceColor::new(128, 0, 128), // T purple
    PieceColor::new(255, 0, 0),   // Z red
];

/// Get the shape (mino offsets) for a piece kind and rotation
#[inline]
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    SHAPES[kind.index()][rotation.index()]
}

/// Get the display color for a piece kind
#[inline]
pub fn piece_color(kind: PieceKind) -> PieceColor {
    COLORS[kind.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_state_has_four_distinct_offsets() {
        for kind in PieceKind::ALL {
            for r in 0..4 {
                let shape = get_shape(kind, Rotation::from_index(r));
                for i in 0..4 {
                    for j in (i + 1)..4 {
                        assert_ne!(shape[i], shape[j], "{:?} rotation {} repeats a cell", kind, r);
                    }
                }
            }
        }
    }

    #[test]
    fn offsets_stay_inside_4x4_box() {
        for states in SHAPES.iter() {
            for shape in states {
                assert!(shape
                    .iter()
                    .all(|&(dx, dy)| (0..4).contains(&dx) && (0..4).contains(&dy)));
            }
        }
    }

    #[test]
    fn o_piece_is_rotation_invariant() {
        let north = get_shape(PieceKind::O, Rotation::North);
        for r in [Rotation::East, Rotation::South, Rotation::West] {
            assert_eq!(get_shape(PieceKind::O, r), north);
        }
    }

    #[test]
    fn colors_are_distinct() {
        for a in PieceKind::ALL {
            for b in PieceKind::ALL {
                if a != b {
                    assert_ne!(piece_color(a), piece_color(b));
                }
            }
        }
    }
}
