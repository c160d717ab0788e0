//! Tetromino tests - shapes, transforms and ghost projection

use proptest::prelude::*;

use termtris::core::{get_shape, piece_color, Board, SimpleRng, Tetromino};
use termtris::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_POSITION};

fn any_kind() -> impl Strategy<Value = PieceKind> {
    (0..7usize).prop_map(|i| PieceKind::ALL[i])
}

fn any_rotation() -> impl Strategy<Value = Rotation> {
    (0..4usize).prop_map(Rotation::from_index)
}

#[test]
fn test_spawn_position_and_rotation() {
    for kind in PieceKind::ALL {
        let piece = Tetromino::spawn(kind);
        assert_eq!((piece.x, piece.y), SPAWN_POSITION);
        assert_eq!(piece.rotation, Rotation::North);
        assert_eq!(piece.kind, kind);
    }
}

#[test]
fn test_color_follows_kind() {
    let t = Tetromino::spawn(PieceKind::T);
    assert_eq!(t.color(), piece_color(PieceKind::T));
    assert_ne!(piece_color(PieceKind::I), piece_color(PieceKind::Z));
}

#[test]
fn test_coords_are_origin_plus_shape() {
    let piece = Tetromino::new(PieceKind::J, 4, 7, Rotation::East);
    let shape = get_shape(PieceKind::J, Rotation::East);
    for (i, &(x, y)) in piece.coords().iter().enumerate() {
        assert_eq!((x, y), (4 + shape[i].0, 7 + shape[i].1));
    }
}

#[test]
fn test_chained_moves() {
    let mut piece = Tetromino::spawn(PieceKind::T);
    piece.move_left().move_left().move_down().move_right();
    assert_eq!((piece.x, piece.y), (2, 1));

    piece.move_by(3, 4);
    assert_eq!((piece.x, piece.y), (5, 5));
}

#[test]
fn test_non_mutating_transforms_leave_original() {
    let piece = Tetromino::spawn(PieceKind::S);
    let rotated = piece.rotated_cw();
    let moved = piece.moved(1, 2);

    assert_eq!(piece.rotation, Rotation::North);
    assert_eq!(rotated.rotation, Rotation::East);
    assert_eq!((moved.x, moved.y), (piece.x + 1, piece.y + 2));
    assert_eq!(piece.rotated_ccw().rotation, Rotation::West);
}

#[test]
fn test_copy_is_independent() {
    let original = Tetromino::spawn(PieceKind::L);
    let mut copy = original;
    copy.rotate_cw().move_down();

    assert_eq!(original, Tetromino::spawn(PieceKind::L));
    assert_ne!(copy, original);
}

#[test]
fn test_o_piece_rotation_is_noop_on_cells() {
    let mut o = Tetromino::spawn(PieceKind::O);
    let before = o.coords();
    o.rotate_cw();
    assert_eq!(o.coords(), before);
}

#[test]
fn test_width_height() {
    let i = Tetromino::spawn(PieceKind::I);
    assert_eq!((i.width(), i.height()), (4, 1));
    assert_eq!((i.rotated_cw().width(), i.rotated_cw().height()), (1, 4));

    let o = Tetromino::spawn(PieceKind::O);
    assert_eq!((o.width(), o.height()), (2, 2));

    let t = Tetromino::spawn(PieceKind::T);
    assert_eq!((t.width(), t.height()), (3, 2));
}

#[test]
fn test_ghost_on_empty_board_reaches_floor() {
    let board = Board::new();
    let piece = Tetromino::spawn(PieceKind::I);
    let ghost = piece.ghost(&board);

    assert!(board.is_valid_position(&ghost));
    assert!(!board.is_valid_position(&ghost.moved(0, 1)));
    assert!(ghost.coords().iter().all(|&(_, y)| y == BOARD_HEIGHT as i8 - 1));
    assert_eq!(piece.drop_distance(&board), 18);
}

#[test]
fn test_ghost_stops_on_stack() {
    let mut board = Board::new();
    for x in 0..BOARD_WIDTH as i8 {
        board.set(x, 15, Some(PieceKind::Z));
    }
    let piece = Tetromino::spawn(PieceKind::O);
    let ghost = piece.ghost(&board);

    assert!(ghost.coords().iter().all(|&(_, y)| y == 13 || y == 14));
    assert!(ghost.is_grounded(&board));
    assert!(!piece.is_grounded(&board));
}

#[test]
fn test_random_is_reproducible() {
    let mut a = SimpleRng::new(99);
    let mut b = SimpleRng::new(99);
    for _ in 0..50 {
        assert_eq!(Tetromino::random(&mut a, 3, 0), Tetromino::random(&mut b, 3, 0));
    }
}

#[test]
fn test_random_draws_every_kind() {
    let mut rng = SimpleRng::new(7);
    let mut seen = [false; 7];
    for _ in 0..500 {
        let piece = Tetromino::random(&mut rng, 0, 0);
        seen[piece.kind.index()] = true;
        assert_eq!(piece.rotation, Rotation::North);
    }
    assert!(seen.iter().all(|&s| s));
}

proptest! {
    #[test]
    fn prop_four_rotations_return_to_start(kind in any_kind(), rot in any_rotation(), x in -2i8..12, y in -2i8..22) {
        let start = Tetromino::new(kind, x, y, rot);

        let mut cw = start;
        let mut ccw = start;
        for _ in 0..4 {
            cw.rotate_cw();
            ccw.rotate_ccw();
        }
        prop_assert_eq!(cw, start);
        prop_assert_eq!(ccw, start);
        prop_assert_eq!(start.rotated_cw().rotated_ccw(), start);
    }

    #[test]
    fn prop_shape_is_four_distinct_cells(kind in any_kind(), rot in any_rotation(), x in 0i8..10, y in 0i8..20) {
        let coords = Tetromino::new(kind, x, y, rot).coords();
        for i in 0..4 {
            for j in (i + 1)..4 {
                prop_assert_ne!(coords[i], coords[j]);
            }
        }
        // Translation does not change the shape.
        let moved = Tetromino::new(kind, x + 1, y + 1, rot).coords();
        for i in 0..4 {
            prop_assert_eq!((coords[i].0 + 1, coords[i].1 + 1), moved[i]);
        }
    }

    #[test]
    fn prop_ghost_is_idempotent(kind in any_kind(), rot in any_rotation(), x in 0i8..8, seed in any::<u32>()) {
        let mut board = Board::new();
        let mut rng = SimpleRng::new(seed);
        // Scatter some junk in the bottom half.
        for _ in 0..30 {
            let cx = rng.next_range(BOARD_WIDTH as u32) as i8;
            let cy = 10 + rng.next_range(10) as i8;
            board.set(cx, cy, Some(PieceKind::Z));
        }

        let piece = Tetromino::new(kind, x, 0, rot);
        prop_assume!(board.is_valid_position(&piece));

        let ghost = piece.ghost(&board);
        prop_assert!(board.is_valid_position(&ghost));
        prop_assert!(ghost.is_grounded(&board));
        prop_assert_eq!(ghost.ghost(&board), ghost);
        prop_assert_eq!((ghost.x, ghost.rotation), (piece.x, piece.rotation));
    }
}
