use std::time::Duration;

use termtris::core::{GameConfig, GameSnapshot, GameState, Phase, PieceView, Tetromino};
use termtris::term::{AnchorY, FrameBuffer, GameView, Rgb, Viewport};
use termtris::types::{PieceKind, Rotation};

fn contains(fb: &FrameBuffer, needle: &str) -> bool {
    (0..fb.height()).any(|y| fb.row_text(y).contains(needle))
}

fn row_of(fb: &FrameBuffer, needle: &str) -> Option<u16> {
    (0..fb.height()).find(|&y| fb.row_text(y).contains(needle))
}

fn quiet_snapshot() -> GameSnapshot {
    let mut snap = GameState::new(GameConfig::default().seed(1)).snapshot();
    snap.active = None;
    snap.ghost = None;
    snap
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::new(GameConfig::default().seed(1)).snapshot();
    let view = GameView::default();

    // cell_w=2, cell_h=1: 20x20 well plus border => 22x22.
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = quiet_snapshot();
    snap.board[19][0] = Some(PieceKind::I);

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    let (x0, y0) = (1, 1 + 19);
    assert_eq!(fb.get(x0, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 1, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 2, y0).unwrap().ch, '·');

    let cyan = Rgb::new(0, 255, 255);
    assert_eq!(fb.get(x0, y0).unwrap().style.fg, cyan);
}

#[test]
fn term_view_draws_ghost_below_active() {
    let mut snap = quiet_snapshot();
    let piece = Tetromino::new(PieceKind::O, 3, 0, Rotation::North);
    snap.active = Some(PieceView::from(piece));
    snap.ghost = Some(PieceView::from(piece.moved(0, 18)));

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // O occupies columns 4 and 5.
    assert_eq!(fb.get(1 + 4 * 2, 1).unwrap().ch, '█');
    assert_eq!(fb.get(1 + 4 * 2, 1 + 18).unwrap().ch, '░');
    assert_eq!(fb.get(1 + 5 * 2 + 1, 1 + 19).unwrap().ch, '░');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = quiet_snapshot();
    snap.score = 1234;
    snap.level = 2;
    snap.lines = 10;
    snap.elapsed = Duration::from_secs(125);
    snap.next = PieceKind::T;
    snap.held = Some(PieceKind::I);

    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(40, 24));

    for label in ["SCORE", "LEVEL", "LINES", "TIME", "NEXT", "HOLD"] {
        assert!(contains(&fb, label), "missing {label}");
    }
    assert!(contains(&fb, "1234"));
    assert!(contains(&fb, "02:05"));

    let score_row = row_of(&fb, "SCORE").unwrap();
    assert!(fb.row_text(score_row + 1).contains("1234"));
}

#[test]
fn term_view_dims_hold_when_used() {
    let mut snap = quiet_snapshot();
    snap.held = Some(PieceKind::Z);

    let view = GameView::default();
    let vp = Viewport::new(40, 24);

    snap.can_hold = true;
    let fb = view.render(&snap, vp);
    let y = row_of(&fb, "HOLD").unwrap();
    let x = fb.row_text(y).chars().position(|c| c == 'H').unwrap() as u16;
    assert!(!fb.get(x, y).unwrap().style.dim);

    snap.can_hold = false;
    let fb = view.render(&snap, vp);
    assert!(fb.get(x, y).unwrap().style.dim);
}

#[test]
fn term_view_overlays() {
    let view = GameView::default();
    let vp = Viewport::new(40, 24);
    let mut snap = quiet_snapshot();

    snap.phase = Phase::Paused;
    assert!(contains(&view.render(&snap, vp), "PAUSED"));

    snap.phase = Phase::GameOver;
    let fb = view.render(&snap, vp);
    assert!(contains(&fb, "GAME OVER"));
    assert!(!contains(&fb, "PAUSED"));
}

#[test]
fn term_view_render_into_reuses_buffer() {
    let snap = GameState::new(GameConfig::default().seed(4)).snapshot();
    let view = GameView::default();
    let vp = Viewport::new(40, 24);

    let mut fb = FrameBuffer::new(1, 1);
    view.render_into(&snap, vp, &mut fb);
    assert_eq!((fb.width(), fb.height()), (40, 24));
    assert_eq!(fb, view.render(&snap, vp));
}
