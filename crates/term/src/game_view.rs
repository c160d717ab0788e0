//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{get_shape, piece_color, GameSnapshot, PieceView};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Whether this viewport is at least as large as `needed` in both directions.
    pub fn fits(&self, needed: Viewport) -> bool {
        self.width >= needed.width && self.height >= needed.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Renders the board, side panel and overlays.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Where the bordered well sits inside the viewport.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Columns and rows needed to show the well plus the side panel.
    pub fn min_viewport(&self) -> Viewport {
        let frame_w = BOARD_WIDTH as u16 * self.cell_w + 2;
        let frame_h = BOARD_HEIGHT as u16 * self.cell_h + 2;
        Viewport::new(frame_w + 2 + PANEL_MIN_W, frame_h)
    }

    /// Render into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let board_px_w = BOARD_WIDTH as u16 * self.cell_w;
        let board_px_h = BOARD_HEIGHT as u16 * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;
        let total_w = frame_w + 2 + PANEL_MIN_W;

        let frame = Frame {
            x: viewport.width.saturating_sub(total_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
            w: frame_w,
            h: frame_h,
        };

        let bg = CellStyle::plain(Rgb::new(80, 80, 90), WELL_BG);
        let border = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);

        fb.fill_rect(frame.x + 1, frame.y + 1, board_px_w, board_px_h, ' ', bg);
        draw_border(fb, frame, border);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(kind) => self.draw_board_cell(fb, frame, x as i8, y as i8, *kind, false),
                    None => self.draw_empty_cell(fb, frame, x as i8, y as i8),
                }
            }
        }

        if let Some(ghost) = snap.ghost {
            let color = Rgb::from(piece_color(ghost.kind)).scaled(3, 5);
            let style = CellStyle::plain(color, WELL_BG).dim();
            for &(x, y) in ghost.coords.iter() {
                self.fill_cell(fb, frame, x, y, '░', style);
            }
        }

        if let Some(active) = snap.active {
            self.draw_piece(fb, frame, &active);
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.paused() {
            draw_overlay_text(fb, frame, "PAUSED");
        } else if snap.game_over() {
            draw_overlay_text(fb, frame, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_piece(&self, fb: &mut FrameBuffer, frame: Frame, piece: &PieceView) {
        for &(x, y) in piece.coords.iter() {
            self.draw_board_cell(fb, frame, x, y, piece.kind, true);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: i8, y: i8) {
        let style = CellStyle::plain(Rgb::new(90, 90, 100), WELL_BG).dim();
        self.fill_cell(fb, frame, x, y, '·', style);
    }

    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        x: i8,
        y: i8,
        kind: PieceKind,
        active: bool,
    ) {
        let mut style = CellStyle::plain(piece_color(kind).into(), WELL_BG);
        if active {
            style = style.bold();
        }
        self.fill_cell(fb, frame, x, y, '█', style);
    }

    /// Paint one board cell; coordinates outside the grid are skipped.
    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: i8, y: i8, ch: char, style: CellStyle) {
        if x < 0 || y < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return;
        }
        let px = frame.x + 1 + x as u16 * self.cell_w;
        let py = frame.y + 1 + y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_W {
            return;
        }

        let label = CellStyle::plain(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = frame.y;
        for (name, n) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "TIME", label);
        fb.put_clock(panel_x, y + 1, snap.elapsed.as_secs(), value);
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "NEXT", label);
        self.draw_preview(fb, panel_x, y + 1, Some(snap.next), false);
        y = y.saturating_add(4);

        let hold_label = if snap.can_hold { label } else { label.dim() };
        fb.put_str(panel_x, y, "HOLD", hold_label);
        if snap.held.is_none() {
            fb.put_str(panel_x, y + 1, "-", value);
        }
        self.draw_preview(fb, panel_x, y + 1, snap.held, !snap.can_hold);
    }

    /// Two-row preview of `kind` in its spawn rotation, packed to the top-left.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: Option<PieceKind>, dim: bool) {
        let Some(kind) = kind else {
            return;
        };
        let shape = get_shape(kind, Rotation::North);
        let min_dx = shape.iter().map(|&(dx, _)| dx).min().unwrap_or(0);
        let min_dy = shape.iter().map(|&(_, dy)| dy).min().unwrap_or(0);

        let mut color: Rgb = piece_color(kind).into();
        if dim {
            color = color.scaled(2, 5);
        }
        let mut style = CellStyle::plain(color, PANEL_BG);
        if dim {
            style = style.dim();
        }
        for &(dx, dy) in shape.iter() {
            let px = x + (dx - min_dx) as u16 * self.cell_w;
            let py = y + (dy - min_dy) as u16;
            fb.fill_rect(px, py, self.cell_w, 1, '█', style);
        }
    }
}

/// Narrowest side panel worth drawing ("SCORE" plus a 4-wide preview).
const PANEL_MIN_W: u16 = 10;

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, frame: Frame, text: &str) {
    let mid_y = frame.y.saturating_add(frame.h / 2);
    let text_w = text.chars().count() as u16;
    let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
    let style = CellStyle::plain(Rgb::new(255, 255, 255), PANEL_BG).bold();
    fb.put_str(x, mid_y, text, style);
}
