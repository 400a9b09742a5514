//! GameView: draws a [`GameSnapshot`] into a framebuffer.
//!
//! Pure, no I/O. Layout: the bordered play area is centered horizontally,
//! each board cell `cell_w` columns wide and one row tall, with a side panel
//! to the right when the viewport leaves room for it.

use crate::core::GameSnapshot;
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{PieceKind, BOARD_COLS, BOARD_ROWS};

const PLAY_BG: Rgb = Rgb::new(24, 24, 32);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

/// Narrowest side panel worth drawing
const MIN_PANEL_W: u16 = 14;

const KEY_HELP: [(&str, &str); 6] = [
    ("h a \u{2190}", "left"),
    ("l d \u{2192}", "right"),
    ("k w \u{2191}", "rotate"),
    ("j s \u{2193}", "down"),
    ("space", "drop"),
    ("q esc", "quit"),
];

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
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Placement of the board frame inside the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    /// Terminal columns per board cell
    cell_w: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps blocks roughly square.
        Self::new(2)
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn cell_w(&self) -> u16 {
        self.cell_w
    }

    /// Outer size of the bordered play area
    pub fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_COLS as u16 * self.cell_w + 2,
            BOARD_ROWS as u16 + 2,
        )
    }

    fn frame(&self, viewport: Viewport) -> Frame {
        let (w, h) = self.frame_size();
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y,
            w,
            h,
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// Reusing one framebuffer across frames keeps drawing allocation-free.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Style::new(Rgb::new(220, 220, 220), SCREEN_BG).glyph(' '));

        let frame = self.frame(viewport);
        self.draw_border(fb, frame);

        for y in 0..BOARD_ROWS as i8 {
            if snap.flash_row == Some(y as u8) {
                self.draw_flash_row(fb, frame, y as u16);
                continue;
            }
            for x in 0..BOARD_COLS as i8 {
                match snap.visible_cell(x, y) {
                    Some(kind) => self.draw_block(fb, frame, x as u16, y as u16, kind),
                    None => self.draw_empty(fb, frame, x as u16, y as u16),
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.game_over {
            self.draw_banner(fb, frame, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, f: Frame) {
        let style = Style::new(Rgb::new(190, 190, 200), SCREEN_BG);
        let right = f.x + f.w - 1;
        let bottom = f.y + f.h - 1;

        fb.put_char(f.x, f.y, '\u{250c}', style);
        fb.put_char(right, f.y, '\u{2510}', style);
        fb.put_char(f.x, bottom, '\u{2514}', style);
        fb.put_char(right, bottom, '\u{2518}', style);
        fb.fill_rect(f.x + 1, f.y, f.w - 2, 1, '\u{2500}', style);
        fb.fill_rect(f.x + 1, bottom, f.w - 2, 1, '\u{2500}', style);
        fb.fill_rect(f.x, f.y + 1, 1, f.h - 2, '\u{2502}', style);
        fb.fill_rect(right, f.y + 1, 1, f.h - 2, '\u{2502}', style);
    }

    /// Top-left terminal position of board cell (x, y)
    fn cell_origin(&self, f: Frame, x: u16, y: u16) -> (u16, u16) {
        (f.x + 1 + x * self.cell_w, f.y + 1 + y)
    }

    fn draw_block(&self, fb: &mut FrameBuffer, f: Frame, x: u16, y: u16, kind: PieceKind) {
        let (px, py) = self.cell_origin(f, x, y);
        let style = Style::new(kind_color(kind), PLAY_BG).bold();
        fb.fill_rect(px, py, self.cell_w, 1, '\u{2588}', style);
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, f: Frame, x: u16, y: u16) {
        let (px, py) = self.cell_origin(f, x, y);
        let style = Style::new(Rgb::new(70, 70, 84), PLAY_BG);
        fb.fill_rect(px, py, self.cell_w, 1, ' ', style);
        fb.put_char(px, py, '\u{00b7}', style);
    }

    fn draw_flash_row(&self, fb: &mut FrameBuffer, f: Frame, y: u16) {
        let (px, py) = self.cell_origin(f, 0, y);
        let style = Style::new(Rgb::new(255, 255, 255), Rgb::new(200, 200, 210));
        fb.fill_rect(px, py, BOARD_COLS as u16 * self.cell_w, 1, '\u{2591}', style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, vp: Viewport, f: Frame) {
        let x = f.x.saturating_add(f.w).saturating_add(2);
        if x >= vp.width || vp.width - x < MIN_PANEL_W {
            return;
        }

        let label = Style::new(Rgb::new(230, 230, 230), SCREEN_BG).bold();
        let value = Style::new(Rgb::new(200, 200, 200), SCREEN_BG);
        let hint = Style::new(Rgb::new(140, 140, 150), SCREEN_BG);

        let mut y = f.y;
        fb.put_str(x, y, "TETRISH", label);
        y += 2;

        fb.put_str(x, y, "PIECES", label);
        fb.put_u32(x, y + 1, snap.pieces_locked, value);
        y += 3;

        fb.put_str(x, y, "ROWS", label);
        fb.put_u32(x, y + 1, snap.rows_cleared, value);
        y += 3;

        if let Some(active) = snap.active {
            fb.put_str(x, y, "PIECE", label);
            fb.put_char(x, y + 1, active.shape.kind().letter(), value);
            fb.put_str(x + 2, y + 1, active.shape.name(), hint);
            y += 3;
        }

        fb.put_str(x, y, "KEYS", label);
        y += 1;
        for (keys, what) in KEY_HELP {
            if y >= vp.height {
                break;
            }
            fb.put_str(x, y, keys, value);
            fb.put_str(x + 8, y, what, hint);
            y += 1;
        }
    }

    fn draw_banner(&self, fb: &mut FrameBuffer, f: Frame, text: &str) {
        let style = Style::new(Rgb::new(255, 255, 255), Rgb::new(160, 30, 30)).bold();
        let text_w = text.chars().count() as u16 + 2;
        let x = f.x + f.w.saturating_sub(text_w) / 2;
        let y = f.y + f.h / 2;
        fb.fill_rect(x, y, text_w, 1, ' ', style);
        fb.put_str(x + 1, y, text, style);
    }
}

/// Block color per label
pub fn kind_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::O => Rgb::new(240, 210, 70),
        PieceKind::Z => Rgb::new(220, 70, 70),
        PieceKind::S => Rgb::new(90, 210, 110),
        PieceKind::I => Rgb::new(70, 210, 220),
        PieceKind::T => Rgb::new(190, 110, 220),
        PieceKind::L => Rgb::new(250, 150, 40),
        PieceKind::J => Rgb::new(70, 110, 220),
    }
}
