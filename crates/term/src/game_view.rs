//! GameView: maps a game snapshot and the session screen into a framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, CATALOG};
use crate::fb::{color_rgb, CellStyle, FrameBuffer, Rgb, BONUS_RGB};
use crate::session::{format_padded, FlowState, ScoreHistory, ScoreStore, Session};
use crate::types::{zone_color_for, Color, BOARD_HEIGHT, BOARD_WIDTH, NAME_LEN};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_LABEL: CellStyle = CellStyle::fg(Rgb::new(220, 220, 220)).bold();
const PANEL_VALUE: CellStyle = CellStyle::fg(Rgb::new(200, 200, 200));
const PAD_DIGITS: CellStyle = CellStyle::fg(Rgb::new(0x65, 0x65, 0x65));
const SIGNIFICANT_DIGITS: CellStyle = CellStyle::fg(BONUS_RGB).bold();
const OVERLAY_TEXT: CellStyle = CellStyle::fg(Rgb::new(255, 255, 255)).bold();

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

/// Everything the view needs from the presentation flow.
#[derive(Debug, Clone, Copy)]
pub struct ScreenView<'a> {
    pub state: FlowState,
    /// Seconds left in the intro
    pub countdown: Option<u32>,
    pub showing_scoreboard: bool,
    /// Name typed so far on the name entry screen
    pub name: &'a str,
    /// Final score and lines of the last game
    pub last_result: Option<(u32, u32)>,
    pub history: &'a ScoreHistory,
}

impl<'a> ScreenView<'a> {
    pub fn from_session<S: ScoreStore>(session: &'a Session<S>) -> Self {
        let flow = session.flow();
        Self {
            state: flow.state(),
            countdown: flow.countdown(),
            showing_scoreboard: flow.showing_scoreboard(),
            name: flow.name(),
            last_result: session.last_result(),
            history: session.history(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Board layout in framebuffer coordinates
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl Frame {
    fn center_x(&self) -> u16 {
        self.x.saturating_add(self.w / 2)
    }

    fn mid_y(&self) -> u16 {
        self.y.saturating_add(self.h / 2)
    }
}

/// A lightweight terminal view of the game.
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

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render a session: its game snapshot plus the current screen overlay.
    pub fn render_session_into<S: ScoreStore>(
        &self,
        session: &Session<S>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        let snap = session.game().snapshot();
        let screen = ScreenView::from_session(session);
        self.render_into(&snap, Some(&screen), viewport, fb);
    }

    /// Render into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        screen: Option<&ScreenView<'_>>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame = Frame {
            x: 0,
            y: 0,
            w: board_px_w + 2,
            h: board_px_h + 2,
        };
        let frame = Frame {
            x: viewport.width.saturating_sub(frame.w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame.h) / 2,
                AnchorY::Top => 0,
            },
            ..frame
        };

        self.draw_border(fb, frame);

        // Locked board cells, or the zone-tinted grid where empty.
        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                match snap.board[y as usize][x as usize] {
                    Some(cell) => {
                        let fg = if cell.bonus { BONUS_RGB } else { color_rgb(cell.color) };
                        self.draw_block(fb, frame, x, y, fg);
                    }
                    None => self.draw_empty_cell(fb, frame, x, y),
                }
            }
        }

        for cell in snap.active_cells() {
            if cell.x < 0 || cell.x >= BOARD_WIDTH as i8 || cell.y < 0 || cell.y >= BOARD_HEIGHT as i8 {
                continue;
            }
            let fg = if snap.bonus.active { BONUS_RGB } else { color_rgb(cell.color) };
            self.draw_block(fb, frame, cell.x as u16, cell.y as u16, fg);
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        match screen {
            Some(screen) => self.draw_screen(fb, frame, snap, screen),
            None if snap.game_over => {
                self.draw_overlay_box(fb, frame, 3);
                fb.put_centered(frame.center_x(), frame.mid_y(), "GAME OVER", OVERLAY_TEXT);
            }
            None => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, None, viewport, &mut fb);
        fb
    }

    /// Border with each zone's stretch drawn in the zone color.
    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        let left = CellStyle::fg(color_rgb(Color::Red));
        let right = CellStyle::fg(color_rgb(Color::Green));
        fb.put_char(x, y, '┏', left);
        fb.put_char(x, y + h - 1, '┗', left);
        fb.put_char(x + w - 1, y, '┓', right);
        fb.put_char(x + w - 1, y + h - 1, '┛', right);

        for dx in 1..w - 1 {
            let column = ((dx - 1) / self.cell_w.max(1)) as i8;
            let style = CellStyle::fg(color_rgb(zone_color_for(column)));
            fb.put_char(x + dx, y, '━', style);
            fb.put_char(x + dx, y + h - 1, '━', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '┃', left);
            fb.put_char(x + w - 1, y + dy, '┃', right);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16) {
        let tint = color_rgb(zone_color_for(x as i8)).scaled(35);
        let style = CellStyle {
            fg: tint,
            bg: BOARD_BG,
            bold: false,
            dim: true,
        };
        self.fill_cell_rect(fb, frame, x, y, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, fg: Rgb) {
        let style = CellStyle::fg(fg).on(BOARD_BG).bold();
        self.fill_cell_rect(fb, frame, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x + 1 + cell_x * self.cell_w;
        let py = frame.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", PANEL_LABEL);
        y += 1;
        put_padded(fb, panel_x, y, snap.score, 7);
        y += 2;

        fb.put_str(panel_x, y, "LEVEL", PANEL_LABEL);
        y += 1;
        fb.put_u32(panel_x, y, snap.level, PANEL_VALUE);
        y += 2;

        fb.put_str(panel_x, y, "LINES", PANEL_LABEL);
        y += 1;
        put_padded(fb, panel_x, y, snap.lines, 3);
        y += 2;

        fb.put_str(panel_x, y, "PIECES", PANEL_LABEL);
        y += 1;
        let end = fb.put_u32(panel_x, y, snap.good_pieces, CellStyle::fg(color_rgb(Color::Green)));
        let end = fb.put_str(end, y, " / ", PANEL_VALUE);
        fb.put_u32(end, y, snap.bad_pieces, CellStyle::fg(color_rgb(Color::Gray)));
        y += 2;

        fb.put_str(panel_x, y, "NEXT", PANEL_LABEL);
        y += 1;
        if let Some(def) = snap.next.and_then(|i| CATALOG.get(i)) {
            // Anchor one cell in so bars (offset -1) stay inside the panel.
            for (i, &(dx, dy)) in def.cells_at(0).iter().enumerate() {
                let fg = color_rgb(def.color_for_cell(i, 0));
                let cx = panel_x + ((dx + 1) as u16) * 2;
                let cy = (y as i32 + 1 + dy as i32) as u16;
                fb.put_str(cx, cy, "██", CellStyle::fg(fg));
            }
        }
        y += 4;

        let bonus = snap.bonus;
        if bonus.active {
            fb.put_str(panel_x, y, "BONUS!", CellStyle::fg(BONUS_RGB).bold());
        } else {
            fb.put_str(panel_x, y, "POWER", PANEL_LABEL);
        }
        y += 1;
        let fraction = if bonus.active {
            bonus.remaining_fraction
        } else {
            bonus.progress
        };
        fb.put_gauge(
            panel_x,
            y,
            10.min(panel_w),
            fraction,
            CellStyle::fg(BONUS_RGB),
            CellStyle::fg(BONUS_RGB.scaled(30)),
        );
    }

    fn draw_screen(&self, fb: &mut FrameBuffer, frame: Frame, snap: &GameSnapshot, screen: &ScreenView<'_>) {
        let cx = frame.center_x();
        let mid = frame.mid_y();

        match screen.state {
            FlowState::Idle if screen.showing_scoreboard => self.draw_scoreboard(fb, frame, screen.history),
            FlowState::Idle => {
                self.draw_overlay_box(fb, frame, 5);
                fb.put_centered(cx, mid - 1, "ZONEFALL", CellStyle::fg(BONUS_RGB).bold());
                fb.put_centered(cx, mid + 1, "PRESS ANY KEY", PANEL_VALUE);
            }
            FlowState::Intro => {
                self.draw_overlay_box(fb, frame, 3);
                match screen.countdown {
                    Some(n) if n > 0 => {
                        fb.put_u32(cx, mid, n, OVERLAY_TEXT);
                    }
                    _ => fb.put_centered(cx, mid, "GO!", OVERLAY_TEXT),
                }
            }
            FlowState::Playing => {
                if snap.game_over {
                    self.draw_overlay_box(fb, frame, 3);
                    fb.put_centered(cx, mid, "GAME OVER", OVERLAY_TEXT);
                }
            }
            FlowState::GameOver => {
                let (score, lines) = screen.last_result.unwrap_or((snap.score, snap.lines));
                self.draw_overlay_box(fb, frame, 7);
                fb.put_centered(cx, mid - 2, "GAME OVER", OVERLAY_TEXT);
                let x = cx.saturating_sub(5);
                fb.put_str(x, mid, "SCORE", PANEL_LABEL);
                put_padded(fb, x + 6, mid, score, 4);
                fb.put_str(x, mid + 1, "LINES", PANEL_LABEL);
                put_padded(fb, x + 6, mid + 1, lines, 3);
            }
            FlowState::NameEntry => {
                self.draw_overlay_box(fb, frame, 7);
                fb.put_centered(cx, mid - 2, "ENTER NAME", OVERLAY_TEXT);
                let x = cx.saturating_sub(NAME_LEN as u16);
                let mut chars = screen.name.chars();
                for i in 0..NAME_LEN as u16 {
                    let ch = chars.next().unwrap_or('_');
                    fb.put_char(x + i * 2, mid, ch, SIGNIFICANT_DIGITS);
                }
                fb.put_centered(cx, mid + 2, "ENTER = OK", PANEL_VALUE);
            }
            FlowState::Scoreboard => self.draw_scoreboard(fb, frame, screen.history),
        }
    }

    /// Ranked scores inside the board frame.
    fn draw_scoreboard(&self, fb: &mut FrameBuffer, frame: Frame, history: &ScoreHistory) {
        let interior = CellStyle::default();
        fb.fill_rect(frame.x + 1, frame.y + 1, frame.w.saturating_sub(2), frame.h.saturating_sub(2), ' ', interior);
        fb.put_centered(frame.center_x(), frame.y + 2, "HIGH SCORES", CellStyle::fg(BONUS_RGB).bold());

        let ranked = history.ranked();
        if ranked.is_empty() {
            fb.put_centered(frame.center_x(), frame.mid_y(), "NO SCORES YET", PANEL_VALUE);
            return;
        }

        let x = frame.x + 2;
        for (i, entry) in ranked.iter().enumerate() {
            let y = frame.y + 4 + i as u16;
            if y + 1 >= frame.y + frame.h {
                break;
            }
            let end = put_padded(fb, x, y, i as u32 + 1, 2);
            let end = put_padded(fb, end + 1, y, entry.score, 7);
            let end = put_padded(fb, end + 1, y, entry.lines, 3);
            fb.put_str(end + 1, y, &entry.name, PANEL_LABEL);
        }
    }

    /// Blank a band of `rows` rows across the board center for overlay text.
    fn draw_overlay_box(&self, fb: &mut FrameBuffer, frame: Frame, rows: u16) {
        let top = frame.mid_y().saturating_sub(rows / 2);
        fb.fill_rect(frame.x + 1, top, frame.w.saturating_sub(2), rows, ' ', CellStyle::default());
    }
}

/// Zero-padded number: padding in gray, significant digits highlighted.
fn put_padded(fb: &mut FrameBuffer, x: u16, y: u16, value: u32, width: usize) -> u16 {
    let (pad, digits) = format_padded(value, width);
    let end = fb.put_str(x, y, &pad, PAD_DIGITS);
    fb.put_str(end, y, &digits, SIGNIFICANT_DIGITS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CellView, GameSnapshot};

    fn frame_origin(view: &GameView, vp: Viewport) -> (u16, u16) {
        let w = BOARD_WIDTH as u16 * view.cell_w + 2;
        let h = BOARD_HEIGHT as u16 * view.cell_h + 2;
        (vp.width.saturating_sub(w) / 2, vp.height.saturating_sub(h) / 2)
    }

    #[test]
    fn border_segments_use_zone_colors() {
        let view = GameView::default();
        let vp = Viewport::new(60, 24);
        let fb = view.render(&GameSnapshot::default(), vp);
        let (x0, y0) = frame_origin(&view, vp);

        let red = fb.get(x0 + 1, y0).unwrap();
        let blue = fb.get(x0 + 1 + 4 * 2, y0).unwrap();
        let green = fb.get(x0 + 1 + 8 * 2, y0).unwrap();
        assert_eq!(red.style.fg, color_rgb(Color::Red));
        assert_eq!(blue.style.fg, color_rgb(Color::Blue));
        assert_eq!(green.style.fg, color_rgb(Color::Green));
    }

    #[test]
    fn bonus_cells_draw_in_bonus_color() {
        let view = GameView::default();
        let vp = Viewport::new(60, 24);
        let mut snap = GameSnapshot::default();
        snap.board[19][0] = Some(CellView {
            color: Color::Red,
            bonus: true,
        });
        snap.board[19][1] = Some(CellView {
            color: Color::Red,
            bonus: false,
        });
        let fb = view.render(&snap, vp);
        let (x0, y0) = frame_origin(&view, vp);

        let bonus = fb.get(x0 + 1, y0 + 20).unwrap();
        let plain = fb.get(x0 + 3, y0 + 20).unwrap();
        assert_eq!(bonus.ch, '█');
        assert_eq!(bonus.style.fg, BONUS_RGB);
        assert_eq!(plain.style.fg, color_rgb(Color::Red));
    }

    #[test]
    fn score_padding_is_gray_and_digits_highlighted() {
        let mut fb = FrameBuffer::new(10, 1);
        let end = put_padded(&mut fb, 0, 0, 420, 7);
        assert_eq!(end, 7);
        assert_eq!(fb.get(0, 0).unwrap().style, PAD_DIGITS);
        assert_eq!(fb.get(4, 0).unwrap().ch, '4');
        assert_eq!(fb.get(4, 0).unwrap().style, SIGNIFICANT_DIGITS);
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let view = GameView::default();
        let fb = view.render(&GameSnapshot::default(), Viewport::new(5, 3));
        assert_eq!(fb.width(), 5);
    }
}
