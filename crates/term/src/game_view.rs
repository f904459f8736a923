//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Board row 0 is the bottom of the well, so rows are flipped on the way to
//! the screen: board row 21 is drawn on the first line inside the frame.

use crate::core::GameSnapshot;
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

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

const WELL_BG: Rgb = Rgb::new(30, 30, 40);

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2, cell_h: 1 }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Top-left corner of the well frame for a viewport.
    fn origin(&self, viewport: Viewport) -> (u16, u16, u16, u16) {
        let frame_w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let frame_h = (BOARD_HEIGHT as u16) * self.cell_h + 2;
        let x = viewport.width.saturating_sub(frame_w) / 2;
        let y = viewport.height.saturating_sub(frame_h) / 2;
        (x, y, frame_w, frame_h)
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse one framebuffer across frames; it is resized to the
    /// viewport and cleared first.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear();

        let (start_x, start_y, frame_w, frame_h) = self.origin(viewport);

        self.draw_border(fb, start_x, start_y, frame_w, frame_h);

        for row in 0..BOARD_HEIGHT as i8 {
            for col in 0..BOARD_WIDTH as i8 {
                match PieceKind::from_color(snap.color_at(col, row)) {
                    Some(kind) => self.draw_block(fb, start_x, start_y, col, row, kind),
                    None => self.draw_empty(fb, start_x, start_y, col, row),
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x + frame_w + 2, start_y);

        if snap.game_over {
            let mid = start_y + frame_h / 2;
            self.draw_centered(fb, start_x, frame_w, mid, "GAME OVER");
            self.draw_centered(fb, start_x, frame_w, mid + 1, "r: restart");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        let style = Style::fg(Rgb::new(200, 200, 200));
        fb.put(x, y, '┌', style);
        fb.put(x + w - 1, y, '┐', style);
        fb.put(x, y + h - 1, '└', style);
        fb.put(x + w - 1, y + h - 1, '┘', style);
        for dx in 1..w - 1 {
            fb.put(x + dx, y, '─', style);
            fb.put(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put(x, y + dy, '│', style);
            fb.put(x + w - 1, y + dy, '│', style);
        }
    }

    /// Screen position of the top-left glyph of board cell `(col, row)`.
    fn cell_origin(&self, start_x: u16, start_y: u16, col: i8, row: i8) -> (u16, u16) {
        let screen_row = (BOARD_HEIGHT as i8 - 1 - row) as u16;
        (
            start_x + 1 + col as u16 * self.cell_w,
            start_y + 1 + screen_row * self.cell_h,
        )
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, col: i8, row: i8) {
        let (px, py) = self.cell_origin(start_x, start_y, col, row);
        let style = Style::fg(Rgb::new(90, 90, 100)).on(WELL_BG);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        fb.put(px, py, '·', style);
    }

    fn draw_block(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        col: i8,
        row: i8,
        kind: PieceKind,
    ) {
        let (px, py) = self.cell_origin(start_x, start_y, col, row);
        let style = Style::fg(kind_color(kind)).on(WELL_BG).bold();
        fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x.saturating_add(8) > viewport.width {
            return;
        }

        let label = Style::default().bold();
        let value = Style::fg(Rgb::new(200, 200, 200));

        let mut y = start_y;
        for (name, v) in [("SCORE", snap.score), ("LINES", snap.lines), ("LEVEL", snap.level)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, v, value);
            y += 3;
        }

        fb.put_str(panel_x, y, "NEXT", label);
        match snap.next_kind() {
            Some(kind) => {
                let style = Style::fg(kind_color(kind)).bold();
                fb.put(panel_x, y + 1, kind.letter(), style);
            }
            None => fb.put(panel_x, y + 1, '-', value),
        }
    }

    fn draw_centered(&self, fb: &mut FrameBuffer, start_x: u16, frame_w: u16, y: u16, text: &str) {
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = Style::fg(Rgb::new(255, 255, 255)).bold();
        fb.put_str(x, y, text, style);
    }
}

/// Display color of a piece kind.
pub fn kind_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::I => Rgb::new(80, 220, 220),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, GameState};
    use crate::types::Command;

    fn block_count(fb: &FrameBuffer) -> usize {
        (0..fb.height())
            .map(|y| fb.row_text(y).chars().filter(|&c| c == '█').count())
            .sum()
    }

    #[test]
    fn renders_active_piece_near_top_of_well() {
        let mut game = GameState::new();
        game.restart();
        let view = GameView::default();
        let vp = Viewport::new(60, 30);
        let fb = view.render(&game.snapshot(), vp);

        // 4 cells, 2 glyphs wide each.
        assert_eq!(block_count(&fb), 8);

        // The L spawns on rows 20 and 19; row 21 is the first line inside the frame.
        let (_, start_y, _, _) = view.origin(vp);
        assert!(!fb.row_text(start_y + 1).contains('█'));
        assert!(fb.row_text(start_y + 2).contains('█'));
        assert!(fb.row_text(start_y + 3).contains('█'));
        assert!(!fb.row_text(start_y + 4).contains('█'));
    }

    #[test]
    fn renders_locked_cells_at_bottom() {
        let board = Board::from_rows(&["#########."]);
        let game = GameState::from_parts(board, PieceKind::O);
        let view = GameView::default();
        let vp = Viewport::new(60, 30);
        let fb = view.render(&game.snapshot(), vp);

        let (_, start_y, _, frame_h) = view.origin(vp);
        let bottom = fb.row_text(start_y + frame_h - 2);
        assert_eq!(bottom.chars().filter(|&c| c == '█').count(), 18);
    }

    #[test]
    fn shows_game_over_overlay_and_panel() {
        let mut game = GameState::new();
        let view = GameView::default();
        let fb = view.render(&game.snapshot(), Viewport::new(60, 30));
        let text: String = (0..fb.height()).map(|y| fb.row_text(y)).collect();
        assert!(text.contains("GAME OVER"));

        game.restart();
        game.apply_input(Command::HardDrop);
        let fb = view.render(&game.snapshot(), Viewport::new(60, 30));
        let text: String = (0..fb.height()).map(|y| fb.row_text(y)).collect();
        assert!(!text.contains("GAME OVER"));
        assert!(text.contains("SCORE"));
        assert!(text.contains("NEXT"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let mut game = GameState::new();
        game.restart();
        let fb = GameView::default().render(&game.snapshot(), Viewport::new(5, 3));
        assert_eq!((fb.width(), fb.height()), (5, 3));
    }
}
