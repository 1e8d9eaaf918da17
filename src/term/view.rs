//! Maps a `Game` into a framebuffer. Pure, unit-testable.
//!
//! Layout: bordered playfield centered vertically on the left, side panel
//! with statistics and the next-piece preview to its right. Board cells
//! are two characters wide to compensate for terminal glyph aspect.

use crate::core::piece::rotation_states;
use crate::core::Game;
use crate::term::fb::{FrameBuffer, Glyph, Rgb};
use crate::types::{GamePhase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Width of one board cell in terminal columns.
const CELL_W: u16 = 2;

const PANEL_GAP: u16 = 3;

fn kind_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(0, 255, 255),
        PieceKind::O => Rgb::new(255, 255, 0),
        PieceKind::T => Rgb::new(128, 0, 128),
        PieceKind::S => Rgb::new(0, 255, 0),
        PieceKind::Z => Rgb::new(255, 0, 0),
        PieceKind::J => Rgb::new(64, 64, 255),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

/// Renders game state into frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameView;

impl GameView {
    /// Render one frame at the given terminal size.
    pub fn render(&self, game: &Game, width: u16, height: u16) -> FrameBuffer {
        let mut fb = FrameBuffer::new(width, height);

        let frame_w = BOARD_WIDTH as u16 * CELL_W + 2;
        let frame_h = BOARD_HEIGHT as u16 + 2;
        let origin_x = 1;
        let origin_y = height.saturating_sub(frame_h) / 2;

        self.draw_playfield(game, &mut fb, origin_x, origin_y);
        self.draw_panel(game, &mut fb, origin_x + frame_w + PANEL_GAP, origin_y + 1);
        self.draw_overlay(game, &mut fb, origin_x, origin_y, frame_w, frame_h);

        fb
    }

    fn draw_playfield(&self, game: &Game, fb: &mut FrameBuffer, x0: u16, y0: u16) {
        let border = Glyph::new('│', Rgb::new(180, 180, 180), Rgb::new(0, 0, 0));
        let w = BOARD_WIDTH as u16 * CELL_W;
        let h = BOARD_HEIGHT as u16;

        // Frame.
        fb.put(x0, y0, Glyph { ch: '┌', ..border });
        fb.put(x0 + w + 1, y0, Glyph { ch: '┐', ..border });
        fb.put(x0, y0 + h + 1, Glyph { ch: '└', ..border });
        fb.put(x0 + w + 1, y0 + h + 1, Glyph { ch: '┘', ..border });
        for dx in 1..=w {
            fb.put(x0 + dx, y0, Glyph { ch: '─', ..border });
            fb.put(x0 + dx, y0 + h + 1, Glyph { ch: '─', ..border });
        }
        for dy in 1..=h {
            fb.put(x0, y0 + dy, border);
            fb.put(x0 + w + 1, y0 + dy, border);
        }

        // Settled cells, with faint dots on empty ones.
        let empty = Glyph::new('·', Rgb::new(70, 70, 80), Rgb::new(20, 20, 28));
        for y in 0..BOARD_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                let glyph = match game.board().block_at(x, y) {
                    Some(kind) => {
                        Glyph::new('█', kind_color(kind), Rgb::new(20, 20, 28)).bold()
                    }
                    None => empty,
                };
                self.put_cell(fb, x0, y0, x as u16, y as u16, glyph);
            }
        }

        // The falling piece, clipped to the visible field.
        if let Some(piece) = game.active() {
            let glyph =
                Glyph::new('█', kind_color(piece.kind()), Rgb::new(20, 20, 28)).bold();
            for (x, y) in piece.block_positions() {
                if (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y) {
                    self.put_cell(fb, x0, y0, x as u16, y as u16, glyph);
                }
            }
        }
    }

    fn put_cell(&self, fb: &mut FrameBuffer, x0: u16, y0: u16, cx: u16, cy: u16, glyph: Glyph) {
        let px = x0 + 1 + cx * CELL_W;
        let py = y0 + 1 + cy;
        for dx in 0..CELL_W {
            fb.put(px + dx, py, glyph);
        }
    }

    fn draw_panel(&self, game: &Game, fb: &mut FrameBuffer, x: u16, y0: u16) {
        let label = Glyph::default().bold();
        let value = Glyph::default();
        let stats = game.stats();

        let mut y = y0;
        for (name, val) in [
            ("SCORE", stats.score),
            ("LEVEL", stats.level),
            ("LINES", stats.lines_cleared),
            ("PIECES", stats.pieces_placed),
        ] {
            fb.put_str(x, y, name, label);
            fb.put_str(x, y + 1, &val.to_string(), value);
            y += 3;
        }

        fb.put_str(x, y, "NEXT", label);
        if let Some(kind) = game.next_kind() {
            fb.put(x + 5, y, Glyph { ch: kind.letter(), ..value });
            let glyph = Glyph::new('█', kind_color(kind), Rgb::new(0, 0, 0));
            let [shape, ..] = rotation_states(kind);
            for (cx, cy) in shape.cells() {
                let px = x + cx as u16 * CELL_W;
                let py = y + 1 + cy as u16;
                fb.put(px, py, glyph);
                fb.put(px + 1, py, glyph);
            }
        }
    }

    fn draw_overlay(
        &self,
        game: &Game,
        fb: &mut FrameBuffer,
        x0: u16,
        y0: u16,
        frame_w: u16,
        frame_h: u16,
    ) {
        let text = match game.phase() {
            GamePhase::Menu => "ENTER TO START",
            GamePhase::Paused => "PAUSED",
            GamePhase::GameOver => "GAME OVER - R RESTARTS",
            GamePhase::Playing => return,
        };

        let banner = Glyph::new(' ', Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        let len = text.chars().count() as u16;
        let x = x0 + frame_w.saturating_sub(len) / 2;
        let y = y0 + frame_h / 2;
        fb.put_str(x, y, text, banner);
    }
}
