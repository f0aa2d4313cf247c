//! GameView: projects the engine's query surface into a [`Frame`].
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{Game, PieceSource, Scoring, Timer};
use crate::frame::{Frame, Glyph};
use crate::types::{Color, Position};

/// Board cell width in terminal columns; 2 compensates for glyph aspect ratio
const CELL_W: u16 = 2;
/// Gap between the board and the side panel
const PANEL_GAP: u16 = 2;
const PANEL_W: u16 = 24;
const PANEL_ROWS: u16 = 11;

const WALL: char = '#';
const SETTLED: char = 'x';
const FALLING: char = '@';

/// Board and side panel layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameView {
    resume_hint: String,
}

impl Default for GameView {
    fn default() -> Self {
        Self::new("Enter")
    }
}

impl GameView {
    /// `resume_key` names the key shown in the paused hint
    pub fn new(resume_key: &str) -> Self {
        Self {
            resume_hint: format!("press <{resume_key}> to start"),
        }
    }

    /// Frame dimensions needed for a board of the given size
    pub fn frame_size(board_width: i32, board_height: i32) -> (u16, u16) {
        let columns = u16::try_from(board_width + 2).unwrap_or(u16::MAX);
        let rows = u16::try_from(board_height + 1).unwrap_or(u16::MAX);
        let width = columns
            .saturating_mul(CELL_W)
            .saturating_add(PANEL_GAP + PANEL_W);
        (width, rows.max(PANEL_ROWS))
    }

    pub fn render<T, S, P>(&self, game: &Game<T, S, P>) -> Frame
    where
        T: Timer,
        S: Scoring,
        P: PieceSource,
    {
        let (width, height) = Self::frame_size(game.width(), game.height());
        let mut frame = Frame::new(width, height);
        self.render_into(game, &mut frame);
        frame
    }

    /// Render into an existing frame, resizing it as needed
    pub fn render_into<T, S, P>(&self, game: &Game<T, S, P>, frame: &mut Frame)
    where
        T: Timer,
        S: Scoring,
        P: PieceSource,
    {
        let (width, height) = Self::frame_size(game.width(), game.height());
        frame.reset(width, height);

        let walls = game
            .left_wall()
            .iter()
            .chain(game.right_wall())
            .chain(game.floor());
        for &position in walls {
            draw_cell(frame, position, Glyph::plain(WALL));
        }

        for block in game.settled_blocks() {
            draw_cell(frame, block.position(), Glyph::tinted(SETTLED, block.color()));
        }

        let current = game.current();
        for position in current.absolute_blocks() {
            draw_cell(frame, position, Glyph::tinted(FALLING, current.color()));
        }

        self.draw_panel(game, frame);
    }

    fn draw_panel<T, S, P>(&self, game: &Game<T, S, P>, frame: &mut Frame)
    where
        T: Timer,
        S: Scoring,
        P: PieceSource,
    {
        let x = (u16::try_from(game.width() + 2).unwrap_or(0))
            .saturating_mul(CELL_W)
            .saturating_add(PANEL_GAP);

        frame.put_str(x, 0, "Next:");
        if let Ok(next) = game.preview(0) {
            // Unrotated offsets span x -1..=3 and y -1..=2.
            for offset in next.blocks() {
                let (Ok(col), Ok(row)) = (u16::try_from(offset.x + 1), u16::try_from(offset.y + 2))
                else {
                    continue;
                };
                let glyph = Glyph::tinted(FALLING, next.color());
                let cx = x + 2 + col * CELL_W;
                frame.put(cx, row, glyph);
                frame.put(cx + 1, row, glyph);
            }
        }

        frame.put_str(x, 6, &format!("Score: {}", game.score()));
        frame.put_str(x, 7, &format!("Lines: {}", game.completed_lines()));
        frame.put_str(x, 8, &format!("Level: {}", game.level()));

        if game.is_over() {
            frame.put_str(x, 10, "GAME OVER");
        } else if game.is_paused() {
            frame.put_str(x, 10, &self.resume_hint);
        }
    }
}

/// Draw a board cell; positions above the top row are clipped
fn draw_cell(frame: &mut Frame, position: Position, glyph: Glyph) {
    let (Ok(col), Ok(row)) = (u16::try_from(position.x + 1), u16::try_from(position.y)) else {
        return;
    };
    let x = col.saturating_mul(CELL_W);
    for dx in 0..CELL_W {
        frame.put(x.saturating_add(dx), row, glyph);
    }
}

/// Terminal color for a piece color hint
pub fn tint_color(color: Color) -> crossterm::style::Color {
    use crossterm::style::Color as Term;
    match color {
        Color::Cyan => Term::Cyan,
        Color::Yellow => Term::Yellow,
        Color::Purple => Term::Magenta,
        Color::Orange => Term::Rgb {
            r: 255,
            g: 165,
            b: 0,
        },
        Color::Blue => Term::Blue,
        Color::Red => Term::Red,
        Color::Green => Term::Green,
    }
}
