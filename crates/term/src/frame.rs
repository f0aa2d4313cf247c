//! Frame: a fixed grid of glyphs with optional piece color hints.

use crate::types::Color;

/// One character cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    /// Color hint; `None` draws in the terminal's default color
    pub tint: Option<Color>,
}

impl Glyph {
    pub const BLANK: Glyph = Glyph::plain(' ');

    pub const fn plain(ch: char) -> Self {
        Self { ch, tint: None }
    }

    pub const fn tinted(ch: char, tint: Color) -> Self {
        Self {
            ch,
            tint: Some(tint),
        }
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self::BLANK
    }
}

/// Row-major glyph grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            glyphs: vec![Glyph::BLANK; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize and blank every cell
    pub fn reset(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.glyphs.clear();
        self.glyphs
            .resize(width as usize * height as usize, Glyph::BLANK);
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        self.index(x, y).map(|i| self.glyphs[i])
    }

    /// Write one glyph; out-of-frame writes are dropped
    pub fn put(&mut self, x: u16, y: u16, glyph: Glyph) {
        if let Some(i) = self.index(x, y) {
            self.glyphs[i] = glyph;
        }
    }

    /// Write plain text starting at (x, y), clipped at the right edge
    pub fn put_str(&mut self, x: u16, y: u16, text: &str) {
        for (offset, ch) in text.chars().enumerate() {
            let Ok(offset) = u16::try_from(offset) else {
                break;
            };
            let Some(cx) = x.checked_add(offset) else {
                break;
            };
            self.put(cx, y, Glyph::plain(ch));
        }
    }

    pub fn row(&self, y: u16) -> &[Glyph] {
        let start = (y.min(self.height) as usize) * self.width as usize;
        let end = if y < self.height {
            start + self.width as usize
        } else {
            start
        };
        &self.glyphs[start..end]
    }

    /// Plain-text rows with trailing blanks trimmed
    pub fn lines(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                let line: String = self.row(y).iter().map(|g| g.ch).collect();
                line.trim_end().to_string()
            })
            .collect()
    }
}
