//! Gallows frames and the block-letter font used by the ASCII front-end.

use crate::game_state::GALLOWS_STAGES;
use std::fs;
use std::io;
use std::path::Path;

pub const EMBEDDED_GALLOWS: &str = include_str!("resources/hangman.txt");
pub const EMBEDDED_FONT: &str = include_str!("resources/standard.txt");

/// Lines per gallows frame.
pub const FRAME_HEIGHT: usize = 8;
/// Lines per font glyph.
pub const GLYPH_HEIGHT: usize = 5;

const FIRST_GLYPH: u32 = ' ' as u32;
const GLYPH_COUNT: usize = 95;

/// Split `data` into `count` chunks of `height` lines, padding with blank lines.
fn chunk_lines(data: &str, height: usize, count: usize) -> Vec<Vec<String>> {
    let mut lines = data.lines();
    (0..count)
        .map(|_| {
            (0..height)
                .map(|_| lines.next().unwrap_or_default().to_string())
                .collect()
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct Gallows {
    frames: Vec<Vec<String>>,
}

impl Gallows {
    #[must_use]
    pub fn parse(data: &str) -> Self {
        Self {
            frames: chunk_lines(data, FRAME_HEIGHT, GALLOWS_STAGES),
        }
    }

    #[must_use]
    pub fn embedded() -> Self {
        Self::parse(EMBEDDED_GALLOWS)
    }

    /// The frame for `stage`, or `None` before the first failure.
    #[must_use]
    pub fn frame(&self, stage: i8) -> Option<&[String]> {
        let index = usize::try_from(stage).ok()?;
        self.frames.get(index).map(Vec::as_slice)
    }
}

#[derive(Debug, Clone)]
pub struct AsciiFont {
    glyphs: Vec<Vec<String>>,
}

impl AsciiFont {
    /// Parse a font of 95 glyphs (`' '` to `'~'`), each [`GLYPH_HEIGHT`] lines.
    pub fn parse(data: &str) -> io::Result<Self> {
        let expected = GLYPH_COUNT * GLYPH_HEIGHT;
        let found = data.lines().count();
        if found != expected {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("font has {found} lines, expected {expected}"),
            ));
        }
        Ok(Self {
            glyphs: chunk_lines(data, GLYPH_HEIGHT, GLYPH_COUNT),
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Self::parse(&fs::read_to_string(path)?)
    }

    #[must_use]
    pub fn embedded() -> Self {
        Self {
            glyphs: chunk_lines(EMBEDDED_FONT, GLYPH_HEIGHT, GLYPH_COUNT),
        }
    }

    #[must_use]
    pub fn glyph(&self, c: char) -> &[String] {
        let index = (c as u32)
            .checked_sub(FIRST_GLYPH)
            .map(|i| i as usize)
            .filter(|&i| i < GLYPH_COUNT)
            .unwrap_or(('?' as u32 - FIRST_GLYPH) as usize);
        &self.glyphs[index]
    }

    /// Render `text` as [`GLYPH_HEIGHT`] lines of block letters.
    pub fn render(&self, text: impl IntoIterator<Item = char>) -> Vec<String> {
        let mut lines = vec![String::new(); GLYPH_HEIGHT];
        for c in text {
            for (line, row) in lines.iter_mut().zip(self.glyph(c)) {
                line.push_str(row);
            }
        }
        lines
    }
}
