//! Byte offset to line/column conversion.

use rowan::TextSize;

use crate::{Error, Result};

/// 1-based line, 0-based column counted in chars. Matches the positions
/// carried by [`Token`](crate::Token).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    pub line: u32,
    pub column: u32,
}

impl std::fmt::Display for LineCol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    text: Box<str>,
    /// Offset of the first byte of every line.
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .map(|i| TextSize::from(i as u32))
            .collect();
        Self {
            text: text.into(),
            line_starts,
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn len(&self) -> TextSize {
        TextSize::of(&*self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Position of `offset`. The end of the text is a valid position; an
    /// offset inside a multi-byte character is not.
    pub fn line_col(&self, offset: TextSize) -> Result<LineCol> {
        let at: usize = offset.into();
        if offset > self.len() || !self.text.is_char_boundary(at) {
            return Err(Error::OffsetOutOfBounds(offset));
        }
        let line = self.line_starts.partition_point(|start| *start <= offset) - 1;
        let start: usize = self.line_starts[line].into();
        Ok(LineCol {
            line: line as u32 + 1,
            column: self.text[start..at].chars().count() as u32,
        })
    }

    /// Byte offset of a position. A column may point just past the last
    /// character of its line, but not beyond.
    pub fn offset(&self, position: LineCol) -> Result<TextSize> {
        let out_of_bounds = || Error::PositionOutOfBounds {
            line: position.line,
            column: position.column,
        };
        let line = (position.line as usize)
            .checked_sub(1)
            .ok_or_else(out_of_bounds)?;
        let start: usize = self
            .line_starts
            .get(line)
            .copied()
            .ok_or_else(out_of_bounds)?
            .into();
        let end: usize = self
            .line_starts
            .get(line + 1)
            .map_or(self.text.len(), |next| usize::from(*next) - 1);
        let line_text = &self.text[start..end];

        let column = position.column as usize;
        let byte = match line_text.char_indices().nth(column) {
            Some((byte, _)) => byte,
            None if line_text.chars().count() == column => line_text.len(),
            None => return Err(out_of_bounds()),
        };
        Ok(TextSize::from((start + byte) as u32))
    }
}
