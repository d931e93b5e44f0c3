//! Source positions.

use std::fmt;

/// A 1-based line/column pair.
///
/// Bir diagnostics render the offending source line followed by a caret under
/// `col`, so positions are kept in the form the user sees rather than as byte
/// offsets.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Position {
    pub line: u32,
    pub col: u32,
}

impl Position {
    /// Position for nodes synthesized by the engine (no source text).
    pub const SYNTHETIC: Position = Position { line: 0, col: 0 };

    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Position { line, col }
    }

    /// Whether this position points into real source text.
    #[inline]
    pub fn is_synthetic(self) -> bool {
        self.line == 0
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::SYNTHETIC
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}
