//! Source location tracking for error reporting.
//!
//! Provides [`Span`] to track where tokens and tree nodes start in the source.

use std::fmt;

/// A position in source code.
///
/// Both coordinates are 1-based and are reported verbatim in diagnostics.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Line number (1-indexed).
    pub line: u32,
    /// Character position within the line (1-indexed).
    pub col: u32,
}

impl Span {
    /// Create a new span from a line and column.
    #[inline]
    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.line, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_display_uses_diagnostic_form() {
        let span = Span::new(3, 15);
        assert_eq!(format!("{}", span), "3,15");
        assert_eq!(format!("{:?}", span), "3:15");
    }

    #[test]
    fn default_span_is_zero() {
        assert_eq!(Span::default(), Span::new(0, 0));
    }
}
