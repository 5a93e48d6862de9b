//! Lexical tokens for Crux and the token source boundary.
//!
//! The parser pulls tokens through [`TokenSource`]. [`Lexer`] scans source
//! text directly; [`TokenBuffer`] replays an already scanned sequence.

mod cursor;
mod lexer;
mod token;

pub use lexer::Lexer;
pub use token::{Token, TokenKind, lookup_keyword};

use crux_core::Span;

/// A lazy sequence of tokens, pulled one per call.
///
/// Once exhausted, a source keeps returning a [`TokenKind::Eof`] token.
pub trait TokenSource<'src> {
    /// Produce the next token.
    fn next_token(&mut self) -> Token<'src>;
}

/// Token source over a pre-scanned token vector.
pub struct TokenBuffer<'src> {
    tokens: std::vec::IntoIter<Token<'src>>,
    end: Span,
}

impl<'src> TokenBuffer<'src> {
    /// Create a buffer. A missing end marker is synthesized after the last token.
    pub fn new(tokens: Vec<Token<'src>>) -> Self {
        let end = tokens.last().map(|t| t.span).unwrap_or(Span::new(1, 1));
        Self {
            tokens: tokens.into_iter(),
            end,
        }
    }
}

impl<'src> TokenSource<'src> for TokenBuffer<'src> {
    fn next_token(&mut self) -> Token<'src> {
        match self.tokens.next() {
            Some(token) => {
                self.end = token.span;
                token
            }
            None => Token::eof(self.end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_synthesizes_eof() {
        let tokens = vec![Token::new(TokenKind::Identifier, "x", Span::new(3, 4))];
        let mut buffer = TokenBuffer::new(tokens);
        assert_eq!(buffer.next_token().kind, TokenKind::Identifier);

        let eof = buffer.next_token();
        assert_eq!(eof.kind, TokenKind::Eof);
        assert_eq!(eof.span, Span::new(3, 4));
        assert_eq!(buffer.next_token().kind, TokenKind::Eof);
    }
}
