//! Default token source for Crux source text.
//!
//! The [`Lexer`] classifies characters into tokens one call at a time. Once
//! the input is exhausted it keeps returning the end marker.

use super::TokenSource;
use super::cursor::{Cursor, is_ident_continue, is_ident_start};
use super::token::{Token, TokenKind, lookup_keyword};
use crux_core::Span;

/// Lexer for Crux source code.
pub struct Lexer<'src> {
    /// Low-level character cursor.
    cursor: Cursor<'src>,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    /// Scan the whole input, including the final end marker.
    pub fn tokenize(mut self) -> Vec<Token<'src>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            tokens.push(token);
            if token.is(TokenKind::Eof) {
                return tokens;
            }
        }
    }

    // =========================================
    // Internal: Token scanning
    // =========================================

    fn scan_token(&mut self) -> Token<'src> {
        self.skip_trivia();

        let start = self.cursor.offset();
        let span = Span::new(self.cursor.line(), self.cursor.column());

        let Some(first) = self.cursor.advance() else {
            return Token::eof(span);
        };

        let kind = match first {
            c if c.is_ascii_digit() => self.scan_number(),
            c if is_ident_start(c) => {
                self.cursor.eat_while(is_ident_continue);
                lookup_keyword(self.cursor.slice_from(start)).unwrap_or(TokenKind::Identifier)
            }
            _ => self.scan_operator(first),
        };

        Token::new(kind, self.cursor.slice_from(start), span)
    }

    /// Skip whitespace and `//` line comments.
    fn skip_trivia(&mut self) {
        loop {
            self.cursor.eat_while(|c| c.is_whitespace());
            if self.cursor.peek() == Some('/') && self.cursor.peek_nth(1) == Some('/') {
                self.cursor.eat_while(|c| c != '\n');
            } else {
                return;
            }
        }
    }

    /// Scan the rest of a number whose first digit was consumed.
    fn scan_number(&mut self) -> TokenKind {
        self.cursor.eat_while(|c| c.is_ascii_digit());
        if self.cursor.peek() == Some('.') {
            self.cursor.advance();
            self.cursor.eat_while(|c| c.is_ascii_digit());
            TokenKind::Float
        } else {
            TokenKind::Integer
        }
    }

    /// Scan a one or two character operator whose first character was consumed.
    fn scan_operator(&mut self, first: char) -> TokenKind {
        let second = self.cursor.peek();
        let two = match (first, second) {
            ('>', Some('=')) => Some(TokenKind::GreaterEqual),
            ('<', Some('=')) => Some(TokenKind::LesserEqual),
            ('!', Some('=')) => Some(TokenKind::NotEqual),
            ('=', Some('=')) => Some(TokenKind::Equal),
            (':', Some(':')) => Some(TokenKind::Call),
            _ => None,
        };
        if let Some(kind) = two {
            self.cursor.advance();
            return kind;
        }

        match first {
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            '{' => TokenKind::OpenBrace,
            '}' => TokenKind::CloseBrace,
            '[' => TokenKind::OpenBracket,
            ']' => TokenKind::CloseBracket,
            '+' => TokenKind::Add,
            '-' => TokenKind::Sub,
            '*' => TokenKind::Mul,
            '/' => TokenKind::Div,
            '>' => TokenKind::GreaterThan,
            '<' => TokenKind::LessThan,
            '=' => TokenKind::Assign,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            ':' => TokenKind::Colon,
            _ => TokenKind::Error,
        }
    }
}

impl<'src> TokenSource<'src> for Lexer<'src> {
    fn next_token(&mut self) -> Token<'src> {
        self.scan_token()
    }
}
