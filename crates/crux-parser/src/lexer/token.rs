//! Token types and definitions for the Crux lexer.

use crux_core::Span;
use std::fmt;

/// A token from the source code.
///
/// The lexeme borrows from the source text the token was scanned from.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    /// The type of token.
    pub kind: TokenKind,
    /// The source text of this token.
    pub lexeme: &'src str,
    /// Location in source.
    pub span: Span,
}

impl<'src> Token<'src> {
    /// Create a new token.
    #[inline]
    pub fn new(kind: TokenKind, lexeme: &'src str, span: Span) -> Self {
        Self { kind, lexeme, span }
    }

    /// Create the end-of-input marker.
    #[inline]
    pub fn eof(span: Span) -> Self {
        Self::new(TokenKind::Eof, "", span)
    }

    /// Check the token kind.
    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?} @ {:?})", self.kind, self.lexeme, self.span)
    }
}

/// All token kinds of Crux.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // =========================================
    // Keywords
    // =========================================
    And,
    Or,
    Not,
    Let,
    Var,
    Array,
    Func,
    If,
    Else,
    While,
    True,
    False,
    Return,

    // =========================================
    // Punctuation and operators
    // =========================================
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `>=`
    GreaterEqual,
    /// `<=`
    LesserEqual,
    /// `!=`
    NotEqual,
    /// `==`
    Equal,
    /// `>`
    GreaterThan,
    /// `<`
    LessThan,
    /// `=`
    Assign,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `:`
    Colon,
    /// `::`
    Call,

    // =========================================
    // Dynamic lexemes
    // =========================================
    Identifier,
    Integer,
    Float,
    /// Unrecognised input.
    Error,
    /// End of input.
    Eof,
}

impl TokenKind {
    /// The fixed lexeme of this kind, if it has one.
    pub fn lexeme(self) -> Option<&'static str> {
        use TokenKind::*;
        let text = match self {
            And => "and",
            Or => "or",
            Not => "not",
            Let => "let",
            Var => "var",
            Array => "array",
            Func => "func",
            If => "if",
            Else => "else",
            While => "while",
            True => "true",
            False => "false",
            Return => "return",
            OpenParen => "(",
            CloseParen => ")",
            OpenBrace => "{",
            CloseBrace => "}",
            OpenBracket => "[",
            CloseBracket => "]",
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            GreaterEqual => ">=",
            LesserEqual => "<=",
            NotEqual => "!=",
            Equal => "==",
            GreaterThan => ">",
            LessThan => "<",
            Assign => "=",
            Comma => ",",
            Semicolon => ";",
            Colon => ":",
            Call => "::",
            Identifier | Integer | Float | Error | Eof => return None,
        };
        Some(text)
    }

    /// Name used for this kind in diagnostics.
    pub fn name(self) -> &'static str {
        use TokenKind::*;
        match self {
            And => "AND",
            Or => "OR",
            Not => "NOT",
            Let => "LET",
            Var => "VAR",
            Array => "ARRAY",
            Func => "FUNC",
            If => "IF",
            Else => "ELSE",
            While => "WHILE",
            True => "TRUE",
            False => "FALSE",
            Return => "RETURN",
            OpenParen => "OPEN_PAREN",
            CloseParen => "CLOSE_PAREN",
            OpenBrace => "OPEN_BRACE",
            CloseBrace => "CLOSE_BRACE",
            OpenBracket => "OPEN_BRACKET",
            CloseBracket => "CLOSE_BRACKET",
            Add => "ADD",
            Sub => "SUB",
            Mul => "MUL",
            Div => "DIV",
            GreaterEqual => "GREATER_EQUAL",
            LesserEqual => "LESSER_EQUAL",
            NotEqual => "NOT_EQUAL",
            Equal => "EQUAL",
            GreaterThan => "GREATER_THAN",
            LessThan => "LESS_THAN",
            Assign => "ASSIGN",
            Comma => "COMMA",
            Semicolon => "SEMICOLON",
            Colon => "COLON",
            Call => "CALL",
            Identifier => "IDENTIFIER",
            Integer => "INTEGER",
            Float => "FLOAT",
            Error => "ERROR",
            Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Look up a keyword by its spelling.
pub fn lookup_keyword(ident: &str) -> Option<TokenKind> {
    use TokenKind::*;
    let kind = match ident {
        "and" => And,
        "or" => Or,
        "not" => Not,
        "let" => Let,
        "var" => Var,
        "array" => Array,
        "func" => Func,
        "if" => If,
        "else" => Else,
        "while" => While,
        "true" => True,
        "false" => False,
        "return" => Return,
        _ => return None,
    };
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_round_trip_through_lexeme() {
        for kind in [
            TokenKind::And,
            TokenKind::Func,
            TokenKind::While,
            TokenKind::Return,
        ] {
            let text = kind.lexeme().unwrap();
            assert_eq!(lookup_keyword(text), Some(kind));
        }
        assert_eq!(lookup_keyword("main"), None);
    }

    #[test]
    fn diagnostic_names() {
        assert_eq!(TokenKind::Semicolon.to_string(), "SEMICOLON");
        assert_eq!(TokenKind::Call.to_string(), "CALL");
        assert_eq!(TokenKind::Eof.to_string(), "EOF");
        assert_eq!(TokenKind::Identifier.lexeme(), None);
    }
}
