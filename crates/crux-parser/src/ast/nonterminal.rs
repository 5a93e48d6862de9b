//! Grammar nonterminals and their first sets.
//!
//! The parser decides between alternatives by asking whether the current
//! token is in a nonterminal's first set, and names the nonterminal in the
//! syntax error when none matches.

use std::fmt;

use crate::lexer::TokenKind;

/// A grammar rule the parser can test for or require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NonTerminal {
    Literal,
    Op0,
    Op1,
    Op2,
    Expression0,
    Expression3,
    Parameter,
    Declaration,
    Statement,
}

const LITERAL: &[TokenKind] = &[
    TokenKind::Integer,
    TokenKind::Float,
    TokenKind::True,
    TokenKind::False,
];

const EXPRESSION: &[TokenKind] = &[
    TokenKind::Not,
    TokenKind::OpenParen,
    TokenKind::Identifier,
    TokenKind::Call,
    TokenKind::Integer,
    TokenKind::Float,
    TokenKind::True,
    TokenKind::False,
];

impl NonTerminal {
    /// Tokens that can start this rule.
    pub fn first_set(self) -> &'static [TokenKind] {
        use TokenKind::*;
        match self {
            NonTerminal::Literal => LITERAL,
            NonTerminal::Parameter => &[Identifier],
            NonTerminal::Op0 => &[
                GreaterEqual,
                LesserEqual,
                NotEqual,
                Equal,
                GreaterThan,
                LessThan,
            ],
            NonTerminal::Op1 => &[Add, Sub, Or],
            NonTerminal::Op2 => &[Mul, Div, And],
            NonTerminal::Expression0 | NonTerminal::Expression3 => EXPRESSION,
            NonTerminal::Declaration => &[Var, Array, Func],
            NonTerminal::Statement => &[Var, Call, Let, If, While, Return],
        }
    }

    /// Whether `kind` can start this rule.
    pub fn starts_with(self, kind: TokenKind) -> bool {
        self.first_set().contains(&kind)
    }

    /// Name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            NonTerminal::Literal => "LITERAL",
            NonTerminal::Op0 => "OP0",
            NonTerminal::Op1 => "OP1",
            NonTerminal::Op2 => "OP2",
            NonTerminal::Expression0 => "EXPRESSION0",
            NonTerminal::Expression3 => "EXPRESSION3",
            NonTerminal::Parameter => "PARAMETER",
            NonTerminal::Declaration => "DECLARATION",
            NonTerminal::Statement => "STATEMENT",
        }
    }
}

impl fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
