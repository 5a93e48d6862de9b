//! Operators appearing in expressions.

use std::fmt;

use crux_core::BinaryOperation;

use crate::lexer::TokenKind;

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `and`
    And,
    /// `or`
    Or,
    /// One of the relational operators.
    Compare(CompareOp),
}

/// A relational operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// `>=`
    Ge,
    /// `<=`
    Le,
    /// `!=`
    Ne,
    /// `==`
    Eq,
    /// `>`
    Gt,
    /// `<`
    Lt,
}

impl BinaryOp {
    /// Convert a token to a binary operator.
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        let op = match kind {
            TokenKind::Add => BinaryOp::Add,
            TokenKind::Sub => BinaryOp::Sub,
            TokenKind::Mul => BinaryOp::Mul,
            TokenKind::Div => BinaryOp::Div,
            TokenKind::And => BinaryOp::And,
            TokenKind::Or => BinaryOp::Or,
            _ => BinaryOp::Compare(CompareOp::from_token(kind)?),
        };
        Some(op)
    }

    /// The type algebra operation this operator is checked with.
    pub fn operation(self) -> BinaryOperation {
        match self {
            BinaryOp::Add => BinaryOperation::Add,
            BinaryOp::Sub => BinaryOperation::Sub,
            BinaryOp::Mul => BinaryOperation::Mul,
            BinaryOp::Div => BinaryOperation::Div,
            BinaryOp::And => BinaryOperation::And,
            BinaryOp::Or => BinaryOperation::Or,
            BinaryOp::Compare(_) => BinaryOperation::Compare,
        }
    }
}

impl CompareOp {
    /// Convert a token to a relational operator.
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::GreaterEqual => Some(CompareOp::Ge),
            TokenKind::LesserEqual => Some(CompareOp::Le),
            TokenKind::NotEqual => Some(CompareOp::Ne),
            TokenKind::Equal => Some(CompareOp::Eq),
            TokenKind::GreaterThan => Some(CompareOp::Gt),
            TokenKind::LessThan => Some(CompareOp::Lt),
            _ => None,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Compare(op) => return write!(f, "{}", op),
        };
        f.write_str(s)
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CompareOp::Ge => ">=",
            CompareOp::Le => "<=",
            CompareOp::Ne => "!=",
            CompareOp::Eq => "==",
            CompareOp::Gt => ">",
            CompareOp::Lt => "<",
        };
        f.write_str(s)
    }
}
