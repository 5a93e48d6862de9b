//! Expression nodes.
//!
//! Variables never appear as bare names. A designator such as `a[i][j]` used
//! as a value becomes
//!
//! ```text
//! Deref(Index(Index(AddressOf(a), i), j))
//! ```
//!
//! and the same designator as an assignment target drops the outer `Deref`,
//! leaving an address.

use crux_core::Span;

use super::{BinaryOp, NodeId};
use crate::SymbolId;

/// An expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expr<'ast> {
    /// Integer, float or boolean constant
    Literal(LiteralExpr),
    /// Address of a declared symbol
    AddressOf(AddressOfExpr),
    /// Load through an address
    Deref(&'ast DerefExpr<'ast>),
    /// Element address or element of an array
    Index(&'ast IndexExpr<'ast>),
    /// Binary operation
    Binary(&'ast BinaryExpr<'ast>),
    /// Logical negation
    Not(&'ast NotExpr<'ast>),
    /// Function call
    Call(&'ast CallExpr<'ast>),
}

impl<'ast> Expr<'ast> {
    /// Node id of this expression.
    pub fn id(&self) -> NodeId {
        match self {
            Self::Literal(e) => e.id,
            Self::AddressOf(e) => e.id,
            Self::Deref(e) => e.id,
            Self::Index(e) => e.id,
            Self::Binary(e) => e.id,
            Self::Not(e) => e.id,
            Self::Call(e) => e.id,
        }
    }

    /// Get the span of this expression.
    pub fn span(&self) -> Span {
        match self {
            Self::Literal(e) => e.span,
            Self::AddressOf(e) => e.span,
            Self::Deref(e) => e.span,
            Self::Index(e) => e.span,
            Self::Binary(e) => e.span,
            Self::Not(e) => e.span,
            Self::Call(e) => e.span,
        }
    }
}

/// A literal value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiteralExpr {
    pub id: NodeId,
    pub kind: LiteralKind,
    pub span: Span,
}

/// The kind of literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralKind {
    /// One 32-bit word
    Int(i32),
    /// Single precision
    Float(f32),
    Bool(bool),
}

/// The address of a variable, array or function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AddressOfExpr {
    pub id: NodeId,
    pub symbol: SymbolId,
    pub span: Span,
}

/// A load through an address.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerefExpr<'ast> {
    pub id: NodeId,
    pub operand: Expr<'ast>,
    pub span: Span,
}

/// An indexing step `base[index]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexExpr<'ast> {
    pub id: NodeId,
    pub base: Expr<'ast>,
    pub index: Expr<'ast>,
    pub span: Span,
}

/// A binary operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryExpr<'ast> {
    pub id: NodeId,
    pub op: BinaryOp,
    pub left: Expr<'ast>,
    pub right: Expr<'ast>,
    pub span: Span,
}

/// `not operand`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NotExpr<'ast> {
    pub id: NodeId,
    pub operand: Expr<'ast>,
    pub span: Span,
}

/// `::callee(args)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallExpr<'ast> {
    pub id: NodeId,
    /// The called function.
    pub callee: SymbolId,
    /// Arguments, left to right.
    pub args: &'ast [Expr<'ast>],
    pub span: Span,
}
