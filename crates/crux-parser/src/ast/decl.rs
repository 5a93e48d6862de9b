//! Declaration nodes.
//!
//! Variable and array declarations appear both at top level and inside
//! statement lists; function definitions only at top level.

use crux_core::Span;

use super::{Block, NodeId};
use crate::SymbolId;

/// A top-level declaration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decl<'ast> {
    Var(VarDecl),
    Array(ArrayDecl),
    Function(&'ast FunctionDef<'ast>),
}

impl<'ast> Decl<'ast> {
    /// Node id of this declaration.
    pub fn id(&self) -> NodeId {
        match self {
            Self::Var(d) => d.id,
            Self::Array(d) => d.id,
            Self::Function(d) => d.id,
        }
    }

    /// Get the span of this declaration.
    pub fn span(&self) -> Span {
        match self {
            Self::Var(d) => d.span,
            Self::Array(d) => d.span,
            Self::Function(d) => d.span,
        }
    }
}

/// `var name : type;`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarDecl {
    pub id: NodeId,
    pub symbol: SymbolId,
    pub span: Span,
}

/// `array name : type[n]...;`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayDecl {
    pub id: NodeId,
    pub symbol: SymbolId,
    pub span: Span,
}

/// `func name(params) : type { body }`
///
/// Parameters and body share one scope frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FunctionDef<'ast> {
    pub id: NodeId,
    pub symbol: SymbolId,
    /// Parameters in declaration order.
    pub params: &'ast [SymbolId],
    pub body: Block<'ast>,
    pub span: Span,
}
