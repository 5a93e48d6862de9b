//! Statement nodes.

use crux_core::Span;

use super::{CallExpr, Expr, NodeId, VarDecl};

/// A statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stmt<'ast> {
    /// `var x : T;`
    Var(VarDecl),
    /// `::f(args);` The call node is shared with the expression form.
    Call(&'ast CallExpr<'ast>),
    /// `let dest = source;`
    Assign(&'ast AssignStmt<'ast>),
    /// `if cond { } else { }`
    If(&'ast IfStmt<'ast>),
    /// `while cond { }`
    While(&'ast WhileStmt<'ast>),
    /// `return value;`
    Return(&'ast ReturnStmt<'ast>),
}

impl<'ast> Stmt<'ast> {
    /// Node id of this statement.
    pub fn id(&self) -> NodeId {
        match self {
            Self::Var(s) => s.id,
            Self::Call(s) => s.id,
            Self::Assign(s) => s.id,
            Self::If(s) => s.id,
            Self::While(s) => s.id,
            Self::Return(s) => s.id,
        }
    }

    /// Get the span of this statement.
    pub fn span(&self) -> Span {
        match self {
            Self::Var(s) => s.span,
            Self::Call(s) => s.span,
            Self::Assign(s) => s.span,
            Self::If(s) => s.span,
            Self::While(s) => s.span,
            Self::Return(s) => s.span,
        }
    }
}

/// A statement list, either a function body or a `{ }` block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block<'ast> {
    pub id: NodeId,
    pub stmts: &'ast [Stmt<'ast>],
    pub span: Span,
}

/// Store `source` at the address `dest`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssignStmt<'ast> {
    pub id: NodeId,
    /// Address of the target.
    pub dest: Expr<'ast>,
    pub source: Expr<'ast>,
    pub span: Span,
}

/// A two-way branch. A missing `else` is an empty block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IfStmt<'ast> {
    pub id: NodeId,
    pub condition: Expr<'ast>,
    pub then_block: Block<'ast>,
    pub else_block: Block<'ast>,
    pub span: Span,
}

/// A pre-tested loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhileStmt<'ast> {
    pub id: NodeId,
    pub condition: Expr<'ast>,
    pub body: Block<'ast>,
    pub span: Span,
}

/// Return from the enclosing function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnStmt<'ast> {
    pub id: NodeId,
    pub value: Expr<'ast>,
    pub span: Span,
}
