//! Syntax tree for Crux.
//!
//! All nodes are allocated in a `bumpalo` arena supplied by the caller and
//! are `Copy`; child lists are arena slices. Every node carries a [`NodeId`]
//! that is unique within one parse, which later passes use as the key of
//! their side tables, and the [`Span`] of the token that starts it.
//!
//! Identifiers are already resolved when the tree is built, so nodes refer to
//! declarations through [`SymbolId`](crate::SymbolId) handles instead of names.
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use crux_parser::{Root, parse_source};
//!
//! let arena = Bump::new();
//! let output = parse_source("var count : int;", &arena);
//!
//! assert!(!output.has_errors());
//! assert!(matches!(output.root, Root::Program(program) if program.decls.len() == 1));
//! ```

pub mod decl;
pub mod expr;
pub mod ops;
pub mod stmt;
pub mod walk;

mod decl_parser;
mod expr_parser;
mod nonterminal;
mod parser;
mod stmt_parser;

pub use decl::*;
pub use expr::*;
pub use nonterminal::NonTerminal;
pub use ops::*;
pub use parser::{ParseOutput, Parser, parse_source};
pub use stmt::*;

use crux_core::Span;

/// Identity of a tree node within one parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Result of a parse: a declaration list, or the single node that replaces
/// the whole input after a syntax error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Root<'ast> {
    /// A complete program.
    Program(Program<'ast>),
    /// The parse was aborted.
    Error(ErrorNode<'ast>),
}

impl<'ast> Root<'ast> {
    /// Node id of the root.
    pub fn id(&self) -> NodeId {
        match self {
            Root::Program(program) => program.id,
            Root::Error(error) => error.id,
        }
    }

    /// Span of the root.
    pub fn span(&self) -> Span {
        match self {
            Root::Program(program) => program.span,
            Root::Error(error) => error.span,
        }
    }
}

/// The top-level declaration list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Program<'ast> {
    pub id: NodeId,
    /// Declarations in source order.
    pub decls: &'ast [Decl<'ast>],
    pub span: Span,
}

/// Placeholder for input that could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorNode<'ast> {
    pub id: NodeId,
    /// The syntax diagnostic that ended the parse.
    pub message: &'ast str,
    pub span: Span,
}
