//! Core parser state and token helpers.
//!
//! The grammar rules live in `expr_parser`, `stmt_parser` and `decl_parser`
//! as further `impl` blocks on [`Parser`]. Every rule returns a
//! [`ParseResult`]; the first syntax error propagates with `?` all the way up
//! to [`Parser::parse`], which replaces the whole tree with an error node.
//! Symbol errors are not syntax errors and never unwind.

use bumpalo::Bump;
use crux_core::{Diagnostic, Diagnostics, Type};
use tracing::{debug, warn};

use super::nonterminal::NonTerminal;
use super::{ErrorNode, NodeId, Program, Root};
use crate::lexer::{Lexer, Token, TokenKind, TokenSource};
use crate::scope::ScopeResolver;
use crate::symbol::{SymbolArena, SymbolId, SymbolKind};

/// Result of a grammar rule. The error is the fatal syntax diagnostic.
pub(super) type ParseResult<T> = Result<T, Diagnostic>;

/// Everything a parse produces.
#[derive(Debug)]
pub struct ParseOutput<'ast> {
    /// The tree, or the error node that replaced it.
    pub root: Root<'ast>,
    /// Every symbol declared or substituted during the parse.
    pub symbols: SymbolArena,
    /// Symbol errors in source order, then the syntax error if there was one.
    pub diagnostics: Diagnostics,
    /// Number of node ids handed out; ids are `0..node_count`.
    pub node_count: u32,
}

impl<'ast> ParseOutput<'ast> {
    /// Whether any diagnostic was recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    /// Whether the parse was aborted by a syntax error.
    pub fn is_aborted(&self) -> bool {
        matches!(self.root, Root::Error(_))
    }
}

/// Recursive-descent parser for Crux.
///
/// Builds arena-allocated nodes while declaring and resolving names through
/// a [`ScopeResolver`].
pub struct Parser<'src, 'ast, S> {
    /// Where tokens come from.
    tokens: S,
    /// One token of lookahead.
    current: Token<'src>,
    /// Arena for tree nodes.
    pub(super) arena: &'ast Bump,
    /// Active scope chain.
    pub(super) scope: ScopeResolver,
    /// Recoverable diagnostics.
    pub(super) diagnostics: Diagnostics,
    /// Next node id to hand out.
    next_id: u32,
}

impl<'src, 'ast, S: TokenSource<'src>> Parser<'src, 'ast, S> {
    /// Create a parser positioned on the first token.
    pub fn new(mut tokens: S, arena: &'ast Bump) -> Self {
        let current = tokens.next_token();
        Self {
            tokens,
            current,
            arena,
            scope: ScopeResolver::new(),
            diagnostics: Diagnostics::new(),
            next_id: 0,
        }
    }

    /// Parse a whole program.
    ///
    /// Never fails: a syntax error is appended to the diagnostics and the
    /// root becomes an error node carrying its text.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn parse(tokens: S, arena: &'ast Bump) -> ParseOutput<'ast> {
        let mut parser = Self::new(tokens, arena);

        let root = match parser.parse_program() {
            Ok(program) => Root::Program(program),
            Err(diagnostic) => {
                warn!(%diagnostic, "parse aborted");
                let error = ErrorNode {
                    id: parser.next_id(),
                    message: arena.alloc_str(&diagnostic.to_string()),
                    span: diagnostic.span(),
                };
                parser.diagnostics.push(diagnostic);
                Root::Error(error)
            }
        };

        debug!(
            nodes = parser.next_id,
            diagnostics = parser.diagnostics.len(),
            "parse finished"
        );

        ParseOutput {
            root,
            node_count: parser.next_id,
            symbols: parser.scope.into_symbols(),
            diagnostics: parser.diagnostics,
        }
    }

    // =========================================
    // Program
    // =========================================

    /// `program := declaration-list EOF .`
    fn parse_program(&mut self) -> ParseResult<Program<'ast>> {
        let span = self.peek().span;

        let mut decls = bumpalo::collections::Vec::new_in(self.arena);
        while self.has(NonTerminal::Declaration) {
            decls.push(self.parse_declaration()?);
        }
        self.expect(TokenKind::Eof)?;

        Ok(Program {
            id: self.next_id(),
            decls: self.arena.alloc_slice_copy(&decls),
            span,
        })
    }

    // =========================================
    // Token helpers
    // =========================================

    /// The lookahead token.
    #[inline]
    pub(super) fn peek(&self) -> &Token<'src> {
        &self.current
    }

    /// Consume the lookahead token and return it.
    pub(super) fn advance(&mut self) -> Token<'src> {
        let next = self.tokens.next_token();
        std::mem::replace(&mut self.current, next)
    }

    /// Whether the lookahead token has the given kind.
    #[inline]
    pub(super) fn check(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    /// Consume the lookahead token if it has the given kind.
    pub(super) fn eat(&mut self, kind: TokenKind) -> Option<Token<'src>> {
        self.check(kind).then(|| self.advance())
    }

    /// Consume a token of the given kind or fail.
    pub(super) fn expect(&mut self, kind: TokenKind) -> ParseResult<Token<'src>> {
        match self.eat(kind) {
            Some(token) => Ok(token),
            None => Err(self.syntax_error(kind.name().to_string())),
        }
    }

    /// Whether the lookahead token can start `nt`.
    #[inline]
    pub(super) fn has(&self, nt: NonTerminal) -> bool {
        nt.starts_with(self.current.kind)
    }

    /// Consume a token that starts `nt` or fail.
    pub(super) fn expect_any(&mut self, nt: NonTerminal) -> ParseResult<Token<'src>> {
        if self.has(nt) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(nt))
        }
    }

    /// The error for a lookahead token that starts none of `nt`'s alternatives.
    pub(super) fn unexpected(&self, nt: NonTerminal) -> Diagnostic {
        self.syntax_error(format!("a token from {}", nt.name()))
    }

    /// The error for a consumed literal whose value does not fit one word.
    pub(super) fn out_of_range(&self, literal: Token<'src>) -> Diagnostic {
        Diagnostic::Syntax {
            expected: format!("{} within 32 bits", literal.kind.name()),
            found: literal.lexeme.to_string(),
            span: literal.span,
        }
    }

    fn syntax_error(&self, expected: String) -> Diagnostic {
        Diagnostic::Syntax {
            expected,
            found: self.current.kind.name().to_string(),
            span: self.current.span,
        }
    }

    // =========================================
    // Tree and symbol helpers
    // =========================================

    /// Hand out a fresh node id.
    pub(super) fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// `type := IDENTIFIER .`
    pub(super) fn parse_type(&mut self) -> ParseResult<Type> {
        let name = self.expect(TokenKind::Identifier)?;
        Ok(Type::from_name(name.lexeme))
    }

    /// Declare the identifier `name` in the current scope.
    pub(super) fn declare(&mut self, name: Token<'src>, ty: Type, kind: SymbolKind) -> SymbolId {
        self.scope
            .declare(name.lexeme, ty, kind, name.span, &mut self.diagnostics)
    }

    /// Resolve the identifier `name` along the scope chain.
    pub(super) fn resolve(&mut self, name: Token<'src>) -> SymbolId {
        self.scope
            .resolve(name.lexeme, name.span, &mut self.diagnostics)
    }
}

/// Parse Crux source text with the default [`Lexer`].
pub fn parse_source<'ast>(source: &str, arena: &'ast Bump) -> ParseOutput<'ast> {
    Parser::parse(Lexer::new(source), arena)
}
