//! Declaration parsing: variables, arrays and function definitions.
//!
//! Names are declared as soon as their identifier is read, before the type
//! annotation, and the symbol's type is filled in once it is known. This lets
//! a function resolve its own name inside its body.

use crux_core::Type;

use super::decl::*;
use super::nonterminal::NonTerminal;
use super::parser::{ParseResult, Parser};
use crate::lexer::{TokenKind, TokenSource};
use crate::symbol::{SymbolId, SymbolKind};

impl<'src, 'ast, S: TokenSource<'src>> Parser<'src, 'ast, S> {
    /// `declaration := variable-declaration | array-declaration | function-definition .`
    pub(super) fn parse_declaration(&mut self) -> ParseResult<Decl<'ast>> {
        match self.peek().kind {
            TokenKind::Var => Ok(Decl::Var(self.parse_var_decl()?)),
            TokenKind::Array => Ok(Decl::Array(self.parse_array_decl()?)),
            TokenKind::Func => Ok(Decl::Function(self.parse_function_def()?)),
            _ => Err(self.unexpected(NonTerminal::Declaration)),
        }
    }

    /// `variable-declaration := "var" IDENTIFIER ":" type ";" .`
    pub(super) fn parse_var_decl(&mut self) -> ParseResult<VarDecl> {
        let span = self.expect(TokenKind::Var)?.span;

        let name = self.expect(TokenKind::Identifier)?;
        let symbol = self.declare(name, Type::Void, SymbolKind::Variable);

        self.expect(TokenKind::Colon)?;
        let ty = self.parse_type()?;
        self.scope.set_type(symbol, ty);
        self.expect(TokenKind::Semicolon)?;

        Ok(VarDecl {
            id: self.next_id(),
            symbol,
            span,
        })
    }

    /// `array-declaration := "array" IDENTIFIER ":" type "[" INTEGER "]" { "[" INTEGER "]" } ";" .`
    ///
    /// `array m : int[2][3];` declares `m` as `array[2,array[3,int]]`.
    pub(super) fn parse_array_decl(&mut self) -> ParseResult<ArrayDecl> {
        let span = self.expect(TokenKind::Array)?.span;

        let name = self.expect(TokenKind::Identifier)?;
        let symbol = self.declare(name, Type::Void, SymbolKind::Array);

        self.expect(TokenKind::Colon)?;
        let base = self.parse_type()?;

        let mut extents = vec![self.parse_extent()?];
        while self.check(TokenKind::OpenBracket) {
            extents.push(self.parse_extent()?);
        }
        self.expect(TokenKind::Semicolon)?;

        let ty = extents
            .into_iter()
            .rev()
            .fold(base, |element, extent| Type::array(extent, element));
        self.scope.set_type(symbol, ty);

        Ok(ArrayDecl {
            id: self.next_id(),
            symbol,
            span,
        })
    }

    /// `"[" INTEGER "]"`
    ///
    /// Extents must fit in one unsigned word.
    fn parse_extent(&mut self) -> ParseResult<u32> {
        self.expect(TokenKind::OpenBracket)?;
        let literal = self.expect(TokenKind::Integer)?;
        let extent = literal
            .lexeme
            .parse()
            .map_err(|_| self.out_of_range(literal))?;
        self.expect(TokenKind::CloseBracket)?;
        Ok(extent)
    }

    /// `function-definition := "func" IDENTIFIER "(" parameter-list ")" ":" type statement-block .`
    pub(super) fn parse_function_def(&mut self) -> ParseResult<&'ast FunctionDef<'ast>> {
        let span = self.expect(TokenKind::Func)?.span;

        let name = self.expect(TokenKind::Identifier)?;
        let symbol = self.declare(name, Type::Void, SymbolKind::Function);

        self.expect(TokenKind::OpenParen)?;

        // Parameters and body share this frame.
        self.scope.enter_scope();

        let params = self.parse_parameter_list()?;
        self.expect(TokenKind::CloseParen)?;
        self.expect(TokenKind::Colon)?;
        let ret = self.parse_type()?;

        let param_types = params
            .iter()
            .map(|&param| self.scope.symbol(param).ty.clone())
            .collect();
        self.scope.set_type(symbol, Type::function(param_types, ret));

        let body = self.parse_block(false)?;
        self.scope.exit_scope();

        let id = self.next_id();
        Ok(self.arena.alloc(FunctionDef {
            id,
            symbol,
            params: self.arena.alloc_slice_copy(&params),
            body,
            span,
        }))
    }

    /// `parameter-list := [ parameter { "," parameter } ] .`
    fn parse_parameter_list(&mut self) -> ParseResult<Vec<SymbolId>> {
        let mut params = Vec::new();
        if self.has(NonTerminal::Parameter) {
            params.push(self.parse_parameter()?);
            while self.eat(TokenKind::Comma).is_some() {
                params.push(self.parse_parameter()?);
            }
        }
        Ok(params)
    }

    /// `parameter := IDENTIFIER ":" type .`
    fn parse_parameter(&mut self) -> ParseResult<SymbolId> {
        let name = self.expect(TokenKind::Identifier)?;
        let symbol = self.declare(name, Type::Void, SymbolKind::Parameter);

        self.expect(TokenKind::Colon)?;
        let ty = self.parse_type()?;
        self.scope.set_type(symbol, ty);

        Ok(symbol)
    }
}
