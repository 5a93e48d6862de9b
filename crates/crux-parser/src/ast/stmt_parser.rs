//! Statement parsing.

use super::nonterminal::NonTerminal;
use super::parser::{ParseResult, Parser};
use super::stmt::*;
use crate::lexer::{TokenKind, TokenSource};

impl<'src, 'ast, S: TokenSource<'src>> Parser<'src, 'ast, S> {
    /// Parse a statement.
    ///
    /// Grammar: `variable-declaration | call-statement | assignment-statement
    /// | if-statement | while-statement | return-statement`
    pub(super) fn parse_statement(&mut self) -> ParseResult<Stmt<'ast>> {
        match self.peek().kind {
            TokenKind::Var => Ok(Stmt::Var(self.parse_var_decl()?)),
            TokenKind::Call => {
                let call = self.parse_call_expr()?;
                self.expect(TokenKind::Semicolon)?;
                Ok(Stmt::Call(call))
            }
            TokenKind::Let => self.parse_assignment(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::Return => self.parse_return(),
            _ => Err(self.unexpected(NonTerminal::Statement)),
        }
    }

    /// Parse `{ statement-list }`.
    ///
    /// A function body passes `own_scope = false` because its frame was
    /// already opened for the parameters.
    pub(super) fn parse_block(&mut self, own_scope: bool) -> ParseResult<Block<'ast>> {
        let span = self.expect(TokenKind::OpenBrace)?.span;

        if own_scope {
            self.scope.enter_scope();
        }

        let mut stmts = bumpalo::collections::Vec::new_in(self.arena);
        while self.has(NonTerminal::Statement) {
            stmts.push(self.parse_statement()?);
        }

        if own_scope {
            self.scope.exit_scope();
        }

        self.expect(TokenKind::CloseBrace)?;

        Ok(Block {
            id: self.next_id(),
            stmts: self.arena.alloc_slice_copy(&stmts),
            span,
        })
    }

    /// `assignment-statement := "let" designator "=" expression0 ";" .`
    fn parse_assignment(&mut self) -> ParseResult<Stmt<'ast>> {
        let span = self.expect(TokenKind::Let)?.span;
        let dest = self.parse_designator()?;
        self.expect(TokenKind::Assign)?;
        let source = self.parse_expression0()?;
        self.expect(TokenKind::Semicolon)?;

        let id = self.next_id();
        Ok(Stmt::Assign(self.arena.alloc(AssignStmt {
            id,
            dest,
            source,
            span,
        })))
    }

    /// `if-statement := "if" expression0 statement-block [ "else" statement-block ] .`
    fn parse_if(&mut self) -> ParseResult<Stmt<'ast>> {
        let span = self.expect(TokenKind::If)?.span;
        let condition = self.parse_expression0()?;
        let then_block = self.parse_block(true)?;

        let else_block = if self.eat(TokenKind::Else).is_some() {
            self.parse_block(true)?
        } else {
            Block {
                id: self.next_id(),
                stmts: &[],
                span: self.peek().span,
            }
        };

        let id = self.next_id();
        Ok(Stmt::If(self.arena.alloc(IfStmt {
            id,
            condition,
            then_block,
            else_block,
            span,
        })))
    }

    /// `while-statement := "while" expression0 statement-block .`
    fn parse_while(&mut self) -> ParseResult<Stmt<'ast>> {
        let span = self.expect(TokenKind::While)?.span;
        let condition = self.parse_expression0()?;
        let body = self.parse_block(true)?;

        let id = self.next_id();
        Ok(Stmt::While(self.arena.alloc(WhileStmt {
            id,
            condition,
            body,
            span,
        })))
    }

    /// `return-statement := "return" expression0 ";" .`
    fn parse_return(&mut self) -> ParseResult<Stmt<'ast>> {
        let span = self.expect(TokenKind::Return)?.span;
        let value = self.parse_expression0()?;
        self.expect(TokenKind::Semicolon)?;

        let id = self.next_id();
        Ok(Stmt::Return(self.arena.alloc(ReturnStmt { id, value, span })))
    }
}
