//! Expression parsing.
//!
//! One function per precedence tier, loosest first:
//!
//! | Rule          | Operators              | Repeats        |
//! |---------------|------------------------|----------------|
//! | `expression0` | `>= <= != == > <`      | at most once   |
//! | `expression1` | `+ - or`               | left-assoc     |
//! | `expression2` | `* / and`              | left-assoc     |
//! | `expression3` | `not`, `( )`, operands | -              |

use super::expr::*;
use super::nonterminal::NonTerminal;
use super::ops::BinaryOp;
use super::parser::{ParseResult, Parser};
use crate::lexer::{Token, TokenKind, TokenSource};

impl<'src, 'ast, S: TokenSource<'src>> Parser<'src, 'ast, S> {
    /// `expression0 := expression1 [ op0 expression1 ] .`
    pub(super) fn parse_expression0(&mut self) -> ParseResult<Expr<'ast>> {
        let left = self.parse_expression1()?;
        if !self.has(NonTerminal::Op0) {
            return Ok(left);
        }

        let op = self.advance();
        let right = self.parse_expression1()?;
        Ok(self.binary(op, left, right))
    }

    /// `expression1 := expression2 { op1 expression2 } .`
    fn parse_expression1(&mut self) -> ParseResult<Expr<'ast>> {
        let mut left = self.parse_expression2()?;
        while self.has(NonTerminal::Op1) {
            let op = self.advance();
            let right = self.parse_expression2()?;
            left = self.binary(op, left, right);
        }
        Ok(left)
    }

    /// `expression2 := expression3 { op2 expression3 } .`
    fn parse_expression2(&mut self) -> ParseResult<Expr<'ast>> {
        let mut left = self.parse_expression3()?;
        while self.has(NonTerminal::Op2) {
            let op = self.advance();
            let right = self.parse_expression3()?;
            left = self.binary(op, left, right);
        }
        Ok(left)
    }

    /// `expression3 := "not" expression3 | "(" expression0 ")" | designator
    /// | call-expression | literal .`
    fn parse_expression3(&mut self) -> ParseResult<Expr<'ast>> {
        let token = *self.peek();

        match token.kind {
            TokenKind::Not => {
                self.advance();
                let operand = self.parse_expression3()?;
                let id = self.next_id();
                Ok(Expr::Not(self.arena.alloc(NotExpr {
                    id,
                    operand,
                    span: token.span,
                })))
            }
            TokenKind::OpenParen => {
                self.advance();
                let inner = self.parse_expression0()?;
                self.expect(TokenKind::CloseParen)?;
                Ok(inner)
            }
            TokenKind::Identifier => {
                let address = self.parse_designator()?;
                let id = self.next_id();
                Ok(Expr::Deref(self.arena.alloc(DerefExpr {
                    id,
                    operand: address,
                    span: token.span,
                })))
            }
            TokenKind::Call => Ok(Expr::Call(self.parse_call_expr()?)),
            _ if self.has(NonTerminal::Literal) => self.parse_literal(),
            _ => Err(self.unexpected(NonTerminal::Expression3)),
        }
    }

    /// `designator := IDENTIFIER { "[" expression0 "]" } .`
    ///
    /// Produces the address of the designated location.
    pub(super) fn parse_designator(&mut self) -> ParseResult<Expr<'ast>> {
        let name = self.expect(TokenKind::Identifier)?;
        let symbol = self.resolve(name);

        let mut address = Expr::AddressOf(AddressOfExpr {
            id: self.next_id(),
            symbol,
            span: name.span,
        });

        while self.eat(TokenKind::OpenBracket).is_some() {
            let index = self.parse_expression0()?;
            self.expect(TokenKind::CloseBracket)?;

            let id = self.next_id();
            address = Expr::Index(self.arena.alloc(IndexExpr {
                id,
                base: address,
                index,
                span: name.span,
            }));
        }

        Ok(address)
    }

    /// `call-expression := "::" IDENTIFIER "(" expression-list ")" .`
    pub(super) fn parse_call_expr(&mut self) -> ParseResult<&'ast CallExpr<'ast>> {
        let span = self.expect(TokenKind::Call)?.span;
        let name = self.expect(TokenKind::Identifier)?;
        let callee = self.resolve(name);

        self.expect(TokenKind::OpenParen)?;
        let mut args = bumpalo::collections::Vec::new_in(self.arena);
        if self.has(NonTerminal::Expression0) {
            args.push(self.parse_expression0()?);
            while self.eat(TokenKind::Comma).is_some() {
                args.push(self.parse_expression0()?);
            }
        }
        self.expect(TokenKind::CloseParen)?;

        let id = self.next_id();
        Ok(self.arena.alloc(CallExpr {
            id,
            callee,
            args: self.arena.alloc_slice_copy(&args),
            span,
        }))
    }

    /// `literal := INTEGER | FLOAT | "true" | "false" .`
    ///
    /// Integers wrap to one word. Floats must be finite in single precision.
    fn parse_literal(&mut self) -> ParseResult<Expr<'ast>> {
        let token = self.expect_any(NonTerminal::Literal)?;
        let kind = match token.kind {
            TokenKind::Integer => LiteralKind::Int(word_value(token.lexeme) as i32),
            TokenKind::Float => match token.lexeme.parse::<f32>() {
                Ok(value) if value.is_finite() => LiteralKind::Float(value),
                _ => return Err(self.out_of_range(token)),
            },
            TokenKind::True => LiteralKind::Bool(true),
            _ => LiteralKind::Bool(false),
        };

        Ok(Expr::Literal(LiteralExpr {
            id: self.next_id(),
            kind,
            span: token.span,
        }))
    }

    fn binary(&mut self, op: Token<'src>, left: Expr<'ast>, right: Expr<'ast>) -> Expr<'ast> {
        let id = self.next_id();
        // Only operator tokens reach here, so the conversion always succeeds.
        let op_kind = BinaryOp::from_token(op.kind).unwrap_or(BinaryOp::Add);
        Expr::Binary(self.arena.alloc(BinaryExpr {
            id,
            op: op_kind,
            left,
            right,
            span: op.span,
        }))
    }
}

/// Value of a decimal integer lexeme, wrapped to one 32-bit word.
pub(super) fn word_value(digits: &str) -> u32 {
    digits
        .bytes()
        .filter(u8::is_ascii_digit)
        .fold(0u32, |acc, digit| {
            acc.wrapping_mul(10).wrapping_add(u32::from(digit - b'0'))
        })
}
