//! Expression rules.

use crux_core::Type;
use crux_parser::ast::{CallExpr, Expr, LiteralKind};

use super::TypeChecker;

impl<'a> TypeChecker<'a> {
    /// Type an expression and everything under it.
    pub(super) fn check_expr(&mut self, expr: &Expr<'_>) -> Type {
        match expr {
            Expr::Literal(literal) => {
                let ty = match literal.kind {
                    LiteralKind::Int(_) => Type::Int,
                    LiteralKind::Float(_) => Type::Float,
                    LiteralKind::Bool(_) => Type::Bool,
                };
                self.record(literal.id, ty)
            }
            Expr::AddressOf(address) => {
                // Undeclared names and broken declarations were reported already.
                let symbol = self.symbol(address.symbol);
                let ty = if symbol.ty.is_error() {
                    symbol.ty.clone()
                } else {
                    Type::address(symbol.ty.clone())
                };
                self.record(address.id, ty)
            }
            Expr::Deref(deref) => {
                let operand = self.check_expr(&deref.operand);
                let ty = operand.deref();
                self.settle(deref.id, deref.span, ty, &[&operand])
            }
            Expr::Index(index) => {
                let base = self.check_expr(&index.base);
                let offset = self.check_expr(&index.index);
                let ty = base.index(&offset);
                self.settle(index.id, index.span, ty, &[&base, &offset])
            }
            Expr::Binary(binary) => {
                let left = self.check_expr(&binary.left);
                let right = self.check_expr(&binary.right);
                let ty = left.binary(binary.op.operation(), &right);
                self.settle(binary.id, binary.span, ty, &[&left, &right])
            }
            Expr::Not(not) => {
                let operand = self.check_expr(&not.operand);
                let ty = operand.not();
                self.settle(not.id, not.span, ty, &[&operand])
            }
            Expr::Call(call) => self.check_call(call),
        }
    }

    /// Arguments are typed left to right before the callee is asked.
    pub(super) fn check_call(&mut self, call: &CallExpr<'_>) -> Type {
        let args: Vec<Type> = call.args.iter().map(|arg| self.check_expr(arg)).collect();
        let callee = &self.symbol(call.callee).ty;
        let ty = callee.call(&args);

        let mut inputs = vec![callee];
        inputs.extend(args.iter());
        self.settle(call.id, call.span, ty, &inputs)
    }
}
