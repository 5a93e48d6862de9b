//! Statement rules.

use crux_core::Type;
use crux_parser::ast::{Block, Stmt};

use super::TypeChecker;

impl<'a> TypeChecker<'a> {
    /// Blocks carry no value of their own and are typed `void`.
    pub(super) fn check_block(&mut self, block: &Block<'_>) {
        for stmt in block.stmts {
            self.check_stmt(stmt);
        }
        self.record(block.id, Type::Void);
    }

    fn check_stmt(&mut self, stmt: &Stmt<'_>) {
        match stmt {
            Stmt::Var(var) => {
                self.check_var_decl(var);
            }
            Stmt::Call(call) => {
                self.check_call(call);
            }
            Stmt::Assign(assign) => {
                let dest = self.check_expr(&assign.dest);
                let source = self.check_expr(&assign.source);
                let ty = dest.assign(&source);
                self.settle(assign.id, assign.span, ty, &[&dest, &source]);
            }
            Stmt::If(branch) => {
                let condition = self.check_expr(&branch.condition);
                self.check_block(&branch.then_block);
                self.check_block(&branch.else_block);
                let ty = condition_type("IfElseBranch", &condition);
                self.settle(branch.id, branch.span, ty, &[&condition]);
            }
            Stmt::While(lp) => {
                let condition = self.check_expr(&lp.condition);
                self.check_block(&lp.body);
                let ty = condition_type("WhileLoop", &condition);
                self.settle(lp.id, lp.span, ty, &[&condition]);
            }
            Stmt::Return(ret) => {
                let value = self.check_expr(&ret.value);
                let ty = match &self.function {
                    Some(function) => match &function.ret {
                        Some(expected) if !value.is_error() && *expected != value => {
                            Type::error(format!(
                                "Function {} returns {} not {}.",
                                function.name, expected, value
                            ))
                        }
                        _ => value.clone(),
                    },
                    None => value.clone(),
                };
                self.settle(ret.id, ret.span, ty, &[&value]);
            }
        }
    }
}

fn condition_type(construct: &str, condition: &Type) -> Type {
    match condition {
        Type::Bool => Type::Void,
        Type::Error(_) => condition.clone(),
        other => Type::error(format!(
            "{} requires bool condition not {}.",
            construct, other
        )),
    }
}
