//! Statement lowering.

use crux_parser::ast::{Block, IfStmt, ReturnStmt, Stmt, WhileStmt};

use super::error::CodeGenError;
use super::{CodeGen, returns_value};

impl<'a> CodeGen<'a> {
    pub(super) fn generate_block(&mut self, block: &Block<'_>) -> Result<(), CodeGenError> {
        for stmt in block.stmts {
            self.generate_stmt(stmt)?;
        }
        Ok(())
    }

    fn generate_stmt(&mut self, stmt: &Stmt<'_>) -> Result<(), CodeGenError> {
        let depth = self.program.depth();

        match stmt {
            // Slots were assigned before the prologue.
            Stmt::Var(_) => {}
            Stmt::Call(call) => {
                self.generate_call(call)?;
                if returns_value(&self.symbol(call.callee).ty) {
                    self.program.drop_words(1);
                }
            }
            Stmt::Assign(assign) => {
                self.generate_expr(&assign.dest)?;
                self.generate_expr(&assign.source)?;
                let source = self.type_of(assign.source.id(), assign.source.span())?;
                if source.is_float() {
                    self.program.pop_float("$f0");
                    self.program.pop_int("$t0");
                    self.program.emit("swc1 $f0, 0($t0)");
                } else {
                    self.program.pop_int("$t1");
                    self.program.pop_int("$t0");
                    self.program.emit("sw $t1, 0($t0)");
                }
            }
            Stmt::If(branch) => self.generate_if(branch)?,
            Stmt::While(lp) => self.generate_while(lp)?,
            Stmt::Return(ret) => self.generate_return(ret)?,
        }

        debug_assert_eq!(
            self.program.depth(),
            depth,
            "statement at {} changed the stack depth",
            stmt.span()
        );
        Ok(())
    }

    fn generate_if(&mut self, branch: &IfStmt<'_>) -> Result<(), CodeGenError> {
        let otherwise = self.local_label("else");
        let end = self.local_label("ifelse.end");

        self.generate_expr(&branch.condition)?;
        self.program.pop_int("$t0");
        self.program.emit(format!("beq $t0, $0, {}", otherwise));
        self.generate_block(&branch.then_block)?;
        self.program.emit(format!("j {}", end));
        self.program.emit_label(&otherwise);
        self.generate_block(&branch.else_block)?;
        self.program.emit_label(&end);
        Ok(())
    }

    fn generate_while(&mut self, lp: &WhileStmt<'_>) -> Result<(), CodeGenError> {
        let head = self.local_label("while");
        let end = self.local_label("while.end");

        self.program.emit_label(&head);
        self.generate_expr(&lp.condition)?;
        self.program.pop_int("$t0");
        self.program.emit(format!("beq $t0, $0, {}", end));
        self.generate_block(&lp.body)?;
        self.program.emit(format!("j {}", head));
        self.program.emit_label(&end);
        Ok(())
    }

    /// The value is left on the stack for the end label to pick up.
    fn generate_return(&mut self, ret: &ReturnStmt<'_>) -> Result<(), CodeGenError> {
        self.generate_expr(&ret.value)?;

        let end = match self.frame() {
            Some(frame) => frame.end_label().to_string(),
            None => {
                return Err(CodeGenError::InvalidOperand {
                    operation: "return",
                    ty: self.type_of(ret.value.id(), ret.value.span())?.clone(),
                    span: ret.span,
                });
            }
        };

        if self.type_of(ret.value.id(), ret.value.span())?.is_void() {
            self.program.emit(format!("j {}", end));
        } else {
            self.program.jump_with_value(&end);
        }
        Ok(())
    }
}
