//! Expression lowering.
//!
//! Integer and boolean values travel through `$t0..$t2`, floats through
//! `$f0..$f2`. Binary operators pop the right operand first.

use crux_core::{Type, WORD_SIZE};
use crux_parser::ast::{BinaryExpr, BinaryOp, CallExpr, CompareOp, Expr, LiteralKind};

use super::activation::storage_size;
use super::error::CodeGenError;
use super::{CodeGen, returns_value};

impl<'a> CodeGen<'a> {
    /// Generate `expr`, leaving its value on the stack.
    pub(super) fn generate_expr(&mut self, expr: &Expr<'_>) -> Result<(), CodeGenError> {
        match expr {
            Expr::Literal(literal) => {
                match literal.kind {
                    LiteralKind::Int(value) => {
                        self.program.emit(format!("li $t0, {}", value));
                        self.program.push_int("$t0");
                    }
                    LiteralKind::Bool(value) => {
                        self.program.emit(format!("li $t0, {}", u8::from(value)));
                        self.program.push_int("$t0");
                    }
                    LiteralKind::Float(value) => {
                        self.program.emit(format!("li.s $f0, {:?}", value));
                        self.program.push_float("$f0");
                    }
                }
                Ok(())
            }
            Expr::AddressOf(address) => {
                if !self.record.load_address(&mut self.program, "$t0", address.symbol) {
                    return Err(CodeGenError::Unbound {
                        name: self.symbol(address.symbol).name.clone(),
                        span: address.span,
                    });
                }
                self.program.push_int("$t0");
                Ok(())
            }
            Expr::Deref(deref) => {
                self.generate_expr(&deref.operand)?;
                let ty = self.type_of(deref.id, deref.span)?;
                self.program.pop_int("$t0");
                match ty {
                    Type::Float => {
                        self.program.emit("lwc1 $f0, 0($t0)");
                        self.program.push_float("$f0");
                    }
                    Type::Int | Type::Bool => {
                        self.program.emit("lw $t0, 0($t0)");
                        self.program.push_int("$t0");
                    }
                    _ => {
                        return Err(CodeGenError::InvalidOperand {
                            operation: "load",
                            ty: ty.clone(),
                            span: deref.span,
                        });
                    }
                }
                Ok(())
            }
            Expr::Index(index) => {
                let element = match self.type_of(index.id, index.span)? {
                    Type::Address(element) => storage_size(element, index.span)?,
                    other => {
                        return Err(CodeGenError::InvalidOperand {
                            operation: "index",
                            ty: other.clone(),
                            span: index.span,
                        });
                    }
                };

                self.generate_expr(&index.base)?;
                self.generate_expr(&index.index)?;
                self.program.pop_int("$t1");
                self.program.pop_int("$t0");
                self.program.emit(format!("li $t2, {}", element));
                self.program.emit("mul $t1, $t1, $t2");
                self.program.emit("add $t0, $t0, $t1");
                self.program.push_int("$t0");
                Ok(())
            }
            Expr::Binary(binary) => {
                self.generate_expr(&binary.left)?;
                self.generate_expr(&binary.right)?;
                let operand = self.type_of(binary.left.id(), binary.left.span())?;
                if operand.is_float() {
                    self.float_binary(binary, operand)
                } else {
                    self.int_binary(binary.op);
                    Ok(())
                }
            }
            Expr::Not(not) => {
                self.generate_expr(&not.operand)?;
                self.program.pop_int("$t0");
                self.program.emit("xori $t0, $t0, 1");
                self.program.push_int("$t0");
                Ok(())
            }
            Expr::Call(call) => self.generate_call(call),
        }
    }

    /// Arguments are pushed left to right and released after the call.
    pub(super) fn generate_call(&mut self, call: &CallExpr<'_>) -> Result<(), CodeGenError> {
        let mut words = 0;
        for arg in call.args {
            self.generate_expr(arg)?;
            let ty = self.type_of(arg.id(), arg.span())?;
            words += (storage_size(ty, arg.span())? / WORD_SIZE) as usize;
        }

        let symbol = self.symbol(call.callee);
        let label = if symbol.name == self.entry_point && !symbol.is_builtin() {
            symbol.name.clone()
        } else {
            format!("func.{}", symbol.name)
        };
        self.program.emit(format!("jal {}", label));
        self.program.drop_words(words);

        if returns_value(&symbol.ty) {
            self.program.push_int("$v0");
        }
        Ok(())
    }

    /// Word operations on ints and bools.
    fn int_binary(&mut self, op: BinaryOp) {
        let mnemonic = match op {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "sub",
            BinaryOp::Mul => "mul",
            BinaryOp::Div => "div",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Compare(CompareOp::Ge) => "sge",
            BinaryOp::Compare(CompareOp::Le) => "sle",
            BinaryOp::Compare(CompareOp::Ne) => "sne",
            BinaryOp::Compare(CompareOp::Eq) => "seq",
            BinaryOp::Compare(CompareOp::Gt) => "sgt",
            BinaryOp::Compare(CompareOp::Lt) => "slt",
        };

        self.program.pop_int("$t1");
        self.program.pop_int("$t0");
        self.program.emit(format!("{} $t2, $t0, $t1", mnemonic));
        self.program.push_int("$t2");
    }

    fn float_binary(&mut self, binary: &BinaryExpr<'_>, operand: &Type) -> Result<(), CodeGenError> {
        let mnemonic = match binary.op {
            BinaryOp::Add => "add.s",
            BinaryOp::Sub => "sub.s",
            BinaryOp::Mul => "mul.s",
            BinaryOp::Div => "div.s",
            BinaryOp::Compare(op) => {
                self.float_compare(op);
                return Ok(());
            }
            BinaryOp::And | BinaryOp::Or => {
                return Err(CodeGenError::InvalidOperand {
                    operation: "combine",
                    ty: operand.clone(),
                    span: binary.span,
                });
            }
        };

        self.program.pop_float("$f1");
        self.program.pop_float("$f0");
        self.program.emit(format!("{} $f2, $f0, $f1", mnemonic));
        self.program.push_float("$f2");
        Ok(())
    }

    /// Float comparisons set the coprocessor flag; the result word is
    /// chosen by branching on it.
    fn float_compare(&mut self, op: CompareOp) {
        // (instruction, left register, right register, branch when flag is)
        let (test, left, right, branch) = match op {
            CompareOp::Lt => ("c.lt.s", "$f0", "$f1", "bc1t"),
            CompareOp::Le => ("c.le.s", "$f0", "$f1", "bc1t"),
            CompareOp::Gt => ("c.lt.s", "$f1", "$f0", "bc1t"),
            CompareOp::Ge => ("c.le.s", "$f1", "$f0", "bc1t"),
            CompareOp::Eq => ("c.eq.s", "$f0", "$f1", "bc1t"),
            CompareOp::Ne => ("c.eq.s", "$f0", "$f1", "bc1f"),
        };

        self.program.pop_float("$f1");
        self.program.pop_float("$f0");
        let done = self.local_label("compare");
        self.program.emit(format!("{} {}, {}", test, left, right));
        self.program.emit("li $t0, 1");
        self.program.emit(format!("{} {}", branch, done));
        self.program.emit("li $t0, 0");
        self.program.emit_label(&done);
        self.program.push_int("$t0");
    }
}

#[cfg(test)]
mod tests {
    use bumpalo::Bump;
    use crux_parser::ast::{Decl, Root, Stmt};
    use crux_parser::parse_source;

    use super::super::tests::compile;
    use super::super::{CodeGen, FunctionFrame};
    use crate::checker;

    /// Generate the value of the first `return` in `f` and report the stack
    /// depth it leaves behind.
    fn value_depth(globals: &str, ret: &str, value: &str) -> usize {
        let arena = Bump::new();
        let source = format!("{} func f(p : float) : {} {{ return {}; }}", globals, ret, value);
        let parsed = parse_source(&source, &arena);
        assert!(!parsed.has_errors(), "{}", parsed.diagnostics);
        let checked = checker::check(&parsed.root, &parsed.symbols);
        assert!(!checked.has_errors(), "{}", checked.diagnostics);

        let Root::Program(program) = parsed.root else {
            panic!("expected a program");
        };
        let mut codegen = CodeGen::new(&parsed.symbols, &checked.types);
        for decl in program.decls {
            match decl {
                Decl::Var(var) => codegen.reserve_global(var.symbol, var.span).unwrap(),
                Decl::Array(array) => codegen.reserve_global(array.symbol, array.span).unwrap(),
                Decl::Function(func) => {
                    let frame = FunctionFrame::new(
                        "f",
                        "func.f.end".into(),
                        func.params,
                        &parsed.symbols,
                        func.span,
                    )
                    .unwrap();
                    codegen.record = std::mem::take(&mut codegen.record).enter(frame);

                    let Stmt::Return(stmt) = func.body.stmts[0] else {
                        panic!("expected a return");
                    };
                    codegen.generate_expr(&stmt.value).unwrap();
                }
            }
        }
        codegen.program.depth()
    }

    #[test]
    fn every_expression_gains_one_word() {
        let cases = [
            ("", "int", "1 + 2 * 3 - 4 / 2"),
            ("", "bool", "not (1 < 2) or true and false"),
            ("", "float", "p * 2.0 + p"),
            ("", "bool", "p >= 1.5"),
            ("array m : int[2][3];", "int", "m[1][2] + m[0][0]"),
            ("", "int", "::readInt()"),
            ("", "bool", "3 != 4"),
        ];
        for (globals, ret, value) in cases {
            assert_eq!(value_depth(globals, ret, value), 1, "{}", value);
        }
    }

    #[test]
    fn float_arithmetic_uses_coprocessor() {
        let program = compile("func main() : void { ::printFloat(1.5 / 0.5); }");
        let code = program.code();
        assert!(code.iter().any(|line| line == "li.s $f0, 1.5"));
        assert!(code.iter().any(|line| line == "div.s $f2, $f0, $f1"));
        assert!(code.iter().any(|line| line == "swc1 $f2, 0($sp)"));
    }

    #[test]
    fn float_comparison_branches_on_flag() {
        let program = compile(
            "func main() : void { ::printBool(2.0 > 1.0); ::printBool(2.0 != 1.0); }",
        );
        let code = program.code();
        let test = code.iter().position(|line| line == "c.lt.s $f1, $f0").unwrap();
        assert_eq!(code[test + 1], "li $t0, 1");
        assert_eq!(code[test + 2], "bc1t main.compare");
        assert_eq!(code[test + 3], "li $t0, 0");
        assert_eq!(code[test + 4], "main.compare:");
        assert!(code.iter().any(|line| line == "bc1f main.compare.1"));
    }

    #[test]
    fn index_scales_by_element_size() {
        let program = compile(
            "
            array grid : int[4][3];
            func main() : void { ::printInt(grid[2][1]); }
            ",
        );
        let code = program.code();
        let row = code.iter().position(|line| line == "li $t2, 12").unwrap();
        let column = code.iter().position(|line| line == "li $t2, 4").unwrap();
        assert!(row < column);
        assert!(code.iter().any(|line| line == "la $t0, cruxdata.grid"));
    }

    #[test]
    fn int_comparisons_set_words() {
        let program = compile("func main() : void { ::printBool(1 <= 2); }");
        assert!(program.code().iter().any(|line| line == "sle $t2, $t0, $t1"));
    }
}
