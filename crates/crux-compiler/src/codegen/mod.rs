//! MIPS code generation.
//!
//! [`CodeGen`] lowers a checked tree to stack-discipline MIPS assembly. Every
//! expression leaves exactly one word on the evaluation stack (calls to void
//! functions leave none), every operator pops its operands and pushes its
//! result, and every statement leaves the stack as it found it.
//!
//! ## Functions
//!
//! Before a function's prologue is emitted, its [`FunctionFrame`] is built:
//! parameters get offsets above `$fp`, then a pre-pass over the whole body
//! (nested blocks included) assigns every local a slot below the saved
//! registers. The prologue can then reserve the final locals size directly.
//!
//! Every `return` jumps to the function's end label, where the result is
//! popped into `$v0` once and the frame is torn down. The entry point ends
//! in the exit syscall instead.

mod activation;
mod error;
mod expr;
mod labels;
mod program;
mod runtime;
mod stmt;

pub use activation::{ActivationRecord, FunctionFrame, GlobalRecord, Location};
pub use error::CodeGenError;
pub use labels::LabelRegistry;
pub use program::{FIXED_FRAME_SIZE, Program};

use std::mem;

use crux_core::{Span, Type};
use crux_parser::ast::{Decl, FunctionDef, NodeId, Root};
use crux_parser::{Symbol, SymbolArena, SymbolId};
use tracing::debug;

use crate::checker::TypeMap;

/// Code generator for one checked tree.
pub struct CodeGen<'a> {
    symbols: &'a SymbolArena,
    types: &'a TypeMap,
    /// Name of the function that starts the program.
    entry_point: &'a str,
    program: Program,
    record: ActivationRecord,
}

impl<'a> CodeGen<'a> {
    /// Create a generator over a tree checked into `types`.
    pub fn new(symbols: &'a SymbolArena, types: &'a TypeMap) -> Self {
        Self {
            symbols,
            types,
            entry_point: "main",
            program: Program::new(),
            record: ActivationRecord::global(),
        }
    }

    /// Use a different entry-point name than `main`.
    pub fn with_entry_point(mut self, name: &'a str) -> Self {
        self.entry_point = name;
        self
    }

    /// Generate the whole program.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn generate(mut self, root: &Root<'_>) -> Result<Program, CodeGenError> {
        let program_node = match root {
            Root::Program(program) => program,
            Root::Error(error) => {
                return Err(CodeGenError::ErrorNode {
                    message: error.message.to_string(),
                    span: error.span,
                });
            }
        };

        for decl in program_node.decls {
            match decl {
                Decl::Var(var) => self.reserve_global(var.symbol, var.span)?,
                Decl::Array(array) => self.reserve_global(array.symbol, array.span)?,
                Decl::Function(func) => self.generate_function(func)?,
            }
        }

        debug!(
            instructions = self.program.code().len(),
            data = self.program.data().len(),
            "code generation finished"
        );

        Ok(self.program)
    }

    fn reserve_global(&mut self, id: SymbolId, span: Span) -> Result<(), CodeGenError> {
        self.record
            .globals_mut()
            .reserve(&mut self.program, id, self.symbols, span)
    }

    // =========================================
    // Functions
    // =========================================

    fn generate_function(&mut self, func: &FunctionDef<'_>) -> Result<(), CodeGenError> {
        let symbol = self.symbol(func.symbol);
        let is_entry = symbol.name == self.entry_point;

        let label = self.function_label(symbol);
        let start = self.program.request_label(&label);
        let end = self.program.request_label(&format!("{}.end", start));

        let mut frame =
            FunctionFrame::new(&symbol.name, end.clone(), func.params, self.symbols, func.span)?;
        frame.size_block(&func.body, self.symbols)?;
        let locals = frame.locals_size();

        let outer = mem::take(&mut self.record);
        self.record = outer.enter(frame);

        self.program.emit_label(&start);
        self.program.emit_prologue(locals);
        self.generate_block(&func.body)?;
        self.program.emit_label(&end);

        if is_entry {
            self.program.emit_exit();
        } else {
            if returns_value(&symbol.ty) {
                self.program.retrieve_value("$v0");
            }
            self.program.emit_epilogue(locals);
        }

        let inner = mem::take(&mut self.record);
        self.record = inner.exit();

        debug!(function = %symbol.name, locals, "generated function");
        Ok(())
    }

    /// The entry point keeps its own name; other functions are prefixed so
    /// they cannot clash with it.
    fn function_label(&self, symbol: &Symbol) -> String {
        if symbol.name == self.entry_point {
            symbol.name.clone()
        } else {
            format!("func.{}", symbol.name)
        }
    }

    // =========================================
    // Lookups
    // =========================================

    fn symbol(&self, id: SymbolId) -> &'a Symbol {
        self.symbols.get(id)
    }

    fn type_of(&self, id: NodeId, span: Span) -> Result<&'a Type, CodeGenError> {
        self.types.get(id).ok_or(CodeGenError::Untyped { span })
    }

    /// The function whose body is being generated.
    fn frame(&self) -> Option<&FunctionFrame> {
        self.record.frame()
    }

    /// Request a label scoped by the current function's name.
    fn local_label(&mut self, suffix: &str) -> String {
        let name = match self.frame() {
            Some(frame) => format!("{}.{}", frame.name(), suffix),
            None => suffix.to_string(),
        };
        self.program.request_label(&name)
    }
}

/// Whether calling a function of type `ty` yields a word.
fn returns_value(ty: &Type) -> bool {
    ty.return_type().is_some_and(|ret| !ret.is_void())
}

/// Generate assembly for `root` with the default entry point.
pub fn generate(
    root: &Root<'_>,
    symbols: &SymbolArena,
    types: &TypeMap,
) -> Result<Program, CodeGenError> {
    CodeGen::new(symbols, types).generate(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker;
    use bumpalo::Bump;
    use crux_parser::parse_source;

    /// Parse, check and generate, panicking on any diagnostic.
    pub(super) fn compile(source: &str) -> Program {
        let arena = Bump::new();
        let parsed = parse_source(source, &arena);
        assert!(!parsed.has_errors(), "{}", parsed.diagnostics);
        let checked = checker::check(&parsed.root, &parsed.symbols);
        assert!(!checked.has_errors(), "{}", checked.diagnostics);
        generate(&parsed.root, &parsed.symbols, &checked.types).unwrap()
    }

    fn position(program: &Program, line: &str) -> usize {
        program
            .code()
            .iter()
            .position(|code| code == line)
            .unwrap_or_else(|| panic!("missing `{}` in\n{}", line, program.code().join("\n")))
    }

    #[test]
    fn global_store_end_to_end() {
        let program = compile(
            "
            var x : int;
            func main() : void {
                let x = 5;
            }
            ",
        );

        assert_eq!(program.data(), ["cruxdata.x: .space 4"]);
        assert_eq!(program.depth(), 0);

        let label = position(&program, "main:");
        let address = position(&program, "la $t0, cruxdata.x");
        let store = position(&program, "sw $t1, 0($t0)");
        let end = position(&program, "main.end:");
        let exit = position(&program, "li    $v0, 10");
        assert!(label < address && address < store && store < end && end < exit);
        assert_eq!(program.code().last().map(String::as_str), Some("syscall"));
        assert!(!program.code().iter().any(|line| line == "jr $ra"));
    }

    #[test]
    fn function_frame_and_return() {
        let program = compile(
            "
            func twice(n : int) : int {
                var result : int;
                let result = n * 2;
                return result;
            }
            func main() : void { ::printInt(::twice(4)); }
            ",
        );

        let start = position(&program, "func.twice:");
        let reserve = position(&program, "subu $sp, $sp, 4");
        let param = position(&program, "addi $t0, $fp, 0");
        let local = position(&program, "addi $t0, $fp, -12");
        let jump = position(&program, "j func.twice.end");
        let end = position(&program, "func.twice.end:");
        let retrieve = position(&program, "lw $v0, 0($sp)");
        let ret = position(&program, "jr $ra");
        assert!(start < reserve && reserve < local && local < param);
        assert!(param < jump && jump < end && end < retrieve && retrieve < ret);

        let call = position(&program, "jal func.twice");
        assert_eq!(program.code()[call + 1], "addi $sp, $sp, 4");
        assert_eq!(program.code()[call + 2], "subu $sp, $sp, 4");
        assert_eq!(program.code()[call + 3], "sw $v0, 0($sp)");
        position(&program, "jal func.printInt");
    }

    #[test]
    fn sibling_ifs_get_distinct_labels() {
        let program = compile(
            "
            func f(c : bool) : void {
                if c { ::println(); }
                if c { ::println(); } else { ::println(); }
            }
            func main() : void { ::f(true); }
            ",
        );

        for label in ["f.else:", "f.ifelse.end:", "f.else.1:", "f.ifelse.end.1:"] {
            position(&program, label);
        }
        let branch = position(&program, "beq $t0, $0, f.else.1");
        assert!(branch > position(&program, "f.ifelse.end:"));
    }

    #[test]
    fn while_loop_shape() {
        let program = compile(
            "
            var i : int;
            func main() : void {
                while i < 10 { let i = i + 1; }
            }
            ",
        );

        let head = position(&program, "main.while:");
        let exit = position(&program, "beq $t0, $0, main.while.end");
        let back = position(&program, "j main.while");
        let end = position(&program, "main.while.end:");
        assert!(head < exit && exit < back && back < end);
    }

    #[test]
    fn void_call_statement_leaves_stack_alone() {
        let program = compile("func main() : void { ::println(); ::readInt(); }");
        let read = position(&program, "jal func.readInt");
        assert_eq!(program.code()[read + 1], "subu $sp, $sp, 4");
        assert_eq!(program.code()[read + 3], "addi $sp, $sp, 4");
        assert_eq!(program.depth(), 0);
    }

    #[test]
    fn calling_the_entry_point_uses_its_label() {
        let program = compile(
            "
            var n : int;
            func main() : void {
                if n < 1 { let n = n + 1; ::main(); }
            }
            ",
        );
        position(&program, "jal main");
    }

    #[test]
    fn error_root_is_fatal() {
        let arena = Bump::new();
        let parsed = parse_source("func main() : void {", &arena);
        let checked = checker::check(&parsed.root, &parsed.symbols);

        let error = generate(&parsed.root, &parsed.symbols, &checked.types).unwrap_err();
        assert!(matches!(error, CodeGenError::ErrorNode { .. }));
        assert_eq!(
            crux_core::Diagnostic::from(error).to_string(),
            "CodeGenError(1,21)[CodeGen cannot compile an error node: \
             SyntaxError(1,21)[Expected CLOSE_BRACE but got EOF.]]"
        );
    }

    #[test]
    fn unchecked_tree_is_rejected() {
        let arena = Bump::new();
        let parsed = parse_source("func main() : void { ::printInt(1); }", &arena);
        let types = TypeMap::new();

        let error = generate(&parsed.root, &parsed.symbols, &types).unwrap_err();
        assert!(matches!(error, CodeGenError::Untyped { .. }));
    }

    #[test]
    fn custom_entry_point() {
        let arena = Bump::new();
        let parsed = parse_source("func start() : void { ::println(); }", &arena);
        let checked = checker::TypeChecker::new(&parsed.symbols)
            .with_entry_point("start")
            .check(&parsed.root);
        assert!(!checked.has_errors(), "{}", checked.diagnostics);

        let program = CodeGen::new(&parsed.symbols, &checked.types)
            .with_entry_point("start")
            .generate(&parsed.root)
            .unwrap();
        position(&program, "start:");
        position(&program, "start.end:");
    }
}
