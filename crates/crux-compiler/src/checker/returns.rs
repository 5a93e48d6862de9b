//! Return path verification for non-void functions.
//!
//! # Example
//!
//! ```ignore
//! let checker = ReturnChecker::new();
//! if !checker.all_paths_return(&func.body) {
//!     // Not all paths in the function have a return
//! }
//! ```

use crux_parser::ast::{Block, Stmt};

/// Verifies that every path through a body reaches a `return`.
///
/// A statement list returns when one of its statements is a `return`, or an
/// `if` whose two branches both return. Loops never count, since their body
/// may run zero times.
pub struct ReturnChecker;

impl ReturnChecker {
    /// Create a new return checker.
    pub fn new() -> Self {
        Self
    }

    /// Check if all paths through `block` return.
    pub fn all_paths_return(&self, block: &Block<'_>) -> bool {
        block.stmts.iter().any(|stmt| self.returns(stmt))
    }

    fn returns(&self, stmt: &Stmt<'_>) -> bool {
        match stmt {
            Stmt::Return(_) => true,
            Stmt::If(branch) => {
                self.all_paths_return(&branch.then_block)
                    && self.all_paths_return(&branch.else_block)
            }
            _ => false,
        }
    }
}

impl Default for ReturnChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use crux_parser::ast::{Decl, Root};
    use crux_parser::parse_source;

    fn body_returns(body: &str) -> bool {
        let arena = Bump::new();
        let source = format!("func f(c : bool) : int {{ {} }}", body);
        let output = parse_source(&source, &arena);
        assert!(!output.has_errors(), "{}", output.diagnostics);

        let Root::Program(program) = output.root else {
            panic!("expected a program");
        };
        let Some(Decl::Function(func)) = program.decls.first() else {
            panic!("expected a function");
        };
        ReturnChecker::new().all_paths_return(&func.body)
    }

    #[test]
    fn empty_body_does_not_return() {
        assert!(!body_returns(""));
    }

    #[test]
    fn trailing_return() {
        assert!(body_returns("::println(); return 1;"));
    }

    #[test]
    fn return_before_dead_code() {
        assert!(body_returns("return 1; ::println();"));
    }

    #[test]
    fn if_without_else() {
        assert!(!body_returns("if c { return 1; }"));
    }

    #[test]
    fn if_with_both_branches() {
        assert!(body_returns("if c { return 1; } else { return 2; }"));
    }

    #[test]
    fn nested_branches() {
        assert!(body_returns(
            "if c { if c { return 1; } else { return 2; } } else { return 3; }"
        ));
        assert!(!body_returns(
            "if c { if c { return 1; } } else { return 3; }"
        ));
    }

    #[test]
    fn loops_do_not_count() {
        assert!(!body_returns("while c { return 1; }"));
    }
}
