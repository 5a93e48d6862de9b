//! Crux: a compiler for the Crux teaching language targeting MIPS assembly.
//!
//! The pipeline has three stages, each refusing to run over the errors of the
//! one before it:
//!
//! 1. **Parse**: tokens become an arena-allocated tree with every name
//!    resolved to a symbol ([`crux_parser`])
//! 2. **Check**: every node gets a type ([`crux_compiler::checker`])
//! 3. **Generate**: the checked tree is lowered to SPIM/MARS assembly
//!    ([`crux_compiler::codegen`])
//!
//! # Example
//!
//! ```
//! use crux::{CompileOptions, compile};
//!
//! let source = r#"
//!     var total : int;
//!     func main() : void {
//!         let total = 6 * 7;
//!         ::printInt(total);
//!     }
//! "#;
//!
//! let output = compile(source, &CompileOptions::default()).unwrap();
//! let assembly = output.assembly.unwrap();
//! assert!(assembly.contains("cruxdata.total: .space 4"));
//! ```

use bumpalo::Bump;
use thiserror::Error;
use tracing::{debug, warn};

pub use crux_compiler::{checker, codegen};
pub use crux_core::{Diagnostic, Diagnostics, Span, Stage, Type};
pub use crux_parser::{Lexer, Token, TokenBuffer, TokenKind, TokenSource};

use crux_compiler::{CodeGen, TypeChecker};
use crux_parser::Parser;

// ============================================================================
// Options
// ============================================================================

/// Compilation settings.
///
/// ```
/// use crux::CompileOptions;
///
/// let options = CompileOptions::new().entry_point("start").check_only(true);
/// assert_eq!(options.entry_point_name(), "start");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    entry_point: String,
    check_only: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            entry_point: "main".to_string(),
            check_only: false,
        }
    }
}

impl CompileOptions {
    /// Default options: entry point `main`, full compilation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the function the program starts in.
    pub fn entry_point(mut self, name: impl Into<String>) -> Self {
        self.entry_point = name.into();
        self
    }

    /// Stop after type checking.
    pub fn check_only(mut self, check_only: bool) -> Self {
        self.check_only = check_only;
        self
    }

    pub fn entry_point_name(&self) -> &str {
        &self.entry_point
    }

    pub fn is_check_only(&self) -> bool {
        self.check_only
    }
}

// ============================================================================
// Errors
// ============================================================================

/// The stage that stopped compilation, with everything it reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Syntax or symbol errors.
    #[error("{0}")]
    Parse(Diagnostics),
    /// Type errors.
    #[error("{0}")]
    Type(Diagnostics),
    /// The generator could not lower the tree.
    #[error("{0}")]
    CodeGen(Diagnostics),
}

impl CompileError {
    /// Diagnostics of the failing stage.
    pub fn diagnostics(&self) -> &Diagnostics {
        match self {
            CompileError::Parse(diagnostics)
            | CompileError::Type(diagnostics)
            | CompileError::CodeGen(diagnostics) => diagnostics,
        }
    }

    /// The failing stage.
    pub fn stage(&self) -> Stage {
        match self {
            CompileError::Parse(_) => Stage::Parse,
            CompileError::Type(_) => Stage::Check,
            CompileError::CodeGen(_) => Stage::CodeGen,
        }
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Result of a successful compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOutput {
    /// The assembly text, absent when only checking was requested.
    pub assembly: Option<String>,
    /// Number of tree nodes that were checked.
    pub node_count: u32,
}

/// Compile Crux source text.
pub fn compile(source: &str, options: &CompileOptions) -> Result<CompileOutput, CompileError> {
    compile_tokens(Lexer::new(source), options)
}

/// Compile from any token source.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn compile_tokens<'src, S: TokenSource<'src>>(
    tokens: S,
    options: &CompileOptions,
) -> Result<CompileOutput, CompileError> {
    let arena = Bump::new();
    let parsed = Parser::parse(tokens, &arena);
    if parsed.has_errors() {
        warn!(errors = parsed.diagnostics.len(), "parsing failed");
        return Err(CompileError::Parse(parsed.diagnostics));
    }

    let checked = TypeChecker::new(&parsed.symbols)
        .with_entry_point(&options.entry_point)
        .check(&parsed.root);
    if checked.has_errors() {
        warn!(errors = checked.diagnostics.len(), "type checking failed");
        return Err(CompileError::Type(checked.diagnostics));
    }

    if options.check_only {
        debug!(nodes = parsed.node_count, "check finished");
        return Ok(CompileOutput {
            assembly: None,
            node_count: parsed.node_count,
        });
    }

    let program = CodeGen::new(&parsed.symbols, &checked.types)
        .with_entry_point(&options.entry_point)
        .generate(&parsed.root)
        .map_err(|error| {
            warn!(%error, "code generation failed");
            let mut diagnostics = Diagnostics::new();
            diagnostics.push(error.into());
            CompileError::CodeGen(diagnostics)
        })?;

    debug!(
        nodes = parsed.node_count,
        instructions = program.code().len(),
        "compilation finished"
    );

    Ok(CompileOutput {
        assembly: Some(program.to_string()),
        node_count: parsed.node_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let options = CompileOptions::default();
        assert_eq!(options.entry_point_name(), "main");
        assert!(!options.is_check_only());
    }

    #[test]
    fn check_only_skips_generation() {
        let options = CompileOptions::new().check_only(true);
        let output = compile("func main() : void { }", &options).unwrap();
        assert!(output.assembly.is_none());
        assert!(output.node_count > 0);
    }

    #[test]
    fn stages_stop_the_pipeline() {
        let error = compile("func main() : void { ::printInt(x); }", &CompileOptions::new())
            .unwrap_err();
        assert_eq!(error.stage(), Stage::Parse);

        let error = compile("func main() : void { ::printInt(true); }", &CompileOptions::new())
            .unwrap_err();
        assert_eq!(error.stage(), Stage::Check);
        assert_eq!(error.diagnostics().len(), 1);
    }

    #[test]
    fn error_renders_the_report() {
        let error = compile("func main() : void { return 1 }", &CompileOptions::new())
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "SyntaxError(1,31)[Expected SEMICOLON but got CLOSE_BRACE.]\n"
        );
    }
}
