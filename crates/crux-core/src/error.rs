//! Stage-tagged diagnostics for Crux.
//!
//! Every stage of the pipeline records its problems as [`Diagnostic`] values
//! in an ordered [`Diagnostics`] log that it hands back to the caller.
//!
//! ## Error Hierarchy
//!
//! ```text
//! Diagnostic
//! ├── Syntax         - fatal, ends the parse
//! ├── DeclareSymbol  - recoverable, an error symbol is substituted
//! ├── ResolveSymbol  - recoverable, an error symbol is substituted
//! ├── Type           - recoverable, an error type is substituted
//! └── CodeGen        - fatal, no assembly is produced
//! ```
//!
//! Each variant renders as the single line the driver prints. Symbol errors
//! additionally carry a dump of the scope chain that [`Diagnostic::report`]
//! appends after the line.

use std::fmt;

use thiserror::Error;

use crate::Span;

// ============================================================================
// Diagnostic
// ============================================================================

/// The pipeline stage a diagnostic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Parsing and symbol resolution.
    Parse,
    /// Type checking.
    Check,
    /// Assembly generation.
    CodeGen,
}

/// A single diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// A required token or nonterminal was missing.
    #[error("SyntaxError({})[Expected {expected} but got {found}.]", .span)]
    Syntax {
        expected: String,
        found: String,
        span: Span,
    },

    /// A name was declared twice in the same scope frame.
    #[error("DeclareSymbolError({})[{name} already exists.]", .span)]
    DeclareSymbol {
        name: String,
        span: Span,
        scope_dump: String,
    },

    /// A name could not be found in any active scope frame.
    #[error("ResolveSymbolError({})[Could not find {name}.]", .span)]
    ResolveSymbol {
        name: String,
        span: Span,
        scope_dump: String,
    },

    /// A type rule was violated.
    #[error("TypeError({})[{message}]", .span)]
    Type { message: String, span: Span },

    /// The generator met a tree it cannot lower.
    #[error("CodeGenError({})[{message}]", .span)]
    CodeGen { message: String, span: Span },
}

impl Diagnostic {
    /// Create a type error.
    pub fn type_error(message: impl Into<String>, span: Span) -> Self {
        Diagnostic::Type {
            message: message.into(),
            span,
        }
    }

    /// Get the span where this diagnostic was raised.
    pub fn span(&self) -> Span {
        match self {
            Diagnostic::Syntax { span, .. }
            | Diagnostic::DeclareSymbol { span, .. }
            | Diagnostic::ResolveSymbol { span, .. }
            | Diagnostic::Type { span, .. }
            | Diagnostic::CodeGen { span, .. } => *span,
        }
    }

    /// Get the stage that produced this diagnostic.
    pub fn stage(&self) -> Stage {
        match self {
            Diagnostic::Syntax { .. }
            | Diagnostic::DeclareSymbol { .. }
            | Diagnostic::ResolveSymbol { .. } => Stage::Parse,
            Diagnostic::Type { .. } => Stage::Check,
            Diagnostic::CodeGen { .. } => Stage::CodeGen,
        }
    }

    /// Whether this diagnostic stops its stage.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Diagnostic::Syntax { .. } | Diagnostic::CodeGen { .. })
    }

    /// Render the diagnostic line followed by any scope dump.
    pub fn report(&self) -> String {
        match self {
            Diagnostic::DeclareSymbol { scope_dump, .. }
            | Diagnostic::ResolveSymbol { scope_dump, .. } => {
                format!("{}\n{}", self, scope_dump)
            }
            _ => self.to_string(),
        }
    }
}

// ============================================================================
// Diagnostics
// ============================================================================

/// Ordered diagnostic log owned by one stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    /// Whether any diagnostic was recorded.
    pub fn has_errors(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of recorded diagnostics.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over the diagnostics in the order they were recorded.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    /// Whether a fatal diagnostic was recorded.
    pub fn has_fatal(&self) -> bool {
        self.entries.iter().any(Diagnostic::is_fatal)
    }

    /// Full textual report, one diagnostic (plus scope dump) after another.
    pub fn report(&self) -> String {
        let mut output = String::new();
        for diagnostic in &self.entries {
            output.push_str(&diagnostic.report());
            if !output.ends_with('\n') {
                output.push('\n');
            }
        }
        output
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.report())
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_format() {
        let diagnostic = Diagnostic::Syntax {
            expected: "SEMICOLON".into(),
            found: "CLOSE_BRACE".into(),
            span: Span::new(4, 12),
        };
        assert_eq!(
            diagnostic.to_string(),
            "SyntaxError(4,12)[Expected SEMICOLON but got CLOSE_BRACE.]"
        );
        assert!(diagnostic.is_fatal());
        assert_eq!(diagnostic.stage(), Stage::Parse);
    }

    #[test]
    fn symbol_errors_report_scope_dump() {
        let diagnostic = Diagnostic::ResolveSymbol {
            name: "y".into(),
            span: Span::new(2, 5),
            scope_dump: "Symbol(x:int)\n".into(),
        };
        assert_eq!(
            diagnostic.to_string(),
            "ResolveSymbolError(2,5)[Could not find y.]"
        );
        assert_eq!(
            diagnostic.report(),
            "ResolveSymbolError(2,5)[Could not find y.]\nSymbol(x:int)\n"
        );
        assert!(!diagnostic.is_fatal());
    }

    #[test]
    fn declare_error_format() {
        let diagnostic = Diagnostic::DeclareSymbol {
            name: "x".into(),
            span: Span::new(1, 5),
            scope_dump: String::new(),
        };
        assert_eq!(
            diagnostic.to_string(),
            "DeclareSymbolError(1,5)[x already exists.]"
        );
    }

    #[test]
    fn type_error_format() {
        let diagnostic = Diagnostic::type_error("Cannot add int with float.", Span::new(7, 3));
        assert_eq!(
            diagnostic.to_string(),
            "TypeError(7,3)[Cannot add int with float.]"
        );
        assert_eq!(diagnostic.stage(), Stage::Check);
    }

    #[test]
    fn diagnostics_report_one_line_each() {
        let mut log = Diagnostics::new();
        assert!(!log.has_errors());

        log.push(Diagnostic::type_error("first", Span::new(1, 1)));
        log.push(Diagnostic::type_error("second", Span::new(2, 1)));

        assert!(log.has_errors());
        assert!(!log.has_fatal());
        assert_eq!(log.len(), 2);
        assert_eq!(
            log.report(),
            "TypeError(1,1)[first]\nTypeError(2,1)[second]\n"
        );
    }
}
