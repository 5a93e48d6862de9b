use crux_core::{Diagnostic, Span, Type};
use thiserror::Error;

/// Fatal code generation failure. No assembly is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeGenError {
    /// The tree is the placeholder left by an aborted parse.
    #[error("CodeGen cannot compile an error node: {message}")]
    ErrorNode { message: String, span: Span },

    /// A node has no entry in the type map.
    #[error("CodeGen cannot compile a node that was not type checked.")]
    Untyped { span: Span },

    /// Storage was requested for a type without a size.
    #[error("No size known for {ty}.")]
    NoSize { ty: Type, span: Span },

    /// An operation met a value it cannot lower.
    #[error("CodeGen cannot {operation} a value of type {ty}.")]
    InvalidOperand {
        operation: &'static str,
        ty: Type,
        span: Span,
    },

    /// A name has no frame slot or static label.
    #[error("CodeGen has no storage for {name}.")]
    Unbound { name: String, span: Span },
}

impl CodeGenError {
    /// Get the span of the node that could not be lowered.
    pub fn span(&self) -> Span {
        match self {
            CodeGenError::ErrorNode { span, .. }
            | CodeGenError::Untyped { span }
            | CodeGenError::NoSize { span, .. }
            | CodeGenError::InvalidOperand { span, .. }
            | CodeGenError::Unbound { span, .. } => *span,
        }
    }
}

impl From<CodeGenError> for Diagnostic {
    fn from(error: CodeGenError) -> Self {
        Diagnostic::CodeGen {
            message: error.to_string(),
            span: error.span(),
        }
    }
}
