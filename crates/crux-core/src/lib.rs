//! Crux core types.
//!
//! Shared building blocks for every compiler stage:
//! - [`Span`] source positions carried by tokens and tree nodes
//! - [`Diagnostic`] and [`Diagnostics`], the stage-tagged error log
//! - [`Type`], the closed set of Crux types and the operations each one allows

pub mod error;
pub mod span;
pub mod types;

pub use error::{Diagnostic, Diagnostics, Stage};
pub use span::Span;
pub use types::{BinaryOperation, Type, WORD_SIZE, type_list};
