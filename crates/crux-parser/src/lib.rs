//! Crux parser crate.
//!
//! This crate turns Crux source into a scope-resolved syntax tree:
//! - Lexical analysis behind the [`TokenSource`] boundary
//! - Arena-allocated tree definitions
//! - Nested scope resolution with error sentinels
//! - Recursive-descent parser with a single fatal syntax error
//!
//! # Example
//!
//! ```
//! use crux_parser::parse_source;
//! use bumpalo::Bump;
//!
//! let arena = Bump::new();
//! let source = r#"
//!     var total : int;
//!
//!     func main() : void {
//!         let total = ::readInt() * 2;
//!         ::printInt(total);
//!     }
//! "#;
//!
//! let output = parse_source(source, &arena);
//! if output.has_errors() {
//!     eprint!("{}", output.diagnostics);
//! }
//! ```

pub mod ast;
pub mod lexer;
pub mod scope;
pub mod symbol;

pub use ast::{NodeId, ParseOutput, Parser, Root, parse_source};
pub use lexer::{Lexer, Token, TokenBuffer, TokenKind, TokenSource};
pub use scope::ScopeResolver;
pub use symbol::{Symbol, SymbolArena, SymbolId, SymbolKind};
