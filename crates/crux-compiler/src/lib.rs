//! Crux compiler passes.
//!
//! ## Architecture
//!
//! - **Type checking**: one post-order pass records a type for every node and
//!   collects recoverable type errors
//! - **Code generation**: lowers a checked tree to MIPS assembly, aborting on
//!   the first node it cannot lower
//!
//! ## Modules
//!
//! - [`checker`]: type map, type checker and return-path verification
//! - [`codegen`]: program buffer, activation records and instruction lowering
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use crux_compiler::{checker, codegen};
//! use crux_parser::parse_source;
//!
//! let arena = Bump::new();
//! let parsed = parse_source("func main() : void { ::printInt(6 * 7); }", &arena);
//! assert!(!parsed.has_errors());
//!
//! let checked = checker::check(&parsed.root, &parsed.symbols);
//! assert!(!checked.has_errors());
//!
//! let program = codegen::generate(&parsed.root, &parsed.symbols, &checked.types).unwrap();
//! assert!(program.to_string().contains("jal func.printInt"));
//! ```

pub mod checker;
pub mod codegen;

pub use checker::{CheckOutput, ReturnChecker, TypeChecker, TypeMap};
pub use codegen::{CodeGen, CodeGenError, Program};
