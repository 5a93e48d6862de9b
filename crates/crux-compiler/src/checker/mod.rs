//! Type checking.
//!
//! [`TypeChecker`] makes one depth-first pass over a parsed tree and records
//! exactly one [`Type`] per node in a [`TypeMap`]. Operator legality is never
//! decided here: each rule asks the operand types through their algebra
//! (`Type::add`, `Type::index`, `Type::call`, ...) and records the answer.
//!
//! ## Error reporting
//!
//! A rule that produces an error type from operands that are all valid logs a
//! `TypeError` at its own node. A rule whose operand is already an error
//! passes that error on without logging, so a failure is reported once and
//! only its direct consumers are poisoned. Error sentinels from the parser are
//! treated the same way, since the parser already reported them.

mod expr;
mod returns;
mod stmt;

pub use returns::ReturnChecker;

use crux_core::{Diagnostic, Diagnostics, Span, Type};
use crux_parser::ast::{ArrayDecl, Decl, FunctionDef, NodeId, Root, VarDecl};
use crux_parser::{Symbol, SymbolArena, SymbolId};
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use tracing::debug;

// ============================================================================
// TypeMap
// ============================================================================

/// Node to type side table. Each node is recorded once and never overwritten.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeMap {
    types: FxHashMap<NodeId, Type>,
}

impl TypeMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the type of a node.
    ///
    /// Returns `false` and keeps the existing entry if the node already has one.
    pub fn insert(&mut self, id: NodeId, ty: Type) -> bool {
        match self.types.entry(id) {
            Entry::Vacant(slot) => {
                slot.insert(ty);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Type of a node, if it was checked.
    pub fn get(&self, id: NodeId) -> Option<&Type> {
        self.types.get(&id)
    }

    /// Whether a node was checked.
    pub fn contains(&self, id: NodeId) -> bool {
        self.types.contains_key(&id)
    }

    /// Number of typed nodes.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no node was typed.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

// ============================================================================
// TypeChecker
// ============================================================================

/// Result of checking a tree.
#[derive(Debug)]
pub struct CheckOutput {
    /// Type of every node.
    pub types: TypeMap,
    /// Type errors in the order they were found.
    pub diagnostics: Diagnostics,
}

impl CheckOutput {
    /// Whether any type error was found.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

/// The function whose body is being checked.
#[derive(Debug)]
struct FunctionScope {
    name: String,
    /// Declared return type; `None` when returns cannot be checked because
    /// the signature itself is broken.
    ret: Option<Type>,
}

/// Single-pass type checker.
pub struct TypeChecker<'a> {
    /// Symbols of the parse being checked.
    symbols: &'a SymbolArena,
    /// Name of the function that starts the program.
    entry_point: &'a str,
    types: TypeMap,
    diagnostics: Diagnostics,
    /// Enclosing function, while inside a body.
    function: Option<FunctionScope>,
}

impl<'a> TypeChecker<'a> {
    /// Create a checker for a tree whose symbols live in `symbols`.
    pub fn new(symbols: &'a SymbolArena) -> Self {
        Self {
            symbols,
            entry_point: "main",
            types: TypeMap::new(),
            diagnostics: Diagnostics::new(),
            function: None,
        }
    }

    /// Use a different entry-point name than `main`.
    pub fn with_entry_point(mut self, name: &'a str) -> Self {
        self.entry_point = name;
        self
    }

    /// Check a whole tree.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn check(mut self, root: &Root<'_>) -> CheckOutput {
        match root {
            Root::Program(program) => {
                for decl in program.decls {
                    self.check_decl(decl);
                }
                self.record(program.id, Type::Void);
            }
            Root::Error(error) => {
                self.settle(error.id, error.span, Type::error(error.message), &[]);
            }
        }

        debug!(
            nodes = self.types.len(),
            errors = self.diagnostics.len(),
            "type check finished"
        );

        CheckOutput {
            types: self.types,
            diagnostics: self.diagnostics,
        }
    }

    // =========================================
    // Declarations
    // =========================================

    fn check_decl(&mut self, decl: &Decl<'_>) {
        match decl {
            Decl::Var(var) => {
                self.check_var_decl(var);
            }
            Decl::Array(array) => {
                self.check_array_decl(array);
            }
            Decl::Function(func) => self.check_function(func),
        }
    }

    /// Variables must hold one of the scalar types.
    pub(super) fn check_var_decl(&mut self, var: &VarDecl) -> Type {
        let symbol = self.symbol(var.symbol);
        let ty = if symbol.ty.is_scalar() || symbol.is_error() {
            symbol.ty.clone()
        } else {
            Type::error(format!(
                "Variable {} has invalid type {}.",
                symbol.name, symbol.ty
            ))
        };
        self.settle_declaration(var.id, var.span, symbol, ty)
    }

    /// Arrays must bottom out in a scalar element type and fit in the
    /// 32-bit address space.
    fn check_array_decl(&mut self, array: &ArrayDecl) -> Type {
        let symbol = self.symbol(array.symbol);
        let base = symbol.ty.element_base();
        let ty = if symbol.is_error() {
            symbol.ty.clone()
        } else if !base.is_scalar() {
            Type::error(format!(
                "Array {} has invalid base type {}.",
                symbol.name, base
            ))
        } else if symbol.ty.num_bytes().is_none() {
            Type::error(format!(
                "Array {} of type {} is too large.",
                symbol.name, symbol.ty
            ))
        } else {
            symbol.ty.clone()
        };
        self.settle_declaration(array.id, array.span, symbol, ty)
    }

    fn check_function(&mut self, func: &FunctionDef<'_>) {
        let symbol = self.symbol(func.symbol);

        let (mut ty, ret) = match &symbol.ty {
            Type::Function { params, ret } => {
                let signature = self.check_signature(&symbol.name, params, ret, &symbol.ty);
                let ret = (!ret.is_error()).then(|| (**ret).clone());
                (signature, ret)
            }
            other => (other.clone(), None),
        };

        let outer = self.function.replace(FunctionScope {
            name: symbol.name.clone(),
            ret: ret.clone(),
        });
        self.check_block(&func.body);
        self.function = outer;

        let needs_return = ret.as_ref().is_some_and(|ret| !ret.is_void());
        if !ty.is_error() && needs_return && !ReturnChecker::new().all_paths_return(&func.body) {
            ty = Type::error(format!(
                "Not all paths in function {} have a return.",
                symbol.name
            ));
        }

        self.settle_declaration(func.id, func.span, symbol, ty);
    }

    /// The entry point takes nothing and returns void; other functions take
    /// scalar parameters only.
    fn check_signature(&self, name: &str, params: &[Type], ret: &Type, ty: &Type) -> Type {
        if name == self.entry_point {
            if !params.is_empty() || !ret.is_void() {
                return Type::error(format!("Function {} has invalid signature.", name));
            }
            return ty.clone();
        }

        for (position, param) in params.iter().enumerate() {
            if param.is_void() {
                return Type::error(format!(
                    "Function {} has a void argument in position {}.",
                    name, position
                ));
            }
            if let Some(message) = param.error_message() {
                return Type::error(format!(
                    "Function {} has an error in argument in position {}: {}",
                    name, position, message
                ));
            }
        }

        if ret.is_error() {
            return Type::error(format!(
                "Function {} has invalid return type {}.",
                name, ret
            ));
        }

        ty.clone()
    }

    // =========================================
    // Recording
    // =========================================

    /// Look up a symbol of the checked parse.
    fn symbol(&self, id: SymbolId) -> &'a Symbol {
        self.symbols.get(id)
    }

    /// Record a type without reporting it.
    fn record(&mut self, id: NodeId, ty: Type) -> Type {
        let inserted = self.types.insert(id, ty.clone());
        debug_assert!(inserted, "node {:?} typed twice", id);
        ty
    }

    /// Record the type computed from `inputs`, reporting it if it is an
    /// error that none of the inputs already carried.
    fn settle(&mut self, id: NodeId, span: Span, ty: Type, inputs: &[&Type]) -> Type {
        if let Type::Error(message) = &ty {
            if !inputs.iter().any(|input| input.is_error()) {
                self.diagnostics
                    .push(Diagnostic::type_error(message.clone(), span));
            }
        }
        self.record(id, ty)
    }

    /// Declarations of error sentinels were reported by the parser.
    fn settle_declaration(&mut self, id: NodeId, span: Span, symbol: &Symbol, ty: Type) -> Type {
        if symbol.is_error() {
            self.record(id, ty)
        } else {
            self.settle(id, span, ty, &[])
        }
    }
}

/// Check `root` with the default entry point.
pub fn check(root: &Root<'_>, symbols: &SymbolArena) -> CheckOutput {
    TypeChecker::new(symbols).check(root)
}
