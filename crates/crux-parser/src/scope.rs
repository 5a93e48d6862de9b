//! Nested scope resolution for the parser.
//!
//! [`ScopeResolver`] keeps the live path of scope frames, root first, as a
//! stack: entering a scope pushes a frame whose parent is the frame below it,
//! exiting pops it again. The root frame holds the runtime built-ins.
//!
//! Failed declarations and lookups never abort the parse. They record a
//! diagnostic carrying a dump of the active chain and hand back an error
//! sentinel symbol so tree construction can carry on.

use crux_core::{Diagnostic, Diagnostics, Span, Type};
use rustc_hash::FxHashMap;

use crate::symbol::{Symbol, SymbolArena, SymbolId, SymbolKind};

// ============================================================================
// Frame
// ============================================================================

/// One level of bindings.
#[derive(Debug, Default)]
struct Frame {
    /// Nesting depth, 0 for the root.
    depth: u32,
    /// Bindings by name.
    names: FxHashMap<String, SymbolId>,
    /// Bindings in declaration order, for dumps.
    order: Vec<SymbolId>,
}

impl Frame {
    fn new(depth: u32) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }
}

// ============================================================================
// ScopeResolver
// ============================================================================

/// Declares and resolves identifiers along the active scope chain.
#[derive(Debug)]
pub struct ScopeResolver {
    /// Active frames, root at index 0, current frame last.
    frames: Vec<Frame>,
    /// Every symbol created so far.
    symbols: SymbolArena,
}

impl ScopeResolver {
    /// Create a resolver whose root frame holds the built-ins.
    pub fn new() -> Self {
        let mut resolver = Self {
            frames: vec![Frame::new(0)],
            symbols: SymbolArena::new(),
        };
        for (name, ty) in builtins() {
            resolver.bind(name, ty, SymbolKind::Builtin, Span::default());
        }
        resolver
    }

    /// Depth of the current frame.
    pub fn depth(&self) -> u32 {
        self.frames.last().map_or(0, |frame| frame.depth)
    }

    /// Open a frame nested in the current one.
    pub fn enter_scope(&mut self) {
        let depth = self.depth() + 1;
        self.frames.push(Frame::new(depth));
    }

    /// Close the current frame. The root frame is never closed.
    pub fn exit_scope(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Declare `name` in the current frame.
    ///
    /// A name already bound in the current frame yields an error sentinel
    /// and a `DeclareSymbolError`. The sentinel takes over the name, so later
    /// lookups in this frame find it instead of the earlier binding. Dumps
    /// still list only the earlier binding.
    pub fn declare(
        &mut self,
        name: &str,
        ty: Type,
        kind: SymbolKind,
        span: Span,
        diagnostics: &mut Diagnostics,
    ) -> SymbolId {
        let taken = self
            .frames
            .last()
            .is_some_and(|frame| frame.names.contains_key(name));

        if !taken {
            return self.bind(name, ty, kind, span);
        }

        let diagnostic = Diagnostic::DeclareSymbol {
            name: name.to_string(),
            span,
            scope_dump: self.dump(),
        };
        let id = self.sentinel(name, diagnostic, diagnostics);
        if let Some(frame) = self.frames.last_mut() {
            frame.names.insert(name.to_string(), id);
        }
        id
    }

    /// Resolve `name`, searching from the current frame outward.
    pub fn resolve(&mut self, name: &str, span: Span, diagnostics: &mut Diagnostics) -> SymbolId {
        let found = self
            .frames
            .iter()
            .rev()
            .find_map(|frame| frame.names.get(name).copied());

        if let Some(id) = found {
            return id;
        }

        let diagnostic = Diagnostic::ResolveSymbol {
            name: name.to_string(),
            span,
            scope_dump: self.dump(),
        };
        self.sentinel(name, diagnostic, diagnostics)
    }

    /// Fix the type of a symbol declared before its type was known.
    pub fn set_type(&mut self, id: SymbolId, ty: Type) {
        self.symbols.set_type(id, ty);
    }

    /// Look up a symbol.
    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        self.symbols.get(id)
    }

    /// Render the active chain, outermost frame first.
    ///
    /// Each symbol is one line indented two spaces per frame depth.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for frame in &self.frames {
            let indent = "  ".repeat(frame.depth as usize);
            for &id in &frame.order {
                out.push_str(&indent);
                out.push_str(&self.symbols.get(id).to_string());
                out.push('\n');
            }
        }
        out
    }

    /// Hand over the symbol arena.
    pub fn into_symbols(self) -> SymbolArena {
        self.symbols
    }

    fn bind(&mut self, name: &str, ty: Type, kind: SymbolKind, span: Span) -> SymbolId {
        let id = self.symbols.alloc(Symbol {
            name: name.to_string(),
            ty,
            kind,
            span,
        });
        if let Some(frame) = self.frames.last_mut() {
            frame.names.insert(name.to_string(), id);
            frame.order.push(id);
        }
        id
    }

    fn sentinel(
        &mut self,
        name: &str,
        diagnostic: Diagnostic,
        diagnostics: &mut Diagnostics,
    ) -> SymbolId {
        let span = diagnostic.span();
        let id = self.symbols.alloc_error(name, diagnostic.to_string(), span);
        diagnostics.push(diagnostic);
        id
    }
}

impl Default for ScopeResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Runtime routines available to every program, in root frame order.
pub fn builtins() -> [(&'static str, Type); 6] {
    [
        ("readInt", Type::function(vec![], Type::Int)),
        ("readFloat", Type::function(vec![], Type::Float)),
        ("printBool", Type::function(vec![Type::Bool], Type::Void)),
        ("printInt", Type::function(vec![Type::Int], Type::Void)),
        ("printFloat", Type::function(vec![Type::Float], Type::Void)),
        ("println", Type::function(vec![], Type::Void)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declare_int(scope: &mut ScopeResolver, name: &str, diags: &mut Diagnostics) -> SymbolId {
        scope.declare(name, Type::Int, SymbolKind::Variable, Span::new(1, 1), diags)
    }

    #[test]
    fn builtins_are_resolvable() {
        let mut scope = ScopeResolver::new();
        let mut diags = Diagnostics::new();

        let id = scope.resolve("printInt", Span::new(1, 1), &mut diags);
        assert!(diags.is_empty());
        assert!(scope.symbol(id).is_builtin());
        assert_eq!(
            scope.symbol(id).ty,
            Type::function(vec![Type::Int], Type::Void)
        );
    }

    #[test]
    fn duplicate_declaration_yields_sentinel() {
        let mut scope = ScopeResolver::new();
        let mut diags = Diagnostics::new();

        let first = declare_int(&mut scope, "x", &mut diags);
        let second = scope.declare(
            "x",
            Type::Float,
            SymbolKind::Variable,
            Span::new(2, 5),
            &mut diags,
        );

        assert_eq!(diags.len(), 1);
        assert_eq!(
            diags.iter().next().map(ToString::to_string).as_deref(),
            Some("DeclareSymbolError(2,5)[x already exists.]")
        );
        assert!(!scope.symbol(first).is_error());
        assert!(scope.symbol(second).is_error());
        assert!(scope.symbol(second).ty.is_error());

        // Later lookups find the sentinel without a new diagnostic.
        assert_eq!(scope.resolve("x", Span::new(3, 1), &mut diags), second);
        assert_eq!(diags.len(), 1);

        // The dump keeps the first binding only.
        assert_eq!(scope.dump().matches("Symbol(x:").count(), 1);
        assert!(scope.dump().contains("Symbol(x:int)"));
    }

    #[test]
    fn unknown_name_yields_sentinel() {
        let mut scope = ScopeResolver::new();
        let mut diags = Diagnostics::new();

        let id = scope.resolve("missing", Span::new(4, 9), &mut diags);
        assert!(scope.symbol(id).is_error());
        assert_eq!(
            scope.symbol(id).ty,
            Type::error("ResolveSymbolError(4,9)[Could not find missing.]")
        );
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn inner_scopes_shadow_and_unwind() {
        let mut scope = ScopeResolver::new();
        let mut diags = Diagnostics::new();

        let outer = declare_int(&mut scope, "x", &mut diags);
        scope.enter_scope();
        assert_eq!(scope.depth(), 1);
        let inner = declare_int(&mut scope, "x", &mut diags);
        assert!(diags.is_empty());
        assert_eq!(scope.resolve("x", Span::new(1, 1), &mut diags), inner);

        scope.exit_scope();
        assert_eq!(scope.depth(), 0);
        assert_eq!(scope.resolve("x", Span::new(1, 1), &mut diags), outer);
    }

    #[test]
    fn exited_names_are_gone() {
        let mut scope = ScopeResolver::new();
        let mut diags = Diagnostics::new();

        scope.enter_scope();
        declare_int(&mut scope, "local", &mut diags);
        scope.exit_scope();

        let id = scope.resolve("local", Span::new(1, 1), &mut diags);
        assert!(scope.symbol(id).is_error());
    }

    #[test]
    fn dump_indents_by_depth() {
        let mut scope = ScopeResolver::new();
        let mut diags = Diagnostics::new();

        declare_int(&mut scope, "g", &mut diags);
        scope.enter_scope();
        scope.declare(
            "flag",
            Type::Bool,
            SymbolKind::Parameter,
            Span::new(1, 1),
            &mut diags,
        );

        let dump = scope.dump();
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines[0], "Symbol(readInt:func(TypeList()):int)");
        assert_eq!(lines[5], "Symbol(println:func(TypeList()):void)");
        assert_eq!(lines[6], "Symbol(g:int)");
        assert_eq!(lines[7], "  Symbol(flag:bool)");
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn root_is_never_exited() {
        let mut scope = ScopeResolver::new();
        scope.exit_scope();
        scope.exit_scope();

        let mut diags = Diagnostics::new();
        scope.resolve("readInt", Span::new(1, 1), &mut diags);
        assert!(diags.is_empty());
    }
}
