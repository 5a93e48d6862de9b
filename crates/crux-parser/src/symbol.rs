//! Symbols and the arena that owns them.
//!
//! Every declaration made while parsing, including the error sentinels
//! substituted for failed declarations and lookups, gets one [`Symbol`] in a
//! [`SymbolArena`]. Tree nodes refer to symbols by [`SymbolId`], so the arena
//! is handed to the later passes alongside the tree.

use std::fmt;

use crux_core::{Span, Type};

/// Handle to a symbol in a [`SymbolArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(u32);

impl SymbolId {
    /// Position of the symbol in its arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What kind of declaration introduced a symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    /// Pre-seeded runtime routine.
    Builtin,
    /// `var` declaration.
    Variable,
    /// `array` declaration.
    Array,
    /// `func` definition.
    Function,
    /// Function parameter.
    Parameter,
    /// Sentinel for a failed declaration or lookup, with its diagnostic line.
    Error(String),
}

/// A named, typed declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    /// Declared name.
    pub name: String,
    /// Declared type (an error type for sentinels).
    pub ty: Type,
    /// Declaration kind.
    pub kind: SymbolKind,
    /// Declaration site.
    pub span: Span,
}

impl Symbol {
    /// Whether this symbol is an error sentinel.
    pub fn is_error(&self) -> bool {
        matches!(self.kind, SymbolKind::Error(_))
    }

    /// Whether this symbol is a pre-seeded runtime routine.
    pub fn is_builtin(&self) -> bool {
        self.kind == SymbolKind::Builtin
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({}:{})", self.name, self.ty)
    }
}

/// Owner of every symbol created during a parse.
#[derive(Debug, Clone, Default)]
pub struct SymbolArena {
    symbols: Vec<Symbol>,
}

impl SymbolArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol and return its handle.
    pub fn alloc(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(symbol);
        id
    }

    /// Add an error sentinel for `name`.
    pub fn alloc_error(&mut self, name: &str, message: String, span: Span) -> SymbolId {
        self.alloc(Symbol {
            name: name.to_string(),
            ty: Type::Error(message.clone()),
            kind: SymbolKind::Error(message),
            span,
        })
    }

    /// Look up a symbol.
    ///
    /// Handles are only produced by this arena, so every handle is valid.
    pub fn get(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    /// Replace the type of a declared symbol. Sentinels keep their error type.
    pub fn set_type(&mut self, id: SymbolId, ty: Type) {
        let symbol = &mut self.symbols[id.index()];
        if !symbol.is_error() {
            symbol.ty = ty;
        }
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterate over all symbols with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (SymbolId(i as u32), s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_and_get() {
        let mut arena = SymbolArena::new();
        let id = arena.alloc(Symbol {
            name: "x".into(),
            ty: Type::Int,
            kind: SymbolKind::Variable,
            span: Span::new(1, 5),
        });
        assert_eq!(arena.get(id).name, "x");
        assert_eq!(arena.get(id).to_string(), "Symbol(x:int)");
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn sentinels_keep_error_type() {
        let mut arena = SymbolArena::new();
        let id = arena.alloc_error("y", "Could not find y.".into(), Span::new(2, 1));
        arena.set_type(id, Type::Int);

        let symbol = arena.get(id);
        assert!(symbol.is_error());
        assert_eq!(symbol.ty, Type::error("Could not find y."));
    }
}
