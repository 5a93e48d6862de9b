//! Activation records.
//!
//! An [`ActivationRecord`] maps the symbols visible in the code being
//! generated to storage. The chain always ends in the global record, whose
//! symbols live in labeled static storage; a function record in front of it
//! maps parameters and locals to `$fp`-relative offsets:
//!
//! ```text
//!            ...
//!  8($fp)    first of three parameters
//!  4($fp)    second parameter
//!  0($fp)    last parameter
//! -4($fp)    saved $ra
//! -8($fp)    saved $fp
//! -12($fp)   first word of locals
//!            ...
//! ```

use crux_core::{Span, Type};
use crux_parser::ast::{Block, Stmt};
use crux_parser::{SymbolArena, SymbolId};
use rustc_hash::FxHashMap;

use super::error::CodeGenError;
use super::program::{FIXED_FRAME_SIZE, Program};

/// Where a symbol's storage lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location<'r> {
    /// Offset from `$fp`.
    Frame(i32),
    /// Static data label.
    Static(&'r str),
}

/// Record of the symbols declared at the top level.
#[derive(Debug, Default)]
pub struct GlobalRecord {
    labels: FxHashMap<SymbolId, String>,
}

impl GlobalRecord {
    /// Reserve static storage for a global and remember its label.
    pub fn reserve(
        &mut self,
        program: &mut Program,
        id: SymbolId,
        symbols: &SymbolArena,
        span: Span,
    ) -> Result<(), CodeGenError> {
        let symbol = symbols.get(id);
        let bytes = storage_size(&symbol.ty, span)?;
        let label = program.request_label(&format!("cruxdata.{}", symbol.name));
        program.append_data(format!("{}: .space {}", label, bytes));
        self.labels.insert(id, label);
        Ok(())
    }
}

/// Frame layout of one function.
#[derive(Debug)]
pub struct FunctionFrame {
    name: String,
    end_label: String,
    params: FxHashMap<SymbolId, i32>,
    locals: FxHashMap<SymbolId, i32>,
    locals_size: u32,
}

impl FunctionFrame {
    /// Lay out the parameters of a function.
    ///
    /// Arguments are pushed left to right, so the last one sits at `0($fp)`.
    pub fn new(
        name: &str,
        end_label: String,
        params: &[SymbolId],
        symbols: &SymbolArena,
        span: Span,
    ) -> Result<Self, CodeGenError> {
        let mut offsets = FxHashMap::default();
        let mut offset = 0u32;
        for &param in params.iter().rev() {
            offsets.insert(param, offset as i32);
            offset += storage_size(&symbols.get(param).ty, span)?;
        }

        Ok(Self {
            name: name.to_string(),
            end_label,
            params: offsets,
            locals: FxHashMap::default(),
            locals_size: 0,
        })
    }

    /// Assign a slot to every local declared anywhere in `block`, in
    /// declaration order, including nested blocks.
    pub fn size_block(
        &mut self,
        block: &Block<'_>,
        symbols: &SymbolArena,
    ) -> Result<(), CodeGenError> {
        for stmt in block.stmts {
            match stmt {
                Stmt::Var(var) => {
                    let bytes = storage_size(&symbols.get(var.symbol).ty, var.span)?;
                    self.add_local(var.symbol, bytes);
                }
                Stmt::If(branch) => {
                    self.size_block(&branch.then_block, symbols)?;
                    self.size_block(&branch.else_block, symbols)?;
                }
                Stmt::While(lp) => self.size_block(&lp.body, symbols)?,
                Stmt::Call(_) | Stmt::Assign(_) | Stmt::Return(_) => {}
            }
        }
        Ok(())
    }

    fn add_local(&mut self, id: SymbolId, bytes: u32) {
        self.locals_size += bytes;
        let offset = -((FIXED_FRAME_SIZE + self.locals_size) as i32);
        self.locals.insert(id, offset);
    }

    /// Name of the function.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Label that return statements jump to.
    pub fn end_label(&self) -> &str {
        &self.end_label
    }

    /// Bytes reserved for locals by the prologue.
    pub fn locals_size(&self) -> u32 {
        self.locals_size
    }

    /// `$fp` offset of a parameter or local.
    pub fn offset(&self, id: SymbolId) -> Option<i32> {
        self.params
            .get(&id)
            .or_else(|| self.locals.get(&id))
            .copied()
    }
}

/// Chain of records from the innermost function out to the globals.
#[derive(Debug)]
pub enum ActivationRecord {
    Global(GlobalRecord),
    Function {
        frame: FunctionFrame,
        parent: Box<ActivationRecord>,
    },
}

impl Default for ActivationRecord {
    fn default() -> Self {
        ActivationRecord::Global(GlobalRecord::default())
    }
}

impl ActivationRecord {
    /// The record for top-level declarations.
    pub fn global() -> Self {
        Self::default()
    }

    /// Put a function frame in front of this record.
    pub fn enter(self, frame: FunctionFrame) -> Self {
        ActivationRecord::Function {
            frame,
            parent: Box::new(self),
        }
    }

    /// Drop the innermost function frame.
    pub fn exit(self) -> Self {
        match self {
            ActivationRecord::Function { parent, .. } => *parent,
            global => global,
        }
    }

    /// The global record at the end of the chain.
    pub fn globals_mut(&mut self) -> &mut GlobalRecord {
        match self {
            ActivationRecord::Global(globals) => globals,
            ActivationRecord::Function { parent, .. } => parent.globals_mut(),
        }
    }

    /// The innermost function frame, if any.
    pub fn frame(&self) -> Option<&FunctionFrame> {
        match self {
            ActivationRecord::Global(_) => None,
            ActivationRecord::Function { frame, .. } => Some(frame),
        }
    }

    /// Find the storage of a symbol, innermost record first.
    pub fn locate(&self, id: SymbolId) -> Option<Location<'_>> {
        match self {
            ActivationRecord::Global(globals) => {
                globals.labels.get(&id).map(|label| Location::Static(label))
            }
            ActivationRecord::Function { frame, parent } => frame
                .offset(id)
                .map(Location::Frame)
                .or_else(|| parent.locate(id)),
        }
    }

    /// Load the address of a symbol's storage into `reg`.
    ///
    /// Returns `false` if the symbol has no storage in this chain.
    pub fn load_address(&self, program: &mut Program, reg: &str, id: SymbolId) -> bool {
        match self.locate(id) {
            Some(Location::Frame(offset)) => {
                program.emit(format!("addi {}, $fp, {}", reg, offset));
                true
            }
            Some(Location::Static(label)) => {
                program.emit(format!("la {}, {}", reg, label));
                true
            }
            None => false,
        }
    }
}

/// Bytes of storage a declared type needs.
pub(super) fn storage_size(ty: &Type, span: Span) -> Result<u32, CodeGenError> {
    ty.num_bytes().ok_or_else(|| CodeGenError::NoSize {
        ty: ty.clone(),
        span,
    })
}
