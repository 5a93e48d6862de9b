//! Operation legality for each Crux type.
//!
//! Every operation starts from the same default, rejecting with an
//! [`Type::Error`] that describes the attempt. The match arms below list the
//! (operation, operand shape) pairs that override the default:
//!
//! | Type      | Supported operations             |
//! |-----------|----------------------------------|
//! | `int`     | add, sub, mul, div, compare      |
//! | `float`   | add, sub, mul, div, compare      |
//! | `bool`    | and, or, not, compare            |
//! | `array`   | index                            |
//! | `Address` | deref, index, assign             |
//! | `func`    | call                             |
//!
//! There is no implicit numeric coercion: `int` and `float` never unify.
//!
//! An operand that is already an error poisons the result: the operation
//! returns that same error instead of composing a new message, so a single
//! failure is reported once.

use super::{Type, type_list};

/// Binary operations dispatched through [`Type::binary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperation {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Compare,
}

impl BinaryOperation {
    /// Default rejection message for `left <op> right`.
    fn reject(self, left: &Type, right: &Type) -> String {
        match self {
            BinaryOperation::Add => format!("Cannot add {} with {}.", left, right),
            BinaryOperation::Sub => format!("Cannot subtract {} from {}.", right, left),
            BinaryOperation::Mul => format!("Cannot multiply {} with {}.", left, right),
            BinaryOperation::Div => format!("Cannot divide {} by {}.", left, right),
            BinaryOperation::And => format!("Cannot compute {} and {}.", left, right),
            BinaryOperation::Or => format!("Cannot compute {} or {}.", left, right),
            BinaryOperation::Compare => format!("Cannot compare {} with {}.", left, right),
        }
    }
}

/// The first error among the operands, if any.
fn poisoned<'t>(operands: impl IntoIterator<Item = &'t Type>) -> Option<Type> {
    operands.into_iter().find(|ty| ty.is_error()).cloned()
}

impl Type {
    /// Combine `self` with `that` under a binary operation.
    pub fn binary(&self, op: BinaryOperation, that: &Type) -> Type {
        use BinaryOperation::*;

        if let Some(error) = poisoned([self, that]) {
            return error;
        }

        let result = match (op, self, that) {
            (Add | Sub | Mul | Div, Type::Int, Type::Int) => Some(Type::Int),
            (Add | Sub | Mul | Div, Type::Float, Type::Float) => Some(Type::Float),
            (And | Or, Type::Bool, Type::Bool) => Some(Type::Bool),
            (Compare, Type::Int, Type::Int)
            | (Compare, Type::Float, Type::Float)
            | (Compare, Type::Bool, Type::Bool) => Some(Type::Bool),
            _ => None,
        };

        result.unwrap_or_else(|| Type::Error(op.reject(self, that)))
    }

    pub fn add(&self, that: &Type) -> Type {
        self.binary(BinaryOperation::Add, that)
    }

    pub fn sub(&self, that: &Type) -> Type {
        self.binary(BinaryOperation::Sub, that)
    }

    pub fn mul(&self, that: &Type) -> Type {
        self.binary(BinaryOperation::Mul, that)
    }

    pub fn div(&self, that: &Type) -> Type {
        self.binary(BinaryOperation::Div, that)
    }

    pub fn and(&self, that: &Type) -> Type {
        self.binary(BinaryOperation::And, that)
    }

    pub fn or(&self, that: &Type) -> Type {
        self.binary(BinaryOperation::Or, that)
    }

    pub fn compare(&self, that: &Type) -> Type {
        self.binary(BinaryOperation::Compare, that)
    }

    /// Logical negation.
    pub fn not(&self) -> Type {
        match self {
            Type::Error(_) => self.clone(),
            Type::Bool => Type::Bool,
            _ => Type::error(format!("Cannot negate {}.", self)),
        }
    }

    /// Load through an address.
    pub fn deref(&self) -> Type {
        match self {
            Type::Error(_) => self.clone(),
            Type::Address(base) => (**base).clone(),
            _ => Type::error(format!("Cannot dereference {}.", self)),
        }
    }

    /// Index with `that`.
    ///
    /// Arrays yield their element type; an address of an array yields the
    /// address of the element.
    pub fn index(&self, that: &Type) -> Type {
        if let Some(error) = poisoned([self, that]) {
            return error;
        }

        match (self, that) {
            (Type::Array { base, .. }, Type::Int) => (**base).clone(),
            (Type::Address(target), Type::Int) => match &**target {
                Type::Array { base, .. } => Type::address((**base).clone()),
                _ => Type::error(format!("Cannot index {} with {}.", self, that)),
            },
            _ => Type::error(format!("Cannot index {} with {}.", self, that)),
        }
    }

    /// Store `source` through this address.
    ///
    /// Only one-word values can be stored, and the source must match the
    /// addressed type exactly.
    pub fn assign(&self, source: &Type) -> Type {
        if let Some(error) = poisoned([self, source]) {
            return error;
        }

        match self {
            Type::Address(base) if base.is_scalar() && **base == *source => source.clone(),
            _ => Type::error(format!("Cannot assign {} to {}.", source, self)),
        }
    }

    /// Call with the given argument types.
    pub fn call(&self, args: &[Type]) -> Type {
        if let Some(error) = poisoned(std::iter::once(self).chain(args)) {
            return error;
        }

        match self {
            Type::Function { params, ret } if params.as_slice() == args => (**ret).clone(),
            _ => Type::error(format!("Cannot call {} using {}.", self, type_list(args))),
        }
    }
}
