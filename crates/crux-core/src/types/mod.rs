//! The Crux type system.
//!
//! [`Type`] is a closed, immutable value type. Equality is structural, so two
//! array or function types are equal when their components are. The legal
//! operations of each type live in [`algebra`].

mod algebra;

pub use algebra::BinaryOperation;

use std::fmt;

/// Size in bytes of one machine word.
pub const WORD_SIZE: u32 = 4;

/// A Crux type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// 32-bit signed integer.
    Int,
    /// Single precision float.
    Float,
    /// Boolean, stored as one word holding 0 or 1.
    Bool,
    /// The absence of a value.
    Void,
    /// Fixed-extent array of `base`.
    Array { extent: u32, base: Box<Type> },
    /// Address of a value of type `base`.
    Address(Box<Type>),
    /// Function from parameter types to a return type.
    Function { params: Vec<Type>, ret: Box<Type> },
    /// A failed type computation carrying its diagnostic message.
    Error(String),
}

impl Type {
    /// Create an array type.
    pub fn array(extent: u32, base: Type) -> Self {
        Type::Array {
            extent,
            base: Box::new(base),
        }
    }

    /// Create an address type.
    pub fn address(base: Type) -> Self {
        Type::Address(Box::new(base))
    }

    /// Create a function type.
    pub fn function(params: Vec<Type>, ret: Type) -> Self {
        Type::Function {
            params,
            ret: Box::new(ret),
        }
    }

    /// Create an error type.
    pub fn error(message: impl Into<String>) -> Self {
        Type::Error(message.into())
    }

    /// Resolve a type name as written in a declaration.
    pub fn from_name(name: &str) -> Self {
        match name {
            "int" => Type::Int,
            "float" => Type::Float,
            "bool" => Type::Bool,
            "void" => Type::Void,
            _ => Type::error(format!("Unknown type: {}.", name)),
        }
    }

    /// Whether this is an error type.
    pub fn is_error(&self) -> bool {
        matches!(self, Type::Error(_))
    }

    /// Whether this is `void`.
    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    /// Whether this is `float`.
    pub fn is_float(&self) -> bool {
        matches!(self, Type::Float)
    }

    /// Whether this is one of the one-word value types (int, float, bool).
    pub fn is_scalar(&self) -> bool {
        matches!(self, Type::Int | Type::Float | Type::Bool)
    }

    /// The message of an error type.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Type::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Innermost element type of a (possibly nested) array.
    pub fn element_base(&self) -> &Type {
        match self {
            Type::Array { base, .. } => base.element_base(),
            other => other,
        }
    }

    /// Return type of a function type.
    pub fn return_type(&self) -> Option<&Type> {
        match self {
            Type::Function { ret, .. } => Some(ret),
            _ => None,
        }
    }

    /// Storage size in bytes, if values of this type occupy memory and the
    /// size fits in a word.
    pub fn num_bytes(&self) -> Option<u32> {
        match self {
            Type::Int | Type::Float | Type::Bool => Some(WORD_SIZE),
            Type::Array { extent, base } => base.num_bytes()?.checked_mul(*extent),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => f.write_str("int"),
            Type::Float => f.write_str("float"),
            Type::Bool => f.write_str("bool"),
            Type::Void => f.write_str("void"),
            Type::Array { extent, base } => write!(f, "array[{},{}]", extent, base),
            Type::Address(base) => write!(f, "Address({})", base),
            Type::Function { params, ret } => write!(f, "func({}):{}", type_list(params), ret),
            Type::Error(message) => write!(f, "ErrorType({})", message),
        }
    }
}

/// Render a list of types the way call diagnostics show argument lists.
pub fn type_list(types: &[Type]) -> String {
    let items: Vec<String> = types.iter().map(Type::to_string).collect();
    format!("TypeList({})", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_scalars() {
        assert_eq!(Type::Int.to_string(), "int");
        assert_eq!(Type::Float.to_string(), "float");
        assert_eq!(Type::Bool.to_string(), "bool");
        assert_eq!(Type::Void.to_string(), "void");
    }

    #[test]
    fn display_compound() {
        let array = Type::array(2, Type::array(3, Type::Int));
        assert_eq!(array.to_string(), "array[2,array[3,int]]");
        assert_eq!(Type::address(Type::Float).to_string(), "Address(float)");

        let func = Type::function(vec![Type::Int, Type::Bool], Type::Void);
        assert_eq!(func.to_string(), "func(TypeList(int, bool)):void");
        assert_eq!(Type::error("boom").to_string(), "ErrorType(boom)");
    }

    #[test]
    fn structural_equality() {
        assert_eq!(
            Type::array(4, Type::Int),
            Type::array(4, Type::Int)
        );
        assert_ne!(Type::array(4, Type::Int), Type::array(5, Type::Int));
        assert_ne!(Type::array(4, Type::Int), Type::array(4, Type::Float));
        assert_eq!(
            Type::function(vec![Type::Int], Type::Bool),
            Type::function(vec![Type::Int], Type::Bool)
        );
        assert_ne!(Type::Int, Type::Float);
    }

    #[test]
    fn from_name() {
        assert_eq!(Type::from_name("int"), Type::Int);
        assert_eq!(Type::from_name("void"), Type::Void);
        assert_eq!(
            Type::from_name("string"),
            Type::error("Unknown type: string.")
        );
    }

    #[test]
    fn sizes() {
        assert_eq!(Type::Int.num_bytes(), Some(4));
        assert_eq!(Type::Bool.num_bytes(), Some(4));
        assert_eq!(Type::array(2, Type::array(3, Type::Float)).num_bytes(), Some(24));
        assert_eq!(Type::Void.num_bytes(), None);
        assert_eq!(Type::address(Type::Int).num_bytes(), None);
        assert_eq!(Type::array(2_000_000_000, Type::Int).num_bytes(), None);
        assert_eq!(
            Type::array(1 << 15, Type::array(1 << 15, Type::Bool)).num_bytes(),
            None
        );
        assert_eq!(Type::array(1 << 29, Type::Int).num_bytes(), Some(1 << 31));
    }

    #[test]
    fn element_base_of_nested_array() {
        let array = Type::array(2, Type::array(3, Type::Bool));
        assert_eq!(array.element_base(), &Type::Bool);
        assert_eq!(Type::Int.element_base(), &Type::Int);
    }
}
