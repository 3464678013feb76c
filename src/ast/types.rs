//! Declared type names for variable declarations and function signatures.

use std::fmt;

/// A type annotation in Lyn source code.
///
/// `int`, `float`, and `bool` have IR lowerings (`i32`, 32-bit `float`,
/// `i1`). `string` is a reserved type name with no runtime representation;
/// the emitter rejects declarations that use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    /// 32-bit signed integer type (`int` in Lyn source code).
    Int,
    /// 32-bit float type (`float` in Lyn source code).
    Float,
    /// Boolean type (`bool` in Lyn source code).
    Bool,
    /// Reserved string type (`string` in Lyn source code). Parsed but has
    /// no IR lowering.
    String,
}

impl Type {
    /// Parses a reserved type name as produced by the lexer.
    pub fn from_name(name: &str) -> Option<Type> {
        match name {
            "int" => Some(Type::Int),
            "float" => Some(Type::Float),
            "bool" => Some(Type::Bool),
            "string" => Some(Type::String),
            _ => None,
        }
    }
}

/// Displays the type as it appears in Lyn source code.
///
/// Used in error messages and in the AST JSON dump.
impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::Bool => write!(f, "bool"),
            Type::String => write!(f, "string"),
        }
    }
}
