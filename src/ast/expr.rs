//! Expression nodes for the Lyn AST.

use std::fmt;

/// A binary infix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOperator {
    /// Addition `+`.
    Add,
    /// Subtraction `-`.
    Sub,
    /// Multiplication `*`.
    Mul,
    /// Division `/`.
    Div,
    /// Exponentiation `^`.
    Pow,
    /// Modulo `%`.
    Mod,
    /// Equality `==`.
    Equal,
    /// Inequality `!=`.
    NotEqual,
    /// Less than `<`.
    LessThan,
    /// Less than or equal `<=`.
    LessEqual,
    /// Greater than `>`.
    GreaterThan,
    /// Greater than or equal `>=`.
    GreaterEqual,
}

impl InfixOperator {
    /// The operator as it appears in source code and in the JSON dump.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfixOperator::Add => "+",
            InfixOperator::Sub => "-",
            InfixOperator::Mul => "*",
            InfixOperator::Div => "/",
            InfixOperator::Pow => "^",
            InfixOperator::Mod => "%",
            InfixOperator::Equal => "==",
            InfixOperator::NotEqual => "!=",
            InfixOperator::LessThan => "<",
            InfixOperator::LessEqual => "<=",
            InfixOperator::GreaterThan => ">",
            InfixOperator::GreaterEqual => ">=",
        }
    }

    /// Parses an operator from its source form.
    pub fn from_str(s: &str) -> Option<InfixOperator> {
        match s {
            "+" => Some(InfixOperator::Add),
            "-" => Some(InfixOperator::Sub),
            "*" => Some(InfixOperator::Mul),
            "/" => Some(InfixOperator::Div),
            "^" => Some(InfixOperator::Pow),
            "%" => Some(InfixOperator::Mod),
            "==" => Some(InfixOperator::Equal),
            "!=" => Some(InfixOperator::NotEqual),
            "<" => Some(InfixOperator::LessThan),
            "<=" => Some(InfixOperator::LessEqual),
            ">" => Some(InfixOperator::GreaterThan),
            ">=" => Some(InfixOperator::GreaterEqual),
            _ => None,
        }
    }

    /// Returns `true` for the comparison operators, which yield `bool`
    /// regardless of their operand types.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            InfixOperator::Equal
                | InfixOperator::NotEqual
                | InfixOperator::LessThan
                | InfixOperator::LessEqual
                | InfixOperator::GreaterThan
                | InfixOperator::GreaterEqual
        )
    }
}

impl fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An expression in the Lyn language.
///
/// Expressions are the value-producing building blocks of Lyn programs.
/// Literals carry their decoded values; the callee of a call is a plain
/// name (calls through arbitrary expressions are not part of the language).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// An integer literal.
    Integer(i64),

    /// A float literal.
    Float(f64),

    /// A boolean literal (`true` or `false`).
    Boolean(bool),

    /// A variable reference by name.
    ///
    /// The name must refer to a declared variable at emission time; the
    /// parser does not check this.
    Identifier(String),

    /// A binary infix operation.
    Infix {
        /// The left operand.
        left: Box<Expr>,
        /// The operator.
        operator: InfixOperator,
        /// The right operand.
        right: Box<Expr>,
    },

    /// A function call.
    Call {
        /// The name of the function being called.
        name: String,
        /// The arguments, evaluated left to right.
        args: Vec<Expr>,
    },
}
