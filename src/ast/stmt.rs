//! Statement nodes for the Lyn AST.

use super::expr::Expr;
use super::types::Type;

/// A braced statement list.
///
/// Blocks appear as function bodies, `if` branches, `while` bodies, and as
/// standalone statements. They do not introduce a new scope; only function
/// bodies do.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// The statements in the block, in source order.
    pub statements: Vec<Stmt>,
}

/// A function parameter with its declared type.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// The parameter name. Unique within its parameter list.
    pub name: String,
    /// The declared type of the parameter.
    pub declared_type: Type,
}

/// A statement in the Lyn language.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// An expression evaluated for its side effects; the value is discarded.
    Expression {
        /// The expression to evaluate.
        expr: Expr,
    },

    /// A variable declaration: `var name: type = value`.
    Var {
        /// The name being declared.
        name: String,
        /// The declared type.
        declared_type: Type,
        /// The initializer expression.
        value: Expr,
    },

    /// A reassignment of a previously declared variable: `name = value`.
    Assign {
        /// The name being assigned.
        name: String,
        /// The new value.
        value: Expr,
    },

    /// A standalone braced block.
    Block(Block),

    /// A function definition: `func name(params): type { body }`.
    Function {
        /// The function name.
        name: String,
        /// The parameter list.
        params: Vec<Param>,
        /// The declared return type.
        return_type: Type,
        /// The function body.
        body: Block,
    },

    /// A return statement: `return value`.
    Return {
        /// The returned value.
        value: Expr,
    },

    /// A conditional statement with optional `else` branch.
    If {
        /// The condition. Must evaluate to `bool`.
        condition: Expr,
        /// The branch taken when the condition is true.
        consequence: Block,
        /// The branch taken when the condition is false, if present.
        alternative: Option<Block>,
    },

    /// A while loop.
    While {
        /// The loop condition. Must evaluate to `bool`.
        condition: Expr,
        /// The loop body.
        body: Block,
    },
}
