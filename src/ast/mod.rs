//! Abstract Syntax Tree definitions for the Lyn programming language.
//!
//! This module defines the data structures that represent parsed Lyn
//! programs. The AST is produced by the [`crate::parser`] and consumed by
//! the [`crate::codegen`].
//!
//! # Structure
//!
//! - [`Program`] - The root node: an ordered sequence of top-level statements
//! - [`Stmt`] - Statements (declarations, assignments, control flow, ...)
//! - [`Expr`] - Expressions (literals, identifiers, infix operations, calls)
//! - [`Block`] - A braced statement list
//! - [`Param`] / [`Type`] - Function parameters and declared type names
//!
//! AST nodes carry no source spans and no type information beyond the
//! declared type names on `var` and `func` statements; actual types are
//! re-derived during IR emission.
//!
//! # Module Structure
//!
//! - [`types`] - Declared type names (int, float, bool, string)
//! - [`expr`] - Expression nodes and infix operators
//! - [`stmt`] - Statement nodes and blocks
//! - [`program`] - Top-level program structure
//! - [`json`] - Debug dump (de)serialization
//!
//! # See Also
//!
//! * [`crate::parser`] - Produces the AST from tokens
//! * [`crate::codegen`] - Generates LLVM IR from the AST

mod expr;
mod json;
mod program;
mod stmt;
mod types;


pub use expr::{Expr, InfixOperator};
pub use json::JsonError;
pub use program::Program;
pub use stmt::{Block, Param, Stmt};
pub use types::Type;
