//! The Lyn programming language compiler library.
//!
//! This library provides the core components of the Lyn compiler:
//! lexical analysis, parsing, and LLVM IR generation.
//!
//! # Modules
//!
//! - [`token`] - Token types and source location tracking
//! - [`lexer`] - Lexical analysis (tokenization)
//! - [`ast`] - Abstract Syntax Tree definitions and JSON dumps
//! - [`parser`] - Pratt parser with collected errors
//! - [`codegen`] - LLVM IR generation
//!
//! # Example
//!
//! ```no_run
//! use lyn::lexer::Lexer;
//! use lyn::parser::Parser;
//! use lyn::codegen::Codegen;
//! use inkwell::context::Context;
//!
//! let source = "func main(): int { return 1 + 2 * 3 }";
//!
//! // Parsing (the parser pulls tokens from the lexer one at a time)
//! let mut parser = Parser::new(Lexer::new(source));
//! let program = parser.parse();
//! assert!(parser.errors().is_empty());
//!
//! // Code generation
//! let context = Context::create();
//! let mut codegen = Codegen::new(&context);
//! codegen.compile(&program);
//! assert!(codegen.errors().is_empty());
//!
//! let ir = codegen.ir();
//! assert!(ir.contains("define i32 @main()"));
//! ```

pub mod ast;
pub mod codegen;
pub mod lexer;
pub mod parser;
pub mod token;
