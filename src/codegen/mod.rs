//! LLVM code generation for the Lyn programming language.
//!
//! This module provides the [`Codegen`] struct which lowers a Lyn
//! [`Program`] into LLVM IR using [Inkwell](https://github.com/TheDan64/inkwell),
//! a safe Rust wrapper around the LLVM C API.
//!
//! # Overview
//!
//! The emitter walks the AST once, maintaining two cursors: the builder's
//! insertion point and the active [`Environment`] frame. It performs the
//! following tasks:
//!
//! - Creates a single LLVM module named `Main` and seeds it with the
//!   built-ins (`printf`, the exponentiation helpers, the boolean and
//!   format-string globals)
//! - Synthesizes an `i32 @main()` entry function and compiles every
//!   top-level statement into it in order
//! - Lowers user function definitions with a save/restore bracket around
//!   the builder position and a fresh environment frame
//! - Collects [`CompileError`]s instead of failing: emission continues past
//!   errors and the caller inspects [`Codegen::errors`]
//!
//! # Example
//!
//! ```no_run
//! use inkwell::context::Context;
//! use lyn::codegen::Codegen;
//! use lyn::lexer::Lexer;
//! use lyn::parser::Parser;
//!
//! let mut parser = Parser::new(Lexer::new("func main(): int { return 7 }"));
//! let program = parser.parse();
//!
//! let context = Context::create();
//! let mut codegen = Codegen::new(&context);
//! codegen.compile(&program);
//! assert!(codegen.errors().is_empty());
//! println!("{}", codegen.ir());
//! ```
//!
//! # Module Structure
//!
//! - [`error`] - The collected error type
//! - [`env`] - The scoped symbol table
//! - [`builtins`] - Built-in declarations seeded at startup
//! - [`stmt`] - Statement lowering
//! - [`expr`] - Expression lowering
//! - `tests` - Unit tests (test-only)
//!
//! # See Also
//!
//! * [`crate::ast`] - The AST types consumed by this module
//! * [Inkwell documentation](https://thedan64.github.io/inkwell/)
//! * [LLVM Language Reference](https://llvm.org/docs/LangRef.html)

mod builtins;
mod env;
mod error;
mod expr;
mod stmt;


pub use error::CompileError;

use inkwell::basic_block::BasicBlock;
use inkwell::builder::BuilderError;
use inkwell::context::Context;
use inkwell::types::BasicTypeEnum;
use inkwell::values::{BasicValueEnum, FunctionValue, ValueKind};

use crate::ast::{Program, Type};
use env::{Binding, Environment, Storage};

/// LLVM code generator for Lyn programs.
///
/// `Codegen` holds the LLVM context, module, and builder required for
/// generating IR, plus the environment chain and the collected error list.
/// It compiles one [`Program`] into one module; callers that want to
/// compile concurrently must instantiate independent pipelines.
///
/// # Lifetime
///
/// The `'ctx` lifetime parameter ties this struct to an LLVM [`Context`].
/// The context must outlive the code generator.
///
/// # Thread Safety
///
/// LLVM contexts are not thread-safe. Each thread should have its own
/// context and code generator.
pub struct Codegen<'ctx> {
    /// Reference to the LLVM context.
    context: &'ctx Context,
    /// The LLVM module being built.
    module: inkwell::module::Module<'ctx>,
    /// The IR builder for creating instructions.
    builder: inkwell::builder::Builder<'ctx>,
    /// The scoped symbol table, seeded with built-ins at construction.
    env: Environment<'ctx>,
    /// Errors collected so far. Emission never stops on an error.
    errors: Vec<CompileError>,
    /// Saved builder positions, pushed and popped around every function
    /// emission so nested definitions restore the enclosing insertion
    /// point on exit.
    saved_blocks: Vec<Option<BasicBlock<'ctx>>>,
}

impl<'ctx> Codegen<'ctx> {
    /// Creates a new code generator with the given LLVM context.
    ///
    /// The module is named `Main` and the root environment is seeded with
    /// the built-ins before any user code is compiled.
    pub fn new(context: &'ctx Context) -> Self {
        let module = context.create_module("Main");
        let builder = context.create_builder();

        let mut codegen = Codegen {
            context,
            module,
            builder,
            env: Environment::new(),
            errors: Vec::new(),
            saved_blocks: Vec::new(),
        };
        codegen.declare_builtins();
        codegen
    }

    /// Compiles a program into the module.
    ///
    /// A `i32 @main()` entry function is synthesized; every top-level
    /// statement is compiled into its entry block in order. If the program
    /// defines `func main`, the synthesized entry tail-calls it and returns
    /// its result; otherwise the entry returns 0.
    ///
    /// Errors are collected, not returned: check [`Codegen::errors`]
    /// afterwards. The module may be partially valid when errors were
    /// recorded.
    pub fn compile(&mut self, program: &Program) {
        let i32_type = self.context.i32_type();
        let entry_fn = self
            .module
            .add_function("main", i32_type.fn_type(&[], false), None);
        let entry = self.context.append_basic_block(entry_fn, "entry");
        self.builder.position_at_end(entry);

        for statement in &program.statements {
            if self.current_block_terminated() {
                break;
            }
            self.compile_statement(statement);
        }

        if !self.current_block_terminated() {
            self.emit_entry_return();
        }
    }

    /// The errors collected so far.
    pub fn errors(&self) -> &[CompileError] {
        &self.errors
    }

    /// Returns the textual LLVM IR of the module.
    pub fn ir(&self) -> String {
        self.module.print_to_string().to_string()
    }

    /// The LLVM module being built. The driver uses this to verify the IR
    /// and hand it to the execution engine.
    pub fn module(&self) -> &inkwell::module::Module<'ctx> {
        &self.module
    }

    /// Ends the synthesized entry function.
    ///
    /// When the program defined `func main` with no parameters, the entry
    /// calls it; an `int` result becomes the process exit value, any other
    /// return type is discarded and the entry returns 0.
    fn emit_entry_return(&mut self) {
        let user_main = self.env.lookup("main").copied();

        if let Some(Binding {
            storage: Storage::Function(function),
            ty,
        }) = user_main
        {
            if function.count_params() != 0 {
                self.error("Function main must not take parameters.".to_string());
            } else {
                let call = self.builder.build_call(function, &[], "user_main");
                if let Some(call) = self.emit_ok(call, "call to main") {
                    if ty == Type::Int {
                        if let ValueKind::Basic(BasicValueEnum::IntValue(value)) =
                            call.try_as_basic_value()
                        {
                            let ret = self.builder.build_return(Some(&value));
                            self.emit_ok(ret, "entry return");
                            return;
                        }
                    }
                }
            }
        }

        let zero = self.context.i32_type().const_int(0, false);
        let ret = self.builder.build_return(Some(&zero));
        self.emit_ok(ret, "entry return");
    }

    /// Maps a source type to its LLVM type.
    ///
    /// # Type Mapping
    ///
    /// - `int` → LLVM `i32`
    /// - `float` → LLVM `float` (32-bit)
    /// - `bool` → LLVM `i1`
    /// - `string` → `None`; the reserved type has no runtime
    ///   representation and declarations using it are rejected before this
    ///   lookup
    fn llvm_type(&self, ty: Type) -> Option<BasicTypeEnum<'ctx>> {
        match ty {
            Type::Int => Some(self.context.i32_type().into()),
            Type::Float => Some(self.context.f32_type().into()),
            Type::Bool => Some(self.context.bool_type().into()),
            Type::String => None,
        }
    }

    /// The zero value of a source type, used for synthesized returns and
    /// global initializers.
    fn zero_value(&self, ty: Type) -> Option<BasicValueEnum<'ctx>> {
        match ty {
            Type::Int => Some(self.context.i32_type().const_int(0, false).into()),
            Type::Float => Some(self.context.f32_type().const_float(0.0).into()),
            Type::Bool => Some(self.context.bool_type().const_int(0, false).into()),
            Type::String => None,
        }
    }

    /// Returns `true` if the block under the builder already ends in a
    /// terminator. No further instructions may be emitted there.
    fn current_block_terminated(&self) -> bool {
        self.builder
            .get_insert_block()
            .and_then(|block| block.get_terminator())
            .is_some()
    }

    /// The function owning the block under the builder.
    fn current_function(&mut self) -> Option<FunctionValue<'ctx>> {
        let function = self
            .builder
            .get_insert_block()
            .and_then(|block| block.get_parent());
        if function.is_none() {
            self.error("Internal error: no current function.".to_string());
        }
        function
    }

    /// Enters a function emission scope: saves the current insertion
    /// point, pushes a fresh environment frame, and positions the builder
    /// at the function's entry block.
    fn enter_function_scope(&mut self, entry: BasicBlock<'ctx>) {
        self.saved_blocks.push(self.builder.get_insert_block());
        self.env.push_frame();
        self.builder.position_at_end(entry);
    }

    /// Leaves a function emission scope, restoring the saved insertion
    /// point and popping the frame. Emission collects errors instead of
    /// returning early, so every `enter` is matched by exactly one
    /// `leave`.
    fn leave_function_scope(&mut self) {
        self.env.pop_frame();
        if let Some(Some(block)) = self.saved_blocks.pop() {
            self.builder.position_at_end(block);
        }
    }

    /// Records a compile error.
    fn error(&mut self, message: String) {
        self.errors.push(CompileError::new(message));
    }

    /// Unwraps a builder result, converting a failure into a recorded
    /// internal error and `None`.
    fn emit_ok<T>(&mut self, result: Result<T, BuilderError>, operation: &str) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.error(format!(
                    "Internal error: failed to emit {operation}: {error}"
                ));
                None
            }
        }
    }
}
