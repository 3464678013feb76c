//! Compilation pipeline and JIT execution.
//!
//! The driver reads a source file, runs the lexer/parser/emitter pipeline,
//! and either dumps an intermediate stage (`lyn emit`) or verifies the
//! module and executes its `main` through an MCJIT execution engine
//! (`lyn run`). Any collected parse or compile errors abort the pipeline
//! before the next phase.

use std::fs;
use std::time::Instant;

use inkwell::OptimizationLevel;
use inkwell::context::Context;
use inkwell::targets::{InitializationConfig, Target, TargetMachine};

use lyn::ast::Program;
use lyn::codegen::{Codegen, CompileError};
use lyn::lexer::Lexer;
use lyn::parser::{ParseError, Parser};
use lyn::token::TokenKind;

/// Signature of the JIT-resolved entry point.
type MainFn = unsafe extern "C" fn() -> i32;

/// A failure from any phase of the pipeline.
pub(crate) enum DriverError {
    /// The source file could not be read.
    FileRead {
        path: String,
        source: std::io::Error,
    },
    /// The parser collected errors. Carries the source text so the
    /// diagnostics layer can render labeled reports.
    Parse {
        filename: String,
        source: String,
        errors: Vec<ParseError>,
    },
    /// The emitter collected errors.
    Compile { errors: Vec<CompileError> },
    /// LLVM rejected the generated module.
    Verify(String),
    /// Target initialization, engine creation, or symbol resolution
    /// failed.
    Execution(String),
}

/// Which stages `lyn emit` should dump.
pub(crate) struct EmitStages {
    pub(crate) tokens: bool,
    pub(crate) ast: bool,
    pub(crate) ir: bool,
}

/// Compiles and JIT-executes a source file.
///
/// On success the program's `main` has run; its return value and the
/// measured wall time are printed as a trailing `=> <result> (in <time>)`
/// line.
pub(crate) fn run(path: &str) -> Result<(), DriverError> {
    let source = read_source(path)?;
    let program = parse_source(path, &source)?;

    let context = Context::create();
    let codegen = compile_program(&context, &program)?;

    execute(&codegen)
}

/// Compiles a source file and dumps the requested stages.
pub(crate) fn emit(path: &str, stages: EmitStages) -> Result<(), DriverError> {
    let source = read_source(path)?;

    if stages.tokens {
        let mut lexer = Lexer::new(&source);
        loop {
            let token = lexer.next_token();
            println!("{token:?}");
            if matches!(token.kind, TokenKind::Eof) {
                break;
            }
        }
    }

    if stages.ast || stages.ir {
        let program = parse_source(path, &source)?;

        if stages.ast {
            println!("{:#}", program.to_json());
        }

        if stages.ir {
            let context = Context::create();
            let codegen = compile_program(&context, &program)?;
            println!("{}", codegen.ir());
        }
    }

    Ok(())
}

fn read_source(path: &str) -> Result<String, DriverError> {
    fs::read_to_string(path).map_err(|source| DriverError::FileRead {
        path: path.to_string(),
        source,
    })
}

/// Lexes and parses the source, failing if the parser collected errors.
fn parse_source(path: &str, source: &str) -> Result<Program, DriverError> {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse();

    if parser.errors().is_empty() {
        Ok(program)
    } else {
        Err(DriverError::Parse {
            filename: path.to_string(),
            source: source.to_string(),
            errors: parser.errors().to_vec(),
        })
    }
}

/// Runs the emitter, failing if it collected errors.
fn compile_program<'ctx>(
    context: &'ctx Context,
    program: &Program,
) -> Result<Codegen<'ctx>, DriverError> {
    let mut codegen = Codegen::new(context);
    codegen.compile(program);

    if codegen.errors().is_empty() {
        Ok(codegen)
    } else {
        Err(DriverError::Compile {
            errors: codegen.errors().to_vec(),
        })
    }
}

/// Verifies the module and invokes its `main` through MCJIT.
fn execute(codegen: &Codegen<'_>) -> Result<(), DriverError> {
    Target::initialize_native(&InitializationConfig::default()).map_err(DriverError::Execution)?;

    let module = codegen.module();
    module.set_triple(&TargetMachine::get_default_triple());
    module
        .verify()
        .map_err(|error| DriverError::Verify(error.to_string()))?;

    let engine = module
        .create_jit_execution_engine(OptimizationLevel::None)
        .map_err(|error| DriverError::Execution(error.to_string()))?;

    let main = unsafe { engine.get_function::<MainFn>("main") }
        .map_err(|error| DriverError::Execution(error.to_string()))?;

    let started = Instant::now();
    let result = unsafe { main.call() };
    let elapsed = started.elapsed();

    println!("=> {result} (in {elapsed:.3?})");
    Ok(())
}
