//! The Lyn programming language CLI.
//!
//! This binary provides `lyn run` and `lyn emit` commands and delegates
//! compilation and JIT execution to the driver module.

use clap::{Parser, Subcommand};

mod diagnostics;
mod driver;

/// Command-line interface for the Lyn compiler.
#[derive(Parser)]
#[command(name = "lyn")]
#[command(about = "The Lyn programming language", long_about = None)]
struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Compile a Lyn program and execute it in process.
    Run {
        /// The source file to run (e.g., `program.lyn`).
        file: String,
    },
    /// Dump an intermediate stage of the compiler.
    Emit {
        /// The source file to compile.
        file: String,

        /// Dump the token stream.
        #[arg(long)]
        tokens: bool,

        /// Dump the AST as JSON.
        #[arg(long)]
        ast: bool,

        /// Dump the textual LLVM IR.
        #[arg(long)]
        ir: bool,
    },
}

/// Entry point for the Lyn compiler.
fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { file } => driver::run(&file),
        Commands::Emit {
            file,
            tokens,
            ast,
            ir,
        } => driver::emit(
            &file,
            driver::EmitStages {
                tokens,
                ast,
                ir: ir || !(tokens || ast),
            },
        ),
    };

    if let Err(error) = result {
        diagnostics::report_error(&error);
        std::process::exit(1);
    }
}
