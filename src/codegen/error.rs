//! Code generation error type.

/// An error that occurred during code generation.
///
/// Compile errors are collected on the emitter rather than returned: see
/// [`Codegen::errors`](super::Codegen::errors). They carry no source
/// location (the AST is span-free), so the message must name the
/// offending identifier.
#[derive(Debug, Clone)]
pub struct CompileError {
    /// A human-readable description of the error.
    pub message: String,
}

impl CompileError {
    /// Creates a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        CompileError {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CompileError {}
