//! Error reporting for the CLI.
//!
//! Parse errors are rendered as labeled ariadne reports against the source
//! text. Compile errors carry no spans (the AST is span-free) and are
//! printed one per line, as are the driver-level failures.

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};

use lyn::parser::ParseError;

use crate::driver::DriverError;

/// Reports a pipeline failure to stderr.
pub(crate) fn report_error(error: &DriverError) {
    match error {
        DriverError::FileRead { path, source } => {
            eprintln!("Error: failed to read file '{}': {}", path, source);
        }
        DriverError::Parse {
            filename,
            source,
            errors,
        } => {
            for error in errors {
                report_parse_error(filename, source, error);
            }
        }
        DriverError::Compile { errors } => {
            for error in errors {
                eprintln!("Error: {}", error);
            }
        }
        DriverError::Verify(message) => {
            eprintln!("Error: module verification failed: {}", message);
        }
        DriverError::Execution(message) => {
            eprintln!("Error: {}", message);
        }
    }
}

/// Renders one parse error as an ariadne report, falling back to a plain
/// line when the report cannot be displayed.
fn report_parse_error(filename: &str, source: &str, error: &ParseError) {
    let span_range = error.span.start..error.span.end;

    let result = Report::build(ReportKind::Error, (filename, span_range.clone()))
        .with_config(Config::default().with_index_type(IndexType::Byte))
        .with_message(&error.message)
        .with_label(
            Label::new((filename, span_range))
                .with_message(&error.message)
                .with_color(Color::Red),
        )
        .finish()
        .eprint((filename, Source::from(source)));

    if result.is_err() {
        eprintln!(
            "Error: {} (at {}:{})",
            error.message, error.span.line, error.span.column
        );
    }
}
