//! End-to-end tests for the `lyn emit` command.

mod common;

use common::lyn_binary;
use std::fs;
use std::process::{Command, Output};
use tempfile::tempdir;

/// Runs `lyn emit` with the given extra flags against `source`.
fn emit(source: &str, flags: &[&str]) -> Output {
    let temp = tempdir().unwrap();
    let source_path = temp.path().join("program.lyn");
    fs::write(&source_path, source).unwrap();

    Command::new(lyn_binary())
        .arg("emit")
        .arg(source_path.to_str().unwrap())
        .args(flags)
        .output()
        .unwrap()
}

#[test]
fn test_emit_defaults_to_ir() {
    let output = emit("func main(): int { return 0 }", &[]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("define i32 @main()"),
        "stdout was {stdout:?}"
    );
}

#[test]
fn test_emit_ir_contains_builtins() {
    let output = emit("func main(): int { print(1) return 0 }", &["--ir"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("@printf"), "stdout was {stdout:?}");
    assert!(
        stdout.contains("@int_string_format"),
        "stdout was {stdout:?}"
    );
}

#[test]
fn test_emit_ast_is_valid_json() {
    let output = emit("var x: int = 1 + 2", &["--ast"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("AST dump is not JSON");
    assert_eq!(value["type"], "Program");
    assert_eq!(
        value["statements"][0]["VarStatement"]["value_type"],
        "int"
    );
}

#[test]
fn test_emit_tokens_dumps_the_stream() {
    let output = emit("1 + 2", &["--tokens"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Int(1)"), "stdout was {stdout:?}");
    assert!(stdout.contains("Plus"), "stdout was {stdout:?}");
    assert!(stdout.contains("Eof"), "stdout was {stdout:?}");
}

#[test]
fn test_emit_ir_rejects_compile_errors() {
    let output = emit("var x: int = 1\nvar x: int = 2", &["--ir"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Identifier x tried to be declared more than once."),
        "stderr was {stderr:?}"
    );
}
