//! Shared helpers for the end-to-end tests.

use std::path::PathBuf;

/// Path to the compiled `lyn` binary under test.
pub fn lyn_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_lyn"))
}
