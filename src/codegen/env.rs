//! The scoped symbol table used during code generation.
//!
//! This module defines [`Environment`], a stack of frames mapping
//! identifiers to their storage and source-level type. Only function
//! emission pushes and pops frames; `if` and `while` bodies share the
//! enclosing frame.

use std::collections::HashMap;

use inkwell::values::{FunctionValue, PointerValue};

use crate::ast::Type;

/// Where a bound name lives at runtime.
#[derive(Debug, Clone, Copy)]
pub(super) enum Storage<'ctx> {
    /// A loadable/storable location: a stack slot or a module global.
    Pointer(PointerValue<'ctx>),
    /// A callable function.
    Function(FunctionValue<'ctx>),
}

/// A single entry in the symbol table.
///
/// For pointer storage, `ty` is the type of the pointee. For functions,
/// `ty` is the declared return type.
#[derive(Debug, Clone, Copy)]
pub(super) struct Binding<'ctx> {
    /// The storage handle for this name.
    pub(super) storage: Storage<'ctx>,
    /// The source-level type associated with this name.
    pub(super) ty: Type,
}

/// A stack of lexical frames.
///
/// `lookup` walks the frames innermost-out, which realizes the
/// parent-chain semantics of the language: a function body's frame has the
/// frame active at its definition site beneath it on the stack. `define`
/// writes only the innermost frame; there is no delete.
pub(super) struct Environment<'ctx> {
    frames: Vec<HashMap<String, Binding<'ctx>>>,
}

impl<'ctx> Environment<'ctx> {
    /// Creates an environment with a single (root) frame.
    pub(super) fn new() -> Self {
        Environment {
            frames: vec![HashMap::new()],
        }
    }

    /// Pushes a fresh innermost frame. Paired with
    /// [`Environment::pop_frame`] around function emission.
    pub(super) fn push_frame(&mut self) {
        self.frames.push(HashMap::new());
    }

    /// Pops the innermost frame.
    pub(super) fn pop_frame(&mut self) {
        self.frames.pop();
    }

    /// Defines `name` in the innermost frame, replacing any previous entry
    /// there.
    pub(super) fn define(&mut self, name: &str, binding: Binding<'ctx>) {
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name.to_string(), binding);
        }
    }

    /// Looks `name` up, walking the frames innermost-out. Returns the
    /// first hit.
    pub(super) fn lookup(&self, name: &str) -> Option<&Binding<'ctx>> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }

    /// Returns `true` if `name` is already defined in the innermost frame.
    ///
    /// Redeclaration checks use this rather than [`Environment::lookup`]:
    /// shadowing a name from an enclosing frame is allowed, redeclaring
    /// within the same frame is not.
    pub(super) fn defined_in_current_frame(&self, name: &str) -> bool {
        self.frames
            .last()
            .is_some_and(|frame| frame.contains_key(name))
    }

    /// Returns `true` while only the root frame is active, i.e. when the
    /// emitter is compiling top-level statements.
    pub(super) fn at_module_scope(&self) -> bool {
        self.frames.len() == 1
    }
}
