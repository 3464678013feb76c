//! Built-in declarations seeded into the module and the root environment.
//!
//! Before user code is compiled the emitter declares `printf`, the
//! exponentiation helpers, the boolean constant globals, and the printf
//! format strings. The root environment binds `print`,
//! `int_exponentiation`, `float_exponentiation`, `true`, and `false`.

use inkwell::AddressSpace;
use inkwell::IntPredicate;
use inkwell::intrinsics::Intrinsic;
use inkwell::module::Linkage;

use super::env::{Binding, Storage};
use super::Codegen;
use crate::ast::Type;

/// Name of the global printf format used for `int` (and widened `bool`)
/// values.
pub(super) const INT_FORMAT_NAME: &str = "int_string_format";

/// Name of the global printf format used for `float` values.
pub(super) const FLOAT_FORMAT_NAME: &str = "float_string_format";

impl<'ctx> Codegen<'ctx> {
    /// Declares all built-ins. Called once from [`Codegen::new`] before any
    /// user code is compiled.
    pub(super) fn declare_builtins(&mut self) {
        self.define_boolean_globals();
        self.define_format_strings();
        self.declare_printf();
        self.define_int_pow();
        self.declare_float_pow();
    }

    /// Defines the constant globals `true` (i1 1) and `false` (i1 0) and
    /// binds them in the root environment.
    fn define_boolean_globals(&mut self) {
        let bool_type = self.context.bool_type();
        for (name, value) in [("true", 1u64), ("false", 0u64)] {
            let global = self.module.add_global(bool_type, None, name);
            global.set_initializer(&bool_type.const_int(value, false));
            global.set_constant(true);
            self.env.define(
                name,
                Binding {
                    storage: Storage::Pointer(global.as_pointer_value()),
                    ty: Type::Bool,
                },
            );
        }
    }

    /// Defines the constant printf format globals `int_string_format`
    /// (`"%d\n"`) and `float_string_format` (`"%.10f"`).
    fn define_format_strings(&mut self) {
        self.define_format_string(INT_FORMAT_NAME, b"%d\n");
        self.define_format_string(FLOAT_FORMAT_NAME, b"%.10f");
    }

    fn define_format_string(&mut self, name: &str, bytes: &[u8]) {
        let initializer = self.context.const_string(bytes, true);
        let global = self.module.add_global(initializer.get_type(), None, name);
        global.set_initializer(&initializer);
        global.set_constant(true);
    }

    /// Declares the external `printf(ptr, ...) -> i32` and binds it as
    /// `print`.
    fn declare_printf(&mut self) {
        let i32_type = self.context.i32_type();
        let ptr_type = self.context.i8_type().ptr_type(AddressSpace::default());
        let printf_type = i32_type.fn_type(&[ptr_type.into()], true);
        let printf = self
            .module
            .add_function("printf", printf_type, Some(Linkage::External));
        self.env.define(
            "print",
            Binding {
                storage: Storage::Function(printf),
                ty: Type::Int,
            },
        );
    }

    /// Emits `int_pow(i32 base, i32 exponent) -> i32` into the module and
    /// binds it as `int_exponentiation`.
    ///
    /// `llvm.pow` has no integer overload, so integer `^` calls this
    /// iterative-multiply loop instead. Emitting the body here keeps the
    /// JIT free of external runtime symbols. A non-positive exponent
    /// yields 1.
    fn define_int_pow(&mut self) -> Option<()> {
        let i32_type = self.context.i32_type();
        let fn_type = i32_type.fn_type(&[i32_type.into(), i32_type.into()], false);
        let function = self.module.add_function("int_pow", fn_type, None);

        let entry = self.context.append_basic_block(function, "entry");
        let cond = self.context.append_basic_block(function, "pow_cond");
        let body = self.context.append_basic_block(function, "pow_body");
        let done = self.context.append_basic_block(function, "pow_done");

        self.env.define(
            "int_exponentiation",
            Binding {
                storage: Storage::Function(function),
                ty: Type::Int,
            },
        );

        let base = function.get_nth_param(0)?.into_int_value();
        let exponent = function.get_nth_param(1)?.into_int_value();

        self.builder.position_at_end(entry);
        let acc_ptr = self.builder.build_alloca(i32_type, "acc");
        let acc_ptr = self.emit_ok(acc_ptr, "alloca")?;
        let exp_ptr = self.builder.build_alloca(i32_type, "exp");
        let exp_ptr = self.emit_ok(exp_ptr, "alloca")?;
        let one = i32_type.const_int(1, false);
        let store = self.builder.build_store(acc_ptr, one);
        self.emit_ok(store, "store")?;
        let store = self.builder.build_store(exp_ptr, exponent);
        self.emit_ok(store, "store")?;
        let jump = self.builder.build_unconditional_branch(cond);
        self.emit_ok(jump, "branch")?;

        self.builder.position_at_end(cond);
        let exp_value = self.builder.build_load(exp_ptr, "exp_value");
        let exp_value = self.emit_ok(exp_value, "load")?.into_int_value();
        let zero = i32_type.const_int(0, false);
        let keep_going =
            self.builder
                .build_int_compare(IntPredicate::SGT, exp_value, zero, "keep_going");
        let keep_going = self.emit_ok(keep_going, "compare")?;
        let branch = self
            .builder
            .build_conditional_branch(keep_going, body, done);
        self.emit_ok(branch, "conditional branch")?;

        self.builder.position_at_end(body);
        let acc_value = self.builder.build_load(acc_ptr, "acc_value");
        let acc_value = self.emit_ok(acc_value, "load")?.into_int_value();
        let next_acc = self.builder.build_int_mul(acc_value, base, "next_acc");
        let next_acc = self.emit_ok(next_acc, "multiply")?;
        let store = self.builder.build_store(acc_ptr, next_acc);
        self.emit_ok(store, "store")?;
        let next_exp = self
            .builder
            .build_int_sub(exp_value, i32_type.const_int(1, false), "next_exp");
        let next_exp = self.emit_ok(next_exp, "subtract")?;
        let store = self.builder.build_store(exp_ptr, next_exp);
        self.emit_ok(store, "store")?;
        let back = self.builder.build_unconditional_branch(cond);
        self.emit_ok(back, "branch")?;

        self.builder.position_at_end(done);
        let result = self.builder.build_load(acc_ptr, "result");
        let result = self.emit_ok(result, "load")?;
        let ret = self.builder.build_return(Some(&result));
        self.emit_ok(ret, "return")?;

        Some(())
    }

    /// Binds the `llvm.pow.f32` intrinsic as `float_exponentiation`.
    fn declare_float_pow(&mut self) {
        let f32_type = self.context.f32_type();
        let Some(intrinsic) = Intrinsic::find("llvm.pow") else {
            self.error("Internal error: llvm.pow intrinsic not found.".to_string());
            return;
        };
        let Some(function) = intrinsic.get_declaration(&self.module, &[f32_type.into()]) else {
            self.error("Internal error: could not declare llvm.pow.f32.".to_string());
            return;
        };
        self.env.define(
            "float_exponentiation",
            Binding {
                storage: Storage::Function(function),
                ty: Type::Float,
            },
        );
    }
}
