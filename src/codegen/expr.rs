//! Expression lowering.
//!
//! [`Codegen::resolve_value`] turns an expression into an LLVM value
//! together with its source-level type. It returns `None` when no value
//! can be produced, either because an error was recorded or silently for
//! the operand combinations the language leaves without a lowering
//! (mixed-type arithmetic).

use inkwell::values::{BasicMetadataValueEnum, BasicValueEnum, FloatValue, IntValue, ValueKind};
use inkwell::{AddressSpace, FloatPredicate, IntPredicate};

use super::env::Storage;
use super::builtins::{FLOAT_FORMAT_NAME, INT_FORMAT_NAME};
use super::Codegen;
use crate::ast::{Expr, InfixOperator, Type};

impl<'ctx> Codegen<'ctx> {
    /// Lowers an expression to `(value, type)`.
    ///
    /// `expected` is the declared-type hint from a `var` statement: a bare
    /// numeric literal adopts it, so `var f: float = 1` yields a float
    /// constant. Identifiers, calls, and infix expressions derive their
    /// type themselves.
    pub(super) fn resolve_value(
        &mut self,
        expr: &Expr,
        expected: Option<Type>,
    ) -> Option<(BasicValueEnum<'ctx>, Type)> {
        match expr {
            Expr::Integer(value) => self.integer_constant(*value, expected),
            Expr::Float(value) => self.float_constant(*value, expected),
            Expr::Boolean(value) => {
                let constant = self.context.bool_type().const_int(*value as u64, false);
                Some((constant.into(), Type::Bool))
            }
            Expr::Identifier(name) => self.load_identifier(name),
            Expr::Infix {
                left,
                operator,
                right,
            } => self.resolve_infix(left, *operator, right),
            Expr::Call { name, args } => self.resolve_call(name, args),
        }
    }

    fn integer_constant(
        &mut self,
        value: i64,
        expected: Option<Type>,
    ) -> Option<(BasicValueEnum<'ctx>, Type)> {
        match expected.unwrap_or(Type::Int) {
            Type::Int => {
                let constant = self.context.i32_type().const_int(value as u64, true);
                Some((constant.into(), Type::Int))
            }
            Type::Float => {
                let constant = self.context.f32_type().const_float(value as f64);
                Some((constant.into(), Type::Float))
            }
            Type::Bool => {
                let constant = self
                    .context
                    .bool_type()
                    .const_int((value != 0) as u64, false);
                Some((constant.into(), Type::Bool))
            }
            Type::String => None,
        }
    }

    fn float_constant(
        &mut self,
        value: f64,
        expected: Option<Type>,
    ) -> Option<(BasicValueEnum<'ctx>, Type)> {
        match expected.unwrap_or(Type::Float) {
            Type::Float => {
                let constant = self.context.f32_type().const_float(value);
                Some((constant.into(), Type::Float))
            }
            Type::Int => {
                let constant = self.context.i32_type().const_int(value as i64 as u64, true);
                Some((constant.into(), Type::Int))
            }
            Type::Bool => {
                let constant = self
                    .context
                    .bool_type()
                    .const_int((value != 0.0) as u64, false);
                Some((constant.into(), Type::Bool))
            }
            Type::String => None,
        }
    }

    /// Looks an identifier up and loads it from its storage slot.
    fn load_identifier(&mut self, name: &str) -> Option<(BasicValueEnum<'ctx>, Type)> {
        let Some(binding) = self.env.lookup(name).copied() else {
            self.error(format!("Identifier {name} has not been declared."));
            return None;
        };

        match binding.storage {
            Storage::Pointer(pointer) => {
                let loaded = self.builder.build_load(pointer, name);
                let loaded = self.emit_ok(loaded, "load")?;
                Some((loaded, binding.ty))
            }
            Storage::Function(_) => {
                self.error(format!("Identifier {name} does not refer to a value."));
                None
            }
        }
    }

    /// Lowers an infix expression, dispatching on the operand types.
    ///
    /// Both-int and both-float operands get the full operator set;
    /// comparisons yield `bool`. Two bools support `==`/`!=`. Any other
    /// combination produces no value, silently.
    fn resolve_infix(
        &mut self,
        left: &Expr,
        operator: InfixOperator,
        right: &Expr,
    ) -> Option<(BasicValueEnum<'ctx>, Type)> {
        let (left_value, left_ty) = self.resolve_value(left, None)?;
        let (right_value, right_ty) = self.resolve_value(right, None)?;

        match (left_ty, right_ty) {
            (Type::Int, Type::Int) => {
                self.int_infix(left_value.into_int_value(), operator, right_value.into_int_value())
            }
            (Type::Float, Type::Float) => self.float_infix(
                left_value.into_float_value(),
                operator,
                right_value.into_float_value(),
            ),
            (Type::Bool, Type::Bool)
                if matches!(operator, InfixOperator::Equal | InfixOperator::NotEqual) =>
            {
                let predicate = if operator == InfixOperator::Equal {
                    IntPredicate::EQ
                } else {
                    IntPredicate::NE
                };
                let compared = self.builder.build_int_compare(
                    predicate,
                    left_value.into_int_value(),
                    right_value.into_int_value(),
                    "cmp_tmp",
                );
                let compared = self.emit_ok(compared, "compare")?;
                Some((compared.into(), Type::Bool))
            }
            _ => None,
        }
    }

    fn int_infix(
        &mut self,
        left: IntValue<'ctx>,
        operator: InfixOperator,
        right: IntValue<'ctx>,
    ) -> Option<(BasicValueEnum<'ctx>, Type)> {
        if operator.is_comparison() {
            let predicate = match operator {
                InfixOperator::Equal => IntPredicate::EQ,
                InfixOperator::NotEqual => IntPredicate::NE,
                InfixOperator::LessThan => IntPredicate::SLT,
                InfixOperator::LessEqual => IntPredicate::SLE,
                InfixOperator::GreaterThan => IntPredicate::SGT,
                _ => IntPredicate::SGE,
            };
            let compared = self
                .builder
                .build_int_compare(predicate, left, right, "cmp_tmp");
            let compared = self.emit_ok(compared, "compare")?;
            return Some((compared.into(), Type::Bool));
        }

        let value = match operator {
            InfixOperator::Add => {
                let result = self.builder.build_int_add(left, right, "add_tmp");
                self.emit_ok(result, "add")?
            }
            InfixOperator::Sub => {
                let result = self.builder.build_int_sub(left, right, "sub_tmp");
                self.emit_ok(result, "subtract")?
            }
            InfixOperator::Mul => {
                let result = self.builder.build_int_mul(left, right, "mul_tmp");
                self.emit_ok(result, "multiply")?
            }
            InfixOperator::Div => {
                let result = self.builder.build_int_signed_div(left, right, "div_tmp");
                self.emit_ok(result, "divide")?
            }
            InfixOperator::Mod => {
                let result = self.builder.build_int_signed_rem(left, right, "mod_tmp");
                self.emit_ok(result, "remainder")?
            }
            InfixOperator::Pow => {
                return self.call_exponentiation(
                    "int_exponentiation",
                    left.into(),
                    right.into(),
                    Type::Int,
                );
            }
            _ => return None,
        };

        Some((value.into(), Type::Int))
    }

    fn float_infix(
        &mut self,
        left: FloatValue<'ctx>,
        operator: InfixOperator,
        right: FloatValue<'ctx>,
    ) -> Option<(BasicValueEnum<'ctx>, Type)> {
        if operator.is_comparison() {
            let predicate = match operator {
                InfixOperator::Equal => FloatPredicate::OEQ,
                InfixOperator::NotEqual => FloatPredicate::ONE,
                InfixOperator::LessThan => FloatPredicate::OLT,
                InfixOperator::LessEqual => FloatPredicate::OLE,
                InfixOperator::GreaterThan => FloatPredicate::OGT,
                _ => FloatPredicate::OGE,
            };
            let compared = self
                .builder
                .build_float_compare(predicate, left, right, "cmp_tmp");
            let compared = self.emit_ok(compared, "compare")?;
            return Some((compared.into(), Type::Bool));
        }

        let value = match operator {
            InfixOperator::Add => {
                let result = self.builder.build_float_add(left, right, "add_tmp");
                self.emit_ok(result, "add")?
            }
            InfixOperator::Sub => {
                let result = self.builder.build_float_sub(left, right, "sub_tmp");
                self.emit_ok(result, "subtract")?
            }
            InfixOperator::Mul => {
                let result = self.builder.build_float_mul(left, right, "mul_tmp");
                self.emit_ok(result, "multiply")?
            }
            InfixOperator::Div => {
                let result = self.builder.build_float_div(left, right, "div_tmp");
                self.emit_ok(result, "divide")?
            }
            InfixOperator::Mod => {
                let result = self.builder.build_float_rem(left, right, "mod_tmp");
                self.emit_ok(result, "remainder")?
            }
            InfixOperator::Pow => {
                return self.call_exponentiation(
                    "float_exponentiation",
                    left.into(),
                    right.into(),
                    Type::Float,
                );
            }
            _ => return None,
        };

        Some((value.into(), Type::Float))
    }

    /// Calls one of the exponentiation helpers bound at startup.
    fn call_exponentiation(
        &mut self,
        name: &str,
        left: BasicMetadataValueEnum<'ctx>,
        right: BasicMetadataValueEnum<'ctx>,
        ty: Type,
    ) -> Option<(BasicValueEnum<'ctx>, Type)> {
        let binding = self.env.lookup(name).copied();
        let Some(Storage::Function(function)) = binding.map(|binding| binding.storage) else {
            self.error(format!("Internal error: built-in {name} is missing."));
            return None;
        };

        let call = self.builder.build_call(function, &[left, right], "pow_tmp");
        let call = self.emit_ok(call, "exponentiation call")?;
        match call.try_as_basic_value() {
            ValueKind::Basic(value) => Some((value, ty)),
            ValueKind::Instruction(_) => None,
        }
    }

    /// Lowers a call expression.
    ///
    /// `print` is special-cased: each argument becomes one `printf` call
    /// and the expression yields no value. Every other callee is looked up
    /// in the environment and called with all arguments; the result carries
    /// the function's declared return type.
    fn resolve_call(&mut self, name: &str, args: &[Expr]) -> Option<(BasicValueEnum<'ctx>, Type)> {
        if name == "print" {
            self.emit_print(args);
            return None;
        }

        let mut resolved = Vec::with_capacity(args.len());
        for arg in args {
            resolved.push(self.resolve_value(arg, None)?.0);
        }

        let Some(binding) = self.env.lookup(name).copied() else {
            self.error(format!("Identifier {name} has not been declared."));
            return None;
        };
        let Storage::Function(function) = binding.storage else {
            self.error(format!("Identifier {name} is not a function."));
            return None;
        };

        if function.count_params() as usize != resolved.len() {
            self.error(format!(
                "Function {name} expects {} arguments but received {}.",
                function.count_params(),
                resolved.len()
            ));
            return None;
        }

        let arguments: Vec<BasicMetadataValueEnum<'ctx>> =
            resolved.into_iter().map(Into::into).collect();
        let call = self.builder.build_call(function, &arguments, "call_tmp");
        let call = self.emit_ok(call, "call")?;

        match call.try_as_basic_value() {
            ValueKind::Basic(value) => Some((value, binding.ty)),
            ValueKind::Instruction(_) => None,
        }
    }

    /// Expands `print(a, b, ...)` into one `printf` per argument.
    ///
    /// `int` uses the `"%d\n"` format; `float` is promoted to double and
    /// uses `"%.10f"`; `bool` is widened to i32 and printed through the
    /// int format.
    fn emit_print(&mut self, args: &[Expr]) {
        for arg in args {
            let Some((value, ty)) = self.resolve_value(arg, None) else {
                continue;
            };
            self.emit_print_value(value, ty);
        }
    }

    fn emit_print_value(&mut self, value: BasicValueEnum<'ctx>, ty: Type) -> Option<()> {
        let Some(printf) = self.module.get_function("printf") else {
            self.error("Internal error: printf declaration is missing.".to_string());
            return None;
        };

        let (format_name, argument): (&str, BasicMetadataValueEnum<'ctx>) = match ty {
            Type::Int => (INT_FORMAT_NAME, value.into()),
            Type::Float => {
                let wide = self.builder.build_float_ext(
                    value.into_float_value(),
                    self.context.f64_type(),
                    "print_wide",
                );
                let wide = self.emit_ok(wide, "float promotion")?;
                (FLOAT_FORMAT_NAME, wide.into())
            }
            Type::Bool => {
                let wide = self.builder.build_int_z_extend(
                    value.into_int_value(),
                    self.context.i32_type(),
                    "print_wide",
                );
                let wide = self.emit_ok(wide, "bool widening")?;
                (INT_FORMAT_NAME, wide.into())
            }
            Type::String => return None,
        };

        let Some(format) = self.module.get_global(format_name) else {
            self.error(format!(
                "Internal error: format string {format_name} is missing."
            ));
            return None;
        };

        let format_ptr = self.builder.build_pointer_cast(
            format.as_pointer_value(),
            self.context.i8_type().ptr_type(AddressSpace::default()),
            "format_ptr",
        );
        let format_ptr = self.emit_ok(format_ptr, "format pointer cast")?;

        let call = self.builder.build_call(
            printf,
            &[format_ptr.into(), argument],
            "printf_call",
        );
        self.emit_ok(call, "printf call")?;
        Some(())
    }
}
