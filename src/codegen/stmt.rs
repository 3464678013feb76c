//! Statement lowering.
//!
//! Statement emitters return `Option<()>`: `None` means the statement was
//! abandoned and an error recorded (or, for silent cases, that no IR could
//! be produced). Emission continues with the next statement either way.

use inkwell::types::{BasicMetadataTypeEnum, BasicType};
use inkwell::values::FunctionValue;

use super::env::{Binding, Storage};
use super::Codegen;
use crate::ast::{Block, Expr, Param, Stmt, Type};

impl<'ctx> Codegen<'ctx> {
    /// Lowers a single statement.
    pub(super) fn compile_statement(&mut self, statement: &Stmt) -> Option<()> {
        match statement {
            Stmt::Expression { expr } => {
                self.resolve_value(expr, None);
                Some(())
            }
            Stmt::Var {
                name,
                declared_type,
                value,
            } => self.compile_var(name, *declared_type, value),
            Stmt::Assign { name, value } => self.compile_assign(name, value),
            Stmt::Block(block) => self.compile_block(block),
            Stmt::Function {
                name,
                params,
                return_type,
                body,
            } => self.compile_function(name, params, *return_type, body),
            Stmt::Return { value } => self.compile_return(value),
            Stmt::If {
                condition,
                consequence,
                alternative,
            } => self.compile_if(condition, consequence, alternative.as_ref()),
            Stmt::While { condition, body } => self.compile_while(condition, body),
        }
    }

    /// Lowers the statements of a block in order, into the current frame.
    ///
    /// Blocks do not introduce a scope. Emission stops once the current
    /// basic block is terminated (a `return` ends the statement list).
    pub(super) fn compile_block(&mut self, block: &Block) -> Option<()> {
        for statement in &block.statements {
            if self.current_block_terminated() {
                break;
            }
            self.compile_statement(statement);
        }
        Some(())
    }

    /// Lowers `var name: type = value`.
    ///
    /// At module scope the slot is a zero-initialized module global (so
    /// functions can reference it); inside a function it is an alloca.
    /// The initializer value is stored either way, and the name is defined
    /// in the current frame.
    fn compile_var(&mut self, name: &str, declared_type: Type, value: &Expr) -> Option<()> {
        if declared_type == Type::String {
            self.error(format!(
                "Identifier {name} tried to be declared with type string, which has no runtime representation."
            ));
            return None;
        }
        if self.env.defined_in_current_frame(name) {
            self.error(format!(
                "Identifier {name} tried to be declared more than once."
            ));
            return None;
        }

        let (value, value_ty) = self.resolve_value(value, Some(declared_type))?;
        if value_ty != declared_type {
            self.error(format!(
                "Identifier {name} of type {declared_type} tried to be initialized with a value of type {value_ty}."
            ));
            return None;
        }

        let pointee = self.llvm_type(declared_type)?;
        let pointer = if self.env.at_module_scope() {
            let global = self.module.add_global(pointee, None, name);
            global.set_initializer(&self.zero_value(declared_type)?);
            global.as_pointer_value()
        } else {
            let alloca = self.builder.build_alloca(pointee, name);
            self.emit_ok(alloca, "alloca")?
        };

        let store = self.builder.build_store(pointer, value);
        self.emit_ok(store, "store")?;
        self.env.define(
            name,
            Binding {
                storage: Storage::Pointer(pointer),
                ty: declared_type,
            },
        );
        Some(())
    }

    /// Lowers `name = value`.
    fn compile_assign(&mut self, name: &str, value: &Expr) -> Option<()> {
        let Some(binding) = self.env.lookup(name).copied() else {
            self.error(format!(
                "Identifier {name} was not declared before re-assignment."
            ));
            return None;
        };
        let Storage::Pointer(pointer) = binding.storage else {
            self.error(format!(
                "Identifier {name} does not refer to an assignable variable."
            ));
            return None;
        };

        let (value, value_ty) = self.resolve_value(value, None)?;
        if value_ty != binding.ty {
            self.error(format!(
                "Identifier {name} of type {} tried to be re-assigned to {value_ty}.",
                binding.ty
            ));
            return None;
        }

        let store = self.builder.build_store(pointer, value);
        self.emit_ok(store, "store")?;
        Some(())
    }

    /// Lowers `return value`.
    fn compile_return(&mut self, value: &Expr) -> Option<()> {
        let (value, _) = self.resolve_value(value, None)?;
        let ret = self.builder.build_return(Some(&value));
        self.emit_ok(ret, "return")?;
        Some(())
    }

    /// Lowers an `if` statement.
    ///
    /// Without an alternative, a conditional branch to `if_then` rejoins at
    /// `if_end`; with one, `if_else` is added and both branches rejoin.
    /// A branch that already terminated (e.g. with `return`) is not
    /// re-terminated.
    fn compile_if(
        &mut self,
        condition: &Expr,
        consequence: &Block,
        alternative: Option<&Block>,
    ) -> Option<()> {
        let (condition_value, condition_ty) = self.resolve_value(condition, None)?;
        if condition_ty != Type::Bool {
            self.error("If condition must evaluate to a bool.".to_string());
            return None;
        }

        let parent = self.current_function()?;
        let then_block = self.context.append_basic_block(parent, "if_then");
        let merge_block = self.context.append_basic_block(parent, "if_end");
        let else_block =
            alternative.map(|_| self.context.append_basic_block(parent, "if_else"));

        let branch = self.builder.build_conditional_branch(
            condition_value.into_int_value(),
            then_block,
            else_block.unwrap_or(merge_block),
        );
        self.emit_ok(branch, "conditional branch")?;

        self.builder.position_at_end(then_block);
        self.compile_block(consequence);
        if !self.current_block_terminated() {
            let rejoin = self.builder.build_unconditional_branch(merge_block);
            self.emit_ok(rejoin, "branch")?;
        }

        if let (Some(else_block), Some(alternative)) = (else_block, alternative) {
            self.builder.position_at_end(else_block);
            self.compile_block(alternative);
            if !self.current_block_terminated() {
                let rejoin = self.builder.build_unconditional_branch(merge_block);
                self.emit_ok(rejoin, "branch")?;
            }
        }

        self.builder.position_at_end(merge_block);
        Some(())
    }

    /// Lowers a `while` statement into `while_cond` / `while_body` /
    /// `while_after` blocks: unconditionally branch to the condition,
    /// conditionally branch into the body or past the loop, and branch
    /// back to the condition after the body.
    fn compile_while(&mut self, condition: &Expr, body: &Block) -> Option<()> {
        let parent = self.current_function()?;
        let cond_block = self.context.append_basic_block(parent, "while_cond");
        let body_block = self.context.append_basic_block(parent, "while_body");
        let after_block = self.context.append_basic_block(parent, "while_after");

        let enter = self.builder.build_unconditional_branch(cond_block);
        self.emit_ok(enter, "branch")?;

        self.builder.position_at_end(cond_block);
        let (condition_value, condition_ty) = self.resolve_value(condition, None)?;
        if condition_ty != Type::Bool {
            self.error("While condition must evaluate to a bool.".to_string());
            return None;
        }
        let branch = self.builder.build_conditional_branch(
            condition_value.into_int_value(),
            body_block,
            after_block,
        );
        self.emit_ok(branch, "conditional branch")?;

        self.builder.position_at_end(body_block);
        self.compile_block(body);
        if !self.current_block_terminated() {
            let back = self.builder.build_unconditional_branch(cond_block);
            self.emit_ok(back, "branch")?;
        }

        self.builder.position_at_end(after_block);
        Some(())
    }

    /// Lowers a function definition.
    ///
    /// The function name is defined twice: in the fresh child frame before
    /// the body is compiled (so recursive calls resolve) and in the
    /// enclosing frame after the scope bracket is left. A user-defined
    /// `main` gets the LLVM name `user_main`; the `main` symbol belongs to
    /// the synthesized entry, which tail-calls it.
    fn compile_function(
        &mut self,
        name: &str,
        params: &[Param],
        return_type: Type,
        body: &Block,
    ) -> Option<()> {
        let Some(return_ty) = self.llvm_type(return_type) else {
            self.error(format!(
                "Function {name} tried to be declared with return type string, which has no runtime representation."
            ));
            return None;
        };

        let mut param_types: Vec<BasicMetadataTypeEnum<'ctx>> = Vec::with_capacity(params.len());
        for param in params {
            let Some(ty) = self.llvm_type(param.declared_type) else {
                self.error(format!(
                    "Identifier {} tried to be declared with type string, which has no runtime representation.",
                    param.name
                ));
                return None;
            };
            param_types.push(ty.into());
        }

        let fn_type = return_ty.fn_type(&param_types, false);
        let llvm_name = if name == "main" { "user_main" } else { name };
        let function = self.module.add_function(llvm_name, fn_type, None);
        let entry = self
            .context
            .append_basic_block(function, &format!("{name}_entry"));

        self.enter_function_scope(entry);
        self.env.define(
            name,
            Binding {
                storage: Storage::Function(function),
                ty: return_type,
            },
        );

        for (index, param) in params.iter().enumerate() {
            self.spill_parameter(function, index, param);
        }

        self.compile_block(body);

        // A body that falls off the end returns the zero of its type so the
        // function always terminates.
        if !self.current_block_terminated() {
            if let Some(zero) = self.zero_value(return_type) {
                let ret = self.builder.build_return(Some(&zero));
                self.emit_ok(ret, "return");
            }
        }
        self.leave_function_scope();

        self.env.define(
            name,
            Binding {
                storage: Storage::Function(function),
                ty: return_type,
            },
        );
        Some(())
    }

    /// Spills one incoming argument to a stack slot and defines it in the
    /// function's frame. Duplicate parameter names surface as
    /// redeclaration errors.
    fn spill_parameter(
        &mut self,
        function: FunctionValue<'ctx>,
        index: usize,
        param: &Param,
    ) -> Option<()> {
        if self.env.defined_in_current_frame(&param.name) {
            self.error(format!(
                "Identifier {} tried to be declared more than once.",
                param.name
            ));
            return None;
        }

        let pointee = self.llvm_type(param.declared_type)?;
        let Some(value) = function.get_nth_param(index as u32) else {
            self.error(format!(
                "Internal error: parameter {index} ({}) is missing.",
                param.name
            ));
            return None;
        };

        let alloca = self.builder.build_alloca(pointee, &param.name);
        let alloca = self.emit_ok(alloca, "alloca")?;
        let store = self.builder.build_store(alloca, value);
        self.emit_ok(store, "store")?;
        self.env.define(
            &param.name,
            Binding {
                storage: Storage::Pointer(alloca),
                ty: param.declared_type,
            },
        );
        Some(())
    }
}
