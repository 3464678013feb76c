//! Debug dump (de)serialization for the AST.
//!
//! Every node serializes to an object with a `"type"` field holding the node
//! kind name. Statement lists (`Program.statements` and
//! `BlockStatement.statements`) are arrays of single-key wrapper objects
//! `{"<Kind>": {...}}`. [`Program::from_json`] reverses the shape, so a
//! serialize-then-reload of any parsed program yields an equal tree.

use serde_json::{Value, json};

use super::expr::{Expr, InfixOperator};
use super::program::Program;
use super::stmt::{Block, Param, Stmt};
use super::types::Type;

/// An error produced when reloading an AST from its JSON dump.
#[derive(Debug)]
pub struct JsonError {
    /// A human-readable description of the error.
    pub message: String,
}

impl JsonError {
    fn new(message: impl Into<String>) -> Self {
        JsonError {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for JsonError {}

impl Program {
    /// Serializes the program to the debug dump shape.
    pub fn to_json(&self) -> Value {
        json!({
            "type": "Program",
            "statements": statement_wrappers(&self.statements),
        })
    }

    /// Reloads a program from the debug dump shape.
    ///
    /// # Errors
    ///
    /// Returns a [`JsonError`] if the value does not follow the dump shape
    /// (missing fields, unknown node kinds, malformed literals).
    pub fn from_json(value: &Value) -> Result<Program, JsonError> {
        expect_kind(value, "Program")?;
        let statements = statements_from_json(field(value, "statements")?)?;
        Ok(Program { statements })
    }
}

/// Returns the node kind name of a statement, used as the wrapper key.
fn stmt_kind_name(stmt: &Stmt) -> &'static str {
    match stmt {
        Stmt::Expression { .. } => "ExpressionStatement",
        Stmt::Var { .. } => "VarStatement",
        Stmt::Assign { .. } => "AssignStatement",
        Stmt::Block(_) => "BlockStatement",
        Stmt::Function { .. } => "FunctionStatement",
        Stmt::Return { .. } => "ReturnStatement",
        Stmt::If { .. } => "IfStatement",
        Stmt::While { .. } => "WhileStatement",
    }
}

fn statement_wrappers(statements: &[Stmt]) -> Vec<Value> {
    statements
        .iter()
        .map(|stmt| {
            let mut wrapper = serde_json::Map::new();
            wrapper.insert(stmt_kind_name(stmt).to_string(), stmt_to_json(stmt));
            Value::Object(wrapper)
        })
        .collect()
}

fn identifier_node(name: &str) -> Value {
    json!({ "type": "IdentifierLiteral", "value": name })
}

fn stmt_to_json(stmt: &Stmt) -> Value {
    match stmt {
        Stmt::Expression { expr } => json!({
            "type": "ExpressionStatement",
            "expression": expr_to_json(expr),
        }),
        Stmt::Var {
            name,
            declared_type,
            value,
        } => json!({
            "type": "VarStatement",
            "name": identifier_node(name),
            "value": expr_to_json(value),
            "value_type": declared_type.to_string(),
        }),
        Stmt::Assign { name, value } => json!({
            "type": "AssignStatement",
            "identifier": identifier_node(name),
            "expression": expr_to_json(value),
        }),
        Stmt::Block(block) => block_to_json(block),
        Stmt::Function {
            name,
            params,
            return_type,
            body,
        } => json!({
            "type": "FunctionStatement",
            "name": identifier_node(name),
            "return_type": return_type.to_string(),
            "parameters": params.iter().map(param_to_json).collect::<Vec<_>>(),
            "body": block_to_json(body),
        }),
        Stmt::Return { value } => json!({
            "type": "ReturnStatement",
            "return_value": expr_to_json(value),
        }),
        Stmt::If {
            condition,
            consequence,
            alternative,
        } => json!({
            "type": "IfStatement",
            "condition": expr_to_json(condition),
            "consequence": block_to_json(consequence),
            "alternative": alternative.as_ref().map(block_to_json),
        }),
        Stmt::While { condition, body } => json!({
            "type": "WhileStatement",
            "condition": expr_to_json(condition),
            "body": block_to_json(body),
        }),
    }
}

fn block_to_json(block: &Block) -> Value {
    json!({
        "type": "BlockStatement",
        "statements": statement_wrappers(&block.statements),
    })
}

fn param_to_json(param: &Param) -> Value {
    json!({
        "type": "FunctionParameter",
        "name": param.name,
        "value_type": param.declared_type.to_string(),
    })
}

fn expr_to_json(expr: &Expr) -> Value {
    match expr {
        Expr::Integer(value) => json!({ "type": "IntegerLiteral", "value": value }),
        Expr::Float(value) => json!({ "type": "FloatLiteral", "value": value }),
        Expr::Boolean(value) => json!({ "type": "BooleanLiteral", "value": value }),
        Expr::Identifier(name) => identifier_node(name),
        Expr::Infix {
            left,
            operator,
            right,
        } => json!({
            "type": "InfixExpression",
            "left_node": expr_to_json(left),
            "operator": operator.as_str(),
            "right_node": expr_to_json(right),
        }),
        Expr::Call { name, args } => json!({
            "type": "CallExpression",
            "name": identifier_node(name),
            "parameters": args.iter().map(expr_to_json).collect::<Vec<_>>(),
        }),
    }
}

fn field<'a>(value: &'a Value, name: &str) -> Result<&'a Value, JsonError> {
    value
        .get(name)
        .ok_or_else(|| JsonError::new(format!("Missing field `{name}`")))
}

fn node_kind(value: &Value) -> Result<&str, JsonError> {
    field(value, "type")?
        .as_str()
        .ok_or_else(|| JsonError::new("Node `type` field is not a string"))
}

fn expect_kind(value: &Value, kind: &str) -> Result<(), JsonError> {
    let found = node_kind(value)?;
    if found == kind {
        Ok(())
    } else {
        Err(JsonError::new(format!(
            "Expected a {kind} node, found {found}"
        )))
    }
}

fn string_field(value: &Value, name: &str) -> Result<String, JsonError> {
    field(value, name)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| JsonError::new(format!("Field `{name}` is not a string")))
}

/// Decodes an `IdentifierLiteral` node into its name.
fn identifier_from_json(value: &Value) -> Result<String, JsonError> {
    expect_kind(value, "IdentifierLiteral")?;
    string_field(value, "value")
}

fn type_from_json(value: &Value, name: &str) -> Result<Type, JsonError> {
    let type_name = string_field(value, name)?;
    Type::from_name(&type_name)
        .ok_or_else(|| JsonError::new(format!("Unknown type name `{type_name}`")))
}

fn statements_from_json(value: &Value) -> Result<Vec<Stmt>, JsonError> {
    let entries = value
        .as_array()
        .ok_or_else(|| JsonError::new("Statement list is not an array"))?;

    entries
        .iter()
        .map(|wrapper| {
            let object = wrapper
                .as_object()
                .filter(|object| object.len() == 1)
                .ok_or_else(|| JsonError::new("Statement wrapper is not a single-key object"))?;
            let (_, node) = object.iter().next().ok_or_else(|| {
                JsonError::new("Statement wrapper is not a single-key object")
            })?;
            stmt_from_json(node)
        })
        .collect()
}

fn block_from_json(value: &Value) -> Result<Block, JsonError> {
    expect_kind(value, "BlockStatement")?;
    let statements = statements_from_json(field(value, "statements")?)?;
    Ok(Block { statements })
}

fn param_from_json(value: &Value) -> Result<Param, JsonError> {
    expect_kind(value, "FunctionParameter")?;
    Ok(Param {
        name: string_field(value, "name")?,
        declared_type: type_from_json(value, "value_type")?,
    })
}

fn stmt_from_json(value: &Value) -> Result<Stmt, JsonError> {
    match node_kind(value)? {
        "ExpressionStatement" => Ok(Stmt::Expression {
            expr: expr_from_json(field(value, "expression")?)?,
        }),
        "VarStatement" => Ok(Stmt::Var {
            name: identifier_from_json(field(value, "name")?)?,
            declared_type: type_from_json(value, "value_type")?,
            value: expr_from_json(field(value, "value")?)?,
        }),
        "AssignStatement" => Ok(Stmt::Assign {
            name: identifier_from_json(field(value, "identifier")?)?,
            value: expr_from_json(field(value, "expression")?)?,
        }),
        "BlockStatement" => Ok(Stmt::Block(block_from_json(value)?)),
        "FunctionStatement" => {
            let params = field(value, "parameters")?
                .as_array()
                .ok_or_else(|| JsonError::new("Field `parameters` is not an array"))?
                .iter()
                .map(param_from_json)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Stmt::Function {
                name: identifier_from_json(field(value, "name")?)?,
                params,
                return_type: type_from_json(value, "return_type")?,
                body: block_from_json(field(value, "body")?)?,
            })
        }
        "ReturnStatement" => Ok(Stmt::Return {
            value: expr_from_json(field(value, "return_value")?)?,
        }),
        "IfStatement" => {
            let alternative = match field(value, "alternative")? {
                Value::Null => None,
                node => Some(block_from_json(node)?),
            };
            Ok(Stmt::If {
                condition: expr_from_json(field(value, "condition")?)?,
                consequence: block_from_json(field(value, "consequence")?)?,
                alternative,
            })
        }
        "WhileStatement" => Ok(Stmt::While {
            condition: expr_from_json(field(value, "condition")?)?,
            body: block_from_json(field(value, "body")?)?,
        }),
        kind => Err(JsonError::new(format!("Unknown statement kind `{kind}`"))),
    }
}

fn expr_from_json(value: &Value) -> Result<Expr, JsonError> {
    match node_kind(value)? {
        "IntegerLiteral" => field(value, "value")?
            .as_i64()
            .map(Expr::Integer)
            .ok_or_else(|| JsonError::new("IntegerLiteral value is not an integer")),
        "FloatLiteral" => field(value, "value")?
            .as_f64()
            .map(Expr::Float)
            .ok_or_else(|| JsonError::new("FloatLiteral value is not a number")),
        "BooleanLiteral" => field(value, "value")?
            .as_bool()
            .map(Expr::Boolean)
            .ok_or_else(|| JsonError::new("BooleanLiteral value is not a boolean")),
        "IdentifierLiteral" => Ok(Expr::Identifier(string_field(value, "value")?)),
        "InfixExpression" => {
            let operator_name = string_field(value, "operator")?;
            let operator = InfixOperator::from_str(&operator_name).ok_or_else(|| {
                JsonError::new(format!("Unknown infix operator `{operator_name}`"))
            })?;
            Ok(Expr::Infix {
                left: Box::new(expr_from_json(field(value, "left_node")?)?),
                operator,
                right: Box::new(expr_from_json(field(value, "right_node")?)?),
            })
        }
        "CallExpression" => {
            let args = field(value, "parameters")?
                .as_array()
                .ok_or_else(|| JsonError::new("Field `parameters` is not an array"))?
                .iter()
                .map(expr_from_json)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Expr::Call {
                name: identifier_from_json(field(value, "name")?)?,
                args,
            })
        }
        kind => Err(JsonError::new(format!("Unknown expression kind `{kind}`"))),
    }
}
