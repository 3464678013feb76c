//! Unit tests for parsing.

use super::*;
use crate::ast::{Block, Expr, InfixOperator, Param, Stmt};

/// Helper that parses input and asserts there were no errors.
fn parse(input: &str) -> Program {
    let mut parser = Parser::new(Lexer::new(input));
    let program = parser.parse();
    assert!(
        parser.errors().is_empty(),
        "unexpected parse errors for {:?}: {:?}",
        input,
        parser.errors()
    );
    program
}

/// Helper that parses input and returns the collected error messages.
fn parse_errors(input: &str) -> Vec<String> {
    let mut parser = Parser::new(Lexer::new(input));
    parser.parse();
    parser
        .errors()
        .iter()
        .map(|error| error.message.clone())
        .collect()
}

/// Helper that parses a single expression statement and returns the
/// expression.
fn parse_expr(input: &str) -> Expr {
    let program = parse(input);
    assert_eq!(program.statements.len(), 1, "input {:?}", input);
    match &program.statements[0] {
        Stmt::Expression { expr } => expr.clone(),
        other => panic!("Expected expression statement, got {:?}", other),
    }
}

fn int(value: i64) -> Expr {
    Expr::Integer(value)
}

fn infix(left: Expr, operator: InfixOperator, right: Expr) -> Expr {
    Expr::Infix {
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }
}

// ===================
// Expressions
// ===================

#[test]
fn test_product_binds_tighter_than_sum() {
    assert_eq!(
        parse_expr("1 + 2 * 3"),
        infix(int(1), InfixOperator::Add, infix(int(2), InfixOperator::Mul, int(3)))
    );
}

#[test]
fn test_exponent_binds_tighter_than_product() {
    assert_eq!(
        parse_expr("2 ^ 3 * 4"),
        infix(infix(int(2), InfixOperator::Pow, int(3)), InfixOperator::Mul, int(4))
    );
}

#[test]
fn test_subtraction_is_left_associative() {
    assert_eq!(
        parse_expr("1 - 2 - 3"),
        infix(infix(int(1), InfixOperator::Sub, int(2)), InfixOperator::Sub, int(3))
    );
}

#[test]
fn test_exponent_is_left_associative() {
    assert_eq!(
        parse_expr("2 ^ 3 ^ 4"),
        infix(infix(int(2), InfixOperator::Pow, int(3)), InfixOperator::Pow, int(4))
    );
}

#[test]
fn test_comparison_binds_looser_than_arithmetic() {
    assert_eq!(
        parse_expr("1 + 2 == 3"),
        infix(infix(int(1), InfixOperator::Add, int(2)), InfixOperator::Equal, int(3))
    );
}

#[test]
fn test_grouped_expression_overrides_precedence() {
    assert_eq!(
        parse_expr("(1 + 2) * 3"),
        infix(infix(int(1), InfixOperator::Add, int(2)), InfixOperator::Mul, int(3))
    );
}

#[test]
fn test_boolean_literals() {
    assert_eq!(parse_expr("true"), Expr::Boolean(true));
    assert_eq!(parse_expr("false"), Expr::Boolean(false));
}

#[test]
fn test_float_literal_expression() {
    assert_eq!(parse_expr("3.25"), Expr::Float(3.25));
}

#[test]
fn test_call_with_arguments() {
    assert_eq!(
        parse_expr("pow2(5, x)"),
        Expr::Call {
            name: "pow2".to_string(),
            args: vec![int(5), Expr::Identifier("x".to_string())],
        }
    );
}

#[test]
fn test_call_without_arguments() {
    assert_eq!(
        parse_expr("ping()"),
        Expr::Call {
            name: "ping".to_string(),
            args: vec![],
        }
    );
}

#[test]
fn test_call_argument_can_be_expression() {
    assert_eq!(
        parse_expr("pow2(n - 1)"),
        Expr::Call {
            name: "pow2".to_string(),
            args: vec![infix(
                Expr::Identifier("n".to_string()),
                InfixOperator::Sub,
                int(1)
            )],
        }
    );
}

#[test]
fn test_expression_loop_stops_at_eol() {
    // The newline terminates the first expression statement.
    let program = parse("1\n2");
    assert_eq!(program.statements.len(), 2);
    assert_eq!(program.statements[0], Stmt::Expression { expr: int(1) });
    assert_eq!(program.statements[1], Stmt::Expression { expr: int(2) });
}

#[test]
fn test_operator_before_newline_cannot_bind() {
    let errors = parse_errors("1 +\n2");
    assert_eq!(errors, vec!["Prefix parse function missing for EOL"]);
}

// ===================
// Statements
// ===================

#[test]
fn test_var_statement() {
    let program = parse("var x: int = 1 + 2");
    assert_eq!(
        program.statements,
        vec![Stmt::Var {
            name: "x".to_string(),
            declared_type: Type::Int,
            value: infix(int(1), InfixOperator::Add, int(2)),
        }]
    );
}

#[test]
fn test_var_statement_float_type() {
    let program = parse("var f: float = 3.5");
    assert_eq!(
        program.statements,
        vec![Stmt::Var {
            name: "f".to_string(),
            declared_type: Type::Float,
            value: Expr::Float(3.5),
        }]
    );
}

#[test]
fn test_assign_statement() {
    let program = parse("x = x + 1");
    assert_eq!(
        program.statements,
        vec![Stmt::Assign {
            name: "x".to_string(),
            value: infix(Expr::Identifier("x".to_string()), InfixOperator::Add, int(1)),
        }]
    );
}

#[test]
fn test_return_statement_single_line_body() {
    let program = parse("func main(): int { return 1 + 2 * 3 }");
    let Stmt::Function { name, body, .. } = &program.statements[0] else {
        panic!("Expected function statement");
    };
    assert_eq!(name, "main");
    assert_eq!(
        body.statements,
        vec![Stmt::Return {
            value: infix(int(1), InfixOperator::Add, infix(int(2), InfixOperator::Mul, int(3))),
        }]
    );
}

#[test]
fn test_function_statement_with_parameters() {
    let program = parse("func add(a: int, b: float): int { return a }");
    assert_eq!(
        program.statements,
        vec![Stmt::Function {
            name: "add".to_string(),
            params: vec![
                Param {
                    name: "a".to_string(),
                    declared_type: Type::Int,
                },
                Param {
                    name: "b".to_string(),
                    declared_type: Type::Float,
                },
            ],
            return_type: Type::Int,
            body: Block {
                statements: vec![Stmt::Return {
                    value: Expr::Identifier("a".to_string()),
                }],
            },
        }]
    );
}

#[test]
fn test_function_statement_without_parameters() {
    let program = parse("func main(): int { return 0 }");
    let Stmt::Function { params, return_type, .. } = &program.statements[0] else {
        panic!("Expected function statement");
    };
    assert!(params.is_empty());
    assert_eq!(*return_type, Type::Int);
}

#[test]
fn test_if_statement_without_else() {
    let program = parse("if x == 0 { return 1 }");
    let Stmt::If {
        condition,
        consequence,
        alternative,
    } = &program.statements[0]
    else {
        panic!("Expected if statement");
    };
    assert_eq!(
        *condition,
        infix(Expr::Identifier("x".to_string()), InfixOperator::Equal, int(0))
    );
    assert_eq!(consequence.statements.len(), 1);
    assert!(alternative.is_none());
}

#[test]
fn test_if_statement_with_else() {
    let program = parse("if flag { x = 1 } else { x = 2 }");
    let Stmt::If { alternative, .. } = &program.statements[0] else {
        panic!("Expected if statement");
    };
    assert_eq!(alternative.as_ref().unwrap().statements.len(), 1);
}

#[test]
fn test_while_statement() {
    let program = parse("while i <= 10 { i = i + 1 }");
    let Stmt::While { condition, body } = &program.statements[0] else {
        panic!("Expected while statement");
    };
    assert_eq!(
        *condition,
        infix(Expr::Identifier("i".to_string()), InfixOperator::LessEqual, int(10))
    );
    assert_eq!(body.statements.len(), 1);
}

#[test]
fn test_standalone_block_statement() {
    let program = parse("{ var x: int = 1 }");
    let Stmt::Block(block) = &program.statements[0] else {
        panic!("Expected block statement");
    };
    assert_eq!(block.statements.len(), 1);
}

#[test]
fn test_multiline_program() {
    let program = parse("var x: int = 10\nvar y: int = 4\nfunc main(): int { return x % y }");
    assert_eq!(program.statements.len(), 3);
}

#[test]
fn test_single_line_program_with_two_functions() {
    let program =
        parse("func pow2(n: int): int { return 2 * pow2(n - 1) } func main(): int { return pow2(5) }");
    assert_eq!(program.statements.len(), 2);
}

#[test]
fn test_nested_if_inside_function() {
    let program = parse(
        "func pow2(n: int): int { if n == 0 { return 1 } return 2 * pow2(n - 1) }",
    );
    let Stmt::Function { body, .. } = &program.statements[0] else {
        panic!("Expected function statement");
    };
    assert_eq!(body.statements.len(), 2);
    assert!(matches!(body.statements[0], Stmt::If { .. }));
    assert!(matches!(body.statements[1], Stmt::Return { .. }));
}

#[test]
fn test_empty_program() {
    let program = parse("");
    assert!(program.statements.is_empty());
}

#[test]
fn test_blank_lines_are_skipped() {
    let program = parse("\n\nvar x: int = 1\n\n\n");
    assert_eq!(program.statements.len(), 1);
}

// ===================
// Errors
// ===================

#[test]
fn test_missing_colon_in_var() {
    // Recovery resumes at the next token, so the stray tokens of the
    // dropped statement produce follow-on errors.
    let errors = parse_errors("var x int = 1");
    assert_eq!(errors[0], "Expected COLON, but received TYPE instead.");
}

#[test]
fn test_missing_type_in_var() {
    let errors = parse_errors("var x: = 1");
    assert_eq!(errors[0], "Expected TYPE, but received EQUALS instead.");
}

#[test]
fn test_missing_prefix_parse_function() {
    let errors = parse_errors("var x: int = *");
    assert_eq!(errors, vec!["Prefix parse function missing for MULTIPLY"]);
}

#[test]
fn test_exception_token_surfaces_as_missing_prefix() {
    let errors = parse_errors("var x: int = 3.1.4");
    assert_eq!(errors, vec!["Prefix parse function missing for EXCEPTION"]);
}

#[test]
fn test_multiple_errors_in_one_pass() {
    let errors = parse_errors("var x int = 1\nvar y float = 2.0");
    let expected_count = errors
        .iter()
        .filter(|message| *message == "Expected COLON, but received TYPE instead.")
        .count();
    assert_eq!(expected_count, 2, "errors were {errors:?}");
}

#[test]
fn test_error_drops_statement_but_keeps_the_rest() {
    let mut parser = Parser::new(Lexer::new("var x int = 1\nvar y: int = 2"));
    let program = parser.parse();
    assert!(!parser.errors().is_empty());
    assert!(
        program
            .statements
            .iter()
            .any(|statement| matches!(statement, Stmt::Var { name, .. } if name == "y"))
    );
    assert!(
        !program
            .statements
            .iter()
            .any(|statement| matches!(statement, Stmt::Var { name, .. } if name == "x"))
    );
}

#[test]
fn test_unclosed_block_reports_eof() {
    let errors = parse_errors("func main(): int { return 0");
    assert!(
        errors.contains(&"Expected RBRACE, but received EOF instead.".to_string()),
        "errors were {errors:?}"
    );
}

#[test]
fn test_parse_error_display_includes_position() {
    let mut parser = Parser::new(Lexer::new("var x int = 1"));
    parser.parse();
    let rendered = parser.errors()[0].to_string();
    assert!(rendered.starts_with("1:"), "rendered as {rendered:?}");
    assert!(rendered.contains("Expected COLON"));
}

// ===================
// Round-trip with the JSON dump
// ===================

#[test]
fn test_parsed_program_survives_json_round_trip() {
    let program = parse(
        "var x: int = 10\nfunc main(): int { if x > 5 { return x } else { return 0 } }\nprint(3.25)",
    );
    let reloaded = Program::from_json(&program.to_json()).expect("reload should succeed");
    assert_eq!(reloaded, program);
}
