//! Unit tests for the lexer.

use super::*;

/// Helper that drains the lexer into a vector of kinds, stopping after the
/// first `Eof`.
fn lex_kinds(input: &str) -> Vec<TokenKind> {
    let mut lexer = Lexer::new(input);
    let mut kinds = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = matches!(token.kind, TokenKind::Eof);
        kinds.push(token.kind);
        if done {
            break;
        }
    }
    kinds
}

#[test]
fn test_empty_input() {
    assert_eq!(lex_kinds(""), vec![TokenKind::Eof]);
}

#[test]
fn test_eof_is_repeated() {
    let mut lexer = Lexer::new("x");
    assert!(matches!(lexer.next_token().kind, TokenKind::Identifier(_)));
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
}

#[test]
fn test_simple_addition() {
    assert_eq!(
        lex_kinds("1 + 2"),
        vec![
            TokenKind::Int(1),
            TokenKind::Plus,
            TokenKind::Int(2),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_float_literal() {
    assert_eq!(
        lex_kinds("3.14"),
        vec![TokenKind::Float(3.14), TokenKind::Eof]
    );
}

#[test]
fn test_number_with_two_dots_is_exception() {
    assert_eq!(
        lex_kinds("3.1.4"),
        vec![TokenKind::Exception("3.1.4".to_string()), TokenKind::Eof]
    );
}

#[test]
fn test_integer_overflow_is_exception() {
    let raw = "99999999999999999999999999";
    assert_eq!(
        lex_kinds(raw),
        vec![TokenKind::Exception(raw.to_string()), TokenKind::Eof]
    );
}

#[test]
fn test_two_char_operators_are_single_tokens() {
    assert_eq!(
        lex_kinds("<= >= == !="),
        vec![
            TokenKind::LessEqual,
            TokenKind::GreaterEqual,
            TokenKind::EqualEqual,
            TokenKind::BangEqual,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_single_char_operators() {
    assert_eq!(
        lex_kinds("+ - * / ^ % < > = !"),
        vec![
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Caret,
            TokenKind::Percent,
            TokenKind::LessThan,
            TokenKind::GreaterThan,
            TokenKind::Equals,
            TokenKind::Bang,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_dense_if_statement() {
    assert_eq!(
        lex_kinds("if x{y=1}"),
        vec![
            TokenKind::If,
            TokenKind::Identifier("x".to_string()),
            TokenKind::LeftBrace,
            TokenKind::Identifier("y".to_string()),
            TokenKind::Equals,
            TokenKind::Int(1),
            TokenKind::RightBrace,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_keywords_and_types() {
    assert_eq!(
        lex_kinds("var func return if else true false while int float bool string"),
        vec![
            TokenKind::Var,
            TokenKind::Func,
            TokenKind::Return,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::True,
            TokenKind::False,
            TokenKind::While,
            TokenKind::Type("int".to_string()),
            TokenKind::Type("float".to_string()),
            TokenKind::Type("bool".to_string()),
            TokenKind::Type("string".to_string()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_keyword_prefix_is_identifier() {
    assert_eq!(
        lex_kinds("variable iffy"),
        vec![
            TokenKind::Identifier("variable".to_string()),
            TokenKind::Identifier("iffy".to_string()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_nordic_letters_in_identifiers() {
    assert_eq!(
        lex_kinds("räknare Östlig _x1"),
        vec![
            TokenKind::Identifier("räknare".to_string()),
            TokenKind::Identifier("Östlig".to_string()),
            TokenKind::Identifier("_x1".to_string()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_newline_produces_eol() {
    assert_eq!(
        lex_kinds("1\n2"),
        vec![
            TokenKind::Int(1),
            TokenKind::Eol,
            TokenKind::Int(2),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_newline_increments_line_number() {
    let mut lexer = Lexer::new("a\nb");
    assert_eq!(lexer.next_token().span.line, 1);
    assert_eq!(lexer.next_token().kind, TokenKind::Eol);
    let b = lexer.next_token();
    assert_eq!(b.span.line, 2);
    assert_eq!(b.span.column, 1);
}

#[test]
fn test_unknown_character_is_exception() {
    assert_eq!(
        lex_kinds("1 @ 2"),
        vec![
            TokenKind::Int(1),
            TokenKind::Exception("@".to_string()),
            TokenKind::Int(2),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_tokenization_is_total_on_arbitrary_input() {
    // Every character sequence tokenizes to a finite stream ending in Eof.
    let kinds = lex_kinds("§§ 1.2.3 @@@ var ??? \u{1F600}");
    assert_eq!(kinds.last(), Some(&TokenKind::Eof));
    assert!(kinds.iter().any(|k| matches!(k, TokenKind::Exception(_))));
}

#[test]
fn test_spans_track_byte_offsets() {
    let mut lexer = Lexer::new("var x");
    let var = lexer.next_token();
    assert_eq!(var.span.start, 0);
    assert_eq!(var.span.end, 3);
    let x = lexer.next_token();
    assert_eq!(x.span.start, 4);
    assert_eq!(x.span.end, 5);
    assert_eq!(x.span.column, 5);
}
