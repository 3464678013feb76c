//! Token kinds for the Lyn lexer.
//!
//! This module defines the [`TokenKind`] enum representing all possible
//! token types in the Lyn language.

/// The kind of token recognized by the lexer.
///
/// This enum represents all possible token types in the Lyn language.
/// Literal-carrying variants hold their decoded value (e.g. an `i64` for
/// integer literals) or the raw lexeme (identifiers, type names, and
/// exception tokens).
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// End of file marker.
    ///
    /// Once the input is exhausted the lexer returns this kind forever,
    /// so the parser's lookahead never runs off the end.
    Eof,

    /// A newline, significant as a statement terminator.
    Eol,

    /// An unrecognizable piece of input (unknown character, malformed
    /// number). Carries the raw lexeme. The lexer never fails; downstream
    /// consumers decide what to do with exception tokens.
    Exception(String),

    /// An integer literal, decoded to `i64`.
    Int(i64),

    /// A float literal, decoded to `f64`.
    Float(f64),

    /// An identifier (variable or function name).
    ///
    /// Identifiers start with an ASCII letter, underscore, or one of
    /// `å ä ö Å Ä Ö`; subsequent characters additionally allow ASCII digits.
    Identifier(String),

    /// A reserved type name. The payload is one of `int`, `float`, `bool`,
    /// or `string`.
    Type(String),

    /// The `var` keyword for variable declarations.
    Var,

    /// The `func` keyword for function definitions.
    Func,

    /// The `return` keyword.
    Return,

    /// The `if` keyword.
    If,

    /// The `else` keyword.
    Else,

    /// The `while` keyword.
    While,

    /// The `true` boolean literal keyword.
    True,

    /// The `false` boolean literal keyword.
    False,

    /// A colon `:` for type annotations.
    Colon,

    /// A comma `,`.
    Comma,

    /// A left parenthesis `(`.
    LeftParen,

    /// A right parenthesis `)`.
    RightParen,

    /// A left brace `{`.
    LeftBrace,

    /// A right brace `}`.
    RightBrace,

    /// A plus sign `+`.
    Plus,

    /// A minus sign `-`.
    Minus,

    /// An asterisk `*` for multiplication.
    Star,

    /// A forward slash `/` for division.
    Slash,

    /// A caret `^` for exponentiation.
    Caret,

    /// A percent sign `%` for modulo.
    Percent,

    /// A single equals sign `=` for declarations and assignments.
    Equals,

    /// Double equals `==` for equality comparison.
    EqualEqual,

    /// Not equals `!=` for inequality comparison.
    BangEqual,

    /// Less than `<`.
    LessThan,

    /// Less than or equal `<=`.
    LessEqual,

    /// Greater than `>`.
    GreaterThan,

    /// Greater than or equal `>=`.
    GreaterEqual,

    /// A bang (exclamation mark) `!`.
    Bang,
}

impl TokenKind {
    /// Returns the stable display name of this kind, as used in parser
    /// error messages (`Expected IDENTIFIER, but received COLON instead.`).
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Eof => "EOF",
            TokenKind::Eol => "EOL",
            TokenKind::Exception(_) => "EXCEPTION",
            TokenKind::Int(_) => "INT",
            TokenKind::Float(_) => "FLOAT",
            TokenKind::Identifier(_) => "IDENTIFIER",
            TokenKind::Type(_) => "TYPE",
            TokenKind::Var => "VAR",
            TokenKind::Func => "FUNC",
            TokenKind::Return => "RETURN",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::While => "WHILE",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Colon => "COLON",
            TokenKind::Comma => "COMMA",
            TokenKind::LeftParen => "LPAREN",
            TokenKind::RightParen => "RPAREN",
            TokenKind::LeftBrace => "LBRACE",
            TokenKind::RightBrace => "RBRACE",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "MULTIPLY",
            TokenKind::Slash => "DIVIDE",
            TokenKind::Caret => "EXPONENT",
            TokenKind::Percent => "MODULO",
            TokenKind::Equals => "EQUALS",
            TokenKind::EqualEqual => "DOUBLE_EQUALS",
            TokenKind::BangEqual => "NOT_EQUALS",
            TokenKind::LessThan => "LESSTHAN",
            TokenKind::LessEqual => "LESSTHAN_EQUALS",
            TokenKind::GreaterThan => "GREATERTHAN",
            TokenKind::GreaterEqual => "GREATERTHAN_EQUALS",
            TokenKind::Bang => "BANG",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_kind_payloads() {
        assert!(matches!(TokenKind::Int(42), TokenKind::Int(42)));
        let kind = TokenKind::Identifier("pow2".to_string());
        assert!(matches!(kind, TokenKind::Identifier(ref s) if s == "pow2"));
        let kind = TokenKind::Exception("3.1.4".to_string());
        assert!(matches!(kind, TokenKind::Exception(ref s) if s == "3.1.4"));
    }

    #[test]
    fn test_token_kind_names() {
        assert_eq!(TokenKind::Identifier("x".to_string()).name(), "IDENTIFIER");
        assert_eq!(TokenKind::EqualEqual.name(), "DOUBLE_EQUALS");
        assert_eq!(TokenKind::Caret.name(), "EXPONENT");
        assert_eq!(TokenKind::Eol.name(), "EOL");
    }

    #[test]
    fn test_token_kind_partial_eq() {
        assert_eq!(
            TokenKind::Type("int".to_string()),
            TokenKind::Type("int".to_string())
        );
        assert_ne!(TokenKind::LessThan, TokenKind::LessEqual);
    }
}
