//! Expression parsing using Pratt precedence climbing.
//!
//! Prefix positions handle literals, identifiers, and grouped expressions;
//! infix positions handle the binary operators and call syntax. The
//! expression loop never crosses an `EOL` token.

use super::Parser;
use super::error::ParseError;
use super::precedence::Precedence;
use crate::ast::{Expr, InfixOperator};
use crate::token::TokenKind;

impl<'a> Parser<'a> {
    /// Parses an expression at the given binding level.
    ///
    /// The core Pratt loop: parse a prefix expression, then while the peek
    /// token is an infix operator binding strictly tighter than
    /// `precedence`, fold it into the left side. Returns `None` (with a
    /// recorded error) when no expression can be produced.
    pub(super) fn parse_expression(&mut self, precedence: Precedence) -> Option<Expr> {
        let mut left = self.parse_prefix()?;

        while !self.peek_is(&TokenKind::Eol) && precedence < Precedence::of(&self.peek.kind) {
            if !Self::has_infix_handler(&self.peek.kind) {
                return Some(left);
            }
            self.next_token();
            left = self.parse_infix(left)?;
        }

        Some(left)
    }

    /// Dispatches on the current token in prefix position.
    ///
    /// A token without a prefix handler (including `Exception` tokens from
    /// the lexer) records `Prefix parse function missing for <KIND>`.
    fn parse_prefix(&mut self) -> Option<Expr> {
        match &self.current.kind {
            TokenKind::Int(value) => Some(Expr::Integer(*value)),
            TokenKind::Float(value) => Some(Expr::Float(*value)),
            TokenKind::True => Some(Expr::Boolean(true)),
            TokenKind::False => Some(Expr::Boolean(false)),
            TokenKind::Identifier(name) => Some(Expr::Identifier(name.clone())),
            TokenKind::LeftParen => self.parse_grouped_expression(),
            kind => {
                self.errors.push(ParseError {
                    message: format!("Prefix parse function missing for {}", kind.name()),
                    span: self.current.span,
                });
                None
            }
        }
    }

    /// Returns `true` for tokens with an infix handler.
    fn has_infix_handler(kind: &TokenKind) -> bool {
        matches!(
            kind,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Caret
                | TokenKind::Percent
                | TokenKind::EqualEqual
                | TokenKind::BangEqual
                | TokenKind::LessThan
                | TokenKind::LessEqual
                | TokenKind::GreaterThan
                | TokenKind::GreaterEqual
                | TokenKind::LeftParen
        )
    }

    /// Maps an operator token to its AST operator.
    fn infix_operator(kind: &TokenKind) -> Option<InfixOperator> {
        match kind {
            TokenKind::Plus => Some(InfixOperator::Add),
            TokenKind::Minus => Some(InfixOperator::Sub),
            TokenKind::Star => Some(InfixOperator::Mul),
            TokenKind::Slash => Some(InfixOperator::Div),
            TokenKind::Caret => Some(InfixOperator::Pow),
            TokenKind::Percent => Some(InfixOperator::Mod),
            TokenKind::EqualEqual => Some(InfixOperator::Equal),
            TokenKind::BangEqual => Some(InfixOperator::NotEqual),
            TokenKind::LessThan => Some(InfixOperator::LessThan),
            TokenKind::LessEqual => Some(InfixOperator::LessEqual),
            TokenKind::GreaterThan => Some(InfixOperator::GreaterThan),
            TokenKind::GreaterEqual => Some(InfixOperator::GreaterEqual),
            _ => None,
        }
    }

    /// Dispatches on the current token in infix position.
    ///
    /// The current token is the operator (or `(` for a call); `left` is the
    /// already-parsed left side.
    fn parse_infix(&mut self, left: Expr) -> Option<Expr> {
        if matches!(self.current.kind, TokenKind::LeftParen) {
            return self.parse_call_expression(left);
        }

        let operator = Self::infix_operator(&self.current.kind)?;
        let precedence = Precedence::of(&self.current.kind);
        self.next_token();
        let right = self.parse_expression(precedence)?;

        Some(Expr::Infix {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    /// Parses a parenthesized expression. The current token is `(`.
    fn parse_grouped_expression(&mut self) -> Option<Expr> {
        self.next_token();
        let expr = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(&TokenKind::RightParen) {
            return None;
        }
        Some(expr)
    }

    /// Parses a call expression. The current token is the `(` following the
    /// callee, which must be a bare identifier.
    fn parse_call_expression(&mut self, callee: Expr) -> Option<Expr> {
        let Expr::Identifier(name) = callee else {
            self.errors.push(ParseError {
                message: "Only identifiers can be called.".to_string(),
                span: self.current.span,
            });
            return None;
        };

        let args = self.parse_call_arguments()?;
        Some(Expr::Call { name, args })
    }

    /// Parses the argument list of a call. The current token is `(`; on
    /// success the cursor rests on the closing `)`.
    fn parse_call_arguments(&mut self) -> Option<Vec<Expr>> {
        let mut args = Vec::new();

        if self.peek_is(&TokenKind::RightParen) {
            self.next_token();
            return Some(args);
        }

        loop {
            self.next_token();
            args.push(self.parse_expression(Precedence::Lowest)?);

            if self.peek_is(&TokenKind::Comma) {
                self.next_token();
            } else {
                if !self.expect_peek(&TokenKind::RightParen) {
                    return None;
                }
                return Some(args);
            }
        }
    }
}
