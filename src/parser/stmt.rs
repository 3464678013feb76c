//! Statement parsing.
//!
//! Statement handlers follow one cursor convention: on entry the current
//! token is the first token of the statement, on exit it is the last token
//! the statement consumed (the trailing `EOL` for `var`, the closing `}`
//! for blocks). The statement loops in [`Parser::parse`] and
//! [`Parser::parse_block_statement`] advance past that token.

use super::Parser;
use super::error::ParseError;
use super::precedence::Precedence;
use crate::ast::{Block, Param, Stmt};
use crate::token::TokenKind;

impl<'a> Parser<'a> {
    /// Parses a single statement.
    ///
    /// An identifier followed by `=` dispatches to assignment; otherwise
    /// the current token kind selects the dedicated parser, falling back
    /// to an expression statement.
    pub(super) fn parse_statement(&mut self) -> Option<Stmt> {
        if matches!(self.current.kind, TokenKind::Identifier(_))
            && matches!(self.peek.kind, TokenKind::Equals)
        {
            return self.parse_assign_statement();
        }

        match self.current.kind {
            TokenKind::Var => self.parse_var_statement(),
            TokenKind::Func => self.parse_function_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::LeftBrace => self.parse_block_statement().map(Stmt::Block),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::If => self.parse_if_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    /// Parses `var IDENTIFIER : TYPE = expr`.
    ///
    /// After the value expression the cursor consumes through the next
    /// `EOL`/`EOF`.
    fn parse_var_statement(&mut self) -> Option<Stmt> {
        let name = self.expect_peek_identifier()?;
        if !self.expect_peek(&TokenKind::Colon) {
            return None;
        }
        let declared_type = self.expect_peek_type()?;
        if !self.expect_peek(&TokenKind::Equals) {
            return None;
        }
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;

        // Consume through the terminating newline, but leave a closing `}`
        // for the enclosing block.
        while !self.current_is(&TokenKind::Eol)
            && !self.current_is(&TokenKind::Eof)
            && !self.peek_is(&TokenKind::RightBrace)
        {
            self.next_token();
        }

        Some(Stmt::Var {
            name,
            declared_type,
            value,
        })
    }

    /// Parses `IDENTIFIER = expr`.
    fn parse_assign_statement(&mut self) -> Option<Stmt> {
        let name = match &self.current.kind {
            TokenKind::Identifier(name) => name.clone(),
            _ => return None,
        };
        self.next_token(); // onto '='
        self.next_token(); // onto the value expression
        let value = self.parse_expression(Precedence::Lowest)?;
        if self.peek_is(&TokenKind::Eol) {
            self.next_token();
        }
        Some(Stmt::Assign { name, value })
    }

    /// Parses `return expr`.
    ///
    /// The terminator is lenient: a trailing `EOL` is consumed when
    /// present, and `}`/`EOF` also end the statement, so single-line
    /// bodies like `func main(): int { return 0 }` parse.
    fn parse_return_statement(&mut self) -> Option<Stmt> {
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;
        if self.peek_is(&TokenKind::Eol) {
            self.next_token();
        }
        Some(Stmt::Return { value })
    }

    /// Parses an expression in statement position.
    fn parse_expression_statement(&mut self) -> Option<Stmt> {
        let expr = self.parse_expression(Precedence::Lowest)?;
        if self.peek_is(&TokenKind::Eol) {
            self.next_token();
        }
        Some(Stmt::Expression { expr })
    }

    /// Parses `{ stmt* }`. The current token is `{`; on success the cursor
    /// rests on the closing `}`.
    pub(super) fn parse_block_statement(&mut self) -> Option<Block> {
        self.next_token(); // past '{'

        let mut statements = Vec::new();
        loop {
            if self.current_is(&TokenKind::RightBrace) {
                break;
            }
            if self.current_is(&TokenKind::Eof) {
                self.errors.push(ParseError {
                    message: "Expected RBRACE, but received EOF instead.".to_string(),
                    span: self.current.span,
                });
                return None;
            }
            if self.current_is(&TokenKind::Eol) {
                self.next_token();
                continue;
            }
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
            self.next_token();
        }

        Some(Block { statements })
    }

    /// Parses `func IDENTIFIER ( params? ) : TYPE block`.
    fn parse_function_statement(&mut self) -> Option<Stmt> {
        let name = self.expect_peek_identifier()?;
        if !self.expect_peek(&TokenKind::LeftParen) {
            return None;
        }
        let params = self.parse_function_parameters()?;
        if !self.expect_peek(&TokenKind::Colon) {
            return None;
        }
        let return_type = self.expect_peek_type()?;
        if !self.expect_peek(&TokenKind::LeftBrace) {
            return None;
        }
        let body = self.parse_block_statement()?;

        Some(Stmt::Function {
            name,
            params,
            return_type,
            body,
        })
    }

    /// Parses the parameter list of a function definition. The current
    /// token is `(`; on success the cursor rests on the closing `)`.
    fn parse_function_parameters(&mut self) -> Option<Vec<Param>> {
        let mut params = Vec::new();

        if self.peek_is(&TokenKind::RightParen) {
            self.next_token();
            return Some(params);
        }

        loop {
            let name = self.expect_peek_identifier()?;
            if !self.expect_peek(&TokenKind::Colon) {
                return None;
            }
            let declared_type = self.expect_peek_type()?;
            params.push(Param {
                name,
                declared_type,
            });

            if self.peek_is(&TokenKind::Comma) {
                self.next_token();
            } else {
                if !self.expect_peek(&TokenKind::RightParen) {
                    return None;
                }
                return Some(params);
            }
        }
    }

    /// Parses `if expr block (else block)?`.
    ///
    /// `else` must follow the consequence's closing `}` directly; a
    /// newline in between ends the statement without an alternative.
    fn parse_if_statement(&mut self) -> Option<Stmt> {
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(&TokenKind::LeftBrace) {
            return None;
        }
        let consequence = self.parse_block_statement()?;

        let alternative = if self.peek_is(&TokenKind::Else) {
            self.next_token(); // onto 'else'
            if !self.expect_peek(&TokenKind::LeftBrace) {
                return None;
            }
            Some(self.parse_block_statement()?)
        } else {
            None
        };

        Some(Stmt::If {
            condition,
            consequence,
            alternative,
        })
    }

    /// Parses `while expr block`.
    fn parse_while_statement(&mut self) -> Option<Stmt> {
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(&TokenKind::LeftBrace) {
            return None;
        }
        let body = self.parse_block_statement()?;

        Some(Stmt::While { condition, body })
    }
}
