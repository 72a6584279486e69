//! Recursive descent parser for boolean queries.
//!
//! ```text
//! query    := operand (operator operand)*
//! operand  := WORD | NOT operand | "(" query ")"
//! operator := AND | OR
//! ```
//!
//! Operators have no relative precedence and fold left to right.

use crate::lexer::{ast::Expr, tokenizer::Lexer, QueryError, TokenKind};

const EXPECTED_OPERAND: &str = "WORD, NOT or (";
const EXPECTED_OPERATOR: &str = "AND or OR";

/// Builds an [`Expr`] from a query string. Single use: [`Parser::parse`]
/// consumes it.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(query: &'a str) -> Parser<'a> {
        Parser {
            lexer: Lexer::new(query),
            depth: 0,
        }
    }

    pub fn parse(mut self) -> Result<Expr, QueryError> {
        let mut tree = None;
        while !self.at_end() {
            tree = Some(self.parse_next(tree)?);
        }
        tree.ok_or(QueryError::EmptyQuery)
    }

    fn at_end(&self) -> bool {
        self.lexer.current().is(TokenKind::Done)
    }

    fn unexpected(&self, expected: &str) -> QueryError {
        QueryError::UnexpectedToken {
            expected: expected.to_string(),
            found: self.lexer.current().clone(),
        }
    }

    /// Extend `left` by one step: a leading operand when there is none yet,
    /// otherwise a closing parenthesis or an infix operation.
    fn parse_next(&mut self, left: Option<Expr>) -> Result<Expr, QueryError> {
        let left = match left {
            Some(left) => left,
            None => {
                if self.lexer.current().is(TokenKind::RParen) {
                    return Err(if self.depth == 0 {
                        QueryError::UnbalancedParenthesis
                    } else {
                        QueryError::EmptyParenthesis
                    });
                }
                return self.parse_operand();
            }
        };

        match self.lexer.current().kind {
            TokenKind::RParen => {
                if self.depth == 0 {
                    return Err(QueryError::UnbalancedParenthesis);
                }
                self.depth -= 1;
                self.lexer.advance();
                Ok(left)
            }
            TokenKind::And | TokenKind::Or => self.parse_infix(left),
            _ => Err(self.unexpected(EXPECTED_OPERATOR)),
        }
    }

    fn parse_operand(&mut self) -> Result<Expr, QueryError> {
        match self.lexer.current().kind {
            TokenKind::Word => Ok(Expr::Word(self.lexer.advance().text)),
            TokenKind::Not => {
                self.lexer.advance();
                Ok(self.parse_operand()?.not())
            }
            TokenKind::LParen => self.parse_group(),
            _ => Err(self.unexpected(EXPECTED_OPERAND)),
        }
    }

    fn parse_infix(&mut self, left: Expr) -> Result<Expr, QueryError> {
        let operator = self.lexer.advance();
        let right = self.parse_operand()?;
        match operator.kind {
            TokenKind::And => Ok(left.and(right)),
            _ => Ok(left.or(right)),
        }
    }

    /// Parse a parenthesised sub-query up to its matching `)`.
    fn parse_group(&mut self) -> Result<Expr, QueryError> {
        self.lexer.advance();

        let initial_depth = self.depth;
        self.depth += 1;
        let mut tree = None;
        while self.depth != initial_depth && !self.at_end() {
            tree = Some(self.parse_next(tree)?);
        }

        if self.depth != initial_depth {
            return Err(QueryError::UnbalancedParenthesis);
        }
        tree.ok_or(QueryError::EmptyParenthesis)
    }
}
