//! Query language: tokenizes, parses and evaluates boolean search queries.
//!
//! The surface syntax is whitespace separated terms combined with the
//! case-sensitive keywords `AND`, `OR` and `NOT`, grouped with parentheses.
//! `AND` and `OR` share one precedence level and apply left to right, so
//! `a AND NOT b OR c` reads as `((a AND NOT b) OR c)`.

use std::fmt::Display;

/// Describes an error that occurred while parsing a query
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("Invalid query: empty query")]
    EmptyQuery,
    #[error("Invalid query: empty parenthesis")]
    EmptyParenthesis,
    #[error("Invalid query: unbalanced parenthesis")]
    UnbalancedParenthesis,
    #[error("Invalid query: expected {expected}, got {found}")]
    UnexpectedToken { expected: String, found: Token },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    And,
    Or,
    Not,
    LParen,
    RParen,
    Done,
}

/// A lexed query token. Keywords and parentheses carry their fixed literal,
/// words carry the raw text exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn word<S: Into<String>>(text: S) -> Token {
        Token {
            kind: TokenKind::Word,
            text: text.into(),
        }
    }

    pub fn symbol(kind: TokenKind) -> Token {
        let text = match kind {
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Not => "NOT",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Word | TokenKind::Done => "",
        };
        Token {
            kind,
            text: text.to_string(),
        }
    }

    pub fn done() -> Token {
        Token::symbol(TokenKind::Done)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::Done => write!(f, "end of input"),
            _ => write!(f, "{}", self.text),
        }
    }
}

/// Parse a raw query string into its AST.
pub fn parse_query(query: &str) -> Result<ast::Expr, QueryError> {
    parser::Parser::new(query).parse()
}

pub mod ast;
pub mod parser;
pub mod scoring;
pub mod tokenizer;
