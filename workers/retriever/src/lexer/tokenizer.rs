use crate::lexer::{Token, TokenKind};

fn is_ignorable_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

fn is_word_char(ch: char) -> bool {
    !is_ignorable_whitespace(ch) && ch != '(' && ch != ')'
}

/// Cursor over a query string producing one [`Token`] at a time.
///
/// The lexer always holds the token under the cursor; once the input is
/// exhausted it keeps yielding `Done`.
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    current: Token,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Lexer<'a> {
        let mut lexer = Lexer {
            input,
            position: 0,
            current: Token::done(),
        };
        lexer.current = lexer.next_token();
        lexer
    }

    /// The token under the cursor, without consuming it.
    pub fn current(&self) -> &Token {
        &self.current
    }

    /// Consume the current token, returning it, and move to the next one.
    pub fn advance(&mut self) -> Token {
        let next = self.next_token();
        std::mem::replace(&mut self.current, next)
    }

    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn eat_whitespace(&mut self) {
        let skipped = self
            .rest()
            .find(|c: char| !is_ignorable_whitespace(c))
            .unwrap_or(self.rest().len());
        self.position += skipped;
    }

    fn next_token(&mut self) -> Token {
        self.eat_whitespace();

        let rest = self.rest();
        let ch = match rest.chars().next() {
            Some(ch) => ch,
            None => return Token::done(),
        };

        match ch {
            '(' => {
                self.position += 1;
                Token::symbol(TokenKind::LParen)
            }
            ')' => {
                self.position += 1;
                Token::symbol(TokenKind::RParen)
            }
            _ => {
                let len = rest.find(|c: char| !is_word_char(c)).unwrap_or(rest.len());
                let raw = &rest[..len];
                self.position += len;
                match raw {
                    "AND" => Token::symbol(TokenKind::And),
                    "OR" => Token::symbol(TokenKind::Or),
                    "NOT" => Token::symbol(TokenKind::Not),
                    _ => Token::word(raw),
                }
            }
        }
    }

    /// Lex a whole query, excluding the trailing `Done`.
    pub fn tokenize(input: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(input);
        let mut tokens = Vec::new();
        while !lexer.current().is(TokenKind::Done) {
            tokens.push(lexer.advance());
        }
        tokens
    }
}
