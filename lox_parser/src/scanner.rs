use lox_ast::{Literal, Token, TokenKind};

use crate::SyntaxError;

/// Turns source text into tokens. Errors are collected rather than
/// returned early so one pass reports every bad character.
pub struct Scanner {
    source: Vec<char>,
    tokens: Vec<Token>,
    errors: Vec<SyntaxError>,
    start: usize,
    current: usize,
    line: usize,
}

impl Scanner {
    pub fn new(source: &str) -> Self {
        Scanner {
            source: source.chars().collect(),
            tokens: Vec::new(),
            errors: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
        }
    }

    pub fn scan_tokens(mut self) -> (Vec<Token>, Vec<SyntaxError>) {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }
        self.tokens.push(Token::new(TokenKind::Eof, "", self.line));
        (self.tokens, self.errors)
    }

    fn scan_token(&mut self) {
        let c = self.advance();
        match c {
            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),
            ',' => self.add_token(TokenKind::Comma),
            '.' => self.add_token(TokenKind::Dot),
            '-' => self.add_token(TokenKind::Minus),
            '+' => self.add_token(TokenKind::Plus),
            ';' => self.add_token(TokenKind::Semicolon),
            '*' => self.add_token(TokenKind::Star),
            '!' => self.add_paired('=', TokenKind::BangEqual, TokenKind::Bang),
            '=' => self.add_paired('=', TokenKind::EqualEqual, TokenKind::Equal),
            '<' => self.add_paired('=', TokenKind::LessEqual, TokenKind::Less),
            '>' => self.add_paired('=', TokenKind::GreaterEqual, TokenKind::Greater),
            '/' => {
                if self.matches('/') {
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                } else if self.matches('*') {
                    self.block_comment();
                } else {
                    self.add_token(TokenKind::Slash);
                }
            }
            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,
            '"' => self.string(),
            c if c.is_ascii_digit() => self.number(),
            c if is_alpha(c) => self.identifier(),
            other => self.error(format!("Unexpected character '{}'.", other)),
        }
    }

    fn block_comment(&mut self) {
        while !(self.peek() == '*' && self.peek_next() == '/') {
            if self.is_at_end() {
                self.error("Unterminated block comment.".to_string());
                return;
            }
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }
        // The closing "*/".
        self.advance();
        self.advance();
    }

    fn string(&mut self) {
        while self.peek() != '"' && !self.is_at_end() {
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            self.error("Unterminated string.".to_string());
            return;
        }

        self.advance();
        let value: String = self.source[self.start + 1..self.current - 1].iter().collect();
        self.add_literal(TokenKind::String, Literal::String(value));
    }

    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance();
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let text = self.lexeme();
        match text.parse::<f64>() {
            Ok(n) => self.add_literal(TokenKind::Number, Literal::Number(n)),
            Err(e) => self.error(format!("Invalid number '{}': {}", text, e)),
        }
    }

    fn identifier(&mut self) {
        while is_alpha(self.peek()) || self.peek().is_ascii_digit() {
            self.advance();
        }
        let text = self.lexeme();
        let kind = TokenKind::keyword(&text).unwrap_or(TokenKind::Identifier);
        match kind {
            TokenKind::True => self.add_literal(kind, Literal::Bool(true)),
            TokenKind::False => self.add_literal(kind, Literal::Bool(false)),
            TokenKind::Nil => self.add_literal(kind, Literal::Nil),
            _ => self.add_token(kind),
        }
    }

    fn add_paired(&mut self, expected: char, paired: TokenKind, single: TokenKind) {
        let kind = if self.matches(expected) { paired } else { single };
        self.add_token(kind);
    }

    fn add_token(&mut self, kind: TokenKind) {
        let lexeme = self.lexeme();
        self.tokens.push(Token::new(kind, lexeme, self.line));
    }

    fn add_literal(&mut self, kind: TokenKind, literal: Literal) {
        let lexeme = self.lexeme();
        self.tokens
            .push(Token::new(kind, lexeme, self.line).with_literal(literal));
    }

    fn lexeme(&self) -> String {
        self.source[self.start..self.current].iter().collect()
    }

    fn error(&mut self, message: String) {
        self.errors.push(SyntaxError::Scan {
            line: self.line,
            message,
        });
    }

    fn matches(&mut self, expected: char) -> bool {
        if self.peek() != expected || self.is_at_end() {
            return false;
        }
        self.current += 1;
        true
    }

    fn advance(&mut self) -> char {
        let c = self.peek();
        self.current += 1;
        c
    }

    fn peek(&self) -> char {
        self.source.get(self.current).copied().unwrap_or('\0')
    }

    fn peek_next(&self) -> char {
        self.source.get(self.current + 1).copied().unwrap_or('\0')
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}
