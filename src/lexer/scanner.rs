//! The scanner: turns source text into a flat token stream.
//!
//! Dual-licensed under the MIT license and the Apache License, Version 2.0.
//! Unless required by applicable law or agreed to in writing, software
//! distributed under these licenses is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.

use crate::diagnostics::Diagnostics;
use crate::lexer::keywords::keyword_kind;
use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;
use crate::value::Value;

/// Walks source text one character at a time, grouping it into `Token`s.
///
/// Structurally this follows the teacher's `Lexer` (a `Vec<char>` plus a
/// `current` cursor and a running `line` counter), but a lexical error here
/// records a diagnostic and keeps scanning instead of panicking, per spec
/// §4.1/§7 — one bad character shouldn't hide every other mistake in the
/// file.
pub struct Scanner<'a> {
    chars: Vec<char>,
    start: usize,
    current: usize,
    line: usize,
    tokens: Vec<Token>,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &str, diagnostics: &'a mut Diagnostics) -> Self {
        Self {
            chars: source.chars().collect(),
            start: 0,
            current: 0,
            line: 1,
            tokens: Vec::new(),
            diagnostics,
        }
    }

    pub fn scan_tokens(mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }
        self.tokens
            .push(Token::new(TokenKind::Eof, "", None, Span::new(self.line, 0)));
        self.tokens
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
            '!' => {
                let kind = if self.match_char('=') { TokenKind::BangEqual } else { TokenKind::Bang };
                self.add_token(kind);
            }
            '=' => {
                let kind = if self.match_char('=') { TokenKind::EqualEqual } else { TokenKind::Equal };
                self.add_token(kind);
            }
            '<' => {
                let kind = if self.match_char('=') { TokenKind::LessEqual } else { TokenKind::Less };
                self.add_token(kind);
            }
            '>' => {
                let kind = if self.match_char('=') { TokenKind::GreaterEqual } else { TokenKind::Greater };
                self.add_token(kind);
            }
            '/' => {
                if self.match_char('/') {
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                } else {
                    self.add_token(TokenKind::Slash);
                }
            }
            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,
            '"' => self.string(),
            _ if c.is_ascii_digit() => self.number(),
            _ if c.is_alphabetic() || c == '_' => self.identifier(),
            _ => self.diagnostics.lexical_error(self.line, "Unexpected character."),
        }
    }

    fn string(&mut self) {
        while self.peek() != '"' && !self.is_at_end() {
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            self.diagnostics.lexical_error(self.line, "Unterminated string.");
            return;
        }

        self.advance();
        let value: String = self.chars[self.start + 1..self.current - 1].iter().collect();
        self.add_token_with_literal(TokenKind::String, Some(Value::String(value)));
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
        let text: String = self.chars[self.start..self.current].iter().collect();
        let value: f64 = text.parse().expect("scanner only admits digit/dot characters");
        self.add_token_with_literal(TokenKind::Number, Some(Value::Number(value)));
    }

    fn identifier(&mut self) {
        while self.peek().is_alphanumeric() || self.peek() == '_' {
            self.advance();
        }
        let text: String = self.chars[self.start..self.current].iter().collect();
        let kind = keyword_kind(&text).unwrap_or(TokenKind::Identifier);
        self.add_token(kind);
    }

    fn add_token(&mut self, kind: TokenKind) {
        self.add_token_with_literal(kind, None);
    }

    fn add_token_with_literal(&mut self, kind: TokenKind, literal: Option<Value>) {
        let lexeme: String = self.chars[self.start..self.current].iter().collect();
        self.tokens
            .push(Token::new(kind, lexeme, literal, Span::new(self.line, self.start)));
    }

    fn advance(&mut self) -> char {
        let c = self.chars[self.current];
        self.current += 1;
        c
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.chars[self.current] != expected {
            return false;
        }
        self.current += 1;
        true
    }

    fn peek(&self) -> char {
        *self.chars.get(self.current).unwrap_or(&'\0')
    }

    fn peek_next(&self) -> char {
        *self.chars.get(self.current + 1).unwrap_or(&'\0')
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> Vec<TokenKind> {
        let mut diagnostics = Diagnostics::new();
        Scanner::new(source, &mut diagnostics)
            .scan_tokens()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn scans_punctuation_and_operators() {
        assert_eq!(
            scan("(){}, . - + ; * != == <= >="),
            vec![
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::Comma,
                TokenKind::Dot,
                TokenKind::Minus,
                TokenKind::Plus,
                TokenKind::Semicolon,
                TokenKind::Star,
                TokenKind::BangEqual,
                TokenKind::EqualEqual,
                TokenKind::LessEqual,
                TokenKind::GreaterEqual,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn scans_keywords_and_identifiers() {
        assert_eq!(
            scan("var x = foo and true"),
            vec![
                TokenKind::Var,
                TokenKind::Identifier,
                TokenKind::Equal,
                TokenKind::Identifier,
                TokenKind::And,
                TokenKind::True,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn reports_unterminated_string_without_aborting() {
        let mut diagnostics = Diagnostics::new();
        let tokens = Scanner::new("\"abc", &mut diagnostics).scan_tokens();
        assert!(diagnostics.had_error());
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn strips_line_comments() {
        assert_eq!(scan("1 // two\n3"), vec![TokenKind::Number, TokenKind::Number, TokenKind::Eof]);
    }
}
