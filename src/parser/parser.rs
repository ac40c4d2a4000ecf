//! Parser core: token cursor, entry point, and error recovery.
//!
//! Dual-licensed under the MIT license and the Apache License, Version 2.0.
//! Unless required by applicable law or agreed to in writing, software
//! distributed under these licenses is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.

use crate::ast::expr::ExprId;
use crate::ast::stmt::Stmt;
use crate::diagnostics::Diagnostics;
use crate::error::LoxError;
use crate::lexer::token::{Token, TokenKind};

/// Turns a flat token stream into a `Vec<Stmt>`. Grounded on the teacher's
/// `Parser { tokens, current }`, but every grammar rule returns
/// `Result<_, LoxError>` instead of panicking, and the top-level loop
/// synchronizes past a bad statement instead of aborting the whole parse
/// (spec §4.2) — the teacher's own parser has no such recovery at all.
pub struct Parser<'a> {
    pub(super) tokens: Vec<Token>,
    pub(super) current: usize,
    pub(super) diagnostics: &'a mut Diagnostics,
    next_id: ExprId,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, diagnostics: &'a mut Diagnostics) -> Self {
        Self {
            tokens,
            current: 0,
            diagnostics,
            next_id: 0,
        }
    }

    /// Parses a whole program, recovering from a malformed statement by
    /// synchronizing to the next likely statement boundary rather than
    /// stopping at the first error.
    pub fn parse(&mut self) -> Vec<Stmt> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            match self.declaration() {
                Ok(stmt) => statements.push(stmt),
                Err(err) => {
                    self.diagnostics.report_error(&err);
                    self.synchronize();
                }
            }
        }
        statements
    }

    pub(super) fn next_expr_id(&mut self) -> ExprId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Discards tokens until the parser is plausibly aligned on a statement
    /// boundary again: after a `;`, or just before a keyword that starts a
    /// new statement.
    pub(super) fn synchronize(&mut self) {
        self.advance();
        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }
            match self.peek().kind {
                TokenKind::Class
                | TokenKind::Fun
                | TokenKind::Var
                | TokenKind::For
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Print
                | TokenKind::Return => return,
                _ => {}
            }
            self.advance();
        }
    }

    pub(super) fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    pub(super) fn match_kinds(&mut self, kinds: &[TokenKind]) -> bool {
        for &kind in kinds {
            if self.check(kind) {
                self.advance();
                return true;
            }
        }
        false
    }

    pub(super) fn consume(&mut self, kind: TokenKind, message: &str) -> Result<Token, LoxError> {
        if self.check(kind) {
            return Ok(self.advance().clone());
        }
        Err(self.error(self.peek().clone(), message))
    }

    pub(super) fn error(&self, token: Token, message: &str) -> LoxError {
        let where_ = if token.kind == TokenKind::Eof {
            "end".to_string()
        } else {
            format!("'{}'", token.lexeme)
        };
        LoxError::syntactic(message, token.span).with_location(where_)
    }

    pub(super) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    pub(super) fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    pub(super) fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    pub(super) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }
}
