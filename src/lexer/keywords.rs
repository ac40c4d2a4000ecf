//! Keyword lookup.
//!
//! Dual-licensed under the MIT license and the Apache License, Version 2.0.
//! Unless required by applicable law or agreed to in writing, software
//! distributed under these licenses is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.

use crate::lexer::token::TokenKind;

/// Maps an identifier's lexeme to its keyword kind, or `None` if it's a
/// plain identifier. Grounded on the teacher's `is_keyword` gate in
/// `lexer/keywords.rs`, but returning the kind directly instead of a bool
/// since Lox's keyword set is closed and each one maps to exactly one
/// `TokenKind`.
pub fn keyword_kind(word: &str) -> Option<TokenKind> {
    Some(match word {
        "and" => TokenKind::And,
        "class" => TokenKind::Class,
        "else" => TokenKind::Else,
        "false" => TokenKind::False,
        "for" => TokenKind::For,
        "fun" => TokenKind::Fun,
        "if" => TokenKind::If,
        "nil" => TokenKind::Nil,
        "or" => TokenKind::Or,
        "print" => TokenKind::Print,
        "return" => TokenKind::Return,
        "super" => TokenKind::Super,
        "this" => TokenKind::This,
        "true" => TokenKind::True,
        "var" => TokenKind::Var,
        "while" => TokenKind::While,
        _ => return None,
    })
}
