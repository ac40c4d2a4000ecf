//! Dual-licensed under the MIT license and the Apache License, Version 2.0.
//! Unless required by applicable law or agreed to in writing, software
//! distributed under these licenses is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.

use crate::span::Span;
use std::fmt;

/// Which of the four error tiers (spec §7) raised a [`LoxError`].
///
/// The tier decides the driver's exit code: `Lexical`/`Syntactic`/`Semantic`
/// all map to 65, `Runtime` maps to 70.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    Syntactic,
    Semantic,
    Runtime,
}

/// A single diagnostic: what tier raised it, where, and what it says.
///
/// `location` carries the `"at 'LEXEME'"` / `"at end"` fragment the parser's
/// `[line L] Error WHERE: MSG` format (spec §4.2) needs; it's kept separate
/// from `message` rather than pre-baked into it, so `Diagnostics` can render
/// the one `"Error"` word exactly once regardless of which tier raised the
/// error.
#[derive(Debug, Clone)]
pub struct LoxError {
    pub kind: ErrorKind,
    pub message: String,
    pub span: Span,
    pub location: Option<String>,
}

impl LoxError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
            location: None,
        }
    }

    /// Attaches a `"at 'LEXEME'"` / `"at end"` fragment to an existing error.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn lexical(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Lexical, message, span)
    }

    pub fn syntactic(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Syntactic, message, span)
    }

    pub fn semantic(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Semantic, message, span)
    }

    pub fn runtime(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Runtime, message, span)
    }
}

impl fmt::Display for LoxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n[line {}]", self.message, self.span.line)
    }
}
