//! Source location tracking.
//!
//! Dual-licensed under the MIT license and the Apache License, Version 2.0.
//! Unless required by applicable law or agreed to in writing, software
//! distributed under these licenses is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.

/// A source location, tracked as a 1-based line and a 0-based column.
///
/// Lox's grammar never needs more precision than "which line" for its
/// diagnostics (spec §4.2's error format is `[line L] ...`), but carrying a
/// column lets `Diagnostics` underline the offending token the way the
/// teacher's `DiagnosticPrinter` does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}
