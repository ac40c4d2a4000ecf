//! Compile-time and runtime diagnostic reporting.
//!
//! Dual-licensed under the MIT license and the Apache License, Version 2.0.
//! Unless required by applicable law or agreed to in writing, software
//! distributed under these licenses is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.

use crate::error::{ErrorKind, LoxError};

/// Aggregates diagnostics across a single scan/parse/resolve/evaluate run.
///
/// Mirrors the teacher's `DiagnosticPrinter` in spirit (a small struct that
/// owns rendering so callers don't each re-derive the format), but renders
/// the exact strings spec §4.2/§4.6 requires instead of a rustc-style
/// caret diagram — those strings are load-bearing for the REPL and the
/// driver's exit-code mapping, not just cosmetic.
#[derive(Default)]
pub struct Diagnostics {
    had_error: bool,
    had_runtime_error: bool,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    /// Resets the compile-error flag so a REPL session survives a bad line.
    pub fn reset(&mut self) {
        self.had_error = false;
        self.had_runtime_error = false;
    }

    /// Reports a lexical diagnostic at a given line (the scanner has no
    /// token to point at yet, only a line number).
    pub fn lexical_error(&mut self, line: usize, message: &str) {
        self.report(line, "", message);
        self.had_error = true;
    }

    /// Reports an already-built [`LoxError`], dispatching on its tier. A
    /// parser error's `location` (`"at 'LEXEME'"` / `"at end"`) renders
    /// between `Error` and the message, per the `"[line L] Error WHERE: MSG"`
    /// format spec §4.2 specifies; lexical and semantic errors have no
    /// token to anchor to and render with `location` absent.
    pub fn report_error(&mut self, error: &LoxError) {
        match error.kind {
            ErrorKind::Runtime => self.runtime_error(error),
            _ => {
                let where_ = match &error.location {
                    Some(location) => format!(" at {}", location),
                    None => String::new(),
                };
                self.report(error.span.line, &where_, &error.message);
                self.had_error = true;
            }
        }
    }

    /// Reports a runtime error in the `"MSG\n[line L]"` form spec §4.6
    /// specifies, and sets the runtime-error flag (exit code 70).
    pub fn runtime_error(&mut self, error: &LoxError) {
        eprintln!("{}", error);
        self.had_runtime_error = true;
    }

    fn report(&self, line: usize, where_: &str, message: &str) {
        eprintln!("[line {}] Error{}: {}", line, where_, message);
    }
}
