//! File and REPL harness.
//!
//! Dual-licensed under the MIT license and the Apache License, Version 2.0.
//! Unless required by applicable law or agreed to in writing, software
//! distributed under these licenses is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.

use crate::diagnostics::Diagnostics;
use crate::interpreter::Interpreter;
use crate::lexer::Scanner;
use crate::parser::Parser;
use crate::resolver::Resolver;
use std::fs;
use std::io::{self, Write};

/// Exit code for a lexical, syntactic, or semantic (compile-time) error.
pub const EXIT_DATA_ERROR: i32 = 65;
/// Exit code for a runtime error.
pub const EXIT_SOFTWARE_ERROR: i32 = 70;

/// Runs a source file start to finish and returns the process exit code,
/// per spec §4.6/§6.
pub fn run_file(path: &str) -> i32 {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Error reading '{}': {}", path, err);
            return EXIT_SOFTWARE_ERROR;
        }
    };
    // `read_to_string` leaves a leading BOM in place; strip it so the
    // scanner's first token isn't a stray `Unexpected character.` (spec §6).
    let source = source.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(source);

    let mut diagnostics = Diagnostics::new();
    let mut interpreter = Interpreter::new();
    run(&source, &mut diagnostics, &mut interpreter);

    if diagnostics.had_error() {
        EXIT_DATA_ERROR
    } else if diagnostics.had_runtime_error() {
        EXIT_SOFTWARE_ERROR
    } else {
        0
    }
}

/// Runs an interactive prompt. A bad line reports its error and keeps the
/// session alive — `had_error` is reset per line, and a runtime error never
/// terminates the REPL (spec §4.6).
pub fn run_prompt() -> i32 {
    let mut interpreter = Interpreter::new();
    let mut diagnostics = Diagnostics::new();
    let stdin = io::stdin();

    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        diagnostics.reset();
        run(&line, &mut diagnostics, &mut interpreter);
    }

    0
}

/// Runs one chunk of source (a whole file, or one REPL line) through the
/// scan/parse/resolve/evaluate pipeline against a caller-supplied
/// interpreter. Exposed (rather than kept private to `run_file`/`run_prompt`)
/// so `tests/e2e.rs` can drive a program against an `Interpreter` built with
/// an in-memory writer and assert on the captured output.
pub fn run(source: &str, diagnostics: &mut Diagnostics, interpreter: &mut Interpreter) {
    let tokens = Scanner::new(source, diagnostics).scan_tokens();
    if diagnostics.had_error() {
        return;
    }

    let statements = {
        let mut parser = Parser::new(tokens, diagnostics);
        parser.parse()
    };
    if diagnostics.had_error() {
        return;
    }

    let locals = Resolver::new(diagnostics).resolve(&statements);
    if diagnostics.had_error() {
        return;
    }

    interpreter.set_locals(locals);
    interpreter.interpret(&statements, diagnostics);
}
