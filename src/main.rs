//! CLI entry point.
//!
//! Dual-licensed under the MIT license and the Apache License, Version 2.0.
//! Unless required by applicable law or agreed to in writing, software
//! distributed under these licenses is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.

use std::process::ExitCode;

/// `interpreter` alone starts a REPL; `interpreter PATH` runs one file;
/// anything else prints a usage line and exits 0 (spec §6).
fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let code = match args.as_slice() {
        [] => lox::driver::run_prompt(),
        [path] => lox::driver::run_file(path),
        _ => {
            println!("Usage: lox [script]");
            0
        }
    };

    ExitCode::from(code as u8)
}
