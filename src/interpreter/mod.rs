//! Tree-walking evaluation.
//!
//! Dual-licensed under the MIT license and the Apache License, Version 2.0.
//! Unless required by applicable law or agreed to in writing, software
//! distributed under these licenses is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.

pub mod calls;
pub mod environment;
pub mod expressions;
pub mod statements;

use crate::ast::expr::ExprId;
use crate::ast::stmt::Stmt;
use crate::diagnostics::Diagnostics;
use crate::error::LoxError;
use crate::lexer::token::Token;
use crate::span::Span;
use crate::value::{Callable, Value};
use environment::Environment;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{self, Write};
use std::rc::Rc;

/// The signal an executed statement hands back up the call stack: nothing
/// special, or a `return` unwinding toward the enclosing function call.
/// Grounded on the teacher's `ExecSignal` (`interpreter/statements.rs`),
/// minus the `Throw` arm — this crate has no `try`/`throw`.
pub enum ExecSignal {
    None,
    Return(Value),
}

/// Owns the global scope and the resolver's variable-depth side table for
/// the duration of one run.
pub struct Interpreter {
    pub globals: Rc<RefCell<Environment>>,
    locals: HashMap<ExprId, usize>,
    out: RefCell<Box<dyn Write>>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }

    /// Builds an interpreter that writes `print` output to `writer` instead
    /// of the real stdout — how `tests/e2e.rs` captures a program's output
    /// into a `Vec<u8>` without shelling out to the built binary.
    pub fn with_writer(writer: Box<dyn Write>) -> Self {
        let globals = Environment::new();
        define_native(&globals, "clock", 0, |_args| {
            use chrono::Utc;
            let now = Utc::now();
            let seconds = now.timestamp() as f64 + f64::from(now.timestamp_subsec_nanos()) / 1e9;
            Ok(Value::Number(seconds))
        });
        Self {
            globals,
            locals: HashMap::new(),
            out: RefCell::new(writer),
        }
    }

    pub fn set_locals(&mut self, locals: HashMap<ExprId, usize>) {
        self.locals = locals;
    }

    /// Runs a program top to bottom. A runtime error aborts the run (spec
    /// §7: runtime errors are fatal, unlike lexical/syntactic ones) and is
    /// reported through `diagnostics` for the driver's exit-code mapping.
    pub fn interpret(&mut self, statements: &[Stmt], diagnostics: &mut Diagnostics) {
        let env = Rc::clone(&self.globals);
        for stmt in statements {
            if let Err(err) = self.exec_stmt(stmt, &env) {
                diagnostics.runtime_error(&err);
                return;
            }
        }
    }

    fn lookup_variable(&self, env: &Rc<RefCell<Environment>>, id: ExprId, name: &Token) -> Result<Value, LoxError> {
        match self.locals.get(&id) {
            Some(&distance) => Ok(Environment::get_at(env, distance, &name.lexeme)),
            None => Environment::get(&self.globals, name),
        }
    }

    fn assign_variable(
        &self,
        env: &Rc<RefCell<Environment>>,
        id: ExprId,
        name: &Token,
        value: Value,
    ) -> Result<(), LoxError> {
        match self.locals.get(&id) {
            Some(&distance) => {
                Environment::assign_at(env, distance, &name.lexeme, value);
                Ok(())
            }
            None => Environment::assign(&self.globals, name, value),
        }
    }
}

fn define_native(
    env: &Rc<RefCell<Environment>>,
    name: &'static str,
    arity: usize,
    func: impl Fn(&[Value]) -> Result<Value, LoxError> + 'static,
) {
    let token = Token::new(crate::lexer::token::TokenKind::Identifier, name, None, Span::new(0, 0));
    env.borrow_mut()
        .define(
            &token,
            Value::Callable(Callable::Native {
                name,
                arity,
                func: Rc::new(func),
            }),
        )
        .expect("native globals are defined once at startup into an empty scope");
}
