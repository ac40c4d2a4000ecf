//! Statement execution.
//!
//! Dual-licensed under the MIT license and the Apache License, Version 2.0.
//! Unless required by applicable law or agreed to in writing, software
//! distributed under these licenses is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.

use crate::ast::stmt::Stmt;
use crate::error::LoxError;
use crate::interpreter::environment::Environment;
use crate::interpreter::{ExecSignal, Interpreter};
use crate::value::{Callable, LoxFunction, Value};
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

impl Interpreter {
    pub fn exec_stmt(&self, stmt: &Stmt, env: &Rc<RefCell<Environment>>) -> Result<ExecSignal, LoxError> {
        match stmt {
            Stmt::Expression(expr) => {
                self.eval_expr(expr, env)?;
                Ok(ExecSignal::None)
            }
            Stmt::Print(expr) => {
                let value = self.eval_expr(expr, env)?;
                // A write error here (e.g. a closed pipe) isn't a Lox runtime
                // error; ignore it rather than plumbing an extra error type
                // through every statement that can't otherwise fail this way.
                let _ = writeln!(self.out.borrow_mut(), "{}", value.stringify());
                Ok(ExecSignal::None)
            }
            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.eval_expr(expr, env)?,
                    None => Value::Nil,
                };
                env.borrow_mut().define(name, value)?;
                Ok(ExecSignal::None)
            }
            Stmt::Block(statements) => {
                let block_env = Environment::with_parent(Rc::clone(env));
                self.exec_block(statements, &block_env)
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.eval_expr(condition, env)?.is_truthy() {
                    self.exec_stmt(then_branch, env)
                } else if let Some(else_branch) = else_branch {
                    self.exec_stmt(else_branch, env)
                } else {
                    Ok(ExecSignal::None)
                }
            }
            Stmt::While { condition, body } => {
                while self.eval_expr(condition, env)?.is_truthy() {
                    match self.exec_stmt(body, env)? {
                        ExecSignal::None => {}
                        signal @ ExecSignal::Return(_) => return Ok(signal),
                    }
                }
                Ok(ExecSignal::None)
            }
            Stmt::Function { name, params, body } => {
                let function = LoxFunction {
                    name: name.clone(),
                    params: params.clone(),
                    body: Rc::clone(body),
                    closure: Rc::clone(env),
                };
                env.borrow_mut()
                    .define(name, Value::Callable(Callable::User(Rc::new(function))))?;
                Ok(ExecSignal::None)
            }
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr, env)?,
                    None => Value::Nil,
                };
                Ok(ExecSignal::Return(value))
            }
        }
    }

    /// Executes a block's statements in a fresh child scope, short-circuiting
    /// on the first `return` signal.
    pub fn exec_block(&self, statements: &[Stmt], env: &Rc<RefCell<Environment>>) -> Result<ExecSignal, LoxError> {
        for stmt in statements {
            match self.exec_stmt(stmt, env)? {
                ExecSignal::None => {}
                signal @ ExecSignal::Return(_) => return Ok(signal),
            }
        }
        Ok(ExecSignal::None)
    }
}
