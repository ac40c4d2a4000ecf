//! Function invocation.
//!
//! Dual-licensed under the MIT license and the Apache License, Version 2.0.
//! Unless required by applicable law or agreed to in writing, software
//! distributed under these licenses is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.

use crate::error::LoxError;
use crate::interpreter::environment::Environment;
use crate::interpreter::{ExecSignal, Interpreter};
use crate::lexer::token::Token;
use crate::value::{Callable, Value};
use std::rc::Rc;

impl Interpreter {
    /// Invokes a callable value. Unlike the teacher's `call_user_function`,
    /// which parents the call's environment off the *call site*'s
    /// environment, a user function's new environment is parented off the
    /// closure it captured at declaration time — otherwise a function
    /// couldn't see the variables that were in scope where it was defined.
    pub fn call(&self, callee: Value, arguments: Vec<Value>, paren: &Token) -> Result<Value, LoxError> {
        let callable = match callee {
            Value::Callable(c) => c,
            _ => return Err(LoxError::runtime("Can only call functions and classes.", paren.span)),
        };

        if arguments.len() != callable.arity() {
            return Err(LoxError::runtime(
                format!(
                    "Expected {} arguments but got {}.",
                    callable.arity(),
                    arguments.len()
                ),
                paren.span,
            ));
        }

        match callable {
            Callable::Native { func, .. } => func(&arguments),
            Callable::User(function) => {
                let call_env = Environment::with_parent(Rc::clone(&function.closure));
                for (param, arg) in function.params.iter().zip(arguments.into_iter()) {
                    call_env.borrow_mut().define(param, arg)?;
                }
                match self.exec_block(&function.body, &call_env)? {
                    ExecSignal::None => Ok(Value::Nil),
                    ExecSignal::Return(value) => Ok(value),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;

    fn paren() -> Token {
        Token::new(crate::lexer::token::TokenKind::RightParen, ")", None, Span::new(1, 0))
    }

    #[test]
    fn calling_a_non_callable_value_reports_the_exact_message() {
        let interpreter = Interpreter::new();
        let err = interpreter.call(Value::Number(1.0), vec![], &paren()).unwrap_err();
        assert_eq!(err.message, "Can only call functions and classes.");
    }

    #[test]
    fn wrong_argument_count_reports_expected_and_got() {
        let interpreter = Interpreter::new();
        let token = Token::new(crate::lexer::token::TokenKind::Identifier, "clock", None, Span::new(1, 0));
        let callee = Environment::get(&interpreter.globals, &token).unwrap();
        let err = interpreter.call(callee, vec![Value::Number(1.0)], &paren()).unwrap_err();
        assert_eq!(err.message, "Expected 0 arguments but got 1.");
    }
}
