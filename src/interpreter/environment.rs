//! Lexical environments.
//!
//! Dual-licensed under the MIT license and the Apache License, Version 2.0.
//! Unless required by applicable law or agreed to in writing, software
//! distributed under these licenses is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.

use crate::error::LoxError;
use crate::lexer::token::Token;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A single scope, chained to its parent with `Rc<RefCell<_>>` the way the
/// teacher's `Environment` is — every closure captured before a scope
/// changes still shares the same underlying cells as the live call stack,
/// which is what lets `Environment::assign` mutate a variable a closure
/// captured by reference.
pub struct Environment {
    values: HashMap<String, Value>,
    parent: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment {
            values: HashMap::new(),
            parent: None,
        }))
    }

    pub fn with_parent(parent: Rc<RefCell<Environment>>) -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment {
            values: HashMap::new(),
            parent: Some(parent),
        }))
    }

    /// Binds a new variable in this scope. Redeclaring a name already
    /// defined in the *same* scope is a runtime error — a deliberate
    /// stricter-than-jlox divergence this implementation commits to: shadowing
    /// a binding from an enclosing scope is still fine, only within-scope
    /// redeclaration is rejected.
    pub fn define(&mut self, name: &Token, value: Value) -> Result<(), LoxError> {
        if self.values.contains_key(&name.lexeme) {
            return Err(LoxError::runtime(
                format!("Attempted to redeclare variable '{}'.", name.lexeme),
                name.span,
            ));
        }
        self.values.insert(name.lexeme.clone(), value);
        Ok(())
    }

    pub fn get(env: &Rc<RefCell<Environment>>, name: &Token) -> Result<Value, LoxError> {
        if let Some(value) = env.borrow().values.get(&name.lexeme) {
            return Ok(value.clone());
        }
        if let Some(parent) = &env.borrow().parent {
            return Environment::get(parent, name);
        }
        Err(LoxError::runtime(
            format!("Undefined variable '{}'.", name.lexeme),
            name.span,
        ))
    }

    pub fn assign(env: &Rc<RefCell<Environment>>, name: &Token, value: Value) -> Result<(), LoxError> {
        if env.borrow().values.contains_key(&name.lexeme) {
            env.borrow_mut().values.insert(name.lexeme.clone(), value);
            return Ok(());
        }
        let parent = env.borrow().parent.clone();
        if let Some(parent) = parent {
            return Environment::assign(&parent, name, value);
        }
        Err(LoxError::runtime(
            format!("Undefined variable '{}'.", name.lexeme),
            name.span,
        ))
    }

    /// Reads a variable known (via the resolver's side table) to live
    /// exactly `distance` scopes up from `env`.
    pub fn get_at(env: &Rc<RefCell<Environment>>, distance: usize, name: &str) -> Value {
        let target = Environment::ancestor(env, distance);
        let value = target.borrow().values.get(name).cloned();
        value.expect("resolver guarantees the binding exists at this distance")
    }

    pub fn assign_at(env: &Rc<RefCell<Environment>>, distance: usize, name: &str, value: Value) {
        let target = Environment::ancestor(env, distance);
        target.borrow_mut().values.insert(name.to_string(), value);
    }

    fn ancestor(env: &Rc<RefCell<Environment>>, distance: usize) -> Rc<RefCell<Environment>> {
        let mut current = Rc::clone(env);
        for _ in 0..distance {
            let parent = current
                .borrow()
                .parent
                .clone()
                .expect("resolver-computed distance never exceeds the actual scope chain");
            current = parent;
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;

    fn token(lexeme: &str) -> Token {
        Token::new(crate::lexer::token::TokenKind::Identifier, lexeme, None, Span::new(1, 0))
    }

    #[test]
    fn defines_and_reads_in_same_scope() {
        let env = Environment::new();
        env.borrow_mut().define(&token("x"), Value::Number(1.0)).unwrap();
        let value = Environment::get(&env, &token("x")).unwrap();
        assert!(value.equals(&Value::Number(1.0)));
    }

    #[test]
    fn rejects_redeclaration_in_same_scope() {
        let env = Environment::new();
        env.borrow_mut().define(&token("x"), Value::Number(1.0)).unwrap();
        let err = env.borrow_mut().define(&token("x"), Value::Number(2.0)).unwrap_err();
        assert_eq!(err.message, "Attempted to redeclare variable 'x'.");
    }

    #[test]
    fn reads_through_parent_chain() {
        let outer = Environment::new();
        outer.borrow_mut().define(&token("x"), Value::Number(1.0)).unwrap();
        let inner = Environment::with_parent(Rc::clone(&outer));
        let value = Environment::get(&inner, &token("x")).unwrap();
        assert!(value.equals(&Value::Number(1.0)));
    }

    #[test]
    fn assign_mutates_enclosing_scope() {
        let outer = Environment::new();
        outer.borrow_mut().define(&token("x"), Value::Number(1.0)).unwrap();
        let inner = Environment::with_parent(Rc::clone(&outer));
        Environment::assign(&inner, &token("x"), Value::Number(2.0)).unwrap();
        let value = Environment::get(&outer, &token("x")).unwrap();
        assert!(value.equals(&Value::Number(2.0)));
    }
}
