//! Expression evaluation.
//!
//! Dual-licensed under the MIT license and the Apache License, Version 2.0.
//! Unless required by applicable law or agreed to in writing, software
//! distributed under these licenses is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.

use crate::ast::expr::Expr;
use crate::error::LoxError;
use crate::interpreter::environment::Environment;
use crate::interpreter::Interpreter;
use crate::lexer::token::TokenKind;
use crate::value::Value;
use std::cell::RefCell;
use std::rc::Rc;

impl Interpreter {
    /// Evaluates an expression by reference rather than by value (the
    /// teacher's `eval_expr` consumes its `Expr`), since a loop body or a
    /// function called more than once needs to walk the same subtree again
    /// on its next iteration or call.
    pub fn eval_expr(&self, expr: &Expr, env: &Rc<RefCell<Environment>>) -> Result<Value, LoxError> {
        match expr {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Grouping(inner) => self.eval_expr(inner, env),
            Expr::Variable { id, name } => self.lookup_variable(env, *id, name),
            Expr::Assign { id, name, value } => {
                let value = self.eval_expr(value, env)?;
                self.assign_variable(env, *id, name, value.clone())?;
                Ok(value)
            }
            Expr::Unary { operator, right } => {
                let right = self.eval_expr(right, env)?;
                match operator.kind {
                    TokenKind::Minus => match right {
                        Value::Number(n) => Ok(Value::Number(-n)),
                        _ => Err(LoxError::runtime("Operand must be a number.", operator.span)),
                    },
                    TokenKind::Bang => Ok(Value::Bool(!right.is_truthy())),
                    _ => unreachable!("unary operator token kind is restricted by the parser"),
                }
            }
            Expr::Logical { left, operator, right } => {
                let left = self.eval_expr(left, env)?;
                match operator.kind {
                    TokenKind::Or if left.is_truthy() => Ok(left),
                    TokenKind::And if !left.is_truthy() => Ok(left),
                    _ => self.eval_expr(right, env),
                }
            }
            Expr::Binary { left, operator, right } => {
                let left = self.eval_expr(left, env)?;
                let right = self.eval_expr(right, env)?;
                self.eval_binary(operator.kind, left, right, operator.span)
            }
            Expr::Call { callee, paren, arguments } => {
                let callee_val = self.eval_expr(callee, env)?;
                let mut arg_vals = Vec::with_capacity(arguments.len());
                for arg in arguments {
                    arg_vals.push(self.eval_expr(arg, env)?);
                }
                self.call(callee_val, arg_vals, paren)
            }
        }
    }

    fn eval_binary(
        &self,
        operator: TokenKind,
        left: Value,
        right: Value,
        span: crate::span::Span,
    ) -> Result<Value, LoxError> {
        use Value::*;
        match operator {
            TokenKind::Plus => match (left, right) {
                (Number(a), Number(b)) => Ok(Number(a + b)),
                (String(a), String(b)) => Ok(String(a + &b)),
                // Spec divergence from jlox: string/number concatenation on
                // either side is allowed rather than a type error.
                (String(a), Number(b)) => Ok(String(format!("{}{}", a, Value::Number(b).stringify()))),
                (Number(a), String(b)) => Ok(String(format!("{}{}", Value::Number(a).stringify(), b))),
                (_, _) => Err(LoxError::runtime("Operands must be numbers or strings.", span)),
            },
            TokenKind::Minus => numeric_op(left, right, span, |a, b| Ok(Number(a - b))),
            TokenKind::Star => numeric_op(left, right, span, |a, b| Ok(Number(a * b))),
            TokenKind::Slash => {
                let Number(a) = left else {
                    return Err(LoxError::runtime("Operand must be a number.", span));
                };
                match right {
                    Number(b) if b != 0.0 => Ok(Number(a / b)),
                    _ => Err(LoxError::runtime("Dominominator must be a non-zero number.", span)),
                }
            }
            TokenKind::Greater => numeric_op(left, right, span, |a, b| Ok(Bool(a > b))),
            TokenKind::GreaterEqual => numeric_op(left, right, span, |a, b| Ok(Bool(a >= b))),
            TokenKind::Less => numeric_op(left, right, span, |a, b| Ok(Bool(a < b))),
            TokenKind::LessEqual => numeric_op(left, right, span, |a, b| Ok(Bool(a <= b))),
            TokenKind::EqualEqual => Ok(Bool(left.equals(&right))),
            TokenKind::BangEqual => Ok(Bool(!left.equals(&right))),
            _ => unreachable!("binary operator token kind is restricted by the parser"),
        }
    }
}

fn numeric_op(
    left: Value,
    right: Value,
    span: crate::span::Span,
    op: impl Fn(f64, f64) -> Result<Value, LoxError>,
) -> Result<Value, LoxError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => op(a, b),
        (_, _) => Err(LoxError::runtime("Operands must be numbers.", span)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::token::Token;
    use crate::span::Span;

    fn binary(left: Expr, kind: TokenKind, right: Expr) -> Expr {
        Expr::Binary {
            left: Box::new(left),
            operator: Token::new(kind, "", None, Span::new(1, 0)),
            right: Box::new(right),
        }
    }

    fn num(n: f64) -> Expr {
        Expr::Literal(Value::Number(n))
    }

    fn string(s: &str) -> Expr {
        Expr::Literal(Value::String(s.to_string()))
    }

    fn eval(expr: &Expr) -> Result<Value, LoxError> {
        let interpreter = Interpreter::new();
        let env = Environment::new();
        interpreter.eval_expr(expr, &env)
    }

    #[test]
    fn adds_two_numbers() {
        let value = eval(&binary(num(1.0), TokenKind::Plus, num(2.0))).unwrap();
        assert!(value.equals(&Value::Number(3.0)));
    }

    #[test]
    fn concatenates_string_and_number_either_side() {
        let value = eval(&binary(string("hi"), TokenKind::Plus, num(1.0))).unwrap();
        assert!(value.equals(&Value::String("hi1".to_string())));

        let value = eval(&binary(num(1.0), TokenKind::Plus, string("hi"))).unwrap();
        assert!(value.equals(&Value::String("1hi".to_string())));
    }

    #[test]
    fn mixed_number_and_nil_addition_is_a_runtime_error() {
        let expr = binary(num(1.0), TokenKind::Plus, Expr::Literal(Value::Nil));
        assert!(eval(&expr).is_err());
    }

    #[test]
    fn division_by_zero_is_a_runtime_error() {
        let expr = binary(num(1.0), TokenKind::Slash, num(0.0));
        let err = eval(&expr).unwrap_err();
        assert_eq!(err.message, "Dominominator must be a non-zero number.");
    }

    #[test]
    fn division_with_a_non_number_right_operand_reports_the_dominominator_message() {
        let expr = binary(num(1.0), TokenKind::Slash, string("a"));
        let err = eval(&expr).unwrap_err();
        assert_eq!(err.message, "Dominominator must be a non-zero number.");
    }

    #[test]
    fn division_with_a_non_number_left_operand_reports_operand_must_be_a_number() {
        let expr = binary(string("a"), TokenKind::Slash, num(1.0));
        let err = eval(&expr).unwrap_err();
        assert_eq!(err.message, "Operand must be a number.");
    }

    #[test]
    fn unary_minus_on_a_non_number_reports_operand_must_be_a_number() {
        let expr = Expr::Unary {
            operator: Token::new(TokenKind::Minus, "-", None, Span::new(1, 0)),
            right: Box::new(string("a")),
        };
        let err = eval(&expr).unwrap_err();
        assert_eq!(err.message, "Operand must be a number.");
    }

    #[test]
    fn adding_a_number_and_nil_reports_operands_must_be_numbers_or_strings() {
        let expr = binary(num(1.0), TokenKind::Plus, Expr::Literal(Value::Nil));
        let err = eval(&expr).unwrap_err();
        assert_eq!(err.message, "Operands must be numbers or strings.");
    }

    #[test]
    fn comparison_on_non_numbers_is_a_runtime_error() {
        let expr = binary(string("a"), TokenKind::Less, string("b"));
        let err = eval(&expr).unwrap_err();
        assert_eq!(err.message, "Operands must be numbers.");
    }

    #[test]
    fn nil_equals_nil_but_nothing_else() {
        let eq_nil = binary(Expr::Literal(Value::Nil), TokenKind::EqualEqual, Expr::Literal(Value::Nil));
        assert!(eval(&eq_nil).unwrap().equals(&Value::Bool(true)));

        let eq_zero = binary(Expr::Literal(Value::Nil), TokenKind::EqualEqual, num(0.0));
        assert!(eval(&eq_zero).unwrap().equals(&Value::Bool(false)));
    }

    #[test]
    fn logical_or_short_circuits_on_a_truthy_left_operand() {
        let expr = Expr::Logical {
            left: Box::new(string("hi")),
            operator: Token::new(TokenKind::Or, "", None, Span::new(1, 0)),
            right: Box::new(num(1.0)),
        };
        assert!(eval(&expr).unwrap().equals(&Value::String("hi".to_string())));
    }
}
