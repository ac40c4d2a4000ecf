//! Static scope resolution.
//!
//! Dual-licensed under the MIT license and the Apache License, Version 2.0.
//! Unless required by applicable law or agreed to in writing, software
//! distributed under these licenses is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.

use crate::ast::expr::{Expr, ExprId};
use crate::ast::stmt::Stmt;
use crate::diagnostics::Diagnostics;
use crate::error::LoxError;
use crate::lexer::token::Token;
use std::collections::HashMap;

/// Whether the resolver is currently inside a function body, used to flag a
/// stray top-level `return`.
#[derive(Clone, Copy, PartialEq, Eq)]
enum FunctionKind {
    None,
    Function,
}

/// Walks the AST once, before evaluation, to compute how many environment
/// hops separate each variable reference from the scope that declares it.
///
/// Grounded on `examples/other_examples/.../resolver.rs` (a from-scratch Lox
/// resolver using the classic `expr::Visitor`/`stmt::Visitor` traits) — the
/// teacher crate has no static resolver at all, since it looks every name up
/// dynamically through the live environment chain at call time. This version
/// drops the visitor-trait indirection in favor of direct recursive
/// dispatch, matching the match-heavy style the teacher itself uses
/// elsewhere (`eval_expr`, `exec_stmt`), and narrows the original's
/// class/this/super handling away since Lox here has no classes.
pub struct Resolver<'a> {
    scopes: Vec<HashMap<String, bool>>,
    locals: HashMap<ExprId, usize>,
    current_function: FunctionKind,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> Resolver<'a> {
    pub fn new(diagnostics: &'a mut Diagnostics) -> Self {
        Self {
            scopes: Vec::new(),
            locals: HashMap::new(),
            current_function: FunctionKind::None,
            diagnostics,
        }
    }

    /// Resolves a whole program, returning the `ExprId -> depth` side table
    /// the evaluator consults for `Variable`/`Assign` lookups.
    pub fn resolve(mut self, statements: &[Stmt]) -> HashMap<ExprId, usize> {
        self.resolve_stmts(statements);
        self.locals
    }

    fn resolve_stmts(&mut self, statements: &[Stmt]) {
        for stmt in statements {
            self.resolve_stmt(stmt);
        }
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(expr) | Stmt::Print(expr) => self.resolve_expr(expr),
            Stmt::Var { name, initializer } => {
                self.declare(name);
                if let Some(init) = initializer {
                    self.resolve_expr(init);
                }
                self.define(name);
            }
            Stmt::Block(statements) => {
                self.begin_scope();
                self.resolve_stmts(statements);
                self.end_scope();
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.resolve_expr(condition);
                self.resolve_stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.resolve_stmt(else_branch);
                }
            }
            Stmt::While { condition, body } => {
                self.resolve_expr(condition);
                self.resolve_stmt(body);
            }
            Stmt::Function { name, params, body } => {
                self.declare(name);
                self.define(name);
                self.resolve_function(params, body, FunctionKind::Function);
            }
            Stmt::Return { keyword, value } => {
                if self.current_function == FunctionKind::None {
                    self.semantic_error(keyword.span.line, "Can't return from top-level code.");
                }
                if let Some(value) = value {
                    self.resolve_expr(value);
                }
            }
        }
    }

    fn resolve_function(&mut self, params: &[Token], body: &[Stmt], kind: FunctionKind) {
        let enclosing_function = self.current_function;
        self.current_function = kind;

        self.begin_scope();
        for param in params {
            self.declare(param);
            self.define(param);
        }
        self.resolve_stmts(body);
        self.end_scope();

        self.current_function = enclosing_function;
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(_) => {}
            Expr::Grouping(inner) => self.resolve_expr(inner),
            Expr::Unary { right, .. } => self.resolve_expr(right),
            Expr::Binary { left, right, .. } | Expr::Logical { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            }
            Expr::Variable { id, name } => {
                if let Some(scope) = self.scopes.last() {
                    if scope.get(&name.lexeme) == Some(&false) {
                        self.semantic_error(
                            name.span.line,
                            "Can't read local variable in its own initializer.",
                        );
                    }
                }
                self.resolve_local(*id, &name.lexeme);
            }
            Expr::Assign { id, name, value } => {
                self.resolve_expr(value);
                self.resolve_local(*id, &name.lexeme);
            }
            Expr::Call { callee, arguments, .. } => {
                self.resolve_expr(callee);
                for arg in arguments {
                    self.resolve_expr(arg);
                }
            }
        }
    }

    fn resolve_local(&mut self, id: ExprId, name: &str) {
        for (depth, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(name) {
                self.locals.insert(id, depth);
                return;
            }
        }
        // Not found in any local scope: treated as global, left out of the
        // side table (the evaluator falls back to the global environment).
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last() {
            if scope.contains_key(&name.lexeme) {
                self.semantic_error(
                    name.span.line,
                    "Already a variable with this name in this scope.",
                );
            }
        }
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.lexeme.clone(), false);
        }
    }

    fn define(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.lexeme.clone(), true);
        }
    }

    fn semantic_error(&mut self, line: usize, message: &str) {
        let err = LoxError::semantic(message, crate::span::Span::new(line, 0));
        self.diagnostics.report_error(&err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Scanner;
    use crate::parser::Parser;

    fn resolve(source: &str) -> (HashMap<ExprId, usize>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let tokens = Scanner::new(source, &mut diagnostics).scan_tokens();
        let statements = Parser::new(tokens, &mut diagnostics).parse();
        let locals = Resolver::new(&mut diagnostics).resolve(&statements);
        (locals, diagnostics)
    }

    #[test]
    fn leaves_globals_out_of_the_side_table() {
        let (locals, diagnostics) = resolve("var a = 1; print a;");
        assert!(!diagnostics.had_error());
        assert!(locals.is_empty());
    }

    #[test]
    fn records_zero_depth_for_the_innermost_enclosing_scope() {
        let (locals, diagnostics) = resolve("{ var a = 1; print a; }");
        assert!(!diagnostics.had_error());
        assert_eq!(locals.values().copied().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn records_increasing_depth_per_nesting_level() {
        let (locals, diagnostics) = resolve("{ var a = 1; { print a; } }");
        assert!(!diagnostics.had_error());
        assert_eq!(locals.values().copied().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn rejects_reading_a_local_in_its_own_initializer() {
        let (_, diagnostics) = resolve("{ var a = a; }");
        assert!(diagnostics.had_error());
    }

    #[test]
    fn rejects_redeclaring_a_local_in_the_same_scope() {
        let (_, diagnostics) = resolve("{ var a = 1; var a = 2; }");
        assert!(diagnostics.had_error());
    }

    #[test]
    fn allows_redeclaring_a_global_by_name() {
        // Spec §4.3: the redeclaration check is local-scope-only; globals
        // are resolved dynamically and exempt from it here.
        let (_, diagnostics) = resolve("var a = 1; var a = 2; print a;");
        assert!(!diagnostics.had_error());
    }

    #[test]
    fn rejects_top_level_return() {
        let (_, diagnostics) = resolve("return 1;");
        assert!(diagnostics.had_error());
    }

    #[test]
    fn allows_return_inside_a_function() {
        let (_, diagnostics) = resolve("fun f() { return 1; }");
        assert!(!diagnostics.had_error());
    }

    #[test]
    fn closure_binds_to_the_scope_active_at_declaration() {
        // `show`'s reference to `a` must resolve to the outer scope present
        // when `show` was declared, not whatever shadows it afterward.
        let (locals, diagnostics) = resolve(
            r#"
            var a = "global";
            {
                fun show() { print a; }
                show();
                var a = "local";
                show();
            }
            "#,
        );
        assert!(!diagnostics.had_error());
        // Both call sites resolve `show` itself (a local in the enclosing
        // block) at depth 0; `a` inside `show`'s body is never added to the
        // side table because it's a global, so it falls through to dynamic
        // lookup at evaluation time and reads the *outer* `a` regardless of
        // the later `var a = "local"` shadowing declaration.
        assert_eq!(locals.len(), 2);
        assert!(locals.values().all(|&depth| depth == 0));
    }
}
