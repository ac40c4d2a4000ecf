//! End-to-end source-to-stdout scenarios (spec §8).
//!
//! Dual-licensed under the MIT license and the Apache License, Version 2.0.
//! Unless required by applicable law or agreed to in writing, software
//! distributed under these licenses is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.

use lox::diagnostics::Diagnostics;
use lox::interpreter::Interpreter;
use std::cell::RefCell;
use std::io;
use std::rc::Rc;

/// A `Write` sink that stays readable after being handed off to the
/// interpreter, so a test can run a program and then inspect what it
/// printed.
#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct RunResult {
    stdout: String,
    had_error: bool,
    had_runtime_error: bool,
}

fn run(source: &str) -> RunResult {
    let buffer = SharedBuffer::default();
    let mut interpreter = Interpreter::with_writer(Box::new(buffer.clone()));
    let mut diagnostics = Diagnostics::new();
    lox::driver::run(source, &mut diagnostics, &mut interpreter);
    RunResult {
        stdout: String::from_utf8(buffer.0.borrow().clone()).unwrap(),
        had_error: diagnostics.had_error(),
        had_runtime_error: diagnostics.had_runtime_error(),
    }
}

fn prints(source: &str, expected: &str) {
    let result = run(source);
    assert!(!result.had_error, "unexpected compile-time error for: {source}");
    assert!(!result.had_runtime_error, "unexpected runtime error for: {source}");
    assert_eq!(result.stdout.trim_end_matches('\n'), expected);
}

#[test]
fn scenario_1_arithmetic() {
    prints("print 1 + 2;", "3");
}

#[test]
fn scenario_2_string_number_concat() {
    prints(r#"print "hi" + 1;"#, "hi1");
}

#[test]
fn scenario_3_reassignment() {
    prints("var a = 1; a = a + 1; print a;", "2");
}

#[test]
fn scenario_4_closure_counter() {
    prints(
        r#"
        fun makeCounter() {
            var i = 0;
            fun count() {
                i = i + 1;
                print i;
            }
            return count;
        }
        var c = makeCounter();
        c();
        c();
        "#,
        "1\n2",
    );
}

#[test]
fn scenario_5_resolves_at_declaration_not_call() {
    prints(
        r#"
        var a = "global";
        {
            fun show() { print a; }
            show();
            var a = "local";
            show();
        }
        "#,
        "global\nglobal",
    );
}

#[test]
fn scenario_6_for_loop_desugars_to_while() {
    prints("for (var i = 0; i < 3; i = i + 1) print i;", "0\n1\n2");
}

#[test]
fn scenario_7_clock_is_a_number() {
    let result = run("print clock() + 0;");
    assert!(!result.had_error);
    assert!(!result.had_runtime_error);
    result.stdout.trim().parse::<f64>().expect("clock() + 0 should stringify as a number");
}

#[test]
fn block_scoping_shadowing() {
    prints("var a=1; { var a=2; print a; } print a;", "2\n1");
}

#[test]
fn unterminated_string_is_a_compile_error() {
    let result = run("print \"abc;");
    assert!(result.had_error);
    assert!(!result.had_runtime_error);
}

#[test]
fn unexpected_character_is_a_compile_error() {
    let result = run("print 1 $ 2;");
    assert!(result.had_error);
}

#[test]
fn number_dot_identifier_is_three_tokens_not_a_float_field_access() {
    // 123.foo parses as NUMBER(123) DOT IDENTIFIER, which is a property
    // access on a number and therefore a parse-time usage error only in
    // languages with field access; here it's simply not a valid primary
    // after the number, so this must fail to parse rather than lex as one
    // malformed literal.
    let result = run("123.foo;");
    assert!(result.had_error);
}

#[test]
fn missing_semicolon_is_a_compile_error() {
    let result = run("var a = 1");
    assert!(result.had_error);
}

#[test]
fn invalid_assignment_target_reports_but_does_not_abort_the_statement() {
    let result = run("var a = 1; var b = 2; a + b = 3;");
    assert!(result.had_error);
}

#[test]
fn redeclared_local_is_a_compile_error() {
    let result = run("{ var a = 1; var a = 2; }");
    assert!(result.had_error);
}

#[test]
fn return_at_top_level_is_a_compile_error() {
    let result = run("return 1;");
    assert!(result.had_error);
}

#[test]
fn reading_variable_in_its_own_initializer_is_a_compile_error() {
    let result = run("{ var a = a; }");
    assert!(result.had_error);
}

#[test]
fn division_by_zero_is_a_runtime_error() {
    let result = run("print 1 / 0;");
    assert!(!result.had_error);
    assert!(result.had_runtime_error);
}

#[test]
fn redeclaring_a_local_variable_at_runtime_via_shadowed_block_is_fine() {
    // Shadowing across nested blocks (not the same scope) is allowed.
    prints("var a = 1; { var a = 2; { var a = 3; print a; } print a; } print a;", "3\n2\n1");
}

#[test]
fn falsey_values_are_only_nil_and_false() {
    prints(r#"if (0) print "truthy"; else print "falsey";"#, "truthy");
    prints(r#"if ("") print "truthy"; else print "falsey";"#, "truthy");
    prints("if (nil) print \"truthy\"; else print \"falsey\";", "falsey");
}

#[test]
fn functions_without_explicit_return_evaluate_to_nil() {
    prints("fun f() {} print f();", "nil");
}

#[test]
fn logical_operators_return_unconverted_operand() {
    prints(r#"print "hi" or 2;"#, "hi");
    prints(r#"print nil and "unreached";"#, "nil");
}
