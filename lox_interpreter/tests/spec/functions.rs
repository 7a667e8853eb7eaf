use lox_interpreter::{ErrorKind, Interpreter, Output, RunResult};

use super::support::{output_of, runtime_error, syntax_errors};

#[test]
fn test_simple_function_call() {
    let source = "
    fun add(a, b) {
        return a + b;
    }
    print add(2, 3);
    ";
    assert_eq!(output_of(source), "5\n");
}

#[test]
fn test_implicit_nil_return() {
    let source = "
    fun nothing() {}
    fun bare() { return; }
    print nothing();
    print bare();
    ";
    assert_eq!(output_of(source), "nil\nnil\n");
}

#[test]
fn test_recursion() {
    let source = "
    fun fib(n) {
        if (n < 2) return n;
        return fib(n - 1) + fib(n - 2);
    }
    print fib(15);
    ";
    assert_eq!(output_of(source), "610\n");
}

#[test]
fn test_higher_order_function() {
    let source = "
    fun apply(f, x) { return f(x); }
    fun double(y) { return y * 2; }
    print apply(double, 5);
    ";
    assert_eq!(output_of(source), "10\n");
}

#[test]
fn test_closure_counter() {
    let source = "
    fun makeCounter() {
        var i = 0;
        fun count() {
            i = i + 1;
            print i;
        }
        return count;
    }
    var counter = makeCounter();
    counter();
    counter();
    var other = makeCounter();
    other();
    ";
    assert_eq!(output_of(source), "1\n2\n1\n");
}

#[test]
fn test_closures_share_captured_frame() {
    let source = r#"
    var get;
    var set;
    fun pair() {
        var value = "initial";
        fun getter() { return value; }
        fun setter(v) { value = v; }
        get = getter;
        set = setter;
    }
    pair();
    print get();
    set("updated");
    print get();
    "#;
    assert_eq!(output_of(source), "initial\nupdated\n");
}

#[test]
fn test_return_from_nested_loops_restores_caller_scope() {
    let source = r#"
    var label = "global";
    fun find(limit) {
        var label = "local";
        for (var i = 0; i < 10; i = i + 1) {
            while (true) {
                {
                    if (i == limit) return i;
                }
                break;
            }
        }
        return -1;
    }
    print find(3);
    print label;
    "#;
    assert_eq!(output_of(source), "3\nglobal\n");
}

#[test]
fn test_arguments_evaluate_left_to_right() {
    let source = r#"
    fun show(label) { print label; return label; }
    fun three(a, b, c) { return a + b + c; }
    print three(show("a"), show("b"), show("c"));
    "#;
    assert_eq!(output_of(source), "a\nb\nc\nabc\n");
}

#[test]
fn test_arity_mismatch() {
    let (error, _) = runtime_error("fun pair(a, b) {}\npair(1);");
    assert_eq!(error.kind, ErrorKind::ArityMismatch { expected: 2, got: 1 });
    assert_eq!(error.report(), "Expected 2 arguments but got 1.\n[line 2]");
}

#[test]
fn test_native_arity_is_checked() {
    let (error, _) = runtime_error("clock(1);");
    assert_eq!(error.kind, ErrorKind::ArityMismatch { expected: 0, got: 1 });
}

#[test]
fn test_calling_a_non_callable() {
    let (error, _) = runtime_error("var x = \"text\";\nx();");
    assert_eq!(error.to_string(), "Can only call functions and classes.");
    assert_eq!(error.line(), 2);
}

#[test]
fn test_callee_evaluated_before_arguments() {
    let (error, output) = runtime_error(r#"fun log() { print "arg"; } nil(log());"#);
    assert_eq!(error.kind, ErrorKind::NotCallable);
    assert_eq!(output, "arg\n");
}

#[test]
fn test_top_level_return_is_static_error() {
    assert_eq!(
        syntax_errors("return 1;"),
        vec!["[line 1] Error at 'return': Can't return from top-level code."]
    );
}

#[test]
fn test_functions_compare_by_identity() {
    let source = "
    fun f() {}
    fun g() {}
    var alias = f;
    print f == alias;
    print f == g;
    print f != g;
    print f < g;
    ";
    assert_eq!(output_of(source), "true\nfalse\ntrue\nfalse\n");
}

#[test]
fn test_deep_recursion_error_unwinds_scopes() {
    let source = r#"
    fun countdown(n) {
        if (n == 0) return missing;
        return countdown(n - 1);
    }
    countdown(20);
    "#;
    let (error, _) = runtime_error(source);
    assert_eq!(error.kind, ErrorKind::UndefinedVariable("missing".to_string()));
    assert_eq!(error.line(), 3);
}

#[test]
fn test_unbounded_recursion_is_a_runtime_error() {
    let source = "
    fun climb(n) {
        return climb(n + 1);
    }
    print \"before\";
    climb(0);
    print \"after\";
    ";
    let (error, output) = runtime_error(source);
    assert_eq!(error.kind, ErrorKind::StackOverflow);
    assert_eq!(error.to_string(), "Stack overflow.");
    assert_eq!(error.line(), 3);
    assert_eq!(output, "before\n");
}

#[test]
fn test_interpreter_is_usable_after_stack_overflow() {
    let output = Output::buffer();
    let mut interpreter = Interpreter::with_output(output.clone());

    let result = interpreter.run_source("fun loop() { return loop(); } loop();");
    let RunResult::RuntimeError(error) = result else {
        panic!("expected a runtime error, got {:?}", result);
    };
    assert_eq!(error.kind, ErrorKind::StackOverflow);
    assert_eq!(interpreter.call_depth(), 0);

    let result = interpreter.run_source("var x = 1; { var y = 2; print x + y; }");
    assert_eq!(result, RunResult::Completed);
    assert_eq!(output.contents(), "3\n");
}

#[test]
fn test_recursion_just_under_the_depth_limit() {
    let source = "
    fun sum(n) {
        if (n == 0) return 0;
        return n + sum(n - 1);
    }
    print sum(900);
    ";
    assert_eq!(output_of(source), "405450\n");
}
