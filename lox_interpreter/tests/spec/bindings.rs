use lox_interpreter::ErrorKind;

use super::support::{output_of, runtime_error, syntax_errors};

#[test]
fn test_global_redefinition() {
    let source = "
    var a = 1;
    var a = 2;
    print a;
    ";
    assert_eq!(output_of(source), "2\n");
}

#[test]
fn test_block_shadowing() {
    let source = r#"
    var a = "outer";
    {
        var a = "inner";
        print a;
    }
    print a;
    "#;
    assert_eq!(output_of(source), "inner\nouter\n");
}

#[test]
fn test_nested_blocks_see_enclosing_bindings() {
    let source = r#"
    var a = "global a";
    var b = "global b";
    {
        var a = "outer a";
        {
            var b = "inner b";
            print a + ", " + b;
        }
        print a + ", " + b;
    }
    "#;
    assert_eq!(output_of(source), "outer a, inner b\nouter a, global b\n");
}

#[test]
fn test_assignment_is_an_expression() {
    let source = "
    var a;
    var b;
    a = b = 3;
    print a;
    print b;
    print a = 4;
    ";
    assert_eq!(output_of(source), "3\n3\n4\n");
}

#[test]
fn test_assignment_reaches_enclosing_scope() {
    let source = "
    var count = 0;
    {
        {
            count = count + 1;
        }
        count = count + 1;
    }
    print count;
    ";
    assert_eq!(output_of(source), "2\n");
}

#[test]
fn test_uninitialized_variable() {
    let (error, output) = runtime_error("var a;\nprint \"before\";\nprint a;");
    assert_eq!(output, "before\n");
    assert_eq!(error.kind, ErrorKind::UninitializedAccess("a".to_string()));
    assert_eq!(error.report(), "Accessing uninitialized variable a.\n[line 3]");
}

#[test]
fn test_nil_initialized_is_readable() {
    assert_eq!(output_of("var a = nil; print a;"), "nil\n");
}

#[test]
fn test_local_uninitialized_variable() {
    let (error, _) = runtime_error("{\n  var local;\n  print local;\n}");
    assert_eq!(error.kind, ErrorKind::UninitializedAccess("local".to_string()));
    assert_eq!(error.line(), 3);
}

#[test]
fn test_undefined_variable() {
    let (error, _) = runtime_error("print nope;");
    assert_eq!(error.to_string(), "Undefined variable 'nope'.");
}

#[test]
fn test_assigning_undefined_never_creates() {
    let (error, _) = runtime_error("nope = 1;");
    assert_eq!(error.kind, ErrorKind::UndefinedVariable("nope".to_string()));
}

#[test]
fn test_resolution_is_static() {
    let source = r#"
    var a = "global";
    {
        fun showA() {
            print a;
        }
        showA();
        var a = "block";
        showA();
        print a;
    }
    "#;
    assert_eq!(output_of(source), "global\nglobal\nblock\n");
}

#[test]
fn test_static_scope_errors() {
    assert_eq!(
        syntax_errors("{ var a = 1; var a = 2; }"),
        vec!["[line 1] Error at 'a': Already a variable with this name in this scope."]
    );
    assert_eq!(
        syntax_errors("var a = 1;\n{ var a = a; }"),
        vec!["[line 2] Error at 'a': Can't read local variable in its own initializer."]
    );
}

#[test]
fn test_global_may_read_itself_in_initializer() {
    let (error, _) = runtime_error("var a = a;");
    assert_eq!(error.kind, ErrorKind::UndefinedVariable("a".to_string()));
}

#[test]
fn test_all_static_errors_reported_together() {
    let errors = syntax_errors("print 1 +;\nvar = 2;\nprint 3;");
    assert_eq!(
        errors,
        vec![
            "[line 1] Error at ';': Expect expression.",
            "[line 2] Error at '=': Expect variable name.",
        ]
    );
}
