use lox_interpreter::ErrorKind;

use super::support::{output_of, runtime_error};

#[test]
fn test_arithmetic_requires_numbers() {
    let (error, _) = runtime_error("print \"a\" - 1;");
    assert_eq!(error.to_string(), "Operands must be numbers.");

    let (error, _) = runtime_error("print nil * 2;");
    assert_eq!(error.kind, ErrorKind::TypeError("Operands must be numbers."));

    let (error, _) = runtime_error("print true / 1;");
    assert_eq!(error.kind, ErrorKind::TypeError("Operands must be numbers."));
}

#[test]
fn test_negation_requires_a_number() {
    let (error, _) = runtime_error("print -\"text\";");
    assert_eq!(error.report(), "Operand must be a number.\n[line 1]");
}

#[test]
fn test_plus_without_strings_requires_numbers() {
    let (error, _) = runtime_error("print true + 1;");
    assert_eq!(error.to_string(), "Operands must be numbers or strings.");

    let (error, _) = runtime_error("print nil + nil;");
    assert!(matches!(error.kind, ErrorKind::TypeError(_)));
}

#[test]
fn test_division_by_zero() {
    let (error, _) = runtime_error("print 1 / 0;");
    assert_eq!(error.kind, ErrorKind::DivisionByZero);

    let (error, _) = runtime_error("print 0 / -0;");
    assert_eq!(error.kind, ErrorKind::DivisionByZero);
}

#[test]
fn test_cross_type_ordering_chain() {
    let source = r#"
    print nil < false;
    print false < true;
    print true < 0;
    print 2 < "10";
    print "10" < "abc";
    print nil < "anything";
    "#;
    assert_eq!(output_of(source), "true\ntrue\ntrue\ntrue\ntrue\ntrue\n");
}

#[test]
fn test_numeric_strings_compare_numerically() {
    let source = r#"
    print 1 == "1";
    print "1" == 1;
    print 2 < "10";
    print "10" > 9;
    print 1.5 == " 1.5 ";
    print 3 <= "3";
    "#;
    assert_eq!(output_of(source), "true\ntrue\ntrue\ntrue\ntrue\ntrue\n");
}

#[test]
fn test_unparsable_string_never_equals_a_number() {
    let source = r#"
    print "abc" == 1;
    print 1 == "abc";
    print 1 != "abc";
    print 1000000 < "abc";
    print "abc" > 1000000;
    "#;
    assert_eq!(output_of(source), "false\nfalse\ntrue\ntrue\ntrue\n");
}

#[test]
fn test_nil_and_boolean_equality() {
    let source = "
    print nil == nil;
    print nil == false;
    print false == false;
    print true != false;
    print nil != 0;
    ";
    assert_eq!(output_of(source), "true\nfalse\ntrue\ntrue\ntrue\n");
}

#[test]
fn test_strings_compare_lexicographically() {
    let source = r#"
    print "apple" < "banana";
    print "b" > "abc";
    print "same" == "same";
    print "" < "a";
    "#;
    assert_eq!(output_of(source), "true\ntrue\ntrue\ntrue\n");
}

#[test]
fn test_incomparable_kinds() {
    let (error, _) = runtime_error("class Thing {}\nprint 1 < Thing();");
    assert_eq!(
        error.kind,
        ErrorKind::TypeMismatch {
            left: "number",
            right: "instance"
        }
    );
    assert_eq!(error.report(), "Cannot compare number and instance.\n[line 2]");

    let (error, _) = runtime_error("fun f() {}\nprint \"f\" == f;");
    assert_eq!(error.to_string(), "Cannot compare string and function.");

    let (error, _) = runtime_error("class Thing {}\nfun f() {}\nprint Thing == f;");
    assert_eq!(error.to_string(), "Cannot compare class and function.");
}

#[test]
fn test_booleans_and_nil_compare_with_objects() {
    let source = "
    class Thing {}
    print nil == Thing();
    print nil < Thing;
    print true < clock;
    print false == Thing;
    ";
    assert_eq!(output_of(source), "false\ntrue\ntrue\nfalse\n");
}

#[test]
fn test_operands_evaluate_before_type_check() {
    let source = r#"
    fun side() { print "right side ran"; return 1; }
    print "x" - side();
    "#;
    let (error, output) = runtime_error(source);
    assert_eq!(output, "right side ran\n");
    assert_eq!(error.line(), 3);
}

#[test]
fn test_signed_zeros_compare_equal() {
    let source = "
    print 0 == -0;
    print -0 < 0;
    print -0 >= 0;
    print -0;
    ";
    assert_eq!(output_of(source), "true\nfalse\ntrue\n-0\n");
}
