use super::support::output_of;

#[test]
fn test_number_formatting() {
    let source = "
    print 1;
    print 1.0;
    print 3.5;
    print 10 / 4;
    print 0.1 + 0.2;
    print -12;
    ";
    assert_eq!(output_of(source), "1\n1\n3.5\n2.5\n0.30000000000000004\n-12\n");
}

#[test]
fn test_atoms() {
    let source = r#"
    print nil;
    print true;
    print false;
    print "raw text";
    print "";
    "#;
    assert_eq!(output_of(source), "nil\ntrue\nfalse\nraw text\n\n");
}

#[test]
fn test_multiline_string() {
    let source = "print \"one\ntwo\";";
    assert_eq!(output_of(source), "one\ntwo\n");
}

#[test]
fn test_precedence() {
    let source = "
    print 2 + 3 * 4;
    print (2 + 3) * 4;
    print -2 - -3;
    print !true == false;
    print 8 / 2 / 2;
    ";
    assert_eq!(output_of(source), "14\n20\n1\ntrue\n2\n");
}

#[test]
fn test_string_concatenation() {
    let source = r#"
    print "foo" + "bar";
    print "a" + 1;
    print 1 + "a";
    print "x" + nil;
    print "" + true;
    print 1 + 2 + "3";
    "#;
    assert_eq!(output_of(source), "foobar\na1\n1a\nxnil\ntrue\n33\n");
}

#[test]
fn test_truthiness() {
    let source = r#"
    if (0) print "zero is truthy";
    if ("") print "empty string is truthy";
    if (nil) print "unreachable"; else print "nil is falsy";
    if (false) print "unreachable"; else print "false is falsy";
    print !nil;
    print !0;
    "#;
    assert_eq!(
        output_of(source),
        "zero is truthy\nempty string is truthy\nnil is falsy\nfalse is falsy\ntrue\nfalse\n"
    );
}

#[test]
fn test_logical_operators_return_operands() {
    let source = r#"
    print nil or "default";
    print "first" or "second";
    print 1 and 2;
    print nil and 2;
    print false and undefinedThing;
    print true or undefinedThing;
    "#;
    assert_eq!(output_of(source), "default\nfirst\n2\nnil\nfalse\ntrue\n");
}

#[test]
fn test_callable_and_object_display() {
    let source = "
    fun greet() {}
    class Point {}
    print greet;
    print clock;
    print Point;
    print Point();
    ";
    assert_eq!(output_of(source), "<fn greet>\n<native fn>\nPoint\nPoint instance\n");
}

#[test]
fn test_comments_are_ignored() {
    let source = "
    // a line comment
    print 1; /* a block
    comment */ print 2;
    ";
    assert_eq!(output_of(source), "1\n2\n");
}

#[test]
fn test_clock_returns_a_number() {
    let source = "
    var start = clock();
    print start > 0;
    print clock() - start >= 0;
    ";
    assert_eq!(output_of(source), "true\ntrue\n");
}
