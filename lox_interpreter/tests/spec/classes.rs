use lox_interpreter::ErrorKind;

use super::support::{output_of, runtime_error, syntax_errors};

#[test]
fn test_fields_are_created_on_assignment() {
    let source = "
    class Box {}
    var box = Box();
    box.width = 3;
    box.height = 4;
    print box.width * box.height;
    box.width = 10;
    print box.width;
    ";
    assert_eq!(output_of(source), "12\n10\n");
}

#[test]
fn test_methods_bind_this() {
    let source = r#"
    class Greeter {
        greet(name) {
            return this.greeting + ", " + name;
        }
    }
    var greeter = Greeter();
    greeter.greeting = "Hello";
    print greeter.greet("Lox");
    "#;
    assert_eq!(output_of(source), "Hello, Lox\n");
}

#[test]
fn test_bound_method_remembers_instance() {
    let source = r#"
    class Person {
        sayName() { print this.name; }
    }
    var jane = Person();
    jane.name = "Jane";
    var bill = Person();
    bill.name = "Bill";
    bill.sayName = jane.sayName;
    bill.sayName();
    "#;
    assert_eq!(output_of(source), "Jane\n");
}

#[test]
fn test_initializer_sets_fields_and_defines_arity() {
    let source = "
    class Point {
        init(x, y) {
            this.x = x;
            this.y = y;
        }
        sum() { return this.x + this.y; }
    }
    var p = Point(1, 2);
    print p.sum();
    ";
    assert_eq!(output_of(source), "3\n");

    let (error, _) = runtime_error("class Point { init(x, y) {} }\nPoint(1);");
    assert_eq!(error.kind, ErrorKind::ArityMismatch { expected: 2, got: 1 });
    assert_eq!(error.line(), 2);

    let (error, _) = runtime_error("class Empty {}\nEmpty(1);");
    assert_eq!(error.kind, ErrorKind::ArityMismatch { expected: 0, got: 1 });
}

#[test]
fn test_initializer_always_returns_this() {
    let source = r#"
    class Foo {
        init() {
            this.calls = 0;
            return;
        }
    }
    var foo = Foo();
    print foo;
    var again = foo.init();
    print again == foo;
    print foo.init();
    "#;
    assert_eq!(output_of(source), "Foo instance\ntrue\nFoo instance\n");
}

#[test]
fn test_returning_a_value_from_init_is_static_error() {
    assert_eq!(
        syntax_errors("class Foo {\n  init() { return 1; }\n}"),
        vec!["[line 2] Error at 'return': Can't return a value from an initializer."]
    );
}

#[test]
fn test_getters_run_on_access() {
    let source = "
    class Circle {
        init(radius) { this.radius = radius; }
        area { return 3 * this.radius * this.radius; }
    }
    var circle = Circle(2);
    print circle.area;
    circle.radius = 1;
    print circle.area;
    ";
    assert_eq!(output_of(source), "12\n3\n");
}

#[test]
fn test_fields_shadow_methods() {
    let source = r#"
    class Thing {
        describe() { return "method"; }
    }
    var thing = Thing();
    print thing.describe();
    thing.describe = "field";
    print thing.describe;
    "#;
    assert_eq!(output_of(source), "method\nfield\n");
}

#[test]
fn test_inheritance_and_super() {
    let source = r#"
    class Doughnut {
        cook() { print "Fry until golden brown."; }
        name() { return "doughnut"; }
    }
    class BostonCream < Doughnut {
        cook() {
            super.cook();
            print "Pipe full of custard and coat with chocolate.";
        }
    }
    var treat = BostonCream();
    treat.cook();
    print treat.name();
    "#;
    assert_eq!(
        output_of(source),
        "Fry until golden brown.\nPipe full of custard and coat with chocolate.\ndoughnut\n"
    );
}

#[test]
fn test_super_binds_current_this() {
    let source = r#"
    class A {
        method() { return "A method on " + this.tag; }
    }
    class B < A {
        method() { return "B method"; }
        test() { return super.method(); }
    }
    class C < B {}
    var c = C();
    c.tag = "c";
    print c.test();
    "#;
    assert_eq!(output_of(source), "A method on c\n");
}

#[test]
fn test_super_getter_is_invoked() {
    let source = r#"
    class Base {
        label { return "base " + this.id; }
    }
    class Derived < Base {
        label { return "derived / " + super.label; }
    }
    var d = Derived();
    d.id = 7;
    print d.label;
    "#;
    assert_eq!(output_of(source), "derived / base 7\n");
}

#[test]
fn test_inherited_initializer() {
    let source = "
    class Base {
        init(value) { this.value = value; }
    }
    class Derived < Base {}
    print Derived(5).value;
    ";
    assert_eq!(output_of(source), "5\n");
}

#[test]
fn test_undefined_property() {
    let (error, _) = runtime_error("class Empty {}\nprint Empty().missing;");
    assert_eq!(error.to_string(), "Undefined property 'missing'.");
    assert_eq!(error.line(), 2);
}

#[test]
fn test_undefined_super_method() {
    let source = "
    class A {}
    class B < A {
        run() { return super.missing(); }
    }
    B().run();
    ";
    let (error, _) = runtime_error(source);
    assert_eq!(error.kind, ErrorKind::UndefinedProperty("missing".to_string()));
}

#[test]
fn test_only_instances_have_properties() {
    let (error, _) = runtime_error("var n = 1;\nprint n.field;");
    assert_eq!(error.to_string(), "Only instances have properties.");

    let (error, _) = runtime_error("\"text\".length = 4;");
    assert_eq!(error.to_string(), "Only instances have fields.");
}

#[test]
fn test_set_checks_object_before_evaluating_value() {
    let source = r#"
    fun noisy() { print "evaluated"; return 1; }
    nil.field = noisy();
    "#;
    let (error, output) = runtime_error(source);
    assert_eq!(error.kind, ErrorKind::NotAnInstance("fields"));
    assert_eq!(output, "");
}

#[test]
fn test_superclass_must_be_a_class() {
    let (error, _) = runtime_error("var NotAClass = \"nope\";\nclass Sub < NotAClass {}");
    assert_eq!(error.kind, ErrorKind::InvalidSuperclass);
    assert_eq!(error.report(), "Superclass must be a class.\n[line 2]");
}

#[test]
fn test_class_static_errors() {
    assert_eq!(
        syntax_errors("class Ouroboros < Ouroboros {}"),
        vec!["[line 1] Error at 'Ouroboros': A class can't inherit from itself."]
    );
    assert_eq!(
        syntax_errors("fun f() { return this; }"),
        vec!["[line 1] Error at 'this': Can't use 'this' outside of a class."]
    );
    assert_eq!(
        syntax_errors("class Lonely { m() { super.m(); } }"),
        vec!["[line 1] Error at 'super': Can't use 'super' in a class with no superclass."]
    );
}

#[test]
fn test_methods_can_refer_to_their_class() {
    let source = "
    class Node {
        init(next) { this.next = next; }
        prepend() { return Node(this); }
    }
    var list = Node(nil).prepend().prepend();
    print list.next.next.next;
    ";
    assert_eq!(output_of(source), "nil\n");
}

#[test]
fn test_instances_compare_by_identity() {
    let source = "
    class Thing {}
    var a = Thing();
    var b = Thing();
    print a == a;
    print a == b;
    print a != b;
    print Thing == Thing;
    ";
    assert_eq!(output_of(source), "true\nfalse\ntrue\ntrue\n");
}

#[test]
fn test_local_class_with_local_superclass() {
    let source = r#"
    {
        class Base { hello() { return "hi from base"; } }
        class Child < Base {
            hello() { return super.hello() + " via child"; }
        }
        print Child().hello();
    }
    "#;
    assert_eq!(output_of(source), "hi from base via child\n");
}

#[test]
fn test_bound_methods_share_their_instance() {
    let source = "
    class Counter {
        init() { this.n = 0; }
        inc() {
            this.n = this.n + 1;
            return this.n;
        }
    }
    var c = Counter();
    var a = c.inc;
    var b = c.inc;
    print a();
    print b();
    print a == b;
    print c.n;
    ";
    assert_eq!(output_of(source), "1\n2\nfalse\n2\n");
}

#[test]
fn test_binding_leaves_the_method_unbound_for_other_instances() {
    let source = r#"
    class Named {
        init(name) { this.name = name; }
        say() { return this.name; }
    }
    var first = Named("first");
    var second = Named("second");
    var fromFirst = first.say;
    print second.say();
    print fromFirst();
    second.say = fromFirst;
    print second.say();
    "#;
    assert_eq!(output_of(source), "second\nfirst\nfirst\n");
}

#[test]
fn test_self_recursive_getter_overflows() {
    let source = "
    class Spiral {
        forever { return this.forever; }
    }
    print Spiral().forever;
    ";
    let (error, output) = runtime_error(source);
    assert_eq!(error.kind, ErrorKind::StackOverflow);
    assert_eq!(error.line(), 3);
    assert_eq!(output, "");
}

#[test]
fn test_recursive_initializer_overflows() {
    let source = "
    class Nest {
        init() { Nest(); }
    }
    Nest();
    ";
    let (error, _) = runtime_error(source);
    assert_eq!(error.kind, ErrorKind::StackOverflow);
}
