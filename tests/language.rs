use std::fs;

use blazescript::{
    DEFAULT_MAX_CALL_DEPTH, Error, Session, SessionConfig,
    ast::StaticType,
    error::RuntimeErrorKind,
    interpreter::value::core::Value,
    run,
};
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, code) in extract_blazescript_blocks(&content).into_iter().enumerate() {
            count += 1;
            if let Err(e) = run(&path.display().to_string(), &code) {
                panic!("Example {} in {:?} failed:\n{}\nError: {}", i + 1, path, code, e);
            }
        }
    }

    assert!(count > 0, "No BlazeScript examples found in book/src");
}

fn extract_blazescript_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```blazescript") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

fn assert_value(src: &str, expected: &Value) {
    match run("test.bzs", src) {
        Ok(Some(value)) => assert_eq!(&value, expected, "for script:\n{src}"),
        Ok(None) => panic!("Script produced no value:\n{src}"),
        Err(e) => panic!("Script failed:\n{src}\n{e}"),
    }
}

fn assert_int(src: &str, expected: i64) {
    assert_value(src, &Value::Int(expected));
}

fn assert_float(src: &str, expected: f64) {
    assert_value(src, &Value::Float(expected));
}

fn assert_failure(src: &str) {
    if run("test.bzs", src).is_ok() {
        panic!("Script succeeded but was expected to fail:\n{src}")
    }
}

fn runtime_error(src: &str) -> RuntimeErrorKind {
    match run("test.bzs", src) {
        Err(Error::Runtime(e)) => e.kind,
        other => panic!("Expected a runtime error for:\n{src}\nGot {other:?}"),
    }
}

#[test]
fn arithmetic_follows_precedence() {
    assert_int("2 + 3 * 4", 14);
    assert_int("(2 + 3) * 4", 20);
    assert_int("10 - 4 - 3", 3);
    assert_int("2 * 3 ^ 2", 18);
    assert_int("-2 ^ 2", -4);
    assert_int("2 ^ 3 ^ 2", 512);
    assert_int("+5 - -5", 10);
}

#[test]
fn int_and_float_stay_distinct() {
    assert_int("7 / 2", 3);
    assert_int("-7 / 2", -3);
    assert_float("7.0 / 2.0", 3.5);
    assert_float("2.5 * 2.0", 5.0);
    assert_float(".5 + 1.", 1.5);
    assert_eq!(run("test.bzs", "4.0").unwrap().map(|v| v.to_string()),
               Some("4.0".to_string()));
}

#[test]
fn int_arithmetic_is_checked() {
    assert_eq!(runtime_error("9223372036854775807 + 1"), RuntimeErrorKind::Overflow);
    assert_eq!(runtime_error("2 ^ 64"), RuntimeErrorKind::Overflow);
    assert_eq!(runtime_error("2 ^ -1"), RuntimeErrorKind::NegativeExponent);
    assert_float("2.0 ^ -1.0", 0.5);
}

#[test]
fn unit_bases_take_any_exponent() {
    assert_int("1 ^ 5000000000", 1);
    assert_int("0 ^ 5000000000", 0);
    assert_int("(0 - 1) ^ 5000000000", 1);
    assert_int("(0 - 1) ^ 5000000001", -1);
    assert_eq!(runtime_error("2 ^ 5000000000"), RuntimeErrorKind::Overflow);
}

#[test]
fn division_by_zero_is_error() {
    assert_eq!(runtime_error("1 / 0"), RuntimeErrorKind::DivisionByZero);
    assert_eq!(runtime_error("1.0 / 0.0"), RuntimeErrorKind::DivisionByZero);
    assert_eq!(runtime_error("var zero = 0\n5 / zero"), RuntimeErrorKind::DivisionByZero);
}

#[test]
fn comparisons_and_logic_produce_ints() {
    assert_int("1 < 2", 1);
    assert_int("2 <= 1", 0);
    assert_int("3 == 3", 1);
    assert_int("3 != 3", 0);
    assert_int("1.5 >= 1.5", 1);
    assert_int("1 < 2 and 2 < 1", 0);
    assert_int("1 < 2 or 2 < 1", 1);
    assert_int("not 0", 1);
    assert_int("not 2.5", 0);
    assert_int("!(1 == 1) || 1 && 1", 1);
    assert_int("true and not false", 1);
}

#[test]
fn strings_and_chars() {
    assert_value(r#""blaze" + "script""#, &Value::from("blazescript"));
    assert_value(r#""a\tb\n""#, &Value::from("a\tb\n"));
    assert_int(r#""same" == "same""#, 1);
    assert_int("'a' != 'b'", 1);
    assert_value("'x'", &Value::Char('x'));
    assert_failure(r#"val s = "a"; s * s"#);
    assert_failure("val c = 'a'; c < c");
}

#[test]
fn variables_and_annotations() {
    assert_int("val x: Int = 2 + 3 * 4\nx", 14);
    assert_float("var y: Float = 1.5\ny = y * 2.0\ny", 3.0);
    assert_value("var s = \"a\"; s = s + \"b\"", &Value::from("ab"));
    assert_int("val f: Function: Int = fun (n: Int) => n + 1\nf(1)", 2);

    let mut session = Session::default();
    session.run("test.bzs", "val x: Int = 2 + 3 * 4").unwrap();
    assert_eq!(session.lookup("x"), Some(&Value::Int(14)));
}

#[test]
fn constants_cannot_be_reassigned() {
    let kind = |name: &str| RuntimeErrorKind::ConstantReassignment { name: name.to_string() };

    assert_eq!(runtime_error("val x = 1\nx = 2"), kind("x"));
    assert_eq!(runtime_error("val x = 1\nval x = 2"), kind("x"));
    assert_eq!(runtime_error("val x = 1\nvar x = 2"), kind("x"));
    assert_eq!(runtime_error("val x = 1\nfun f() => x = 2\nf()"), kind("x"));
    assert_eq!(runtime_error("fun f() => 1\nf = 2"), kind("f"));
    assert_eq!(runtime_error("fun f(a: Int) => a = 2\nf(1)"), kind("a"));
    assert_eq!(runtime_error("true = 0"), kind("true"));
    assert_eq!(runtime_error("val i = 0\nfor i = 0 to 3 then i"), kind("i"));
}

#[test]
fn variables_can_be_reassigned() {
    assert_int("var x = 1\nx = 2\nx", 2);
    assert_int("var x = 1\nvar x = 5\nx", 5);
    assert_int("var x = 1\nfun bump() => x = x + 1\nbump(); bump(); x", 3);
}

#[test]
fn reassignment_respects_declared_types() {
    let kind = runtime_error("var x = 1\nx = 2.0");
    assert_eq!(kind,
               RuntimeErrorKind::DeclaredTypeMismatch { name:     "x".to_string(),
                                                        expected: StaticType::Int,
                                                        found:    StaticType::Float, });

    assert!(matches!(runtime_error("undefined = 1"),
                     RuntimeErrorKind::UndefinedVariable { .. }));
}

#[test]
fn undefined_variable_is_error() {
    assert_eq!(runtime_error("val y = x + 1"),
               RuntimeErrorKind::UndefinedVariable { name: "x".to_string() });
}

#[test]
fn scoping_is_lexical() {
    assert_int("val x = 1\nfun f() => x\nfun g(x: Int) => f()\ng(2)", 1);
    assert_int("val x = 1\nfun f(x: Int) => x\nf(5)", 5);
    assert_int("val x = 1\nfun f() => val x = 2\nf() + x", 3);
    assert_eq!(runtime_error("fun f() => val local = 1\nf()\nlocal"),
               RuntimeErrorKind::UndefinedVariable { name: "local".to_string() });
}

#[test]
fn closures_capture_their_context() {
    let src = "fun make_adder(n: Int) => fun (x: Int) => x + n\n\
               val add5 = make_adder(5)\n\
               val add7 = make_adder(7)\n\
               add5(1) * 100 + add7(1)";
    assert_int(src, 608);

    assert_int("fun make_adder(n: Int) => fun (x: Int) => x + n\nmake_adder(2)(3)", 5);
}

#[test]
fn recursion() {
    assert_int("fun fact(n: Int) => if n <= 1 then 1 else n * fact(n - 1)\nfact(10)",
               3_628_800);
    assert_int("fun fib(n: Int) => if n < 2 then n else fib(n - 1) + fib(n - 2)\nfib(15)",
               610);
}

#[test]
fn if_evaluates_only_one_branch() {
    assert_int("if 1 then 10 else 1 / 0", 10);
    assert_int("if 0 then 1 / 0 else 20", 20);
    assert_int("if 0 then 1 else if 2 then 2 else 3", 2);
    assert_int("if 0.0 then 1 else 2", 2);
    assert_int("var x = 0\nif 1 then x = 1 else x = 2\nx", 1);
    assert_int("if 0 then 1\nelse 2", 2);

    assert_eq!(run("test.bzs", "if 0 then 1").unwrap(), None);
    assert!(matches!(runtime_error("if \"yes\" then 1"),
                     RuntimeErrorKind::ExpectedNumber { .. }));
}

#[test]
fn for_loops_count_toward_the_end() {
    assert_int("var total = 0\nfor i = 0 to 5 then total = total + i\ntotal", 10);
    assert_int("var total = 0\nfor i = 5 to 0 step -1 then total = total + i\ntotal", 15);
    assert_int("var total = 0\nfor i = 0 to 10 step 3 then total = total + i\ntotal", 18);
    assert_float("var total = 0.0\nfor x = 0.0 to 1.0 step 0.25 then total = total + x\ntotal",
                 1.5);
    assert_int("for i = 0 to 5 then var x = i\nx", 4);
    assert_int("for i = 0 to 3 then i * 10", 20);

    assert_eq!(run("test.bzs", "for i = 5 to 0 then i").unwrap(), None);
}

#[test]
fn for_loop_bounds_are_checked() {
    assert!(matches!(runtime_error("for i = 0 to 5 step 0 then i"),
                     RuntimeErrorKind::InvalidLoopBounds { .. }));
    assert!(matches!(runtime_error("val end = 2.0\nfor i = 0 to end then i"),
                     RuntimeErrorKind::InvalidLoopBounds { .. }));
    assert!(matches!(runtime_error("val end = \"ten\"\nfor i = 0 to end then i"),
                     RuntimeErrorKind::ExpectedNumber { .. }));
}

#[test]
fn bindings_survive_a_failed_loop() {
    let mut session = Session::default();
    let result = session.run("test.bzs", "var last = 0\nfor i = 0 to 5 then last = 10 / (3 - i)");

    assert!(matches!(result, Err(Error::Runtime(_))));
    assert_eq!(session.lookup("i"), Some(&Value::Int(3)));
    assert_eq!(session.lookup("last"), Some(&Value::Int(10)));
}

#[test]
fn while_loops() {
    assert_int("var n = 0\nwhile n < 10 then n = n + 3\nn", 12);
    assert_int("var n = 5\nwhile n then n = n - 1", 0);
    assert_eq!(run("test.bzs", "while 0 then 1").unwrap(), None);
}

#[test]
fn function_calls_are_checked() {
    assert_int("fun add(a: Int, b: Int) => a + b\nadd(2, 3)", 5);
    assert_int("fun answer() => 42\nanswer()", 42);

    assert_eq!(runtime_error("fun add(a: Int, b: Int) => a + b\nadd(1)"),
               RuntimeErrorKind::ArgumentCount { function: "add".to_string(),
                                                 expected: 2,
                                                 found:    1, });
    assert_eq!(runtime_error("val f = fun (a: Int) => a\nf(1, 2)"),
               RuntimeErrorKind::ArgumentCount { function: "<anonymous>".to_string(),
                                                 expected: 1,
                                                 found:    2, });
    assert_eq!(runtime_error("val f = fun (a: Int) => a\nval x = 1.5\nf(x)"),
               RuntimeErrorKind::ArgumentType { function:  "<anonymous>".to_string(),
                                                parameter: "a".to_string(),
                                                expected:  StaticType::Int,
                                                found:     StaticType::Float, });
    assert_eq!(runtime_error("val x = 3\nx(1)"),
               RuntimeErrorKind::NotCallable { found: StaticType::Int });
}

#[test]
fn arguments_are_evaluated_before_the_callee_is_checked() {
    assert_eq!(runtime_error("val x = 3\nx(1 / 0)"), RuntimeErrorKind::DivisionByZero);
}

#[test]
fn runaway_recursion_hits_the_call_depth_limit() {
    let src = "fun forever(n: Int) => forever(n + 1)\nforever(0)";

    match run("test.bzs", src) {
        Err(Error::Runtime(e)) => {
            assert_eq!(e.kind,
                       RuntimeErrorKind::CallDepthExceeded { limit: DEFAULT_MAX_CALL_DEPTH });
            assert_eq!(e.traceback.len(), DEFAULT_MAX_CALL_DEPTH + 1);
            assert_eq!(e.traceback[0].name, "<program>");
            assert_eq!(e.traceback[DEFAULT_MAX_CALL_DEPTH].name, "forever");
        },
        other => panic!("Expected a call depth error, got {other:?}"),
    }
}

#[test]
fn call_depth_limit_is_configurable() {
    let config = SessionConfig::default().with_max_call_depth(200);
    let src = "fun forever(n: Int) => forever(n + 1)\nforever(0)";

    match Session::new(config).run("test.bzs", src) {
        Err(Error::Runtime(e)) => {
            assert_eq!(e.kind, RuntimeErrorKind::CallDepthExceeded { limit: 200 });
            assert_eq!(e.traceback.len(), 201);
        },
        other => panic!("Expected a call depth error, got {other:?}"),
    }
}

#[test]
fn deep_recursion_below_the_limit_succeeds() {
    assert_int("fun count(n: Int) => if n == 0 then 0 else 1 + count(n - 1)\ncount(900)",
               900);
}

#[test]
fn activations_are_released_unless_captured() {
    let mut session = Session::new(SessionConfig::default().with_persist_globals(true));

    session.run("test.bzs", "fun square(x: Int) => x * x\nsquare(3); square(4)").unwrap();
    assert_eq!(session.interpreter().contexts().len(), 1);

    session.run("test.bzs", "fun make(n: Int) => fun () => n\nval get = make(9)").unwrap();
    assert_eq!(session.interpreter().contexts().len(), 2);
    assert_eq!(session.run("test.bzs", "get()").unwrap(), Some(Value::Int(9)));
    assert_eq!(session.interpreter().contexts().len(), 2);
}

#[test]
fn discarded_closures_do_not_pile_up() {
    let mut session = Session::new(SessionConfig::default().with_persist_globals(true));

    let src = "fun make() => fun () => 1\nfor i = 0 to 5000 then make()\n0";
    assert_eq!(session.run("test.bzs", src).unwrap(), Some(Value::Int(0)));
    assert_eq!(session.interpreter().contexts().len(), 1);

    let src = "var n = 0\nwhile n < 100 then n = n + make()()\nn";
    assert_eq!(session.run("test.bzs", src).unwrap(), Some(Value::Int(100)));
    assert_eq!(session.interpreter().contexts().len(), 1);
}

#[test]
fn overwritten_closures_are_released_on_the_next_run() {
    let mut session = Session::new(SessionConfig::default().with_persist_globals(true));

    session.run("test.bzs", "fun make(n: Int) => fun () => n\nvar get = make(1)").unwrap();
    session.run("test.bzs", "get = make(2)").unwrap();
    assert_eq!(session.run("test.bzs", "get()").unwrap(), Some(Value::Int(2)));
    assert_eq!(session.interpreter().contexts().len(), 2);
}

#[test]
fn closures_returned_through_calls_stay_usable() {
    let src = "fun make(n: Int) => fun () => n
fun wrap(n: Int) => make(n * 2)
fun twice(n: Int) => wrap(n)() + wrap(n + 1)()
for i = 0 to 50 then wrap(i)
twice(5)";
    assert_int(src, 22);
}

#[test]
fn sessions_persist_globals_only_when_asked() {
    let mut fresh = Session::default();
    fresh.run("test.bzs", "val x = 1").unwrap();
    assert!(matches!(fresh.run("test.bzs", "x"), Err(Error::Runtime(_))));

    let mut repl = Session::new(SessionConfig::default().with_persist_globals(true));
    repl.run("<stdin>", "var x = 1").unwrap();
    repl.run("<stdin>", "x = x + 1").unwrap();
    assert_eq!(repl.run("<stdin>", "x * 10").unwrap(), Some(Value::Int(20)));
}

#[test]
fn statements_comments_and_separators() {
    assert_int("@ a comment\nval a = 1; val b = 2 @ trailing\n\n\na + b", 3);
    assert_eq!(run("test.bzs", "").unwrap(), None);
    assert_eq!(run("test.bzs", "@ only a comment\n").unwrap(), None);
    assert_int("fun add(a: Int,\n        b: Int) =>\n    a + b\nadd(\n  1,\n  2\n)", 3);
}

#[test]
fn static_type_errors_stop_before_running() {
    let mut session = Session::default();
    let result = session.run("test.bzs", "val x = 1\nval y = 1 + \"x\"");

    assert!(matches!(result, Err(Error::Syntax(_))));
    assert_eq!(session.lookup("x"), None);
}

#[test]
fn values_display_like_source() {
    let show = |src: &str| run("test.bzs", src).unwrap().unwrap().to_string();

    assert_eq!(show("1 + 1"), "2");
    assert_eq!(show("1.0 + 1.0"), "2.0");
    assert_eq!(show("0.1 + 0.2"), "0.30000000000000004");
    assert_eq!(show(r#""text""#), "text");
    assert_eq!(show("fun add(a: Int, b: Int) => a + b"), "<function add>");
    assert_eq!(show("fun () => 1"), "<function <anonymous>>");
}
