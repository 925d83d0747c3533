use blazescript::{Error, error::RuntimeErrorKind, run};

fn failure(src: &str) -> Error {
    match run("test.bzs", src) {
        Ok(value) => panic!("Expected {src:?} to fail, got {value:?}"),
        Err(e) => e,
    }
}

fn rendered(src: &str) -> String {
    failure(src).to_string()
}

#[test]
fn lexical_errors_quote_the_character() {
    let error = failure("val a = 1 # 2");
    assert!(matches!(&error, Error::Lexical(errors) if errors.len() == 1));

    assert_eq!(error.to_string(),
               "Illegal Character: Unexpected character '#'\n\
                File test.bzs, line 1\n\
                \n\
                val a = 1 # 2\n          ^");
}

#[test]
fn lexical_errors_name_the_missing_character() {
    let message = rendered("val a = 1\nval b = a & 2");

    assert!(message.starts_with("Expected Character: Expected one more '&'\n"));
    assert!(message.contains("File test.bzs, line 2\n"));
    assert!(message.ends_with("val b = a & 2\n          ^"));
}

#[test]
fn syntax_errors_point_at_the_token() {
    assert_eq!(rendered("val = 3"),
               "Invalid Syntax: Expected a variable name, found '='\n\
                File test.bzs, line 1\n\
                \n\
                val = 3\n    ^");
}

#[test]
fn type_errors_underline_the_expression() {
    assert_eq!(rendered("val x: Int = 1.5"),
               "Invalid Type: 'x' is declared as Int but initialized with Float\n\
                File test.bzs, line 1\n\
                \n\
                val x: Int = 1.5\n             ^^^");

    let message = rendered("1 + \"a\"");
    assert!(message.starts_with("Invalid Type: Cannot apply '+' to Int (line 1, column 1) and \
                                 String (line 1, column 5)\n"));
    assert!(message.ends_with("1 + \"a\"\n^^^^^^^"));
}

#[test]
fn runtime_errors_carry_a_traceback() {
    let source = "fun half(x: Int) => x / 0\nval y = 2\nhalf(y)";

    assert_eq!(rendered(source),
               "Traceback (most recent call last):\n  \
                File test.bzs, line 3, in <program>\n  \
                File test.bzs, line 1, in half\n\
                Runtime Error: Division by zero\n\
                \n\
                fun half(x: Int) => x / 0\n                    ^^^^^");
}

#[test]
fn runtime_errors_at_top_level_have_one_frame() {
    let error = failure("val limit = 3\nlimit = 4");
    let Error::Runtime(error) = &error else {
        panic!("Expected a runtime error, got {error:?}");
    };

    assert_eq!(error.kind, RuntimeErrorKind::ConstantReassignment { name: "limit".to_string() });
    assert_eq!(error.traceback.len(), 1);
    assert_eq!(error.traceback[0].to_string(), "File test.bzs, line 2, in <program>");
    assert!(error.to_string().contains("Runtime Error: Cannot reassign a constant: 'limit'"));
}

#[test]
fn anonymous_functions_appear_in_tracebacks() {
    let source = "val apply = fun (f: Function, x: Int) => f(x)\n\
                  apply(fun (n: Int) => n / 0, 1)";
    let Error::Runtime(error) = failure(source) else {
        panic!("Expected a runtime error");
    };

    let names = error.traceback.iter().map(|frame| frame.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["<program>", "<anonymous>", "<anonymous>"]);
    assert_eq!(error.traceback[0].position.line_number(), 2);
    assert_eq!(error.traceback[1].position.line_number(), 1);
    assert_eq!(error.traceback[2].position.line_number(), 2);
}

#[test]
fn call_errors_are_reported_at_the_call() {
    let message = rendered("fun add(a: Int, b: Int) => a + b\nadd(1)");

    assert!(message.contains("  File test.bzs, line 2, in <program>\n"));
    assert!(message.contains("Runtime Error: Too few arguments passed to add: expected 2, found \
                              1\n"));
    assert!(message.ends_with("add(1)\n^^^^^^"));
}
