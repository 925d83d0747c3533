use blazescript::{
    ast::{BinaryOperator, Expr, Program, StaticType},
    error::{ParseError, position::SourceFile},
    interpreter::{lexer::tokenize, parser::parse},
};

fn parse_source(src: &str) -> Result<Program, ParseError> {
    let source = SourceFile::new("test.bzs", src);
    let tokens = tokenize(&source).unwrap_or_else(|e| panic!("Failed to tokenize {src:?}:\n{e}"));
    parse(&tokens)
}

fn tree(src: &str) -> String {
    match parse_source(src) {
        Ok(program) => program.to_string(),
        Err(e) => panic!("Failed to parse {src:?}:\n{e}"),
    }
}

fn parse_error(src: &str) -> ParseError {
    match parse_source(src) {
        Ok(program) => panic!("Expected {src:?} to be rejected, got {program}"),
        Err(e) => e,
    }
}

#[test]
fn precedence_ladder() {
    assert_eq!(tree("val x: Int = 2 + 3 * 4"), "(val x: Int = (2 + (3 * 4)))");
    assert_eq!(tree("1 - 2 - 3"), "((1 - 2) - 3)");
    assert_eq!(tree("-2 ^ 2"), "(-(2 ^ 2))");
    assert_eq!(tree("2 ^ 3 ^ 2"), "(2 ^ (3 ^ 2))");
    assert_eq!(tree("a < b and not c == d or e"), "(((a < b) and (not (c == d))) or e)");
    assert_eq!(tree("(1 + 2) * 3"), "((1 + 2) * 3)");
}

#[test]
fn declarations_and_reassignment() {
    assert_eq!(tree("var count = 0"), "(var count = 0)");
    assert_eq!(tree("count = count + 1"), "(count = (count + 1))");
    assert_eq!(tree("val a = val b = 2"), "(val a = (val b = 2))");
}

#[test]
fn control_flow() {
    assert_eq!(tree("if a then 1 else if b then 2 else 3"),
               "(if a then 1 else if b then 2 else 3)");
    assert_eq!(tree("if a then\n  1\nelse\n  2"), "(if a then 1 else 2)");
    assert_eq!(tree("for i = 0 to 10 step 2 then i"), "(for i = 0 to 10 step 2 then i)");
    assert_eq!(tree("while n > 0 then n = n - 1"), "(while (n > 0) then (n = (n - 1)))");
}

#[test]
fn functions_and_calls() {
    assert_eq!(tree("fun add(a: Int, b: Int) => a + b"),
               "(fun add(a: Int, b: Int) => (a + b))");
    assert_eq!(tree("fun () => 1"), "(fun() => 1)");
    assert_eq!(tree("f(1, g(2))(3)"), "f(1, g(2))(3)");
    assert_eq!(tree("val f: Function: Float = fun (x: Float) => x"),
               "(val f: Function: Float = (fun(x: Float) => x))");
}

#[test]
fn statements_are_separated_by_newlines_and_semicolons() {
    let program = parse_source("\n\nval a = 1; val b = 2\n\na + b\n").unwrap();
    assert_eq!(program.statements.len(), 3);
    assert!(parse_source("").unwrap().statements.is_empty());
}

#[test]
fn static_types_are_inferred() {
    let program = parse_source("1.5 * 2.0\n1 < 2\nfun half(x: Float) => x / 2.0\nhalf(3.0)").unwrap();
    let types = program.statements.iter().map(Expr::static_type).collect::<Vec<_>>();

    assert_eq!(types,
               vec![StaticType::Float,
                    StaticType::Int,
                    StaticType::Function(Box::new(StaticType::Float)),
                    StaticType::Float]);
}

#[test]
fn mismatched_operands_are_rejected() {
    match parse_error("1 + \"x\"") {
        ParseError::OperandMismatch { operator, left, right, .. } => {
            assert_eq!(operator, BinaryOperator::Add);
            assert_eq!(left, StaticType::Int);
            assert_eq!(right, StaticType::String);
        },
        other => panic!("Unexpected error {other:?}"),
    }

    assert!(matches!(parse_error("1 == 1.0"), ParseError::OperandMismatch { .. }));
    assert!(matches!(parse_error("'a' + 1"), ParseError::OperandMismatch { .. }));
}

#[test]
fn unknown_operand_types_are_left_to_runtime() {
    assert!(parse_source("x + \"x\"").is_ok());
    assert!(parse_source("f(1) * 2.0").is_ok());
}

#[test]
fn annotations_are_checked() {
    assert!(matches!(parse_error("val x: Int = 1.5"),
                     ParseError::AnnotationMismatch { expected: StaticType::Int,
                                                      found: StaticType::Float,
                                                      .. }));
    assert!(matches!(parse_error("val x: Number = 1"), ParseError::UnknownType { .. }));
    assert!(matches!(parse_error("fun f(x) => x"), ParseError::MissingParameterType { .. }));
    assert!(matches!(parse_error("val f: Function: Int = fun () => \"s\""),
                     ParseError::AnnotationMismatch { .. }));
}

#[test]
fn branches_and_ranges_must_agree() {
    assert!(matches!(parse_error("if a then 1 else \"one\""),
                     ParseError::BranchMismatch { expected: StaticType::Int,
                                                  found: StaticType::String,
                                                  .. }));
    assert!(matches!(parse_error("if a then x else if b then 1 else 2.0"),
                     ParseError::BranchMismatch { .. }));
    assert!(matches!(parse_error("for i = 0 to 1.5 then i"),
                     ParseError::RangeMismatch { .. }));
    assert!(matches!(parse_error("for i = 0.0 to 1.0 step 1 then i"),
                     ParseError::RangeMismatch { .. }));
}

#[test]
fn arguments_are_checked_against_known_signatures() {
    match parse_error("fun half(x: Float) => x / 2.0\nhalf(3)") {
        ParseError::ArgumentMismatch { function,
                                       parameter,
                                       expected,
                                       found,
                                       .. } => {
            assert_eq!(function, "half");
            assert_eq!(parameter, "x");
            assert_eq!(expected, StaticType::Float);
            assert_eq!(found, StaticType::Int);
        },
        other => panic!("Unexpected error {other:?}"),
    }

    assert!(matches!(parse_error("fun fact(n: Int) => if n < 1 then 1 else n * fact(1.0)"),
                     ParseError::ArgumentMismatch { .. }));
    assert!(parse_source("fun half(x: Float) => x / 2.0\nhalf = 1\nhalf(3)").is_ok());
    assert!(parse_source("fun half(x: Float) => x\nfun g(half: Int) => half(1)").is_ok());
}

#[test]
fn syntax_errors_name_what_was_expected() {
    match parse_error("val = 3") {
        ParseError::UnexpectedToken { expected, found, .. } => {
            assert_eq!(expected, "a variable name");
            assert_eq!(found, "'='");
        },
        other => panic!("Unexpected error {other:?}"),
    }

    assert!(matches!(parse_error("if 1 2"), ParseError::UnexpectedToken { .. }));
    assert!(matches!(parse_error("fun f(a: Int => a"), ParseError::UnexpectedToken { .. }));
    assert!(matches!(parse_error("(1 + 2"), ParseError::UnexpectedToken { .. }));
}

#[test]
fn trailing_tokens_are_rejected() {
    match parse_error("1 + 2 3") {
        ParseError::UnexpectedTrailingToken { found, span } => {
            assert_eq!(found, "Int '3'");
            assert_eq!(span.start.column, 6);
        },
        other => panic!("Unexpected error {other:?}"),
    }
}

#[test]
fn failures_report_the_deepest_error() {
    match parse_error(")") {
        ParseError::UnexpectedToken { expected, .. } => assert!(expected.starts_with("'val'")),
        other => panic!("Unexpected error {other:?}"),
    }

    match parse_error("1 + )") {
        ParseError::UnexpectedToken { expected, span, .. } => {
            assert!(expected.starts_with("a literal"));
            assert_eq!(span.start.column, 4);
        },
        other => panic!("Unexpected error {other:?}"),
    }
}
