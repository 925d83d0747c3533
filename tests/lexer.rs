use blazescript::{
    error::{LexError, position::SourceFile},
    interpreter::lexer::{Keyword, TokenKind, tokenize},
};

fn kinds(src: &str) -> Vec<TokenKind> {
    let source = SourceFile::new("test.bzs", src);
    match tokenize(&source) {
        Ok(tokens) => tokens.into_iter().map(|token| token.kind).collect(),
        Err(e) => panic!("Failed to tokenize {src:?}:\n{e}"),
    }
}

fn lex_error(src: &str) -> LexError {
    let source = SourceFile::new("test.bzs", src);
    match tokenize(&source) {
        Ok(tokens) => panic!("Expected {src:?} to be rejected, got {tokens:?}"),
        Err(e) => e,
    }
}

fn ident(name: &str) -> TokenKind {
    TokenKind::Identifier(name.to_string())
}

#[test]
fn declaration_tokens() {
    assert_eq!(kinds("val x: Int = 2 + 3 * 4"),
               vec![TokenKind::Keyword(Keyword::Val),
                    ident("x"),
                    TokenKind::Colon,
                    ident("Int"),
                    TokenKind::Equals,
                    TokenKind::Int(2),
                    TokenKind::Plus,
                    TokenKind::Int(3),
                    TokenKind::Multiply,
                    TokenKind::Int(4),
                    TokenKind::Eof]);
}

#[test]
fn operators_prefer_the_longest_match() {
    assert_eq!(kinds("= == => != < <= > >= ^ / -"),
               vec![TokenKind::Equals,
                    TokenKind::DoubleEquals,
                    TokenKind::Arrow,
                    TokenKind::NotEquals,
                    TokenKind::LessThan,
                    TokenKind::LessThanEquals,
                    TokenKind::GreaterThan,
                    TokenKind::GreaterThanEquals,
                    TokenKind::Power,
                    TokenKind::Divide,
                    TokenKind::Minus,
                    TokenKind::Eof]);
}

#[test]
fn symbolic_logical_operators_are_keywords() {
    assert_eq!(kinds("a && b || !c"),
               vec![ident("a"),
                    TokenKind::Keyword(Keyword::And),
                    ident("b"),
                    TokenKind::Keyword(Keyword::Or),
                    TokenKind::Keyword(Keyword::Not),
                    ident("c"),
                    TokenKind::Eof]);
}

#[test]
fn keywords_are_not_prefixes_of_identifiers() {
    assert_eq!(kinds("value variable format iffy"),
               vec![ident("value"),
                    ident("variable"),
                    ident("format"),
                    ident("iffy"),
                    TokenKind::Eof]);
    assert_eq!(kinds("fun while step"),
               vec![TokenKind::Keyword(Keyword::Fun),
                    TokenKind::Keyword(Keyword::While),
                    TokenKind::Keyword(Keyword::Step),
                    TokenKind::Eof]);
}

#[test]
fn numbers() {
    assert_eq!(kinds("42 3.25 2. .5"),
               vec![TokenKind::Int(42),
                    TokenKind::Float(3.25),
                    TokenKind::Float(2.0),
                    TokenKind::Float(0.5),
                    TokenKind::Eof]);
}

#[test]
fn strings_and_chars() {
    assert_eq!(kinds(r#""line\nnext\ttab \"quoted\" \\" 'c'"#),
               vec![TokenKind::String("line\nnext\ttab \"quoted\" \\".to_string()),
                    TokenKind::Char('c'),
                    TokenKind::Eof]);
    assert_eq!(kinds(r#""""#), vec![TokenKind::String(String::new()), TokenKind::Eof]);
}

#[test]
fn newlines_semicolons_and_comments() {
    assert_eq!(kinds("a @ the rest is ignored ; 1 + 2\nb; c"),
               vec![ident("a"),
                    TokenKind::Newline,
                    ident("b"),
                    TokenKind::Newline,
                    ident("c"),
                    TokenKind::Eof]);
    assert_eq!(kinds(" \t\r\n"), vec![TokenKind::Newline, TokenKind::Eof]);
}

#[test]
fn illegal_characters_are_rejected() {
    match lex_error("val x = 1 # 2") {
        LexError::IllegalCharacter { character, span } => {
            assert_eq!(character, '#');
            assert_eq!(span.start.column, 10);
            assert_eq!(span.start.line_number(), 1);
        },
        other => panic!("Unexpected error {other:?}"),
    }

    assert!(matches!(lex_error("1 $ 2"), LexError::IllegalCharacter { character: '$', .. }));
}

#[test]
fn incomplete_tokens_are_rejected() {
    assert!(matches!(lex_error("a & b"), LexError::ExpectedCharacter { .. }));
    assert!(matches!(lex_error("a | b"), LexError::ExpectedCharacter { .. }));
    assert!(matches!(lex_error("'ab'"), LexError::ExpectedCharacter { .. }));
    assert!(matches!(lex_error("''"), LexError::ExpectedCharacter { .. }));
    assert!(matches!(lex_error("\"never closed"), LexError::UnterminatedString { .. }));
    assert!(matches!(lex_error("99999999999999999999"), LexError::LiteralTooLarge { .. }));
}

#[test]
fn spans_track_lines_and_columns() {
    let source = SourceFile::new("test.bzs", "val a = 1\n  a + 22");
    let tokens = tokenize(&source).unwrap();

    let literal = tokens.iter()
                        .find(|token| token.kind == TokenKind::Int(22))
                        .unwrap();
    assert_eq!(literal.span.start.line_number(), 2);
    assert_eq!(literal.span.start.column, 6);
    assert_eq!(literal.span.end.column, 8);
    assert_eq!(literal.span.start.file_name(), "test.bzs");

    let eof = tokens.last().unwrap();
    assert_eq!(eof.kind, TokenKind::Eof);
    assert_eq!(eof.span.start.index, source.text().len());
}
