use std::{fmt, rc::Rc};

use log::trace;
use logos::{Lexer, Logos};

use crate::{
    error::{
        LexError,
        position::{Position, SourceFile, Span},
    },
    util::num::format_float,
};

/// The reserved words of the language.
///
/// `&&`, `||` and `!` are spellings of [`Keyword::And`], [`Keyword::Or`] and
/// [`Keyword::Not`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Val,
    Var,
    And,
    Or,
    Not,
    If,
    Then,
    Else,
    For,
    To,
    Step,
    While,
    Fun,
}

impl Keyword {
    /// The keyword as written in source.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Val => "val",
            Self::Var => "var",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::If => "if",
            Self::Then => "then",
            Self::Else => "else",
            Self::For => "for",
            Self::To => "to",
            Self::Step => "step",
            Self::While => "while",
            Self::Fun => "fun",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why the lexer rejected a slice of input. Turned into a [`LexError`] with a
/// span by [`tokenize`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LexFailure {
    /// Nothing matched the input.
    #[default]
    IllegalCharacter,
    /// A token was cut short; holds what was expected instead.
    ExpectedCharacter(&'static str),
    UnterminatedString,
    LiteralTooLarge,
}

/// Represents the kind of a lexical token, with the literal payload for
/// numbers, strings, chars, keywords and identifiers.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(error = LexFailure)]
pub enum TokenKind {
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_int)]
    Int(i64),
    /// Numeric literal tokens with a fractional part, such as `3.14`, `2.` or
    /// `.5`.
    #[regex(r"[0-9]+\.[0-9]*", parse_float)]
    #[regex(r"\.[0-9]+", parse_float)]
    Float(f64),
    /// `"double quoted"` string literals with `\n` and `\t` escapes.
    #[token("\"", lex_string)]
    String(String),
    /// `'c'`
    #[token("'", lex_char)]
    Char(char),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Multiply,
    /// `/`
    #[token("/")]
    Divide,
    /// `^`
    #[token("^")]
    Power,
    /// `(`
    #[token("(")]
    LeftParen,
    /// `)`
    #[token(")")]
    RightParen,
    /// `:`
    #[token(":")]
    Colon,
    /// `,`
    #[token(",")]
    Comma,
    /// `=>`
    #[token("=>")]
    Arrow,
    /// `=`
    #[token("=")]
    Equals,
    /// `==`
    #[token("==")]
    DoubleEquals,
    /// `!=`
    #[token("!=")]
    NotEquals,
    /// `<`
    #[token("<")]
    LessThan,
    /// `<=`
    #[token("<=")]
    LessThanEquals,
    /// `>`
    #[token(">")]
    GreaterThan,
    /// `>=`
    #[token(">=")]
    GreaterThanEquals,
    /// Reserved words.
    #[token("val", |_| Keyword::Val)]
    #[token("var", |_| Keyword::Var)]
    #[token("and", |_| Keyword::And)]
    #[token("&&", |_| Keyword::And)]
    #[token("&", lone_ampersand)]
    #[token("or", |_| Keyword::Or)]
    #[token("||", |_| Keyword::Or)]
    #[token("|", lone_pipe)]
    #[token("not", |_| Keyword::Not)]
    #[token("!", |_| Keyword::Not)]
    #[token("if", |_| Keyword::If)]
    #[token("then", |_| Keyword::Then)]
    #[token("else", |_| Keyword::Else)]
    #[token("for", |_| Keyword::For)]
    #[token("to", |_| Keyword::To)]
    #[token("step", |_| Keyword::Step)]
    #[token("while", |_| Keyword::While)]
    #[token("fun", |_| Keyword::Fun)]
    Keyword(Keyword),
    /// Identifier tokens; variable, function and type names such as `x` or
    /// `Int`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// Line breaks and `;` separate statements.
    #[token("\n")]
    #[token(";")]
    Newline,
    /// `@ Comments.`
    #[regex(r"@[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Whitespace,
    /// End of input. Appended by [`tokenize`], never matched.
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Int(value) => return write!(f, "Int '{value}'"),
            Self::Float(value) => return write!(f, "Float '{}'", format_float(*value)),
            Self::String(value) => return write!(f, "String \"{}\"", value.escape_debug()),
            Self::Char(value) => return write!(f, "Char '{}'", value.escape_debug()),
            Self::Keyword(keyword) => return write!(f, "'{keyword}'"),
            Self::Identifier(name) => return write!(f, "identifier '{name}'"),
            Self::Newline => return f.write_str("end of line"),
            Self::Eof | Self::Comment | Self::Whitespace => return f.write_str("end of input"),
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Power => "^",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::Colon => ":",
            Self::Comma => ",",
            Self::Arrow => "=>",
            Self::Equals => "=",
            Self::DoubleEquals => "==",
            Self::NotEquals => "!=",
            Self::LessThan => "<",
            Self::LessThanEquals => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanEquals => ">=",
        };

        write!(f, "'{symbol}'")
    }
}

/// A token together with the source range it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Splits a source file into tokens, ending with [`TokenKind::Eof`].
///
/// Lexing does not recover: the first illegal input aborts the pass.
///
/// # Example
/// ```
/// use blazescript::{
///     error::position::SourceFile,
///     interpreter::lexer::{Keyword, TokenKind, tokenize},
/// };
///
/// let source = SourceFile::new("main.bzs", "val x = 1");
/// let kinds: Vec<TokenKind> = tokenize(&source).unwrap().into_iter().map(|t| t.kind).collect();
///
/// assert_eq!(kinds,
///            vec![TokenKind::Keyword(Keyword::Val),
///                 TokenKind::Identifier("x".to_string()),
///                 TokenKind::Equals,
///                 TokenKind::Int(1),
///                 TokenKind::Eof]);
/// ```
pub fn tokenize(source: &Rc<SourceFile>) -> Result<Vec<Token>, LexError> {
    trace!("Lexing {}", source.name());

    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source.text());

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let span = Span::new(Position::new(source, range.start), Position::new(source, range.end));

        match result {
            Ok(kind) => tokens.push(Token { kind, span }),
            Err(failure) => return Err(into_error(failure, lexer.slice(), span)),
        }
    }

    let end = Position::new(source, source.text().len());
    tokens.push(Token { kind: TokenKind::Eof,
                        span: Span::new(end.clone(), end), });

    trace!("Tokens {:?}", tokens.iter().map(|token| &token.kind).collect::<Vec<_>>());

    Ok(tokens)
}

fn into_error(failure: LexFailure, slice: &str, span: Span) -> LexError {
    match failure {
        LexFailure::IllegalCharacter => {
            LexError::IllegalCharacter { character: slice.chars().next().unwrap_or_default(),
                                         span }
        },
        LexFailure::ExpectedCharacter(expected) => {
            LexError::ExpectedCharacter { expected: expected.to_string(),
                                          span }
        },
        LexFailure::UnterminatedString => LexError::UnterminatedString { span },
        LexFailure::LiteralTooLarge => LexError::LiteralTooLarge { literal: slice.to_string(),
                                                                   span },
    }
}

fn parse_int(lex: &Lexer<TokenKind>) -> Result<i64, LexFailure> {
    lex.slice().parse().map_err(|_| LexFailure::LiteralTooLarge)
}

fn parse_float(lex: &Lexer<TokenKind>) -> Result<f64, LexFailure> {
    lex.slice().parse().map_err(|_| LexFailure::LiteralTooLarge)
}

fn lone_ampersand(_: &Lexer<TokenKind>) -> Result<Keyword, LexFailure> {
    Err(LexFailure::ExpectedCharacter("one more '&'"))
}

fn lone_pipe(_: &Lexer<TokenKind>) -> Result<Keyword, LexFailure> {
    Err(LexFailure::ExpectedCharacter("one more '|'"))
}

/// Reads the body of a string literal after its opening quote.
///
/// `\n` and `\t` become a newline and a tab, any other escaped character is
/// kept as is.
fn lex_string(lex: &mut Lexer<TokenKind>) -> Result<String, LexFailure> {
    let rest = lex.remainder();
    let mut value = String::new();
    let mut consumed = None;
    let mut chars = rest.char_indices();

    while let Some((offset, character)) = chars.next() {
        match character {
            '"' => {
                consumed = Some(offset + 1);
                break;
            },
            '\\' => match chars.next() {
                Some((_, 'n')) => value.push('\n'),
                Some((_, 't')) => value.push('\t'),
                Some((_, escaped)) => value.push(escaped),
                None => break,
            },
            _ => value.push(character),
        }
    }

    let length = rest.len();
    match consumed {
        Some(consumed) => {
            lex.bump(consumed);
            Ok(value)
        },
        None => {
            lex.bump(length);
            Err(LexFailure::UnterminatedString)
        },
    }
}

/// Reads exactly one character and the closing quote of a char literal.
fn lex_char(lex: &mut Lexer<TokenKind>) -> Result<char, LexFailure> {
    let mut chars = lex.remainder().chars();

    let Some(value) = chars.next() else {
        return Err(LexFailure::ExpectedCharacter("a character after the opening quote"));
    };
    let closed = chars.next() == Some('\'');

    if closed {
        lex.bump(value.len_utf8() + 1);
        Ok(value)
    } else {
        lex.bump(value.len_utf8());
        Err(LexFailure::ExpectedCharacter("a closing quote"))
    }
}
