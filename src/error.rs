/// Lexing errors.
///
/// Errors raised while splitting source text into tokens: illegal
/// characters, incomplete two-character operators, unterminated literals.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur during parsing, covering both
/// grammar mistakes (`Invalid Syntax`) and the static type checks performed
/// while the tree is built (`Invalid Type`).
pub mod parse_error;
/// Source locations.
///
/// Positions and spans point into a shared [`position::SourceFile`] so every
/// diagnostic can name the file and quote the offending line.
pub mod position;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation, together
/// with the traceback of the contexts active when the error occurred.
pub mod runtime_error;

use std::fmt;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::{RuntimeError, RuntimeErrorKind};

use crate::error::position::Span;

/// The failure of a whole run: exactly one phase failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Lexing stopped at the first illegal input. Lexing never recovers, so
    /// the list holds a single entry.
    #[error("{}", join_lines(.0))]
    Lexical(Vec<LexError>),
    /// The tokens did not form a well-typed program.
    #[error(transparent)]
    Syntax(#[from] ParseError),
    /// Evaluation failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl From<LexError> for Error {
    fn from(error: LexError) -> Self {
        Self::Lexical(vec![error])
    }
}

fn join_lines(errors: &[LexError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n\n")
}

/// Writes the common layout shared by lexing and parsing diagnostics: the
/// error name and details, the file and line, and the quoted source.
pub(crate) fn write_diagnostic(f: &mut fmt::Formatter<'_>,
                               name: &str,
                               details: &str,
                               span: &Span)
                               -> fmt::Result {
    write!(f, "{name}: {details}\n{span}\n\n{}", span.excerpt().trim_end())
}
