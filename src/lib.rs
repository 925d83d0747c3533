//! # blazescript
//!
//! blazescript is an interpreter for BlazeScript, a small statically checked
//! scripting language written in Rust. Source text is tokenized, parsed into
//! a typed syntax tree and evaluated by a tree-walking interpreter with
//! lexically scoped closures and tracebacks.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` enum and related types that represent a
/// program as a tree. The AST is built by the parser and traversed by the
/// evaluator. Each node records its source span and, where it can be
/// determined before running, its static type.
///
/// # Responsibilities
/// - Defines expression types for all language constructs.
/// - Defines the static types used by annotations and type checks.
/// - Renders trees in a parenthesized form for diagnostics.
pub mod ast;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// This module defines all errors that can be raised while running code,
/// together with the source positions they point at. Every error renders as
/// a multi-line message naming the file and line and quoting the source.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Tracks positions and spans in named source files.
/// - Combines the phase errors into the crate-level [`Error`](error::Error).
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, name binding and evaluation
/// into a complete runtime for BlazeScript programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, contexts and
///   value types.
/// - Provides entry points for each phase.
pub mod interpreter;
/// Long-lived interpreter state owned by the host.
///
/// A `Session` runs one program after another. Whether globals survive from
/// one run to the next is part of its configuration, which is how the REPL
/// keeps definitions between lines.
///
/// # Responsibilities
/// - Runs the whole pipeline on a named source text.
/// - Holds the call depth limit and the persistence setting.
pub mod session;
/// General utilities shared by several phases.
///
/// # Responsibilities
/// - Format floats so they always read as floats.
/// - Provide checked integer exponentiation.
pub mod util;

pub use error::Error;
pub use interpreter::evaluator::core::DEFAULT_MAX_CALL_DEPTH;
pub use session::{Session, SessionConfig};

use crate::interpreter::value::core::Value;

/// Runs a program with a fresh global context and returns the value of its
/// last statement.
///
/// # Parameters
/// - `name`: The name reported in diagnostics, usually a file name.
/// - `source`: The program text.
///
/// # Errors
/// The first lexical, syntax, type or runtime error.
///
/// # Examples
/// ```
/// use blazescript::{Error, interpreter::value::core::Value, run};
///
/// let result = run("main.bzs", "fun add(a: Int, b: Int) => a + b\nadd(2, 3)");
/// assert_eq!(result.unwrap(), Some(Value::Int(5)));
///
/// // 'x' is not defined
/// let result = run("main.bzs", "val y = x + 1");
/// assert!(matches!(result, Err(Error::Runtime(_))));
/// ```
pub fn run(name: &str, source: &str) -> Result<Option<Value>, Error> {
    Session::default().run(name, source)
}
