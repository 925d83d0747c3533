/// Parser state and the statement level of the grammar.
///
/// Holds the token cursor and the function signatures seen so far, and parses
/// programs, statements and `val`/`var` declarations.
pub mod core;

/// Binary operator parsing.
///
/// Implements the precedence ladder from `and`/`or` down to `^`, checking
/// that both operands of every operator have the same static type.
pub mod binary;

/// Unary operators, calls and atoms.
///
/// Parses prefix `+`/`-`, call suffixes, literals, variable access and
/// reassignment, and parenthesized expressions.
pub mod unary;

/// Control flow parsing.
///
/// Parses `if`, `for` and `while` expressions and the type agreement rules
/// between their parts.
pub mod control;

/// Function definitions and type annotations.
///
/// Parses `fun` definitions, typed parameters and type names, and keeps the
/// signature table used to type-check calls.
pub mod function;

/// Utility functions for the parser.
///
/// Token cursor helpers, expectation checks and the comma-separated list
/// parser shared by parameter and argument lists.
pub mod utils;

pub use self::core::{ParseResult, parse};
