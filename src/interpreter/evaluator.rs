/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operations on runtime values:
/// arithmetic, exponentiation, comparisons and the logical operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements prefix `+`, arithmetic negation and logical `not`.
pub mod unary;

/// Core evaluation logic.
///
/// Contains the `Interpreter`, the exhaustive dispatch over expression
/// kinds and the construction of runtime errors with their traceback.
pub mod core;

/// Evaluation of for-loop expressions.
///
/// Validates the bounds, binds the loop variable and executes the loop body
/// in the current context.
pub mod for_loop;

/// Evaluation helpers for individual node kinds.
///
/// Variable access, declarations and reassignments, operator nodes,
/// conditionals and `while` loops.
pub mod utils;

/// Function evaluation.
///
/// Creates closures, evaluates calls, checks arity, argument types and call
/// depth, and runs function bodies in their own activation context.
pub mod function;
