/// Dispatch of binary operators.
///
/// Routes each operator to its handler and builds the type mismatch error
/// shared by all of them.
pub mod core;

/// Arithmetic on numbers and string concatenation.
///
/// `Int` arithmetic is checked and reports overflow; division by zero is an
/// error for both `Int` and `Float`.
pub mod scalar;

/// Exponentiation.
pub mod power;

/// Equality and ordering comparisons, producing `1` or `0`.
pub mod comparison;

/// `and` and `or` over number truthiness.
pub mod logic;
