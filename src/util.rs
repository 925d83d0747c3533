/// Numeric helpers.
///
/// Formatting and checked arithmetic shared by the lexer, the AST printer and
/// the runtime values, so numbers look and behave the same everywhere.
pub mod num;
