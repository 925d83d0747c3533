/// The runtime value type.
///
/// Defines `Value`, the closed set of variants every expression evaluates
/// to, together with its runtime type, truthiness and display form.
pub mod core;
/// Function values.
///
/// Defines `Function`, a callable value pairing a shared definition with the
/// context it was defined in, which makes closures lexical.
pub mod function;
