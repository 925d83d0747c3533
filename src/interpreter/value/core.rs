use std::{fmt, rc::Rc};

use crate::{
    ast::{Number, StaticType},
    error::RuntimeErrorKind,
    interpreter::value::function::Function,
    util::num::format_float,
};

/// Represents a runtime value in the interpreter.
///
/// `Int` and `Float` are distinct variants fixed when the value is created;
/// no operation converts one into the other implicitly. Truth values are
/// `Int`s: comparisons produce `1` or `0` and conditions treat any nonzero
/// number as true.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// An immutable string, shared between copies.
    String(Rc<str>),
    /// A single character.
    Char(char),
    /// A function together with its closure.
    Function(Function),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(Rc::from(v))
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Self::Char(v)
    }
}

impl From<Number> for Value {
    fn from(number: Number) -> Self {
        match number {
            Number::Int(v) => Self::Int(v),
            Number::Float(v) => Self::Float(v),
        }
    }
}

impl Value {
    /// The runtime type of the value, in the same vocabulary as type
    /// annotations.
    ///
    /// # Example
    /// ```
    /// use blazescript::{ast::StaticType, interpreter::value::core::Value};
    ///
    /// assert_eq!(Value::Int(4).value_type(), StaticType::Int);
    /// assert_eq!(Value::Float(4.0).value_type(), StaticType::Float);
    /// ```
    #[must_use]
    pub fn value_type(&self) -> StaticType {
        match self {
            Self::Int(_) => StaticType::Int,
            Self::Float(_) => StaticType::Float,
            Self::String(_) => StaticType::String,
            Self::Char(_) => StaticType::Char,
            Self::Function(function) => function.static_type(),
        }
    }

    /// Interprets the value as a condition: nonzero numbers are true.
    ///
    /// # Errors
    /// `ExpectedNumber` for strings, chars and functions.
    ///
    /// # Example
    /// ```
    /// use blazescript::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Int(2).is_truthy(), Ok(true));
    /// assert_eq!(Value::Float(0.0).is_truthy(), Ok(false));
    /// assert!(Value::from("yes").is_truthy().is_err());
    /// ```
    pub fn is_truthy(&self) -> Result<bool, RuntimeErrorKind> {
        match self {
            Self::Int(v) => Ok(*v != 0),
            Self::Float(v) => Ok(*v != 0.0),
            _ => Err(RuntimeErrorKind::ExpectedNumber { found: self.value_type() }),
        }
    }
}

/// Renders values the way the REPL prints them: numbers and characters as
/// written, strings without quotes, functions as `<function name>`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => f.write_str(&format_float(*v)),
            Self::String(v) => f.write_str(v),
            Self::Char(v) => write!(f, "{v}"),
            Self::Function(function) => write!(f, "{function}"),
        }
    }
}
