use std::fmt;

use crate::{
    ast::StaticType,
    error::position::{Position, Span},
};

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur during evaluation.
pub enum RuntimeErrorKind {
    /// Tried to use a name that is bound nowhere in the scope chain.
    UndefinedVariable {
        /// The name of the variable.
        name: String,
    },
    /// Tried to assign to a `val`, a function name or a parameter.
    ConstantReassignment {
        /// The name of the constant.
        name: String,
    },
    /// A value does not match the type its variable was declared with.
    DeclaredTypeMismatch {
        /// The name of the variable.
        name:     String,
        /// The declared type.
        expected: StaticType,
        /// The type of the assigned value.
        found:    StaticType,
    },
    /// A binary operator was applied to operands it does not support.
    TypeMismatch {
        /// The operator as written.
        operator: String,
        /// Type of the left operand.
        left:     StaticType,
        /// Type of the right operand.
        right:    StaticType,
    },
    /// A unary operator was applied to an operand it does not support.
    UnsupportedOperator {
        /// The operator as written.
        operator: String,
        /// Type of the operand.
        operand:  StaticType,
    },
    /// A number was expected, for instance in a condition or loop bound.
    ExpectedNumber {
        /// The type that was found instead.
        found: StaticType,
    },
    /// An expression that produces no value was used where one is needed.
    MissingValue,
    DivisionByZero,
    /// Integer arithmetic left the 64-bit range.
    Overflow,
    /// An `Int` was raised to a negative power.
    NegativeExponent,
    /// Loop bounds are invalid or nonsensical.
    InvalidLoopBounds {
        /// Details describing why the bounds are invalid.
        details: String,
    },
    /// Called something that is not a function.
    NotCallable {
        /// The type of the called value.
        found: StaticType,
    },
    /// A function was called with the wrong number of arguments.
    ArgumentCount {
        /// The name of the function.
        function: String,
        /// The number of parameters.
        expected: usize,
        /// The number of arguments passed.
        found:    usize,
    },
    /// An argument does not match the annotated type of its parameter.
    ArgumentType {
        /// The name of the function.
        function:  String,
        /// The name of the parameter.
        parameter: String,
        /// The annotated type.
        expected:  StaticType,
        /// The type of the argument.
        found:     StaticType,
    },
    /// Function calls nested deeper than the configured limit.
    CallDepthExceeded {
        /// The configured limit.
        limit: usize,
    },
}

impl fmt::Display for RuntimeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndefinedVariable { name } => write!(f, "'{name}' is not defined"),
            Self::ConstantReassignment { name } => {
                write!(f, "Cannot reassign a constant: '{name}'")
            },
            Self::DeclaredTypeMismatch { name, expected, found } => {
                write!(f, "'{name}' is declared as {expected} but was given {found}")
            },
            Self::TypeMismatch { operator, left, right } => {
                write!(f, "Illegal operation: {left} {operator} {right}")
            },
            Self::UnsupportedOperator { operator, operand } => {
                write!(f, "Illegal operation: {operator} {operand}")
            },
            Self::ExpectedNumber { found } => write!(f, "Expected a number, found {found}"),
            Self::MissingValue => write!(f, "Expression did not produce a value"),
            Self::DivisionByZero => write!(f, "Division by zero"),
            Self::Overflow => write!(f, "Integer overflow while computing the result"),
            Self::NegativeExponent => {
                write!(f, "An Int cannot be raised to a negative power, use a Float instead")
            },
            Self::InvalidLoopBounds { details } => write!(f, "Invalid loop bounds: {details}"),
            Self::NotCallable { found } => write!(f, "{found} is not callable"),
            Self::ArgumentCount { function,
                                  expected,
                                  found, } => {
                let amount = if found > expected { "many" } else { "few" };
                write!(f,
                       "Too {amount} arguments passed to {function}: expected {expected}, found \
                        {found}")
            },
            Self::ArgumentType { function,
                                 parameter,
                                 expected,
                                 found, } => write!(f,
                                                    "Parameter '{parameter}' of {function} \
                                                     expects {expected} but was given {found}"),
            Self::CallDepthExceeded { limit } => {
                write!(f, "Maximum call depth of {limit} exceeded")
            },
        }
    }
}

/// One line of a traceback: the frame's name and where execution was inside
/// it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Display name of the context, such as `<program>` or a function name.
    pub name:     String,
    /// Where the frame was executing when the error occurred.
    pub position: Position,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,
               "File {}, line {}, in {}",
               self.position.file_name(),
               self.position.line_number(),
               self.name)
    }
}

/// An error raised during evaluation, with the span it was raised at and the
/// call stack at that moment.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub kind:      RuntimeErrorKind,
    pub span:      Span,
    /// Frames from the outermost context to the one the error was raised in.
    pub traceback: Vec<Frame>,
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Traceback (most recent call last):")?;
        for frame in &self.traceback {
            writeln!(f, "  {frame}")?;
        }
        write!(f, "Runtime Error: {}\n\n{}", self.kind, self.span.excerpt().trim_end())
    }
}

impl std::error::Error for RuntimeError {}
