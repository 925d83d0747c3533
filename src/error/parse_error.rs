use crate::{
    ast::{BinaryOperator, StaticType},
    error::{position::Span, write_diagnostic},
};

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur while parsing, including the static
/// type checks performed on the tree as it is built.
pub enum ParseError {
    /// Found a token that cannot continue the construct being parsed.
    UnexpectedToken {
        /// What the parser was looking for.
        expected: String,
        /// The token encountered.
        found:    String,
        /// Where the token was found.
        span:     Span,
    },
    /// A statement was complete but more tokens followed it on the same line.
    UnexpectedTrailingToken {
        /// The extra token.
        found: String,
        /// Where the token was found.
        span:  Span,
    },
    /// A type annotation names no known type.
    UnknownType {
        /// The name used in the annotation.
        name: String,
        /// Where the annotation was found.
        span: Span,
    },
    /// A function parameter was declared without a type annotation.
    MissingParameterType {
        /// The name of the parameter.
        name: String,
        /// Where the parameter was declared.
        span: Span,
    },
    /// The operands of a binary operator have different static types.
    OperandMismatch {
        /// The operator being applied.
        operator:   BinaryOperator,
        /// Static type of the left operand.
        left:       StaticType,
        /// Static type of the right operand.
        right:      StaticType,
        /// Source of the left operand.
        left_span:  Span,
        /// Source of the right operand.
        right_span: Span,
    },
    /// A declaration's initializer does not have the annotated type.
    AnnotationMismatch {
        /// The name being declared.
        name:     String,
        /// The annotated type.
        expected: StaticType,
        /// The initializer's static type.
        found:    StaticType,
        /// Source of the initializer.
        span:     Span,
    },
    /// An `if` branch has a different type than the branches before it.
    BranchMismatch {
        /// The type of the earlier branches.
        expected: StaticType,
        /// The type of this branch.
        found:    StaticType,
        /// Source of the branch.
        span:     Span,
    },
    /// A `for` loop's end or step has a different type than its start.
    RangeMismatch {
        /// The loop type, taken from the start value.
        expected: StaticType,
        /// The type of the end or step value.
        found:    StaticType,
        /// Source of the end or step value.
        span:     Span,
    },
    /// An argument does not match the annotated type of its parameter.
    ArgumentMismatch {
        /// The function being called.
        function:  String,
        /// The parameter receiving the argument.
        parameter: String,
        /// The parameter's annotated type.
        expected:  StaticType,
        /// The argument's static type.
        found:     StaticType,
        /// Source of the argument.
        span:      Span,
    },
}

impl ParseError {
    /// The source range the error points at.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::OperandMismatch { left_span, right_span, .. } => left_span.to(right_span),
            Self::UnexpectedToken { span, .. }
            | Self::UnexpectedTrailingToken { span, .. }
            | Self::UnknownType { span, .. }
            | Self::MissingParameterType { span, .. }
            | Self::AnnotationMismatch { span, .. }
            | Self::BranchMismatch { span, .. }
            | Self::RangeMismatch { span, .. }
            | Self::ArgumentMismatch { span, .. } => span.clone(),
        }
    }

    /// The name of the error kind shown in diagnostics: `Invalid Syntax` for
    /// grammar errors and `Invalid Type` for failed static checks.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::UnexpectedToken { .. } | Self::UnexpectedTrailingToken { .. } => {
                "Invalid Syntax"
            },
            _ => "Invalid Type",
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let details = match self {
            Self::UnexpectedToken { expected, found, .. } => {
                format!("Expected {expected}, found {found}")
            },
            Self::UnexpectedTrailingToken { found, .. } => {
                format!("Expected an operator or the end of the statement, found {found}")
            },
            Self::UnknownType { name, .. } => format!("'{name}' is not a known type"),
            Self::MissingParameterType { name, .. } => {
                format!("Parameter '{name}' needs a type annotation")
            },
            Self::OperandMismatch { operator,
                                    left,
                                    right,
                                    left_span,
                                    right_span, } => {
                format!("Cannot apply '{operator}' to {left} (line {}, column {}) and {right} \
                         (line {}, column {})",
                        left_span.start.line_number(),
                        left_span.start.column + 1,
                        right_span.start.line_number(),
                        right_span.start.column + 1)
            },
            Self::AnnotationMismatch { name, expected, found, .. } => {
                format!("'{name}' is declared as {expected} but initialized with {found}")
            },
            Self::BranchMismatch { expected, found, .. } => {
                format!("Branch has type {found} but earlier branches have type {expected}")
            },
            Self::RangeMismatch { expected, found, .. } => {
                format!("Loop bound has type {found} but the loop starts at a {expected}")
            },
            Self::ArgumentMismatch { function,
                                     parameter,
                                     expected,
                                     found,
                                     .. } => {
                format!("Parameter '{parameter}' of {function} expects {expected} but was given \
                         {found}")
            },
        };

        write_diagnostic(f, self.name(), &details, &self.span())
    }
}

impl std::error::Error for ParseError {}
