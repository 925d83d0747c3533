use crate::error::{position::Span, write_diagnostic};

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur while splitting source text into
/// tokens. Lexing stops at the first of them.
pub enum LexError {
    /// A character that cannot start any token.
    IllegalCharacter {
        /// The offending character.
        character: char,
        /// Where the character was found.
        span:      Span,
    },
    /// A token that needs a second character did not get it, such as a lone
    /// `&` or a char literal without its closing quote.
    ExpectedCharacter {
        /// What was expected instead.
        expected: String,
        /// The incomplete token.
        span:     Span,
    },
    /// A string literal ran to the end of the input.
    UnterminatedString {
        /// The string literal up to the end of the input.
        span: Span,
    },
    /// An integer literal does not fit in 64 bits.
    LiteralTooLarge {
        /// The literal as written.
        literal: String,
        /// Where the literal was found.
        span:    Span,
    },
}

impl LexError {
    /// The source range the error points at.
    #[must_use]
    pub const fn span(&self) -> &Span {
        match self {
            Self::IllegalCharacter { span, .. }
            | Self::ExpectedCharacter { span, .. }
            | Self::UnterminatedString { span }
            | Self::LiteralTooLarge { span, .. } => span,
        }
    }

    /// The name of the error kind shown in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::IllegalCharacter { .. } => "Illegal Character",
            Self::ExpectedCharacter { .. } | Self::UnterminatedString { .. } => {
                "Expected Character"
            },
            Self::LiteralTooLarge { .. } => "Invalid Literal",
        }
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let details = match self {
            Self::IllegalCharacter { character, .. } => {
                format!("Unexpected character '{}'", character.escape_debug())
            },
            Self::ExpectedCharacter { expected, .. } => format!("Expected {expected}"),
            Self::UnterminatedString { .. } => {
                "Unterminated string, expected a closing '\"'".to_string()
            },
            Self::LiteralTooLarge { literal, .. } => {
                format!("Integer literal '{literal}' does not fit in 64 bits")
            },
        };

        write_diagnostic(f, self.name(), &details, self.span())
    }
}

impl std::error::Error for LexError {}
