use log::trace;

use crate::{
    ast::{Expr, Program},
    error::ParseError,
    interpreter::{
        lexer::{Keyword, Token, TokenKind},
        parser::function::SignatureScope,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// What may start a statement, reported when a statement fails to parse
/// before consuming any token.
pub(super) const STATEMENT_START: &str =
    "'val', 'var', 'not', '+', '-', '(', a literal, an identifier, 'if', 'for', 'while' or \
     'fun'";

/// Recursive-descent parser over a token slice.
///
/// Besides the cursor, the parser keeps one table of function signatures per
/// function body being parsed, so calls to functions defined earlier can be
/// type-checked.
pub struct Parser<'a> {
    pub(super) tokens: &'a [Token],
    pub(super) cursor: usize,
    pub(super) scopes: Vec<SignatureScope>,
}

/// Parses the tokens of a whole source text.
///
/// `tokens` is expected to come from
/// [`tokenize`](crate::interpreter::lexer::tokenize) and to end with
/// [`TokenKind::Eof`].
///
/// # Errors
/// Returns the first `Invalid Syntax` or `Invalid Type` error found.
///
/// # Example
/// ```
/// use blazescript::{
///     error::position::SourceFile,
///     interpreter::{lexer::tokenize, parser::parse},
/// };
///
/// let source = SourceFile::new("main.bzs", "val x: Int = 2 + 3 * 4");
/// let program = parse(&tokenize(&source).unwrap()).unwrap();
///
/// assert_eq!(program.to_string(), "(val x: Int = (2 + (3 * 4)))");
/// ```
pub fn parse(tokens: &[Token]) -> ParseResult<Program> {
    if tokens.is_empty() {
        return Ok(Program::default());
    }

    Parser::new(tokens).parse_program()
}

impl<'a> Parser<'a> {
    pub(crate) fn new(tokens: &'a [Token]) -> Self {
        Self { tokens,
               cursor: 0,
               scopes: vec![SignatureScope::new()] }
    }

    /// Parses statements until the end of input.
    ///
    /// Grammar: `program := NEWLINE* (statement (NEWLINE+ statement)*)? NEWLINE* EOF`
    ///
    /// # Errors
    /// Besides the errors of [`Parser::parse_statement`], a token left over
    /// after a complete statement is an `UnexpectedTrailingToken` error.
    pub fn parse_program(&mut self) -> ParseResult<Program> {
        let mut statements = Vec::new();

        loop {
            self.skip_newlines();
            if self.check(&TokenKind::Eof) {
                break;
            }

            statements.push(self.parse_statement()?);

            let token = self.peek();
            if !matches!(token.kind, TokenKind::Newline | TokenKind::Eof) {
                return Err(ParseError::UnexpectedTrailingToken { found: token.kind.to_string(),
                                                                 span:  token.span.clone(), });
            }
        }

        let program = Program { statements };
        trace!("Parsed {program:#?}");

        Ok(program)
    }

    /// Parses a statement: a declaration or an expression.
    ///
    /// Grammar: `statement := ("val" | "var") IDENT (":" type)? "=" statement
    ///                      | logical`
    ///
    /// # Returns
    /// An `Expr::VarAssign` for declarations, otherwise the expression.
    ///
    /// # Errors
    /// When nothing could be consumed, an `UnexpectedToken` error listing
    /// what may start a statement. Otherwise the deepest error raised by the
    /// rules below.
    pub fn parse_statement(&mut self) -> ParseResult<Expr> {
        match self.peek().kind {
            TokenKind::Keyword(Keyword::Val) => self.parse_declaration(false),
            TokenKind::Keyword(Keyword::Var) => self.parse_declaration(true),
            _ => {
                let start = self.cursor;
                self.parse_logical()
                    .map_err(|error| self.deepest(start, error, STATEMENT_START))
            },
        }
    }

    /// Parses a `val` or `var` declaration, checking the initializer against
    /// the annotation when one is given.
    ///
    /// # Parameters
    /// - `reassignable`: `true` for `var`, `false` for `val`.
    ///
    /// # Errors
    /// - `UnexpectedToken` if the name or `=` is missing.
    /// - `UnknownType` for an unrecognized annotation.
    /// - `AnnotationMismatch` if the initializer's static type disagrees with
    ///   the annotation.
    fn parse_declaration(&mut self, reassignable: bool) -> ParseResult<Expr> {
        let keyword = self.advance();
        let (name, _) = self.expect_identifier("a variable name")?;

        let declared = if self.check(&TokenKind::Colon) {
            self.advance();
            Some(self.parse_type()?)
        } else {
            None
        };

        self.expect(&TokenKind::Equals, "'='")?;
        let value = self.parse_statement()?;

        if let Some(declared) = &declared {
            let found = value.static_type();
            if !declared.agrees_with(&found) {
                return Err(ParseError::AnnotationMismatch { name,
                                                            expected: declared.clone(),
                                                            found,
                                                            span: value.span().clone() });
            }
        }

        self.record_binding(&name, &value);
        let span = keyword.span.to(value.span());

        Ok(Expr::VarAssign { name,
                             declared,
                             value: Box::new(value),
                             reassignable,
                             span })
    }
}
