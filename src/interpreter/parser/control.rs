use crate::{
    ast::{Branch, Expr, ForHeader, StaticType},
    error::ParseError,
    interpreter::{
        lexer::{Keyword, TokenKind},
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses an `if` expression with chained `else if` branches and an
    /// optional `else`.
    ///
    /// Syntax:
    /// ```text
    ///     if <condition> then <body>
    ///     else if <condition> then <body>
    ///     else <body>
    /// ```
    /// Bodies may start on the line after `then` or `else`, and `else` may
    /// start a new line.
    ///
    /// # Returns
    /// An `Expr::If` typed with the first statically known branch type.
    ///
    /// # Errors
    /// - `UnexpectedToken` if `then` is missing.
    /// - `BranchMismatch` if a branch's known type differs from the earlier
    ///   branches.
    /// - Propagates any errors from sub-expression parsing.
    pub(super) fn parse_if(&mut self) -> ParseResult<Expr> {
        let if_token = self.advance();
        let mut branches = Vec::new();
        let mut else_body = None;

        loop {
            let condition = self.parse_statement()?;
            self.expect_keyword(Keyword::Then)?;
            self.skip_newlines();
            let body = self.parse_statement()?;
            branches.push(Branch { condition, body });

            if !self.skip_newlines_before(Keyword::Else) {
                break;
            }
            self.advance();
            self.skip_newlines();

            if self.check_keyword(Keyword::If) {
                self.advance();
                continue;
            }
            else_body = Some(Box::new(self.parse_statement()?));
            break;
        }

        let mut static_type = StaticType::Unknown;
        for body in branches.iter().map(|branch| &branch.body).chain(else_body.as_deref()) {
            let found = body.static_type();
            if !static_type.agrees_with(&found) {
                return Err(ParseError::BranchMismatch { expected: static_type,
                                                        found,
                                                        span: body.span().clone() });
            }
            if !static_type.is_known() {
                static_type = found;
            }
        }

        let last = else_body.as_deref()
                            .or_else(|| branches.last().map(|branch| &branch.body))
                            .map_or_else(|| if_token.span.clone(), |body| body.span().clone());
        let span = if_token.span.to(&last);

        Ok(Expr::If { branches,
                      else_body,
                      static_type,
                      span })
    }

    /// Parses a counting loop.
    ///
    /// Syntax: `for <name> = <start> to <end> (step <step>)? then <body>`
    ///
    /// # Returns
    /// An `Expr::For` whose static type is the type of `start`.
    ///
    /// # Errors
    /// - `UnexpectedToken` if the name, `=`, `to` or `then` is missing.
    /// - `RangeMismatch` if `end` or `step` disagrees with the type of
    ///   `start`.
    pub(super) fn parse_for(&mut self) -> ParseResult<Expr> {
        let for_token = self.advance();
        let (variable, _) = self.expect_identifier("a loop variable name")?;
        self.expect(&TokenKind::Equals, "'='")?;
        let start = self.parse_statement()?;

        self.expect_keyword(Keyword::To)?;
        self.skip_newlines();
        let end = self.parse_statement()?;

        let step = if self.check_keyword(Keyword::Step) {
            self.advance();
            self.skip_newlines();
            Some(self.parse_statement()?)
        } else {
            None
        };

        let loop_type = start.static_type();
        for bound in std::iter::once(&end).chain(step.as_ref()) {
            let found = bound.static_type();
            if !loop_type.agrees_with(&found) {
                return Err(ParseError::RangeMismatch { expected: loop_type,
                                                       found,
                                                       span: bound.span().clone() });
            }
        }

        self.expect_keyword(Keyword::Then)?;
        self.skip_newlines();
        self.forget_signature(&variable);
        let body = self.parse_statement()?;
        let span = for_token.span.to(body.span());

        Ok(Expr::For { header: Box::new(ForHeader { variable,
                                                    start,
                                                    end,
                                                    step }),
                       body: Box::new(body),
                       span })
    }

    /// Parses a conditional loop.
    ///
    /// Syntax: `while <condition> then <body>`
    ///
    /// # Errors
    /// `UnexpectedToken` if `then` is missing; propagates sub-expression
    /// errors.
    pub(super) fn parse_while(&mut self) -> ParseResult<Expr> {
        let while_token = self.advance();
        let condition = self.parse_statement()?;
        self.expect_keyword(Keyword::Then)?;
        self.skip_newlines();
        let body = self.parse_statement()?;
        let span = while_token.span.to(body.span());

        Ok(Expr::While { condition: Box::new(condition),
                         body: Box::new(body),
                         span })
    }
}
