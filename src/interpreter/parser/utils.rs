use crate::{
    error::{ParseError, position::Span},
    interpreter::{
        lexer::{Keyword, Token, TokenKind},
        parser::core::{ParseResult, Parser},
    },
};

impl<'a> Parser<'a> {
    /// Returns the current token without consuming it. Past the end, this is
    /// the final `Eof` token.
    pub(super) fn peek(&self) -> &'a Token {
        let tokens = self.tokens;
        &tokens[self.cursor.min(tokens.len() - 1)]
    }

    /// Consumes and returns the current token. `Eof` is never consumed.
    pub(super) fn advance(&mut self) -> &'a Token {
        let token = self.peek();
        if token.kind != TokenKind::Eof {
            self.cursor += 1;
        }
        token
    }

    pub(super) fn check(&self, kind: &TokenKind) -> bool {
        &self.peek().kind == kind
    }

    pub(super) fn check_keyword(&self, keyword: Keyword) -> bool {
        self.peek().kind == TokenKind::Keyword(keyword)
    }

    /// Consumes the current token if it is `kind`.
    ///
    /// # Errors
    /// `UnexpectedToken` naming `expected` otherwise.
    pub(super) fn expect(&mut self, kind: &TokenKind, expected: &str) -> ParseResult<&'a Token> {
        if self.check(kind) { Ok(self.advance()) } else { Err(self.unexpected(expected)) }
    }

    /// Consumes the current token if it is the keyword `keyword`.
    pub(super) fn expect_keyword(&mut self, keyword: Keyword) -> ParseResult<&'a Token> {
        if self.check_keyword(keyword) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("'{keyword}'")))
        }
    }

    /// Consumes an identifier and returns its name and span.
    pub(super) fn expect_identifier(&mut self, expected: &str) -> ParseResult<(String, Span)> {
        let token = self.peek();
        if let TokenKind::Identifier(name) = &token.kind {
            self.advance();
            Ok((name.clone(), token.span.clone()))
        } else {
            Err(self.unexpected(expected))
        }
    }

    pub(super) fn skip_newlines(&mut self) {
        while self.check(&TokenKind::Newline) {
            self.advance();
        }
    }

    /// Skips newlines only if `keyword` follows them, so a statement can
    /// continue on the next line with `else` without swallowing the
    /// separator before an unrelated statement.
    pub(super) fn skip_newlines_before(&mut self, keyword: Keyword) -> bool {
        let mut lookahead = self.cursor;
        while self.tokens.get(lookahead).is_some_and(|t| t.kind == TokenKind::Newline) {
            lookahead += 1;
        }

        let found = self.tokens
                        .get(lookahead)
                        .is_some_and(|t| t.kind == TokenKind::Keyword(keyword));
        if found {
            self.cursor = lookahead;
        }
        found
    }

    /// Builds an `UnexpectedToken` error for the current token.
    pub(super) fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.peek();
        ParseError::UnexpectedToken { expected: expected.to_string(),
                                      found:    token.kind.to_string(),
                                      span:     token.span.clone(), }
    }

    /// Chooses the error to report for a rule that started at token `start`.
    ///
    /// If the rule failed without consuming anything, the generic error
    /// listing everything the rule accepts is more helpful. Once tokens were
    /// consumed, the nested error raised deeper in the grammar is kept.
    pub(super) fn deepest(&self, start: usize, error: ParseError, expected: &str) -> ParseError {
        if self.cursor == start { self.unexpected(expected) } else { error }
    }

    /// Parses a comma-separated list of items up to and including the closing
    /// `)`. The opening `(` must already be consumed.
    ///
    /// An immediately encountered `)` produces an empty list. Newlines are
    /// allowed around items.
    ///
    /// Grammar (simplified): `list := (item ("," item)*)? ")"`
    ///
    /// # Parameters
    /// - `parse_item`: Function used to parse each list element.
    ///
    /// # Returns
    /// The parsed items and the span of the closing parenthesis.
    ///
    /// # Errors
    /// Returns a `ParseError` if an item fails to parse or a token other than
    /// `,` or `)` follows an item.
    pub(super) fn parse_comma_separated<T>(&mut self,
                                           mut parse_item: impl FnMut(&mut Self) -> ParseResult<T>)
                                           -> ParseResult<(Vec<T>, Span)> {
        let mut items = Vec::new();

        self.skip_newlines();
        if self.check(&TokenKind::RightParen) {
            return Ok((items, self.advance().span.clone()));
        }

        loop {
            items.push(parse_item(self)?);
            self.skip_newlines();

            match self.peek().kind {
                TokenKind::Comma => {
                    self.advance();
                    self.skip_newlines();
                },
                TokenKind::RightParen => return Ok((items, self.advance().span.clone())),
                _ => return Err(self.unexpected("',' or ')'")),
            }
        }
    }
}
