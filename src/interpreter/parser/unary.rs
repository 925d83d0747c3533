use crate::{
    ast::{Expr, Number, UnaryOperator},
    interpreter::{
        lexer::{Keyword, TokenKind},
        parser::core::{ParseResult, Parser},
    },
};

/// What may start an atom.
const ATOM_START: &str =
    "a literal, an identifier, '(', 'if', 'for', 'while' or 'fun'";

impl Parser<'_> {
    /// Parses prefix `+` and `-`.
    ///
    /// Unary operators bind looser than `^`, so `-2 ^ 2` is `-(2 ^ 2)`.
    ///
    /// Grammar: `factor := ("+" | "-") factor | power`
    ///
    /// # Returns
    /// An `Expr::UnaryOp`, or the power expression if no prefix operator
    /// is present.
    pub(super) fn parse_factor(&mut self) -> ParseResult<Expr> {
        let op = match self.peek().kind {
            TokenKind::Plus => UnaryOperator::Plus,
            TokenKind::Minus => UnaryOperator::Negate,
            _ => return self.parse_power(),
        };

        let token = self.advance();
        let operand = self.parse_factor()?;
        let span = token.span.to(operand.span());

        Ok(Expr::UnaryOp { op,
                           operand: Box::new(operand),
                           span })
    }

    /// Parses an atom followed by any number of argument lists.
    ///
    /// Grammar: `call := atom ("(" (statement ("," statement)*)? ")")*`
    ///
    /// # Returns
    /// An `Expr::Call` per argument list, or the atom itself.
    ///
    /// # Errors
    /// Propagates argument errors; `ArgumentMismatch` when an argument
    /// disagrees with a known parameter type.
    pub(super) fn parse_call(&mut self) -> ParseResult<Expr> {
        let mut callee = self.parse_atom()?;

        while self.check(&TokenKind::LeftParen) {
            self.advance();
            let (arguments, closing) = self.parse_comma_separated(Self::parse_statement)?;
            let static_type = self.check_call(&callee, &arguments)?;
            let span = callee.span().to(&closing);

            callee = Expr::Call { callee: Box::new(callee),
                                  arguments,
                                  static_type,
                                  span };
        }

        Ok(callee)
    }

    /// Parses the tightest-binding constructs.
    ///
    /// Grammar:
    /// ```text
    /// atom := INT | FLOAT | STRING | CHAR
    ///       | IDENT "=" statement
    ///       | IDENT
    ///       | "(" statement ")"
    ///       | if | for | while | fun
    /// ```
    ///
    /// # Errors
    /// `UnexpectedToken` if the current token cannot start an atom.
    fn parse_atom(&mut self) -> ParseResult<Expr> {
        let token = self.peek();

        match &token.kind {
            TokenKind::Int(value) => {
                self.advance();
                Ok(Expr::NumberLiteral { value: Number::Int(*value),
                                         span:  token.span.clone(), })
            },
            TokenKind::Float(value) => {
                self.advance();
                Ok(Expr::NumberLiteral { value: Number::Float(*value),
                                         span:  token.span.clone(), })
            },
            TokenKind::String(value) => {
                self.advance();
                Ok(Expr::StringLiteral { value: value.clone(),
                                         span:  token.span.clone(), })
            },
            TokenKind::Char(value) => {
                self.advance();
                Ok(Expr::CharLiteral { value: *value,
                                       span:  token.span.clone(), })
            },
            TokenKind::Identifier(name) => {
                self.advance();
                if !self.check(&TokenKind::Equals) {
                    return Ok(Expr::VarAccess { name: name.clone(),
                                                span: token.span.clone(), });
                }

                self.advance();
                let value = self.parse_statement()?;
                self.forget_signature(name);
                let span = token.span.to(value.span());

                Ok(Expr::VarReassign { name: name.clone(),
                                       value: Box::new(value),
                                       span })
            },
            TokenKind::LeftParen => {
                self.advance();
                self.skip_newlines();
                let inner = self.parse_statement()?;
                self.skip_newlines();
                self.expect(&TokenKind::RightParen, "')'")?;
                Ok(inner)
            },
            TokenKind::Keyword(Keyword::If) => self.parse_if(),
            TokenKind::Keyword(Keyword::For) => self.parse_for(),
            TokenKind::Keyword(Keyword::While) => self.parse_while(),
            TokenKind::Keyword(Keyword::Fun) => self.parse_function_definition(),
            _ => Err(self.unexpected(ATOM_START)),
        }
    }
}
