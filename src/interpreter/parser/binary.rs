use crate::{
    ast::{BinaryOperator, Expr, StaticType, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::{Keyword, TokenKind},
        parser::core::{ParseResult, Parser},
    },
};

/// Parses one level of the precedence ladder.
type Rule<'a> = fn(&mut Parser<'a>) -> ParseResult<Expr>;

impl<'a> Parser<'a> {
    /// Parses logical conjunctions and disjunctions.
    ///
    /// `and` and `or` share one precedence level and associate to the left.
    ///
    /// Grammar: `logical := comparison (("and" | "or") comparison)*`
    ///
    /// # Returns
    /// An `Expr::BinaryOp` tree, or the comparison itself if no operator
    /// follows.
    pub(super) fn parse_logical(&mut self) -> ParseResult<Expr> {
        self.parse_left_associative(Self::parse_comparison,
                                    &[BinaryOperator::And, BinaryOperator::Or])
    }

    /// Parses `not` and the equality and relational operators.
    ///
    /// Grammar: `comparison := "not" comparison
    ///                       | arithmetic (("==" | "!=" | "<" | "<=" | ">" | ">=") arithmetic)*`
    ///
    /// # Returns
    /// An `Expr::UnaryOp` for `not`, otherwise a left-associative
    /// `Expr::BinaryOp` tree.
    pub(super) fn parse_comparison(&mut self) -> ParseResult<Expr> {
        if self.check_keyword(Keyword::Not) {
            let not = self.advance();
            let operand = self.parse_comparison()?;
            let span = not.span.to(operand.span());

            return Ok(Expr::UnaryOp { op: UnaryOperator::Not,
                                      operand: Box::new(operand),
                                      span });
        }

        self.parse_left_associative(Self::parse_arithmetic,
                                    &[BinaryOperator::Equal,
                                      BinaryOperator::NotEqual,
                                      BinaryOperator::Less,
                                      BinaryOperator::LessEqual,
                                      BinaryOperator::Greater,
                                      BinaryOperator::GreaterEqual])
    }

    /// Parses addition and subtraction.
    ///
    /// Grammar: `arithmetic := term (("+" | "-") term)*`
    fn parse_arithmetic(&mut self) -> ParseResult<Expr> {
        self.parse_left_associative(Self::parse_term,
                                    &[BinaryOperator::Add, BinaryOperator::Subtract])
    }

    /// Parses multiplication and division.
    ///
    /// Grammar: `term := factor (("*" | "/") factor)*`
    fn parse_term(&mut self) -> ParseResult<Expr> {
        self.parse_left_associative(Self::parse_factor,
                                    &[BinaryOperator::Multiply, BinaryOperator::Divide])
    }

    /// Parses exponentiation.
    ///
    /// The right operand is a full `factor`, so `2 ^ -1` parses. Since a
    /// `factor` contains a `power`, chains associate to the right:
    /// `2 ^ 3 ^ 2` is `2 ^ (3 ^ 2)`.
    ///
    /// Grammar: `power := call ("^" factor)*`
    pub(super) fn parse_power(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_call()?;

        while self.check(&TokenKind::Power) {
            self.advance();
            let right = self.parse_factor()?;
            left = build_binary(left, BinaryOperator::Power, right)?;
        }

        Ok(left)
    }

    /// Parses a chain of operands joined by any of `operators`, associating
    /// to the left.
    ///
    /// # Parameters
    /// - `operand`: Rule for the next tighter precedence level.
    /// - `operators`: The operators accepted at this level.
    fn parse_left_associative(&mut self,
                              operand: Rule<'a>,
                              operators: &[BinaryOperator])
                              -> ParseResult<Expr> {
        let mut left = operand(self)?;

        while let Some(op) = token_to_binary_operator(&self.peek().kind)
              && operators.contains(&op)
        {
            self.advance();
            let right = operand(self)?;
            left = build_binary(left, op, right)?;
        }

        Ok(left)
    }
}

/// Builds a binary node after checking that both operands agree on their
/// static type.
///
/// Arithmetic results have the operand type; when only one side is known,
/// that side's type is used. Comparisons and logical operators produce an
/// `Int`.
///
/// # Errors
/// `OperandMismatch` if both operand types are known and differ.
pub(super) fn build_binary(left: Expr, op: BinaryOperator, right: Expr) -> ParseResult<Expr> {
    let left_type = left.static_type();
    let right_type = right.static_type();

    if !left_type.agrees_with(&right_type) {
        return Err(ParseError::OperandMismatch { operator:   op,
                                                 left:       left_type,
                                                 right:      right_type,
                                                 left_span:  left.span().clone(),
                                                 right_span: right.span().clone(), });
    }

    let static_type = if !op.is_arithmetic() {
        StaticType::Int
    } else if left_type.is_known() {
        left_type
    } else {
        right_type
    };
    let span = left.span().to(right.span());

    Ok(Expr::BinaryOp { left: Box::new(left),
                        op,
                        right: Box::new(right),
                        static_type,
                        span })
}

/// Converts a token into the matching binary operator, if there is one.
///
/// # Parameters
/// - `kind`: Token to convert.
///
/// # Returns
/// `Some(BinaryOperator)` when the token is an infix operator, `None`
/// otherwise.
pub const fn token_to_binary_operator(kind: &TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Subtract),
        TokenKind::Multiply => Some(BinaryOperator::Multiply),
        TokenKind::Divide => Some(BinaryOperator::Divide),
        TokenKind::Power => Some(BinaryOperator::Power),
        TokenKind::DoubleEquals => Some(BinaryOperator::Equal),
        TokenKind::NotEquals => Some(BinaryOperator::NotEqual),
        TokenKind::LessThan => Some(BinaryOperator::Less),
        TokenKind::LessThanEquals => Some(BinaryOperator::LessEqual),
        TokenKind::GreaterThan => Some(BinaryOperator::Greater),
        TokenKind::GreaterThanEquals => Some(BinaryOperator::GreaterEqual),
        TokenKind::Keyword(Keyword::And) => Some(BinaryOperator::And),
        TokenKind::Keyword(Keyword::Or) => Some(BinaryOperator::Or),
        _ => None,
    }
}
