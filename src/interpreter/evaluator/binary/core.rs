use crate::{
    ast::BinaryOperator,
    error::RuntimeErrorKind,
    interpreter::{
        evaluator::core::{Interpreter, OpResult},
        value::core::Value,
    },
};

impl Interpreter {
    /// Applies a binary operator to two values.
    ///
    /// Arithmetic operators go to `eval_scalar_op`, `^` to `eval_pow`,
    /// comparisons to `eval_comparison` and `and`/`or` to `eval_logic`.
    /// There is no implicit conversion between `Int` and `Float`: operands
    /// of different variants are a type mismatch for every operator.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Returns
    /// The result value, or the kind of error to report at the operator's
    /// node.
    ///
    /// # Example
    /// ```
    /// use blazescript::{
    ///     ast::BinaryOperator,
    ///     error::RuntimeErrorKind,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let sum = Interpreter::eval_binary(BinaryOperator::Add, &Value::Int(3), &Value::Int(4));
    /// assert_eq!(sum, Ok(Value::Int(7)));
    ///
    /// let quotient = Interpreter::eval_binary(BinaryOperator::Divide, &Value::Int(7), &Value::Int(0));
    /// assert_eq!(quotient, Err(RuntimeErrorKind::DivisionByZero));
    /// ```
    pub fn eval_binary(op: BinaryOperator, left: &Value, right: &Value) -> OpResult {
        use BinaryOperator::{
            Add, And, Divide, Equal, Greater, GreaterEqual, Less, LessEqual, Multiply, NotEqual,
            Or, Power, Subtract,
        };

        match op {
            Add | Subtract | Multiply | Divide => Self::eval_scalar_op(op, left, right),
            Power => Self::eval_pow(left, right),
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => {
                Self::eval_comparison(op, left, right)
            },
            And | Or => Self::eval_logic(op, left, right),
        }
    }
}

/// The error for an operator that does not accept this pair of operands.
pub(super) fn mismatch(op: BinaryOperator, left: &Value, right: &Value) -> RuntimeErrorKind {
    RuntimeErrorKind::TypeMismatch { operator: op.to_string(),
                                     left:     left.value_type(),
                                     right:    right.value_type(), }
}
