use crate::{
    ast::UnaryOperator,
    error::RuntimeErrorKind,
    interpreter::{
        evaluator::core::{Interpreter, OpResult},
        value::core::Value,
    },
};

impl Interpreter {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Plus`: identity on numbers.
    /// - `Negate`: numeric negation; an `Int` stays an `Int` and negating
    ///   the smallest `Int` overflows.
    /// - `Not`: `1` for a false (zero) number, `0` otherwise.
    ///
    /// Strings, characters and functions support none of them.
    ///
    /// # Example
    /// ```
    /// use blazescript::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let v = Interpreter::eval_unary(UnaryOperator::Negate, &Value::Int(5)).unwrap();
    /// assert_eq!(v, Value::Int(-5));
    ///
    /// let v = Interpreter::eval_unary(UnaryOperator::Not, &Value::Float(0.0)).unwrap();
    /// assert_eq!(v, Value::Int(1));
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value) -> OpResult {
        match (op, value) {
            (UnaryOperator::Plus, Value::Int(_) | Value::Float(_)) => Ok(value.clone()),
            (UnaryOperator::Negate, Value::Int(v)) => {
                v.checked_neg().map(Value::Int).ok_or(RuntimeErrorKind::Overflow)
            },
            (UnaryOperator::Negate, Value::Float(v)) => Ok(Value::Float(-v)),
            (UnaryOperator::Not, Value::Int(_) | Value::Float(_)) => {
                Ok(Value::from(!value.is_truthy()?))
            },
            _ => Err(RuntimeErrorKind::UnsupportedOperator { operator: op.to_string(),
                                                             operand:  value.value_type(), }),
        }
    }
}
