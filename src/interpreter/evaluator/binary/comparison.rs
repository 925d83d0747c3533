use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::{
            binary::core::mismatch,
            core::{Interpreter, OpResult},
        },
        value::core::Value,
    },
};

/// Maps a comparison operator and the ordering of its operands to the
/// boolean result. `None` stands for unordered floats, which are only
/// unequal.
#[must_use]
pub fn comparison_result(op: BinaryOperator, ordering: Option<Ordering>) -> bool {
    match op {
        BinaryOperator::Equal => ordering == Some(Ordering::Equal),
        BinaryOperator::NotEqual => ordering != Some(Ordering::Equal),
        BinaryOperator::Less => ordering == Some(Ordering::Less),
        BinaryOperator::LessEqual => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        BinaryOperator::Greater => ordering == Some(Ordering::Greater),
        BinaryOperator::GreaterEqual => {
            matches!(ordering, Some(Ordering::Greater | Ordering::Equal))
        },
        _ => false,
    }
}

impl Interpreter {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// Numbers of the same variant support every comparison. Strings and
    /// characters only support `==` and `!=`. Functions cannot be compared.
    ///
    /// # Returns
    /// `Int(1)` if the comparison holds, `Int(0)` otherwise.
    ///
    /// # Example
    /// ```
    /// use blazescript::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let a = Value::Float(3.0);
    /// let b = Value::Float(5.0);
    ///
    /// let result = Interpreter::eval_comparison(BinaryOperator::Less, &a, &b);
    /// assert_eq!(result.unwrap(), Value::Int(1));
    /// ```
    pub fn eval_comparison(op: BinaryOperator, left: &Value, right: &Value) -> OpResult {
        let equality = matches!(op, BinaryOperator::Equal | BinaryOperator::NotEqual);

        let holds = match (left, right) {
            (Value::Int(l), Value::Int(r)) => comparison_result(op, l.partial_cmp(r)),
            (Value::Float(l), Value::Float(r)) => comparison_result(op, l.partial_cmp(r)),
            (Value::String(l), Value::String(r)) if equality => {
                comparison_result(op, Some(l.cmp(r)))
            },
            (Value::Char(l), Value::Char(r)) if equality => comparison_result(op, Some(l.cmp(r))),
            _ => return Err(mismatch(op, left, right)),
        };

        Ok(Value::from(holds))
    }
}
