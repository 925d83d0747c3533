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

impl Interpreter {
    /// Evaluates `and` and `or`.
    ///
    /// Both operands must be numbers of the same variant; each is read as
    /// true when nonzero. Both have already been evaluated when this is
    /// called, there is no short-circuiting.
    ///
    /// # Returns
    /// `Int(1)` or `Int(0)`.
    ///
    /// # Example
    /// ```
    /// use blazescript::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let result = Interpreter::eval_logic(BinaryOperator::Or, &Value::Int(0), &Value::Int(5));
    /// assert_eq!(result.unwrap(), Value::Int(1));
    /// ```
    pub fn eval_logic(op: BinaryOperator, left: &Value, right: &Value) -> OpResult {
        match (left, right) {
            (Value::Int(_), Value::Int(_)) | (Value::Float(_), Value::Float(_)) => {
                let (l, r) = (left.is_truthy()?, right.is_truthy()?);
                let holds = match op {
                    BinaryOperator::And => l && r,
                    BinaryOperator::Or => l || r,
                    _ => return Err(mismatch(op, left, right)),
                };
                Ok(Value::from(holds))
            },
            _ => Err(mismatch(op, left, right)),
        }
    }
}
