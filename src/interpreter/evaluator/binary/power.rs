use crate::{
    ast::BinaryOperator,
    error::RuntimeErrorKind,
    interpreter::{
        evaluator::{
            binary::core::mismatch,
            core::{Interpreter, OpResult},
        },
        value::core::Value,
    },
    util::num::checked_int_pow,
};

impl Interpreter {
    /// Evaluates `base ^ exponent`.
    ///
    /// `Int ^ Int` stays an `Int`, so the exponent must not be negative and
    /// the result must fit in 64 bits. `Float ^ Float` uses `powf`.
    ///
    /// # Example
    /// ```
    /// use blazescript::{
    ///     error::RuntimeErrorKind,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let result = Interpreter::eval_pow(&Value::Int(2), &Value::Int(10));
    /// assert_eq!(result, Ok(Value::Int(1024)));
    ///
    /// let result = Interpreter::eval_pow(&Value::Int(2), &Value::Int(-1));
    /// assert_eq!(result, Err(RuntimeErrorKind::NegativeExponent));
    /// ```
    pub fn eval_pow(base: &Value, exponent: &Value) -> OpResult {
        match (base, exponent) {
            (Value::Int(_), Value::Int(e)) if *e < 0 => Err(RuntimeErrorKind::NegativeExponent),
            (Value::Int(b), Value::Int(e)) => {
                checked_int_pow(*b, *e).map(Value::Int)
                                       .ok_or(RuntimeErrorKind::Overflow)
            },
            (Value::Float(b), Value::Float(e)) => Ok(Value::Float(b.powf(*e))),
            _ => Err(mismatch(BinaryOperator::Power, base, exponent)),
        }
    }
}
