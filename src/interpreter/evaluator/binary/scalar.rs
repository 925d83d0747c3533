use std::rc::Rc;

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
};

impl Interpreter {
    /// Evaluates `+`, `-`, `*` and `/`.
    ///
    /// `Int` operations are checked: a result outside the 64-bit range is an
    /// `Overflow` error, and division truncates toward zero. `Float`
    /// operations follow IEEE 754 except that dividing by `0.0` is an error.
    /// Two strings may be joined with `+`.
    ///
    /// # Example
    /// ```
    /// use blazescript::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let x = Value::Int(-7);
    /// let y = Value::Int(2);
    ///
    /// let result = Interpreter::eval_scalar_op(BinaryOperator::Divide, &x, &y).unwrap();
    /// assert_eq!(result, Value::Int(-3));
    /// ```
    pub fn eval_scalar_op(op: BinaryOperator, left: &Value, right: &Value) -> OpResult {
        use BinaryOperator::{Add, Divide, Multiply, Subtract};

        match (left, right) {
            (Value::Int(l), Value::Int(r)) => {
                let result = match op {
                    Add => l.checked_add(*r),
                    Subtract => l.checked_sub(*r),
                    Multiply => l.checked_mul(*r),
                    Divide => {
                        if *r == 0 {
                            return Err(RuntimeErrorKind::DivisionByZero);
                        }
                        l.checked_div(*r)
                    },
                    _ => return Err(mismatch(op, left, right)),
                };
                result.map(Value::Int).ok_or(RuntimeErrorKind::Overflow)
            },
            (Value::Float(l), Value::Float(r)) => {
                let result = match op {
                    Add => l + r,
                    Subtract => l - r,
                    Multiply => l * r,
                    Divide => {
                        if *r == 0.0 {
                            return Err(RuntimeErrorKind::DivisionByZero);
                        }
                        l / r
                    },
                    _ => return Err(mismatch(op, left, right)),
                };
                Ok(Value::Float(result))
            },
            (Value::String(l), Value::String(r)) if op == Add => {
                Ok(Value::String(Rc::from(format!("{l}{r}"))))
            },
            _ => Err(mismatch(op, left, right)),
        }
    }
}
