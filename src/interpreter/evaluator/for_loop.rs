use crate::{
    ast::{BinaryOperator, Expr, ForHeader},
    error::{RuntimeErrorKind, position::Span},
    interpreter::{
        context::{ContextId, symbol_table::Variable},
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

impl Interpreter {
    /// Evaluates a counting `for` loop.
    ///
    /// `start`, `end` and `step` are evaluated once, in that order. The
    /// counter runs from `start` while it is below `end` for a positive step
    /// and while it is above `end` for a negative one, so `end` itself is
    /// never reached. Before each iteration the loop variable is bound in
    /// the current context as a `var`, and it keeps its last value after
    /// the loop.
    ///
    /// # Returns
    /// The value of the last body evaluation, or `None` if the body never
    /// ran.
    ///
    /// # Errors
    /// - `ExpectedNumber` if a bound is not a number.
    /// - `InvalidLoopBounds` if the bounds mix `Int` and `Float` or the step
    ///   is zero.
    /// - `ConstantReassignment` if the loop variable names a local constant.
    /// - Any error raised by the body, which stops the loop.
    ///
    /// # Example
    /// ```
    /// use blazescript::{Session, interpreter::value::core::Value};
    ///
    /// let mut session = Session::default();
    /// let source = "var total = 0\nfor i = 5 to 0 step -1 then total = total + i";
    /// let result = session.run("main.bzs", source);
    ///
    /// assert_eq!(result.unwrap(), Some(Value::Int(15)));
    /// assert_eq!(session.lookup("i"), Some(&Value::Int(1)));
    /// ```
    pub fn eval_for(&mut self,
                    header: &ForHeader,
                    body: &Expr,
                    span: &Span,
                    context: ContextId)
                    -> EvalResult<Option<Value>> {
        let start = self.eval_bound(&header.start, context)?;
        let end = self.eval_bound(&header.end, context)?;
        let step = match &header.step {
            Some(step) => self.eval_bound(step, context)?,
            None => match start {
                Value::Float(_) => Value::Float(1.0),
                _ => Value::Int(1),
            },
        };

        let ascending = Self::check_bounds(&start, &end, &step)
            .map_err(|kind| self.error(kind, span, context))?;
        let test = if ascending { BinaryOperator::Less } else { BinaryOperator::Greater };

        let mark = self.contexts.watermark();
        let mut counter = start;
        let mut last = None;
        loop {
            let running = Self::eval_binary(test, &counter, &end)
                .and_then(|value| value.is_truthy())
                .map_err(|kind| self.error(kind, span, context))?;
            if !running {
                break;
            }

            self.check_not_constant(&header.variable, span, context)?;
            let declared_type = counter.value_type();
            self.contexts.define(context,
                                 &header.variable,
                                 Variable::mutable(counter.clone(), declared_type));

            last = self.eval(body, context)?;
            self.contexts.release_from(mark, last.as_ref());

            counter = Self::eval_binary(BinaryOperator::Add, &counter, &step)
                .map_err(|kind| self.error(kind, span, context))?;
        }

        Ok(last)
    }

    fn eval_bound(&mut self, bound: &Expr, context: ContextId) -> EvalResult<Value> {
        let value = self.eval_value(bound, context)?;
        match value {
            Value::Int(_) | Value::Float(_) => Ok(value),
            _ => {
                let kind = RuntimeErrorKind::ExpectedNumber { found: value.value_type() };
                Err(self.error(kind, bound.span(), context))
            },
        }
    }

    /// Checks that the bounds share one numeric type and that the step is
    /// nonzero, and tells whether the loop counts up.
    fn check_bounds(start: &Value, end: &Value, step: &Value) -> Result<bool, RuntimeErrorKind> {
        let mismatch = |name: &str, other: &Value| RuntimeErrorKind::InvalidLoopBounds {
            details: format!("start is {} but {name} is {}",
                             start.value_type(),
                             other.value_type()),
        };

        if start.value_type() != end.value_type() {
            return Err(mismatch("end", end));
        }

        match (start, step) {
            (Value::Int(_), Value::Int(0)) => Err(zero_step()),
            (Value::Float(_), Value::Float(step)) if *step == 0.0 => Err(zero_step()),
            (Value::Int(_), Value::Int(step)) => Ok(*step > 0),
            (Value::Float(_), Value::Float(step)) => Ok(*step > 0.0),
            _ => Err(mismatch("step", step)),
        }
    }
}

fn zero_step() -> RuntimeErrorKind {
    RuntimeErrorKind::InvalidLoopBounds { details: "the step cannot be zero".to_string() }
}
