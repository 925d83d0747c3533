use log::debug;

use crate::{
    ast::{Expr, Program},
    error::{RuntimeError, RuntimeErrorKind, position::Span},
    interpreter::{
        context::{ContextId, Contexts},
        value::core::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` carrying the span and traceback of the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Result of an operator applied to values.
///
/// Operators do not know where in the source they were applied; the caller
/// attaches the span of the node.
pub type OpResult = Result<Value, RuntimeErrorKind>;

/// Default limit on nested function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1000;

/// Free stack below which [`Interpreter::eval`] switches to a new segment.
const STACK_RED_ZONE: usize = 256 * 1024;
/// Size of each stack segment allocated by [`Interpreter::eval`].
const STACK_SEGMENT: usize = 4 * 1024 * 1024;

/// Tree-walking interpreter.
///
/// Holds the context arena and the current call depth. Every expression is
/// evaluated against a [`ContextId`]: the global context for top-level
/// statements, an activation context inside function bodies.
///
/// ## Usage
///
/// An `Interpreter` can run several programs one after another. Globals
/// defined by one run stay visible to the next until [`Interpreter::reset`]
/// is called.
pub struct Interpreter {
    pub(super) contexts:       Contexts,
    pub(super) depth:          usize,
    pub(super) max_call_depth: usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CALL_DEPTH)
    }
}

impl Interpreter {
    /// Creates an interpreter with a fresh global context.
    ///
    /// # Parameters
    /// - `max_call_depth`: How many function calls may be active at once
    ///   before evaluation fails with `CallDepthExceeded`.
    #[must_use]
    pub fn new(max_call_depth: usize) -> Self {
        Self { contexts: Contexts::new(),
               depth: 0,
               max_call_depth }
    }

    /// Discards every binding and starts over with a fresh global context.
    pub fn reset(&mut self) {
        debug!("Resetting the global context");
        self.contexts = Contexts::new();
        self.depth = 0;
    }

    #[must_use]
    pub const fn contexts(&self) -> &Contexts {
        &self.contexts
    }

    /// Looks a name up in the global context.
    #[must_use]
    pub fn global(&self, name: &str) -> Option<&Value> {
        self.contexts
            .local(self.contexts.global(), name)
            .map(|variable| &variable.value)
    }

    /// Evaluates the statements of a program in the global context.
    ///
    /// # Returns
    /// The value of the last statement, or `None` if the program is empty
    /// or its last statement produced no value.
    ///
    /// # Errors
    /// The first runtime error. Bindings made before the error remain.
    ///
    /// # Example
    /// ```
    /// use blazescript::{
    ///     error::position::SourceFile,
    ///     interpreter::{
    ///         evaluator::core::Interpreter, lexer::tokenize, parser::parse, value::core::Value,
    ///     },
    /// };
    ///
    /// let source = SourceFile::new("main.bzs", "var x = 4; x = x * 2; x + 1");
    /// let program = parse(&tokenize(&source).unwrap()).unwrap();
    ///
    /// let mut interpreter = Interpreter::default();
    /// assert_eq!(interpreter.run(&program).unwrap(), Some(Value::Int(9)));
    /// assert_eq!(interpreter.global("x"), Some(&Value::Int(8)));
    /// ```
    pub fn run(&mut self, program: &Program) -> EvalResult<Option<Value>> {
        let global = self.contexts.global();
        self.depth = 0;
        self.contexts.release_unreachable();

        let mark = self.contexts.watermark();
        let mut last = None;
        for statement in &program.statements {
            let result = self.eval(statement, global);
            self.contexts.release_from(mark, result.as_ref().ok().and_then(Option::as_ref));
            last = result?;
        }

        Ok(last)
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The match is
    /// exhaustive over the node kinds and each arm delegates to a dedicated
    /// method.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `context`: The context names are resolved in and bound into.
    ///
    /// # Returns
    /// `Some(Value)` for expressions that produce a value, or `None` for an
    /// `if` without a taken branch and loops that never ran.
    ///
    /// The native stack grows on demand, so deep recursion is bounded by the
    /// call depth limit and not by the size of the calling thread's stack.
    pub fn eval(&mut self, expr: &Expr, context: ContextId) -> EvalResult<Option<Value>> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, || self.eval_expr(expr, context))
    }

    fn eval_expr(&mut self, expr: &Expr, context: ContextId) -> EvalResult<Option<Value>> {
        match expr {
            Expr::NumberLiteral { value, .. } => Ok(Some(Value::from(*value))),
            Expr::StringLiteral { value, .. } => Ok(Some(Value::from(value.as_str()))),
            Expr::CharLiteral { value, .. } => Ok(Some(Value::Char(*value))),
            Expr::UnaryOp { op, operand, span } => {
                self.eval_unary_op(*op, operand, span, context).map(Some)
            },
            Expr::BinaryOp { left, op, right, span, .. } => {
                self.eval_binary_op(*op, left, right, span, context).map(Some)
            },
            Expr::VarAccess { name, span } => self.eval_variable(name, span, context).map(Some),
            Expr::VarAssign { name,
                              declared,
                              value,
                              reassignable,
                              span, } => self.eval_assignment(name,
                                                              declared.as_ref(),
                                                              value,
                                                              *reassignable,
                                                              span,
                                                              context)
                                             .map(Some),
            Expr::VarReassign { name, value, span } => {
                self.eval_reassignment(name, value, span, context).map(Some)
            },
            Expr::If { branches, else_body, .. } => {
                self.eval_if_expr(branches, else_body.as_deref(), context)
            },
            Expr::For { header, body, span } => self.eval_for(header, body, span, context),
            Expr::While { condition, body, .. } => self.eval_while(condition, body, context),
            Expr::FuncDef { function } => {
                self.eval_function_definition(function, context).map(Some)
            },
            Expr::Call { callee,
                         arguments,
                         span,
                         .. } => self.eval_function_call(callee, arguments, span, context).map(Some),
        }
    }

    /// Evaluates an expression whose value is required.
    ///
    /// # Errors
    /// `MissingValue` at the expression's span if it produced no value.
    pub fn eval_value(&mut self, expr: &Expr, context: ContextId) -> EvalResult<Value> {
        match self.eval(expr, context)? {
            Some(value) => Ok(value),
            None => Err(self.error(RuntimeErrorKind::MissingValue, expr.span(), context)),
        }
    }

    /// Builds a runtime error raised at `span` while executing in
    /// `context`, capturing the current call stack.
    #[must_use]
    pub fn error(&self, kind: RuntimeErrorKind, span: &Span, context: ContextId) -> RuntimeError {
        RuntimeError { kind,
                       span: span.clone(),
                       traceback: self.contexts.traceback(context, &span.start) }
    }
}
