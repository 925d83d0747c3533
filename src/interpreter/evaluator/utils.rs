use crate::{
    ast::{BinaryOperator, Branch, Expr, StaticType, UnaryOperator},
    error::{RuntimeErrorKind, position::Span},
    interpreter::{
        context::{ContextId, symbol_table::Variable},
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

impl Interpreter {
    /// Resolves a variable through the lexical scope chain.
    ///
    /// # Returns
    /// A copy of the stored value; changing the result never changes the
    /// binding.
    ///
    /// # Errors
    /// `UndefinedVariable` if the name is bound nowhere in the chain.
    pub fn eval_variable(&self, name: &str, span: &Span, context: ContextId) -> EvalResult<Value> {
        self.contexts
            .lookup(context, name)
            .map(|variable| variable.value.clone())
            .ok_or_else(|| {
                self.error(RuntimeErrorKind::UndefinedVariable { name: name.to_string() },
                           span,
                           context)
            })
    }

    /// Evaluates a `val` or `var` declaration and binds the result in the
    /// current context.
    ///
    /// A name may be declared again in the same context unless its current
    /// local binding is a constant. Bindings in enclosing contexts are
    /// shadowed, never touched.
    ///
    /// # Parameters
    /// - `declared`: The annotation, if any. Without one the variable takes
    ///   the runtime type of its first value.
    /// - `reassignable`: `true` for `var`.
    ///
    /// # Returns
    /// The assigned value.
    ///
    /// # Errors
    /// - `ConstantReassignment` if a local constant has the same name.
    /// - `DeclaredTypeMismatch` if the value disagrees with the annotation.
    pub fn eval_assignment(&mut self,
                           name: &str,
                           declared: Option<&StaticType>,
                           value: &Expr,
                           reassignable: bool,
                           span: &Span,
                           context: ContextId)
                           -> EvalResult<Value> {
        let value = self.eval_value(value, context)?;
        self.check_not_constant(name, span, context)?;

        let found = value.value_type();
        let declared_type = match declared {
            Some(declared) if !declared.agrees_with(&found) => {
                let kind = RuntimeErrorKind::DeclaredTypeMismatch { name: name.to_string(),
                                                                    expected: declared.clone(),
                                                                    found };
                return Err(self.error(kind, span, context));
            },
            Some(declared) => declared.clone(),
            None => found,
        };

        self.contexts.define(context,
                             name,
                             Variable { value: value.clone(),
                                        declared_type,
                                        reassignable });

        Ok(value)
    }

    /// Evaluates `NAME = expr`, updating the nearest existing binding.
    ///
    /// # Errors
    /// - `UndefinedVariable` if nothing named `name` is in scope.
    /// - `ConstantReassignment` if the binding is a constant.
    /// - `DeclaredTypeMismatch` if the value disagrees with the variable's
    ///   declared type.
    pub fn eval_reassignment(&mut self,
                             name: &str,
                             value: &Expr,
                             span: &Span,
                             context: ContextId)
                             -> EvalResult<Value> {
        let value = self.eval_value(value, context)?;
        let name_owned = || name.to_string();

        let kind = match self.contexts.lookup(context, name) {
            None => Some(RuntimeErrorKind::UndefinedVariable { name: name_owned() }),
            Some(variable) if !variable.reassignable => {
                Some(RuntimeErrorKind::ConstantReassignment { name: name_owned() })
            },
            Some(variable) if !variable.declared_type.agrees_with(&value.value_type()) => {
                Some(RuntimeErrorKind::DeclaredTypeMismatch { name:     name_owned(),
                                                              expected: variable.declared_type
                                                                                .clone(),
                                                              found:    value.value_type(), })
            },
            Some(_) => None,
        };
        if let Some(kind) = kind {
            return Err(self.error(kind, span, context));
        }

        if let Some(variable) = self.contexts.lookup_mut(context, name) {
            variable.value = value.clone();
        }

        Ok(value)
    }

    /// Fails if `name` is bound to a constant in `context` itself.
    pub(super) fn check_not_constant(&self,
                                     name: &str,
                                     span: &Span,
                                     context: ContextId)
                                     -> EvalResult<()> {
        match self.contexts.local(context, name) {
            Some(variable) if !variable.reassignable => {
                let kind = RuntimeErrorKind::ConstantReassignment { name: name.to_string() };
                Err(self.error(kind, span, context))
            },
            _ => Ok(()),
        }
    }

    /// Evaluates a prefix operator applied to an expression.
    pub fn eval_unary_op(&mut self,
                         op: UnaryOperator,
                         operand: &Expr,
                         span: &Span,
                         context: ContextId)
                         -> EvalResult<Value> {
        let value = self.eval_value(operand, context)?;
        Self::eval_unary(op, &value).map_err(|kind| self.error(kind, span, context))
    }

    /// Evaluates both operands left to right, then applies the operator.
    ///
    /// Both operands are always evaluated, also for `and` and `or`. An
    /// error in the left operand stops evaluation before the right one.
    pub fn eval_binary_op(&mut self,
                          op: BinaryOperator,
                          left: &Expr,
                          right: &Expr,
                          span: &Span,
                          context: ContextId)
                          -> EvalResult<Value> {
        let left = self.eval_value(left, context)?;
        let right = self.eval_value(right, context)?;

        Self::eval_binary(op, &left, &right).map_err(|kind| self.error(kind, span, context))
    }

    /// Evaluates an `if` expression.
    ///
    /// Conditions are tried in order and only the body of the first true
    /// one is evaluated.
    ///
    /// # Returns
    /// The value of the taken branch, or `None` if no condition held and
    /// there is no `else`.
    pub fn eval_if_expr(&mut self,
                        branches: &[Branch],
                        else_body: Option<&Expr>,
                        context: ContextId)
                        -> EvalResult<Option<Value>> {
        for branch in branches {
            if self.eval_condition(&branch.condition, context)? {
                return self.eval(&branch.body, context);
            }
        }

        match else_body {
            Some(body) => self.eval(body, context),
            None => Ok(None),
        }
    }

    /// Evaluates a `while` loop.
    ///
    /// # Returns
    /// The value of the last body evaluation, or `None` if the body never
    /// ran.
    pub fn eval_while(&mut self,
                      condition: &Expr,
                      body: &Expr,
                      context: ContextId)
                      -> EvalResult<Option<Value>> {
        let mark = self.contexts.watermark();
        let mut last = None;
        while self.eval_condition(condition, context)? {
            last = self.eval(body, context)?;
            self.contexts.release_from(mark, last.as_ref());
        }

        Ok(last)
    }

    /// Evaluates a condition: any nonzero number is true.
    ///
    /// # Errors
    /// `ExpectedNumber` at the condition if it is not a number.
    pub(super) fn eval_condition(&mut self, condition: &Expr, context: ContextId) -> EvalResult<bool> {
        let value = self.eval_value(condition, context)?;
        value.is_truthy()
             .map_err(|kind| self.error(kind, condition.span(), context))
    }
}
