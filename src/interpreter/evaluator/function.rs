use std::rc::Rc;

use log::debug;

use crate::{
    ast::{Expr, FunctionDef},
    error::{RuntimeErrorKind, position::Span},
    interpreter::{
        context::{ContextId, Entry, symbol_table::Variable},
        evaluator::core::{EvalResult, Interpreter},
        value::{core::Value, function::Function},
    },
};

impl Interpreter {
    /// Evaluates a function definition.
    ///
    /// The resulting function closes over `context`, which then outlives
    /// the current call for as long as the function value is reachable. A
    /// named definition is also bound as a constant in `context`.
    ///
    /// # Errors
    /// `ConstantReassignment` if the name is already a local constant.
    pub fn eval_function_definition(&mut self,
                                    definition: &Rc<FunctionDef>,
                                    context: ContextId)
                                    -> EvalResult<Value> {
        let function = Value::Function(Function::new(Rc::clone(definition), context));
        self.contexts.mark_captured(context);

        if let Some(name) = &definition.name {
            self.check_not_constant(name, &definition.span, context)?;
            self.contexts.define(context, name, Variable::constant(function.clone()));
        }

        Ok(function)
    }

    /// Evaluates a call expression.
    ///
    /// The callee is evaluated first, then the arguments from left to right.
    /// Only then is the callee required to be a function.
    ///
    /// # Errors
    /// - `NotCallable` if the callee is not a function.
    /// - Any error from [`Interpreter::execute`].
    pub fn eval_function_call(&mut self,
                              callee: &Expr,
                              arguments: &[Expr],
                              span: &Span,
                              context: ContextId)
                              -> EvalResult<Value> {
        let target = self.eval_value(callee, context)?;
        let arguments = arguments.iter()
                                 .map(|argument| self.eval_value(argument, context))
                                 .collect::<EvalResult<Vec<_>>>()?;

        match target {
            Value::Function(function) => self.execute(&function, arguments, span, context),
            other => {
                let kind = RuntimeErrorKind::NotCallable { found: other.value_type() };
                Err(self.error(kind, callee.span(), context))
            },
        }
    }

    /// Runs a function with already evaluated arguments.
    ///
    /// A new activation context named after the function is created whose
    /// lexical parent is the function's closure, not the caller, so free
    /// names in the body resolve where the function was defined. Parameters
    /// are bound there as constants. On return the activation is released
    /// unless a closure over it is the result or was stored in an older
    /// context.
    ///
    /// # Parameters
    /// - `function`: The function to run.
    /// - `arguments`: The argument values, in parameter order.
    /// - `span`: The call expression, reported by errors about the call
    ///   itself and recorded as the entry point of the activation.
    /// - `caller`: The context the call is made from.
    ///
    /// # Returns
    /// The value of the body.
    ///
    /// # Errors
    /// - `ArgumentCount` if the number of arguments differs from the number
    ///   of parameters.
    /// - `CallDepthExceeded` if the call would nest deeper than the
    ///   configured limit.
    /// - `ArgumentType` for the first argument whose type disagrees with its
    ///   parameter's annotation.
    /// - Any error raised by the body.
    pub fn execute(&mut self,
                   function: &Function,
                   arguments: Vec<Value>,
                   span: &Span,
                   caller: ContextId)
                   -> EvalResult<Value> {
        let definition = &function.definition;
        let name = function.name();

        if arguments.len() != function.arity() {
            let kind = RuntimeErrorKind::ArgumentCount { function: name.to_string(),
                                                         expected: function.arity(),
                                                         found:    arguments.len(), };
            return Err(self.error(kind, span, caller));
        }

        if self.depth >= self.max_call_depth {
            let kind = RuntimeErrorKind::CallDepthExceeded { limit: self.max_call_depth };
            return Err(self.error(kind, span, caller));
        }

        for (parameter, argument) in definition.parameters.iter().zip(&arguments) {
            let found = argument.value_type();
            if !parameter.static_type.agrees_with(&found) {
                let kind = RuntimeErrorKind::ArgumentType { function: name.to_string(),
                                                            parameter: parameter.name.clone(),
                                                            expected: parameter.static_type.clone(),
                                                            found };
                return Err(self.error(kind, span, caller));
            }
        }

        let mark = self.contexts.watermark();
        let entry = Entry { caller,
                            position: span.start.clone() };
        let activation = self.contexts.push(name, function.closure, entry);

        for (parameter, argument) in definition.parameters.iter().zip(arguments) {
            self.contexts.define(activation,
                                 &parameter.name,
                                 Variable { value:         argument,
                                            declared_type: parameter.static_type.clone(),
                                            reassignable:  false, });
        }

        self.depth += 1;
        debug!("Calling {name} at depth {}", self.depth);
        let result = self.eval_value(&definition.body, activation);
        self.depth -= 1;
        self.contexts.release_from(mark, result.as_ref().ok());

        result
    }
}
