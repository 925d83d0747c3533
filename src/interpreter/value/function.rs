use std::{fmt, rc::Rc};

use crate::{
    ast::{FunctionDef, StaticType},
    interpreter::context::ContextId,
};

/// A callable value.
///
/// The definition is shared with the AST. `closure` is the context the
/// function was defined in; calls resolve free names from there, not from
/// the caller.
#[derive(Debug, Clone)]
pub struct Function {
    pub definition: Rc<FunctionDef>,
    pub closure:    ContextId,
}

impl Function {
    #[must_use]
    pub const fn new(definition: Rc<FunctionDef>, closure: ContextId) -> Self {
        Self { definition, closure }
    }

    /// The function's name, or `<anonymous>`.
    #[must_use]
    pub fn name(&self) -> &str {
        self.definition.name.as_deref().unwrap_or("<anonymous>")
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        self.definition.parameters.len()
    }

    /// `Function: <type of the body>`
    #[must_use]
    pub fn static_type(&self) -> StaticType {
        self.definition.static_type()
    }
}

/// Two function values are equal when they come from the same definition
/// and closed over the same context.
impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.definition, &other.definition) && self.closure == other.closure
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}>", self.name())
    }
}
