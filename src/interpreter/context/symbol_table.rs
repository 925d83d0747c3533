use std::collections::HashMap;

use crate::{ast::StaticType, interpreter::value::core::Value};

/// A bound name: its value, the type it was declared with and whether it
/// may be assigned again.
///
/// `reassignable` is `false` for `val`, named functions and parameters, and
/// `true` for `var` and loop counters.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub value:         Value,
    pub declared_type: StaticType,
    pub reassignable:  bool,
}

impl Variable {
    /// A binding that can never be assigned again.
    #[must_use]
    pub fn constant(value: Value) -> Self {
        Self { declared_type: value.value_type(),
               value,
               reassignable: false }
    }

    /// A binding that accepts any later value agreeing with
    /// `declared_type`.
    #[must_use]
    pub const fn mutable(value: Value, declared_type: StaticType) -> Self {
        Self { value,
               declared_type,
               reassignable: true }
    }
}

/// The names bound directly in one context.
///
/// Lookups here never consult a parent; walking the scope chain is done by
/// [`Contexts`](crate::interpreter::context::Contexts).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolTable {
    symbols: HashMap<String, Variable>,
}

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.symbols.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.symbols.get_mut(name)
    }

    /// Binds `name` locally, replacing any previous binding.
    pub fn set(&mut self, name: &str, variable: Variable) {
        self.symbols.insert(name.to_string(), variable);
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// The local bindings, in no particular order.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.symbols.values()
    }
}
