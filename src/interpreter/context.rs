/// Name bindings of a single context.
///
/// Defines `Variable`, a value together with its declared type and
/// reassignability, and `SymbolTable`, the local map from names to
/// variables.
pub mod symbol_table;

use std::collections::HashSet;

use log::debug;

use crate::{
    error::{position::Position, runtime_error::Frame},
    interpreter::{
        context::symbol_table::{SymbolTable, Variable},
        value::core::Value,
    },
};

/// Display name of the global context.
pub const GLOBAL_NAME: &str = "<program>";

/// Handle to a context stored in [`Contexts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(usize);

/// Where an activation was entered from.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// The context that made the call.
    pub caller:   ContextId,
    /// The position of the call inside the caller.
    pub position: Position,
}

/// A named scope frame.
///
/// `parent` is the lexical parent used for name resolution; for a function
/// activation it is the function's closure, not the caller. `entry` is only
/// used to build tracebacks.
#[derive(Debug, Clone)]
pub struct Context {
    pub display_name: String,
    pub parent:       Option<ContextId>,
    pub entry:        Option<Entry>,
    pub symbols:      SymbolTable,
    serial:           usize,
    captured:         bool,
}

impl Context {
    fn released() -> Self {
        Self { display_name: String::new(),
               parent: None,
               entry: None,
               symbols: SymbolTable::new(),
               serial: 0,
               captured: false }
    }
}

/// Arena owning every live context.
///
/// Slot 0 is the global context. Activations are pushed on call and
/// released on return unless a value that outlives the call still refers to
/// them. Released slots are reused by later pushes.
///
/// Every context carries a creation serial; a context's lexical parent
/// always has a smaller serial than the context itself.
#[derive(Debug, Clone)]
pub struct Contexts {
    contexts: Vec<Context>,
    free:     Vec<ContextId>,
    created:  usize,
}

impl Default for Contexts {
    fn default() -> Self {
        Self::new()
    }
}

impl Contexts {
    /// Creates an arena holding only the global context, with `true` and
    /// `false` predefined as the constants `1` and `0`.
    ///
    /// # Example
    /// ```
    /// use blazescript::interpreter::{context::Contexts, value::core::Value};
    ///
    /// let contexts = Contexts::new();
    /// let global = contexts.global();
    ///
    /// assert_eq!(contexts.lookup(global, "true").map(|v| &v.value), Some(&Value::Int(1)));
    /// assert!(contexts.lookup(global, "maybe").is_none());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        let mut symbols = SymbolTable::new();
        symbols.set("true", Variable::constant(Value::from(true)));
        symbols.set("false", Variable::constant(Value::from(false)));

        let global = Context { display_name: GLOBAL_NAME.to_string(),
                               parent: None,
                               entry: None,
                               symbols,
                               serial: 0,
                               captured: true };

        Self { contexts: vec![global],
               free:     Vec::new(),
               created:  1 }
    }

    #[must_use]
    pub const fn global(&self) -> ContextId {
        ContextId(0)
    }

    #[must_use]
    pub fn get(&self, id: ContextId) -> &Context {
        &self.contexts[id.0]
    }

    /// Number of live contexts, the global one included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contexts.len() - self.free.len()
    }

    /// Always `false`: the global context is never released.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds an activation context and returns its handle.
    pub fn push(&mut self, display_name: &str, parent: ContextId, entry: Entry) -> ContextId {
        let context = Context { display_name: display_name.to_string(),
                                parent: Some(parent),
                                entry: Some(entry),
                                symbols: SymbolTable::new(),
                                serial: self.created,
                                captured: false };
        self.created += 1;

        if let Some(id) = self.free.pop() {
            self.contexts[id.0] = context;
            id
        } else {
            self.contexts.push(context);
            ContextId(self.contexts.len() - 1)
        }
    }

    /// Resolves `name` from `id` outwards through the lexical parents.
    #[must_use]
    pub fn lookup(&self, id: ContextId, name: &str) -> Option<&Variable> {
        self.owner(id, name).and_then(|owner| self.get(owner).symbols.get(name))
    }

    /// Like [`Contexts::lookup`], returning the nearest binding mutably.
    pub fn lookup_mut(&mut self, id: ContextId, name: &str) -> Option<&mut Variable> {
        let owner = self.owner(id, name)?;
        self.contexts[owner.0].symbols.get_mut(name)
    }

    /// Looks `name` up in `id` only.
    #[must_use]
    pub fn local(&self, id: ContextId, name: &str) -> Option<&Variable> {
        self.get(id).symbols.get(name)
    }

    /// Binds `name` in `id`, replacing a previous local binding.
    pub fn define(&mut self, id: ContextId, name: &str, variable: Variable) {
        self.contexts[id.0].symbols.set(name, variable);
    }

    /// Records that a function value closing over `id` was created, so
    /// releasing `id` has to check whether that value escaped.
    pub fn mark_captured(&mut self, id: ContextId) {
        self.contexts[id.0].captured = true;
    }

    /// Serial of the next context to be created. Pass it to
    /// [`Contexts::release_from`] once the evaluation that follows is done.
    #[must_use]
    pub const fn watermark(&self) -> usize {
        self.created
    }

    /// Releases every context created since `mark` that can no longer be
    /// reached.
    ///
    /// A context survives if a function value closes over it and that value
    /// is `kept`, is bound in a context older than `mark`, or is bound in
    /// another surviving context. Values held by the caller must all predate
    /// `mark`, apart from `kept`.
    ///
    /// # Example
    /// ```
    /// use blazescript::{
    ///     error::position::{Position, SourceFile},
    ///     interpreter::context::{Contexts, Entry},
    /// };
    ///
    /// let mut contexts = Contexts::new();
    /// let global = contexts.global();
    /// let mark = contexts.watermark();
    ///
    /// let position = Position::new(&SourceFile::new("main.bzs", "f()"), 0);
    /// contexts.push("f", global, Entry { caller: global, position });
    /// assert_eq!(contexts.len(), 2);
    ///
    /// contexts.release_from(mark, None);
    /// assert_eq!(contexts.len(), 1);
    /// ```
    pub fn release_from(&mut self, mark: usize, kept: Option<&Value>) {
        let young = (0..self.contexts.len()).map(ContextId)
                                            .filter(|&id| self.get(id).serial >= mark)
                                            .collect::<Vec<_>>();
        if young.is_empty() {
            return;
        }

        let live = if young.iter().any(|&id| self.get(id).captured) {
            self.reachable(mark, kept)
        } else {
            HashSet::new()
        };
        if !live.is_empty() {
            debug!("Keeping {} context(s) referenced by closures", live.len());
        }

        for id in young.into_iter().filter(|id| !live.contains(id)) {
            self.contexts[id.0] = Context::released();
            self.free.push(id);
        }
    }

    /// Releases every activation no global binding refers to.
    ///
    /// Only sound while no values are held outside the arena, i.e. between
    /// two runs.
    pub fn release_unreachable(&mut self) {
        self.release_from(1, None);
    }

    /// Contexts created since `mark` that `kept` or a binding older than
    /// `mark` can still reach through closures.
    fn reachable(&self, mark: usize, kept: Option<&Value>) -> HashSet<ContextId> {
        let mut pending = self.contexts
                              .iter()
                              .filter(|context| context.serial < mark)
                              .flat_map(|context| context.symbols.variables())
                              .map(|variable| &variable.value)
                              .chain(kept)
                              .filter_map(closure_of)
                              .collect::<Vec<_>>();

        let mut live = HashSet::new();
        while let Some(id) = pending.pop() {
            let context = self.get(id);
            if context.serial < mark || !live.insert(id) {
                continue;
            }
            pending.extend(context.parent);
            pending.extend(context.symbols
                                  .variables()
                                  .filter_map(|variable| closure_of(&variable.value)));
        }

        live
    }

    /// Builds the call stack at `position` inside `id`, outermost frame
    /// first.
    ///
    /// Each frame shows where execution was inside that context: the error
    /// position for the innermost frame, the call position for the others.
    #[must_use]
    pub fn traceback(&self, id: ContextId, position: &Position) -> Vec<Frame> {
        let mut frames = Vec::new();
        let mut current = Some((id, position.clone()));

        while let Some((id, position)) = current {
            let context = self.get(id);
            frames.push(Frame { name: context.display_name.clone(),
                                position });
            current = context.entry
                             .as_ref()
                             .map(|entry| (entry.caller, entry.position.clone()));
        }

        frames.reverse();
        frames
    }

    fn owner(&self, id: ContextId, name: &str) -> Option<ContextId> {
        let mut current = Some(id);
        while let Some(id) = current {
            let context = self.get(id);
            if context.symbols.contains(name) {
                return Some(id);
            }
            current = context.parent;
        }
        None
    }
}

fn closure_of(value: &Value) -> Option<ContextId> {
    match value {
        Value::Function(function) => Some(function.closure),
        _ => None,
    }
}
