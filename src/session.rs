use log::trace;

use crate::{
    error::{Error, position::SourceFile},
    interpreter::{
        evaluator::core::{DEFAULT_MAX_CALL_DEPTH, Interpreter},
        lexer::tokenize,
        parser::parse,
        value::core::Value,
    },
};

/// Settings of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// How many function calls may be active at once.
    pub max_call_depth:  usize,
    /// Keep the global context from one run to the next.
    pub persist_globals: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { max_call_depth:  DEFAULT_MAX_CALL_DEPTH,
               persist_globals: false, }
    }
}

impl SessionConfig {
    #[must_use]
    pub const fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }

    #[must_use]
    pub const fn with_persist_globals(mut self, persist_globals: bool) -> Self {
        self.persist_globals = persist_globals;
        self
    }
}

/// Interpreter state reused across runs.
///
/// ## Usage
///
/// A session configured with `persist_globals` behaves like a REPL: every
/// run sees the globals left by the previous ones. Otherwise each run starts
/// from a fresh global context, whose bindings stay inspectable through
/// [`Session::lookup`] until the next run.
///
/// # Example
/// ```
/// use blazescript::{Session, SessionConfig, interpreter::value::core::Value};
///
/// let mut session = Session::new(SessionConfig::default().with_persist_globals(true));
/// session.run("<stdin>", "val square = fun (x: Float) => x * x").unwrap();
///
/// let result = session.run("<stdin>", "square(1.5)").unwrap();
/// assert_eq!(result, Some(Value::Float(2.25)));
/// ```
pub struct Session {
    config:      SessionConfig,
    interpreter: Interpreter,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self { config,
               interpreter: Interpreter::new(config.max_call_depth) }
    }

    /// Lexes, parses and evaluates `source`.
    ///
    /// # Parameters
    /// - `name`: The file name shown in diagnostics and tracebacks.
    /// - `source`: The program text.
    ///
    /// # Returns
    /// The value of the last statement, or `None` if there is none or it
    /// produced no value.
    ///
    /// # Errors
    /// Exactly one of [`Error::Lexical`], [`Error::Syntax`] or
    /// [`Error::Runtime`]. Nothing is evaluated unless lexing and parsing
    /// succeed; bindings made before a runtime error remain.
    pub fn run(&mut self, name: &str, source: &str) -> Result<Option<Value>, Error> {
        if !self.config.persist_globals {
            self.interpreter.reset();
        }

        let source = SourceFile::new(name, source);
        trace!("Running {name}");

        let tokens = tokenize(&source)?;
        let program = parse(&tokens)?;

        Ok(self.interpreter.run(&program)?)
    }

    /// The value bound to `name` in the global context.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.interpreter.global(name)
    }

    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub const fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }
}
