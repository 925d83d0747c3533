/// The context module holds runtime name bindings.
///
/// Every scope is a context: the global one and one per function
/// activation. Contexts live in an arena and refer to their lexical parent
/// and, for activations, to the context they were called from.
///
/// # Responsibilities
/// - Stores variables with their declared type and reassignability.
/// - Resolves names through the lexical parent chain.
/// - Keeps contexts reachable through closures alive and releases the rest.
/// - Builds tracebacks from the chain of callers.
pub mod context;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the tree produced by the parser, evaluates every
/// expression against a context and produces the value of the program. It is
/// the last stage of interpretation.
///
/// # Responsibilities
/// - Evaluates every kind of AST node.
/// - Handles variables, functions, closures and control flow.
/// - Reports runtime errors such as division by zero, undefined names or
///   calls nested too deeply.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a sequence of tokens,
/// each corresponding to a meaningful language element such as a number,
/// string, identifier, operator or keyword. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with their source span.
/// - Handles numeric, string and character literals, identifiers and
///   operators.
/// - Skips whitespace and comments.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token sequence produced by the lexer and
/// constructs an AST representing the program. Static types are inferred
/// while the tree is built and checked where they are known.
///
/// # Responsibilities
/// - Converts tokens into AST nodes following the precedence ladder.
/// - Validates the grammar, reporting the most specific error found.
/// - Checks operand, branch, loop bound, annotation and argument types.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// Every expression evaluates to a `Value`: an `Int`, a `Float`, a string, a
/// character or a function. `Int` and `Float` are distinct and never
/// converted into each other implicitly.
///
/// # Responsibilities
/// - Defines the `Value` enum and the `Function` closure type.
/// - Reports the runtime type of a value and its truthiness.
/// - Formats values for display.
pub mod value;
