use std::{fmt, rc::Rc};

use crate::{error::position::Span, util::num::format_float};

/// The static type of an expression, as far as the parser can tell.
///
/// `Unknown` stands for expressions whose type is only known at runtime, such
/// as a bare variable reference. Checks involving `Unknown` are skipped by the
/// parser and left to the interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StaticType {
    Int,
    Float,
    String,
    Char,
    /// A function, with the static type of its body.
    Function(Box<StaticType>),
    Unknown,
}

impl StaticType {
    /// Resolves a simple type name used in an annotation. `Function` types are
    /// spelled with a return type and are handled by the parser.
    ///
    /// # Example
    /// ```
    /// use blazescript::ast::StaticType;
    ///
    /// assert_eq!(StaticType::from_name("Float"), Some(StaticType::Float));
    /// assert_eq!(StaticType::from_name("Bool"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Int" => Some(Self::Int),
            "Float" => Some(Self::Float),
            "String" => Some(Self::String),
            "Char" => Some(Self::Char),
            _ => None,
        }
    }

    /// Whether two types can stand for the same value. `Unknown` agrees with
    /// everything, also inside function types.
    ///
    /// # Example
    /// ```
    /// use blazescript::ast::StaticType;
    ///
    /// let function = StaticType::Function(Box::new(StaticType::Unknown));
    ///
    /// assert!(StaticType::Int.agrees_with(&StaticType::Unknown));
    /// assert!(function.agrees_with(&StaticType::Function(Box::new(StaticType::Int))));
    /// assert!(!StaticType::Int.agrees_with(&StaticType::Float));
    /// ```
    #[must_use]
    pub fn agrees_with(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Unknown, _) | (_, Self::Unknown) => true,
            (Self::Function(left), Self::Function(right)) => left.agrees_with(right),
            _ => self == other,
        }
    }

    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for StaticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => write!(f, "Int"),
            Self::Float => write!(f, "Float"),
            Self::String => write!(f, "String"),
            Self::Char => write!(f, "Char"),
            Self::Function(returns) => write!(f, "Function: {returns}"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A numeric literal. Whether a number is an `Int` or a `Float` is decided by
/// the lexer and stays fixed from then on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => f.write_str(&format_float(*value)),
        }
    }
}

/// A parsed source text: the statements separated by newlines or `;`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Expr>,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, statement) in self.statements.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

/// An abstract syntax tree (AST) node representing an expression in the
/// language.
///
/// Every construct is an expression, declarations and loops included. Each
/// variant carries the span of source it was parsed from; composite nodes
/// span from their first to their last token. Nodes whose type is not implied
/// by the variant store the static type computed by the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// An `Int` or `Float` literal.
    NumberLiteral {
        value: Number,
        span:  Span,
    },
    /// A `"string"` literal, escapes already resolved.
    StringLiteral {
        value: String,
        span:  Span,
    },
    /// A `'c'` literal.
    CharLiteral {
        value: char,
        span:  Span,
    },
    /// A prefix operator applied to an operand, like `-x` or `not x`.
    UnaryOp {
        /// The operator.
        op:      UnaryOperator,
        /// The operand expression.
        operand: Box<Expr>,
        /// Source of the operator and operand.
        span:    Span,
    },
    /// An infix operator applied to two operands, such as `a + b`.
    BinaryOp {
        /// Left operand.
        left:        Box<Expr>,
        /// The operator.
        op:          BinaryOperator,
        /// Right operand.
        right:       Box<Expr>,
        /// Type of the result, computed from both operands.
        static_type: StaticType,
        /// Source from the left to the right operand.
        span:        Span,
    },
    /// Reference to a variable by name.
    VarAccess {
        /// Name of the variable.
        name: String,
        /// Source of the name.
        span: Span,
    },
    /// A `val` or `var` declaration.
    VarAssign {
        /// Name being declared.
        name:         String,
        /// The annotated type, if any.
        declared:     Option<StaticType>,
        /// The initializer.
        value:        Box<Expr>,
        /// `true` for `var`, `false` for `val`.
        reassignable: bool,
        /// Source from the keyword to the end of the initializer.
        span:         Span,
    },
    /// `name = value`, updating an existing `var`.
    VarReassign {
        /// Name being reassigned.
        name:  String,
        /// The new value.
        value: Box<Expr>,
        /// Source from the name to the end of the value.
        span:  Span,
    },
    /// `if c then a else if d then b else e`
    If {
        /// The `if` and `else if` branches, in order.
        branches:    Vec<Branch>,
        /// The final `else` body.
        else_body:   Option<Box<Expr>>,
        /// The type shared by all branches.
        static_type: StaticType,
        /// Source from `if` to the end of the last body.
        span:        Span,
    },
    /// `for i = start to end step s then body`
    For {
        /// Counter name and bounds.
        header: Box<ForHeader>,
        /// Loop body, evaluated once per counter value.
        body:   Box<Expr>,
        /// Source from `for` to the end of the body.
        span:   Span,
    },
    /// `while condition then body`
    While {
        /// Evaluated before every iteration.
        condition: Box<Expr>,
        /// The loop body.
        body:      Box<Expr>,
        /// Source from `while` to the end of the body.
        span:      Span,
    },
    /// A named or anonymous function definition.
    FuncDef {
        /// The definition, shared with every function value created from it.
        function: Rc<FunctionDef>,
    },
    /// Calls a function value with arguments.
    Call {
        /// The expression producing the function.
        callee:      Box<Expr>,
        /// Argument expressions, evaluated left to right.
        arguments:   Vec<Expr>,
        /// The return type, when the callee's definition is known.
        static_type: StaticType,
        /// Source from the callee to the closing parenthesis.
        span:        Span,
    },
}

impl Expr {
    /// Returns the source range this expression was parsed from.
    #[must_use]
    pub fn span(&self) -> &Span {
        match self {
            Self::NumberLiteral { span, .. }
            | Self::StringLiteral { span, .. }
            | Self::CharLiteral { span, .. }
            | Self::UnaryOp { span, .. }
            | Self::BinaryOp { span, .. }
            | Self::VarAccess { span, .. }
            | Self::VarAssign { span, .. }
            | Self::VarReassign { span, .. }
            | Self::If { span, .. }
            | Self::For { span, .. }
            | Self::While { span, .. }
            | Self::Call { span, .. } => span,
            Self::FuncDef { function } => &function.span,
        }
    }

    /// Returns the static type of the expression.
    ///
    /// Variable references are `Unknown`. A `for` loop has the type of its
    /// start value and a `while` loop the type of its body.
    #[must_use]
    pub fn static_type(&self) -> StaticType {
        match self {
            Self::NumberLiteral { value: Number::Int(_), .. } => StaticType::Int,
            Self::NumberLiteral { value: Number::Float(_), .. } => StaticType::Float,
            Self::StringLiteral { .. } => StaticType::String,
            Self::CharLiteral { .. } => StaticType::Char,
            Self::UnaryOp { op: UnaryOperator::Not, .. } => StaticType::Int,
            Self::UnaryOp { operand, .. } => operand.static_type(),
            Self::BinaryOp { static_type, .. }
            | Self::If { static_type, .. }
            | Self::Call { static_type, .. } => static_type.clone(),
            Self::VarAccess { .. } => StaticType::Unknown,
            Self::VarAssign { declared, value, .. } => {
                declared.clone().unwrap_or_else(|| value.static_type())
            },
            Self::VarReassign { value, .. } => value.static_type(),
            Self::For { header, .. } => header.start.static_type(),
            Self::While { body, .. } => body.static_type(),
            Self::FuncDef { function } => function.static_type(),
        }
    }
}

/// One `if` or `else if` arm.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub condition: Expr,
    pub body:      Expr,
}

/// The counter and bounds of a `for` loop.
#[derive(Debug, Clone, PartialEq)]
pub struct ForHeader {
    /// Name of the counter variable.
    pub variable: String,
    /// First counter value.
    pub start:    Expr,
    /// Bound the counter stops at, excluded.
    pub end:      Expr,
    /// Increment; `1` of the start's type when omitted.
    pub step:     Option<Expr>,
}

/// A typed function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name:        String,
    pub static_type: StaticType,
    pub span:        Span,
}

/// Stores the definition of a function.
///
/// Function values hold this definition behind an `Rc`, so calling a
/// function never copies its body.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// Name of the function; `None` for anonymous functions.
    pub name:       Option<String>,
    /// The typed parameters, in order.
    pub parameters: Vec<Parameter>,
    /// The expression evaluated on each call.
    pub body:       Expr,
    /// Source from `fun` to the end of the body.
    pub span:       Span,
}

impl FunctionDef {
    /// The type of a function value created from this definition.
    #[must_use]
    pub fn static_type(&self) -> StaticType {
        StaticType::Function(Box::new(self.body.static_type()))
    }
}

/// The operators that can appear between two operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    And,
    Or,
}

impl BinaryOperator {
    /// Arithmetic operators produce a value of their operands' type, all
    /// others produce an `Int` truth value.
    #[must_use]
    pub const fn is_arithmetic(self) -> bool {
        matches!(self,
                 Self::Add | Self::Subtract | Self::Multiply | Self::Divide | Self::Power)
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Power => "^",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::And => "and",
            Self::Or => "or",
        };
        f.write_str(symbol)
    }
}

/// The prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,
    Negate,
    Not,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
                        Self::Plus => "+",
                        Self::Negate => "-",
                        Self::Not => "not",
                    })
    }
}

/// Renders the tree for diagnostics, with every operation parenthesized. The
/// output is meant for reading and is not guaranteed to parse back.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NumberLiteral { value, .. } => write!(f, "{value}"),
            Self::StringLiteral { value, .. } => write!(f, "\"{}\"", value.escape_debug()),
            Self::CharLiteral { value, .. } => write!(f, "'{}'", value.escape_debug()),
            Self::UnaryOp { op: UnaryOperator::Not, operand, .. } => write!(f, "(not {operand})"),
            Self::UnaryOp { op, operand, .. } => write!(f, "({op}{operand})"),
            Self::BinaryOp { left, op, right, .. } => write!(f, "({left} {op} {right})"),
            Self::VarAccess { name, .. } => f.write_str(name),
            Self::VarAssign { name,
                              declared,
                              value,
                              reassignable,
                              .. } => {
                let keyword = if *reassignable { "var" } else { "val" };
                match declared {
                    Some(declared) => write!(f, "({keyword} {name}: {declared} = {value})"),
                    None => write!(f, "({keyword} {name} = {value})"),
                }
            },
            Self::VarReassign { name, value, .. } => write!(f, "({name} = {value})"),
            Self::If { branches, else_body, .. } => {
                for (i, branch) in branches.iter().enumerate() {
                    let keyword = if i == 0 { "(if" } else { " else if" };
                    write!(f, "{keyword} {} then {}", branch.condition, branch.body)?;
                }
                if let Some(else_body) = else_body {
                    write!(f, " else {else_body}")?;
                }
                write!(f, ")")
            },
            Self::For { header, body, .. } => {
                write!(f, "(for {} = {} to {}", header.variable, header.start, header.end)?;
                if let Some(step) = &header.step {
                    write!(f, " step {step}")?;
                }
                write!(f, " then {body})")
            },
            Self::While { condition, body, .. } => write!(f, "(while {condition} then {body})"),
            Self::FuncDef { function } => {
                write!(f, "(fun")?;
                if let Some(name) = &function.name {
                    write!(f, " {name}")?;
                }
                let parameters = function.parameters
                                         .iter()
                                         .map(|p| format!("{}: {}", p.name, p.static_type))
                                         .collect::<Vec<_>>();
                write!(f, "({}) => {})", parameters.join(", "), function.body)
            },
            Self::Call { callee, arguments, .. } => {
                let arguments = arguments.iter().map(ToString::to_string).collect::<Vec<_>>();
                write!(f, "{callee}({})", arguments.join(", "))
            },
        }
    }
}
