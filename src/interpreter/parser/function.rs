use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::{Expr, FunctionDef, Parameter, StaticType},
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
    },
};

/// What the parser knows about a named function: its parameters and the
/// static type of its body.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    pub parameters:  Vec<Parameter>,
    pub return_type: StaticType,
}

/// The function signatures visible in one function body. A name mapped to
/// `None` is shadowed by something other than a known function.
pub type SignatureScope = HashMap<String, Option<Signature>>;

impl Signature {
    fn of(function: &FunctionDef) -> Self {
        Self { parameters:  function.parameters.clone(),
               return_type: function.body.static_type(), }
    }
}

impl Parser<'_> {
    /// Parses a function definition.
    ///
    /// Syntax: `fun <name>? ( (<param> : <type> ("," <param> : <type>)*)? ) => <body>`
    ///
    /// The function's own name is in scope in its body so it can recurse.
    /// The body may start on the line after `=>`.
    ///
    /// # Returns
    /// An `Expr::FuncDef` holding the shared definition.
    ///
    /// # Errors
    /// - `UnexpectedToken` if `(`, `)` or `=>` is missing.
    /// - `MissingParameterType` or `UnknownType` for badly annotated
    ///   parameters.
    pub(super) fn parse_function_definition(&mut self) -> ParseResult<Expr> {
        let fun_token = self.advance();

        let name = match &self.peek().kind {
            TokenKind::Identifier(name) => {
                self.advance();
                Some(name.clone())
            },
            _ => None,
        };

        self.expect(&TokenKind::LeftParen, "a function name or '('")?;
        let (parameters, _) = self.parse_comma_separated(Self::parse_parameter)?;
        self.expect(&TokenKind::Arrow, "'=>'")?;
        self.skip_newlines();

        if let Some(name) = &name {
            let signature = Signature { parameters:  parameters.clone(),
                                        return_type: StaticType::Unknown, };
            self.define_signature(name, Some(signature));
        }

        self.scopes.push(parameters.iter().map(|p| (p.name.clone(), None)).collect());
        let body = self.parse_statement();
        self.scopes.pop();
        let body = body?;

        let span = fun_token.span.to(body.span());
        let function = FunctionDef { name,
                                     parameters,
                                     body,
                                     span };

        if let Some(name) = &function.name {
            self.define_signature(name, Some(Signature::of(&function)));
        }

        Ok(Expr::FuncDef { function: Rc::new(function) })
    }

    /// Parses one `name: Type` parameter.
    ///
    /// # Errors
    /// `MissingParameterType` if the `:` annotation is absent.
    fn parse_parameter(&mut self) -> ParseResult<Parameter> {
        let (name, span) = self.expect_identifier("a parameter name")?;

        if !self.check(&TokenKind::Colon) {
            return Err(ParseError::MissingParameterType { name, span });
        }
        self.advance();
        let static_type = self.parse_type()?;

        Ok(Parameter { name,
                       static_type,
                       span })
    }

    /// Parses a type annotation.
    ///
    /// Grammar: `type := "Int" | "Float" | "String" | "Char" | "Function" (":" type)?`
    ///
    /// A bare `Function` has an unknown return type.
    ///
    /// # Errors
    /// - `UnexpectedToken` if no identifier follows.
    /// - `UnknownType` if the name is not a type.
    pub(super) fn parse_type(&mut self) -> ParseResult<StaticType> {
        let (name, span) = self.expect_identifier("a type name")?;

        if name == "Function" {
            if !self.check(&TokenKind::Colon) {
                return Ok(StaticType::Function(Box::new(StaticType::Unknown)));
            }
            self.advance();
            return Ok(StaticType::Function(Box::new(self.parse_type()?)));
        }

        StaticType::from_name(&name).ok_or(ParseError::UnknownType { name, span })
    }

    /// Type-checks the arguments of a call against the callee's parameters
    /// when the callee is known, and returns the call's static type.
    ///
    /// Arity is left to the interpreter, which reports it with a traceback.
    ///
    /// # Errors
    /// `ArgumentMismatch` for the first argument whose known type disagrees
    /// with its parameter.
    pub(super) fn check_call(&self, callee: &Expr, arguments: &[Expr]) -> ParseResult<StaticType> {
        let signature = match callee {
            Expr::VarAccess { name, .. } => self.signature(name),
            Expr::FuncDef { function } => Some(Signature::of(function)),
            _ => None,
        };

        let Some(signature) = signature else {
            return Ok(match callee.static_type() {
                          StaticType::Function(returns) => *returns,
                          _ => StaticType::Unknown,
                      });
        };

        for (parameter, argument) in signature.parameters.iter().zip(arguments) {
            let found = argument.static_type();
            if !parameter.static_type.agrees_with(&found) {
                let function = match callee {
                    Expr::VarAccess { name, .. } => name.clone(),
                    _ => "<anonymous>".to_string(),
                };
                let expected = parameter.static_type.clone();
                return Err(ParseError::ArgumentMismatch { function,
                                                          parameter: parameter.name.clone(),
                                                          expected,
                                                          found,
                                                          span: argument.span().clone() });
            }
        }

        Ok(signature.return_type)
    }

    /// Records what a declaration binds: a signature for function values,
    /// otherwise a shadowing entry.
    pub(super) fn record_binding(&mut self, name: &str, value: &Expr) {
        let signature = match value {
            Expr::FuncDef { function } => Some(Signature::of(function)),
            _ => None,
        };
        self.define_signature(name, signature);
    }

    /// Marks `name` as no longer referring to a known function in every
    /// scope, after a reassignment or when it becomes a loop counter.
    pub(super) fn forget_signature(&mut self, name: &str) {
        for scope in &mut self.scopes {
            if let Some(entry) = scope.get_mut(name) {
                *entry = None;
            }
        }
    }

    fn define_signature(&mut self, name: &str, signature: Option<Signature>) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), signature);
        }
    }

    /// Looks a name up from the innermost function body outwards.
    fn signature(&self, name: &str) -> Option<Signature> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
            .and_then(Clone::clone)
    }
}
