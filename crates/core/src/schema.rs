//! Argument schemas: named, typed declarations parsed over token streams.
//!
//! A [`Schema`] is built once per endpoint, declaring the arguments that
//! endpoint accepts, and is then shared immutably across calls. Parsing
//! takes a flattened flag-form token stream (`["--name", "value", ...]`),
//! splits it into declared (known) and undeclared (unknown) arguments, and
//! coerces the known values through the option engine. The schema has no
//! HTTP knowledge; request dispatch lives in the `reqparse-http` crate.

use std::error::Error as _;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::engine::Engine;
use crate::error::{ParseError, SchemaError};

/// Prefix marking a stream token as an option name.
pub(crate) const FLAG_PREFIX: &str = "--";

// ──────────────────────────────────────────────
// Declarations
// ──────────────────────────────────────────────

/// Typed coercion applied to an argument's raw value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgType {
    /// Raw value taken verbatim.
    #[default]
    Str,
    /// Coerced to a 64-bit signed integer.
    Int,
    /// Coerced to a finite 64-bit float.
    Float,
    /// Coerced to `true`/`false`.
    Bool,
}

/// A single named argument declaration. Immutable once declared on a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgDecl {
    name: String,
    ty: ArgType,
    required: bool,
    default: Option<Value>,
}

impl ArgDecl {
    /// A string-typed, optional declaration with no default.
    pub fn new(name: impl Into<String>) -> Self {
        ArgDecl {
            name: name.into(),
            ty: ArgType::Str,
            required: false,
            default: None,
        }
    }

    /// Set the coercion applied to this argument's raw value.
    pub fn typed(mut self, ty: ArgType) -> Self {
        self.ty = ty;
        self
    }

    /// Mark the argument as required.
    ///
    /// Required-ness is diagnostic metadata only: an absent argument still
    /// resolves to its default and never fails the parse.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Value used when the argument is absent from the stream.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arg_type(&self) -> ArgType {
        self.ty
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

impl From<&str> for ArgDecl {
    fn from(name: &str) -> Self {
        ArgDecl::new(name)
    }
}

// ──────────────────────────────────────────────
// Parse outcome
// ──────────────────────────────────────────────

/// Result of parsing one token stream against a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseOutcome {
    /// Declared name -> coerced value, or the declared default, or
    /// `Value::Null` when absent with no default. Always holds every
    /// declared name.
    pub known: Map<String, Value>,

    /// Leftover (name, raw value) pairs in stream order. `None` means
    /// unknown arguments were dropped; `Some` (possibly empty) means they
    /// were kept. The two are distinguishable on purpose.
    pub unknown: Option<Vec<(String, String)>>,
}

impl ParseOutcome {
    /// Coerced value for a declared argument.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.known.get(name)
    }
}

// ──────────────────────────────────────────────
// Schema
// ──────────────────────────────────────────────

/// Ordered collection of argument declarations, keyed by name.
///
/// Build the schema fully, then treat it as immutable: every parsing entry
/// point takes `&self`, so a finished schema can be shared freely across
/// request-handling tasks.
#[derive(Debug, Clone)]
pub struct Schema {
    decls: Vec<ArgDecl>,
    engine: Engine,
}

impl Schema {
    pub fn new() -> Self {
        Schema {
            decls: Vec::new(),
            engine: Engine::new(),
        }
    }

    /// Declare an argument, consuming and returning the schema so
    /// declarations chain with `?`.
    ///
    /// Fails with [`SchemaError::DuplicateArgument`] when the name is
    /// already declared, and with [`SchemaError::InvalidName`] when the
    /// name is empty or would collide with flag syntax.
    pub fn declare(mut self, decl: impl Into<ArgDecl>) -> Result<Self, SchemaError> {
        let decl = decl.into();
        validate_name(&decl.name)?;
        if self.find(&decl.name).is_some() {
            return Err(SchemaError::DuplicateArgument { name: decl.name });
        }
        self.engine.register(&decl.name, decl.ty);
        self.decls.push(decl);
        Ok(self)
    }

    /// Declarations in insertion order.
    pub fn declarations(&self) -> &[ArgDecl] {
        &self.decls
    }

    fn find(&self, name: &str) -> Option<&ArgDecl> {
        self.decls.iter().find(|decl| decl.name == name)
    }

    /// Flatten (name, raw value) pairs into flag form and parse them.
    pub fn parse_pairs(
        &self,
        pairs: &[(String, String)],
        drop_unknown: bool,
    ) -> Result<ParseOutcome, ParseError> {
        let mut tokens = Vec::with_capacity(pairs.len() * 2);
        for (name, value) in pairs {
            tokens.push(format!("{FLAG_PREFIX}{name}"));
            tokens.push(value.clone());
        }
        self.parse_tokens(&tokens, drop_unknown)
    }

    /// Parse a flag-form token stream, splitting it into known and unknown
    /// arguments.
    ///
    /// Tokens matching a declaration are coerced through the engine; a
    /// coercion failure is [`ParseError::ArgumentType`] naming the argument
    /// and the offending raw value. Tokens matching no declaration are
    /// collected as unknown and either dropped (`drop_unknown = true`,
    /// `unknown = None`) or returned in stream order. An argument that is
    /// simply absent never fails the parse.
    pub fn parse_tokens(
        &self,
        tokens: &[String],
        drop_unknown: bool,
    ) -> Result<ParseOutcome, ParseError> {
        let units = scan_units(tokens)?;

        let mut engine_tokens = Vec::new();
        let mut unknown = Vec::new();
        for (name, value) in units {
            if self.find(&name).is_none() {
                unknown.push((name, value.unwrap_or_default()));
                continue;
            }
            let Some(value) = value else {
                return Err(ParseError::ArgumentParse {
                    message: format!("argument '{FLAG_PREFIX}{name}' expected one value"),
                });
            };
            engine_tokens.push(format!("{FLAG_PREFIX}{name}"));
            engine_tokens.push(value);
        }

        let matches = self.engine.parse(&engine_tokens).map_err(map_engine_error)?;

        let mut known = Map::new();
        for decl in &self.decls {
            known.insert(decl.name.clone(), read_value(&matches, decl));
        }

        Ok(ParseOutcome {
            known,
            unknown: if drop_unknown { None } else { Some(unknown) },
        })
    }
}

impl Default for Schema {
    fn default() -> Self {
        Schema::new()
    }
}

// ──────────────────────────────────────────────
// Stream scanning and value readback
// ──────────────────────────────────────────────

/// Scan a flag-form stream into (name, value) units.
///
/// Accepts both the split form (`--name value`) and the single-token form
/// (`--name=value`). A flag followed by another flag (or by nothing) yields
/// a unit with no value; a bare token where a flag is expected is a
/// malformed stream.
fn scan_units(tokens: &[String]) -> Result<Vec<(String, Option<String>)>, ParseError> {
    let mut units = Vec::new();
    let mut iter = tokens.iter().peekable();

    while let Some(token) = iter.next() {
        let flag = match token.strip_prefix(FLAG_PREFIX) {
            Some(flag) if !flag.is_empty() => flag,
            _ => {
                return Err(ParseError::ArgumentParse {
                    message: format!("unexpected bare token {token:?} in stream"),
                });
            }
        };

        if let Some((name, value)) = flag.split_once('=') {
            units.push((name.to_owned(), Some(value.to_owned())));
            continue;
        }

        match iter.peek() {
            Some(next) if !next.starts_with(FLAG_PREFIX) => {
                let value = (*next).clone();
                iter.next();
                units.push((flag.to_owned(), Some(value)));
            }
            _ => units.push((flag.to_owned(), None)),
        }
    }

    Ok(units)
}

/// Coerced value for one declaration, falling back to its default and then
/// to `Value::Null`.
fn read_value(matches: &clap::ArgMatches, decl: &ArgDecl) -> Value {
    let present = match decl.ty {
        ArgType::Str => matches
            .get_one::<String>(&decl.name)
            .map(|v| Value::String(v.clone())),
        ArgType::Int => matches.get_one::<i64>(&decl.name).map(|v| Value::from(*v)),
        ArgType::Float => matches
            .get_one::<f64>(&decl.name)
            .and_then(|v| serde_json::Number::from_f64(*v))
            .map(Value::Number),
        ArgType::Bool => matches.get_one::<bool>(&decl.name).map(|v| Value::Bool(*v)),
    };
    present
        .or_else(|| decl.default.clone())
        .unwrap_or(Value::Null)
}

/// Normalize an engine error into a typed parse failure.
fn map_engine_error(err: clap::Error) -> ParseError {
    use clap::error::{ContextKind, ContextValue, ErrorKind};

    if err.kind() == ErrorKind::ValueValidation {
        let name = match err.get(ContextKind::InvalidArg) {
            Some(ContextValue::String(display)) => Some(option_name(display)),
            _ => None,
        };
        let value = match err.get(ContextKind::InvalidValue) {
            Some(ContextValue::String(value)) => Some(value.clone()),
            _ => None,
        };
        if let (Some(name), Some(value)) = (name, value) {
            let message = err
                .source()
                .map(|source| source.to_string())
                .unwrap_or_else(|| first_line(&err));
            return ParseError::ArgumentType {
                name,
                value,
                message,
            };
        }
    }

    ParseError::ArgumentParse {
        message: first_line(&err),
    }
}

/// First line of the engine's rendered error, without the `error: ` prefix.
fn first_line(err: &clap::Error) -> String {
    let rendered = err.to_string();
    rendered
        .lines()
        .next()
        .unwrap_or("")
        .trim_start_matches("error: ")
        .to_owned()
}

/// Bare option name from the engine's `--name <name>` display form.
fn option_name(display: &str) -> String {
    let display = display.trim();
    let display = display.strip_prefix(FLAG_PREFIX).unwrap_or(display);
    display
        .split([' ', '<', '='])
        .next()
        .unwrap_or(display)
        .to_owned()
}

fn validate_name(name: &str) -> Result<(), SchemaError> {
    let invalid = name.is_empty()
        || name.starts_with('-')
        || name.contains('=')
        || name.contains(char::is_whitespace);
    if invalid {
        return Err(SchemaError::InvalidName {
            name: name.to_owned(),
        });
    }
    Ok(())
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
