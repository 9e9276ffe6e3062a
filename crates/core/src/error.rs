use thiserror::Error;

/// Errors raised while declaring arguments on a schema.
///
/// Both variants are build-time failures: the schema definition itself is
/// wrong and the caller must fix it, there is nothing to recover.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The name was already declared on this schema.
    #[error("duplicate argument declared: {name}")]
    DuplicateArgument { name: String },

    /// The name is empty, or would collide with option syntax once it is
    /// prefixed into flag form.
    #[error("invalid argument name: {name:?}")]
    InvalidName { name: String },
}

/// Errors raised while parsing a token stream against a schema.
///
/// Parsing either fully succeeds or fails with exactly one of these; no
/// partial results are returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A raw value could not be coerced to the declared type.
    #[error("invalid value {value:?} for argument '{name}': {message}")]
    ArgumentType {
        name: String,
        value: String,
        message: String,
    },

    /// Any other parsing failure: a malformed token stream, a declared flag
    /// with no value, or an engine error.
    #[error("failed to parse provided arguments ({message})")]
    ArgumentParse { message: String },
}
