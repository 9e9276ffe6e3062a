//! Thin composition wrapper over the `clap` builder engine.
//!
//! The schema drives `clap` through this narrow interface instead of
//! extending it. Construction pins down the engine behavior the schema
//! relies on:
//!
//! - auto-help and the version flag are disabled, so any declared name
//!   (including `help`) is a plain option;
//! - long-flag abbreviation stays off, so a name matches exactly or not
//!   at all;
//! - parsing goes through `try_get_matches_from`, so every failure comes
//!   back as a value instead of printing usage and exiting the process.

use clap::builder::ValueParser;
use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::schema::ArgType;

/// Owned, pre-configured `clap` command holding one long option per
/// registered argument.
#[derive(Debug, Clone)]
pub(crate) struct Engine {
    command: Command,
}

impl Engine {
    pub(crate) fn new() -> Self {
        let command = Command::new("request")
            .no_binary_name(true)
            .disable_help_flag(true)
            .disable_version_flag(true)
            .infer_long_args(false)
            .args_override_self(true);
        Engine { command }
    }

    /// Register one long option taking exactly one value.
    ///
    /// The option is never marked required at the engine level: an absent
    /// argument must fall back to its default, not error.
    pub(crate) fn register(&mut self, name: &str, ty: ArgType) {
        let parser: ValueParser = match ty {
            ArgType::Str => ValueParser::string(),
            ArgType::Int => clap::value_parser!(i64).into(),
            ArgType::Float => ValueParser::new(parse_finite_f64),
            ArgType::Bool => clap::value_parser!(bool).into(),
        };
        let mut arg = Arg::new(name.to_owned())
            .long(name.to_owned())
            .action(ArgAction::Set)
            .num_args(1)
            .value_parser(parser);
        if matches!(ty, ArgType::Int | ArgType::Float) {
            // A leading minus on a numeric value is a sign, not a flag.
            arg = arg.allow_negative_numbers(true);
        }
        self.command = self.command.clone().arg(arg);
    }

    /// Parse a flattened flag-form token stream.
    ///
    /// The command is cloned per call so a fully-built schema can be shared
    /// behind `&self` across request handlers.
    pub(crate) fn parse(&self, tokens: &[String]) -> Result<ArgMatches, clap::Error> {
        self.command.clone().try_get_matches_from(tokens)
    }
}

/// Float coercion: any parseable, finite `f64`.
///
/// Non-finite values are rejected rather than silently degrading when the
/// result is rendered as JSON.
fn parse_finite_f64(raw: &str) -> Result<f64, String> {
    let value = raw.parse::<f64>().map_err(|err| err.to_string())?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err("number must be finite".to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_option_parses_its_value() {
        let mut engine = Engine::new();
        engine.register("username", ArgType::Str);

        let tokens = vec!["--username".to_owned(), "lib".to_owned()];
        let matches = engine.parse(&tokens).expect("parse should succeed");
        assert_eq!(
            matches.get_one::<String>("username").map(String::as_str),
            Some("lib")
        );
    }

    #[test]
    fn repeated_option_keeps_the_last_value() {
        let mut engine = Engine::new();
        engine.register("page", ArgType::Int);

        let tokens = vec![
            "--page".to_owned(),
            "1".to_owned(),
            "--page".to_owned(),
            "2".to_owned(),
        ];
        let matches = engine.parse(&tokens).expect("parse should succeed");
        assert_eq!(matches.get_one::<i64>("page"), Some(&2));
    }

    #[test]
    fn coercion_failure_is_a_returned_error() {
        let mut engine = Engine::new();
        engine.register("retries", ArgType::Int);

        let tokens = vec!["--retries".to_owned(), "three".to_owned()];
        let err = engine.parse(&tokens).expect_err("parse should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn non_finite_float_is_rejected() {
        assert!(parse_finite_f64("1.5").is_ok());
        assert!(parse_finite_f64("inf").is_err());
        assert!(parse_finite_f64("nan").is_err());
    }
}
