//! reqparse-core: named, typed argument schemas over an option engine.
//!
//! A [`Schema`] declares the arguments an endpoint accepts -- name, typed
//! coercion, required-ness, default -- and parses arbitrary flag-form token
//! streams against those declarations, splitting recognized from
//! unrecognized arguments under a caller-selectable strictness policy.
//!
//! The option-parsing grammar itself (flag registration, typed coercion,
//! `--name value` tokens) is supplied by the `clap` builder engine, which
//! this crate configures and drives behind a narrow internal wrapper:
//! auto-help off, abbreviation matching off, every failure returned as a
//! typed error instead of terminating the process.
//!
//! # Public API
//!
//! - [`Schema`] -- declare arguments, parse token streams
//! - [`ArgDecl`] / [`ArgType`] -- per-argument declaration builder
//! - [`ParseOutcome`] -- known values plus optional unknown leftovers
//! - [`SchemaError`] / [`ParseError`] -- build-time and parse-time failures
//!
//! This crate knows nothing about HTTP; see `reqparse-http` for resolving
//! arguments out of requests.

mod engine;

pub mod error;
pub mod schema;

pub use error::{ParseError, SchemaError};
pub use schema::{ArgDecl, ArgType, ParseOutcome, Schema};
