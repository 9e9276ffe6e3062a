//! Request argument resolution: descriptor to token stream to schema parse.

use reqparse_core::{ParseError, ParseOutcome, Schema};
use thiserror::Error;

use crate::descriptor::RequestDescriptor;
use crate::provider::{NoRequestProvider, RequestProvider};

/// Errors raised while resolving arguments from a request.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No explicit request was passed and the provider has no active one.
    #[error("no active request: pass a request descriptor or configure a request provider")]
    NoActiveRequest,

    /// The underlying schema parse failed.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Resolves argument values from HTTP requests against a [`Schema`].
///
/// Each call is stateless and idempotent: the same descriptor and schema
/// always produce the same outcome, and the schema is never mutated. The
/// resolver consults its [`RequestProvider`] exactly once per call, and only
/// when no explicit descriptor was passed.
pub struct Resolver {
    provider: Box<dyn RequestProvider>,
}

impl Resolver {
    /// Resolver with no ambient-request capability; callers must pass
    /// explicit descriptors.
    pub fn new() -> Self {
        Resolver {
            provider: Box::new(NoRequestProvider),
        }
    }

    /// Resolver that falls back to `provider` when no descriptor is passed.
    pub fn with_provider(provider: impl RequestProvider + 'static) -> Self {
        Resolver {
            provider: Box::new(provider),
        }
    }

    /// Resolve arguments for `request`, or for the provider's ambient
    /// request when `request` is `None`.
    ///
    /// Method dispatch: GET reads the query pairs verbatim; POST/PUT read
    /// the body mapping (JSON or form); every other method yields an empty
    /// stream, so the outcome is all defaults.
    pub fn resolve(
        &self,
        schema: &Schema,
        request: Option<&RequestDescriptor>,
        drop_unknown: bool,
    ) -> Result<ParseOutcome, ResolveError> {
        let pairs = match request {
            Some(request) => request.raw_pairs(),
            None => self
                .provider
                .current()
                .ok_or(ResolveError::NoActiveRequest)?
                .raw_pairs(),
        };
        Ok(schema.parse_pairs(&pairs, drop_unknown)?)
    }

    /// Forward a pre-built flag-form token stream straight to the schema,
    /// bypassing method and encoding dispatch entirely.
    pub fn resolve_tokens(
        &self,
        schema: &Schema,
        tokens: &[String],
        drop_unknown: bool,
    ) -> Result<ParseOutcome, ResolveError> {
        Ok(schema.parse_tokens(tokens, drop_unknown)?)
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Resolver::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::StaticRequestProvider;
    use reqparse_core::{ArgDecl, ArgType};
    use serde_json::json;

    fn schema() -> Schema {
        Schema::new()
            .declare("username")
            .unwrap()
            .declare("password")
            .unwrap()
    }

    #[test]
    fn explicit_request_is_used_directly() {
        let request = RequestDescriptor::new("GET").with_query(vec![
            ("username".to_owned(), "lib".to_owned()),
            ("password".to_owned(), "common".to_owned()),
        ]);

        let outcome = Resolver::new()
            .resolve(&schema(), Some(&request), true)
            .unwrap();
        assert_eq!(outcome.get("username"), Some(&json!("lib")));
        assert_eq!(outcome.get("password"), Some(&json!("common")));
        assert_eq!(outcome.unknown, None);
    }

    #[test]
    fn ambient_request_comes_from_the_provider() {
        let ambient = RequestDescriptor::new("GET")
            .with_query(vec![("username".to_owned(), "lib".to_owned())]);
        let resolver = Resolver::with_provider(StaticRequestProvider::new(ambient));

        let outcome = resolver.resolve(&schema(), None, true).unwrap();
        assert_eq!(outcome.get("username"), Some(&json!("lib")));
    }

    #[test]
    fn explicit_request_wins_over_the_provider() {
        let ambient = RequestDescriptor::new("GET")
            .with_query(vec![("username".to_owned(), "ambient".to_owned())]);
        let resolver = Resolver::with_provider(StaticRequestProvider::new(ambient));

        let explicit = RequestDescriptor::new("GET")
            .with_query(vec![("username".to_owned(), "explicit".to_owned())]);
        let outcome = resolver.resolve(&schema(), Some(&explicit), true).unwrap();
        assert_eq!(outcome.get("username"), Some(&json!("explicit")));
    }

    #[test]
    fn missing_ambient_request_is_an_error() {
        let err = Resolver::new().resolve(&schema(), None, true).unwrap_err();
        assert!(matches!(err, ResolveError::NoActiveRequest));
    }

    #[test]
    fn token_bypass_skips_dispatch() {
        let tokens = vec!["--username".to_owned(), "lib".to_owned()];
        let outcome = Resolver::new()
            .resolve_tokens(&schema(), &tokens, false)
            .unwrap();
        assert_eq!(outcome.get("username"), Some(&json!("lib")));
        assert_eq!(outcome.unknown, Some(Vec::new()));
    }

    #[test]
    fn parse_failures_propagate() {
        let schema = Schema::new()
            .declare(ArgDecl::new("retries").typed(ArgType::Int))
            .unwrap();
        let request = RequestDescriptor::new("GET")
            .with_query(vec![("retries".to_owned(), "three".to_owned())]);

        let err = Resolver::new()
            .resolve(&schema, Some(&request), true)
            .unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Parse(ParseError::ArgumentType { .. })
        ));
    }
}
