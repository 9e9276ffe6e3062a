//! reqparse-http: resolve declared arguments out of HTTP requests.
//!
//! Pairs a `reqparse-core` [`Schema`](reqparse_core::Schema) with an
//! incoming request so a handler can declare its arguments once and parse
//! them the same way regardless of method or encoding:
//!
//! - `GET` reads the query string, in order;
//! - `POST`/`PUT` read the body, JSON or form-encoded;
//! - every other method extracts nothing and resolves to defaults.
//!
//! # Public API
//!
//! - [`RequestDescriptor`] -- framework-agnostic request snapshot; also an
//!   axum extractor (see the `extract` module)
//! - [`ParamSource`] -- closed method/encoding classification
//! - [`Resolver`] -- descriptor (explicit or ambient) to parse outcome
//! - [`RequestProvider`] -- ambient current-request capability, with
//!   [`StaticRequestProvider`] for tests and non-HTTP embeddings
//! - [`ResolveError`] / [`DescriptorRejection`] -- resolution and
//!   extraction failures

pub mod descriptor;
pub mod extract;
pub mod provider;
pub mod resolver;

pub use descriptor::{ParamSource, RequestDescriptor};
pub use extract::{DescriptorRejection, MAX_BODY_SIZE};
pub use provider::{NoRequestProvider, RequestProvider, StaticRequestProvider};
pub use resolver::{ResolveError, Resolver};
