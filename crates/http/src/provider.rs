//! Ambient current-request provider.
//!
//! A `RequestProvider` supplies the in-flight request when the resolver is
//! invoked without an explicit descriptor. The hosting framework owns and
//! scopes the ambient request; the resolver only reads it, once per call,
//! through this capability -- so tests and non-HTTP embeddings can
//! substitute a fixed descriptor instead of any global lookup.

use crate::descriptor::RequestDescriptor;

// ──────────────────────────────────────────────
// Trait
// ──────────────────────────────────────────────

/// Supplier of the ambient current request.
pub trait RequestProvider: Send + Sync {
    /// The request currently being handled, if any.
    fn current(&self) -> Option<RequestDescriptor>;
}

// ──────────────────────────────────────────────
// NoRequestProvider
// ──────────────────────────────────────────────

/// Provider for embeddings with no ambient request: always `None`.
///
/// This is the resolver's default, so callers that always pass explicit
/// descriptors never touch any shared state.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRequestProvider;

impl RequestProvider for NoRequestProvider {
    fn current(&self) -> Option<RequestDescriptor> {
        None
    }
}

// ──────────────────────────────────────────────
// StaticRequestProvider
// ──────────────────────────────────────────────

/// Provider that returns a fixed descriptor on every call.
///
/// Useful in tests and for non-HTTP callers that want to reuse the
/// request-resolution path with a synthesized request.
#[derive(Debug, Clone)]
pub struct StaticRequestProvider {
    request: RequestDescriptor,
}

impl StaticRequestProvider {
    pub fn new(request: RequestDescriptor) -> Self {
        StaticRequestProvider { request }
    }
}

impl RequestProvider for StaticRequestProvider {
    fn current(&self) -> Option<RequestDescriptor> {
        Some(self.request.clone())
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
