//! Axum implementation of the framework-neutral request view.
//!
//! `AuthRequest` lives in `shelf_core`, so Axum's types are wrapped in a
//! newtype to satisfy the orphan rule. The wrapper borrows the request head
//! only, which keeps it `Sync` while the body stays with the caller.

use axum::http::request::Parts;
use shelf_core::AuthRequest;

/// Borrowed view over an Axum request head.
#[repr(transparent)]
pub struct AxumRequest<'a>(pub &'a Parts);

impl<'a> From<&'a Parts> for AxumRequest<'a> {
    fn from(parts: &'a Parts) -> Self {
        AxumRequest(parts)
    }
}

impl AuthRequest for AxumRequest<'_> {
    fn header(&self, name: &str) -> Option<&str> {
        self.0.headers.get(name)?.to_str().ok()
    }

    fn method(&self) -> &str {
        self.0.method.as_str()
    }

    fn path(&self) -> &str {
        self.0.uri.path()
    }
}
