//! Framework-neutral view of an inbound HTTP request.
//!
//! Web frameworks implement [`AuthRequest`] on a newtype around their own
//! request head, so authentication logic stays generic:
//!
//! ```ignore
//! pub struct AxumRequest<'a>(&'a axum::http::request::Parts);
//!
//! impl AuthRequest for AxumRequest<'_> {
//!     fn header(&self, name: &str) -> Option<&str> {
//!         self.0.headers.get(name)?.to_str().ok()
//!     }
//!     // ...
//! }
//! ```

pub const AUTHORIZATION_HEADER: &str = "authorization";
pub const BEARER_PREFIX: &str = "Bearer ";

/// Trait for HTTP requests that can be authenticated.
pub trait AuthRequest {
    /// Get a header value by name.
    ///
    /// Lookup is case-insensitive. Returns `None` if the header is absent or
    /// not valid UTF-8.
    fn header(&self, name: &str) -> Option<&str>;

    fn method(&self) -> &str;

    fn path(&self) -> &str;

    /// The token of an `Authorization: Bearer <token>` header.
    ///
    /// `None` when the header is missing, uses another scheme, or carries an
    /// empty token.
    fn bearer_token(&self) -> Option<&str> {
        self.header(AUTHORIZATION_HEADER)?
            .strip_prefix(BEARER_PREFIX)
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}
