use async_trait::async_trait;

use crate::http_abstraction::AuthRequest;

/// Trait for validating credentials presented on protected routes.
///
/// Validators read the credential from the request head, verify it and
/// produce the claims handed to route handlers.
///
/// # Implementation Note
///
/// Validators receive an [`AuthRequest`] view over the request head rather
/// than the full request. Bodies are not `Sync`, and only headers are needed
/// to extract a token.
#[async_trait]
pub trait AuthValidator: Clone + Send + Sync + 'static {
    /// Data made available to protected handlers on success.
    type Claims: Clone + Send + Sync + 'static;

    type Error: std::error::Error + Send + Sync + 'static;

    /// Validate the credential carried by `request`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No credential is present
    /// - The credential is malformed, forged or expired
    /// - The account behind it no longer exists
    async fn validate<R>(&self, request: &R) -> Result<Self::Claims, Self::Error>
    where
        R: AuthRequest + Sync + ?Sized;
}
