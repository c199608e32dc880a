use async_trait::async_trait;
use shelf_application::{AuthError, ResolveIdentityUseCase};
use shelf_core::{AuthContext, AuthRequest, AuthValidator, TokenService, UserStore};

/// Validates `Authorization: Bearer <token>` credentials.
///
/// The token is verified and its account re-read on every request, see
/// [`ResolveIdentityUseCase`].
#[derive(Clone)]
pub struct BearerTokenValidator<U, T> {
    user_store: U,
    tokens: T,
}

impl<U, T> BearerTokenValidator<U, T> {
    pub fn new(user_store: U, tokens: T) -> Self {
        Self { user_store, tokens }
    }
}

#[async_trait]
impl<U, T> AuthValidator for BearerTokenValidator<U, T>
where
    U: UserStore + Clone + 'static,
    T: TokenService + Clone + 'static,
{
    type Claims = AuthContext;
    type Error = AuthError;

    async fn validate<R>(&self, request: &R) -> Result<Self::Claims, Self::Error>
    where
        R: AuthRequest + Sync + ?Sized,
    {
        let token = request.bearer_token().ok_or(AuthError::MissingCredential)?;

        ResolveIdentityUseCase::new(&self.user_store, &self.tokens)
            .execute(token)
            .await
    }
}
