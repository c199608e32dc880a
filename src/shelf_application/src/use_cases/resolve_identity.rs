use shelf_core::{AuthContext, TokenService, UserStore, UserStoreError};

use super::errors::AuthError;

/// Turns a bearer token into the identity of a live account.
///
/// The account is re-read on every call. A deleted account, or one whose
/// password changed since the token was issued, no longer authenticates, and
/// the role handed downstream is the stored one.
pub struct ResolveIdentityUseCase<'a, U, T>
where
    U: UserStore,
    T: TokenService,
{
    user_store: &'a U,
    tokens: &'a T,
}

impl<'a, U, T> ResolveIdentityUseCase<'a, U, T>
where
    U: UserStore,
    T: TokenService,
{
    pub fn new(user_store: &'a U, tokens: &'a T) -> Self {
        Self { user_store, tokens }
    }

    #[tracing::instrument(name = "ResolveIdentityUseCase::execute", skip_all)]
    pub async fn execute(&self, token: &str) -> Result<AuthContext, AuthError> {
        let claims = self.tokens.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "token rejected");
            AuthError::Unauthenticated
        })?;

        let user = match self.user_store.find_by_id(claims.subject).await {
            Ok(user) => user,
            Err(UserStoreError::NotFound) => {
                tracing::debug!(user_id = %claims.subject, "token subject no longer exists");
                return Err(AuthError::Unauthenticated);
            }
            Err(e) => return Err(e.into()),
        };

        if user.password_hash.fingerprint() != claims.binding {
            tracing::debug!(user_id = %user.id, "token bound to a previous password");
            return Err(AuthError::Unauthenticated);
        }

        Ok(AuthContext {
            user_id: user.id,
            email: user.email.as_str().to_owned(),
            role: user.role,
        })
    }
}
