use shelf_core::{
    Email, Password, PasswordHasher, TokenService, TokenSubject, UserStore, UserStoreError,
};

use super::{errors::AuthError, register::AuthSession};

/// Login use case - exchanges credentials for an access token
pub struct LoginUseCase<'a, U, H, T>
where
    U: UserStore,
    H: PasswordHasher,
    T: TokenService,
{
    user_store: &'a U,
    hasher: &'a H,
    tokens: &'a T,
}

impl<'a, U, H, T> LoginUseCase<'a, U, H, T>
where
    U: UserStore,
    H: PasswordHasher,
    T: TokenService,
{
    pub fn new(user_store: &'a U, hasher: &'a H, tokens: &'a T) -> Self {
        Self {
            user_store,
            hasher,
            tokens,
        }
    }

    /// Unknown email and wrong password fail the same way. The reason is
    /// only logged.
    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
    ) -> Result<AuthSession, AuthError> {
        let user = match self.user_store.find_by_email(&email).await {
            Ok(user) => user,
            Err(UserStoreError::NotFound) => {
                tracing::debug!("login rejected: unknown email");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(e.into()),
        };

        if !self.hasher.verify(&password, &user.password_hash).await {
            tracing::debug!(user_id = %user.id, "login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(&TokenSubject::for_user(&user))?;

        Ok(AuthSession {
            token,
            user: user.summary(),
        })
    }
}
