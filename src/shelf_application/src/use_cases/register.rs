use shelf_core::{
    AccessToken, DisplayName, Email, NewUser, Password, PasswordHasher, Role, TokenService,
    TokenSubject, UserStore, UserStoreError, UserSummary,
};

use super::errors::AuthError;

/// A freshly issued token and the account it speaks for.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: AccessToken,
    pub user: UserSummary,
}

/// Register use case - creates an ordinary user and signs them in
pub struct RegisterUseCase<'a, U, H, T>
where
    U: UserStore,
    H: PasswordHasher,
    T: TokenService,
{
    user_store: &'a U,
    hasher: &'a H,
    tokens: &'a T,
}

impl<'a, U, H, T> RegisterUseCase<'a, U, H, T>
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

    /// The role is always `USER`; clients cannot pick it at registration.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        name: DisplayName,
        password: Password,
    ) -> Result<AuthSession, AuthError> {
        match self.user_store.find_by_email(&email).await {
            Ok(_) => return Err(AuthError::EmailInUse),
            Err(UserStoreError::NotFound) => {}
            Err(e) => return Err(AuthError::RegistrationFailure(e.to_string())),
        }

        let password_hash = self
            .hasher
            .hash(&password)
            .await
            .map_err(|e| AuthError::RegistrationFailure(e.to_string()))?;

        let new_user = NewUser {
            email,
            name,
            password_hash,
            role: Role::User,
        };

        // A concurrent registration can still win the race; the store's
        // uniqueness constraint decides.
        let user = self.user_store.create(new_user).await.map_err(|e| match e {
            UserStoreError::ConstraintViolation => AuthError::EmailInUse,
            other => AuthError::RegistrationFailure(other.to_string()),
        })?;

        let token = self.tokens.issue(&TokenSubject::for_user(&user))?;
        tracing::info!(user_id = %user.id, "user registered");

        Ok(AuthSession {
            token,
            user: user.summary(),
        })
    }
}
