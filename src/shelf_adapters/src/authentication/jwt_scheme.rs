use shelf_application::{AuthError, AuthSession, GetProfileUseCase, LoginUseCase, RegisterUseCase};
use shelf_core::{AuthContext, DisplayName, Email, Password, PasswordHasher, UserStore, UserSummary};

use crate::auth_validation::{BearerTokenValidator, JwtAuthConfig, JwtTokenService};

// ============================================================================
// JWT Authentication Scheme
// ============================================================================

/// Password credentials exchanged for HS256 bearer tokens.
///
/// This scheme:
/// - Registers users with email, display name and password
/// - Logs users in with email and password
/// - Issues bearer tokens bound to the current password hash
/// - Validates bearer tokens against a live account on each request
#[derive(Clone)]
pub struct JwtScheme<U, H> {
    user_store: U,
    hasher: H,
    tokens: JwtTokenService,
    validator: BearerTokenValidator<U, JwtTokenService>,
}

impl<U, H> JwtScheme<U, H>
where
    U: UserStore + Clone,
    H: PasswordHasher,
{
    pub fn new(user_store: U, hasher: H, config: JwtAuthConfig) -> Self {
        let tokens = JwtTokenService::new(config);
        let validator = BearerTokenValidator::new(user_store.clone(), tokens.clone());

        Self {
            user_store,
            hasher,
            tokens,
            validator,
        }
    }

    /// Get a reference to the user store
    pub fn user_store(&self) -> &U {
        &self.user_store
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// The validator the request gate runs on protected routes.
    pub fn validator(&self) -> &BearerTokenValidator<U, JwtTokenService> {
        &self.validator
    }

    pub async fn register(
        &self,
        email: Email,
        name: DisplayName,
        password: Password,
    ) -> Result<AuthSession, AuthError> {
        RegisterUseCase::new(&self.user_store, &self.hasher, &self.tokens)
            .execute(email, name, password)
            .await
    }

    pub async fn login(&self, email: Email, password: Password) -> Result<AuthSession, AuthError> {
        LoginUseCase::new(&self.user_store, &self.hasher, &self.tokens)
            .execute(email, password)
            .await
    }

    pub async fn profile(&self, caller: &AuthContext) -> Result<UserSummary, AuthError> {
        GetProfileUseCase::new(&self.user_store)
            .execute(caller)
            .await
    }
}
