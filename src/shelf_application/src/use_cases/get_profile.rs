use shelf_core::{AuthContext, UserStore, UserStoreError, UserSummary};

use super::errors::AuthError;

/// Profile use case - returns the caller's current account
pub struct GetProfileUseCase<'a, U>
where
    U: UserStore,
{
    user_store: &'a U,
}

impl<'a, U> GetProfileUseCase<'a, U>
where
    U: UserStore,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(
        name = "GetProfileUseCase::execute",
        skip(self),
        fields(user_id = %caller.user_id)
    )]
    pub async fn execute(&self, caller: &AuthContext) -> Result<UserSummary, AuthError> {
        match self.user_store.find_by_id(caller.user_id).await {
            Ok(user) => Ok(user.summary()),
            // Deleted between the gate and here.
            Err(UserStoreError::NotFound) => Err(AuthError::Unauthenticated),
            Err(e) => Err(e.into()),
        }
    }
}
