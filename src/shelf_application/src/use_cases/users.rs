use shelf_core::{
    AuthContext, DisplayName, Email, Page, PageRequest, Password, PasswordHasher, Role, UserChanges,
    UserId, UserStore, UserStoreError, UserSummary,
};

use super::errors::UserManagementError;

/// Columns a user listing may be ordered by.
pub const USER_SORT_COLUMNS: &[&str] = &["id", "name", "email", "role", "created_at", "updated_at"];

/// Requested changes to an account, already validated.
#[derive(Debug, Default)]
pub struct UserUpdate {
    pub email: Option<Email>,
    pub name: Option<DisplayName>,
    pub password: Option<Password>,
    pub role: Option<Role>,
}

/// Admin-only paginated listing, searchable by name or email.
pub struct ListUsersUseCase<'a, U: UserStore> {
    user_store: &'a U,
}

impl<'a, U: UserStore> ListUsersUseCase<'a, U> {
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "ListUsersUseCase::execute", skip(self, caller))]
    pub async fn execute(
        &self,
        caller: &AuthContext,
        request: &PageRequest,
    ) -> Result<Page<UserSummary>, UserManagementError> {
        if !caller.is_admin() {
            return Err(UserManagementError::Forbidden);
        }
        let page = self.user_store.list(request).await?;
        Ok(page.map(|user| user.summary()))
    }
}

pub struct GetUserUseCase<'a, U: UserStore> {
    user_store: &'a U,
}

impl<'a, U: UserStore> GetUserUseCase<'a, U> {
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "GetUserUseCase::execute", skip(self, caller))]
    pub async fn execute(
        &self,
        caller: &AuthContext,
        id: UserId,
    ) -> Result<UserSummary, UserManagementError> {
        if !caller.can_act_on(id) {
            return Err(UserManagementError::Forbidden);
        }
        Ok(self.user_store.find_by_id(id).await?.summary())
    }
}

/// Partial update. Only admins may change a role; a new password is hashed
/// before it reaches the store.
pub struct UpdateUserUseCase<'a, U, H>
where
    U: UserStore,
    H: PasswordHasher,
{
    user_store: &'a U,
    hasher: &'a H,
}

impl<'a, U, H> UpdateUserUseCase<'a, U, H>
where
    U: UserStore,
    H: PasswordHasher,
{
    pub fn new(user_store: &'a U, hasher: &'a H) -> Self {
        Self { user_store, hasher }
    }

    #[tracing::instrument(name = "UpdateUserUseCase::execute", skip(self, caller, update))]
    pub async fn execute(
        &self,
        caller: &AuthContext,
        id: UserId,
        update: UserUpdate,
    ) -> Result<UserSummary, UserManagementError> {
        if !caller.can_act_on(id) || (update.role.is_some() && !caller.is_admin()) {
            return Err(UserManagementError::Forbidden);
        }

        let current = self.user_store.find_by_id(id).await?;

        if let Some(email) = &update.email {
            match self.user_store.find_by_email(email).await {
                Ok(other) if other.id != current.id => {
                    return Err(UserManagementError::EmailInUse);
                }
                Ok(_) | Err(UserStoreError::NotFound) => {}
                Err(e) => return Err(e.into()),
            }
        }

        let password_hash = match &update.password {
            Some(password) => Some(self.hasher.hash(password).await?),
            None => None,
        };

        let changes = UserChanges {
            email: update.email,
            name: update.name,
            password_hash,
            role: update.role,
        };
        if changes.is_empty() {
            return Ok(current.summary());
        }

        let updated = self.user_store.update_fields(id, changes).await?;
        tracing::info!(user_id = %id, "user updated");
        Ok(updated.summary())
    }
}

/// Admin-only soft delete.
pub struct DeleteUserUseCase<'a, U: UserStore> {
    user_store: &'a U,
}

impl<'a, U: UserStore> DeleteUserUseCase<'a, U> {
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "DeleteUserUseCase::execute", skip(self, caller))]
    pub async fn execute(
        &self,
        caller: &AuthContext,
        id: UserId,
    ) -> Result<(), UserManagementError> {
        if !caller.is_admin() {
            return Err(UserManagementError::Forbidden);
        }
        self.user_store.soft_delete(id).await?;
        tracing::info!(user_id = %id, "user deleted");
        Ok(())
    }
}
