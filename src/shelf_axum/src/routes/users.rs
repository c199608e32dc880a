use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use shelf_application::{
    DeleteUserUseCase, GetUserUseCase, ListUsersUseCase, USER_SORT_COLUMNS, UpdateUserUseCase,
    UserUpdate,
};
use shelf_core::{
    AuthContext, DisplayName, Email, FieldError, PageParams, PageRequest, Password, Role, UserId,
    UserSummary, ValidationErrors,
};

use crate::{ApiError, ApiResponse, ShelfState};

/// `GET /users`. Admins only.
#[tracing::instrument(name = "List users", skip_all)]
pub async fn list_users<S>(
    State(state): State<S>,
    Extension(caller): Extension<AuthContext>,
    query: Result<Query<PageParams>, QueryRejection>,
) -> Result<ApiResponse<Vec<UserSummary>>, ApiError>
where
    S: ShelfState,
{
    let Query(params) = query?;
    let request = PageRequest::parse(params, USER_SORT_COLUMNS)?;

    let page = ListUsersUseCase::new(state.users())
        .execute(&caller, &request)
        .await?;

    Ok(ApiResponse::paginated("Users retrieved successfully", page))
}

/// `GET /users/{id}`. Admins, or the user themselves.
#[tracing::instrument(name = "Get user", skip_all)]
pub async fn get_user<S>(
    State(state): State<S>,
    Extension(caller): Extension<AuthContext>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<ApiResponse<UserSummary>, ApiError>
where
    S: ShelfState,
{
    let id = user_id(id)?;
    let user = GetUserUseCase::new(state.users())
        .execute(&caller, id)
        .await?;
    Ok(ApiResponse::success("User retrieved successfully", user))
}

/// `PUT /users/{id}`. Partial update; only admins may change a role.
#[tracing::instrument(name = "Update user", skip_all)]
pub async fn update_user<S>(
    State(state): State<S>,
    Extension(caller): Extension<AuthContext>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<ApiResponse<UserSummary>, ApiError>
where
    S: ShelfState,
{
    let id = user_id(id)?;
    let Json(request) = payload?;
    let update = request.parse()?;

    let user = UpdateUserUseCase::new(state.users(), state.hasher())
        .execute(&caller, id, update)
        .await?;

    Ok(ApiResponse::success("User updated successfully", user))
}

/// `DELETE /users/{id}`. Admins only; the account is soft deleted.
#[tracing::instrument(name = "Delete user", skip_all)]
pub async fn delete_user<S>(
    State(state): State<S>,
    Extension(caller): Extension<AuthContext>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<ApiResponse<()>, ApiError>
where
    S: ShelfState,
{
    let id = user_id(id)?;
    DeleteUserUseCase::new(state.users())
        .execute(&caller, id)
        .await?;
    Ok(ApiResponse::message("User deleted successfully"))
}

fn user_id(path: Result<Path<i64>, PathRejection>) -> Result<UserId, ApiError> {
    let Path(id) = path?;
    Ok(UserId::new(id)?)
}

/// Every field is optional. Blank strings count as absent.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<Secret<String>>,
    pub username: Option<String>,
    pub password: Option<Secret<String>>,
    pub role: Option<String>,
}

impl UpdateUserRequest {
    fn parse(self) -> Result<UserUpdate, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let email = errors.check_opt(
            self.email
                .filter(|email| !email.expose_secret().trim().is_empty())
                .map(Email::parse),
        );
        let name = errors.check_opt(
            self.username
                .as_deref()
                .filter(|name| !name.trim().is_empty())
                .map(DisplayName::parse),
        );
        let password = errors.check_opt(
            self.password
                .filter(|password| !password.expose_secret().is_empty())
                .map(Password::parse),
        );
        let role = errors.check_opt(
            self.role
                .as_deref()
                .filter(|role| !role.trim().is_empty())
                .map(|role| {
                    role.parse::<Role>()
                        .map_err(|e| FieldError::new("role", e.to_string()))
                }),
        );
        errors.into_result()?;

        Ok(UserUpdate {
            email,
            name,
            password,
            role,
        })
    }
}
