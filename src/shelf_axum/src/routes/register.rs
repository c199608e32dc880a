use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use shelf_application::AuthSession;
use shelf_core::{AccessToken, DisplayName, Email, Password, UserSummary, ValidationErrors};

use super::secret_or_empty;
use crate::{ApiError, ApiResponse, ShelfState};

/// `POST /auth/register`. Creates a `USER` account and signs it in.
#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<S>(
    State(state): State<S>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiResponse<SessionResponse>, ApiError>
where
    S: ShelfState,
{
    let Json(request) = payload?;

    let mut errors = ValidationErrors::new();
    let email = errors.check(Email::parse(secret_or_empty(request.email)));
    let username = request.username.as_deref().unwrap_or_default();
    let name = errors.check(DisplayName::parse(username));
    let password = errors.check(Password::parse(secret_or_empty(request.password)));
    errors.into_result()?;

    let (Some(email), Some(name), Some(password)) = (email, name, password) else {
        return Err(ApiError::Validation(ValidationErrors::new()));
    };

    let session = state.scheme().register(email, name, password).await?;

    Ok(ApiResponse::created(
        "User registered successfully",
        session.into(),
    ))
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<Secret<String>>,
    pub username: Option<String>,
    pub password: Option<Secret<String>>,
}

/// `{token, user}` returned by register and login.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: AccessToken,
    pub user: UserSummary,
}

impl From<AuthSession> for SessionResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            token: session.token,
            user: session.user,
        }
    }
}
