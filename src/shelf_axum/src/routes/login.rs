use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use shelf_application::AuthError;
use shelf_core::{Email, FieldError, Password, ValidationErrors};

use super::{register::SessionResponse, secret_or_empty};
use crate::{ApiError, ApiResponse, ShelfState};

/// `POST /auth/login`.
///
/// Unknown emails and wrong passwords produce the same 401, so the response
/// never reveals which accounts exist.
#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<S>(
    State(state): State<S>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiResponse<SessionResponse>, ApiError>
where
    S: ShelfState,
{
    let Json(request) = payload?;

    let mut errors = ValidationErrors::new();
    let email = errors.check(Email::parse(secret_or_empty(request.email)));
    let password = secret_or_empty(request.password);
    if password.expose_secret().is_empty() {
        errors.push(FieldError::new("password", "This field is required"));
    }
    errors.into_result()?;

    let Some(email) = email else {
        return Err(ApiError::Validation(ValidationErrors::new()));
    };

    // Length rules belong to registration; a short candidate just fails.
    let Ok(password) = Password::parse(password) else {
        return Err(AuthError::InvalidCredentials.into());
    };

    let session = state.scheme().login(email, password).await?;

    Ok(ApiResponse::success(
        "User logged in successfully",
        session.into(),
    ))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<Secret<String>>,
    pub password: Option<Secret<String>>,
}
