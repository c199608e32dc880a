//! HTTP error type shared by every route and the request gate.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shelf_application::{AuthError, BookError, UserManagementError};
use shelf_core::{FieldError, TokenError, ValidationErrors};
use thiserror::Error;

use crate::response::{ApiResponse, ErrorBody, FieldDetail};

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Errors surfaced to API clients.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Validation(ValidationErrors),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// Logged in full; clients only see a generic message.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        let status = self.status_code();
        match self {
            ApiError::Validation(errors) => ErrorBody::new(status, "Validation failed")
                .with_details(errors.errors().iter().map(FieldDetail::from).collect()),
            ApiError::Internal(_) => ErrorBody::new(status, INTERNAL_ERROR_MESSAGE),
            ApiError::BadRequest(message)
            | ApiError::Unauthorized(message)
            | ApiError::Forbidden(message)
            | ApiError::NotFound(message) => ErrorBody::new(status, message.clone()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, status = %status, "Server error occurred");
        } else {
            tracing::debug!(error = %self, status = %status, "Client error occurred");
        }

        ApiResponse::failure(status, self.body()).into_response()
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<FieldError> for ApiError {
    fn from(error: FieldError) -> Self {
        ApiError::Validation(error.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        ApiError::BadRequest("Invalid request body".to_owned())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected query string");
        ApiError::BadRequest("Invalid query parameters".to_owned())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected path parameter");
        ApiError::BadRequest("Invalid ID".to_owned())
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::EmailInUse => ApiError::BadRequest(error.to_string()),
            AuthError::InvalidCredentials
            | AuthError::Unauthenticated
            | AuthError::MissingCredential
            | AuthError::Token(TokenError::InvalidToken) => {
                ApiError::Unauthorized(error.to_string())
            }
            AuthError::RegistrationFailure(_)
            | AuthError::Token(TokenError::Issue(_))
            | AuthError::UserStore(_) => ApiError::Internal(error.to_string()),
        }
    }
}

impl From<UserManagementError> for ApiError {
    fn from(error: UserManagementError) -> Self {
        match error {
            UserManagementError::NotFound => ApiError::NotFound(error.to_string()),
            UserManagementError::Forbidden => ApiError::Forbidden(error.to_string()),
            UserManagementError::EmailInUse => ApiError::BadRequest(error.to_string()),
            UserManagementError::Hashing(_) | UserManagementError::UserStore(_) => {
                ApiError::Internal(error.to_string())
            }
        }
    }
}

impl From<BookError> for ApiError {
    fn from(error: BookError) -> Self {
        match error {
            BookError::NotFound => ApiError::NotFound(error.to_string()),
            BookError::Forbidden => ApiError::Forbidden(error.to_string()),
            BookError::BookStore(_) => ApiError::Internal(error.to_string()),
        }
    }
}
