use shelf_core::{BookStoreError, HashingError, TokenError, UserStoreError};

/// Failures of the authentication flows.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Email already in use")]
    EmailInUse,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Invalid or expired token")]
    Unauthenticated,
    #[error("Missing authorization token")]
    MissingCredential,
    #[error("Registration failed: {0}")]
    RegistrationFailure(String),
    #[error("Token error: {0}")]
    Token(#[from] TokenError),
    #[error("User store error: {0}")]
    UserStore(#[from] UserStoreError),
}

impl PartialEq for AuthError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::EmailInUse, Self::EmailInUse)
                | (Self::InvalidCredentials, Self::InvalidCredentials)
                | (Self::Unauthenticated, Self::Unauthenticated)
                | (Self::MissingCredential, Self::MissingCredential)
                | (Self::RegistrationFailure(_), Self::RegistrationFailure(_))
                | (Self::Token(_), Self::Token(_))
                | (Self::UserStore(_), Self::UserStore(_))
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UserManagementError {
    #[error("User not found")]
    NotFound,
    #[error("You do not have permission to perform this action")]
    Forbidden,
    #[error("Email already in use")]
    EmailInUse,
    #[error(transparent)]
    Hashing(#[from] HashingError),
    #[error("User store error: {0}")]
    UserStore(UserStoreError),
}

impl From<UserStoreError> for UserManagementError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::NotFound => Self::NotFound,
            UserStoreError::ConstraintViolation => Self::EmailInUse,
            other => Self::UserStore(other),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BookError {
    #[error("Book not found")]
    NotFound,
    #[error("You do not have permission to perform this action")]
    Forbidden,
    #[error("Book store error: {0}")]
    BookStore(BookStoreError),
}

impl From<BookStoreError> for BookError {
    fn from(error: BookStoreError) -> Self {
        match error {
            BookStoreError::NotFound => Self::NotFound,
            other => Self::BookStore(other),
        }
    }
}
