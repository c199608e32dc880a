use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    book::{Book, BookChanges, BookId, NewBook},
    email::Email,
    pagination::{Page, PageRequest},
    user::{NewUser, User, UserChanges, UserId},
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User not found")]
    NotFound,
    #[error("Constraint violation")]
    ConstraintViolation,
    #[error("Unexpected error {0}")]
    Unexpected(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::NotFound, Self::NotFound)
                | (Self::ConstraintViolation, Self::ConstraintViolation)
                | (Self::Unexpected(_), Self::Unexpected(_))
        )
    }
}

/// Persistence of registered principals.
///
/// Soft-deleted users are invisible to every read, and their email becomes
/// available again for registration.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &Email) -> Result<User, UserStoreError>;
    async fn find_by_id(&self, id: UserId) -> Result<User, UserStoreError>;
    /// Fails with `ConstraintViolation` when an active user already has the email.
    async fn create(&self, user: NewUser) -> Result<User, UserStoreError>;
    async fn update_fields(&self, id: UserId, changes: UserChanges) -> Result<User, UserStoreError>;
    async fn soft_delete(&self, id: UserId) -> Result<(), UserStoreError>;
    async fn list(&self, request: &PageRequest) -> Result<Page<User>, UserStoreError>;
}

// BookStore port trait and errors
#[derive(Debug, Error)]
pub enum BookStoreError {
    #[error("Book not found")]
    NotFound,
    #[error("Unexpected error {0}")]
    Unexpected(String),
}

impl PartialEq for BookStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::NotFound, Self::NotFound) | (Self::Unexpected(_), Self::Unexpected(_))
        )
    }
}

#[async_trait]
pub trait BookStore: Send + Sync {
    /// Returns the stored book with its owner embedded.
    async fn create(&self, book: NewBook) -> Result<Book, BookStoreError>;
    async fn find_by_id(&self, id: BookId) -> Result<Book, BookStoreError>;
    /// Search matches title or author, case-insensitively.
    async fn list(&self, request: &PageRequest) -> Result<Page<Book>, BookStoreError>;
    async fn update_fields(&self, id: BookId, changes: BookChanges) -> Result<Book, BookStoreError>;
    async fn soft_delete(&self, id: BookId) -> Result<(), BookStoreError>;
}
