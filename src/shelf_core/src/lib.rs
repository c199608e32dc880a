pub mod domain;
pub mod http_abstraction;
pub mod ports;
pub mod strategies;

// Re-export commonly used types for convenience
pub use domain::{
    book::{Book, BookChanges, BookId, BookSummary, NewBook},
    email::Email,
    identity::AuthContext,
    pagination::{Page, PageInfo, PageParams, PageRequest, SortOrder},
    password::{Password, PasswordHash},
    role::{Role, RoleError},
    user::{DisplayName, NewUser, User, UserChanges, UserId, UserSummary},
    validation::{FieldError, ValidationErrors},
};

pub use ports::{
    repositories::{BookStore, BookStoreError, UserStore, UserStoreError},
    services::{
        AccessToken, HashingError, PasswordHasher, TokenClaims, TokenError, TokenService,
        TokenSubject,
    },
};

pub use strategies::auth_validator::AuthValidator;

pub use http_abstraction::AuthRequest;
