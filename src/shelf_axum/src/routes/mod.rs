//! Axum route handlers.
//!
//! Handlers parse wire payloads into domain values, run the matching use
//! case and wrap the outcome in the [`ApiResponse`](crate::ApiResponse)
//! envelope.

pub mod books;
pub mod health;
pub mod login;
pub mod profile;
pub mod register;
pub mod users;

pub use books::{create_book, delete_book, get_book, list_books, update_book};
pub use health::health;
pub use login::login;
pub use profile::profile;
pub use register::register;
pub use users::{delete_user, get_user, list_users, update_user};

use secrecy::Secret;

/// Absent secrets parse like empty ones so they fail field validation
/// instead of body deserialization.
pub(crate) fn secret_or_empty(value: Option<Secret<String>>) -> Secret<String> {
    value.unwrap_or_else(|| Secret::new(String::new()))
}
