pub mod book;
pub mod email;
pub mod identity;
pub mod pagination;
pub mod password;
pub mod role;
pub mod user;
pub mod validation;
