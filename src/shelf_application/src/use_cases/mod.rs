pub mod books;
pub mod errors;
pub mod get_profile;
pub mod login;
pub mod register;
pub mod resolve_identity;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;
