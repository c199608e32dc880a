use serde::Serialize;

use super::{role::Role, user::UserId};

/// The caller a request was admitted for.
///
/// Built by the request gate after the token verified and the account was
/// re-read, so `role` is the stored role, not the one in the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthContext {
    pub user_id: UserId,
    pub email: String,
    pub role: Role,
}

impl AuthContext {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Admins act on anyone; everyone else only on themselves.
    pub fn can_act_on(&self, owner: UserId) -> bool {
        self.is_admin() || self.user_id == owner
    }
}
