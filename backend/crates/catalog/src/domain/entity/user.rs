//! User Entity
//!
//! Credential-store record. The catalog never creates or edits users; it
//! looks them up at login and lists them for administrators.

use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::value_object::{user_name::UserName, user_role::UserRole};

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique login name
    pub user_name: UserName,
    /// Opaque stored hash; only ever passed to the verifier
    pub password_hash: HashedPassword,
    pub user_role: UserRole,
}

impl User {
    pub fn new(user_name: UserName, password_hash: HashedPassword, user_role: UserRole) -> Self {
        Self {
            user_id: UserId::new(),
            user_name,
            password_hash,
            user_role,
        }
    }
}
