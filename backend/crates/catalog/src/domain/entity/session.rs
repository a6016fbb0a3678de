//! Session Entity
//!
//! Server-side login state, referenced from the client by a signed cookie.
//! A session holds a snapshot of who logged in; it does not own the user.

use chrono::{DateTime, Duration, Utc};
use kernel::id::{SessionId, UserId};

use crate::domain::entity::user::User;
use crate::domain::value_object::{user_name::UserName, user_role::UserRole};

#[derive(Debug, Clone)]
pub struct Session {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub user_name: UserName,
    /// Role at login time
    pub user_role: UserRole,
    /// Unix timestamp ms
    pub expires_at_ms: i64,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Open a session for `user`; TTL comes from configuration.
    /// An expiry past the representable range is clamped to the maximum.
    pub fn new(user: &User, ttl: Duration) -> Self {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            session_id: SessionId::new(),
            user_id: user.user_id,
            user_name: user.user_name.clone(),
            user_role: user.user_role,
            expires_at_ms: expires_at.timestamp_millis(),
            created_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp_millis())
    }

    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at_ms
    }

    pub fn current_user(&self) -> CurrentUser {
        CurrentUser {
            user_id: self.user_id,
            user_name: self.user_name.clone(),
            user_role: self.user_role,
        }
    }
}

/// The authenticated identity carried by one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub user_name: UserName,
    pub user_role: UserRole,
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::HashedPassword;

    fn user(role: UserRole) -> User {
        let hash = HashedPassword::from_stored(bcrypt::hash("pw", 4).unwrap()).unwrap();
        User::new(UserName::new("alice").unwrap(), hash, role)
    }

    #[test]
    fn test_new_session_snapshots_user() {
        let user = user(UserRole::User);
        let session = Session::new(&user, Duration::minutes(30));

        assert_eq!(session.user_id, user.user_id);
        assert_eq!(session.user_name.as_str(), "alice");
        assert_eq!(session.user_role, UserRole::User);
        assert!(!session.is_expired());
    }

    #[test]
    fn test_expiry_boundary() {
        let session = Session::new(&user(UserRole::Admin), Duration::minutes(1));
        assert!(!session.is_expired_at(session.expires_at_ms - 1));
        assert!(session.is_expired_at(session.expires_at_ms));
    }

    #[test]
    fn test_zero_ttl_is_expired() {
        let session = Session::new(&user(UserRole::User), Duration::zero());
        assert!(session.is_expired());
    }

    #[test]
    fn test_unbounded_ttl_is_clamped() {
        let session = Session::new(&user(UserRole::User), Duration::MAX);
        assert_eq!(
            session.expires_at_ms,
            DateTime::<Utc>::MAX_UTC.timestamp_millis()
        );
        assert!(!session.is_expired());
    }

    #[test]
    fn test_current_user() {
        let session = Session::new(&user(UserRole::Admin), Duration::minutes(5));
        let current = session.current_user();
        assert_eq!(current.user_role, UserRole::Admin);
        assert_eq!(current.user_id, session.user_id);
    }
}
