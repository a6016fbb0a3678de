use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Authorization label attached to a user.
///
/// Stored and rendered as the exact codes `USER` and `ADMIN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    User,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown user role: {0:?}")]
pub struct UnknownRole(pub String);

impl UserRole {
    pub const ALL: [UserRole; 2] = [UserRole::User, UserRole::Admin];

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Admin => "ADMIN",
        }
    }

    /// Exact, case-sensitive lookup
    pub fn from_code(code: &str) -> Result<Self, UnknownRole> {
        Self::ALL
            .into_iter()
            .find(|role| role.code() == code)
            .ok_or_else(|| UnknownRole(code.to_string()))
    }
}

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_from_code() {
        assert_eq!(UserRole::from_code("USER"), Ok(UserRole::User));
        assert_eq!(UserRole::from_code("ADMIN"), Ok(UserRole::Admin));
    }

    #[test]
    fn test_user_role_from_code_is_exact() {
        assert!(UserRole::from_code("user").is_err());
        assert!(UserRole::from_code("Admin").is_err());
        assert!(UserRole::from_code(" USER").is_err());
        assert_eq!(
            UserRole::from_code("MODERATOR"),
            Err(UnknownRole("MODERATOR".to_string()))
        );
    }

    #[test]
    fn test_user_role_display_matches_serde() {
        for role in UserRole::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role));
        }
    }
}
