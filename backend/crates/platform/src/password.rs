//! Password Hashing and Verification
//!
//! - Argon2id for every hash this service produces
//! - bcrypt (`$2a$`, `$2b$`, `$2y$`) accepted for verification, since
//!   credential stores migrated from older deployments hold those
//! - Clear text is zeroized on drop and redacted in `Debug`
//!
//! Verification is CPU-heavy; async callers should use
//! [`HashedPassword::verify_blocking`], which runs on the blocking pool.

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Minimum length for newly chosen passwords
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum accepted length (bcrypt reads at most 72 bytes)
pub const MAX_PASSWORD_LENGTH: usize = 72;

// ============================================================================
// Error Types
// ============================================================================

/// Rejections for a newly chosen password
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,

    #[error("Password is too common")]
    Common,
}

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Unrecognized password hash format")]
    InvalidHashFormat,

    #[error("Verification task failed: {0}")]
    TaskFailed(String),
}

// ============================================================================
// Clear Text Password
// ============================================================================

/// Clear text password, zeroized on drop.
///
/// Holds the bytes exactly as submitted. Argon2 hashing normalizes to NFKC
/// first; bcrypt verification uses the raw bytes because legacy hashes
/// were produced without normalization.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Wrap a submitted password without policy checks (login path).
    pub fn new(raw: String) -> Self {
        Self(raw)
    }

    /// Wrap a newly chosen password, enforcing the length and content policy.
    pub fn new_validated(raw: String) -> Result<Self, PasswordPolicyError> {
        let password = Self(raw);
        password.validate()?;
        Ok(password)
    }

    fn validate(&self) -> Result<(), PasswordPolicyError> {
        let normalized = self.normalized();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = normalized.chars().count();
        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }
        if normalized.len() > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if normalized.chars().any(|ch| ch.is_control() && ch != '\t') {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        if is_common_password(&normalized) {
            return Err(PasswordPolicyError::Common);
        }

        Ok(())
    }

    fn normalized(&self) -> String {
        self.0.nfkc().collect()
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Vec<u8> {
        let mut bytes = self.normalized().into_bytes();
        if let Some(p) = pepper {
            bytes.extend_from_slice(p);
        }
        bytes
    }

    /// Hash with Argon2id (OWASP defaults: m=19456, t=2, p=1)
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let mut password_bytes = self.peppered(pepper);
        let salt = SaltString::generate(OsRng);

        let result = Argon2::default()
            .hash_password(&password_bytes, &salt)
            .map(|hash| HashedPassword {
                hash: hash.to_string(),
                scheme: HashScheme::Argon2,
            })
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()));

        password_bytes.zeroize();
        result
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HashScheme {
    /// PHC string, `$argon2id$...`
    Argon2,
    /// Modular crypt, `$2a$`, `$2b$` or `$2y$`
    Bcrypt,
}

/// Stored password hash, safe to persist and log-redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
    scheme: HashScheme,
}

impl HashedPassword {
    /// Parse a stored hash, detecting its scheme.
    pub fn from_stored(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();

        let scheme = if is_bcrypt(&hash) {
            HashScheme::Bcrypt
        } else {
            PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
            HashScheme::Argon2
        };

        Ok(Self { hash, scheme })
    }

    /// Verify a password against this hash (constant-time in both schemes).
    ///
    /// Malformed hashes verify as `false`.
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        match self.scheme {
            HashScheme::Bcrypt => bcrypt::verify(password.0.as_bytes(), &self.hash).unwrap_or(false),
            HashScheme::Argon2 => {
                let Ok(parsed) = PasswordHash::new(&self.hash) else {
                    return false;
                };
                let mut password_bytes = password.peppered(pepper);
                let ok = Argon2::default()
                    .verify_password(&password_bytes, &parsed)
                    .is_ok();
                password_bytes.zeroize();
                ok
            }
        }
    }

    /// [`verify`](Self::verify) on tokio's blocking pool
    pub async fn verify_blocking(
        &self,
        password: ClearTextPassword,
        pepper: Option<Vec<u8>>,
    ) -> Result<bool, PasswordHashError> {
        let hashed = self.clone();
        tokio::task::spawn_blocking(move || hashed.verify(&password, pepper.as_deref()))
            .await
            .map_err(|e| PasswordHashError::TaskFailed(e.to_string()))
    }

    /// True when the hash should be replaced by a fresh Argon2id hash
    pub fn needs_rehash(&self) -> bool {
        match self.scheme {
            HashScheme::Bcrypt => true,
            HashScheme::Argon2 => match PasswordHash::new(&self.hash) {
                Ok(parsed) => parsed.algorithm != argon2::Algorithm::Argon2id.ident(),
                Err(_) => true,
            },
        }
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("scheme", &self.scheme)
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn is_bcrypt(hash: &str) -> bool {
    ["$2a$", "$2b$", "$2y$"]
        .iter()
        .any(|prefix| hash.starts_with(prefix))
        && hash.len() == 60
}

fn is_common_password(password: &str) -> bool {
    const COMMON_PASSWORDS: &[&str] = &[
        "password",
        "password1",
        "password123",
        "12345678",
        "123456789",
        "1234567890",
        "qwertyuiop",
        "abcdefgh",
        "letmein1",
        "welcome1",
        "admin123",
        "iloveyou",
        "trustno1",
    ];

    let lower = password.to_lowercase();
    COMMON_PASSWORDS.contains(&lower.as_str())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn bcrypt_hash(password: &str) -> HashedPassword {
        // Minimum cost keeps the tests fast
        HashedPassword::from_stored(bcrypt::hash(password, 4).unwrap()).unwrap()
    }

    #[test]
    fn test_policy_too_short() {
        let result = ClearTextPassword::new_validated("short".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::TooShort { .. })));
    }

    #[test]
    fn test_policy_too_long() {
        let result = ClearTextPassword::new_validated("ab".repeat(MAX_PASSWORD_LENGTH));
        assert!(matches!(result, Err(PasswordPolicyError::TooLong { .. })));
    }

    #[test]
    fn test_policy_whitespace_only() {
        let result = ClearTextPassword::new_validated("          ".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::EmptyOrWhitespace)));
    }

    #[test]
    fn test_policy_control_character() {
        let result = ClearTextPassword::new_validated("abc\u{0}defghij".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::InvalidCharacter)));
    }

    #[test]
    fn test_policy_common() {
        let result = ClearTextPassword::new_validated("Password123".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::Common)));
    }

    #[test]
    fn test_policy_accepts_reasonable_password() {
        assert!(ClearTextPassword::new_validated("MySecure#Pass2024!".to_string()).is_ok());
    }

    #[test]
    fn test_argon2_hash_and_verify() {
        let password = ClearTextPassword::new("TestPassword123!".to_string());
        let hashed = password.hash(None).unwrap();
        assert_eq!(hashed.scheme, HashScheme::Argon2);
        assert!(hashed.hash.as_str().starts_with("$argon2id$"));

        assert!(hashed.verify(&password, None));
        assert!(!hashed.verify(&ClearTextPassword::new("Wrong".to_string()), None));
        assert!(!hashed.needs_rehash());
    }

    #[test]
    fn test_argon2_with_pepper() {
        let password = ClearTextPassword::new("TestPassword123!".to_string());
        let hashed = password.hash(Some(b"pepper")).unwrap();

        assert!(hashed.verify(&password, Some(b"pepper")));
        assert!(!hashed.verify(&password, None));
        assert!(!hashed.verify(&password, Some(b"other")));
    }

    #[test]
    fn test_bcrypt_verify() {
        let hashed = bcrypt_hash("secret-pass");
        assert_eq!(hashed.scheme, HashScheme::Bcrypt);
        assert!(hashed.verify(&ClearTextPassword::new("secret-pass".to_string()), None));
        assert!(!hashed.verify(&ClearTextPassword::new("secret-pasS".to_string()), None));
        assert!(hashed.needs_rehash());
    }

    #[test]
    fn test_spring_style_2a_prefix_is_bcrypt() {
        let hash = bcrypt::hash("pw", 4).unwrap().replacen("$2b$", "$2a$", 1);
        let hashed = HashedPassword::from_stored(hash).unwrap();
        assert_eq!(hashed.scheme, HashScheme::Bcrypt);
        assert!(hashed.verify(&ClearTextPassword::new("pw".to_string()), None));
    }

    #[test]
    fn test_stored_roundtrip() {
        let password = ClearTextPassword::new("TestPassword123!".to_string());
        let hashed = password.hash(None).unwrap();
        let restored = HashedPassword::from_stored(hashed.hash.clone()).unwrap();
        assert!(restored.verify(&password, None));
    }

    #[test]
    fn test_invalid_stored_hash() {
        assert!(HashedPassword::from_stored("plaintext").is_err());
        assert!(HashedPassword::from_stored("$2b$short").is_err());
    }

    #[tokio::test]
    async fn test_verify_blocking() {
        let hashed = bcrypt_hash("secret-pass");
        let ok = hashed
            .verify_blocking(ClearTextPassword::new("secret-pass".to_string()), None)
            .await
            .unwrap();
        assert!(ok);
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::new("secret".to_string());
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));

        let hashed = bcrypt_hash("secret");
        assert!(!format!("{:?}", hashed).contains(hashed.hash.as_str()));
    }
}
