//! Session Token
//!
//! Cookie value referencing a server-side session:
//! `<session uuid>.<base64url(HMAC-SHA256(secret, session uuid))>`.
//! The signature lets forged or corrupted cookies be rejected without a
//! store lookup.

use kernel::id::SessionId;
use platform::crypto::{from_base64url, hmac_sha256, to_base64url, verify_hmac_sha256};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionTokenError {
    #[error("Malformed session token")]
    Malformed,

    #[error("Session token signature mismatch")]
    BadSignature,
}

/// Sign a session id into a cookie value
pub fn sign(secret: &[u8; 32], session_id: SessionId) -> String {
    let id = session_id.to_string();
    let signature = hmac_sha256(secret, id.as_bytes());
    format!("{}.{}", id, to_base64url(&signature))
}

/// Verify a cookie value and extract the session id
pub fn verify(secret: &[u8; 32], token: &str) -> Result<SessionId, SessionTokenError> {
    let (id, signature_b64) = token
        .split_once('.')
        .ok_or(SessionTokenError::Malformed)?;

    let signature = from_base64url(signature_b64).map_err(|_| SessionTokenError::Malformed)?;

    if !verify_hmac_sha256(secret, id.as_bytes(), &signature) {
        return Err(SessionTokenError::BadSignature);
    }

    id.parse().map_err(|_| SessionTokenError::Malformed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [7u8; 32];

    #[test]
    fn test_sign_then_verify() {
        let session_id = SessionId::new();
        let token = sign(&SECRET, session_id);
        assert!(token.starts_with(&session_id.to_string()));
        assert_eq!(verify(&SECRET, &token), Ok(session_id));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = sign(&SECRET, SessionId::new());
        assert_eq!(
            verify(&[8u8; 32], &token),
            Err(SessionTokenError::BadSignature)
        );
    }

    #[test]
    fn test_swapped_id_is_rejected() {
        let token = sign(&SECRET, SessionId::new());
        let (_, signature) = token.split_once('.').unwrap();
        let forged = format!("{}.{}", SessionId::new(), signature);
        assert_eq!(
            verify(&SECRET, &forged),
            Err(SessionTokenError::BadSignature)
        );
    }

    #[test]
    fn test_malformed_tokens() {
        assert_eq!(verify(&SECRET, ""), Err(SessionTokenError::Malformed));
        assert_eq!(verify(&SECRET, "no-dot"), Err(SessionTokenError::Malformed));
        assert_eq!(
            verify(&SECRET, "abc.!!not-base64!!"),
            Err(SessionTokenError::Malformed)
        );
    }

    #[test]
    fn test_signed_non_uuid_is_malformed() {
        let signature = hmac_sha256(&SECRET, b"not-a-uuid");
        let token = format!("not-a-uuid.{}", to_base64url(&signature));
        assert_eq!(verify(&SECRET, &token), Err(SessionTokenError::Malformed));
    }
}
