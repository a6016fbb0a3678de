//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no catalog vocabulary:
//! - Cryptographic helpers (random bytes, HMAC-SHA256, Base64url)
//! - Password hashing and verification (Argon2id, legacy bcrypt)
//! - Cookie building and parsing

pub mod cookie;
pub mod crypto;
pub mod password;
