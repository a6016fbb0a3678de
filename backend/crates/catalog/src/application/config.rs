//! Application Configuration

use std::time::Duration;

use platform::cookie::CookieConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Catalog application configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub session_cookie_name: String,
    pub flash_cookie_name: String,
    /// HMAC key for session tokens (32 bytes)
    pub session_secret: [u8; 32],
    /// Session lifetime after login (30 minutes)
    pub session_ttl: Duration,
    /// How long an unread flash message survives (1 minute)
    pub flash_ttl: Duration,
    pub cookie_secure: bool,
    pub cookie_same_site: SameSite,
    /// Application-wide secret mixed into Argon2 hashes
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "catalog_session".to_string(),
            flash_cookie_name: "catalog_flash".to_string(),
            session_secret: [0u8; 32],
            session_ttl: Duration::from_secs(30 * 60),
            flash_ttl: Duration::from_secs(60),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
        }
    }
}

impl CatalogConfig {
    /// Config with a random session secret; sessions do not survive restarts
    pub fn with_random_secret() -> Self {
        Self {
            session_secret: platform::crypto::random_key(),
            ..Default::default()
        }
    }

    /// Config for local development (cookies over plain HTTP)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    pub fn session_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.session_ttl).unwrap_or(chrono::Duration::MAX)
    }

    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig::new(&self.session_cookie_name)
            .with_secure(self.cookie_secure)
            .with_same_site(self.cookie_same_site)
            .with_max_age(self.session_ttl)
    }

    /// Flash cookies are only read by the login form
    pub fn flash_cookie(&self) -> CookieConfig {
        CookieConfig::new(&self.flash_cookie_name)
            .with_path("/products")
            .with_secure(self.cookie_secure)
            .with_same_site(self.cookie_same_site)
            .with_max_age(self.flash_ttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_is_insecure_with_random_secret() {
        let config = CatalogConfig::development();
        assert!(!config.cookie_secure);
        assert_ne!(config.session_secret, [0u8; 32]);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = CatalogConfig::default()
            .session_cookie()
            .build_set_cookie("token");
        assert!(cookie.starts_with("catalog_session=token"));
        assert!(cookie.contains("Path=/;"));
        assert!(cookie.contains("Max-Age=1800"));
        assert!(cookie.contains("Secure"));
    }

    #[test]
    fn test_flash_cookie_is_scoped_to_products() {
        let cookie = CatalogConfig::development()
            .flash_cookie()
            .build_set_cookie("x");
        assert!(cookie.contains("Path=/products"));
        assert!(cookie.contains("Max-Age=60"));
    }
}
