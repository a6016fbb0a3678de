//! Flash messages
//!
//! One-shot notices carried to the next page render in a short-lived
//! cookie. The cookie holds a code, never free text.

use axum::http::HeaderMap;
use platform::cookie::{CookieConfig, extract_cookie};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FlashMessage {
    InvalidCredentials,
}

impl FlashMessage {
    pub const fn code(&self) -> &'static str {
        match self {
            FlashMessage::InvalidCredentials => "invalid_credentials",
        }
    }

    /// Text shown to the user
    pub const fn message(&self) -> &'static str {
        match self {
            FlashMessage::InvalidCredentials => "invalid credentials",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "invalid_credentials" => Some(FlashMessage::InvalidCredentials),
            _ => None,
        }
    }

    pub fn set_cookie(&self, cookie: &CookieConfig) -> String {
        cookie.build_set_cookie(self.code())
    }

    /// Pending flash, if any; unknown codes are dropped
    pub fn pending(headers: &HeaderMap, cookie: &CookieConfig) -> Option<Self> {
        extract_cookie(headers, &cookie.name).and_then(|code| Self::from_code(&code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, header};

    #[test]
    fn test_code_round_trip() {
        let flash = FlashMessage::InvalidCredentials;
        assert_eq!(FlashMessage::from_code(flash.code()), Some(flash));
        assert_eq!(FlashMessage::from_code("<script>"), None);
        assert_eq!(flash.message(), "invalid credentials");
    }

    #[test]
    fn test_pending_from_request_cookies() {
        let cookie = CookieConfig::new("catalog_flash");
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("other=1; catalog_flash=invalid_credentials"),
        );
        assert_eq!(
            FlashMessage::pending(&headers, &cookie),
            Some(FlashMessage::InvalidCredentials)
        );
        assert_eq!(FlashMessage::pending(&HeaderMap::new(), &cookie), None);
    }
}
