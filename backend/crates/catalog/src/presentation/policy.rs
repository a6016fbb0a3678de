//! Access Policy
//!
//! One ordered rule table decides, before any handler runs, whether a
//! request may proceed. The first rule whose method and path pattern match
//! wins; a request no rule matches is denied.
//!
//! Path patterns:
//! - literal segments match themselves exactly
//! - `*` matches exactly one segment
//! - a trailing `**` matches zero or more segments

use axum::http::Method;

use crate::domain::entity::session::CurrentUser;
use crate::domain::value_object::user_role::UserRole;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Any,
}

/// Compiled path pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
    /// Pattern ended in `**`
    rest: bool,
}

impl PathPattern {
    pub fn new(pattern: &str) -> Self {
        let mut parts: Vec<&str> = split_segments(pattern).collect();

        let rest = parts.last() == Some(&"**");
        if rest {
            parts.pop();
        }

        let segments = parts
            .into_iter()
            .map(|part| match part {
                "*" => Segment::Any,
                literal => Segment::Literal(literal.to_string()),
            })
            .collect();

        Self {
            segments,
            rest,
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        let parts: Vec<&str> = split_segments(path).collect();

        if parts.len() < self.segments.len() {
            return false;
        }
        if !self.rest && parts.len() != self.segments.len() {
            return false;
        }

        self.segments
            .iter()
            .zip(&parts)
            .all(|(segment, part)| match segment {
                Segment::Any => true,
                Segment::Literal(literal) => literal == part,
            })
    }
}

/// Empty segments are ignored, so `/products/` and `/products` are one path
fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// What a matching rule demands of the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    PermitAll,
    Authenticated,
    /// Exactly this role; no role implies another
    Role(UserRole),
}

impl Requirement {
    fn check(&self, user: Option<&CurrentUser>) -> Decision {
        match (self, user) {
            (Requirement::PermitAll, _) => Decision::Allow,
            (_, None) => Decision::Deny(Denial::Unauthenticated),
            (Requirement::Authenticated, Some(_)) => Decision::Allow,
            (Requirement::Role(role), Some(user)) if user.user_role == *role => Decision::Allow,
            (Requirement::Role(_), Some(_)) => Decision::Deny(Denial::Forbidden),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRule {
    /// `None` matches every method
    pub method: Option<Method>,
    pub pattern: PathPattern,
    pub requirement: Requirement,
}

impl AccessRule {
    pub fn new(pattern: &str, requirement: Requirement) -> Self {
        Self {
            method: None,
            pattern: PathPattern::new(pattern),
            requirement,
        }
    }

    pub fn for_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    fn applies_to(&self, method: &Method, path: &str) -> bool {
        self.method.as_ref().is_none_or(|m| m == method) && self.pattern.matches(path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(Denial),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    Unauthenticated,
    /// Authenticated, but with the wrong role
    Forbidden,
    NoMatchingRule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    rules: Vec<AccessRule>,
}

impl AccessPolicy {
    pub fn new(rules: Vec<AccessRule>) -> Self {
        Self { rules }
    }

    pub fn evaluate(&self, method: &Method, path: &str, user: Option<&CurrentUser>) -> Decision {
        self.rules
            .iter()
            .find(|rule| rule.applies_to(method, path))
            .map_or(Decision::Deny(Denial::NoMatchingRule), |rule| {
                rule.requirement.check(user)
            })
    }
}

impl Default for AccessPolicy {
    /// Deletion is reserved to `USER` and the user list to `ADMIN`; the
    /// rest of `/products` is public, including adding a product.
    fn default() -> Self {
        Self::new(vec![
            AccessRule::new("/products/delete/*", Requirement::Role(UserRole::User)),
            AccessRule::new("/products/admin", Requirement::Role(UserRole::Admin)),
            AccessRule::new("/", Requirement::PermitAll),
            AccessRule::new("/products/**", Requirement::PermitAll),
            AccessRule::new("/**", Requirement::Authenticated),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_name::UserName;
    use kernel::id::UserId;

    fn current(role: UserRole) -> CurrentUser {
        CurrentUser {
            user_id: UserId::new(),
            user_name: UserName::new("alice").unwrap(),
            user_role: role,
        }
    }

    #[test]
    fn test_literal_pattern() {
        let p = PathPattern::new("/products/admin");
        assert!(p.matches("/products/admin"));
        assert!(p.matches("/products/admin/"));
        assert!(!p.matches("/products"));
        assert!(!p.matches("/products/admin/x"));
        assert!(!p.matches("/products/Admin"));
    }

    #[test]
    fn test_single_segment_wildcard() {
        let p = PathPattern::new("/products/delete/*");
        assert!(p.matches("/products/delete/5"));
        assert!(p.matches("/products/delete/abc"));
        assert!(!p.matches("/products/delete"));
        assert!(!p.matches("/products/delete/5/6"));
    }

    #[test]
    fn test_trailing_double_wildcard() {
        let p = PathPattern::new("/products/**");
        assert!(p.matches("/products"));
        assert!(p.matches("/products/"));
        assert!(p.matches("/products/login"));
        assert!(p.matches("/products/a/b/c"));
        assert!(!p.matches("/"));
        assert!(!p.matches("/productsx"));

        let all = PathPattern::new("/**");
        assert!(all.matches("/"));
        assert!(all.matches("/anything/at/all"));
    }

    #[test]
    fn test_root_pattern_matches_only_root() {
        let p = PathPattern::new("/");
        assert!(p.matches("/"));
        assert!(!p.matches("/products"));
    }

    #[test]
    fn test_default_policy_delete_requires_exactly_user() {
        let policy = AccessPolicy::default();
        let path = "/products/delete/5";

        assert_eq!(
            policy.evaluate(&Method::POST, path, None),
            Decision::Deny(Denial::Unauthenticated)
        );
        assert_eq!(
            policy.evaluate(&Method::POST, path, Some(&current(UserRole::User))),
            Decision::Allow
        );
        assert_eq!(
            policy.evaluate(&Method::POST, path, Some(&current(UserRole::Admin))),
            Decision::Deny(Denial::Forbidden)
        );
    }

    #[test]
    fn test_default_policy_admin_requires_exactly_admin() {
        let policy = AccessPolicy::default();
        let path = "/products/admin";

        assert_eq!(
            policy.evaluate(&Method::GET, path, None),
            Decision::Deny(Denial::Unauthenticated)
        );
        assert_eq!(
            policy.evaluate(&Method::GET, path, Some(&current(UserRole::User))),
            Decision::Deny(Denial::Forbidden)
        );
        assert_eq!(
            policy.evaluate(&Method::GET, path, Some(&current(UserRole::Admin))),
            Decision::Allow
        );
    }

    #[test]
    fn test_default_policy_public_paths() {
        let policy = AccessPolicy::default();
        for (method, path) in [
            (Method::GET, "/"),
            (Method::GET, "/products"),
            (Method::POST, "/products"),
            (Method::GET, "/products/login"),
            (Method::POST, "/products/login"),
            (Method::GET, "/products/logout"),
        ] {
            assert_eq!(policy.evaluate(&method, path, None), Decision::Allow, "{path}");
        }
    }

    #[test]
    fn test_default_policy_other_paths_require_login() {
        let policy = AccessPolicy::default();
        assert_eq!(
            policy.evaluate(&Method::GET, "/elsewhere", None),
            Decision::Deny(Denial::Unauthenticated)
        );
        assert_eq!(
            policy.evaluate(&Method::GET, "/elsewhere", Some(&current(UserRole::User))),
            Decision::Allow
        );
    }

    #[test]
    fn test_first_match_wins_and_method_filter() {
        let policy = AccessPolicy::new(vec![
            AccessRule::new("/products", Requirement::Role(UserRole::Admin))
                .for_method(Method::POST),
            AccessRule::new("/products", Requirement::PermitAll),
        ]);

        assert_eq!(policy.evaluate(&Method::GET, "/products", None), Decision::Allow);
        assert_eq!(
            policy.evaluate(&Method::POST, "/products", None),
            Decision::Deny(Denial::Unauthenticated)
        );
    }

    #[test]
    fn test_unmatched_request_is_denied() {
        let policy = AccessPolicy::new(vec![AccessRule::new("/", Requirement::PermitAll)]);
        assert_eq!(
            policy.evaluate(&Method::GET, "/products", Some(&current(UserRole::Admin))),
            Decision::Deny(Denial::NoMatchingRule)
        );
    }
}
