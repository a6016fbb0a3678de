//! Catalog Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and configuration
//! - `infra/` - PostgreSQL and in-memory stores
//! - `presentation/` - HTTP handlers, views, access policy, router
//!
//! ## Features
//! - Login with user name + password, server-side sessions
//! - Product listing, creation and deletion
//! - User list for administrators
//!
//! ## Security Model
//! - One ordered access policy evaluated before any handler runs
//! - Roles are exact: `USER` may delete products, `ADMIN` may list users
//! - Session cookies carry an HMAC-signed session id, never user data
//! - Passwords verified against Argon2id or legacy bcrypt hashes
//! - Failed logins do not reveal whether the user exists

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::CatalogConfig;
pub use error::{CatalogError, CatalogResult};
pub use infra::{memory::InMemoryCatalogRepository, postgres::PgCatalogRepository};
pub use presentation::router::{catalog_router, catalog_router_generic, catalog_router_with_policy};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod policy {
    pub use crate::presentation::policy::*;
}
