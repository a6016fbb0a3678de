//! Presentation Layer
//!
//! HTTP handlers, DTOs, views, access policy, middleware, and router.

pub mod dto;
pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod paths;
pub mod policy;
pub mod router;
pub mod view;

pub use handlers::CatalogAppState;
pub use middleware::{RequestContext, access_gate};
pub use policy::{AccessPolicy, AccessRule, Decision, Denial, PathPattern, Requirement};
pub use router::{catalog_router, catalog_router_generic, catalog_router_with_policy};
