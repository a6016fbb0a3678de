//! Domain Layer
//!
//! Entities, value objects, and the store traits the application layer
//! depends on.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{CurrentUser, NewProduct, Product, Session, User};
pub use repository::{CatalogStore, ProductRepository, SessionRepository, UserRepository};
