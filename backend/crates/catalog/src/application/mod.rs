//! Application Layer
//!
//! Use cases and application services.

pub mod check_session;
pub mod config;
pub mod list_users;
pub mod products;
pub mod session_token;
pub mod sign_in;
pub mod sign_out;

// Re-exports
pub use check_session::CheckSessionUseCase;
pub use config::CatalogConfig;
pub use list_users::ListUsersUseCase;
pub use products::{AddProductUseCase, DeleteProductUseCase, ListProductsUseCase};
pub use session_token::SessionTokenError;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
