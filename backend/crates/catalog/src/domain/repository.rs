//! Repository Traits
//!
//! Interfaces for the credential store, product store and session store.
//! Implementations live in the infrastructure layer.

use kernel::id::SessionId;

use crate::domain::entity::{
    product::{NewProduct, Product},
    session::Session,
    user::User,
};
use crate::domain::value_object::{product_id::ProductId, user_name::UserName};
use crate::error::CatalogResult;

/// Credential store (read-only from the catalog's point of view)
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Exact match on the login name
    async fn find_by_user_name(&self, user_name: &UserName) -> CatalogResult<Option<User>>;

    /// All users, ordered by name
    async fn find_all(&self) -> CatalogResult<Vec<User>>;
}

/// Product store
#[trait_variant::make(ProductRepository: Send)]
pub trait LocalProductRepository {
    /// All products, ordered by id
    async fn get_all(&self) -> CatalogResult<Vec<Product>>;

    /// Persist a new product and return it with its assigned id
    async fn save(&self, product: &NewProduct) -> CatalogResult<Product>;

    /// Returns whether a product was removed
    async fn delete_by_id(&self, product_id: ProductId) -> CatalogResult<bool>;
}

/// Session store
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    async fn create(&self, session: &Session) -> CatalogResult<()>;

    async fn find_by_id(&self, session_id: SessionId) -> CatalogResult<Option<Session>>;

    /// Deleting a missing session is not an error
    async fn delete(&self, session_id: SessionId) -> CatalogResult<()>;

    /// Remove expired sessions, returning how many were removed
    async fn cleanup_expired(&self) -> CatalogResult<u64>;
}

/// Everything the HTTP layer needs from one backing store
pub trait CatalogStore:
    UserRepository + ProductRepository + SessionRepository + Clone + Send + Sync + 'static
{
}

impl<T> CatalogStore for T where
    T: UserRepository + ProductRepository + SessionRepository + Clone + Send + Sync + 'static
{
}
