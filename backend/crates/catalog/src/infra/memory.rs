//! In-Memory Repository Implementation
//!
//! Backs the test suite and the development server when no database is
//! configured. Clones share the same underlying maps.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use kernel::id::SessionId;
use tokio::sync::RwLock;

use crate::domain::entity::{
    product::{NewProduct, Product},
    session::Session,
    user::User,
};
use crate::domain::repository::{ProductRepository, SessionRepository, UserRepository};
use crate::domain::value_object::{product_id::ProductId, user_name::UserName};
use crate::error::CatalogResult;

#[derive(Debug, Default)]
struct Inner {
    /// Keyed by login name so listing comes out ordered
    users: RwLock<BTreeMap<String, User>>,
    products: RwLock<BTreeMap<ProductId, Product>>,
    sessions: RwLock<HashMap<SessionId, Session>>,
    /// Last assigned product id
    last_product_id: AtomicI64,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogRepository {
    inner: Arc<Inner>,
}

impl InMemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a credential-store entry
    pub async fn insert_user(&self, user: User) {
        let key = user.user_name.as_str().to_string();
        self.inner.users.write().await.insert(key, user);
    }

    /// Insert a product with a fixed id; later saves continue above it
    pub async fn insert_product(&self, product: Product) {
        self.inner
            .last_product_id
            .fetch_max(product.product_id.value(), Ordering::SeqCst);
        self.inner
            .products
            .write()
            .await
            .insert(product.product_id, product);
    }

    pub async fn session_count(&self) -> usize {
        self.inner.sessions.read().await.len()
    }
}

impl UserRepository for InMemoryCatalogRepository {
    async fn find_by_user_name(&self, user_name: &UserName) -> CatalogResult<Option<User>> {
        Ok(self.inner.users.read().await.get(user_name.as_str()).cloned())
    }

    async fn find_all(&self) -> CatalogResult<Vec<User>> {
        Ok(self.inner.users.read().await.values().cloned().collect())
    }
}

impl ProductRepository for InMemoryCatalogRepository {
    async fn get_all(&self) -> CatalogResult<Vec<Product>> {
        Ok(self.inner.products.read().await.values().cloned().collect())
    }

    async fn save(&self, product: &NewProduct) -> CatalogResult<Product> {
        let mut products = self.inner.products.write().await;
        let id = self.inner.last_product_id.fetch_add(1, Ordering::SeqCst) + 1;
        let saved = product.clone().into_product(ProductId::new(id));
        products.insert(saved.product_id, saved.clone());
        Ok(saved)
    }

    async fn delete_by_id(&self, product_id: ProductId) -> CatalogResult<bool> {
        Ok(self
            .inner
            .products
            .write()
            .await
            .remove(&product_id)
            .is_some())
    }
}

impl SessionRepository for InMemoryCatalogRepository {
    async fn create(&self, session: &Session) -> CatalogResult<()> {
        self.inner
            .sessions
            .write()
            .await
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_by_id(&self, session_id: SessionId) -> CatalogResult<Option<Session>> {
        Ok(self.inner.sessions.read().await.get(&session_id).cloned())
    }

    async fn delete(&self, session_id: SessionId) -> CatalogResult<()> {
        self.inner.sessions.write().await.remove(&session_id);
        Ok(())
    }

    async fn cleanup_expired(&self) -> CatalogResult<u64> {
        let now_ms = Utc::now().timestamp_millis();
        let mut sessions = self.inner.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired_at(now_ms));
        let deleted = (before - sessions.len()) as u64;

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired catalog sessions");

        Ok(deleted)
    }
}
