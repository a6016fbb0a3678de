//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{SessionId, UserId};
use platform::password::HashedPassword;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    product::{NewProduct, Product},
    session::Session,
    user::User,
};
use crate::domain::repository::{ProductRepository, SessionRepository, UserRepository};
use crate::domain::value_object::{
    product_id::ProductId, user_name::UserName, user_role::UserRole,
};
use crate::error::{CatalogError, CatalogResult};

/// PostgreSQL-backed catalog repository
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgCatalogRepository {
    async fn find_by_user_name(&self, user_name: &UserName) -> CatalogResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                user_name,
                password_hash,
                user_role
            FROM users
            WHERE user_name = $1
            "#,
        )
        .bind(user_name.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_all(&self) -> CatalogResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                user_name,
                password_hash,
                user_role
            FROM users
            ORDER BY user_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_user()).collect()
    }
}

// ============================================================================
// Product Repository Implementation
// ============================================================================

impl ProductRepository for PgCatalogRepository {
    async fn get_all(&self) -> CatalogResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT
                product_id,
                name,
                price
            FROM products
            ORDER BY product_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProductRow::into_product).collect())
    }

    async fn save(&self, product: &NewProduct) -> CatalogResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (name, price)
            VALUES ($1, $2)
            RETURNING product_id, name, price
            "#,
        )
        .bind(&product.name)
        .bind(product.price)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_product())
    }

    async fn delete_by_id(&self, product_id: ProductId) -> CatalogResult<bool> {
        let deleted = sqlx::query("DELETE FROM products WHERE product_id = $1")
            .bind(product_id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgCatalogRepository {
    async fn create(&self, session: &Session) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO catalog_sessions (
                session_id,
                user_id,
                user_name,
                user_role,
                expires_at_ms,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(session.session_id.as_uuid())
        .bind(session.user_id.as_uuid())
        .bind(session.user_name.as_str())
        .bind(session.user_role.code())
        .bind(session.expires_at_ms)
        .bind(session.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, session_id: SessionId) -> CatalogResult<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT
                session_id,
                user_id,
                user_name,
                user_role,
                expires_at_ms,
                created_at
            FROM catalog_sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_session()).transpose()
    }

    async fn delete(&self, session_id: SessionId) -> CatalogResult<()> {
        sqlx::query("DELETE FROM catalog_sessions WHERE session_id = $1")
            .bind(session_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired(&self) -> CatalogResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let deleted = sqlx::query("DELETE FROM catalog_sessions WHERE expires_at_ms <= $1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired catalog sessions");

        Ok(deleted)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    user_name: String,
    password_hash: String,
    user_role: String,
}

impl UserRow {
    fn into_user(self) -> CatalogResult<User> {
        let user_name = UserName::new(self.user_name).map_err(|e| {
            CatalogError::InvalidStoredRecord(format!("user {}: {}", self.user_id, e))
        })?;

        let password_hash = HashedPassword::from_stored(self.password_hash).map_err(|e| {
            CatalogError::InvalidStoredRecord(format!("user {}: {}", self.user_id, e))
        })?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            user_name,
            password_hash,
            user_role: UserRole::from_code(&self.user_role)?,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    product_id: i64,
    name: String,
    price: Decimal,
}

impl ProductRow {
    fn into_product(self) -> Product {
        Product {
            product_id: ProductId::new(self.product_id),
            name: self.name,
            price: self.price,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: Uuid,
    user_id: Uuid,
    user_name: String,
    user_role: String,
    expires_at_ms: i64,
    created_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> CatalogResult<Session> {
        let user_name = UserName::new(self.user_name).map_err(|e| {
            CatalogError::InvalidStoredRecord(format!("session {}: {}", self.session_id, e))
        })?;

        Ok(Session {
            session_id: SessionId::from_uuid(self.session_id),
            user_id: UserId::from_uuid(self.user_id),
            user_name,
            user_role: UserRole::from_code(&self.user_role)?,
            expires_at_ms: self.expires_at_ms,
            created_at: self.created_at,
        })
    }
}
