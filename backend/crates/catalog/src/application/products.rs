//! Product Use Cases
//!
//! Listing, adding and deleting catalog entries. Authorization has
//! already happened in the access gate and the handlers by the time
//! these run.

use std::sync::Arc;

use crate::domain::entity::product::{NewProduct, Product};
use crate::domain::repository::ProductRepository;
use crate::domain::value_object::product_id::ProductId;
use crate::error::CatalogResult;

/// List products use case
pub struct ListProductsUseCase<P>
where
    P: ProductRepository,
{
    product_repo: Arc<P>,
}

impl<P> ListProductsUseCase<P>
where
    P: ProductRepository,
{
    pub fn new(product_repo: Arc<P>) -> Self {
        Self { product_repo }
    }

    pub async fn execute(&self) -> CatalogResult<Vec<Product>> {
        self.product_repo.get_all().await
    }
}

/// Add product use case
pub struct AddProductUseCase<P>
where
    P: ProductRepository,
{
    product_repo: Arc<P>,
}

impl<P> AddProductUseCase<P>
where
    P: ProductRepository,
{
    pub fn new(product_repo: Arc<P>) -> Self {
        Self { product_repo }
    }

    pub async fn execute(&self, product: NewProduct) -> CatalogResult<Product> {
        let saved = self.product_repo.save(&product).await?;

        tracing::info!(
            product_id = %saved.product_id,
            name = %saved.name,
            price = %saved.price,
            "Product added"
        );

        Ok(saved)
    }
}

/// Delete product use case
pub struct DeleteProductUseCase<P>
where
    P: ProductRepository,
{
    product_repo: Arc<P>,
}

impl<P> DeleteProductUseCase<P>
where
    P: ProductRepository,
{
    pub fn new(product_repo: Arc<P>) -> Self {
        Self { product_repo }
    }

    /// Deleting an unknown id is not an error; returns whether a row went away
    pub async fn execute(&self, product_id: ProductId) -> CatalogResult<bool> {
        let deleted = self.product_repo.delete_by_id(product_id).await?;

        if deleted {
            tracing::info!(product_id = %product_id, "Product deleted");
        } else {
            tracing::info!(product_id = %product_id, "Product to delete not found");
        }

        Ok(deleted)
    }
}
