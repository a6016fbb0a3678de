use rust_decimal::Decimal;

use crate::domain::value_object::product_id::ProductId;

/// Persisted catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
}

/// Product not yet saved; the store assigns its id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
}

impl NewProduct {
    pub fn into_product(self, product_id: ProductId) -> Product {
        Product {
            product_id,
            name: self.name,
            price: self.price,
        }
    }
}
