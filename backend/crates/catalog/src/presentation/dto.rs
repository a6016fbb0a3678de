//! Form and view DTOs (Data Transfer Objects)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::entity::{
    product::{NewProduct, Product},
    session::CurrentUser,
    user::User,
};
use crate::domain::value_object::{product_id::ProductId, user_role::UserRole};

// ============================================================================
// Forms
// ============================================================================

/// Login form (`application/x-www-form-urlencoded`)
///
/// No `Debug`: the password must not end up in logs.
#[derive(Deserialize)]
pub struct SignInForm {
    pub username: String,
    pub password: String,
}

/// Add-product form
#[derive(Debug, Clone, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub price: Decimal,
}

impl From<ProductForm> for NewProduct {
    fn from(form: ProductForm) -> Self {
        NewProduct {
            name: form.name,
            price: form.price,
        }
    }
}

// ============================================================================
// View Models
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.product_id,
            name: product.name,
            price: product.price,
        }
    }
}

/// Blank add-product form backing
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductTemplate {
    pub name: String,
    pub price: Option<Decimal>,
}

/// Administrator's view of a user; never includes the hash
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub user_name: String,
    pub user_role: UserRole,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            user_name: user.user_name.as_str().to_string(),
            user_role: user.user_role,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserDto {
    pub user_name: String,
    pub user_role: UserRole,
}

impl From<&CurrentUser> for CurrentUserDto {
    fn from(user: &CurrentUser) -> Self {
        Self {
            user_name: user.user_name.as_str().to_string(),
            user_role: user.user_role,
        }
    }
}
