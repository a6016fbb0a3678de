//! Views
//!
//! A rendered page is a view name plus its model, serialized as
//! `{"view": ..., "model": {...}}`. Any client-side renderer can consume it.

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::presentation::dto::{CurrentUserDto, ProductDto, ProductTemplate, UserDto};

pub const LOGIN_VIEW: &str = "login";
pub const PRODUCTS_VIEW: &str = "products";
pub const ADMIN_VIEW: &str = "admin";

#[derive(Debug, Serialize)]
pub struct View<M> {
    pub view: &'static str,
    pub model: M,
}

impl<M: Serialize> View<M> {
    pub fn new(view: &'static str, model: M) -> Self {
        Self { view, model }
    }
}

impl<M: Serialize> IntoResponse for View<M> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginModel {
    /// Flash message from a failed attempt
    pub error: Option<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsModel {
    pub products: Vec<ProductDto>,
    /// Backing object for the add-product form
    pub product: ProductTemplate,
    pub current_user: Option<CurrentUserDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminModel {
    pub users: Vec<UserDto>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{product_id::ProductId, user_role::UserRole};
    use rust_decimal::Decimal;
    use serde_json::json;

    #[test]
    fn test_products_view_shape() {
        let view = View::new(
            PRODUCTS_VIEW,
            ProductsModel {
                products: vec![ProductDto {
                    id: ProductId::new(5),
                    name: "Tea".to_string(),
                    price: Decimal::new(350, 2),
                }],
                product: ProductTemplate::default(),
                current_user: Some(CurrentUserDto {
                    user_name: "alice".to_string(),
                    user_role: UserRole::User,
                }),
            },
        );

        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            json!({
                "view": "products",
                "model": {
                    "products": [{"id": 5, "name": "Tea", "price": "3.50"}],
                    "product": {"name": "", "price": null},
                    "currentUser": {"userName": "alice", "userRole": "USER"}
                }
            })
        );
    }

    #[test]
    fn test_login_view_without_flash() {
        let view = View::new(LOGIN_VIEW, LoginModel { error: None });
        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            json!({"view": "login", "model": {"error": null}})
        );
    }
}
