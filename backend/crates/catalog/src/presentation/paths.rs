//! Route paths
//!
//! Everything is mounted under `/products`; the login page doubles as the
//! target of every authorization redirect.

pub const ROOT: &str = "/";
pub const LISTING: &str = "/products";
pub const LISTING_SLASH: &str = "/products/";
pub const LOGIN: &str = "/products/login";
pub const LOGOUT: &str = "/products/logout";
pub const ADMIN: &str = "/products/admin";
/// Route template; requests arrive as `/products/delete/<id>`
pub const DELETE: &str = "/products/delete/{id}";
