//! Value Object Module

pub mod product_id;
pub mod user_name;
pub mod user_role;

pub use product_id::ProductId;
pub use user_name::{UserName, UserNameError};
pub use user_role::{UnknownRole, UserRole};
