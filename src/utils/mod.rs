pub mod auth;
pub mod links;
pub mod pagination;

pub use auth::test_password;
