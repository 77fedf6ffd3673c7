pub mod auth_code;
pub mod health;
