pub mod auth_codes;
