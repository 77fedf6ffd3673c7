//! Shared HTTP and observability plumbing for linkcode services.

pub mod health;
pub mod middleware;
pub mod tracing;
