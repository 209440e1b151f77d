//! Request middleware.

pub mod auth;
pub mod faults;

pub use auth::{AuthUser, auth_middleware};
pub use faults::fault_middleware;
