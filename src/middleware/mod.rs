//! Middleware del sistema
//!
//! Autenticación, autorización por rol y CORS.

pub mod auth;
pub mod cors;

pub use auth::*;
pub use cors::*;
