//! Request middleware.
//!
//! Purpose: define middleware components for cross-cutting response concerns
//! such as CORS headers.

pub mod cors;

pub use cors::{Cors, CorsPolicy};
