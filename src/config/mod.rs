//! Configuration modules, each loaded from environment variables once at
//! process start and carried in [`crate::state::AppState`]. Business logic
//! never reads the environment directly.
//!
//! - [`cors`]: allowed CORS origins
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`jwt`]: token signing secret and expiry

pub mod cors;
pub mod database;
pub mod jwt;
