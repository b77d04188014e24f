//! # storefront-database
//!
//! PostgreSQL connection management, repository traits, and the two
//! repository backends: PostgreSQL via sqlx and an in-process `DashMap`
//! store used for development and tests.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{OrderRepository, RefreshTokenRepository, UserRepository};
