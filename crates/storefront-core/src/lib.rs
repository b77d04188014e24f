//! # storefront-core
//!
//! Core crate for the Storefront back end. Contains configuration schemas,
//! the unified error system, and small helpers shared by every other crate.
//!
//! This crate has **no** internal dependencies on other Storefront crates.

pub mod config;
pub mod error;
pub mod result;
pub mod timeout;

pub use error::AppError;
pub use result::AppResult;
