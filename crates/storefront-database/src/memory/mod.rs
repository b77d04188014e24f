//! In-process repository backend.
//!
//! Backed by `DashMap` so every operation is a single shard-locked step.
//! Suitable for single-node development and for tests; nothing survives a
//! restart.

pub mod order;
pub mod refresh_token;
pub mod user;

pub use order::MemoryOrderRepository;
pub use refresh_token::MemoryRefreshTokenRepository;
pub use user::MemoryUserRepository;
