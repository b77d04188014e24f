//! Refresh token persistence and the session lifecycle built on it.

pub mod cleanup;
pub mod manager;
pub mod store;
pub mod token_hash;

pub use cleanup::RefreshTokenCleanup;
pub use manager::{LoginResult, RefreshResult, Registration, SessionManager};
pub use store::RefreshTokenStore;
pub use token_hash::TokenHash;
