//! # storefront-auth
//!
//! Authentication and authorization for the storefront.
//!
//! ## Modules
//!
//! - `jwt`: identity claims, token issuance and stateless verification
//! - `password`: Argon2id hashing and password policy
//! - `session`: refresh token store and the login/refresh/logout lifecycle
//! - `gate`: admin-or-owner authorization

pub mod gate;
pub mod jwt;
pub mod password;
pub mod session;

pub use gate::{AuthorizationGate, Resource};
pub use jwt::{IdentityClaims, TokenIssuer, TokenKind, TokenValidator};
pub use password::{PasswordHasher, PasswordValidator};
pub use session::{RefreshTokenCleanup, RefreshTokenStore, SessionManager};
