//! Token claims, issuance, and verification.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::{IdentityClaims, TokenClaims, TokenKind};
pub use decoder::TokenValidator;
pub use encoder::{IssuedToken, TokenIssuer};
