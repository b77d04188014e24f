//! One-way digest of a raw refresh token.

use sha2::{Digest, Sha256};

/// Hex SHA-256 of a raw token. The only form in which tokens are stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenHash(String);

impl TokenHash {
    /// Hashes a raw token.
    pub fn of(raw_token: &str) -> Self {
        let digest = Sha256::digest(raw_token.as_bytes());
        Self(hex::encode(digest))
    }

    /// The hex digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TokenHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
