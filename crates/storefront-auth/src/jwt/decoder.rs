//! Stateless token verification.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use storefront_core::config::AuthConfig;
use storefront_core::error::AppError;

use super::claims::{IdentityClaims, TokenClaims, TokenKind};
use super::encoder::check_config;

/// Verifies signature and expiry of access and refresh tokens.
///
/// Never touches a store: a refresh token that verifies here may still be
/// revoked.
#[derive(Clone)]
pub struct TokenValidator {
    access_key: DecodingKey,
    refresh_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenValidator")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenValidator {
    /// Creates a validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        check_config(config)?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            access_key: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_key: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            validation,
        })
    }

    /// Returns the identity if `token` is a valid, unexpired token of `kind`.
    pub fn verify(&self, token: &str, kind: TokenKind) -> Option<IdentityClaims> {
        self.verify_full(token, kind).map(|c| c.identity)
    }

    /// Like [`Self::verify`] but returns the registered claims too.
    pub fn verify_full(&self, token: &str, kind: TokenKind) -> Option<TokenClaims> {
        let key = match kind {
            TokenKind::Access => &self.access_key,
            TokenKind::Refresh => &self.refresh_key,
        };

        match decode::<TokenClaims>(token, key, &self.validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                debug!(kind = %kind, reason = ?e.kind(), "Token rejected");
                None
            }
        }
    }
}
