//! Token issuance with separate access and refresh signing secrets.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use storefront_core::config::AuthConfig;
use storefront_core::error::AppError;

use super::claims::{IdentityClaims, TokenClaims, TokenKind};

/// A freshly signed token and its absolute expiry.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// The compact JWS string.
    pub token: String,
    /// When the token stops verifying.
    pub expires_at: DateTime<Utc>,
    /// The token's unique ID.
    pub jti: Uuid,
}

/// Mints HS256 access and refresh tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    access_key: EncodingKey,
    refresh_key: EncodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

impl TokenIssuer {
    /// Creates an issuer from auth configuration.
    ///
    /// Fails if either secret is empty, both are the same, or a lifetime is
    /// outside the accepted range.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        check_config(config)?;
        // Both lifetimes are bounded by `AuthConfig::validate`.
        Ok(Self {
            access_key: EncodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_key: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            access_ttl: Duration::minutes(config.access_ttl_minutes as i64),
            refresh_ttl: Duration::days(config.refresh_ttl_days as i64),
        })
    }

    /// Lifetime of access tokens.
    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    /// Lifetime of refresh tokens.
    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Signs an access token valid from now.
    pub fn issue_access_token(&self, claims: &IdentityClaims) -> Result<IssuedToken, AppError> {
        self.issue_access_token_at(claims, Utc::now())
    }

    /// Signs a refresh token valid from now.
    pub fn issue_refresh_token(&self, claims: &IdentityClaims) -> Result<IssuedToken, AppError> {
        self.issue_refresh_token_at(claims, Utc::now())
    }

    /// Signs an access token as if issued at `issued_at`.
    pub fn issue_access_token_at(
        &self,
        claims: &IdentityClaims,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, AppError> {
        self.sign(TokenKind::Access, claims, issued_at)
    }

    /// Signs a refresh token as if issued at `issued_at`.
    pub fn issue_refresh_token_at(
        &self,
        claims: &IdentityClaims,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, AppError> {
        self.sign(TokenKind::Refresh, claims, issued_at)
    }

    fn sign(
        &self,
        kind: TokenKind,
        claims: &IdentityClaims,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, AppError> {
        let (key, ttl) = match kind {
            TokenKind::Access => (&self.access_key, self.access_ttl),
            TokenKind::Refresh => (&self.refresh_key, self.refresh_ttl),
        };
        let expires_at = issued_at + ttl;
        let jti = Uuid::new_v4();

        let payload = TokenClaims {
            identity: claims.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti,
        };

        let token = encode(&Header::default(), &payload, key)
            .map_err(|e| AppError::internal(format!("Failed to encode {kind} token: {e}")))?;

        Ok(IssuedToken {
            token,
            expires_at,
            jti,
        })
    }
}

/// Rejects empty or shared signing secrets and out-of-range lifetimes.
pub(crate) fn check_config(config: &AuthConfig) -> Result<(), AppError> {
    config.validate()
}
