//! `Caller` extractor: the verified identity behind a request, if any.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use storefront_auth::jwt::{IdentityClaims, TokenKind};

use crate::cookies;
use crate::state::AppState;

/// Verified access token claims, or `None` for an anonymous caller.
///
/// Never rejects; handlers pass the option to the authorization gate, which
/// turns `None` into a 401.
#[derive(Debug, Clone)]
pub struct Caller(pub Option<IdentityClaims>);

impl Caller {
    /// The claims, if the caller is authenticated.
    pub fn claims(&self) -> Option<&IdentityClaims> {
        self.0.as_ref()
    }
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        // Cookie first, then `Authorization: Bearer`.
        let token = cookies::access_token(&jar, &state.config.cookies).or_else(|| {
            parts
                .headers
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(|t| t.trim().to_owned())
        });

        let claims = token.and_then(|t| {
            state
                .session_manager
                .validator()
                .verify(&t, TokenKind::Access)
        });

        Ok(Caller(claims))
    }
}
