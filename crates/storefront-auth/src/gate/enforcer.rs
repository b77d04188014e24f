//! Admin-or-owner authorization.

use uuid::Uuid;

use storefront_core::error::AppError;

use crate::jwt::IdentityClaims;

/// Message returned for every denied request.
pub const FORBIDDEN: &str = "Forbidden";

/// What a request is trying to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// Anything a signed-in caller may see.
    Authenticated,
    /// A resource owned by a user. `None` when the resource does not exist,
    /// so only admins learn that.
    OwnedBy(Option<Uuid>),
    /// Back-office only.
    AdminOnly,
}

impl Resource {
    /// A resource with the given owner, if it exists.
    pub fn owned_by(owner: Option<Uuid>) -> Self {
        Self::OwnedBy(owner)
    }

    /// A back-office resource.
    pub fn admin_only() -> Self {
        Self::AdminOnly
    }
}

/// Decides whether validated claims may reach a resource.
///
/// 1. No claims: authentication error, before any ownership check
/// 2. Admin: allowed
/// 3. Owner match: allowed
/// 4. Otherwise: authorization error
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationGate;

impl AuthorizationGate {
    /// Creates a new gate.
    pub fn new() -> Self {
        Self
    }

    /// Returns the claims back if access is allowed.
    pub fn authorize<'a>(
        &self,
        claims: Option<&'a IdentityClaims>,
        resource: &Resource,
    ) -> Result<&'a IdentityClaims, AppError> {
        let Some(claims) = claims else {
            return Err(AppError::authentication("Authentication required"));
        };

        if claims.is_admin() {
            return Ok(claims);
        }

        match resource {
            Resource::Authenticated => Ok(claims),
            Resource::OwnedBy(Some(owner)) if *owner == claims.user_id => Ok(claims),
            Resource::OwnedBy(_) | Resource::AdminOnly => Err(AppError::authorization(FORBIDDEN)),
        }
    }
}
