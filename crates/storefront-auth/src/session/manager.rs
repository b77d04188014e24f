//! Session lifecycle: login, refresh, logout, and account changes that
//! end sessions.
//!
//! Every credential or token failure leaves this module as one of two
//! generic messages. The precise reason is only logged.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};
use uuid::Uuid;

use storefront_core::config::AuthConfig;
use storefront_core::error::AppError;
use storefront_core::timeout::with_timeout;
use storefront_core::AppResult;
use storefront_database::repositories::UserRepository;
use storefront_entity::refresh_token::ClientMetadata;
use storefront_entity::user::{CreateUser, User, UserType};

use crate::jwt::{IdentityClaims, IssuedToken, TokenIssuer, TokenKind, TokenValidator};
use crate::password::{PasswordHasher, PasswordValidator};

use super::store::RefreshTokenStore;
use super::token_hash::TokenHash;

/// Message for every login failure.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Message for every refresh failure and missing-token case.
pub const AUTHENTICATION_REQUIRED: &str = "Authentication required";

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// The authenticated user.
    pub user: User,
    /// New access token.
    pub access_token: IssuedToken,
    /// New refresh token, already persisted.
    pub refresh_token: IssuedToken,
}

/// Result of a successful refresh.
#[derive(Debug, Clone)]
pub struct RefreshResult {
    /// The user as currently stored.
    pub user: User,
    /// New access token built from the stored user.
    pub access_token: IssuedToken,
}

/// Input for self-registration.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Optional phone number.
    pub phone: Option<String>,
}

/// Orchestrates the session state machine.
#[derive(Clone)]
pub struct SessionManager {
    issuer: Arc<TokenIssuer>,
    validator: Arc<TokenValidator>,
    store: Arc<RefreshTokenStore>,
    users: Arc<dyn UserRepository>,
    hasher: Arc<PasswordHasher>,
    password_policy: PasswordValidator,
    store_timeout: Duration,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("store_timeout", &self.store_timeout)
            .finish()
    }
}

impl SessionManager {
    /// Creates a new session manager with all required dependencies.
    pub fn new(
        issuer: Arc<TokenIssuer>,
        validator: Arc<TokenValidator>,
        store: Arc<RefreshTokenStore>,
        users: Arc<dyn UserRepository>,
        hasher: Arc<PasswordHasher>,
        auth_config: &AuthConfig,
        store_timeout: Duration,
    ) -> Self {
        Self {
            issuer,
            validator,
            store,
            users,
            hasher,
            password_policy: PasswordValidator::new(auth_config),
            store_timeout,
        }
    }

    /// The token issuer, for cookie lifetimes.
    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    /// The token validator, for request authentication.
    pub fn validator(&self) -> &TokenValidator {
        &self.validator
    }

    /// Login flow:
    ///
    /// 1. Look up the user by email
    /// 2. Verify the password (against a dummy hash if the user is unknown)
    /// 3. Require an active account
    /// 4. Issue access and refresh tokens
    /// 5. Persist the refresh token hash with client metadata
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        metadata: ClientMetadata,
    ) -> AppResult<LoginResult> {
        let email = email.trim();
        let found = with_timeout(
            self.store_timeout,
            "users.find_by_email",
            self.users.find_by_email(email),
        )
        .await?;

        let Some(user) = found else {
            self.hasher.verify_dummy(password).await?;
            info!("Login rejected: unknown email");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        };

        if !self.hasher.verify_password(password, &user.password_hash).await? {
            info!(user_id = %user.id, "Login rejected: bad password");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        if !user.can_login() {
            warn!(user_id = %user.id, "Login rejected: account inactive");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        let claims = IdentityClaims::for_user(&user)?;
        let access_token = self.issuer.issue_access_token(&claims)?;
        let refresh_token = self.issuer.issue_refresh_token(&claims)?;

        self.store
            .persist(
                user.id,
                &TokenHash::of(&refresh_token.token),
                refresh_token.expires_at,
                metadata,
            )
            .await?;

        info!(
            user_id = %user.id,
            user_type = %user.user_type,
            session_id = %refresh_token.jti,
            "User logged in"
        );

        Ok(LoginResult {
            user,
            access_token,
            refresh_token,
        })
    }

    /// Refresh flow: a new access token from a live refresh token.
    ///
    /// The refresh token itself is not rotated.
    pub async fn refresh(&self, refresh_token: Option<&str>) -> AppResult<RefreshResult> {
        let Some(raw) = refresh_token.filter(|t| !t.is_empty()) else {
            return Err(AppError::authentication(AUTHENTICATION_REQUIRED));
        };

        let Some(claims) = self.validator.verify(raw, TokenKind::Refresh) else {
            info!("Refresh rejected: token failed verification");
            return Err(AppError::authentication(AUTHENTICATION_REQUIRED));
        };

        if self.store.lookup_active(&TokenHash::of(raw)).await?.is_none() {
            warn!(user_id = %claims.user_id, "Refresh rejected: token revoked");
            return Err(AppError::revoked(AUTHENTICATION_REQUIRED));
        }

        let user = match self.find_user(claims.user_id).await? {
            Some(user) if user.can_login() => user,
            Some(user) => {
                warn!(user_id = %user.id, "Refresh rejected: account inactive");
                return Err(AppError::authentication(AUTHENTICATION_REQUIRED));
            }
            None => {
                warn!(user_id = %claims.user_id, "Refresh rejected: user no longer exists");
                return Err(AppError::authentication(AUTHENTICATION_REQUIRED));
            }
        };

        let access_token = self
            .issuer
            .issue_access_token(&IdentityClaims::for_user(&user)?)?;

        info!(user_id = %user.id, "Access token refreshed");
        Ok(RefreshResult { user, access_token })
    }

    /// Logout flow. Never fails.
    ///
    /// Returns `true` if a live record was invalidated. Without a token no
    /// store call is made.
    pub async fn logout(&self, refresh_token: Option<&str>) -> bool {
        let Some(raw) = refresh_token.filter(|t| !t.is_empty()) else {
            return false;
        };

        match self.store.invalidate(&TokenHash::of(raw)).await {
            Ok(changed) => {
                info!(invalidated = changed, "User logged out");
                changed
            }
            Err(e) => {
                error!(error = %e, "Failed to invalidate refresh token on logout");
                false
            }
        }
    }

    /// Creates an active customer account. Does not log in.
    pub async fn register(&self, registration: Registration) -> AppResult<User> {
        let name = registration.name.trim().to_owned();
        let email = registration.email.trim().to_lowercase();

        if name.is_empty() {
            return Err(AppError::validation("Name is required"));
        }

        self.password_policy
            .validate(&registration.password, &[name.as_str(), email.as_str()])?;

        let password_hash = self.hasher.hash_password(&registration.password).await?;

        let user = with_timeout(
            self.store_timeout,
            "users.create",
            self.users.create(CreateUser {
                name,
                email,
                password_hash,
                user_type: UserType::Customer,
                phone: registration.phone,
            }),
        )
        .await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Finds a user by ID.
    pub async fn find_user(&self, user_id: Uuid) -> AppResult<Option<User>> {
        with_timeout(
            self.store_timeout,
            "users.find_by_id",
            self.users.find_by_id(user_id),
        )
        .await
    }

    /// Lists users page by page.
    pub async fn list_users(&self, limit: i64, offset: i64) -> AppResult<Vec<User>> {
        with_timeout(
            self.store_timeout,
            "users.list",
            self.users.list(limit, offset),
        )
        .await
    }

    /// Sets a user's active flag. Deactivation ends all their sessions.
    ///
    /// Returns `false` if the user does not exist.
    pub async fn set_user_active(&self, user_id: Uuid, active: bool) -> AppResult<bool> {
        let updated = with_timeout(
            self.store_timeout,
            "users.set_active",
            self.users.set_active(user_id, active),
        )
        .await?;

        if updated && !active {
            let revoked = self.store.invalidate_all_for_user(user_id).await?;
            info!(user_id = %user_id, revoked = revoked, "User deactivated");
        }
        Ok(updated)
    }

    /// Deletes a user after revoking all their refresh tokens.
    ///
    /// Returns `false` if the user does not exist.
    pub async fn delete_user(&self, user_id: Uuid) -> AppResult<bool> {
        let revoked = self.store.invalidate_all_for_user(user_id).await?;
        let deleted = with_timeout(
            self.store_timeout,
            "users.delete",
            self.users.delete(user_id),
        )
        .await?;

        if deleted {
            info!(user_id = %user_id, revoked = revoked, "User deleted");
        }
        Ok(deleted)
    }
}
