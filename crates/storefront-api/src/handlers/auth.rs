//! Auth handlers: login, refresh, logout, register, me.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use storefront_auth::gate::Resource;
use storefront_auth::session::Registration;
use storefront_core::error::AppError;

use crate::cookies;
use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{MessageResponse, SessionResponse, SessionUser, UserEnvelope};
use crate::error::ApiResult;
use crate::extractors::{Caller, ClientInfo};
use crate::state::AppState;

/// POST /api/auth/login
///
/// A missing or malformed body is treated as empty credentials, so it fails
/// with the same 401 as a wrong password.
pub async fn login(
    State(state): State<AppState>,
    ClientInfo(metadata): ClientInfo,
    jar: CookieJar,
    req: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<(CookieJar, Json<SessionResponse>)> {
    let req = req.map(|Json(req)| req).unwrap_or_default();
    let result = state
        .session_manager
        .login(&req.email, &req.password, metadata)
        .await?;

    let issuer = state.session_manager.issuer();
    let cookie_config = &state.config.cookies;
    let jar = cookies::set_access_cookie(
        jar,
        cookie_config,
        &result.access_token.token,
        issuer.access_ttl(),
    );
    let jar = cookies::set_refresh_cookie(
        jar,
        cookie_config,
        &result.refresh_token.token,
        issuer.refresh_ttl(),
    );

    Ok((
        jar,
        Json(SessionResponse {
            user: SessionUser::from(&result.user),
        }),
    ))
}

/// POST /api/auth/refresh-token
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<SessionResponse>)> {
    let presented = cookies::refresh_token(&jar, &state.config.cookies);
    let result = state.session_manager.refresh(presented.as_deref()).await?;

    let jar = cookies::set_access_cookie(
        jar,
        &state.config.cookies,
        &result.access_token.token,
        state.session_manager.issuer().access_ttl(),
    );

    Ok((
        jar,
        Json(SessionResponse {
            user: SessionUser::from(&result.user),
        }),
    ))
}

/// POST /api/auth/logout
///
/// Always succeeds and always clears both cookies.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    let presented = cookies::refresh_token(&jar, &state.config.cookies);
    state.session_manager.logout(presented.as_deref()).await;

    (
        cookies::clear_session_cookies(jar, &state.config.cookies),
        Json(MessageResponse::new("Logged out successfully")),
    )
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    req: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<UserEnvelope>)> {
    let Json(req) = req?;
    req.validate()
        .map_err(|e| AppError::validation(format!("Invalid registration: {e}")))?;

    let user = state
        .session_manager
        .register(Registration {
            name: req.name,
            email: req.email,
            password: req.password,
            phone: req.phone,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserEnvelope { user: user.into() })))
}

/// GET /api/auth/me
pub async fn me(State(state): State<AppState>, caller: Caller) -> ApiResult<Json<UserEnvelope>> {
    let claims = state
        .gate
        .authorize(caller.claims(), &Resource::Authenticated)?;

    let user = state
        .session_manager
        .find_user(claims.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(UserEnvelope { user: user.into() }))
}
