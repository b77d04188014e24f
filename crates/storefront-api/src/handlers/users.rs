//! User profile handlers.

use axum::Json;
use axum::extract::State;

use storefront_auth::gate::Resource;
use storefront_core::error::AppError;

use crate::dto::response::UserEnvelope;
use crate::error::ApiResult;
use crate::extractors::{Caller, IdParam};
use crate::state::AppState;

/// GET /api/users/{id}
///
/// Admins, or the user themself.
pub async fn get_user(
    State(state): State<AppState>,
    caller: Caller,
    id: IdParam,
) -> ApiResult<Json<UserEnvelope>> {
    state
        .gate
        .authorize(caller.claims(), &Resource::Authenticated)?;
    let id = id.parse()?;

    let user = state.session_manager.find_user(id).await?;
    state
        .gate
        .authorize(caller.claims(), &Resource::owned_by(user.as_ref().map(|u| u.id)))?;

    let user = user.ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(Json(UserEnvelope { user: user.into() }))
}
