//! Admin user management handlers.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};

use storefront_auth::gate::Resource;
use storefront_core::error::AppError;

use crate::dto::request::{ChangeStatusRequest, PaginationParams};
use crate::dto::response::{MessageResponse, UserEnvelope, UserListResponse};
use crate::error::ApiResult;
use crate::extractors::{Caller, IdParam};
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    caller: Caller,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> ApiResult<Json<UserListResponse>> {
    state
        .gate
        .authorize(caller.claims(), &Resource::admin_only())?;
    let Query(params) = params?;

    let (limit, offset) = params.limit_offset();
    let users = state.session_manager.list_users(limit, offset).await?;

    Ok(Json(UserListResponse {
        users: users.into_iter().map(Into::into).collect(),
        page: params.page.max(1),
        per_page: limit as u64,
    }))
}

/// PATCH /api/admin/users/{id}/status
///
/// Deactivation revokes every refresh token the user holds.
pub async fn set_user_status(
    State(state): State<AppState>,
    caller: Caller,
    id: IdParam,
    req: Result<Json<ChangeStatusRequest>, JsonRejection>,
) -> ApiResult<Json<UserEnvelope>> {
    let admin = state
        .gate
        .authorize(caller.claims(), &Resource::admin_only())?;
    let id = id.parse()?;
    let Json(req) = req?;

    if admin.user_id == id && !req.is_active {
        return Err(AppError::validation("Cannot deactivate your own account").into());
    }

    if !state.session_manager.set_user_active(id, req.is_active).await? {
        return Err(AppError::not_found("User not found").into());
    }

    let user = state
        .session_manager
        .find_user(id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    tracing::info!(admin_id = %admin.user_id, user_id = %id, is_active = req.is_active, "User status changed");
    Ok(Json(UserEnvelope { user: user.into() }))
}

/// DELETE /api/admin/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    caller: Caller,
    id: IdParam,
) -> ApiResult<Json<MessageResponse>> {
    let admin = state
        .gate
        .authorize(caller.claims(), &Resource::admin_only())?;
    let id = id.parse()?;

    if admin.user_id == id {
        return Err(AppError::validation("Cannot delete your own account").into());
    }

    if !state.session_manager.delete_user(id).await? {
        return Err(AppError::not_found("User not found").into());
    }

    tracing::info!(admin_id = %admin.user_id, user_id = %id, "User deleted by admin");
    Ok(Json(MessageResponse::new("User deleted")))
}
