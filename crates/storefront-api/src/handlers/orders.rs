//! Order handlers.

use axum::Json;
use axum::extract::State;

use storefront_auth::gate::Resource;
use storefront_core::error::AppError;
use storefront_core::timeout::with_timeout;

use crate::dto::response::OrderEnvelope;
use crate::error::ApiResult;
use crate::extractors::{Caller, IdParam};
use crate::state::AppState;

/// GET /api/orders/{id}
///
/// Admins, or the customer who placed the order.
pub async fn get_order(
    State(state): State<AppState>,
    caller: Caller,
    id: IdParam,
) -> ApiResult<Json<OrderEnvelope>> {
    state
        .gate
        .authorize(caller.claims(), &Resource::Authenticated)?;
    let id = id.parse()?;

    let order = with_timeout(
        state.store_timeout(),
        "orders.find_by_id",
        state.order_repo.find_by_id(id),
    )
    .await?;

    state
        .gate
        .authorize(caller.claims(), &Resource::owned_by(order.as_ref().map(|o| o.user_id)))?;

    let order = order.ok_or_else(|| AppError::not_found("Order not found"))?;
    Ok(Json(OrderEnvelope { order }))
}
