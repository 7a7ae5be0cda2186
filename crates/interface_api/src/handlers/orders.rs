//! Order handlers

use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};
use core_kernel::OrderId;

use super::list_or_not_found;
use crate::dto::order::{OrderLineResponse, OrderResponse};
use crate::{error::ApiError, AppState};

/// Lists every order with its lines
pub async fn list_orders(
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let orders = state.service.list_orders().await?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

/// Gets an order with its lines, products, and categories
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderResponse>, ApiError> {
    state
        .service
        .get_order(id)
        .await?
        .map(|o| Json(OrderResponse::from(o)))
        .ok_or_else(|| ApiError::NotFound(format!("order {}", id)))
}

/// Lists the lines of one order
pub async fn order_details(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Response, ApiError> {
    let details = state.service.get_order_details_by_order(id).await?;
    Ok(list_or_not_found(
        details.into_iter().map(OrderLineResponse::from).collect(),
    ))
}
