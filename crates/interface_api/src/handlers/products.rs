//! Product handlers

use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};
use core_kernel::{CategoryId, ProductId};

use super::list_or_not_found;
use crate::dto::order::ProductOrderResponse;
use crate::dto::product::{ProductByName, ProductResponse, ProductWithCategoryName};
use crate::{error::ApiError, AppState};

/// Gets a product with its category
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductResponse>, ApiError> {
    state
        .service
        .get_product(id)
        .await?
        .map(|p| Json(ProductResponse::from(p)))
        .ok_or_else(|| ApiError::NotFound(format!("product {}", id)))
}

/// Lists the products of a category as `{name, categoryName}`
pub async fn products_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<CategoryId>,
) -> Result<Response, ApiError> {
    let products = state.service.get_products_by_category(category_id).await?;
    Ok(list_or_not_found(
        products.into_iter().map(ProductWithCategoryName::from).collect(),
    ))
}

/// Searches products by name substring as `{productName, categoryName}`
///
/// The term is matched as sent; a blank term is rejected.
pub async fn products_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    if name.trim().is_empty() {
        return Err(missing_search_term());
    }

    let products = state.service.get_products_by_name(&name).await?;
    Ok(list_or_not_found(
        products.into_iter().map(ProductByName::from).collect(),
    ))
}

/// `GET /api/products/name/` without a search term
pub async fn products_by_empty_name() -> ApiError {
    missing_search_term()
}

fn missing_search_term() -> ApiError {
    ApiError::Validation {
        message: "Request validation failed".to_string(),
        details: vec!["name: Search term is required.".to_string()],
    }
}

/// Lists the order lines of a product, highest price first
pub async fn product_orders(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Response, ApiError> {
    let details = state.service.get_order_details_by_product(id).await?;
    Ok(list_or_not_found(
        details.into_iter().map(ProductOrderResponse::from).collect(),
    ))
}
