//! Category handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use core_kernel::CategoryId;
use validator::Validate;

use crate::dto::category::{CategoryRequest, CategoryResponse};
use crate::{error::ApiError, AppState};

/// Unwraps and validates a category body
fn validated(payload: Result<Json<CategoryRequest>, JsonRejection>) -> Result<CategoryRequest, ApiError> {
    let Json(request) = payload?;
    request.validate()?;
    Ok(request)
}

/// Lists every category
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let categories = state.service.list_categories().await?;
    Ok(Json(categories.into_iter().map(CategoryResponse::from).collect()))
}

/// Gets a category by ID
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<Json<CategoryResponse>, ApiError> {
    state
        .service
        .get_category(id)
        .await?
        .map(|c| Json(CategoryResponse::from(c)))
        .ok_or_else(|| ApiError::NotFound(format!("category {}", id)))
}

/// Creates a category and points `Location` at it
pub async fn create_category(
    State(state): State<AppState>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let request = validated(payload)?;

    let created = state
        .service
        .create_category(request.name(), request.description())
        .await?;

    let location = format!("/api/categories/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(CategoryResponse::from(created)),
    ))
}

/// Overwrites a category's name and description
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let request = validated(payload)?;

    let updated = state
        .service
        .update_category(id, request.name(), request.description())
        .await?;

    if !updated {
        return Err(ApiError::NotFound(format!("category {}", id)));
    }
    Ok(StatusCode::OK)
}

/// Deletes a category
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<StatusCode, ApiError> {
    if !state.service.delete_category(id).await? {
        return Err(ApiError::NotFound(format!("category {}", id)));
    }
    Ok(StatusCode::OK)
}
