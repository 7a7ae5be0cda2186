//! Request handlers
//!
//! Each handler validates its input, calls exactly one `DataService`
//! operation, and maps the result to a response shape.

pub mod categories;
pub mod products;
pub mod orders;
pub mod health;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// 200 with the items, or 404 with `[]` when there are none
pub(crate) fn list_or_not_found<T: Serialize>(items: Vec<T>) -> Response {
    let status = if items.is_empty() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };
    (status, Json(items)).into_response()
}
