//! HTTP API Layer
//!
//! This crate provides the REST API for the Northwind catalog using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: One per endpoint, each calling a single `DataService` operation
//! - **Middleware**: Request ids, deadlines, tracing, request logging
//! - **DTOs**: Fixed request/response shapes
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let service = Arc::new(PostgresDataService::new(pool));
//! let app = create_router(service, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    Router,
    routing::get,
    middleware as axum_middleware,
};
use domain_catalog::DataService;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{categories, health, orders, products};
use crate::middleware::request_log_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn DataService>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `service` - Data-access implementation
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(service: Arc<dyn DataService>, config: ApiConfig) -> Router {
    let request_timeout = config.request_timeout();
    let state = AppState { service, config };

    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Category routes
    let category_routes = Router::new()
        .route("/", get(categories::list_categories).post(categories::create_category))
        .route(
            "/:id",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        );

    // Product routes
    let product_routes = Router::new()
        .route("/:id", get(products::get_product))
        .route("/:id/orders", get(products::product_orders))
        .route("/category/:id", get(products::products_by_category))
        .route("/name/", get(products::products_by_empty_name))
        .route("/name/:name", get(products::products_by_name));

    // Order routes
    let order_routes = Router::new()
        .route("/", get(orders::list_orders))
        .route("/:id", get(orders::get_order))
        .route("/:id/details", get(orders::order_details));

    let api_routes = Router::new()
        .nest("/categories", category_routes)
        .nest("/products", product_routes)
        .nest("/orders", order_routes)
        .layer(axum_middleware::from_fn(request_log_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
