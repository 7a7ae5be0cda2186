//! HTTP tests for the Northwind API
//!
//! The router runs over the in-memory data service seeded with the shared
//! Northwind fixture, so every test starts from the same data.

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

use domain_catalog::{DataService, InMemoryDataService};
use interface_api::{config::ApiConfig, create_router};
use test_utils::fixtures::{northwind_snapshot, EMPTY_CATEGORY_ID, MAX_CATEGORY_ID};

fn server() -> TestServer {
    let service = InMemoryDataService::with_snapshot(northwind_snapshot()).expect("fixture is consistent");
    server_over(Arc::new(service))
}

fn server_over(service: Arc<dyn DataService>) -> TestServer {
    TestServer::new(create_router(service, ApiConfig::default())).expect("Failed to start test server")
}

// ============================================================================
// Categories
// ============================================================================

mod categories {
    use super::*;

    #[tokio::test]
    async fn test_list_categories() {
        let server = server();

        let response = server.get("/api/categories").await;

        response.assert_status_ok();
        let body: Vec<Value> = response.json();
        assert_eq!(body.len(), 8);
        assert_eq!(
            body[0],
            json!({ "id": 1, "name": "Beverages", "description": "Soft drinks, coffees, teas, beers, and ales" })
        );
    }

    #[tokio::test]
    async fn test_get_category() {
        let server = server();

        let response = server.get("/api/categories/2").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["name"], "Condiments");
    }

    #[tokio::test]
    async fn test_get_missing_category_is_empty_404() {
        let server = server();

        let response = server.get("/api/categories/100").await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert!(response.text().is_empty());
    }

    #[tokio::test]
    async fn test_create_get_delete_lifecycle() {
        let server = server();
        let expected_id = MAX_CATEGORY_ID.next().unwrap().value();

        let created = server
            .post("/api/categories")
            .json(&json!({ "name": "Beverages2", "description": "test" }))
            .await;

        created.assert_status(StatusCode::CREATED);
        assert_eq!(
            created.header("location").to_str().unwrap(),
            format!("/api/categories/{}", expected_id)
        );
        let body: Value = created.json();
        assert_eq!(body, json!({ "id": expected_id, "name": "Beverages2", "description": "test" }));

        let fetched = server.get(&format!("/api/categories/{}", expected_id)).await;
        fetched.assert_status_ok();
        assert_eq!(fetched.json::<Value>(), body);

        server
            .delete(&format!("/api/categories/{}", expected_id))
            .await
            .assert_status_ok();

        server
            .get(&format!("/api/categories/{}", expected_id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_without_description() {
        let server = server();

        let response = server.post("/api/categories").json(&json!({ "name": "Snacks" })).await;

        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<Value>()["description"], "");
    }

    #[tokio::test]
    async fn test_create_stores_name_as_sent() {
        let server = server();

        let response = server
            .post("/api/categories")
            .json(&json!({ "name": "  Seafood ", "description": "Fish" }))
            .await;

        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<Value>()["name"], "  Seafood ");
    }

    #[tokio::test]
    async fn test_create_with_blank_name_is_bad_request() {
        let server = server();

        for body in [json!({ "name": "" }), json!({ "name": "   " }), json!({ "description": "x" })] {
            let response = server.post("/api/categories").json(&body).await;
            response.assert_status_bad_request();
            let error: Value = response.json();
            assert_eq!(error["error"], "validation_error");
        }

        let categories: Vec<Value> = server.get("/api/categories").await.json();
        assert_eq!(categories.len(), 8);
    }

    #[tokio::test]
    async fn test_create_with_malformed_json_is_bad_request() {
        let server = server();

        let response = server
            .post("/api/categories")
            .content_type("application/json")
            .bytes("{not json".into())
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_update_category() {
        let server = server();

        server
            .put("/api/categories/3")
            .json(&json!({ "name": "Sweets", "description": "Candy" }))
            .await
            .assert_status_ok();

        let body: Value = server.get("/api/categories/3").await.json();
        assert_eq!(body, json!({ "id": 3, "name": "Sweets", "description": "Candy" }));
    }

    #[tokio::test]
    async fn test_update_with_blank_name_leaves_category_unchanged() {
        let server = server();
        let before: Value = server.get("/api/categories/3").await.json();

        let response = server.put("/api/categories/3").json(&json!({ "name": "" })).await;

        response.assert_status_bad_request();
        let after: Value = server.get("/api/categories/3").await.json();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_update_missing_category_is_not_found() {
        let server = server();

        let response = server
            .put("/api/categories/-1")
            .json(&json!({ "name": "Updated", "description": "Description" }))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_missing_category_is_not_found() {
        let server = server();
        server.delete("/api/categories/-1").await.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_category_with_products_is_conflict() {
        let server = server();

        let response = server.delete("/api/categories/1").await;

        response.assert_status(StatusCode::CONFLICT);
        assert_eq!(response.json::<Value>()["error"], "conflict");
        server.get("/api/categories/1").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_delete_empty_category() {
        let server = server();
        let path = format!("/api/categories/{}", EMPTY_CATEGORY_ID);

        server.delete(&path).await.assert_status_ok();
        server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
    }
}

// ============================================================================
// Products
// ============================================================================

mod products {
    use super::*;

    #[tokio::test]
    async fn test_get_product_with_category() {
        let server = server();

        let response = server.get("/api/products/1").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["name"], "Chai");
        assert_eq!(body["unitPrice"], "18.00");
        assert_eq!(body["category"], json!({ "id": 1, "name": "Beverages" }));
    }

    #[tokio::test]
    async fn test_get_missing_product() {
        let server = server();
        let response = server.get("/api/products/999").await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert!(response.text().is_empty());
    }

    #[tokio::test]
    async fn test_products_by_category() {
        let server = server();

        let response = server.get("/api/products/category/1").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(
            body,
            json!([
                { "name": "Chai", "categoryName": "Beverages" },
                { "name": "Chang", "categoryName": "Beverages" },
                { "name": "Chartreuse verte", "categoryName": "Beverages" }
            ])
        );
    }

    #[tokio::test]
    async fn test_products_by_empty_category_is_404_with_empty_array() {
        let server = server();

        let response = server.get(&format!("/api/products/category/{}", EMPTY_CATEGORY_ID)).await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>(), json!([]));
    }

    #[tokio::test]
    async fn test_products_by_name() {
        let server = server();

        let response = server.get("/api/products/name/ied").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(
            body,
            json!([
                { "productName": "Singaporean Hokkien Fried Mee", "categoryName": "Grains/Cereals" },
                { "productName": "Manjimup Dried Apples", "categoryName": "Produce" }
            ])
        );
    }

    #[tokio::test]
    async fn test_products_by_name_ignores_case() {
        let server = server();

        let body: Vec<Value> = server.get("/api/products/name/CHA").await.json();

        let names: Vec<_> = body.iter().map(|p| p["productName"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Chai", "Chang", "Chartreuse verte"]);
    }

    #[tokio::test]
    async fn test_products_by_name_without_match_is_404_with_empty_array() {
        let server = server();

        let response = server.get("/api/products/name/zzzz").await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>(), json!([]));
    }

    #[tokio::test]
    async fn test_products_by_name_matches_term_as_sent() {
        let server = server();

        let padded = server.get("/api/products/name/Chai%20").await;
        padded.assert_status(StatusCode::NOT_FOUND);

        let inner_space: Vec<Value> = server.get("/api/products/name/%20Hokkien").await.json();
        assert_eq!(inner_space.len(), 1);
        assert_eq!(inner_space[0]["productName"], "Singaporean Hokkien Fried Mee");
    }

    #[tokio::test]
    async fn test_products_by_blank_name_is_bad_request() {
        let server = server();
        server.get("/api/products/name/%20").await.assert_status_bad_request();
        server.get("/api/products/name/").await.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_product_order_history() {
        let server = server();

        let response = server.get("/api/products/11/orders").await;

        response.assert_status_ok();
        let body: Vec<Value> = response.json();
        let orders: Vec<_> = body.iter().map(|d| d["orderId"].as_i64().unwrap()).collect();
        assert_eq!(orders, vec![10251, 10248]);
        assert_eq!(body[1]["orderDate"], "1996-07-04");
    }

    #[tokio::test]
    async fn test_product_without_orders_is_404_with_empty_array() {
        let server = server();
        let response = server.get("/api/products/1/orders").await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>(), json!([]));
    }
}

// ============================================================================
// Orders
// ============================================================================

mod orders {
    use super::*;

    #[tokio::test]
    async fn test_get_order() {
        let server = server();

        let response = server.get("/api/orders/10248").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["shipCity"], "Reims");
        let details = body["details"].as_array().unwrap();
        assert_eq!(details.len(), 3);
        assert_eq!(details[0]["productName"], "Queso Cabrales");
        assert_eq!(details[0]["categoryName"], "Dairy Products");
        assert_eq!(details[0]["lineTotal"], "168.00");
        assert_eq!(body["total"], "440.00");
    }

    #[tokio::test]
    async fn test_get_missing_order() {
        let server = server();
        server.get("/api/orders/1").await.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_orders() {
        let server = server();

        let body: Vec<Value> = server.get("/api/orders").await.json();

        let ids: Vec<_> = body.iter().map(|o| o["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![10248, 10249, 10250, 10251, 10252]);
        assert!(body[3]["shippedDate"].is_null());
    }

    #[tokio::test]
    async fn test_order_details() {
        let server = server();

        let response = server.get("/api/orders/10249/details").await;

        response.assert_status_ok();
        let body: Vec<Value> = response.json();
        let products: Vec<_> = body.iter().map(|d| d["productId"].as_i64().unwrap()).collect();
        assert_eq!(products, vec![14, 51]);
        assert_eq!(body[1]["categoryName"], "Produce");
    }

    #[tokio::test]
    async fn test_order_without_lines_details_is_404_with_empty_array() {
        let server = server();
        let response = server.get("/api/orders/10252/details").await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>(), json!([]));
    }
}

// ============================================================================
// Health & Middleware
// ============================================================================

mod health {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let server = server();
        let body: Value = server.get("/health").await.json();
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_readiness() {
        let server = server();
        let response = server.get("/health/ready").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["status"], "ready");
    }

    #[tokio::test]
    async fn test_request_id_is_propagated() {
        let server = server();

        let response = server
            .get("/api/categories/1")
            .add_header(
                HeaderName::from_static("x-request-id"),
                HeaderValue::from_static("abc-123"),
            )
            .await;

        assert_eq!(response.header("x-request-id").to_str().unwrap(), "abc-123");
    }

    #[tokio::test]
    async fn test_request_id_is_generated() {
        let server = server();
        let response = server.get("/api/categories/1").await;
        assert!(!response.header("x-request-id").is_empty());
    }
}
