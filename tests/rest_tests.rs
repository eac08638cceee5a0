//! End-to-end REST tests against the in-memory stores
//!
//! Auth is disabled here; `auth_tests.rs` covers the bearer guard.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use shopfront::prelude::*;

fn create_test_server() -> TestServer {
    let app = ServerBuilder::new(AppConfig::open())
        .with_stores(Stores::in_memory())
        .build();

    TestServer::new(app).expect("Failed to create test server")
}

async fn create(server: &TestServer, path: &str, body: Value) -> Value {
    let response = server.post(path).json(&body).await;
    assert_eq!(
        response.status_code(),
        StatusCode::CREATED,
        "POST {} failed: {}",
        path,
        response.text()
    );
    response.json()
}

/// Brand and category a product can reference
async fn seed_catalog(server: &TestServer) -> (u64, u64) {
    let brand = create(server, "/brands", json!({"name": "Acme"})).await;
    let category = create(server, "/categories", json!({"name": "Tools"})).await;
    (
        brand["id"].as_u64().unwrap(),
        category["id"].as_u64().unwrap(),
    )
}

async fn seed_user(server: &TestServer, username: &str) -> u64 {
    let user = create(
        server,
        "/users",
        json!({
            "username": username,
            "password": "Passw0rd!",
            "email": format!("{username}@example.com"),
            "first_name": "Ada",
            "last_name": "Lovelace",
            "role": "customer"
        }),
    )
    .await;
    user["id"].as_u64().unwrap()
}

// =============================================================================
// Health
// =============================================================================

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoint() {
        let server = create_test_server();

        let response = server.get("/health").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "shopfront");
    }
}

// =============================================================================
// Product lifecycle
// =============================================================================

mod product_tests {
    use super::*;

    #[tokio::test]
    async fn test_product_create_get_delete_get() {
        let server = create_test_server();
        let (brand_id, category_id) = seed_catalog(&server).await;

        let created = create(
            &server,
            "/products",
            json!({
                "name": "Widget",
                "price": 9.99,
                "stock_quantity": 10,
                "brand_id": brand_id,
                "category_id": category_id
            }),
        )
        .await;
        assert_eq!(created["name"], "Widget");
        assert_eq!(created["price"], 9.99);
        assert_eq!(created["stock_quantity"], 10);
        assert_eq!(created["brand_id"], brand_id);
        assert_eq!(created["category_id"], category_id);

        let id = created["id"].as_u64().unwrap();
        let path = format!("/products/{id}");

        let response = server.get(&path).await;
        response.assert_status_ok();
        let fetched: Value = response.json();
        for field in ["name", "price", "stock_quantity", "brand_id", "category_id"] {
            assert_eq!(fetched[field], created[field], "field {field} differs");
        }

        let response = server.delete(&path).await;
        assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
        assert!(response.text().is_empty());

        let response = server.get(&path).await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["error"], "Product not found");
    }

    #[tokio::test]
    async fn test_product_with_unknown_brand_is_rejected() {
        let server = create_test_server();
        let (_, category_id) = seed_catalog(&server).await;

        let response = server
            .post("/products")
            .json(&json!({
                "name": "Widget",
                "price": 9.99,
                "stock_quantity": 1,
                "brand_id": 1,
                "category_id": category_id
            }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Validation error");
        assert_eq!(body["field"], "brand_id");

        let products: Vec<Value> = server.get("/products").await.json();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_first_failing_field_is_reported() {
        let server = create_test_server();

        let response = server
            .post("/products")
            .json(&json!({"name": "", "price": -1.0}))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["field"], "name");
        assert_eq!(body["message"], "Invalid product name");
    }

    #[tokio::test]
    async fn test_update_overwrites_fields() {
        let server = create_test_server();
        let (brand_id, category_id) = seed_catalog(&server).await;
        let created = create(
            &server,
            "/products",
            json!({
                "name": "Widget",
                "price": 9.99,
                "stock_quantity": 10,
                "brand_id": brand_id,
                "category_id": category_id
            }),
        )
        .await;
        let path = format!("/products/{}", created["id"]);

        let response = server
            .put(&path)
            .json(&json!({
                "name": "Widget Pro",
                "description": "Now with more widget",
                "price": 19.5,
                "stock_quantity": 3,
                "brand_id": brand_id,
                "category_id": category_id
            }))
            .await;
        response.assert_status_ok();

        let fetched: Value = server.get(&path).await.json();
        assert_eq!(fetched["name"], "Widget Pro");
        assert_eq!(fetched["price"], 19.5);
        assert_eq!(fetched["created_at"], created["created_at"]);
    }

    #[tokio::test]
    async fn test_rejected_update_changes_nothing() {
        let server = create_test_server();
        let (brand_id, category_id) = seed_catalog(&server).await;
        let created = create(
            &server,
            "/products",
            json!({
                "name": "Widget",
                "price": 9.99,
                "stock_quantity": 10,
                "brand_id": brand_id,
                "category_id": category_id
            }),
        )
        .await;
        let path = format!("/products/{}", created["id"]);

        let response = server
            .put(&path)
            .json(&json!({
                "name": "Renamed",
                "price": 1.0,
                "stock_quantity": -5,
                "brand_id": brand_id,
                "category_id": category_id
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

        let fetched: Value = server.get(&path).await.json();
        assert_eq!(fetched["name"], "Widget");
    }
}

// =============================================================================
// Reviews
// =============================================================================

mod review_tests {
    use super::*;

    #[tokio::test]
    async fn test_review_rating_out_of_range_is_rejected() {
        let server = create_test_server();
        let (brand_id, category_id) = seed_catalog(&server).await;
        let product = create(
            &server,
            "/products",
            json!({
                "name": "Widget",
                "price": 9.99,
                "stock_quantity": 10,
                "brand_id": brand_id,
                "category_id": category_id
            }),
        )
        .await;
        let user_id = seed_user(&server, "ada").await;

        let response = server
            .post("/reviews")
            .json(&json!({
                "product_id": product["id"],
                "user_id": user_id,
                "rating": 6,
                "comment": "Too good",
                "review_date": "2024-03-01"
            }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Validation error");
        assert_eq!(body["field"], "rating");

        let response = server.get("/reviews/search").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_review_round_trip() {
        let server = create_test_server();
        let (brand_id, category_id) = seed_catalog(&server).await;
        let product = create(
            &server,
            "/products",
            json!({
                "name": "Widget",
                "price": 9.99,
                "stock_quantity": 10,
                "brand_id": brand_id,
                "category_id": category_id
            }),
        )
        .await;
        let user_id = seed_user(&server, "ada").await;

        let created = create(
            &server,
            "/reviews",
            json!({
                "product_id": product["id"],
                "user_id": user_id,
                "rating": 5,
                "review_date": "2024-03-01"
            }),
        )
        .await;
        assert_eq!(created["rating"], 5);
        assert_eq!(created["comment"], "");

        let fetched: Value = server
            .get(&format!("/reviews/{}", created["id"]))
            .await
            .json();
        assert_eq!(fetched, created);
    }
}

// =============================================================================
// Delete, ids and malformed input
// =============================================================================

mod request_tests {
    use super::*;

    #[tokio::test]
    async fn test_delete_missing_twice_is_404_both_times() {
        let server = create_test_server();

        for _ in 0..2 {
            let response = server.delete("/brands/123").await;
            assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
            let body: Value = response.json();
            assert_eq!(body["error"], "Brand not found");
        }
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_bad_request() {
        let server = create_test_server();

        let response = server.get("/brands/abc").await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Invalid ID");

        let response = server.get("/brands/-4").await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let server = create_test_server();

        let response = server
            .post("/brands")
            .content_type("application/json")
            .text("{not json")
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Invalid JSON data");

        let response = server
            .post("/brands")
            .json(&json!({"name": 42}))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Invalid JSON data");
    }

    #[tokio::test]
    async fn test_list_empty_is_ok() {
        let server = create_test_server();

        let response = server.get("/order_items").await;
        response.assert_status_ok();
        let body: Vec<Value> = response.json();
        assert!(body.is_empty());
    }
}

// =============================================================================
// Search
// =============================================================================

mod search_tests {
    use super::*;

    async fn seed_brands(server: &TestServer) {
        for name in ["Acme Tools", "Acme Garden", "Zenith"] {
            create(server, "/brands", json!({"name": name})).await;
        }
    }

    #[tokio::test]
    async fn test_search_empty_store_is_404() {
        let server = create_test_server();

        let response = server.get("/brands/search").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["error"], "No brands found");
    }

    #[tokio::test]
    async fn test_search_without_criteria_returns_everything() {
        let server = create_test_server();
        seed_brands(&server).await;

        let response = server.get("/brands/search").await;
        response.assert_status_ok();
        let body: Vec<Value> = response.json();
        assert_eq!(body.len(), 3);
    }

    #[tokio::test]
    async fn test_search_ignores_unknown_and_mistyped_criteria() {
        let server = create_test_server();
        seed_brands(&server).await;

        let response = server.get("/brands/search?colour=red&id=abc").await;
        response.assert_status_ok();
        let body: Vec<Value> = response.json();
        assert_eq!(body.len(), 3);
    }

    #[tokio::test]
    async fn test_search_name_is_case_sensitive_contains() {
        let server = create_test_server();
        seed_brands(&server).await;

        let body: Vec<Value> = server.get("/brands/search?name=Acme").await.json();
        assert_eq!(body.len(), 2);

        let response = server.get("/brands/search?name=acme").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_search_criteria_are_conjunctive() {
        let server = create_test_server();
        let user_id = seed_user(&server, "ada").await;
        for (date, status) in [
            ("2024-01-01", "pending"),
            ("2024-01-01", "shipped"),
            ("2024-02-01", "pending"),
        ] {
            create(
                &server,
                "/orders",
                json!({
                    "user_id": user_id,
                    "order_date": date,
                    "total_amount": 10.0,
                    "status": status
                }),
            )
            .await;
        }

        let body: Vec<Value> = server
            .get("/orders/search?order_date=2024-01-01&status=PEND")
            .await
            .json();
        assert_eq!(body.len(), 1);
        assert_eq!(body[0]["status"], "pending");
        assert_eq!(body[0]["order_date"], "2024-01-01");
    }
}

// =============================================================================
// Order fulfilment
// =============================================================================

mod fulfilment_tests {
    use super::*;

    /// A pending order for a fresh user, with one product in stock
    async fn seed_order(server: &TestServer) -> (u64, u64) {
        let user_id = seed_user(server, "ada").await;
        let (brand_id, category_id) = seed_catalog(server).await;
        let product = create(
            server,
            "/products",
            json!({
                "name": "Widget",
                "price": 9.99,
                "stock_quantity": 10,
                "brand_id": brand_id,
                "category_id": category_id
            }),
        )
        .await;
        let order = create(
            server,
            "/orders",
            json!({
                "user_id": user_id,
                "order_date": "2024-03-01",
                "total_amount": 19.98,
                "status": "pending"
            }),
        )
        .await;
        (order["id"].as_u64().unwrap(), product["id"].as_u64().unwrap())
    }

    #[tokio::test]
    async fn test_order_item_payment_and_shipping_against_live_order() {
        let server = create_test_server();
        let (order_id, product_id) = seed_order(&server).await;

        let item = create(
            &server,
            "/order_items",
            json!({
                "order_id": order_id,
                "product_id": product_id,
                "quantity": 2,
                "subtotal": 19.98
            }),
        )
        .await;
        assert_eq!(item["quantity"], 2);

        for (method, status) in [("paypal", "completed"), ("credit_card", "failed")] {
            create(
                &server,
                "/payments",
                json!({
                    "order_id": order_id,
                    "payment_method": method,
                    "amount": 19.98,
                    "payment_date": "2024-03-02",
                    "status": status
                }),
            )
            .await;
        }

        create(
            &server,
            "/shipping_details",
            json!({
                "order_id": order_id,
                "address": "1 Analytical Way",
                "shipping_date": "2024-03-03",
                "estimated_arrival": "2024-03-07",
                "status": "in_transit"
            }),
        )
        .await;

        let payments: Vec<Value> = server
            .get("/payments/search?status=COMPLETED")
            .await
            .json();
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0]["payment_method"], "paypal");

        let shipments: Vec<Value> = server
            .get(&format!("/shipping_details/search?order_id={order_id}&status=Transit"))
            .await
            .json();
        assert_eq!(shipments.len(), 1);
        assert_eq!(shipments[0]["address"], "1 Analytical Way");

        let items: Vec<Value> = server
            .get(&format!("/order_items/search?order_id={order_id}"))
            .await
            .json();
        assert_eq!(items.len(), 1);

        let response = server.get("/shipping_details/search?status=returned").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["error"], "No shipping details found");
    }

    #[tokio::test]
    async fn test_payment_for_missing_order_is_rejected() {
        let server = create_test_server();

        let response = server
            .post("/payments")
            .json(&json!({
                "order_id": 42,
                "payment_method": "paypal",
                "amount": 5.0,
                "payment_date": "2024-03-02",
                "status": "pending"
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["field"], "order_id");
        assert_eq!(body["message"], "Order not found");
    }

    #[tokio::test]
    async fn test_shipping_status_is_case_sensitive_on_write() {
        let server = create_test_server();
        let (order_id, _) = seed_order(&server).await;

        let response = server
            .post("/shipping_details")
            .json(&json!({
                "order_id": order_id,
                "address": "1 Analytical Way",
                "shipping_date": "2024-03-03",
                "estimated_arrival": "2024-03-07",
                "status": "IN_TRANSIT"
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["field"], "status");
    }
}

// =============================================================================
// Users
// =============================================================================

mod user_tests {
    use super::*;

    #[tokio::test]
    async fn test_password_is_never_returned() {
        let server = create_test_server();
        let id = seed_user(&server, "ada").await;

        let fetched: Value = server.get(&format!("/users/{id}")).await.json();
        assert_eq!(fetched["username"], "ada");
        assert!(fetched.get("password").is_none());

        let listed: Vec<Value> = server.get("/users").await.json();
        assert!(listed.iter().all(|u| u.get("password").is_none()));
    }

    #[tokio::test]
    async fn test_duplicate_username_is_a_store_failure() {
        let server = create_test_server();
        seed_user(&server, "ada").await;

        let response = server
            .post("/users")
            .json(&json!({
                "username": "ada",
                "password": "Passw0rd!",
                "email": "other@example.com",
                "first_name": "Ada",
                "last_name": "Byron",
                "role": "customer"
            }))
            .await;

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["error"], "Error creating user");
    }

    #[tokio::test]
    async fn test_weak_password_is_rejected() {
        let server = create_test_server();

        let response = server
            .post("/users")
            .json(&json!({
                "username": "ada",
                "password": "password",
                "email": "ada@example.com",
                "first_name": "Ada",
                "last_name": "Lovelace",
                "role": "customer"
            }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["field"], "password");
    }
}
