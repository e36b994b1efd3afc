//! HTTP-level integration tests for the invoice endpoints.
//!
//! Covers validation, tenant isolation, status transitions, and the
//! idempotent-delete behavior.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get_auth, post_json_auth, put_json_auth, signup_and_token,
};
use sqlx::PgPool;

/// A valid invoice payload; callers override individual fields as needed.
fn invoice_payload() -> serde_json::Value {
    serde_json::json!({
        "customer_name": "Acme Ltd",
        "customer_address": "1 High Street",
        "date": "04/11/2025",
        "invoice_no": "INV-001",
        "description": "Consulting",
        "total": "150.50"
    })
}

/// Create an invoice via the API and return its JSON representation.
async fn create_invoice(pool: &PgPool, token: &str, payload: serde_json::Value) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/invoices", payload, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// List invoices via the API and return the JSON array.
async fn list_invoices(pool: &PgPool, token: &str) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/invoices", token).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// A valid create returns 201 with the assigned id and Unpaid status, and the
/// date round-trips in DD/MM/YYYY.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_invoice_success(pool: PgPool) {
    let token = signup_and_token(&pool, "alice").await;

    let json = create_invoice(&pool, &token, invoice_payload()).await;

    assert!(json["id"].is_number());
    assert_eq!(json["customer_name"], "Acme Ltd");
    assert_eq!(json["date"], "04/11/2025");
    assert_eq!(json["total"], 150.50);
    assert_eq!(json["status"], "Unpaid");
}

/// Surrounding whitespace in fields is trimmed before persisting.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_invoice_trims_whitespace(pool: PgPool) {
    let token = signup_and_token(&pool, "alice").await;

    let mut payload = invoice_payload();
    payload["customer_name"] = serde_json::json!("  Acme Ltd  ");
    payload["total"] = serde_json::json!(" 150.50 ");

    let json = create_invoice(&pool, &token, payload).await;
    assert_eq!(json["customer_name"], "Acme Ltd");
    assert_eq!(json["total"], 150.50);
}

/// A blank field fails with 400 and persists nothing.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_invoice_missing_field_rejected(pool: PgPool) {
    let token = signup_and_token(&pool, "alice").await;

    let mut payload = invoice_payload();
    payload["description"] = serde_json::json!("   ");

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/invoices", payload, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    assert_eq!(list_invoices(&pool, &token).await.as_array().unwrap().len(), 0);
}

/// A non-numeric total fails with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_invoice_invalid_total_rejected(pool: PgPool) {
    let token = signup_and_token(&pool, "alice").await;

    let mut payload = invoice_payload();
    payload["total"] = serde_json::json!("abc");

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/invoices", payload, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(list_invoices(&pool, &token).await.as_array().unwrap().len(), 0);
}

/// An impossible calendar date (31st of February) fails with 400 and
/// persists nothing.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_invoice_invalid_date_rejected(pool: PgPool) {
    let token = signup_and_token(&pool, "alice").await;

    let mut payload = invoice_payload();
    payload["date"] = serde_json::json!("31/02/2024");

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/invoices", payload, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(list_invoices(&pool, &token).await.as_array().unwrap().len(), 0);
}

// ---------------------------------------------------------------------------
// List / get
// ---------------------------------------------------------------------------

/// Listing returns the owner's invoices in insertion order.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_returns_insertion_order(pool: PgPool) {
    let token = signup_and_token(&pool, "alice").await;

    for n in ["INV-001", "INV-002", "INV-003"] {
        let mut payload = invoice_payload();
        payload["invoice_no"] = serde_json::json!(n);
        create_invoice(&pool, &token, payload).await;
    }

    let json = list_invoices(&pool, &token).await;
    let numbers: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["invoice_no"].as_str().unwrap())
        .collect();
    assert_eq!(numbers, vec!["INV-001", "INV-002", "INV-003"]);
}

/// One tenant's invoices never appear in another tenant's list.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_is_tenant_scoped(pool: PgPool) {
    let alice = signup_and_token(&pool, "alice").await;
    let bob = signup_and_token(&pool, "bob").await;

    create_invoice(&pool, &alice, invoice_payload()).await;

    let alice_list = list_invoices(&pool, &alice).await;
    let bob_list = list_invoices(&pool, &bob).await;

    assert_eq!(alice_list.as_array().unwrap().len(), 1);
    assert_eq!(bob_list.as_array().unwrap().len(), 0);
}

/// Fetching another tenant's invoice id returns the same 404 as a missing id.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_foreign_invoice_is_not_found(pool: PgPool) {
    let alice = signup_and_token(&pool, "alice").await;
    let bob = signup_and_token(&pool, "bob").await;

    let created = create_invoice(&pool, &alice, invoice_payload()).await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let foreign = get_auth(app, &format!("/api/v1/invoices/{id}"), &bob).await;

    let app = common::build_test_app(pool);
    let missing = get_auth(app, "/api/v1/invoices/999999", &bob).await;

    assert_eq!(foreign.status(), StatusCode::NOT_FOUND);
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// Update overwrites all fields and the change is visible in a follow-up
/// list, including an Unpaid -> Paid transition.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_round_trips_through_list(pool: PgPool) {
    let token = signup_and_token(&pool, "alice").await;
    let created = create_invoice(&pool, &token, invoice_payload()).await;
    let id = created["id"].as_i64().unwrap();

    let payload = serde_json::json!({
        "customer_name": "Acme Industries",
        "customer_address": "2 Low Street",
        "date": "05/12/2025",
        "invoice_no": "INV-001-R",
        "description": "Consulting and support",
        "total": "200",
        "status": "Paid"
    });
    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(app, &format!("/api/v1/invoices/{id}"), payload, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = list_invoices(&pool, &token).await;
    let updated = &json.as_array().unwrap()[0];
    assert_eq!(updated["customer_name"], "Acme Industries");
    assert_eq!(updated["date"], "05/12/2025");
    assert_eq!(updated["total"], 200.0);
    assert_eq!(updated["status"], "Paid");
}

/// Updating another tenant's invoice id returns 404 and leaves the owner's
/// row untouched.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_foreign_invoice_is_not_found(pool: PgPool) {
    let alice = signup_and_token(&pool, "alice").await;
    let bob = signup_and_token(&pool, "bob").await;

    let created = create_invoice(&pool, &alice, invoice_payload()).await;
    let id = created["id"].as_i64().unwrap();

    let mut payload = invoice_payload();
    payload["customer_name"] = serde_json::json!("Hijacked");
    payload["status"] = serde_json::json!("Paid");

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(app, &format!("/api/v1/invoices/{id}"), payload, &bob).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = list_invoices(&pool, &alice).await;
    let untouched = &json.as_array().unwrap()[0];
    assert_eq!(untouched["customer_name"], "Acme Ltd");
    assert_eq!(untouched["status"], "Unpaid");
}

/// An unknown status value fails with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_invalid_status_rejected(pool: PgPool) {
    let token = signup_and_token(&pool, "alice").await;
    let created = create_invoice(&pool, &token, invoice_payload()).await;
    let id = created["id"].as_i64().unwrap();

    let mut payload = invoice_payload();
    payload["status"] = serde_json::json!("Overdue");

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(app, &format!("/api/v1/invoices/{id}"), payload, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The failed update must not have partially applied.
    let json = list_invoices(&pool, &token).await;
    assert_eq!(json.as_array().unwrap()[0]["status"], "Unpaid");
}

/// Updating a nonexistent id returns 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_missing_invoice_is_not_found(pool: PgPool) {
    let token = signup_and_token(&pool, "alice").await;

    let mut payload = invoice_payload();
    payload["status"] = serde_json::json!("Paid");

    let app = common::build_test_app(pool);
    let response = put_json_auth(app, "/api/v1/invoices/999999", payload, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// Deleting twice yields the same end state with no error on the second call.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_is_idempotent(pool: PgPool) {
    let token = signup_and_token(&pool, "alice").await;
    let created = create_invoice(&pool, &token, invoice_payload()).await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let first = delete_auth(app, &format!("/api/v1/invoices/{id}"), &token).await;
    assert_eq!(first.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let second = delete_auth(app, &format!("/api/v1/invoices/{id}"), &token).await;
    assert_eq!(second.status(), StatusCode::NO_CONTENT);

    assert_eq!(list_invoices(&pool, &token).await.as_array().unwrap().len(), 0);
}

/// Deleting another tenant's invoice is a no-op that leaves the row intact.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_foreign_invoice_is_noop(pool: PgPool) {
    let alice = signup_and_token(&pool, "alice").await;
    let bob = signup_and_token(&pool, "bob").await;

    let created = create_invoice(&pool, &alice, invoice_payload()).await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/invoices/{id}"), &bob).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(list_invoices(&pool, &alice).await.as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Authentication gate
// ---------------------------------------------------------------------------

/// Every invoice route rejects unauthenticated requests with 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_invoice_routes_require_auth(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = common::get(app, "/api/v1/invoices").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = common::build_test_app(pool.clone());
    let response = common::post_json(app, "/api/v1/invoices", invoice_payload()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = common::build_test_app(pool);
    let response = common::get(app, "/api/v1/invoices/1").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A garbage Bearer token is rejected with 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_invalid_token_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/invoices", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
